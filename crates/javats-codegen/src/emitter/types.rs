use super::{EmitContext, Emitter};
use crate::error::EmitError;
use crate::policy::{mapped_class_type, primitive_type};
use javats_core::ast::{Annotation, ClassType, Type};
use tracing::trace;

impl<'a> Emitter<'a> {
    pub(super) fn emit_type(&self, cx: &mut EmitContext<'a>, ty: &'a Type) -> Result<(), EmitError> {
        match ty {
            Type::Primitive {
                primitive,
                annotations,
            } => {
                self.emit_level_annotations(cx, annotations)?;
                cx.writer.print(primitive_type(*primitive));
            }
            Type::Class(class) => self.emit_class_type(cx, class)?,
            Type::Array { .. } => {
                // Outermost level first, as written in `int @A [] @B []`
                let mut levels = Vec::new();
                let mut element = ty;
                while let Type::Array {
                    component,
                    annotations,
                } = element
                {
                    levels.push(annotations);
                    element = component;
                }
                self.emit_type(cx, element)?;
                for annotations in levels {
                    self.emit_level_annotations(cx, annotations)?;
                    cx.writer.print("[]");
                }
            }
            Type::Void { .. } => {
                cx.writer.print("void");
            }
            Type::Intersection { elements } => {
                self.emit_separated(cx, elements, " & ", Self::emit_type)?
            }
            Type::Union { elements } => self.emit_separated(cx, elements, " | ", Self::emit_type)?,
            Type::Wildcard {
                extends,
                super_bound,
                ..
            } => match extends.as_deref().or(super_bound.as_deref()) {
                Some(bound) => self.emit_type(cx, bound)?,
                None => {
                    cx.writer.print("any");
                }
            },
            Type::Unknown => {}
        }
        Ok(())
    }

    /// Unscoped names are qualified through the class finder; names it cannot
    /// place are printed as written.
    pub(super) fn emit_class_type(
        &self,
        cx: &mut EmitContext<'a>,
        ty: &'a ClassType,
    ) -> Result<(), EmitError> {
        if let Some(mapped) = mapped_class_type(ty) {
            cx.writer.print(mapped);
            return Ok(());
        }

        match &ty.scope {
            Some(scope) => {
                self.emit_class_type(cx, scope)?;
                cx.writer.print(".");
                self.emit_inline_annotations(cx, &ty.annotations)?;
                cx.writer.print(&ty.name);
            }
            None => {
                self.emit_inline_annotations(cx, &ty.annotations)?;
                match self.finder.resolve(ty, &cx.scope) {
                    Ok(found) => {
                        cx.writer.print(&found.qualified_name());
                    }
                    Err(err) => {
                        trace!("Keeping '{}' unqualified: {}", ty.name, err);
                        cx.writer.print(&ty.name);
                    }
                }
            }
        }

        if let Some(args) = &ty.type_arguments {
            self.emit_type_arguments(cx, args)?;
        }
        Ok(())
    }

    /// Annotations on an array level or primitive, each set off by spaces
    pub(super) fn emit_level_annotations(
        &self,
        cx: &mut EmitContext<'a>,
        annotations: &'a [Annotation],
    ) -> Result<(), EmitError> {
        for annotation in annotations {
            cx.writer.print(" ");
            self.emit_annotation(cx, annotation)?;
            cx.writer.print(" ");
        }
        Ok(())
    }
}
