//! Declaration tree to TypeScript printer
//!
//! [`Emitter`] only holds immutable collaborators. Everything that changes
//! while printing lives in an [`EmitContext`] owned by a single conversion:
//! the output buffer, the chain of enclosing declarations and the queue of
//! declarations waiting to be hoisted into modules.
//!
//! The printing code is split by node family:
//! - `declarations`: compilation unit, types, members, hoisted modules
//! - `statements`: method and initializer bodies
//! - `expressions`: expressions, anonymous classes, local variables
//! - `types`: type references

mod declarations;
mod expressions;
mod statements;
mod types;

use crate::config::{EmitterConfig, Unsupported, Verdict};
use crate::error::EmitError;
use crate::finder::ClassFinder;
use crate::hoist::ModuleQueue;
use crate::policy::project_modifiers;
use crate::writer::SourceWriter;
use javats_core::ast::{Annotation, AnnotationArguments, Comment, CommentKind, CompilationUnit, Modifiers, TypeDecl};
use javats_core::classpath::ClassPath;
use tracing::warn;

/// Mutable state of one conversion
pub struct EmitContext<'a> {
    writer: SourceWriter,
    /// Enclosing declarations, outermost first
    scope: Vec<&'a TypeDecl>,
    /// Anonymous class bodies being printed, innermost last
    anonymous: Vec<AnonymousFrame>,
    modules: ModuleQueue<'a>,
}

/// An anonymous class body opened while `scope` held `depth` declarations
struct AnonymousFrame {
    depth: usize,
    /// Closure parameter bound to the creating instance, absent in static context
    outer_this: Option<String>,
}

impl<'a> EmitContext<'a> {
    pub fn new(config: &EmitterConfig) -> Self {
        Self {
            writer: SourceWriter::from_config(config),
            scope: Vec::new(),
            anonymous: Vec::new(),
            modules: ModuleQueue::new(),
        }
    }

    /// Name of the innermost enclosing declaration
    fn enclosing_name(&self) -> Option<&'a str> {
        self.scope.last().map(|decl| decl.name())
    }

    /// Expression naming the instance of the innermost enclosing declaration.
    ///
    /// Inside an anonymous body `this` is the anonymous instance, so the
    /// outermost anonymous closure opened in that declaration holds it.
    fn innermost_this(&self) -> &str {
        self.anonymous
            .iter()
            .find(|frame| frame.depth == self.scope.len())
            .and_then(|frame| frame.outer_this.as_deref())
            .unwrap_or("this")
    }

    pub fn finish(self) -> String {
        self.writer.finish()
    }
}

pub struct Emitter<'a> {
    config: &'a EmitterConfig,
    finder: ClassFinder<'a>,
    unit: &'a CompilationUnit,
}

impl<'a> Emitter<'a> {
    pub fn new(
        unit: &'a CompilationUnit,
        config: &'a EmitterConfig,
        class_path: &'a dyn ClassPath,
    ) -> Self {
        Self {
            config,
            finder: ClassFinder::new(unit, class_path),
            unit,
        }
    }

    pub fn emit(&self) -> Result<String, EmitError> {
        let mut cx = EmitContext::new(self.config);
        self.emit_unit(&mut cx)?;
        Ok(cx.finish())
    }

    /// The single exit for constructs TypeScript cannot express
    fn unsupported(
        &self,
        cx: &mut EmitContext<'a>,
        construct: Unsupported,
    ) -> Result<(), EmitError> {
        match self.config.judge(&construct) {
            Verdict::Warn { marker } => {
                warn!("Emitting placeholder for unsupported construct: {}", construct.reason());
                cx.writer.print(&marker);
                Ok(())
            }
            Verdict::Fatal { reason } => Err(EmitError::Unsupported { reason }),
        }
    }

    /// Run `body` with `decl` pushed as the innermost enclosing declaration
    fn scoped(
        &self,
        cx: &mut EmitContext<'a>,
        decl: &'a TypeDecl,
        body: impl FnOnce(&Self, &mut EmitContext<'a>) -> Result<(), EmitError>,
    ) -> Result<(), EmitError> {
        cx.scope.push(decl);
        let result = body(self, cx);
        cx.scope.pop();
        result
    }

    fn emit_separated<T>(
        &self,
        cx: &mut EmitContext<'a>,
        items: &'a [T],
        separator: &str,
        mut emit: impl FnMut(&Self, &mut EmitContext<'a>, &'a T) -> Result<(), EmitError>,
    ) -> Result<(), EmitError> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                cx.writer.print(separator);
            }
            emit(self, cx, item)?;
        }
        Ok(())
    }

    fn emit_comment(&self, cx: &mut EmitContext<'a>, comment: &Comment) {
        match comment.kind {
            CommentKind::Javadoc if self.config.print_javadoc() => {
                cx.writer.print("/**");
                let lines: Vec<&str> = comment.content.split('\n').collect();
                let last = lines.len() - 1;
                for (i, line) in lines.iter().enumerate() {
                    let line = line.trim();
                    if i == last {
                        cx.writer.print(" ").print(line);
                    } else if line.is_empty() {
                        cx.writer.println();
                    } else {
                        cx.writer.print(" ").print_line(line);
                    }
                }
                cx.writer.print_line("*/");
            }
            CommentKind::Line if self.config.print_comments() => {
                let content = comment.content.replace(['\r', '\n'], " ");
                cx.writer.print("//").print_line(&content);
            }
            CommentKind::Block if self.config.print_comments() => {
                cx.writer.print("/*").print(&comment.content).print_line("*/");
            }
            _ => {}
        }
    }

    fn emit_comment_opt(&self, cx: &mut EmitContext<'a>, comment: Option<&Comment>) {
        if let Some(comment) = comment {
            self.emit_comment(cx, comment);
        }
    }

    fn emit_annotation(
        &self,
        cx: &mut EmitContext<'a>,
        annotation: &'a Annotation,
    ) -> Result<(), EmitError> {
        cx.writer.print("/* @").print(&annotation.name);
        match &annotation.arguments {
            AnnotationArguments::Marker => {}
            AnnotationArguments::Single { value } => {
                cx.writer.print("(");
                self.emit_expr(cx, value)?;
                cx.writer.print(")");
            }
            AnnotationArguments::Normal { pairs } => {
                cx.writer.print("(");
                self.emit_separated(cx, pairs, ", ", |this, cx, pair| {
                    cx.writer.print(&pair.name).print(" = ");
                    this.emit_expr(cx, &pair.value)
                })?;
                cx.writer.print(")");
            }
        }
        cx.writer.print(" */");
        Ok(())
    }

    /// One annotation per line, above a declaration
    fn emit_member_annotations(
        &self,
        cx: &mut EmitContext<'a>,
        annotations: &'a [Annotation],
    ) -> Result<(), EmitError> {
        for annotation in annotations {
            self.emit_annotation(cx, annotation)?;
            cx.writer.println();
        }
        Ok(())
    }

    /// Annotations in front of a parameter or type
    fn emit_inline_annotations(
        &self,
        cx: &mut EmitContext<'a>,
        annotations: &'a [Annotation],
    ) -> Result<(), EmitError> {
        for annotation in annotations {
            self.emit_annotation(cx, annotation)?;
            cx.writer.print(" ");
        }
        Ok(())
    }

    fn emit_modifiers(
        &self,
        cx: &mut EmitContext<'a>,
        modifiers: &Modifiers,
    ) -> Result<(), EmitError> {
        let projection = project_modifiers(modifiers);
        if !projection.rejected.is_empty() {
            self.unsupported(cx, Unsupported::Modifiers(projection.rejected.clone()))?;
            cx.writer.print(" ");
        }
        cx.writer.print(&projection.prefix());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailureMode;
    use javats_core::ast::{ClassDecl, Expr, FieldDecl, Modifier, Type};
    use javats_core::classpath::ClassIndex;
    use pretty_assertions::assert_eq;

    fn emit_with(unit: &CompilationUnit, config: &EmitterConfig) -> Result<String, EmitError> {
        let jdk = ClassIndex::jdk();
        Emitter::new(unit, config, &jdk).emit()
    }

    #[test]
    fn test_javadoc_lines_are_trimmed() -> Result<(), EmitError> {
        let unit = CompilationUnit::new().with_type(
            ClassDecl::class("Doc").with_javadoc("\n   * First line\n   *\n   * Second\n   "),
        );
        let out = emit_with(&unit, &EmitterConfig::default())?;
        assert_eq!(
            out,
            "/**\n * First line\n *\n * Second\n */\nclass Doc {\n}\n"
        );
        Ok(())
    }

    #[test]
    fn test_comment_switches() -> Result<(), EmitError> {
        let unit = CompilationUnit::new()
            .with_comment(Comment::line(" generated"))
            .with_type(ClassDecl::class("Quiet").with_javadoc(" doc "));

        let config = EmitterConfig::builder()
            .print_comments(false)
            .build()
            .map_err(|e| EmitError::Structure(e.to_string()))?;
        assert_eq!(emit_with(&unit, &config)?, "/** doc*/\nclass Quiet {\n}\n");

        let config = EmitterConfig::builder()
            .print_javadoc(false)
            .build()
            .map_err(|e| EmitError::Structure(e.to_string()))?;
        assert_eq!(emit_with(&unit, &config)?, "// generated\nclass Quiet {\n}\n");
        Ok(())
    }

    #[test]
    fn test_annotation_forms() -> Result<(), EmitError> {
        let field = FieldDecl::single(&[], Type::int(), "retries")
            .with_annotation(Annotation::marker("Deprecated"))
            .with_annotation(Annotation::single("SuppressWarnings", Expr::string("unused")))
            .with_annotation(Annotation::normal(
                "Range",
                vec![("min", Expr::int("1")), ("max", Expr::int("5"))],
            ));
        let unit = CompilationUnit::new().with_type(ClassDecl::class("Ann").with_member(field));

        let out = emit_with(&unit, &EmitterConfig::default())?;
        assert_eq!(
            out,
            concat!(
                "class Ann {\n",
                "\n",
                "    /* @Deprecated */\n",
                "    /* @SuppressWarnings(\"unused\") */\n",
                "    /* @Range(min = 1, max = 5) */\n",
                "    retries: number;\n",
                "}\n",
            )
        );
        Ok(())
    }

    #[test]
    fn test_unsupported_modifier_marker_and_strict_failure() {
        let unit = CompilationUnit::new().with_type(ClassDecl::class("Cache").with_member(
            FieldDecl::single(&[Modifier::Private, Modifier::Volatile], Type::long(), "hits"),
        ));

        let tolerant = emit_with(&unit, &EmitterConfig::default());
        assert!(tolerant.is_ok_and(|out| out.contains(
            "/* java2ts not support : not support modifiers: volatile  */ private hits: number;"
        )));

        let strict = EmitterConfig::builder()
            .failure_mode(FailureMode::Strict)
            .build()
            .map(|config| emit_with(&unit, &config));
        assert!(matches!(
            strict,
            Ok(Err(EmitError::Unsupported { reason })) if reason.contains("volatile")
        ));
    }
}
