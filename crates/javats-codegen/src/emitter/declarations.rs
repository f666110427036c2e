use super::{EmitContext, Emitter};
use crate::config::Unsupported;
use crate::error::EmitError;
use crate::hoist::{must_hoist, PendingModule};
use crate::policy::escape_identifier;
use javats_core::ast::{
    AnnotationDecl, AnnotationMemberDecl, ClassDecl, ConstructorDecl, EnumConstant, EnumDecl,
    Expr, FieldDecl, ImportDecl, InitializerDecl, Member, MethodDecl, Modifier, Parameter, Type,
    TypeDecl, TypeParameter, VariableDeclarator,
};
use tracing::debug;

impl<'a> Emitter<'a> {
    pub(super) fn emit_unit(&self, cx: &mut EmitContext<'a>) -> Result<(), EmitError> {
        let unit = self.unit;
        self.emit_comment_opt(cx, unit.comment.as_ref());

        let namespace = unit
            .package
            .as_ref()
            .filter(|_| self.config.wrap_package_namespace());
        if let Some(package) = namespace {
            self.emit_member_annotations(cx, &package.annotations)?;
            cx.writer.print_line(&format!("namespace {} {{", package.name));
            cx.writer.indent();
        }

        for import in &unit.imports {
            self.emit_import(cx, import)?;
        }
        if !unit.imports.is_empty() {
            cx.writer.println();
        }

        for (i, decl) in unit.types.iter().enumerate() {
            if i > 0 {
                cx.writer.println();
            }
            self.emit_root(cx, decl)?;
            cx.writer.println();
        }

        for comment in &unit.trailing_comments {
            self.emit_comment(cx, comment);
        }

        if namespace.is_some() {
            cx.writer.unindent();
            cx.writer.print_line("}");
        }
        Ok(())
    }

    fn emit_import(&self, cx: &mut EmitContext<'a>, import: &'a ImportDecl) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, import.comment.as_ref());
        if import.is_asterisk {
            self.unsupported(cx, Unsupported::WildcardImport(import.name.clone()))?;
            cx.writer.println();
            return Ok(());
        }
        cx.writer.print_line(&format!(
            "import {} = {};",
            escape_identifier(import.identifier()),
            import.name
        ));
        Ok(())
    }

    /// A top-level declaration followed by everything hoisted out of it
    fn emit_root(&self, cx: &mut EmitContext<'a>, decl: &'a TypeDecl) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, decl.comment());
        self.emit_member_annotations(cx, decl.annotations())?;
        if decl.modifiers().contains(&Modifier::Public) {
            cx.writer.print("export ");
        }
        self.emit_type_content(cx, decl)?;

        if !cx.modules.is_empty() {
            cx.writer.println();
        }
        self.drain_modules(cx)
    }

    fn drain_modules(&self, cx: &mut EmitContext<'a>) -> Result<(), EmitError> {
        loop {
            let wave = cx.modules.take_wave();
            if wave.is_empty() {
                return Ok(());
            }
            debug!("Hoisting {} declarations into modules", wave.len());
            for pending in &wave {
                self.emit_module(cx, pending)?;
            }
        }
    }

    fn emit_module(
        &self,
        cx: &mut EmitContext<'a>,
        pending: &PendingModule<'a>,
    ) -> Result<(), EmitError> {
        for name in pending.module_names() {
            cx.writer.print_line(&format!("export module {} {{", name));
            cx.writer.indent();
        }

        let outer_scope = std::mem::replace(&mut cx.scope, pending.enclosing.clone());
        let result = self.emit_module_member(cx, pending.decl);
        cx.scope = outer_scope;
        result?;

        cx.writer.println();
        for _ in pending.module_names() {
            cx.writer.unindent();
            cx.writer.print_line("}");
        }
        Ok(())
    }

    fn emit_module_member(&self, cx: &mut EmitContext<'a>, decl: &'a TypeDecl) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, decl.comment());
        self.emit_member_annotations(cx, decl.annotations())?;
        cx.writer.print("export ");
        self.emit_type_content(cx, decl)
    }

    /// `class X { ... }`, `interface X { ... }` or `enum X { ... }` without modifiers
    fn emit_type_content(&self, cx: &mut EmitContext<'a>, decl: &'a TypeDecl) -> Result<(), EmitError> {
        match decl {
            TypeDecl::Class(class) => self.emit_class_content(cx, decl, class),
            TypeDecl::Enum(enumeration) => self.emit_enum_content(cx, decl, enumeration),
            TypeDecl::Annotation(annotation) => self.emit_annotation_content(cx, decl, annotation),
        }
    }

    pub(super) fn emit_class_content(
        &self,
        cx: &mut EmitContext<'a>,
        decl: &'a TypeDecl,
        class: &'a ClassDecl,
    ) -> Result<(), EmitError> {
        if class.is_interface {
            cx.writer.print("interface ");
        } else {
            if class.modifiers.contains(&Modifier::Abstract) {
                cx.writer.print("abstract ");
            }
            cx.writer.print("class ");
        }
        cx.writer.print(&class.name);

        // Supertypes see the declaration's own nested types
        self.scoped(cx, decl, |this, cx| {
            this.emit_type_parameters(cx, &class.type_parameters)?;
            if !class.extended_types.is_empty() {
                cx.writer.print(" extends ");
                this.emit_separated(cx, &class.extended_types, ", ", Self::emit_class_type)?;
            }
            if !class.implemented_types.is_empty() {
                cx.writer.print(" implements ");
                this.emit_separated(cx, &class.implemented_types, ", ", Self::emit_class_type)?;
            }
            cx.writer.print_line(" {");
            cx.writer.indent();
            this.emit_class_body(cx, &class.members, class.is_interface)?;
            for comment in &class.trailing_comments {
                this.emit_comment(cx, comment);
            }
            cx.writer.unindent();
            Ok(())
        })?;
        cx.writer.print("}");
        Ok(())
    }

    /// Nested types first, then everything else, each group in source order
    fn emit_class_body(
        &self,
        cx: &mut EmitContext<'a>,
        members: &'a [Member],
        in_interface: bool,
    ) -> Result<(), EmitError> {
        let types = members.iter().filter(|m| m.is_type());
        let others = members.iter().filter(|m| !m.is_type());
        for member in types.chain(others) {
            cx.writer.println();
            self.emit_member(cx, member, in_interface)?;
            cx.writer.println();
        }
        Ok(())
    }

    /// Members in source order, as in anonymous class and enum bodies
    pub(super) fn emit_members(
        &self,
        cx: &mut EmitContext<'a>,
        members: &'a [Member],
    ) -> Result<(), EmitError> {
        for member in members {
            cx.writer.println();
            self.emit_member(cx, member, false)?;
            cx.writer.println();
        }
        Ok(())
    }

    fn emit_member(
        &self,
        cx: &mut EmitContext<'a>,
        member: &'a Member,
        in_interface: bool,
    ) -> Result<(), EmitError> {
        match member {
            Member::Type(decl) => self.emit_nested_type(cx, decl),
            Member::Field(field) => self.emit_field(cx, field, in_interface),
            Member::Method(method) => self.emit_method(cx, method, in_interface),
            Member::Constructor(ctor) => self.emit_constructor(cx, ctor),
            Member::Initializer(init) => self.emit_initializer(cx, init),
            Member::AnnotationMember(member) => self.emit_annotation_member(cx, member),
        }
    }

    fn emit_nested_type(&self, cx: &mut EmitContext<'a>, decl: &'a TypeDecl) -> Result<(), EmitError> {
        let Some(enclosing) = cx.enclosing_name() else {
            return Err(EmitError::Structure(format!(
                "nested type '{}' has no enclosing declaration",
                decl.name()
            )));
        };

        match decl {
            TypeDecl::Class(class) if !must_hoist(decl, &cx.scope) => {
                self.emit_comment_opt(cx, class.comment.as_ref());
                self.emit_member_annotations(cx, &class.annotations)?;
                // `abstract` belongs to the class expression, not the property
                let mut modifiers = class.modifiers.clone();
                modifiers.remove(&Modifier::Abstract);
                self.emit_modifiers(cx, &modifiers)?;
                cx.writer.print(&class.name).print(" = ");
                if decl.is_static() {
                    self.emit_class_content(cx, decl, class)
                } else {
                    cx.writer.print(&format!("(({}_this) => ", enclosing));
                    self.emit_class_content(cx, decl, class)?;
                    cx.writer.print(")(this);");
                    Ok(())
                }
            }
            TypeDecl::Enum(enumeration) if !must_hoist(decl, &cx.scope) => {
                self.emit_comment_opt(cx, enumeration.comment.as_ref());
                self.emit_member_annotations(cx, &enumeration.annotations)?;
                self.emit_modifiers(cx, &enumeration.modifiers)?;
                self.emit_enum_content(cx, decl, enumeration)
            }
            _ => {
                if cx.modules.enqueue(decl, &cx.scope) {
                    debug!("Deferring '{}' to a module after the root declaration", decl.name());
                }
                cx.writer.print(&format!(
                    "// class or interface '{}' is export in module after root class",
                    decl.name()
                ));
                Ok(())
            }
        }
    }

    /// A class declared in a method body
    pub(super) fn emit_local_type(
        &self,
        cx: &mut EmitContext<'a>,
        decl: &'a TypeDecl,
    ) -> Result<(), EmitError> {
        let enclosing = cx.enclosing_name().ok_or_else(|| {
            EmitError::Structure(format!(
                "local type '{}' has no enclosing declaration",
                decl.name()
            ))
        })?;
        match decl {
            TypeDecl::Class(class) if !class.is_interface => {
                self.emit_comment_opt(cx, class.comment.as_ref());
                self.emit_member_annotations(cx, &class.annotations)?;
                cx.writer.print(&format!(
                    "const {} = (({}_this) => ",
                    class.name, enclosing
                ));
                self.emit_class_content(cx, decl, class)?;
                cx.writer.print(")(this);");
                Ok(())
            }
            _ => self.unsupported(cx, Unsupported::LocalType(decl.name().to_string())),
        }
    }

    fn emit_enum_content(
        &self,
        cx: &mut EmitContext<'a>,
        decl: &'a TypeDecl,
        enumeration: &'a EnumDecl,
    ) -> Result<(), EmitError> {
        cx.writer.print("enum ").print(&enumeration.name);
        self.scoped(cx, decl, |this, cx| {
            if !enumeration.implemented_types.is_empty() {
                cx.writer.print(" implements ");
                this.emit_separated(cx, &enumeration.implemented_types, ", ", Self::emit_class_type)?;
            }
            cx.writer.print_line(" {");
            cx.writer.indent();
            cx.writer.println();
            this.emit_separated(cx, &enumeration.entries, ", ", Self::emit_enum_constant)?;
            if !enumeration.members.is_empty() {
                cx.writer.print_line(";");
                this.emit_members(cx, &enumeration.members)?;
            } else if !enumeration.entries.is_empty() {
                cx.writer.println();
            }
            cx.writer.unindent();
            Ok(())
        })?;
        cx.writer.print("}");
        Ok(())
    }

    fn emit_enum_constant(
        &self,
        cx: &mut EmitContext<'a>,
        constant: &'a EnumConstant,
    ) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, constant.comment.as_ref());
        self.emit_member_annotations(cx, &constant.annotations)?;
        cx.writer.print(&constant.name);
        if !constant.arguments.is_empty() {
            self.emit_arguments(cx, &constant.arguments)?;
        }
        if !constant.class_body.is_empty() {
            cx.writer.print_line(" {");
            cx.writer.indent();
            self.emit_members(cx, &constant.class_body)?;
            cx.writer.unindent();
            cx.writer.print_line("}");
        }
        Ok(())
    }

    /// Annotation types become interfaces with one method per element
    fn emit_annotation_content(
        &self,
        cx: &mut EmitContext<'a>,
        decl: &'a TypeDecl,
        annotation: &'a AnnotationDecl,
    ) -> Result<(), EmitError> {
        cx.writer.print("interface ").print(&annotation.name).print_line(" {");
        cx.writer.indent();
        self.scoped(cx, decl, |this, cx| {
            this.emit_class_body(cx, &annotation.members, true)
        })?;
        cx.writer.unindent();
        cx.writer.print("}");
        Ok(())
    }

    fn emit_annotation_member(
        &self,
        cx: &mut EmitContext<'a>,
        member: &'a AnnotationMemberDecl,
    ) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, member.comment.as_ref());
        self.emit_member_annotations(cx, &member.annotations)?;
        cx.writer.print(&escape_identifier(&member.name)).print("(): ");
        self.emit_type(cx, &member.ty)?;
        cx.writer.print(";");
        Ok(())
    }

    fn emit_field(
        &self,
        cx: &mut EmitContext<'a>,
        field: &'a FieldDecl,
        in_interface: bool,
    ) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, field.comment.as_ref());
        self.emit_member_annotations(cx, &field.annotations)?;
        if !in_interface {
            self.emit_modifiers(cx, &field.modifiers)?;
        }
        let is_static = field.is_static();
        self.emit_separated(cx, &field.variables, ", ", |this, cx, var| {
            this.emit_declarator(cx, &field.base_type, var, is_static)
        })?;
        cx.writer.print(";");
        Ok(())
    }

    /// `name: T[] = init`; extra dimensions belong to this variable alone
    pub(super) fn emit_declarator(
        &self,
        cx: &mut EmitContext<'a>,
        base_type: &'a Type,
        var: &'a VariableDeclarator,
        static_field: bool,
    ) -> Result<(), EmitError> {
        cx.writer.print(&escape_identifier(&var.name));
        if !matches!(base_type, Type::Unknown) {
            cx.writer.print(": ");
            self.emit_type(cx, base_type)?;
            for level in &var.extra_dimensions {
                self.emit_level_annotations(cx, &level.annotations)?;
                cx.writer.print("[]");
            }
        }
        if let Some(init) = &var.initializer {
            cx.writer.print(" = ");
            match init {
                Expr::ObjectCreation {
                    scope: None,
                    ty,
                    arguments,
                    anonymous_body: Some(body),
                    ..
                } if static_field => {
                    self.emit_anonymous_class(cx, ty, arguments, body, true)?
                }
                other => self.emit_expr(cx, other)?,
            }
        }
        Ok(())
    }

    fn emit_method(
        &self,
        cx: &mut EmitContext<'a>,
        method: &'a MethodDecl,
        in_interface: bool,
    ) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, method.comment.as_ref());
        self.emit_member_annotations(cx, &method.annotations)?;
        if !in_interface {
            self.emit_modifiers(cx, &method.modifiers)?;
        }
        cx.writer.print(&escape_identifier(&method.name));
        self.emit_type_parameters(cx, &method.type_parameters)?;
        self.emit_parameters(cx, &method.parameters)?;
        cx.writer.print(": ");
        self.emit_type(cx, &method.return_type)?;
        self.emit_thrown_exceptions(cx, &method.thrown_exceptions)?;

        match &method.body {
            None => {
                cx.writer.print(";");
            }
            Some(body) => {
                cx.writer.print(" ");
                self.emit_block(cx, body)?;
            }
        }
        Ok(())
    }

    fn emit_constructor(&self, cx: &mut EmitContext<'a>, ctor: &'a ConstructorDecl) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, ctor.comment.as_ref());
        self.emit_member_annotations(cx, &ctor.annotations)?;
        cx.writer.print("constructor");
        self.emit_parameters(cx, &ctor.parameters)?;
        self.emit_thrown_exceptions(cx, &ctor.thrown_exceptions)?;
        cx.writer.print(" ");
        self.emit_block(cx, &ctor.body)
    }

    fn emit_thrown_exceptions(&self, cx: &mut EmitContext<'a>, thrown: &'a [Type]) -> Result<(), EmitError> {
        if thrown.is_empty() {
            return Ok(());
        }
        cx.writer.print(" ");
        self.unsupported(cx, Unsupported::ThrownExceptions)
    }

    fn emit_initializer(&self, cx: &mut EmitContext<'a>, init: &'a InitializerDecl) -> Result<(), EmitError> {
        self.emit_comment_opt(cx, init.comment.as_ref());
        if init.is_static {
            cx.writer.print("static ");
        }
        self.emit_block(cx, &init.body)
    }

    fn emit_parameters(&self, cx: &mut EmitContext<'a>, params: &'a [Parameter]) -> Result<(), EmitError> {
        cx.writer.print("(");
        self.emit_separated(cx, params, ", ", Self::emit_parameter)?;
        cx.writer.print(")");
        Ok(())
    }

    /// Parameters never become `const`; `final` is simply dropped
    pub(super) fn emit_parameter(&self, cx: &mut EmitContext<'a>, param: &'a Parameter) -> Result<(), EmitError> {
        self.emit_inline_annotations(cx, &param.annotations)?;
        self.emit_modifiers(cx, &param.modifiers)?;
        if param.is_var_args {
            self.emit_inline_annotations(cx, &param.var_args_annotations)?;
            cx.writer.print("...");
        }
        cx.writer.print(&escape_identifier(&param.name));
        if !matches!(param.ty, Type::Unknown) {
            cx.writer.print(": ");
            self.emit_type(cx, &param.ty)?;
        }
        if param.is_var_args {
            cx.writer.print("[]");
        }
        Ok(())
    }

    fn emit_type_parameters(
        &self,
        cx: &mut EmitContext<'a>,
        params: &'a [TypeParameter],
    ) -> Result<(), EmitError> {
        if params.is_empty() {
            return Ok(());
        }
        cx.writer.print("<");
        self.emit_separated(cx, params, ", ", |this, cx, param| {
            this.emit_inline_annotations(cx, &param.annotations)?;
            cx.writer.print(&param.name);
            if !param.bounds.is_empty() {
                cx.writer.print(" extends ");
                this.emit_separated(cx, &param.bounds, " & ", Self::emit_class_type)?;
            }
            Ok(())
        })?;
        cx.writer.print(">");
        Ok(())
    }
}
