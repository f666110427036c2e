use super::{AnonymousFrame, EmitContext, Emitter};
use crate::config::Unsupported;
use crate::error::EmitError;
use crate::policy::{escape_identifier, strip_double_suffix, strip_long_suffix};
use javats_core::ast::{
    BinaryOp, ClassType, Expr, LambdaBody, Member, Primitive, Type, VariableDeclarationExpr,
};
use tracing::trace;

impl<'a> Emitter<'a> {
    pub(super) fn emit_expr(&self, cx: &mut EmitContext<'a>, expr: &'a Expr) -> Result<(), EmitError> {
        match expr {
            Expr::Name { name } => {
                cx.writer.print(&escape_identifier(name));
            }
            Expr::FieldAccess { scope, name } => {
                self.emit_expr(cx, scope)?;
                cx.writer.print(".").print(&escape_identifier(name));
            }
            Expr::ArrayAccess { array, index } => {
                self.emit_expr(cx, array)?;
                cx.writer.print("[");
                self.emit_expr(cx, index)?;
                cx.writer.print("]");
            }
            Expr::ArrayCreation {
                element_type,
                levels,
                initializer,
            } => match initializer {
                Some(values) => self.emit_array_literal(cx, values)?,
                None => {
                    cx.writer.print("new Array<");
                    self.emit_type(cx, element_type)?;
                    for _ in 1..levels.len() {
                        cx.writer.print("[]");
                    }
                    cx.writer.print(">(");
                    if let Some(dimension) = levels.first().and_then(|l| l.dimension.as_ref()) {
                        self.emit_expr(cx, dimension)?;
                    }
                    cx.writer.print(")");
                }
            },
            Expr::ArrayInitializer { values } => self.emit_array_literal(cx, values)?,
            Expr::Assign { target, op, value } => {
                self.emit_expr(cx, target)?;
                cx.writer.print(" ").print(op.as_str()).print(" ");
                self.emit_expr(cx, value)?;
            }
            Expr::Binary { left, op, right } => {
                let op = match op {
                    BinaryOp::Equals => "===",
                    BinaryOp::NotEquals => "!==",
                    other => other.as_str(),
                };
                self.emit_expr(cx, left)?;
                cx.writer.print(" ").print(op).print(" ");
                self.emit_expr(cx, right)?;
            }
            Expr::Unary { op, expr } => {
                if op.is_postfix() {
                    self.emit_expr(cx, expr)?;
                    cx.writer.print(op.as_str());
                } else {
                    cx.writer.print(op.as_str());
                    self.emit_expr(cx, expr)?;
                }
            }
            Expr::Cast { ty, expr } => match ty {
                // Integral narrowing truncates in Java; plain numbers would keep the fraction
                Type::Primitive {
                    primitive: Primitive::Int | Primitive::Long,
                    ..
                } => {
                    cx.writer.print("Math.floor(");
                    self.emit_expr(cx, expr)?;
                    cx.writer.print(")");
                }
                _ => {
                    cx.writer.print("<");
                    self.emit_type(cx, ty)?;
                    cx.writer.print(">");
                    self.emit_expr(cx, expr)?;
                }
            },
            Expr::Class { ty } => {
                self.emit_type(cx, ty)?;
                cx.writer.print(".class");
            }
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => {
                self.emit_expr(cx, condition)?;
                cx.writer.print(" ? ");
                self.emit_expr(cx, then)?;
                cx.writer.print(" : ");
                self.emit_expr(cx, otherwise)?;
            }
            Expr::Enclosed { inner } => {
                cx.writer.print("(");
                self.emit_expr(cx, inner)?;
                cx.writer.print(")");
            }
            Expr::InstanceOf { expr, ty } => {
                self.emit_expr(cx, expr)?;
                cx.writer.print(" instanceof ");
                self.emit_type(cx, ty)?;
            }
            Expr::IntegerLiteral { value } => {
                cx.writer.print(value);
            }
            Expr::LongLiteral { value } => {
                cx.writer.print(strip_long_suffix(value));
            }
            Expr::DoubleLiteral { value } => {
                cx.writer.print(strip_double_suffix(value));
            }
            Expr::CharLiteral { value } => {
                cx.writer.print("'").print(value).print("'");
            }
            Expr::StringLiteral { value } => {
                cx.writer.print("\"").print(value).print("\"");
            }
            Expr::BooleanLiteral { value } => {
                cx.writer.print(if *value { "true" } else { "false" });
            }
            Expr::NullLiteral => {
                cx.writer.print("null");
            }
            Expr::This { qualifier } => self.emit_this(cx, qualifier.as_deref()),
            Expr::Super { qualifier } => {
                if let Some(name) = qualifier {
                    self.unsupported(cx, Unsupported::QualifiedSuper(name.clone()))?;
                }
                cx.writer.print("super");
            }
            Expr::MethodCall {
                scope,
                type_arguments,
                name,
                arguments,
            } => {
                if let Some(scope) = scope {
                    self.emit_expr(cx, scope)?;
                    cx.writer.print(".");
                }
                cx.writer.print(&escape_identifier(name));
                self.emit_type_arguments(cx, type_arguments)?;
                self.emit_arguments(cx, arguments)?;
            }
            Expr::ObjectCreation {
                scope,
                ty,
                arguments,
                anonymous_body: Some(body),
                ..
            } => {
                if scope.is_some() {
                    self.unsupported(cx, Unsupported::QualifiedAnonymousClass(ty.name.clone()))?;
                }
                self.emit_anonymous_class(cx, ty, arguments, body, false)?;
            }
            Expr::ObjectCreation {
                scope,
                ty,
                arguments,
                anonymous_body: None,
                ..
            } => {
                if let Some(scope) = scope {
                    self.emit_expr(cx, scope)?;
                    cx.writer.print(".");
                }
                cx.writer.print("new ");
                self.emit_class_type(cx, ty)?;
                self.emit_arguments(cx, arguments)?;
            }
            Expr::Lambda {
                parameters,
                enclosing_parameters,
                body,
            } => {
                if *enclosing_parameters {
                    cx.writer.print("(");
                }
                self.emit_separated(cx, parameters, ", ", Self::emit_parameter)?;
                if *enclosing_parameters {
                    cx.writer.print(")");
                }
                cx.writer.print(" => ");
                match body {
                    LambdaBody::Expression { expr } => self.emit_expr(cx, expr)?,
                    LambdaBody::Block(block) => self.emit_block(cx, block)?,
                }
            }
            Expr::MethodReference {
                scope, identifier, ..
            } => {
                self.unsupported(cx, Unsupported::MethodReference)?;
                self.emit_expr(cx, scope)?;
                cx.writer.print(".").print(&escape_identifier(identifier));
            }
            Expr::TypeExpr { ty } => self.emit_type(cx, ty)?,
            Expr::VariableDeclaration(var) => self.emit_variable_declaration(cx, var)?,
            Expr::Annotation(annotation) => self.emit_annotation(cx, annotation)?,
        }
        Ok(())
    }

    pub(super) fn emit_arguments(&self, cx: &mut EmitContext<'a>, arguments: &'a [Expr]) -> Result<(), EmitError> {
        cx.writer.print("(");
        self.emit_separated(cx, arguments, ", ", Self::emit_expr)?;
        cx.writer.print(")");
        Ok(())
    }

    fn emit_array_literal(&self, cx: &mut EmitContext<'a>, values: &'a [Expr]) -> Result<(), EmitError> {
        cx.writer.print("[");
        self.emit_separated(cx, values, ", ", Self::emit_expr)?;
        cx.writer.print("]");
        Ok(())
    }

    /// `Outer.this` becomes the `Outer_this` parameter of the closure wrapping
    /// the inner class. Naming the class being printed it is plain `this`, or
    /// the captured instance when inside an anonymous class body.
    fn emit_this(&self, cx: &mut EmitContext<'a>, qualifier: Option<&str>) {
        match qualifier {
            Some(name) if cx.enclosing_name() != Some(name) => {
                cx.writer.print(name).print("_this");
            }
            Some(_) => {
                let own = cx.innermost_this().to_string();
                cx.writer.print(&own);
            }
            None => {
                cx.writer.print("this");
            }
        }
    }

    /// `let a: T = 1, b: T[]`; `final` locals become `const`
    pub(super) fn emit_variable_declaration(
        &self,
        cx: &mut EmitContext<'a>,
        var: &'a VariableDeclarationExpr,
    ) -> Result<(), EmitError> {
        self.emit_inline_annotations(cx, &var.annotations)?;
        self.emit_modifiers(cx, &var.modifiers)?;
        cx.writer.print(if var.is_final() { "const " } else { "let " });
        self.emit_separated(cx, &var.variables, ", ", |this, cx, declarator| {
            this.emit_declarator(cx, &var.base_type, declarator, false)
        })
    }

    /// Anonymous classes become class expressions. Outside static context the
    /// expression is wrapped in a closure that captures the creating instance.
    pub(super) fn emit_anonymous_class(
        &self,
        cx: &mut EmitContext<'a>,
        ty: &'a ClassType,
        arguments: &'a [Expr],
        body: &'a [Member],
        static_context: bool,
    ) -> Result<(), EmitError> {
        let is_interface = self
            .finder
            .resolve(ty, &cx.scope)
            .map(|d| d.is_interface)
            .unwrap_or_else(|err| {
                trace!("Anonymous base '{}' unresolved ({}), assuming a class", ty.name, err);
                false
            });

        // Nested closures get their own parameter so outer ones stay visible
        let captures = cx.anonymous.iter().filter(|f| f.outer_this.is_some()).count();
        let outer_this = (!static_context).then(|| match captures {
            0 => "__this".to_string(),
            n => format!("__this{}", n),
        });
        if let Some(param) = &outer_this {
            cx.writer.print(&format!("(({}) => ", param));
        }
        cx.writer.print(if is_interface {
            "new class implements "
        } else {
            "new class extends "
        });
        self.emit_class_type(cx, ty)?;
        cx.writer.print_line(" {");
        cx.writer.indent();
        cx.anonymous.push(AnonymousFrame {
            depth: cx.scope.len(),
            outer_this,
        });
        let result = self.emit_members(cx, body);
        cx.anonymous.pop();
        result?;
        cx.writer.unindent();
        cx.writer.print("}");
        self.emit_arguments(cx, arguments)?;
        if !static_context {
            cx.writer.print(")(this)");
        }
        Ok(())
    }

    pub(super) fn emit_type_arguments(&self, cx: &mut EmitContext<'a>, args: &'a [Type]) -> Result<(), EmitError> {
        if args.is_empty() {
            return Ok(());
        }
        cx.writer.print("<");
        self.emit_separated(cx, args, ", ", Self::emit_type)?;
        cx.writer.print(">");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EmitterConfig;
    use crate::emitter::{EmitContext, Emitter};
    use crate::error::EmitError;
    use javats_core::ast::{
        ArrayCreationLevel, BinaryOp, Block, ClassDecl, ClassType, CompilationUnit, Expr,
        LambdaBody, MethodDecl, Parameter, Primitive, Statement, Type, TypeDecl, UnaryOp,
        VariableDeclarationExpr,
    };
    use javats_core::classpath::ClassIndex;
    use pretty_assertions::assert_eq;

    fn render(unit: &CompilationUnit, expr: &Expr) -> Result<String, EmitError> {
        let jdk = ClassIndex::jdk();
        let config = EmitterConfig::default();
        let emitter = Emitter::new(unit, &config, &jdk);
        let mut cx = EmitContext::new(&config);
        cx.scope.extend(unit.types.iter());
        emitter.emit_expr(&mut cx, expr)?;
        Ok(cx.finish())
    }

    fn render_plain(expr: &Expr) -> Result<String, EmitError> {
        render(&CompilationUnit::new().with_type(ClassDecl::class("Host")), expr)
    }

    #[test]
    fn test_operators_and_literals() -> Result<(), EmitError> {
        let expr = Expr::binary(
            Expr::binary(Expr::name("a"), BinaryOp::Equals, Expr::NullLiteral),
            BinaryOp::Or,
            Expr::binary(
                Expr::LongLiteral { value: "10L".into() },
                BinaryOp::NotEquals,
                Expr::DoubleLiteral { value: "2.5f".into() },
            ),
        );
        assert_eq!(render_plain(&expr)?, "a === null || 10 !== 2.5");

        let chars = Expr::binary(
            Expr::CharLiteral { value: "x".into() },
            BinaryOp::Plus,
            Expr::string("y"),
        );
        assert_eq!(render_plain(&chars)?, "'x' + \"y\"");

        let unary = Expr::Unary {
            op: UnaryOp::LogicalComplement,
            expr: Box::new(Expr::Unary {
                op: UnaryOp::PostfixDecrement,
                expr: Box::new(Expr::name("n")),
            }),
        };
        assert_eq!(render_plain(&unary)?, "!n--");
        Ok(())
    }

    #[test]
    fn test_integral_casts_floor() -> Result<(), EmitError> {
        let to_int = Expr::cast(Type::int(), Expr::name("ratio"));
        let to_short = Expr::cast(Type::primitive(Primitive::Short), Expr::name("ratio"));
        let to_string = Expr::cast(Type::class("String"), Expr::name("value"));
        assert_eq!(render_plain(&to_int)?, "Math.floor(ratio)");
        assert_eq!(render_plain(&to_short)?, "<number>ratio");
        assert_eq!(render_plain(&to_string)?, "<string>value");
        Ok(())
    }

    #[test]
    fn test_array_creation_forms() -> Result<(), EmitError> {
        let sized = Expr::ArrayCreation {
            element_type: Type::int(),
            levels: vec![
                ArrayCreationLevel {
                    dimension: Some(Expr::int("3")),
                    annotations: Vec::new(),
                },
                ArrayCreationLevel::default(),
            ],
            initializer: None,
        };
        assert_eq!(render_plain(&sized)?, "new Array<number[]>(3)");

        let literal = Expr::ArrayCreation {
            element_type: Type::class("String"),
            levels: vec![ArrayCreationLevel::default()],
            initializer: Some(vec![Expr::string("a"), Expr::string("b")]),
        };
        assert_eq!(render_plain(&literal)?, "[\"a\", \"b\"]");
        Ok(())
    }

    #[test]
    fn test_qualified_this_outside_innermost_class() -> Result<(), EmitError> {
        let unit = CompilationUnit::new().with_type(ClassDecl::class("Outer"));
        let own = Expr::This {
            qualifier: Some("Outer".into()),
        };
        let other = Expr::field(
            Expr::This {
                qualifier: Some("Shell".into()),
            },
            "in",
        );
        assert_eq!(render(&unit, &own)?, "this");
        assert_eq!(render(&unit, &other)?, "Shell_this._in");
        Ok(())
    }

    fn host_this() -> Expr {
        Expr::This {
            qualifier: Some("Host".into()),
        }
    }

    fn runnable(statements: Vec<Statement>) -> Expr {
        Expr::anonymous(
            ClassType::new("Runnable"),
            vec![],
            vec![MethodDecl::new("run", Type::void())
                .with_body(Block::new(statements))
                .into()],
        )
    }

    #[test]
    fn test_qualified_this_in_anonymous_class_uses_captured_instance() -> Result<(), EmitError> {
        let unit = CompilationUnit::new().with_type(ClassDecl::class("Host"));
        let task = runnable(vec![
            Statement::expr(Expr::assign(Expr::field(host_this(), "x"), Expr::int("1"))),
            Statement::expr(Expr::call(Some(Expr::this()), "notify", vec![])),
        ]);
        assert_eq!(
            render(&unit, &task)?,
            concat!(
                "((__this) => new class implements java.lang.Runnable {\n",
                "\n",
                "    run(): void {\n",
                "        __this.x = 1;\n",
                "        this.notify();\n",
                "    }\n",
                "}())(this)",
            )
        );

        // The frame is gone once the body is printed
        assert_eq!(render(&unit, &Expr::field(host_this(), "x"))?, "this.x");
        Ok(())
    }

    #[test]
    fn test_nested_anonymous_classes_keep_outer_capture_visible() -> Result<(), EmitError> {
        let unit = CompilationUnit::new().with_type(ClassDecl::class("Host"));
        let inner = runnable(vec![Statement::expr(Expr::assign(
            Expr::field(host_this(), "x"),
            Expr::int("2"),
        ))]);
        let outer = runnable(vec![Statement::local(VariableDeclarationExpr::single(
            Type::class("Runnable"),
            "again",
            Some(inner),
        ))]);

        let out = render(&unit, &outer)?;
        assert!(out.starts_with("((__this) => new class"), "{}", out);
        assert!(
            out.contains("let again: java.lang.Runnable = ((__this1) => new class implements java.lang.Runnable {"),
            "{}",
            out
        );
        assert!(out.contains("__this.x = 2;"), "{}", out);
        assert!(!out.contains("__this1.x"), "{}", out);
        Ok(())
    }

    #[test]
    fn test_qualified_super_and_qualified_anonymous_creation_are_marked() -> Result<(), EmitError> {
        let call = Expr::call(
            Some(Expr::Super {
                qualifier: Some("Base".into()),
            }),
            "close",
            vec![],
        );
        assert_eq!(
            render_plain(&call)?,
            "/* java2ts not support : not support qualified super 'Base.super' */super.close()"
        );

        let qualified = Expr::ObjectCreation {
            scope: Some(Box::new(Expr::name("outer"))),
            ty: ClassType::new("Thread"),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
            anonymous_body: Some(Vec::new()),
        };
        let out = render_plain(&qualified)?;
        assert!(
            out.starts_with("/* java2ts not support : not support qualified creation of anonymous 'Thread' */((__this) => "),
            "{}",
            out
        );
        Ok(())
    }

    #[test]
    fn test_lambda_and_calls() -> Result<(), EmitError> {
        let lambda = Expr::Lambda {
            parameters: vec![Parameter::new("x", Type::Unknown)],
            enclosing_parameters: false,
            body: LambdaBody::Expression {
                expr: Box::new(Expr::call(Some(Expr::name("x")), "trim", vec![])),
            },
        };
        assert_eq!(render_plain(&lambda)?, "x => x.trim()");

        let typed = Expr::Lambda {
            parameters: vec![
                Parameter::new("a", Type::int()),
                Parameter::new("b", Type::int()),
            ],
            enclosing_parameters: true,
            body: LambdaBody::Expression {
                expr: Box::new(Expr::binary(Expr::name("a"), BinaryOp::Minus, Expr::name("b"))),
            },
        };
        assert_eq!(render_plain(&typed)?, "(a: number, b: number) => a - b");

        let generic = Expr::MethodCall {
            scope: Some(Box::new(Expr::name("Collections"))),
            type_arguments: vec![Type::class("String")],
            name: "emptyList".into(),
            arguments: Vec::new(),
        };
        assert_eq!(render_plain(&generic)?, "Collections.emptyList<string>()");
        Ok(())
    }

    #[test]
    fn test_anonymous_class_picks_implements_for_interfaces() -> Result<(), EmitError> {
        let unit = CompilationUnit::new().with_type(ClassDecl::class("Host"));
        let runnable = Expr::anonymous(
            ClassType::new("Runnable"),
            vec![],
            vec![MethodDecl::new("run", Type::void())
                .with_body(javats_core::ast::Block::empty())
                .into()],
        );
        assert_eq!(
            render(&unit, &runnable)?,
            concat!(
                "((__this) => new class implements java.lang.Runnable {\n",
                "\n",
                "    run(): void {\n",
                "    }\n",
                "}())(this)",
            )
        );

        let thread = Expr::anonymous(ClassType::new("Thread"), vec![Expr::string("worker")], vec![]);
        assert_eq!(
            render(&unit, &thread)?,
            "((__this) => new class extends java.lang.Thread {\n}(\"worker\"))(this)"
        );
        Ok(())
    }

    #[test]
    fn test_method_reference_marker() -> Result<(), EmitError> {
        let reference = Expr::MethodReference {
            scope: Box::new(Expr::TypeExpr {
                ty: Type::class("String"),
            }),
            type_arguments: Vec::new(),
            identifier: "valueOf".into(),
        };
        assert_eq!(
            render_plain(&reference)?,
            "/* java2ts not support : not support method reference */string.valueOf"
        );
        Ok(())
    }

    #[test]
    fn test_class_literal_keeps_suffix() -> Result<(), EmitError> {
        let unit = CompilationUnit::new().with_type(TypeDecl::from(ClassDecl::class("Host")));
        assert_eq!(
            render(&unit, &Expr::Class { ty: Type::class("Host") })?,
            "Host.class"
        );
        Ok(())
    }
}
