use super::{EmitContext, Emitter};
use crate::config::Unsupported;
use crate::error::EmitError;
use crate::policy::escape_identifier;
use javats_core::ast::{Block, Expr, Statement, SwitchEntry};

impl<'a> Emitter<'a> {
    pub(super) fn emit_block(&self, cx: &mut EmitContext<'a>, block: &'a Block) -> Result<(), EmitError> {
        cx.writer.print_line("{");
        cx.writer.indent();
        self.emit_statement_lines(cx, &block.statements)?;
        for comment in &block.trailing_comments {
            self.emit_comment(cx, comment);
        }
        cx.writer.unindent();
        cx.writer.print("}");
        Ok(())
    }

    /// One statement per line; free-standing comments end their own line
    fn emit_statement_lines(
        &self,
        cx: &mut EmitContext<'a>,
        statements: &'a [Statement],
    ) -> Result<(), EmitError> {
        for statement in statements {
            self.emit_statement(cx, statement)?;
            if !matches!(statement, Statement::Comment(_)) {
                cx.writer.println();
            }
        }
        Ok(())
    }

    pub(super) fn emit_statement(
        &self,
        cx: &mut EmitContext<'a>,
        statement: &'a Statement,
    ) -> Result<(), EmitError> {
        match statement {
            Statement::Block(block) => self.emit_block(cx, block)?,
            Statement::Expression { expr } => {
                self.emit_expr(cx, expr)?;
                cx.writer.print(";");
            }
            Statement::LocalClass(decl) => self.emit_local_type(cx, decl)?,
            Statement::Assert { .. } => self.unsupported(cx, Unsupported::Assert)?,
            Statement::Labeled { label, statement } => {
                cx.writer.print(label).print(": ");
                self.emit_statement(cx, statement)?;
            }
            Statement::Empty => {
                cx.writer.print(";");
            }
            Statement::Switch { selector, entries } => self.emit_switch(cx, selector, entries)?,
            Statement::Break { label } => self.emit_jump(cx, "break", label.as_deref()),
            Statement::Continue { label } => self.emit_jump(cx, "continue", label.as_deref()),
            Statement::Return { expr } => {
                cx.writer.print("return");
                if let Some(expr) = expr {
                    cx.writer.print(" ");
                    self.emit_expr(cx, expr)?;
                }
                cx.writer.print(";");
            }
            Statement::If {
                condition,
                then,
                otherwise,
            } => self.emit_if(cx, condition, then, otherwise.as_deref())?,
            Statement::While { condition, body } => {
                cx.writer.print("while (");
                self.emit_expr(cx, condition)?;
                cx.writer.print(") ");
                self.emit_statement(cx, body)?;
            }
            Statement::Do { body, condition } => {
                cx.writer.print("do ");
                self.emit_statement(cx, body)?;
                cx.writer.print(" while (");
                self.emit_expr(cx, condition)?;
                cx.writer.print(");");
            }
            Statement::ForEach {
                variable,
                iterable,
                body,
            } => {
                cx.writer.print("for (");
                cx.writer.print(if variable.is_final() { "const " } else { "let " });
                self.emit_separated(cx, &variable.variables, ", ", |_, cx, var| {
                    cx.writer.print(&escape_identifier(&var.name));
                    Ok(())
                })?;
                cx.writer.print(" of ");
                self.emit_expr(cx, iterable)?;
                cx.writer.print(") ");
                self.emit_statement(cx, body)?;
            }
            Statement::For {
                init,
                compare,
                update,
                body,
            } => {
                cx.writer.print("for (");
                self.emit_separated(cx, init, ", ", Self::emit_expr)?;
                cx.writer.print("; ");
                if let Some(compare) = compare {
                    self.emit_expr(cx, compare)?;
                }
                cx.writer.print("; ");
                self.emit_separated(cx, update, ", ", Self::emit_expr)?;
                cx.writer.print(") ");
                self.emit_statement(cx, body)?;
            }
            Statement::Throw { expr } => {
                cx.writer.print("throw ");
                self.emit_expr(cx, expr)?;
                cx.writer.print(";");
            }
            Statement::Synchronized { body, .. } => {
                self.unsupported(cx, Unsupported::Synchronized)?;
                cx.writer.println();
                self.emit_block(cx, body)?;
            }
            Statement::Try {
                resources,
                block,
                catches,
                finally,
            } => {
                if !resources.is_empty() {
                    self.unsupported(cx, Unsupported::TryWithResources)?;
                    cx.writer.println();
                    for resource in resources {
                        self.emit_variable_declaration(cx, resource)?;
                        cx.writer.print_line(";");
                    }
                }
                cx.writer.print("try ");
                self.emit_block(cx, block)?;
                for catch in catches {
                    cx.writer
                        .print(" catch (")
                        .print(&escape_identifier(&catch.parameter.name))
                        .print(") ");
                    self.emit_block(cx, &catch.body)?;
                }
                if let Some(finally) = finally {
                    cx.writer.print(" finally ");
                    self.emit_block(cx, finally)?;
                }
            }
            Statement::ExplicitConstructorInvocation {
                is_this,
                expr,
                arguments,
                ..
            } => {
                if *is_this {
                    cx.writer.print("this");
                } else {
                    if let Some(expr) = expr {
                        self.emit_expr(cx, expr)?;
                        cx.writer.print(".");
                    }
                    cx.writer.print("super");
                }
                self.emit_arguments(cx, arguments)?;
                cx.writer.print(";");
            }
            Statement::Comment(comment) => self.emit_comment(cx, comment),
            Statement::Unparsable => {
                cx.writer.print("???;");
            }
        }
        Ok(())
    }

    fn emit_jump(&self, cx: &mut EmitContext<'a>, keyword: &str, label: Option<&str>) {
        cx.writer.print(keyword);
        if let Some(label) = label {
            cx.writer.print(" ").print(label);
        }
        cx.writer.print(";");
    }

    fn emit_if(
        &self,
        cx: &mut EmitContext<'a>,
        condition: &'a Expr,
        then: &'a Statement,
        otherwise: Option<&'a Statement>,
    ) -> Result<(), EmitError> {
        cx.writer.print("if (");
        self.emit_expr(cx, condition)?;
        let then_is_block = matches!(then, Statement::Block(_));
        if then_is_block {
            cx.writer.print(") ");
            self.emit_statement(cx, then)?;
        } else {
            cx.writer.print_line(")");
            cx.writer.indent();
            self.emit_statement(cx, then)?;
            cx.writer.unindent();
        }

        let Some(otherwise) = otherwise else {
            return Ok(());
        };
        if then_is_block {
            cx.writer.print(" ");
        } else {
            cx.writer.println();
        }
        match otherwise {
            Statement::If { .. } | Statement::Block(_) => {
                cx.writer.print("else ");
                self.emit_statement(cx, otherwise)
            }
            _ => {
                cx.writer.print_line("else");
                cx.writer.indent();
                self.emit_statement(cx, otherwise)?;
                cx.writer.unindent();
                Ok(())
            }
        }
    }

    fn emit_switch(
        &self,
        cx: &mut EmitContext<'a>,
        selector: &'a Expr,
        entries: &'a [SwitchEntry],
    ) -> Result<(), EmitError> {
        cx.writer.print("switch(");
        self.emit_expr(cx, selector)?;
        cx.writer.print_line(") {");
        cx.writer.indent();
        for entry in entries {
            match &entry.label {
                Some(label) => {
                    cx.writer.print("case ");
                    self.emit_expr(cx, label)?;
                    cx.writer.print(":");
                }
                None => {
                    cx.writer.print("default:");
                }
            }
            cx.writer.println();
            cx.writer.indent();
            self.emit_statement_lines(cx, &entry.statements)?;
            cx.writer.unindent();
        }
        cx.writer.unindent();
        cx.writer.print("}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EmitterConfig;
    use crate::emitter::Emitter;
    use crate::error::EmitError;
    use javats_core::ast::{
        BinaryOp, Block, CatchClause, ClassDecl, Comment, CompilationUnit, Expr, MethodDecl,
        Parameter, Statement, SwitchEntry, Type, UnaryOp, VariableDeclarationExpr,
    };
    use javats_core::classpath::ClassIndex;
    use pretty_assertions::assert_eq;

    /// Body of `void run()` in class `S`, dedented to the method level
    fn emit_body(statements: Vec<Statement>) -> Result<String, EmitError> {
        let unit = CompilationUnit::new().with_type(
            ClassDecl::class("S")
                .with_member(MethodDecl::new("run", Type::void()).with_body(Block::new(statements))),
        );
        let jdk = ClassIndex::jdk();
        let out = Emitter::new(&unit, &EmitterConfig::default(), &jdk).emit()?;
        let body: Vec<&str> = out
            .lines()
            .skip(3)
            .collect::<Vec<_>>()
            .split_last()
            .and_then(|(_, rest)| rest.split_last())
            .map(|(_, rest)| rest.to_vec())
            .unwrap_or_default();
        Ok(body
            .iter()
            .map(|line| line.strip_prefix("        ").unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn lt(name: &str, bound: &str) -> Expr {
        Expr::binary(Expr::name(name), BinaryOp::Less, Expr::int(bound))
    }

    #[test]
    fn test_if_else_chain_layout() -> Result<(), EmitError> {
        let stmt = Statement::If {
            condition: lt("a", "1"),
            then: Box::new(Statement::Block(Block::new(vec![Statement::ret(None)]))),
            otherwise: Some(Box::new(Statement::If {
                condition: lt("a", "2"),
                then: Box::new(Statement::Break { label: None }),
                otherwise: Some(Box::new(Statement::Continue {
                    label: Some("outer".into()),
                })),
            })),
        };
        assert_eq!(
            emit_body(vec![stmt])?,
            concat!(
                "if (a < 1) {\n",
                "    return;\n",
                "} else if (a < 2)\n",
                "    break;\n",
                "else\n",
                "    continue outer;",
            )
        );
        Ok(())
    }

    #[test]
    fn test_loops() -> Result<(), EmitError> {
        let counter = VariableDeclarationExpr::single(Type::int(), "i", Some(Expr::int("0")));
        let increment = Expr::Unary {
            op: UnaryOp::PostfixIncrement,
            expr: Box::new(Expr::name("i")),
        };
        let body = || Box::new(Statement::Block(Block::empty()));
        let stmts = vec![
            Statement::For {
                init: vec![Expr::VariableDeclaration(counter)],
                compare: Some(lt("i", "10")),
                update: vec![increment],
                body: body(),
            },
            Statement::ForEach {
                variable: VariableDeclarationExpr::new(
                    &[javats_core::ast::Modifier::Final],
                    Type::class("String"),
                    vec![javats_core::ast::VariableDeclarator::new("s")],
                ),
                iterable: Expr::name("names"),
                body: body(),
            },
            Statement::While {
                condition: Expr::boolean(true),
                body: body(),
            },
            Statement::Do {
                body: body(),
                condition: Expr::boolean(false),
            },
        ];
        assert_eq!(
            emit_body(stmts)?,
            concat!(
                "for (let i: number = 0; i < 10; i++) {\n",
                "}\n",
                "for (const s of names) {\n",
                "}\n",
                "while (true) {\n",
                "}\n",
                "do {\n",
                "} while (false);",
            )
        );
        Ok(())
    }

    #[test]
    fn test_switch_and_comments() -> Result<(), EmitError> {
        let stmts = vec![
            Statement::Comment(Comment::line(" pick one")),
            Statement::Switch {
                selector: Expr::name("kind"),
                entries: vec![
                    SwitchEntry {
                        label: Some(Expr::int("1")),
                        statements: vec![Statement::Break { label: None }],
                    },
                    SwitchEntry {
                        label: None,
                        statements: vec![Statement::Empty],
                    },
                ],
            },
        ];
        assert_eq!(
            emit_body(stmts)?,
            concat!(
                "// pick one\n",
                "switch(kind) {\n",
                "    case 1:\n",
                "        break;\n",
                "    default:\n",
                "        ;\n",
                "}",
            )
        );
        Ok(())
    }

    #[test]
    fn test_try_catch_finally_and_throw() -> Result<(), EmitError> {
        let stmt = Statement::Try {
            resources: Vec::new(),
            block: Block::new(vec![Statement::Throw {
                expr: Expr::new_object(javats_core::ast::ClassType::new("IllegalStateException"), vec![]),
            }]),
            catches: vec![CatchClause {
                parameter: Parameter::new("e", Type::class("Exception")),
                body: Block::empty(),
            }],
            finally: Some(Block::empty()),
        };
        assert_eq!(
            emit_body(vec![stmt])?,
            concat!(
                "try {\n",
                "    throw new java.lang.IllegalStateException();\n",
                "} catch (e) {\n",
                "} finally {\n",
                "}",
            )
        );
        Ok(())
    }

    #[test]
    fn test_try_with_resources_hoists_declarations() -> Result<(), EmitError> {
        let stmt = Statement::Try {
            resources: vec![VariableDeclarationExpr::single(
                Type::class("InputStream"),
                "in",
                Some(Expr::call(None, "open", vec![])),
            )],
            block: Block::empty(),
            catches: Vec::new(),
            finally: None,
        };
        assert_eq!(
            emit_body(vec![stmt])?,
            concat!(
                "/* java2ts not support : not support try-with-resources */\n",
                "let _in: InputStream = open();\n",
                "try {\n",
                "}",
            )
        );
        Ok(())
    }

    #[test]
    fn test_strict_mode_rejects_assert() {
        let unit = CompilationUnit::new().with_type(ClassDecl::class("S").with_member(
            MethodDecl::new("run", Type::void()).with_body(Block::new(vec![Statement::Assert {
                check: Expr::boolean(true),
                message: None,
            }])),
        ));
        let jdk = ClassIndex::jdk();
        let strict = EmitterConfig::strict();
        let result = Emitter::new(&unit, &strict, &jdk).emit();
        assert!(matches!(result, Err(EmitError::Unsupported { .. })));
    }

    #[test]
    fn test_explicit_constructor_invocations() -> Result<(), EmitError> {
        let stmts = vec![
            Statement::ExplicitConstructorInvocation {
                is_this: true,
                expr: None,
                type_arguments: Vec::new(),
                arguments: vec![Expr::int("1")],
            },
            Statement::ExplicitConstructorInvocation {
                is_this: false,
                expr: Some(Expr::name("outer")),
                type_arguments: Vec::new(),
                arguments: Vec::new(),
            },
            Statement::Unparsable,
        ];
        assert_eq!(emit_body(stmts)?, "this(1);\nouter.super();\n???;");
        Ok(())
    }
}
