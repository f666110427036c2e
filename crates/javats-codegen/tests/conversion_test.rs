//! Conversion behavior across configuration, class paths and failure modes

use anyhow::Result;
use javats_codegen::{convert, Codegen, EmitError, EmitterConfig, FailureMode, TypeScriptCodegen};
use javats_core::ast::{
    Block, ClassDecl, ClassType, CompilationUnit, ConstructorDecl, EnumConstant, EnumDecl, Expr,
    FieldDecl, ImportDecl, MethodDecl, Modifier, Parameter, Statement, Type,
    VariableDeclarationExpr,
};
use javats_core::classpath::ClassIndex;
use javats_test_fixtures::{sample_class_path, FixtureType};
use pretty_assertions::assert_eq;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn volatile_counter() -> CompilationUnit {
    CompilationUnit::new().with_type(
        ClassDecl::class("Counter").with_member(FieldDecl::single(
            &[Modifier::Private, Modifier::Volatile, Modifier::Transient],
            Type::long(),
            "count",
        )),
    )
}

#[test]
fn test_tolerant_mode_embeds_marker() -> Result<()> {
    init_tracing();
    let out = convert(&volatile_counter(), &EmitterConfig::default(), &ClassIndex::jdk())?;
    assert_eq!(
        out,
        concat!(
            "class Counter {\n",
            "\n",
            "    /* java2ts not support : not support modifiers: transient volatile  */ private count: number;\n",
            "}\n",
        )
    );
    Ok(())
}

#[test]
fn test_strict_mode_fails_the_whole_conversion() {
    init_tracing();
    let result = convert(&volatile_counter(), &EmitterConfig::strict(), &ClassIndex::jdk());
    match result {
        Err(EmitError::Unsupported { reason }) => {
            assert_eq!(reason, "not support modifiers: transient volatile ");
        }
        other => panic!("expected an unsupported construct error, got {:?}", other),
    }
}

#[test]
fn test_config_file_drives_conversion() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "indent = \"\\t\"")?;
    writeln!(file, "not_supported_text = \"TS-TODO\"")?;
    writeln!(file, "wrap_package_namespace = false")?;

    let config = EmitterConfig::from_file(file.path())?;
    assert_eq!(config.failure_mode(), FailureMode::Tolerant);

    let out = convert(&volatile_counter(), &config, &ClassIndex::jdk())?;
    assert!(out.contains(
        "\t/* TS-TODO : not support modifiers: transient volatile  */ private count: number;\n"
    ));
    Ok(())
}

#[test]
fn test_class_path_qualifies_imported_and_nested_types() -> Result<()> {
    let on_click = MethodDecl::new("onClick", Type::void())
        .with_modifiers(&[Modifier::Public])
        .with_parameter(Parameter::new("v", Type::class("View")))
        .with_body(Block::empty());
    let screen = ClassDecl::class("Screen")
        .with_modifiers(&[Modifier::Public])
        .extending(ClassType::new("View"))
        .implementing(ClassType::new("Checkable"))
        .with_member(FieldDecl::initialized(
            &[],
            Type::class("View.OnClickListener"),
            "listener",
            Expr::anonymous(ClassType::parse("View.OnClickListener"), vec![], vec![on_click.into()]),
        ))
        .with_member(FieldDecl::single(&[], Type::class("TextView"), "label"));
    let unit = CompilationUnit::new()
        .with_package("app")
        .with_import(ImportDecl::wildcard("android.view"))
        .with_import(ImportDecl::single("android.widget.Checkable"))
        .with_type(screen);

    let out = convert(&unit, &EmitterConfig::default(), &sample_class_path())?;
    assert_eq!(
        out,
        concat!(
            "namespace app {\n",
            "    /* java2ts not support : not support Asterisk in import 'android.view.*' */\n",
            "    import Checkable = android.widget.Checkable;\n",
            "\n",
            "    export class Screen extends android.view.View implements android.widget.Checkable {\n",
            "\n",
            "        listener: android.view.View.OnClickListener = ((__this) => new class implements android.view.View.OnClickListener {\n",
            "\n",
            "            public onClick(v: android.view.View): void {\n",
            "            }\n",
            "        }())(this);\n",
            "\n",
            "        label: TextView;\n",
            "    }\n",
            "}\n",
        )
    );
    Ok(())
}

#[test]
fn test_enum_with_constructor_and_fields() -> Result<()> {
    let mut color = EnumDecl::new("Color").with_modifiers(&[Modifier::Public]);
    for (name, code) in [("RED", "r"), ("GREEN", "g")] {
        color.entries.push(EnumConstant {
            name: name.to_string(),
            arguments: vec![Expr::string(code)],
            ..Default::default()
        });
    }
    let color = color
        .with_member(FieldDecl::single(&[Modifier::Private], Type::class("String"), "code"))
        .with_member(
            ConstructorDecl::new("Color")
                .with_parameter(Parameter::new("code", Type::class("String")))
                .with_body(Block::new(vec![Statement::expr(Expr::assign(
                    Expr::field(Expr::this(), "code"),
                    Expr::name("code"),
                ))])),
        );
    let unit = CompilationUnit::new().with_type(color);

    let out = convert(&unit, &EmitterConfig::default(), &ClassIndex::jdk())?;
    assert_eq!(
        out,
        concat!(
            "export enum Color {\n",
            "\n",
            "    RED(\"r\"), GREEN(\"g\");\n",
            "\n",
            "    private code: string;\n",
            "\n",
            "    constructor(code: string) {\n",
            "        this.code = code;\n",
            "    }\n",
            "}\n",
        )
    );
    Ok(())
}

#[test]
fn test_local_classes_and_local_interfaces() -> Result<()> {
    let body = Block::new(vec![
        Statement::LocalClass(
            ClassDecl::class("Step")
                .with_member(FieldDecl::single(&[], Type::int(), "n"))
                .into(),
        ),
        Statement::local(VariableDeclarationExpr::single(
            Type::class("Step"),
            "s",
            Some(Expr::new_object(ClassType::new("Step"), vec![])),
        )),
    ]);
    let unit = CompilationUnit::new().with_type(
        ClassDecl::class("Worker").with_member(MethodDecl::new("run", Type::void()).with_body(body)),
    );

    let out = convert(&unit, &EmitterConfig::default(), &ClassIndex::jdk())?;
    assert_eq!(
        out,
        concat!(
            "class Worker {\n",
            "\n",
            "    run(): void {\n",
            "        const Step = ((Worker_this) => class Step {\n",
            "\n",
            "            n: number;\n",
            "        })(this);\n",
            "        let s: Step = new Step();\n",
            "    }\n",
            "}\n",
        )
    );

    let with_interface = CompilationUnit::new().with_type(
        ClassDecl::class("Worker").with_member(
            MethodDecl::new("run", Type::void()).with_body(Block::new(vec![Statement::LocalClass(
                ClassDecl::interface("Callback").into(),
            )])),
        ),
    );
    let tolerant = convert(&with_interface, &EmitterConfig::default(), &ClassIndex::jdk())?;
    assert!(tolerant.contains("/* java2ts not support : not support local type declaration 'Callback' */"));
    assert!(convert(&with_interface, &EmitterConfig::strict(), &ClassIndex::jdk()).is_err());
    Ok(())
}

fn qualified_this(name: &str) -> Expr {
    Expr::This {
        qualifier: Some(name.to_string()),
    }
}

#[test]
fn test_qualified_this_across_inner_and_anonymous_classes() -> Result<()> {
    init_tracing();
    let b = ClassDecl::class("B")
        .with_member(FieldDecl::initialized(
            &[],
            Type::int(),
            "v",
            Expr::field(qualified_this("Outer"), "x"),
        ))
        .with_member(FieldDecl::initialized(
            &[],
            Type::int(),
            "w",
            Expr::field(qualified_this("A"), "y"),
        ));
    let run = MethodDecl::new("run", Type::void()).with_body(Block::new(vec![
        Statement::expr(Expr::assign(Expr::field(qualified_this("Outer"), "x"), Expr::int("1"))),
        Statement::expr(Expr::assign(Expr::field(qualified_this("A"), "y"), Expr::int("2"))),
    ]));
    let a = ClassDecl::class("A")
        .with_member(FieldDecl::single(&[], Type::int(), "y"))
        .with_member(b)
        .with_member(FieldDecl::initialized(
            &[],
            Type::class("Runnable"),
            "r",
            Expr::anonymous(ClassType::new("Runnable"), vec![], vec![run.into()]),
        ));
    let unit = CompilationUnit::new().with_type(
        ClassDecl::class("Outer")
            .with_member(FieldDecl::single(&[], Type::int(), "x"))
            .with_member(a),
    );

    let out = convert(&unit, &EmitterConfig::default(), &ClassIndex::jdk())?;
    for line in [
        "    A = ((Outer_this) => class A {\n",
        "        B = ((A_this) => class B {\n",
        "            v: number = Outer_this.x;\n",
        "            w: number = A_this.y;\n",
        "        r: java.lang.Runnable = ((__this) => new class implements java.lang.Runnable {\n",
        "                Outer_this.x = 1;\n",
        "                __this.y = 2;\n",
    ] {
        assert!(out.contains(line), "missing {:?} in\n{}", line, out);
    }
    assert!(!out.contains(" this.y = 2;"), "{}", out);
    Ok(())
}

#[test]
fn test_hoisted_declarations_appear_exactly_once() -> Result<()> {
    let out = convert(
        &FixtureType::NestedInterfaces.unit(),
        &EmitterConfig::default(),
        &ClassIndex::jdk(),
    )?;
    for name in ["A", "B", "C", "D"] {
        assert_eq!(
            out.matches(&format!("export interface {} {{", name)).count(),
            1,
            "interface {}",
            name
        );
        assert_eq!(
            out.matches(&format!("// class or interface '{}' is export", name)).count(),
            1,
            "placeholder for {}",
            name
        );
    }
    // Both `E`s: the interface on Test5 and the class on C
    assert_eq!(out.matches("export interface E {").count(), 1);
    assert_eq!(out.matches("export class E {").count(), 1);
    Ok(())
}

#[test]
fn test_codegen_trait_matches_convert() -> Result<()> {
    let mut codegen = TypeScriptCodegen::new(EmitterConfig::default());
    for fixture in FixtureType::ALL {
        let unit = fixture.unit();
        let direct = convert(&unit, codegen.config(), codegen.class_path())?;
        assert_eq!(codegen.generate(&unit)?, direct, "{:?}", fixture);
    }
    Ok(())
}
