//! Test fixtures for javats
//!
//! Declaration trees for representative Java sources, built in code the way a
//! parser front end would hand them over, plus the class paths they resolve
//! against. Expected TypeScript lives next to the tests that use it.

use javats_core::ast::{
    Annotation, Block, ClassDecl, ClassType, CompilationUnit, ConstructorDecl, Expr, FieldDecl,
    MethodDecl, Modifier, Statement, Type, VariableDeclarationExpr,
};
use javats_core::classpath::{ClassIndex, TypeDescriptor};
use serde_json::json;

/// Fixture categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureType {
    /// Interfaces nested in a class, two hoisting waves
    NestedInterfaces,
    /// Inner and static nested classes with qualified `this`
    InnerClasses,
    /// Classes nested in a root interface
    InterfaceMembers,
    /// Public class with a field and a default constructor
    SimpleClass,
    /// Private static nested class kept in place
    StaticNested,
    /// Class nested in an interface nested in a class
    HoistedClass,
}

impl FixtureType {
    pub const ALL: [FixtureType; 6] = [
        FixtureType::NestedInterfaces,
        FixtureType::InnerClasses,
        FixtureType::InterfaceMembers,
        FixtureType::SimpleClass,
        FixtureType::StaticNested,
        FixtureType::HoistedClass,
    ];

    pub fn unit(self) -> CompilationUnit {
        match self {
            FixtureType::NestedInterfaces => nested_interfaces(),
            FixtureType::InnerClasses => inner_classes(),
            FixtureType::InterfaceMembers => interface_members(),
            FixtureType::SimpleClass => simple_class(),
            FixtureType::StaticNested => static_nested(),
            FixtureType::HoistedClass => hoisted_class(),
        }
    }
}

fn override_marker() -> Annotation {
    Annotation::marker("Override")
}

fn returning_zero(name: &str) -> MethodDecl {
    MethodDecl::new(name, Type::int())
        .with_modifiers(&[Modifier::Public])
        .with_annotation(override_marker())
        .with_body(Block::new(vec![Statement::ret(Some(Expr::int("0")))]))
}

fn abstract_int(name: &str) -> MethodDecl {
    MethodDecl::new(name, Type::int())
}

/// ```java
/// package test;
/// public class Test5 {
///     A a = new A() { public int a() { return 0; } };
///     static B b = new B() { public int b() { return 0; } };
///     interface A { int a(); }
///     static interface B { int b(); }
///     interface C { int c(); interface D { int d(); } class E { int e = 1; } }
///     interface E { C c(); C.D d(); }
/// }
/// ```
pub fn nested_interfaces() -> CompilationUnit {
    let c = ClassDecl::interface("C")
        .with_member(abstract_int("c"))
        .with_member(ClassDecl::interface("D").with_member(abstract_int("d")))
        .with_member(ClassDecl::class("E").with_member(FieldDecl::initialized(
            &[],
            Type::int(),
            "e",
            Expr::int("1"),
        )));

    let test5 = ClassDecl::class("Test5")
        .with_modifiers(&[Modifier::Public])
        .with_javadoc("\n * Nested interfaces\n ")
        .with_member(FieldDecl::initialized(
            &[],
            Type::class("A"),
            "a",
            Expr::anonymous(ClassType::new("A"), vec![], vec![returning_zero("a").into()]),
        ))
        .with_member(FieldDecl::initialized(
            &[Modifier::Static],
            Type::class("B"),
            "b",
            Expr::anonymous(ClassType::new("B"), vec![], vec![returning_zero("b").into()]),
        ))
        .with_member(ClassDecl::interface("A").with_member(abstract_int("a")))
        .with_member(
            ClassDecl::interface("B")
                .with_modifiers(&[Modifier::Static])
                .with_member(abstract_int("b")),
        )
        .with_member(c)
        .with_member(
            ClassDecl::interface("E")
                .with_member(MethodDecl::new("c", Type::class("C")))
                .with_member(MethodDecl::new("d", Type::class("C.D"))),
        );

    CompilationUnit::new().with_package("test").with_type(test5)
}

/// ```java
/// package test;
/// public class Test6 {
///     A a = new A();
///     A1 a1 = new A1();
///     static B b = new B();
///     static B1 b1 = new B1();
///     static int c = b.b + b1.b1;
///     public Test6() { A a = this.a; int d = a.a + a1.a1 + c; }
///     class A { int a = 1; A() { a = a1.a1; } }
///     private class A1 { int a1 = 1; A1() { a1 = Test6.this.a.a; } }
///     static class B { int b = 1; }
///     private static class B1 { int b1 = 1; }
/// }
/// ```
pub fn inner_classes() -> CompilationUnit {
    use javats_core::ast::BinaryOp::Plus;

    let field = |scope: &str, name: &str| Expr::field(Expr::name(scope), name);
    let new_field = |modifiers: &[Modifier], ty: &str, name: &str| {
        FieldDecl::initialized(
            modifiers,
            Type::class(ty),
            name,
            Expr::new_object(ClassType::new(ty), vec![]),
        )
    };
    let counter = |name: &str| FieldDecl::initialized(&[], Type::int(), name, Expr::int("1"));
    let assigning = |name: &str, target: &str, value: Expr| {
        ConstructorDecl::new(name).with_body(Block::new(vec![Statement::expr(Expr::assign(
            Expr::name(target),
            value,
        ))]))
    };

    let test6 = ClassDecl::class("Test6")
        .with_modifiers(&[Modifier::Public])
        .with_javadoc("\n * Inner classes and qualified this\n ")
        .with_member(new_field(&[], "A", "a"))
        .with_member(new_field(&[], "A1", "a1"))
        .with_member(new_field(&[Modifier::Static], "B", "b"))
        .with_member(new_field(&[Modifier::Static], "B1", "b1"))
        .with_member(FieldDecl::initialized(
            &[Modifier::Static],
            Type::int(),
            "c",
            Expr::binary(field("b", "b"), Plus, field("b1", "b1")),
        ))
        .with_member(
            ConstructorDecl::new("Test6")
                .with_modifiers(&[Modifier::Public])
                .with_body(Block::new(vec![
                    Statement::local(VariableDeclarationExpr::single(
                        Type::class("A"),
                        "a",
                        Some(Expr::field(Expr::this(), "a")),
                    )),
                    Statement::local(VariableDeclarationExpr::single(
                        Type::int(),
                        "d",
                        Some(Expr::binary(
                            Expr::binary(field("a", "a"), Plus, field("a1", "a1")),
                            Plus,
                            Expr::name("c"),
                        )),
                    )),
                ])),
        )
        .with_member(
            ClassDecl::class("A")
                .with_member(counter("a"))
                .with_member(assigning("A", "a", field("a1", "a1"))),
        )
        .with_member(
            ClassDecl::class("A1")
                .with_modifiers(&[Modifier::Private])
                .with_member(counter("a1"))
                .with_member(assigning(
                    "A1",
                    "a1",
                    Expr::field(
                        Expr::field(
                            Expr::This {
                                qualifier: Some("Test6".into()),
                            },
                            "a",
                        ),
                        "a",
                    ),
                )),
        )
        .with_member(
            ClassDecl::class("B")
                .with_modifiers(&[Modifier::Static])
                .with_member(counter("b")),
        )
        .with_member(
            ClassDecl::class("B1")
                .with_modifiers(&[Modifier::Private, Modifier::Static])
                .with_member(counter("b1")),
        );

    CompilationUnit::new().with_package("test").with_type(test6)
}

/// ```java
/// package test;
/// public interface Test8 {
///     int b();
///     static class AAA { int a; }
///     class BBB {
///         int b;
///         BBB bbb = new BBB();
///         static Test8 test8 = new Test8() {
///             public int b() { new Test8.AAA(); return 0; }
///         };
///     }
///     interface CCC { int ccc(); }
/// }
/// ```
pub fn interface_members() -> CompilationUnit {
    let anonymous_b = MethodDecl::new("b", Type::int())
        .with_modifiers(&[Modifier::Public])
        .with_annotation(override_marker())
        .with_body(Block::new(vec![
            Statement::expr(Expr::new_object(ClassType::parse("Test8.AAA"), vec![])),
            Statement::ret(Some(Expr::int("0"))),
        ]));

    let bbb = ClassDecl::class("BBB")
        .with_member(FieldDecl::single(&[], Type::int(), "b"))
        .with_member(FieldDecl::initialized(
            &[],
            Type::class("BBB"),
            "bbb",
            Expr::new_object(ClassType::new("BBB"), vec![]),
        ))
        .with_member(FieldDecl::initialized(
            &[Modifier::Static],
            Type::class("Test8"),
            "test8",
            Expr::anonymous(ClassType::new("Test8"), vec![], vec![anonymous_b.into()]),
        ));

    let test8 = ClassDecl::interface("Test8")
        .with_modifiers(&[Modifier::Public])
        .with_javadoc("\n * Classes inside an interface\n ")
        .with_member(abstract_int("b"))
        .with_member(
            ClassDecl::class("AAA")
                .with_modifiers(&[Modifier::Static])
                .with_member(FieldDecl::single(&[], Type::int(), "a")),
        )
        .with_member(bbb)
        .with_member(ClassDecl::interface("CCC").with_member(abstract_int("ccc")));

    CompilationUnit::new().with_package("test").with_type(test8)
}

/// `public class Point { public final int x; public Point() {} }`, as a
/// front end would serialize it
pub fn simple_class() -> CompilationUnit {
    let value = json!({
        "package": { "name": "demo" },
        "types": [{
            "kind": "class",
            "name": "Point",
            "modifiers": ["public"],
            "members": [
                {
                    "member": "field",
                    "modifiers": ["public", "final"],
                    "base_type": { "kind": "primitive", "primitive": "int" },
                    "variables": [{ "name": "x" }]
                },
                {
                    "member": "constructor",
                    "name": "Point",
                    "modifiers": ["public"]
                }
            ]
        }]
    });
    serde_json::from_value(value).unwrap_or_default()
}

/// `class Holder { private static class Inner { int y; } }`
pub fn static_nested() -> CompilationUnit {
    CompilationUnit::new().with_package("demo").with_type(
        ClassDecl::class("Holder").with_member(
            ClassDecl::class("Inner")
                .with_modifiers(&[Modifier::Private, Modifier::Static])
                .with_member(FieldDecl::single(&[], Type::int(), "y")),
        ),
    )
}

/// `class Root { interface I { int f(); class J { int j; } } }`
pub fn hoisted_class() -> CompilationUnit {
    CompilationUnit::new().with_package("demo").with_type(
        ClassDecl::class("Root").with_member(
            ClassDecl::interface("I")
                .with_member(abstract_int("f"))
                .with_member(
                    ClassDecl::class("J").with_member(FieldDecl::single(&[], Type::int(), "j")),
                ),
        ),
    )
}

/// A class path holding the JDK index plus a small third-party package
pub fn sample_class_path() -> ClassIndex {
    ClassIndex::jdk()
        .with(TypeDescriptor::class("android.view.View").with_members(&["OnClickListener"]))
        .with(TypeDescriptor::interface("android.view.View$OnClickListener"))
        .with(TypeDescriptor::class("android.widget.TextView"))
        .with(TypeDescriptor::interface("android.widget.Checkable"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fixture_deserializes() {
        let unit = simple_class();
        assert_eq!(unit.package_name(), Some("demo"));
        assert_eq!(unit.types.len(), 1);
        assert_eq!(unit.types[0].members().len(), 2);
    }

    #[test]
    fn test_every_fixture_has_a_root_type() {
        for fixture in FixtureType::ALL {
            assert_eq!(fixture.unit().types.len(), 1, "{:?}", fixture);
        }
    }
}
