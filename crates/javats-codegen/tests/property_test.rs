//! Property-based checks for the conversion pipeline

use javats_codegen::policy::primitive_type;
use javats_codegen::{convert, ClassFinder, EmitterConfig};
use javats_core::ast::{
    ClassDecl, ClassType, CompilationUnit, FieldDecl, ImportDecl, Primitive, Type, TypeDecl,
    VariableDeclarator,
};
use javats_core::classpath::ClassIndex;
use javats_test_fixtures::{sample_class_path, FixtureType};
use proptest::prelude::*;

const PRIMITIVES: [Primitive; 8] = [
    Primitive::Boolean,
    Primitive::Byte,
    Primitive::Short,
    Primitive::Int,
    Primitive::Long,
    Primitive::Char,
    Primitive::Float,
    Primitive::Double,
];

fn field_name() -> impl Strategy<Value = String> {
    "f_[a-z0-9]{1,8}"
}

fn fixture() -> impl Strategy<Value = FixtureType> {
    prop::sample::select(FixtureType::ALL.to_vec())
}

fn expected_primitive(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Boolean => "boolean",
        Primitive::Char => "string",
        _ => "number",
    }
}

proptest! {
    #[test]
    fn prop_conversion_is_deterministic(fixture in fixture(), strict in any::<bool>()) {
        let config = if strict { EmitterConfig::strict() } else { EmitterConfig::default() };
        let unit = fixture.unit();
        let first = convert(&unit, &config, &ClassIndex::jdk()).map_err(|e| e.to_string());
        let second = convert(&unit, &config, &ClassIndex::jdk()).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_primitive_fields_use_the_fixed_table(
        primitive in prop::sample::select(PRIMITIVES.to_vec()),
        name in field_name(),
    ) {
        prop_assert_eq!(primitive_type(primitive), expected_primitive(primitive));

        let unit = CompilationUnit::new().with_type(
            ClassDecl::class("Holder").with_member(FieldDecl::single(&[], Type::primitive(primitive), name.clone())),
        );
        let out = convert(&unit, &EmitterConfig::default(), &ClassIndex::jdk())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected = format!("    {}: {};\n", name, expected_primitive(primitive));
        prop_assert!(out.contains(&expected), "{}", out);
    }

    #[test]
    fn prop_declarators_keep_their_own_dimensions(
        base_dims in 0usize..3,
        variables in prop::collection::vec((field_name(), 0usize..4), 1..5),
    ) {
        let declarators = variables
            .iter()
            .enumerate()
            .map(|(i, (name, dims))| VariableDeclarator::new(format!("{}_{}", name, i)).with_extra_dimensions(*dims))
            .collect();
        let unit = CompilationUnit::new().with_type(
            ClassDecl::class("Grid").with_member(FieldDecl::new(&[], Type::array(Type::int(), base_dims), declarators)),
        );
        let out = convert(&unit, &EmitterConfig::default(), &ClassIndex::jdk())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let expected: Vec<String> = variables
            .iter()
            .enumerate()
            .map(|(i, (name, dims))| format!("{}_{}: number{}", name, i, "[]".repeat(base_dims + dims)))
            .collect();
        let line = format!("    {};\n", expected.join(", "));
        prop_assert!(out.contains(&line), "expected {:?} in {}", line, out);
    }

    #[test]
    fn prop_resolution_is_idempotent(
        name in prop::sample::select(vec!["View", "TextView", "Checkable", "String", "Runnable", "Nowhere", "Inner"]),
        nested in any::<bool>(),
    ) {
        let unit = CompilationUnit::new()
            .with_package("app")
            .with_import(ImportDecl::wildcard("android.view"))
            .with_import(ImportDecl::wildcard("android.widget"))
            .with_type(ClassDecl::class("Outer").with_member(ClassDecl::class("Inner")));
        let class_path = sample_class_path();
        let finder = ClassFinder::new(&unit, &class_path);

        let outer: &TypeDecl = &unit.types[0];
        let scope: Vec<&TypeDecl> = if nested { vec![outer] } else { Vec::new() };
        let ty = ClassType::new(name);

        let first = finder.resolve(&ty, &scope).map(|d| d.qualified_name());
        let second = finder.resolve(&ty, &scope).map(|d| d.qualified_name());
        prop_assert_eq!(first, second);
    }
}
