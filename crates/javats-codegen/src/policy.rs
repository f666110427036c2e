//! Fixed Java to TypeScript mapping tables

use javats_core::ast::{ClassType, Modifier, Modifiers, Primitive};
use std::borrow::Cow;

/// Modifiers TypeScript understands, in the order they are printed
pub const SUPPORTED_MODIFIERS: [Modifier; 5] = [
    Modifier::Private,
    Modifier::Protected,
    Modifier::Public,
    Modifier::Abstract,
    Modifier::Static,
];

/// Identifiers that are legal in Java but reserved in TypeScript
pub const RESERVED_WORDS: [&str; 5] = ["debugger", "function", "in", "typeof", "var"];

const JAVA_LANG: &str = "java.lang";

pub fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Boolean => "boolean",
        Primitive::Char => "string",
        Primitive::Byte
        | Primitive::Short
        | Primitive::Int
        | Primitive::Long
        | Primitive::Float
        | Primitive::Double => "number",
    }
}

/// Built-in mapping for well known `java.lang` types
pub fn builtin_type(simple_name: &str) -> Option<&'static str> {
    match simple_name {
        "Object" => Some("any"),
        "String" | "CharSequence" => Some("string"),
        "Number" | "Float" | "Integer" | "Double" | "Long" => Some("number"),
        "Void" => Some("void"),
        _ => None,
    }
}

/// Mapping for a class reference, honored unscoped or scoped by exactly `java.lang`
pub fn mapped_class_type(ty: &ClassType) -> Option<&'static str> {
    match &ty.scope {
        None => builtin_type(&ty.name),
        Some(scope) if scope.dotted() == JAVA_LANG => builtin_type(&ty.name),
        Some(_) => None,
    }
}

/// Result of filtering a modifier set down to TypeScript
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierProjection {
    /// Keywords to print, in canonical order
    pub kept: Vec<&'static str>,
    /// Modifiers with no TypeScript counterpart (`final` is never listed)
    pub rejected: Vec<Modifier>,
}

impl ModifierProjection {
    /// `"private static "`, or empty when nothing survives
    pub fn prefix(&self) -> String {
        if self.kept.is_empty() {
            String::new()
        } else {
            format!("{} ", self.kept.join(" "))
        }
    }
}

pub fn project_modifiers(modifiers: &Modifiers) -> ModifierProjection {
    let kept = SUPPORTED_MODIFIERS
        .iter()
        .filter(|m| modifiers.contains(*m))
        .map(|m| m.keyword())
        .collect();
    let rejected = modifiers
        .iter()
        .filter(|m| !SUPPORTED_MODIFIERS.contains(*m) && **m != Modifier::Final)
        .copied()
        .collect();
    ModifierProjection { kept, rejected }
}

pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if RESERVED_WORDS.contains(&name) {
        Cow::Owned(format!("_{}", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Drop a trailing `f`, `F`, `d` or `D`
pub fn strip_double_suffix(value: &str) -> &str {
    value.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(value)
}

/// Drop a trailing `l` or `L`
pub fn strip_long_suffix(value: &str) -> &str {
    value.strip_suffix(['l', 'L']).unwrap_or(value)
}
