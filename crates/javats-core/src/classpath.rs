//! Type descriptors and the class-path index the resolver queries
//!
//! A [`ClassPath`] answers two questions: "does this fully qualified type
//! exist, and what is it?" and "which top-level types does this package
//! declare?". [`ClassIndex`] is the in-memory implementation: a symbol table
//! keyed by binary name (`pkg.Outer$Inner`) that also answers canonical dotted
//! lookups (`pkg.Outer.Inner`).

use crate::ast::{CompilationUnit, Member, TypeDecl};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Separator between an enclosing type and a nested one in binary names
pub const NESTED_SEPARATOR: char = '$';

/// What the resolver knows about a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// `Inner` for `pkg.Outer$Inner`
    pub simple_name: String,
    /// `pkg.Outer$Inner`
    pub binary_name: String,
    #[serde(default)]
    pub is_interface: bool,
    /// Declared field, method and nested type names
    #[serde(default)]
    pub member_names: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(binary_name: impl Into<String>, is_interface: bool) -> Self {
        let binary_name = binary_name.into();
        let simple_name = binary_name
            .rsplit(['.', NESTED_SEPARATOR])
            .next()
            .unwrap_or(&binary_name)
            .to_string();
        Self {
            simple_name,
            binary_name,
            is_interface,
            member_names: Vec::new(),
        }
    }

    pub fn class(binary_name: impl Into<String>) -> Self {
        Self::new(binary_name, false)
    }

    pub fn interface(binary_name: impl Into<String>) -> Self {
        Self::new(binary_name, true)
    }

    pub fn with_members(mut self, names: &[&str]) -> Self {
        self.member_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Dotted form used in generated code: `pkg.Outer.Inner`
    pub fn qualified_name(&self) -> String {
        self.binary_name.replace(NESTED_SEPARATOR, ".")
    }

    /// Package of the outermost enclosing type; empty for the default package
    pub fn package(&self) -> &str {
        let top_level = self
            .binary_name
            .split(NESTED_SEPARATOR)
            .next()
            .unwrap_or(&self.binary_name);
        top_level.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }

    pub fn is_top_level(&self) -> bool {
        !self.binary_name.contains(NESTED_SEPARATOR)
    }
}

/// Type lookup capability injected into the resolver
pub trait ClassPath {
    /// Look up a type by binary (`a.B$C`) or canonical (`a.B.C`) name
    fn lookup(&self, name: &str) -> Option<&TypeDescriptor>;

    /// Top-level types declared in `package`
    fn package_members(&self, package: &str) -> Vec<&TypeDescriptor>;
}

/// In-memory symbol table of known types
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    types: BTreeMap<String, TypeDescriptor>,
    /// canonical dotted name -> binary name, for nested types only
    canonical: HashMap<String, String>,
}

/// On-disk layout of a class index
#[derive(Debug, Serialize, Deserialize)]
struct ClassIndexFile {
    #[serde(default)]
    types: Vec<TypeDescriptor>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        if !descriptor.is_top_level() {
            self.canonical
                .insert(descriptor.qualified_name(), descriptor.binary_name.clone());
        }
        self.types.insert(descriptor.binary_name.clone(), descriptor);
    }

    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Add every type of `other`, replacing entries with the same binary name
    pub fn merge(&mut self, other: ClassIndex) {
        for descriptor in other.types.into_values() {
            self.insert(descriptor);
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Index every type declared in `unit`, nested ones included
    pub fn from_unit(unit: &CompilationUnit) -> Self {
        let mut index = Self::new();
        let prefix = match unit.package_name() {
            Some(pkg) if !pkg.is_empty() => format!("{}.", pkg),
            _ => String::new(),
        };
        for decl in &unit.types {
            index.register_decl(decl, &format!("{}{}", prefix, decl.name()));
        }
        debug!(
            "Indexed {} declared types from compilation unit",
            index.len()
        );
        index
    }

    fn register_decl(&mut self, decl: &TypeDecl, binary_name: &str) {
        let member_names = decl
            .members()
            .iter()
            .flat_map(|member| match member {
                Member::Type(t) => vec![t.name().to_string()],
                Member::Field(f) => f.variables.iter().map(|v| v.name.clone()).collect(),
                Member::Method(m) => vec![m.name.clone()],
                Member::AnnotationMember(a) => vec![a.name.clone()],
                Member::Constructor(_) | Member::Initializer(_) => Vec::new(),
            })
            .collect();

        self.insert(TypeDescriptor {
            member_names,
            ..TypeDescriptor::new(binary_name, decl.is_interface())
        });

        for nested in decl.nested_types() {
            let nested_name = format!("{}{}{}", binary_name, NESTED_SEPARATOR, nested.name());
            self.register_decl(nested, &nested_name);
        }
    }

    /// Parse an index from JSON: `{ "types": [ { "binary_name": ..., ... } ] }`
    pub fn from_json_str(content: &str) -> Result<Self, CoreError> {
        let file: ClassIndexFile = serde_json::from_str(content).map_err(|e| CoreError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        Ok(Self::from_descriptors(file.types))
    }

    /// Parse an index from TOML: `[[types]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let file: ClassIndexFile = toml::from_str(content).map_err(|e| CoreError::Parse {
            format: "toml",
            message: e.to_string(),
        })?;
        Ok(Self::from_descriptors(file.types))
    }

    /// Load an index file, choosing the format from the extension
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(CoreError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn to_json_string(&self) -> Result<String, CoreError> {
        let file = ClassIndexFile {
            types: self.types.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| CoreError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    fn from_descriptors(descriptors: Vec<TypeDescriptor>) -> Self {
        let mut index = Self::new();
        for descriptor in descriptors {
            index.insert(descriptor);
        }
        index
    }

    /// Built-in subset of the JDK: the common `java.lang`, `java.util` and
    /// `java.io` types
    pub fn jdk() -> Self {
        const CLASSES: &[&str] = &[
            "java.lang.Object",
            "java.lang.String",
            "java.lang.Number",
            "java.lang.Integer",
            "java.lang.Long",
            "java.lang.Double",
            "java.lang.Float",
            "java.lang.Short",
            "java.lang.Byte",
            "java.lang.Character",
            "java.lang.Boolean",
            "java.lang.Void",
            "java.lang.Math",
            "java.lang.System",
            "java.lang.Thread",
            "java.lang.StringBuilder",
            "java.lang.Enum",
            "java.lang.Class",
            "java.lang.Throwable",
            "java.lang.Exception",
            "java.lang.Error",
            "java.lang.RuntimeException",
            "java.lang.IllegalArgumentException",
            "java.lang.IllegalStateException",
            "java.lang.NullPointerException",
            "java.lang.UnsupportedOperationException",
            "java.lang.IndexOutOfBoundsException",
            "java.util.ArrayList",
            "java.util.LinkedList",
            "java.util.HashMap",
            "java.util.HashSet",
            "java.util.Arrays",
            "java.util.Collections",
            "java.util.Calendar",
            "java.util.Date",
            "java.util.Locale",
            "java.util.TimeZone",
            "java.util.Objects",
            "java.util.Optional",
            "java.io.File",
            "java.io.IOException",
            "java.io.InputStream",
            "java.io.OutputStream",
        ];
        const INTERFACES: &[&str] = &[
            "java.lang.CharSequence",
            "java.lang.Runnable",
            "java.lang.Comparable",
            "java.lang.Iterable",
            "java.lang.Cloneable",
            "java.lang.AutoCloseable",
            "java.lang.Override",
            "java.lang.Deprecated",
            "java.lang.SuppressWarnings",
            "java.lang.Thread$UncaughtExceptionHandler",
            "java.util.Collection",
            "java.util.List",
            "java.util.Set",
            "java.util.Map",
            "java.util.Map$Entry",
            "java.util.Iterator",
            "java.util.Comparator",
            "java.io.Serializable",
            "java.io.Closeable",
        ];

        let mut index = Self::new();
        for name in CLASSES {
            index.insert(TypeDescriptor::class(*name));
        }
        for name in INTERFACES {
            index.insert(TypeDescriptor::interface(*name));
        }
        index
    }
}

impl ClassPath for ClassIndex {
    fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name).or_else(|| {
            self.canonical
                .get(name)
                .and_then(|binary| self.types.get(binary))
        })
    }

    fn package_members(&self, package: &str) -> Vec<&TypeDescriptor> {
        self.types
            .values()
            .filter(|d| d.is_top_level() && d.package() == package)
            .collect()
    }
}

impl<T: ClassPath + ?Sized> ClassPath for &T {
    fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        (**self).lookup(name)
    }

    fn package_members(&self, package: &str) -> Vec<&TypeDescriptor> {
        (**self).package_members(package)
    }
}
