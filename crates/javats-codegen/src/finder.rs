//! Java name resolution for unqualified type references
//!
//! Mirrors the order in which `javac` makes a simple type name visible:
//!
//! 1. types nested in the enclosing declarations, innermost first
//! 2. imports, in declaration order
//! 3. top-level types of the unit's own package
//! 4. `java.lang`
//!
//! Lexical scope always beats imports. Among wildcard imports the first one
//! that yields an existing type wins, whether or not another import would also
//! have matched.

use crate::error::ResolveError;
use javats_core::ast::{ClassType, CompilationUnit, TypeDecl};
use javats_core::classpath::{ClassIndex, ClassPath, TypeDescriptor, NESTED_SEPARATOR};
use tracing::{debug, trace};

const FALLBACK_PACKAGE: &str = "java.lang";

/// Resolves type names for one compilation unit.
///
/// Types declared in the unit itself are indexed up front and layered over the
/// caller's class path, so the unit never has to be on the class path itself.
pub struct ClassFinder<'a> {
    unit: &'a CompilationUnit,
    local: ClassIndex,
    class_path: &'a dyn ClassPath,
}

impl<'a> ClassFinder<'a> {
    pub fn new(unit: &'a CompilationUnit, class_path: &'a dyn ClassPath) -> Self {
        Self {
            unit,
            local: ClassIndex::from_unit(unit),
            class_path,
        }
    }

    /// Look a binary or canonical name up, unit declarations first
    pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        self.local
            .lookup(name)
            .or_else(|| self.class_path.lookup(name))
    }

    /// Resolve a possibly scoped reference seen inside `scope` (outermost first).
    ///
    /// Only the leftmost segment goes through the scoping rules; the rest are
    /// appended as nested-type segments of whatever it resolved to.
    pub fn resolve(
        &self,
        ty: &ClassType,
        scope: &[&TypeDecl],
    ) -> Result<&TypeDescriptor, ResolveError> {
        let segments = ty.segments();
        let root = self.resolve_simple(segments[0], scope)?;
        if segments.len() == 1 {
            return Ok(root);
        }

        let mut binary_name = root.binary_name.clone();
        for segment in &segments[1..] {
            binary_name.push(NESTED_SEPARATOR);
            binary_name.push_str(segment);
        }
        self.lookup(&binary_name)
            .ok_or_else(|| ResolveError::UnknownScope {
                scope: root.qualified_name(),
                name: segments[1..].join("."),
            })
    }

    /// Resolve a single unqualified name
    pub fn resolve_simple(
        &self,
        name: &str,
        scope: &[&TypeDecl],
    ) -> Result<&TypeDescriptor, ResolveError> {
        trace!("ClassFinder: resolving '{}' in {} enclosing scopes", name, scope.len());

        if let Some(found) = self.find_in_scope(name, scope) {
            return found;
        }
        if let Some(found) = self.find_in_imports(name) {
            return found;
        }
        if let Some(found) = self.find_in_package(name) {
            debug!("ClassFinder: '{}' is a package sibling", name);
            return Ok(found);
        }

        let fallback = format!("{}.{}", FALLBACK_PACKAGE, name);
        trace!("  Trying fallback '{}'", fallback);
        self.lookup(&fallback).ok_or_else(|| ResolveError::NotFound {
            name: name.to_string(),
        })
    }

    fn find_in_scope(
        &self,
        name: &str,
        scope: &[&TypeDecl],
    ) -> Option<Result<&TypeDescriptor, ResolveError>> {
        for depth in (0..scope.len()).rev() {
            if scope[depth].nested_types().any(|t| t.name() == name) {
                let binary_name = self.binary_name(&scope[..=depth], name);
                trace!("  Lexical match '{}'", binary_name);
                return Some(self.lookup(&binary_name).ok_or(ResolveError::NotFound {
                    name: binary_name,
                }));
            }
        }
        None
    }

    fn find_in_imports(&self, name: &str) -> Option<Result<&TypeDescriptor, ResolveError>> {
        for import in &self.unit.imports {
            if import.is_asterisk {
                let candidate = format!("{}.{}", import.name, name);
                if let Some(found) = self.lookup(&candidate) {
                    trace!("  Wildcard import match '{}'", candidate);
                    return Some(Ok(found));
                }
            } else if import.identifier() == name {
                trace!("  Import match '{}'", import.name);
                return Some(self.lookup(&import.name).ok_or(ResolveError::NotFound {
                    name: import.name.clone(),
                }));
            }
        }
        None
    }

    fn find_in_package(&self, name: &str) -> Option<&TypeDescriptor> {
        let package = self.unit.package_name().filter(|p| !p.is_empty())?;
        self.local
            .package_members(package)
            .into_iter()
            .chain(self.class_path.package_members(package))
            .find(|d| d.simple_name == name)
    }

    /// `pkg.Outer$Middle$name` for a type nested in the last declaration of `chain`
    fn binary_name(&self, chain: &[&TypeDecl], name: &str) -> String {
        let mut binary_name = match self.unit.package_name() {
            Some(pkg) if !pkg.is_empty() => format!("{}.", pkg),
            _ => String::new(),
        };
        for decl in chain {
            binary_name.push_str(decl.name());
            binary_name.push(NESTED_SEPARATOR);
        }
        binary_name.push_str(name);
        binary_name
    }
}
