//! Deferred emission of interface-nested declarations
//!
//! TypeScript interfaces cannot contain declarations, and a class nested in an
//! interface has no enclosing instance to close over. Such declarations are
//! replaced by a placeholder and re-emitted after the root declaration inside
//! `export module` blocks that mirror their Java nesting.

use javats_core::ast::TypeDecl;
use std::collections::HashSet;

/// A declaration waiting to be printed as a module member
#[derive(Debug, Clone)]
pub struct PendingModule<'a> {
    pub decl: &'a TypeDecl,
    /// Enclosing declarations, outermost (the root) first
    pub enclosing: Vec<&'a TypeDecl>,
}

impl<'a> PendingModule<'a> {
    /// One `export module` per enclosing declaration
    pub fn module_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.enclosing.iter().copied().map(TypeDecl::name)
    }
}

/// Whether `decl`, nested in `enclosing`, must be printed as a module member
pub fn must_hoist(decl: &TypeDecl, enclosing: &[&TypeDecl]) -> bool {
    decl.is_interface() || enclosing.iter().any(|d| d.is_interface())
}

/// Pending declarations, drained in waves.
///
/// Each declaration is accepted at most once per conversion.
#[derive(Debug, Default)]
pub struct ModuleQueue<'a> {
    pending: Vec<PendingModule<'a>>,
    seen: HashSet<*const TypeDecl>,
}

impl<'a> ModuleQueue<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `decl` was queued before
    pub fn enqueue(&mut self, decl: &'a TypeDecl, enclosing: &[&'a TypeDecl]) -> bool {
        if !self.seen.insert(decl as *const TypeDecl) {
            return false;
        }
        self.pending.push(PendingModule {
            decl,
            enclosing: enclosing.to_vec(),
        });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Everything queued so far; later enqueues form the next wave
    pub fn take_wave(&mut self) -> Vec<PendingModule<'a>> {
        std::mem::take(&mut self.pending)
    }
}
