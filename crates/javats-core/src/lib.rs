//! Declaration tree and type index for javats
//!
//! - [`ast`]: the parsed Java declarations handed to the code generator
//! - [`classpath`]: type descriptors and the symbol table used for name resolution

pub mod ast;
pub mod classpath;
pub mod error;

pub use ast::CompilationUnit;
pub use classpath::{ClassIndex, ClassPath, TypeDescriptor};
pub use error::CoreError;
