//! TypeScript generation for parsed Java compilation units
//!
//! The entry point is [`convert`]: it takes one [`CompilationUnit`], an
//! [`EmitterConfig`] and the [`ClassPath`] used to qualify type names, and
//! returns the TypeScript source. [`TypeScriptCodegen`] wraps the same call
//! behind the [`Codegen`] trait for callers that keep a generator around.

pub mod config;
pub mod emitter;
pub mod error;
pub mod finder;
pub mod hoist;
pub mod policy;
pub mod writer;

use javats_core::ast::CompilationUnit;
use javats_core::classpath::{ClassIndex, ClassPath};
use tracing::{debug, instrument};

pub use config::{EmitterConfig, EmitterConfigBuilder, FailureMode, Unsupported, Verdict};
pub use emitter::Emitter;
pub use error::{ConfigError, EmitError, ResolveError};
pub use finder::ClassFinder;

/// Common trait for all code generators
pub trait Codegen {
    fn generate(&mut self, unit: &CompilationUnit) -> Result<String, EmitError>;
}

/// Convert one compilation unit to TypeScript
#[instrument(skip_all, fields(package = unit.package_name().unwrap_or_default(), types = unit.types.len()))]
pub fn convert(
    unit: &CompilationUnit,
    config: &EmitterConfig,
    class_path: &dyn ClassPath,
) -> Result<String, EmitError> {
    let source = Emitter::new(unit, config, class_path).emit()?;
    debug!("Generated {} bytes of TypeScript", source.len());
    Ok(source)
}

/// Generator bound to one configuration and class path
pub struct TypeScriptCodegen<C: ClassPath = ClassIndex> {
    config: EmitterConfig,
    class_path: C,
}

impl TypeScriptCodegen<ClassIndex> {
    /// Generator resolving against the bundled JDK index
    pub fn new(config: EmitterConfig) -> Self {
        Self::with_class_path(config, ClassIndex::jdk())
    }
}

impl Default for TypeScriptCodegen<ClassIndex> {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}

impl<C: ClassPath> TypeScriptCodegen<C> {
    pub fn with_class_path(config: EmitterConfig, class_path: C) -> Self {
        Self { config, class_path }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn class_path(&self) -> &C {
        &self.class_path
    }
}

impl<C: ClassPath> Codegen for TypeScriptCodegen<C> {
    fn generate(&mut self, unit: &CompilationUnit) -> Result<String, EmitError> {
        convert(unit, &self.config, &self.class_path)
    }
}
