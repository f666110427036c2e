//! Emitter configuration and the unsupported-construct policy
//!
//! [`EmitterConfig`] is immutable once built. It is created through
//! [`EmitterConfigBuilder`] or loaded from TOML:
//!
//! ```toml
//! print_comments = true
//! indent = "  "
//! failure_mode = "strict"
//! ```

use crate::error::ConfigError;
use javats_core::ast::Modifier;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INDENT: &str = "    ";
pub const DEFAULT_END_OF_LINE: &str = "\n";
pub const DEFAULT_NOT_SUPPORTED_TEXT: &str = "java2ts not support";

/// What happens when the emitter meets a construct TypeScript cannot express
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Leave a marker comment in the output and keep going
    #[default]
    Tolerant,
    /// Abort the whole conversion
    Strict,
}

/// A construct without a TypeScript equivalent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    ThrownExceptions,
    Modifiers(Vec<Modifier>),
    WildcardImport(String),
    MethodReference,
    Assert,
    Synchronized,
    TryWithResources,
    /// Local interfaces, enums and annotation types
    LocalType(String),
    /// `Outer.super`
    QualifiedSuper(String),
    /// `outer.new Inner() { ... }`
    QualifiedAnonymousClass(String),
}

impl Unsupported {
    pub fn reason(&self) -> String {
        match self {
            Unsupported::ThrownExceptions => "not support thrown exception here".to_string(),
            Unsupported::Modifiers(modifiers) => {
                let keywords: Vec<_> = modifiers.iter().map(|m| m.keyword()).collect();
                format!("not support modifiers: {} ", keywords.join(" "))
            }
            Unsupported::WildcardImport(name) => {
                format!("not support Asterisk in import '{}.*'", name)
            }
            Unsupported::MethodReference => "not support method reference".to_string(),
            Unsupported::Assert => "not support assert statement".to_string(),
            Unsupported::Synchronized => "not support synchronized statement".to_string(),
            Unsupported::TryWithResources => "not support try-with-resources".to_string(),
            Unsupported::LocalType(name) => {
                format!("not support local type declaration '{}'", name)
            }
            Unsupported::QualifiedSuper(name) => format!("not support qualified super '{}.super'", name),
            Unsupported::QualifiedAnonymousClass(name) => {
                format!("not support qualified creation of anonymous '{}'", name)
            }
        }
    }
}

/// Outcome of [`EmitterConfig::judge`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Print `marker` in place of the construct and continue
    Warn { marker: String },
    /// Stop the conversion
    Fatal { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    print_comments: bool,
    print_javadoc: bool,
    indent: String,
    end_of_line: String,
    not_supported_text: String,
    failure_mode: FailureMode,
    wrap_package_namespace: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            print_comments: true,
            print_javadoc: true,
            indent: DEFAULT_INDENT.to_string(),
            end_of_line: DEFAULT_END_OF_LINE.to_string(),
            not_supported_text: DEFAULT_NOT_SUPPORTED_TEXT.to_string(),
            failure_mode: FailureMode::Tolerant,
            wrap_package_namespace: true,
        }
    }
}

impl EmitterConfig {
    pub fn builder() -> EmitterConfigBuilder {
        EmitterConfigBuilder::default()
    }

    /// Default configuration with [`FailureMode::Strict`]
    pub fn strict() -> Self {
        Self {
            failure_mode: FailureMode::Strict,
            ..Self::default()
        }
    }

    pub fn print_comments(&self) -> bool {
        self.print_comments
    }

    pub fn print_javadoc(&self) -> bool {
        self.print_javadoc
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn end_of_line(&self) -> &str {
        &self.end_of_line
    }

    pub fn not_supported_text(&self) -> &str {
        &self.not_supported_text
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    pub fn wrap_package_namespace(&self) -> bool {
        self.wrap_package_namespace
    }

    /// Decide what to do with an unsupported construct
    pub fn judge(&self, construct: &Unsupported) -> Verdict {
        let reason = construct.reason();
        match self.failure_mode {
            FailureMode::Tolerant => Verdict::Warn {
                marker: format!("/* {} : {} */", self.not_supported_text, reason),
            },
            FailureMode::Strict => Verdict::Fatal { reason },
        }
    }

    /// Parse a configuration from TOML; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        file.into_builder().build()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }
}

/// On-disk form of [`EmitterConfig`]
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    print_comments: Option<bool>,
    print_javadoc: Option<bool>,
    indent: Option<String>,
    end_of_line: Option<String>,
    not_supported_text: Option<String>,
    failure_mode: Option<FailureMode>,
    wrap_package_namespace: Option<bool>,
}

impl ConfigFile {
    fn into_builder(self) -> EmitterConfigBuilder {
        EmitterConfigBuilder {
            print_comments: self.print_comments,
            print_javadoc: self.print_javadoc,
            indent: self.indent,
            end_of_line: self.end_of_line,
            not_supported_text: self.not_supported_text,
            failure_mode: self.failure_mode,
            wrap_package_namespace: self.wrap_package_namespace,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmitterConfigBuilder {
    print_comments: Option<bool>,
    print_javadoc: Option<bool>,
    indent: Option<String>,
    end_of_line: Option<String>,
    not_supported_text: Option<String>,
    failure_mode: Option<FailureMode>,
    wrap_package_namespace: Option<bool>,
}

impl EmitterConfigBuilder {
    pub fn print_comments(mut self, enabled: bool) -> Self {
        self.print_comments = Some(enabled);
        self
    }

    pub fn print_javadoc(mut self, enabled: bool) -> Self {
        self.print_javadoc = Some(enabled);
        self
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    pub fn end_of_line(mut self, eol: impl Into<String>) -> Self {
        self.end_of_line = Some(eol.into());
        self
    }

    pub fn not_supported_text(mut self, text: impl Into<String>) -> Self {
        self.not_supported_text = Some(text.into());
        self
    }

    pub fn failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = Some(mode);
        self
    }

    pub fn wrap_package_namespace(mut self, enabled: bool) -> Self {
        self.wrap_package_namespace = Some(enabled);
        self
    }

    pub fn build(self) -> Result<EmitterConfig, ConfigError> {
        let defaults = EmitterConfig::default();
        let config = EmitterConfig {
            print_comments: self.print_comments.unwrap_or(defaults.print_comments),
            print_javadoc: self.print_javadoc.unwrap_or(defaults.print_javadoc),
            indent: self.indent.unwrap_or(defaults.indent),
            end_of_line: self.end_of_line.unwrap_or(defaults.end_of_line),
            not_supported_text: self
                .not_supported_text
                .unwrap_or(defaults.not_supported_text),
            failure_mode: self.failure_mode.unwrap_or(defaults.failure_mode),
            wrap_package_namespace: self
                .wrap_package_namespace
                .unwrap_or(defaults.wrap_package_namespace),
        };

        for (field, value) in [
            ("indent", &config.indent),
            ("end_of_line", &config.end_of_line),
            ("not_supported_text", &config.not_supported_text),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        Ok(config)
    }
}
