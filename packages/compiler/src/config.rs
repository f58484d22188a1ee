//! Compiler configuration
//!
//! Per-unit options. JSON uses camelCase keys; every field has a default so
//! a partial object is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// How much static checking runs before code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilationMode {
    /// Resolution only; the validator is skipped.
    FastUnchecked,
    #[default]
    StrictStatic,
}

impl fmt::Display for CompilationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilationMode::FastUnchecked => write!(f, "fast-unchecked"),
            CompilationMode::StrictStatic => write!(f, "strict-static"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    pub mode: CompilationMode,
    pub preserve_whitespaces: bool,
    /// Reported as the file name in template diagnostics.
    pub template_url: String,
    /// Identifier the component instance is bound to in generated code.
    pub context_name: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            mode: CompilationMode::StrictStatic,
            preserve_whitespaces: true,
            template_url: "template.html".to_string(),
            context_name: "ctx".to_string(),
        }
    }
}

impl CompilerConfig {
    pub fn with_mode(mut self, mode: CompilationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_template_url(mut self, url: &str) -> Self {
        self.template_url = url.to_string();
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: CompilerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn is_strict(&self) -> bool {
        self.mode == CompilationMode::StrictStatic
    }
}
