//! Compiler pipeline
//!
//! parse -> load metadata -> resolve -> validate -> generate, strictly in
//! that order for each (template, component) pair. Units are independent, so
//! a batch compiles them in parallel.

use rayon::prelude::*;

use crate::binding::{resolve_collecting, validate};
use crate::codegen::{generate, ViewDescriptor};
use crate::config::{CompilationMode, CompilerConfig};
use crate::diagnostics::{sort_diagnostics, Diagnostic};
use crate::error::{CompilerError, Result};
use crate::logging::Logger;
use crate::metadata::{self, ComponentDecl, SymbolTable};
use crate::ml_parser::{ParseOptions, Parser};

/// One template together with the component it binds to.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub template: String,
    pub component: ComponentDecl,
    /// Overrides the configured template URL in diagnostics.
    pub template_url: Option<String>,
}

impl CompilationUnit {
    pub fn new(template: &str, component: ComponentDecl) -> Self {
        CompilationUnit {
            template: template.to_string(),
            component,
            template_url: None,
        }
    }

    pub fn with_template_url(mut self, url: &str) -> Self {
        self.template_url = Some(url.to_string());
        self
    }
}

pub fn compile(unit: &CompilationUnit, config: &CompilerConfig, logger: &dyn Logger) -> Result<ViewDescriptor> {
    let component = unit.component.name.as_str();
    let url = unit.template_url.as_deref().unwrap_or(&config.template_url);

    logger.debug(&format!("{}: parsing {}", component, url));
    let parser = Parser::with_options(ParseOptions {
        preserve_whitespaces: config.preserve_whitespaces,
    });
    let template = parser.parse(&unit.template, url).map_err(|err| {
        logger.info(&format!("{}: 1 diagnostic(s)", component));
        CompilerError::from(err)
    })?;

    logger.debug(&format!("{}: loading metadata", component));
    let metadata = metadata::load(&unit.component).map_err(|err| {
        logger.info(&format!("{}: 1 diagnostic(s)", component));
        CompilerError::from(err)
    })?;
    let symbols = SymbolTable::build(&metadata);

    logger.debug(&format!("{}: resolving bindings against {} member(s)", component, symbols.len()));
    let (resolved, resolve_errors) = resolve_collecting(&template, &symbols);
    let mut diagnostics: Vec<Diagnostic> = resolve_errors.iter().map(|e| e.to_diagnostic()).collect();

    match config.mode {
        CompilationMode::StrictStatic => {
            logger.debug(&format!("{}: validating", component));
            if let Err(errors) = validate(&resolved, &metadata) {
                diagnostics.extend(errors.iter().map(|e| e.to_diagnostic()));
            }
        }
        CompilationMode::FastUnchecked => {
            logger.warn(&format!(
                "{}: compiling in {} mode, visibility, arity and factory checks are skipped",
                component, config.mode
            ));
        }
    }

    logger.info(&format!("{}: {} diagnostic(s)", component, diagnostics.len()));
    if !diagnostics.is_empty() {
        sort_diagnostics(&mut diagnostics);
        return Err(CompilerError::Diagnostics {
            component: component.to_string(),
            diagnostics,
        });
    }

    logger.debug(&format!("{}: generating {} slot(s)", component, resolved.bindings.len()));
    let descriptor = generate(&resolved, &metadata, config);
    let omitted = metadata.providers.len().saturating_sub(descriptor.factories.len());
    if omitted > 0 {
        logger.warn(&format!(
            "{}: {} provider(s) without an exportable factory left out of the factory table",
            component, omitted
        ));
    }
    Ok(descriptor)
}

/// Compiles every unit, in parallel. Results keep the order of `units`.
pub fn compile_batch(units: &[CompilationUnit], config: &CompilerConfig, logger: &dyn Logger) -> Vec<Result<ViewDescriptor>> {
    logger.debug(&format!("compiling {} unit(s)", units.len()));
    units.par_iter().map(|unit| compile(unit, config, logger)).collect()
}
