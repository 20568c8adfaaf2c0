//! The per-file transform pipeline exposed through bundler hooks.
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Result;

use dashmap::DashSet;

use crate::engine::TransformEngine;
use crate::error::Error;
use crate::filter::FileFilter;
use crate::helper_module::{self, HELPERS_ID};
use crate::options::{PluginOptions, TransformOptions};
use crate::strategy::{HelperStrategy, StrategyDetector};
use crate::warnings::{default_sink, WarningSink, Warnings};

/// A transformed module handed back to the host bundler.
#[derive(Debug, Clone)]
pub struct TransformedModule {
    /// The transformed source text.
    pub code: String,
    /// Source map, when one was requested.
    pub map: Option<String>,
}

/// Options passed by the host bundler when the build starts.
#[derive(Default)]
pub struct HostOptions {
    /// Warning reporter supplied by the host.
    pub onwarn: Option<WarningSink>,
}

/// Hooks a bundler drives for each plugin.
///
/// A `None` return from `resolve_id`, `load` or `transform` means
/// the plugin does not handle the module and the host should move on
/// to the next resolver or loader.
pub trait BundlerPlugin: Send + Sync {
    /// Stable name the plugin reports to the host.
    fn name(&self) -> &str;

    /// Observe the host build options.
    fn options(&self, _host: HostOptions) {}

    /// Resolve a module identifier.
    fn resolve_id(&self, _id: &str) -> Option<String> {
        None
    }

    /// Load the content for a module identifier.
    fn load(&self, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Transform the content of a module.
    fn transform(
        &self,
        _code: &str,
        _id: &str,
    ) -> Result<Option<TransformedModule>> {
        Ok(None)
    }
}

/// Runs every included module through the transform engine and wires
/// up helper delivery according to the detected strategy.
pub struct TransformPlugin {
    engine: Arc<dyn TransformEngine>,
    filter: FileFilter,
    options: TransformOptions,
    runtime_helpers: bool,
    external_helpers: bool,
    external_helpers_whitelist: Option<Vec<String>>,
    detector: StrategyDetector,
    inline_helpers: DashSet<String>,
    warnings: Warnings,
    sink: RwLock<WarningSink>,
}

impl TransformPlugin {
    /// Create a plugin for the given engine and configuration.
    pub fn new(
        engine: Arc<dyn TransformEngine>,
        options: PluginOptions,
    ) -> Result<Self> {
        let filter = FileFilter::new(&options.include, &options.exclude)?;
        Ok(TransformPlugin {
            engine,
            filter,
            runtime_helpers: options.runtime_helpers,
            external_helpers: options.external_helpers,
            external_helpers_whitelist: options
                .external_helpers_whitelist
                .clone(),
            options: options.normalize(),
            detector: StrategyDetector::new(),
            inline_helpers: DashSet::new(),
            warnings: Warnings::new(),
            sink: RwLock::new(default_sink()),
        })
    }

    /// Replace the warning reporter.
    pub fn set_warning_sink(&self, sink: WarningSink) {
        // The sink is replace-only, so a poisoned value is still intact.
        let mut guard = match self.sink.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = sink;
    }

    fn warn(&self, message: &str) {
        let sink = match self.sink.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.warnings.warn_once(&**sink, message);
    }
}

impl BundlerPlugin for TransformPlugin {
    fn name(&self) -> &str {
        "pumice"
    }

    fn options(&self, host: HostOptions) {
        if let Some(sink) = host.onwarn {
            self.set_warning_sink(sink);
        }
    }

    fn resolve_id(&self, id: &str) -> Option<String> {
        if id == HELPERS_ID {
            Some(id.to_string())
        } else {
            None
        }
    }

    fn load(&self, id: &str) -> Result<Option<String>> {
        if id != HELPERS_ID {
            return Ok(None);
        }
        let source = helper_module::synthesize(
            &*self.engine,
            self.external_helpers_whitelist.as_deref(),
            &self.options,
        )?;
        Ok(Some(source))
    }

    fn transform(
        &self,
        code: &str,
        id: &str,
    ) -> Result<Option<TransformedModule>> {
        if id == HELPERS_ID || !self.filter.matches(id) {
            return Ok(None);
        }

        let dir = Path::new(id).parent().unwrap_or_else(|| Path::new("."));
        let strategy =
            self.detector.detect(&*self.engine, &self.options, dir)?;

        let mut local = self.options.clone();
        local.filename = Some(id.to_string());

        let mut output = self.engine.transform(code, &local)?;

        if !output.used_helpers.is_empty() {
            match strategy {
                HelperStrategy::Bundled => {
                    if !self.external_helpers {
                        output.code.push_str(&format!(
                            "\n\nimport * as babelHelpers from '{}';",
                            HELPERS_ID
                        ));
                    }
                }
                HelperStrategy::Runtime => {
                    if !self.runtime_helpers {
                        return Err(Error::RuntimeHelpersDisabled.into());
                    }
                }
                HelperStrategy::Inline => {
                    for helper in output.used_helpers.iter() {
                        if !self.inline_helpers.insert(helper.clone()) {
                            self.warn(&format!(
                                "The '{}' helper is used more than once in your code. It is strongly recommended to use the external-helpers rule or the es2015-rollup preset instead.",
                                helper
                            ));
                        }
                    }
                }
            }
        }

        Ok(Some(TransformedModule {
            code: output.code,
            map: output.map,
        }))
    }
}
