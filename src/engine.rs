//! Interface to the external source transformer.
use anyhow::Result;

use crate::options::TransformOptions;

/// Output of a single engine invocation.
#[derive(Debug, Clone, Default)]
pub struct TransformedCode {
    /// The transformed source text.
    pub code: String,
    /// Source map, when the options requested one.
    pub map: Option<String>,
    /// Names of the helpers referenced during this transformation.
    pub used_helpers: Vec<String>,
}

/// An external source-to-source transformer.
///
/// The engine is opaque to the pipeline: it receives source text and
/// an option set and reports the rewritten text plus which helper
/// symbols the rewrite relies on. How those helpers are emitted is
/// not declared anywhere, which is why the strategy detector probes
/// for it empirically.
pub trait TransformEngine: Send + Sync {
    /// Transform `code` with the given option set.
    fn transform(
        &self,
        code: &str,
        options: &TransformOptions,
    ) -> Result<TransformedCode>;

    /// Build the engine's helper library as standalone source text.
    ///
    /// The output assigns each helper onto a `babelHelpers` namespace
    /// object declared with `var`, one helper per top level line.
    /// When a whitelist is given only those helpers are emitted.
    fn build_helpers(&self, whitelist: Option<&[String]>) -> Result<String>;
}
