//! Plugin configuration and the option set passed to the engine.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration accepted from the host bundler.
///
/// The file filter patterns and the helper related flags are consumed
/// by the plugin itself; everything else is normalized into a
/// [`TransformOptions`] and handed to the transform engine.
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Glob patterns for files that should be transformed.
    ///
    /// An empty list admits every file not excluded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    /// Glob patterns for files that must never be transformed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Source map toggle, alias of `sourceMaps`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<bool>,
    /// Source map toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<bool>,
    /// Allow helpers to be imported from a runtime support package.
    pub runtime_helpers: bool,
    /// The caller supplies the helper namespace itself, so no import
    /// of the shared helper module is appended.
    pub external_helpers: bool,
    /// Restrict the synthesized helper module to these helper names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_helpers_whitelist: Option<Vec<String>>,
    /// Transform rules passed through to the engine.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    /// Rule presets passed through to the engine.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<String>,
    /// Engine specific options passed through verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl PluginOptions {
    /// Derive the effective option set for the transform engine.
    ///
    /// Plugin level keys are stripped and the source map toggle is
    /// resolved to a single flag, enabled unless one of the two
    /// aliases disables it explicitly.
    pub fn normalize(&self) -> TransformOptions {
        let disabled =
            self.source_map == Some(false) || self.source_maps == Some(false);
        TransformOptions {
            filename: None,
            source_maps: !disabled,
            plugins: self.plugins.clone(),
            presets: self.presets.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// The effective option set for a single engine invocation.
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// File name reported to the engine for the current source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Whether the engine should produce a source map.
    pub source_maps: bool,
    /// Transform rules, in application order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    /// Rule presets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<String>,
    /// Engine specific options passed through verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
