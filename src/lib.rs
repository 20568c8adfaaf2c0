//! Bundler plugin that runs every module through a Babel style
//! source transformer and supplies the transformer's runtime helpers
//! as a single shared virtual module.
//!
//! The transform engine never declares how it emits helpers, so the
//! pipeline probes it once per directory: a fixed class snippet is
//! transformed with class lowering forced on and the output shape
//! decides whether helpers are inlined per file, imported from a
//! runtime package or referenced through a shared namespace. Each
//! strategy imposes a different obligation on the per-file transform,
//! from appending an import of the virtual helper module to warning
//! when the same helper is inlined into more than one file.

mod error;
mod filter;

pub mod engine;
pub mod helper_module;
pub mod options;
pub mod plugin;
pub mod strategy;
pub mod warnings;

pub use engine::{TransformEngine, TransformedCode};
pub use error::Error;
pub use filter::FileFilter;
pub use helper_module::{HELPERS_ID, KEYWORD_HELPERS};
pub use options::{PluginOptions, TransformOptions};
pub use plugin::{
    BundlerPlugin, HostOptions, TransformPlugin, TransformedModule,
};
pub use strategy::{HelperStrategy, StrategyDetector};
pub use warnings::{WarningSink, Warnings};
