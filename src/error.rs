//! Error types surfaced to the host bundler.
use thiserror::Error;

/// Errors raised by the transform pipeline.
///
/// Configuration problems are user-fixable; the remaining variants
/// indicate an internal inconsistency that should be reported as a
/// defect rather than retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The probe output shows a module format rewrite, which would
    /// fight the bundler for control of import and export statements.
    #[error("the transform configuration includes a module format rule; disable it so that module syntax is left to the bundler")]
    ModuleTransformDetected,

    /// A transformed file imports helpers from a runtime support
    /// package but the `runtimeHelpers` option was not set.
    #[error("runtime helpers are not enabled; either set the `runtimeHelpers` option or remove the runtime helper transform rule")]
    RuntimeHelpersDisabled,

    /// The probe output matched none of the known helper shapes.
    #[error("probe output did not match any known helper emission shape")]
    UnknownHelperShape,

    /// The probe output could not be parsed as a module.
    #[error("failed to parse probe output as a module")]
    ProbeParse,
}

impl Error {
    /// Whether this error can be fixed by changing the configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::ModuleTransformDetected | Error::RuntimeHelpersDisabled
        )
    }

    /// Whether this error indicates an unexpected internal state.
    pub fn is_unexpected_state(&self) -> bool {
        !self.is_configuration()
    }
}
