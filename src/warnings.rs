//! One-shot warning delivery.
use dashmap::DashSet;

/// Reporter for advisory warnings.
pub type WarningSink = Box<dyn Fn(&str) + Send + Sync>;

/// The sink used when the host supplies none.
pub fn default_sink() -> WarningSink {
    Box::new(|message| log::warn!("{}", message))
}

/// Registry of warning messages that have already been emitted.
///
/// Deduplication is on the exact message text and lasts for the
/// lifetime of the owning plugin instance.
#[derive(Default)]
pub struct Warnings {
    seen: DashSet<String>,
}

impl Warnings {
    /// Create an empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Forward `message` to the sink unless it was already emitted.
    pub fn warn_once(&self, sink: &dyn Fn(&str), message: &str) {
        if self.seen.insert(message.to_string()) {
            sink(message);
        }
    }
}
