//! Outcome summary of one broadcast.

/// What happened during a single [`Registry::broadcast`](crate::Registry::broadcast).
///
/// Purely informational: the registry surfaces no errors, and callers that do
/// not care may ignore the report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Entries whose `receive` returned normally.
    pub delivered: usize,
    /// Entries skipped because their subscriber had been dropped.
    pub dropped: usize,
    /// Names of subscribers whose `receive` panicked, in delivery order.
    pub panicked: Vec<&'static str>,
    /// True if the broadcast stopped early under `FailurePolicy::Abort`.
    pub aborted: bool,
}

impl BroadcastReport {
    /// Number of `receive` calls made (returned or panicked).
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.panicked.len()
    }

    /// True if every live entry received the message without panicking.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.panicked.is_empty() && !self.aborted
    }
}
