//! Refresh statistics

/// Counters from one source's pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Lines pulled from the feed, parseable or not
    pub total_lines: u64,

    /// Lines that produced a record
    pub parsed: u64,

    /// Lines rejected with a classified parse error
    pub rejected: u64,

    /// Records accepted by the store
    pub inserted: u64,
}

/// What happened to one source during a refresh cycle.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// Stored metadata still valid; nothing fetched
    Fresh,

    /// Pipeline ran to completion
    Refreshed(RunStats),

    /// Refresh aborted; the source stays stale and is retried next cycle
    Failed(String),
}

/// Per-source outcomes for one full refresh cycle.
#[derive(Debug, Default)]
pub struct RefreshSummary {
    /// (source name, outcome), in refresh order
    pub outcomes: Vec<(String, RefreshOutcome)>,
}

impl RefreshSummary {
    /// Sources whose pipeline ran to completion.
    pub fn refreshed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, RefreshOutcome::Refreshed(_)))
            .count()
    }

    /// Sources whose refresh aborted.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, RefreshOutcome::Failed(_)))
            .count()
    }

    /// Sources skipped because their data was still valid.
    pub fn fresh(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, RefreshOutcome::Fresh))
            .count()
    }
}
