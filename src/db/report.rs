use std::fmt::{Display, Formatter};
use chrono::{DateTime, Local};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Enums,
    Tables,
    Constraints,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Enums, Phase::Tables, Phase::Constraints];
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Enums => "enums",
            Phase::Tables => "tables",
            Phase::Constraints => "constraints",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub phase: Phase,
    pub subject: String,
    pub outcome: Outcome,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome of every provisioning item, in the order they were attempted.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub items: Vec<ItemReport>,
}

impl RunReport {
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            items: Vec::new(),
        }
    }

    pub fn record(&mut self, phase: Phase, subject: impl Into<String>, outcome: Outcome) {
        self.items.push(ItemReport {
            phase,
            subject: subject.into(),
            outcome,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter()
            .filter(|item| matches!(item.outcome, Outcome::Failed(_)))
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn tally(&self, phase: Phase) -> Tally {
        let mut out = Tally::default();
        for item in self.items.iter().filter(|item| item.phase == phase) {
            match item.outcome {
                Outcome::Applied => out.applied += 1,
                Outcome::Skipped(_) => out.skipped += 1,
                Outcome::Failed(_) => out.failed += 1,
            }
        }
        out
    }

    pub fn log_summary(&self) {
        for phase in Phase::ALL {
            let tally = self.tally(phase);
            info!(%phase, applied = tally.applied, skipped = tally.skipped, failed = tally.failed, "phase summary");
        }

        for item in self.failures() {
            if let Outcome::Failed(error) = &item.outcome {
                warn!(phase = %item.phase, subject = %item.subject, "failed: {error}");
            }
        }

        let elapsed = self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds())
            .unwrap_or_default();
        if self.is_success() {
            info!(elapsed_ms = elapsed, "provisioning completed");
        } else {
            warn!(elapsed_ms = elapsed, "provisioning completed with failures");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tallies_per_phase() {
        let mut report = RunReport::start();
        report.record(Phase::Enums, "Role", Outcome::Applied);
        report.record(Phase::Tables, "users", Outcome::Failed("boom".to_owned()));
        report.record(Phase::Tables, "links", Outcome::Skipped("no columns".to_owned()));
        report.record(Phase::Tables, "posts", Outcome::Applied);
        report.finish();

        assert_eq!(report.tally(Phase::Enums), Tally { applied: 1, skipped: 0, failed: 0 });
        assert_eq!(report.tally(Phase::Tables), Tally { applied: 1, skipped: 1, failed: 1 });
        assert_eq!(report.tally(Phase::Constraints), Tally::default());
        assert!(!report.is_success());
        assert_eq!(report.failures().map(|item| item.subject.as_str()).collect::<Vec<_>>(), vec!["users"]);
        assert!(report.finished_at.is_some());
    }
}
