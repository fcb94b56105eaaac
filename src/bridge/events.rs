//! Messages from a bridge run to whoever owns the selection.

use alloy::primitives::TxHash;
use uuid::Uuid;

use crate::bridge::error::BridgeFailure;

/// Per-hero progress within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroState {
    Pending,
    Submitting,
    AwaitingReceipt,
    Confirmed,
    Failed,
}

/// Terminal result for one hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroOutcome {
    pub hero_id: u64,
    pub network: String,
    pub result: Result<TxHash, BridgeFailure>,
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub confirmed: usize,
    pub failed: usize,
}

/// Events emitted by the orchestrator, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Human-readable progress line.
    Log(String),
    StateChanged { hero_id: u64, state: HeroState },
    /// The hero was bridged and should leave the selection.
    Removed(u64),
    Outcome(HeroOutcome),
    Finished(RunSummary),
}
