//! Interactive session state.
//!
//! # Data Flow
//! ```text
//! search(passphrase, filters)
//!     → vault unlock → owner address → directory search → results
//! select / deselect / toggle / select_all_toggle
//!     → SelectionSet (insertion order, survives later searches)
//! start_bridge(passphrase)
//!     → snapshot selection → spawned BridgeOrchestrator::run
//!     → BridgeEvent channel → drain_events / next_event → selection updates
//! ```
//!
//! The background run never touches the selection; only the session
//! applies `Removed` events, when it drains the channel.

pub mod selection;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinHandle};
use zeroize::Zeroizing;

use crate::blockchain::{BlockchainError, Wallet};
use crate::bridge::{BridgeEvent, BridgeOrchestrator, RunSummary};
use crate::config::{BridgeConfig, VaultConfig};
use crate::directory::{DirectoryClient, DirectoryError, Hero, SearchFilters};
use crate::vault::{KeyVault, VaultError};

pub use selection::SelectionSet;

/// Errors surfaced to the user by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to decrypt private key: {0}")]
    Vault(#[from] VaultError),

    #[error("Invalid private key: {0}")]
    Wallet(#[from] BlockchainError),

    #[error("A bridge run is already in progress")]
    RunInProgress,

    #[error("No heroes selected")]
    EmptySelection,

    #[error("Hero {0} is not in the current results")]
    NotInResults(u64),

    #[error("Directory client setup failed: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Network setup failed: {0}")]
    Network(BlockchainError),

    #[error("Key unlock task failed: {0}")]
    UnlockTask(#[from] JoinError),
}

/// Clears the run flag when the bridge task ends, including by panic.
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owner of the selection and of the bridge event channel.
pub struct Session {
    vault: VaultConfig,
    directory: DirectoryClient,
    orchestrator: Arc<BridgeOrchestrator>,
    results: Vec<Hero>,
    selection: SelectionSet,
    events_tx: UnboundedSender<BridgeEvent>,
    events_rx: UnboundedReceiver<BridgeEvent>,
    running: Arc<AtomicBool>,
}

impl Session {
    pub fn new(
        vault: VaultConfig,
        directory: DirectoryClient,
        orchestrator: Arc<BridgeOrchestrator>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            vault,
            directory,
            orchestrator,
            results: Vec::new(),
            selection: SelectionSet::new(),
            events_tx,
            events_rx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Result<Self, SessionError> {
        let directory = DirectoryClient::new(&config.directory)?;
        let orchestrator = BridgeOrchestrator::from_config(config).map_err(SessionError::Network)?;
        Ok(Self::new(config.vault.clone(), directory, Arc::new(orchestrator)))
    }

    pub fn orchestrator(&self) -> &BridgeOrchestrator {
        &self.orchestrator
    }

    /// Results of the most recent search.
    pub fn results(&self) -> &[Hero] {
        &self.results
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_bridging(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Key derivation is CPU bound; it runs on the blocking pool.
    async fn unlock_wallet(&self, passphrase: &str) -> Result<Wallet, SessionError> {
        let vault = self.vault.clone();
        let passphrase = Zeroizing::new(passphrase.to_string());
        let key = tokio::task::spawn_blocking(move || {
            KeyVault::from_config(&vault)?.unlock(&passphrase)
        })
        .await??;
        Ok(Wallet::from_private_key(key.expose_secret())?)
    }

    /// Search heroes owned by the key's address. Replaces the previous
    /// results; the selection is left alone.
    pub async fn search(
        &mut self,
        passphrase: &str,
        filters: &SearchFilters,
    ) -> Result<&[Hero], SessionError> {
        let owner = self.unlock_wallet(passphrase).await?.address();

        self.results = self.directory.search(owner, filters).await;
        tracing::info!(owner = %owner, total = self.results.len(), "Total heroes found: {}", self.results.len());
        Ok(&self.results)
    }

    fn find_result(&self, hero_id: u64) -> Result<&Hero, SessionError> {
        self.results
            .iter()
            .find(|h| h.id == hero_id)
            .ok_or(SessionError::NotInResults(hero_id))
    }

    /// Mark a hero from the current results. Returns false if it was already selected.
    pub fn select(&mut self, hero_id: u64) -> Result<bool, SessionError> {
        let hero = self.find_result(hero_id)?.clone();
        Ok(self.selection.insert(hero))
    }

    pub fn deselect(&mut self, hero_id: u64) -> bool {
        self.selection.remove(hero_id).is_some()
    }

    /// Flip a hero's selection. Selected heroes from older searches can
    /// always be deselected.
    pub fn toggle(&mut self, hero_id: u64) -> Result<bool, SessionError> {
        if self.selection.remove(hero_id).is_some() {
            return Ok(false);
        }
        self.select(hero_id)
    }

    /// Select every current result, or clear them all if they already are.
    /// Returns true when the results end up selected.
    pub fn select_all_toggle(&mut self) -> bool {
        let all_selected = !self.results.is_empty()
            && self.results.iter().all(|h| self.selection.contains(h.id));

        if all_selected {
            for hero in &self.results {
                self.selection.remove(hero.id);
            }
            false
        } else {
            for hero in &self.results {
                self.selection.insert(hero.clone());
            }
            true
        }
    }

    /// Snapshot the selection and bridge it on a background task.
    ///
    /// Refused while another run is active. The selection is only changed
    /// later, as `Removed` events are drained.
    pub async fn start_bridge(&mut self, passphrase: &str) -> Result<JoinHandle<RunSummary>, SessionError> {
        if self.is_bridging() {
            return Err(SessionError::RunInProgress);
        }
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let wallet = self.unlock_wallet(passphrase).await?;
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SessionError::RunInProgress);
        }

        let snapshot = self.selection.snapshot();
        tracing::info!(heroes = snapshot.len(), "Starting bridge run");

        let guard = RunGuard(self.running.clone());
        let orchestrator = self.orchestrator.clone();
        let events = self.events_tx.clone();
        Ok(tokio::spawn(async move {
            let _guard = guard;
            orchestrator.run(snapshot, &wallet, events).await
        }))
    }

    fn apply(&mut self, event: &BridgeEvent) {
        if let BridgeEvent::Removed(hero_id) = event {
            self.selection.remove(*hero_id);
        }
    }

    /// Apply and return every event already queued.
    pub fn drain_events(&mut self) -> Vec<BridgeEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(&event);
            drained.push(event);
        }
        drained
    }

    /// Wait for the next event and apply it. Cancel safe.
    pub async fn next_event(&mut self) -> Option<BridgeEvent> {
        let event = self.events_rx.recv().await?;
        self.apply(&event);
        Some(event)
    }
}
