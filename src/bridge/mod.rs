//! Cross-chain hero transfer workflow.
//!
//! # Data Flow
//! ```text
//! Selection snapshot + Wallet
//!     → route.rs (network tag → contract, chain ids, fee)
//!     → orchestrator.rs (sequential per-hero run)
//!     → ChainGateway (nonce, sign, submit, receipt)
//!     → events.rs (BridgeEvent stream back to the session)
//! ```

pub mod error;
pub mod events;
pub mod orchestrator;
pub mod route;

pub use error::BridgeFailure;
pub use events::{BridgeEvent, HeroOutcome, HeroState, RunSummary};
pub use orchestrator::{BridgeOrchestrator, INTER_HERO_DELAY};
pub use route::{Route, RouteTable};
