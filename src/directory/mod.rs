//! Hero directory subsystem.
//!
//! # Data Flow
//! ```text
//! CLI filter flags
//!     → filter.rs (ClassFilter, SearchFilters)
//!     → client.rs (GraphQL variables, paginated POSTs)
//!     → types.rs (Hero records)
//!     → catalog.rs (names for terminal output)
//! ```

pub mod catalog;
pub mod client;
pub mod filter;
pub mod types;

pub use catalog::HeroSummary;
pub use client::{DirectoryClient, DirectoryError, HeroQueryVariables};
pub use filter::{ClassFilter, SearchFilters};
pub use types::{Hero, Profession, Realm};
