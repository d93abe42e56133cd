//! # lemon.markets Client
//!
//! An async Rust client library for the lemon.markets brokerage REST API.
//!
//! ## Features
//!
//! - Account-wide state and balance
//! - Trading spaces with their balance and cash to invest
//! - Automatic pagination of collections
//! - Transient failure retries and request tracing
//!
//! Every read of a live figure refetches it; nothing is served stale. The last
//! successfully fetched values stay available through the `cached_*` accessors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lemon_markets_client::{Account, RestClient, State};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let account = Account::with_token("my_access_token");
//!     let mut state = State::new(RestClient::new(), account);
//!
//!     println!("Balance: {}", state.balance().await?);
//!     for space in state.spaces().await? {
//!         println!("{} [{}]", space.name(), space.space_type());
//!     }
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod auth;
pub mod error;
pub mod rest;
pub mod space;
pub mod state;
pub mod types;

// Re-export commonly used types at crate root
pub use account::Account;
pub use error::{ApiError, LemonError};
pub use rest::RestClient;
pub use space::{Space, SpaceType};
pub use state::State;

/// Result type alias using LemonError
pub type Result<T> = std::result::Result<T, LemonError>;
