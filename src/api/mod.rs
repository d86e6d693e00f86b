//! # API Module
//!
//! HTTP endpoints of the trigger server. An external timer or HTTP event hits
//! [`trigger`] once a day instead of running the CLI.
//!
//! - [`health`] - Status and version for monitoring
//! - [`trigger`] - Runs the daily sync and returns its outcome as JSON
//!
//! ```rust,ignore
//! use kaiheartradio::server::router;
//!
//! let app = router(shared_sync);
//! ```

mod health;
mod trigger;

pub use health::health;
pub use trigger::trigger;
