//! Background Tasks Module
//!
//! Work the server starts and forgets.
//!
//! # Tasks
//! - Silent refresh: re-fetches a stale catalog without touching the loading flag

mod refresh;

pub use refresh::spawn_silent_refresh;
