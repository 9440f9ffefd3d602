//! Festival Countdown - live countdowns for storefront festival banners
//! 
//! This library provides the countdown engine (remaining-time breakdown and
//! cancellable live sessions), the banner displays that consume it, and a
//! small HTTP service that keeps banners in sync with the storefront's home
//! section configuration.

pub mod config;
pub mod countdown;
pub mod display;
pub mod sections;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use countdown::{compute, run_live_session, Breakdown, SessionHandle};
pub use display::{CountdownBanner, CountdownTimer};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
