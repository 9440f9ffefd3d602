//! Countdown engine
//! 
//! This module contains the remaining-time computation and the live session
//! that keeps a countdown display current.

pub mod breakdown;
pub mod clock;
pub mod session;

// Re-export main types
pub use breakdown::{compute, Breakdown};
pub use clock::{Clock, SystemClock};
pub use session::{run_live_session, run_live_session_with_clock, SessionHandle, TICK_PERIOD};
