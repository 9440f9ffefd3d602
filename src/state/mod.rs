//! State management module
//! 
//! This module contains the shared service state: the mounted banners and
//! the bookkeeping of the section refresh loop.

pub mod app_state;

// Re-export main types
pub use app_state::{AppState, ReconcileSummary};
