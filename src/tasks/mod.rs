//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod section_refresh;

// Re-export main functions
pub use section_refresh::{refresh_once, section_refresh_task};
