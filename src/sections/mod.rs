//! Home-section configuration module
//! 
//! This module contains the home-section record consumed by the banners and
//! the read-only source it is loaded from.

pub mod model;
pub mod source;

// Re-export main types
pub use model::HomeSection;
pub use source::SectionSource;
