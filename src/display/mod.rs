//! Countdown display module
//! 
//! This module contains the display consumers of the countdown engine. Each
//! display owns its own live session and cancels it when torn down.

pub mod banner;
pub mod countdown_timer;
pub mod offers;

// Re-export main types
pub use banner::{BannerView, CountdownBanner};
pub use countdown_timer::{CountdownProps, CountdownTimer, CountdownView, MountOptions, UnitLabels, UnitView};
pub use offers::{
    render_festival_offers, FestivalHero, FestivalHeroView, FestivalOffer, FestivalOffersView, OfferBanner,
    OfferBannerView,
};
