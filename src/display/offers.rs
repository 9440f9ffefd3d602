//! Festival offer banners, offer cards and the festival hero

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::{compute, Breakdown};

/// Heading of the offer card grid
pub const FESTIVAL_OFFERS_HEADING: &str = "Festival Offers";
/// Badge on highlighted offer cards
pub const BEST_OFFER_BADGE: &str = "BEST OFFER";

/// `Valid until November 1, 2024`
fn valid_until_label(valid_until: DateTime<Utc>) -> String {
    format!("Valid until {}", valid_until.format("%B %-d, %Y"))
}

/// Validity of an offer at `now`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub valid_until: DateTime<Utc>,
    pub label: String,
    pub remaining: Breakdown,
    pub expired: bool,
}

impl Validity {
    fn at(now: DateTime<Utc>, valid_until: DateTime<Utc>) -> Self {
        let remaining = compute(now, valid_until);
        Self {
            valid_until,
            label: valid_until_label(valid_until),
            remaining,
            expired: remaining.is_zero(),
        }
    }
}

/// Single promotional offer banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferBanner {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub discount_percent: Option<u32>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub festival_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferBannerView {
    pub title: String,
    pub description: String,
    pub festival_name: Option<String>,
    pub discount_label: Option<String>,
    pub validity: Option<Validity>,
}

impl OfferBanner {
    pub fn render(&self, now: DateTime<Utc>) -> OfferBannerView {
        OfferBannerView {
            title: self.title.clone(),
            description: self.description.clone(),
            festival_name: self.festival_name.clone(),
            // A zero discount shows no badge
            discount_label: self
                .discount_percent
                .filter(|percent| *percent > 0)
                .map(|percent| format!("{}% OFF", percent)),
            validity: self.valid_until.map(|valid_until| Validity::at(now, valid_until)),
        }
    }
}

/// One card of the festival offers grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalOffer {
    pub title: String,
    pub description: String,
    pub discount: String,
    #[serde(default)]
    pub conditions: Option<String>,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferCardView {
    pub title: String,
    pub description: String,
    pub discount: String,
    pub badge: Option<String>,
    pub conditions: Option<String>,
    pub highlight: bool,
    pub validity: Validity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FestivalOffersView {
    pub heading: String,
    pub offers: Vec<OfferCardView>,
}

/// Render the offer card grid in the order given
pub fn render_festival_offers(offers: &[FestivalOffer], now: DateTime<Utc>) -> FestivalOffersView {
    let offers = offers
        .iter()
        .map(|offer| OfferCardView {
            title: offer.title.clone(),
            description: offer.description.clone(),
            discount: offer.discount.clone(),
            badge: offer.highlight.then(|| BEST_OFFER_BADGE.to_string()),
            conditions: offer.conditions.as_ref().map(|conditions| format!("*{}", conditions)),
            highlight: offer.highlight,
            validity: Validity::at(now, offer.valid_until),
        })
        .collect();

    FestivalOffersView {
        heading: FESTIVAL_OFFERS_HEADING.to_string(),
        offers,
    }
}

/// Full-width festival hero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalHero {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    pub festival_name: String,
    #[serde(default)]
    pub special_offer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FestivalHeroView {
    pub badge: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub special_offer: Option<String>,
}

impl FestivalHero {
    pub fn render(&self) -> FestivalHeroView {
        FestivalHeroView {
            badge: format!("{} Special", self.festival_name),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            background_image: self.background_image.clone(),
            special_offer: self.special_offer.clone(),
        }
    }
}
