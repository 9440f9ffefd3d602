//! Festival countdown banner for a home section

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::countdown_timer::{CountdownProps, CountdownTimer, CountdownView, MountOptions};
use crate::{
    countdown::{Clock, SystemClock},
    sections::HomeSection,
};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#2a1810";
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// Rendered banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub layout_type: String,
    pub festival_image: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub countdown_start_date: Option<DateTime<Utc>>,
    pub countdown: Option<CountdownView>,
}

/// Banner built from a home section. Mounts a countdown timer only when the
/// section asks for one and carries a valid end date.
#[derive(Debug)]
pub struct CountdownBanner {
    section: HomeSection,
    countdown: Option<CountdownTimer>,
}

impl CountdownBanner {
    pub fn mount(section: HomeSection) -> Self {
        Self::mount_with_clock(section, Arc::new(SystemClock))
    }

    pub fn mount_with_clock(section: HomeSection, clock: Arc<dyn Clock>) -> Self {
        let countdown = section.countdown_target().map(|target| {
            let props = CountdownProps {
                title: section.countdown_title.clone(),
                description: section.countdown_description.clone(),
                ..CountdownProps::default()
            };

            let title = section.title.clone();
            CountdownTimer::mount_with(
                target,
                props,
                MountOptions {
                    clock,
                    on_expire: Some(Box::new(move || {
                        info!("Festival countdown for '{}' has ended", title);
                    })),
                },
            )
        });

        Self { section, countdown }
    }

    pub fn section(&self) -> &HomeSection {
        &self.section
    }

    pub fn countdown(&self) -> Option<&CountdownTimer> {
        self.countdown.as_ref()
    }

    /// Test id of the banner: `countdown-banner-` followed by the title in
    /// lowercase with whitespace runs collapsed into `-`
    pub fn slug(&self) -> String {
        let mut slug = String::from("countdown-banner-");
        let mut in_whitespace = false;
        for c in self.section.title.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    slug.push('-');
                }
                in_whitespace = true;
            } else {
                slug.extend(c.to_lowercase());
                in_whitespace = false;
            }
        }
        slug
    }

    /// Tear the banner down, releasing its countdown timer
    pub fn unmount(&self) {
        if let Some(countdown) = &self.countdown {
            countdown.unmount();
        }
    }

    pub fn render(&self) -> BannerView {
        let section = &self.section;
        BannerView {
            id: section.id.clone(),
            slug: self.slug(),
            title: section.title.clone(),
            subtitle: section.subtitle.clone(),
            description: section.description.clone(),
            layout_type: section.layout_type.clone(),
            festival_image: section.festival_image.clone(),
            background_color: section
                .background_color
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
            text_color: section
                .text_color
                .clone()
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            countdown_start_date: section.countdown_start_date,
            countdown: self.countdown.as_ref().map(CountdownTimer::render),
        }
    }
}
