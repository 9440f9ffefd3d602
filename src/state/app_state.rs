//! Main application state management

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    countdown::{Clock, SystemClock},
    display::{BannerView, CountdownBanner},
    sections::HomeSection,
};

/// Outcome of applying a fresh list of sections to the mounted banners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub mounted: usize,
    pub kept: usize,
    pub unmounted: usize,
}

/// Main application state that owns every mounted banner
pub struct AppState {
    /// Mounted banners, in the order the source lists the sections
    pub banners: Arc<Mutex<Vec<CountdownBanner>>>,
    /// Clock every countdown samples
    pub clock: Arc<dyn Clock>,
    /// Refresh configuration
    pub refresh_interval_secs: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last refresh tracking
    pub last_refresh: Arc<Mutex<Option<DateTime<Utc>>>>,
    pub last_refresh_error: Arc<Mutex<Option<String>>>,
}

impl AppState {
    /// Create a new AppState with no banners, using the system clock
    pub fn new(port: u16, host: String, refresh_interval_secs: u64) -> Self {
        Self::with_clock(port, host, refresh_interval_secs, Arc::new(SystemClock))
    }

    /// Create a new AppState whose countdowns sample `clock`
    pub fn with_clock(port: u16, host: String, refresh_interval_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            banners: Arc::new(Mutex::new(Vec::new())),
            clock,
            refresh_interval_secs,
            start_time: Instant::now(),
            port,
            host,
            last_refresh: Arc::new(Mutex::new(None)),
            last_refresh_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Current instant according to the state's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Replace the mounted banners with the given sections.
    ///
    /// Unchanged sections keep their running countdown. Changed sections are
    /// remounted and sections that disappeared are unmounted, which releases
    /// their timers. Must be called from within a tokio runtime.
    pub fn apply_sections(&self, sections: Vec<HomeSection>) -> Result<ReconcileSummary, String> {
        let mut banners = self.banners.lock()
            .map_err(|e| format!("Failed to lock banners: {}", e))?;

        let mut previous: HashMap<String, CountdownBanner> = banners
            .drain(..)
            .map(|banner| (banner.section().id.clone(), banner))
            .collect();

        let mut summary = ReconcileSummary::default();
        for section in sections {
            match previous.remove(&section.id) {
                Some(banner) if banner.section() == &section => {
                    summary.kept += 1;
                    banners.push(banner);
                }
                stale => {
                    if let Some(stale) = stale {
                        debug!("Section '{}' changed, remounting banner", section.id);
                        stale.unmount();
                    }
                    summary.mounted += 1;
                    banners.push(CountdownBanner::mount_with_clock(section, Arc::clone(&self.clock)));
                }
            }
        }

        for (id, banner) in previous {
            debug!("Section '{}' removed, unmounting banner", id);
            banner.unmount();
            summary.unmounted += 1;
        }
        drop(banners);

        if let Ok(mut last_refresh) = self.last_refresh.lock() {
            *last_refresh = Some(Utc::now());
        }
        if let Ok(mut last_error) = self.last_refresh_error.lock() {
            *last_error = None;
        }

        if summary.mounted > 0 || summary.unmounted > 0 {
            info!(
                "Sections updated: {} mounted, {} kept, {} unmounted",
                summary.mounted, summary.kept, summary.unmounted
            );
        }
        Ok(summary)
    }

    /// Remember why the last refresh failed. Mounted banners are left as they are.
    pub fn record_refresh_error(&self, error: String) {
        warn!("Section refresh failed: {}", error);
        if let Ok(mut last_error) = self.last_refresh_error.lock() {
            *last_error = Some(error);
        }
    }

    /// Render every mounted banner
    pub fn render_banners(&self) -> Result<Vec<BannerView>, String> {
        self.banners.lock()
            .map(|banners| banners.iter().map(CountdownBanner::render).collect())
            .map_err(|e| format!("Failed to lock banners: {}", e))
    }

    /// Render the banner of one section
    pub fn render_banner(&self, id: &str) -> Result<Option<BannerView>, String> {
        self.banners.lock()
            .map(|banners| {
                banners
                    .iter()
                    .find(|banner| banner.section().id == id)
                    .map(CountdownBanner::render)
            })
            .map_err(|e| format!("Failed to lock banners: {}", e))
    }

    /// Number of mounted banners
    pub fn section_count(&self) -> Result<usize, String> {
        self.banners.lock()
            .map(|banners| banners.len())
            .map_err(|e| format!("Failed to lock banners: {}", e))
    }

    /// Number of countdowns whose session is still ticking
    pub fn live_countdowns(&self) -> Result<usize, String> {
        self.banners.lock()
            .map(|banners| {
                banners
                    .iter()
                    .filter_map(CountdownBanner::countdown)
                    .filter(|countdown| countdown.is_live())
                    .count()
            })
            .map_err(|e| format!("Failed to lock banners: {}", e))
    }

    /// Unmount every banner, releasing all timers
    pub fn unmount_all(&self) -> Result<(), String> {
        let mut banners = self.banners.lock()
            .map_err(|e| format!("Failed to lock banners: {}", e))?;

        for banner in banners.drain(..) {
            banner.unmount();
        }
        info!("All banners unmounted");
        Ok(())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;
        
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last refresh information
    pub fn get_last_refresh(&self) -> (Option<DateTime<Utc>>, Option<String>) {
        let last_refresh = self.last_refresh.lock().ok().and_then(|t| *t);
        let last_error = self.last_refresh_error.lock().ok().and_then(|e| e.clone());
        (last_refresh, last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::clock::RuntimeClock;
    use chrono::TimeZone;
    use serde_json::json;

    fn state() -> AppState {
        let wall = Utc.with_ymd_and_hms(2024, 12, 20, 10, 0, 0).unwrap();
        AppState::with_clock(0, "127.0.0.1".to_string(), 10, Arc::new(RuntimeClock::starting_at(wall)))
    }

    fn section(id: &str, end: &str) -> HomeSection {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Section {}", id),
            "showCountdown": true,
            "countdownEndDate": end
        }))
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn reconciles_mounted_banners() {
        let state = state();

        let first = state
            .apply_sections(vec![
                section("a", "2024-12-25T00:00:00Z"),
                section("b", "2024-12-31T00:00:00Z"),
            ])
            .unwrap();
        assert_eq!(first, ReconcileSummary { mounted: 2, kept: 0, unmounted: 0 });
        assert_eq!(state.live_countdowns().unwrap(), 2);

        let second = state
            .apply_sections(vec![
                section("b", "2025-01-01T00:00:00Z"),
                section("a", "2024-12-25T00:00:00Z"),
                section("c", "2024-12-26T00:00:00Z"),
            ])
            .unwrap();
        assert_eq!(second, ReconcileSummary { mounted: 2, kept: 1, unmounted: 0 });

        let ids: Vec<String> = state.render_banners().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let third = state.apply_sections(vec![section("c", "2024-12-26T00:00:00Z")]).unwrap();
        assert_eq!(third, ReconcileSummary { mounted: 0, kept: 1, unmounted: 2 });
        assert_eq!(state.section_count().unwrap(), 1);
        assert!(state.render_banner("a").unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_error_is_cleared_by_next_success() {
        let state = state();
        state.record_refresh_error("connection refused".to_string());
        assert_eq!(state.get_last_refresh().1.as_deref(), Some("connection refused"));

        state.apply_sections(Vec::new()).unwrap();
        let (last_refresh, last_error) = state.get_last_refresh();
        assert!(last_refresh.is_some());
        assert!(last_error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_all_releases_timers() {
        let state = state();
        state.apply_sections(vec![section("a", "2025-01-01T00:00:00Z")]).unwrap();
        state.unmount_all().unwrap();
        assert_eq!(state.section_count().unwrap(), 0);
        assert_eq!(state.live_countdowns().unwrap(), 0);
    }
}
