//! Home-section refresh background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::{
    sections::SectionSource,
    state::{AppState, ReconcileSummary},
};

/// Load the sections once and apply them to the mounted banners.
///
/// A failed load is recorded on the state and the previous banners stay
/// mounted.
pub async fn refresh_once(
    state: &AppState,
    source: &SectionSource,
    client: &reqwest::Client,
) -> Option<ReconcileSummary> {
    match source.load(client).await {
        Ok(sections) => match state.apply_sections(sections) {
            Ok(summary) => Some(summary),
            Err(e) => {
                state.record_refresh_error(format!("Failed to apply sections: {}", e));
                None
            }
        },
        Err(e) => {
            state.record_refresh_error(format!("{:#}", e));
            None
        }
    }
}

/// Background task that polls the section source and keeps banners in sync
pub async fn section_refresh_task(state: Arc<AppState>, source: SectionSource) {
    info!(
        "Starting section refresh task for {} every {}s",
        source.describe(),
        state.refresh_interval_secs
    );

    let client = reqwest::Client::new();
    let mut interval = interval(Duration::from_secs(state.refresh_interval_secs.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        refresh_once(&state, &source, &client).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOLI: &str =
        r#"[{"id":"holi","title":"Holi","showCountdown":true,"countdownEndDate":"2099-03-01T00:00:00Z"}]"#;

    #[tokio::test]
    async fn failed_load_keeps_banners_and_records_error() {
        let state = AppState::new(0, "127.0.0.1".to_string(), 10);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sections.json");
        std::fs::write(&path, HOLI).unwrap();

        let client = reqwest::Client::new();
        let source = SectionSource::File { path: path.clone() };
        let summary = refresh_once(&state, &source, &client).await.unwrap();
        assert_eq!(summary.mounted, 1);

        std::fs::remove_file(&path).unwrap();
        assert!(refresh_once(&state, &source, &client).await.is_none());

        assert_eq!(state.section_count().unwrap(), 1);
        let (_, last_error) = state.get_last_refresh();
        assert!(last_error.unwrap().contains("Failed to read"));

        state.unmount_all().unwrap();
    }

    #[tokio::test]
    async fn failed_apply_is_recorded() {
        let state = AppState::new(0, "127.0.0.1".to_string(), 10);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sections.json");
        std::fs::write(&path, HOLI).unwrap();

        // Poison the banner lock
        let banners = Arc::clone(&state.banners);
        let _ = std::thread::spawn(move || {
            let _guard = banners.lock().unwrap();
            panic!("poison banners");
        })
        .join();

        let client = reqwest::Client::new();
        let source = SectionSource::File { path };
        assert!(refresh_once(&state, &source, &client).await.is_none());

        let (last_refresh, last_error) = state.get_last_refresh();
        assert!(last_refresh.is_none());
        assert!(last_error.unwrap().contains("Failed to apply sections"));
    }
}
