//! Home-section configuration record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One homepage section as served by the storefront's public sections endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub layout_type: String,
    #[serde(default)]
    pub show_countdown: bool,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub countdown_start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub countdown_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub countdown_title: Option<String>,
    #[serde(default)]
    pub countdown_description: Option<String>,
    #[serde(default)]
    pub festival_image: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

impl HomeSection {
    /// Target instant of the section's countdown, if it should show one
    pub fn countdown_target(&self) -> Option<DateTime<Utc>> {
        if self.show_countdown {
            self.countdown_end_date
        } else {
            None
        }
    }
}

/// Parse an optional RFC 3339 instant, treating anything unparseable as absent
fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match raw {
        Some(serde_json::Value::String(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|e| tracing::warn!("Ignoring unparseable countdown date {:?}: {}", text, e))
            .ok(),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!("Ignoring non-string countdown date: {}", other);
            None
        }
    };
    Ok(parsed)
}
