//! Read-only home-section source

use std::path::PathBuf;
use anyhow::Context;
use tracing::debug;

use super::HomeSection;

/// Where the home-section configuration is read from
#[derive(Debug, Clone)]
pub enum SectionSource {
    /// Public sections endpoint of the storefront API
    Http { url: String },
    /// Local JSON file holding the same array the endpoint serves
    File { path: PathBuf },
}

impl SectionSource {
    /// Load the current list of home sections.
    ///
    /// No validation or retry happens here; the caller decides what to do
    /// with a failed load.
    pub async fn load(&self, client: &reqwest::Client) -> anyhow::Result<Vec<HomeSection>> {
        match self {
            SectionSource::Http { url } => {
                debug!("Fetching home sections from {}", url);
                let sections = client
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("Failed to request {}", url))?
                    .error_for_status()
                    .with_context(|| format!("{} returned an error status", url))?
                    .json::<Vec<HomeSection>>()
                    .await
                    .with_context(|| format!("Failed to decode home sections from {}", url))?;
                Ok(sections)
            }
            SectionSource::File { path } => {
                debug!("Reading home sections from {}", path.display());
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                parse_sections(&raw)
                    .with_context(|| format!("Failed to decode home sections from {}", path.display()))
            }
        }
    }

    /// Human readable description for logs
    pub fn describe(&self) -> String {
        match self {
            SectionSource::Http { url } => url.clone(),
            SectionSource::File { path } => path.display().to_string(),
        }
    }
}

/// Decode the JSON array of home sections
pub fn parse_sections(raw: &str) -> anyhow::Result<Vec<HomeSection>> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn loads_sections_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"1","title":"Akshaya Tritiya","showCountdown":true,"countdownEndDate":"2030-05-01T00:00:00Z"}},
               {{"id":"2","title":"New Arrivals","layoutType":"grid"}}]"#
        )
        .unwrap();

        let source = SectionSource::File { path: file.path().to_path_buf() };
        let sections = source.load(&reqwest::Client::new()).await.unwrap();

        assert_eq!(sections.len(), 2);
        assert!(sections[0].countdown_target().is_some());
        assert_eq!(sections[1].layout_type, "grid");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = SectionSource::File {
            path: PathBuf::from("/nonexistent/festival-countdown/sections.json"),
        };
        let err = source.load(&reqwest::Client::new()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(parse_sections(r#"{"id":"1"}"#).is_err());
    }
}
