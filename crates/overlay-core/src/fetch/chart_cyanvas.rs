//! Chart Cyanvas adapter.
//!
//! The chart endpoint nests the payload under a `chart` key and sends the
//! credit as one combined `composer / vocalist` string, which is split here
//! so downstream code never sees the combined form.

use serde::Deserialize;

use super::resolve_url;
use crate::chart::{Chart, Credits, EngineInfo};
use crate::error::{FetchStage, Result};
use crate::network::HttpClient;
use crate::source::ChartSource;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartPayload,
}

#[derive(Debug, Deserialize)]
struct ChartPayload {
    title: String,
    /// Combined credit string, usually `composer / vocalist`.
    #[serde(alias = "composer")]
    artists: String,
    author: String,
    rating: i32,
    cover: String,
    #[serde(default)]
    background: Option<String>,
    data: String,
    engine: EnginePayload,
}

#[derive(Debug, Deserialize)]
struct EnginePayload {
    version: u32,
}

pub(super) fn fetch_chart(
    client: &HttpClient,
    source: &ChartSource,
    identifier: &str,
) -> Result<Chart> {
    let url = format!("{}/api/charts/{}", source.host, identifier);
    let response: ChartResponse = client.get_json(&url, FetchStage::Metadata)?;
    let payload = response.chart;

    let credits = Credits::from_combined(&payload.artists);
    Ok(Chart {
        id: identifier.to_string(),
        title: payload.title,
        artists: payload.artists,
        credits,
        author: payload.author,
        rating: payload.rating,
        engine: EngineInfo {
            version: payload.engine.version,
        },
        cover_url: resolve_url(source.host, &payload.cover),
        background_url: payload
            .background
            .map(|background| resolve_url(source.host, &background)),
        data_url: resolve_url(source.host, &payload.data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let json = r#"{
            "chart": {
                "title": "Test Song",
                "artists": "Composer / Vocalist",
                "author": "charter",
                "rating": 32,
                "cover": "/uploads/cover.png",
                "background": "/uploads/bg.png",
                "data": "/uploads/data.gz",
                "engine": { "version": 12 }
            }
        }"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.chart.title, "Test Song");
        assert_eq!(response.chart.engine.version, 12);
        assert_eq!(response.chart.background.as_deref(), Some("/uploads/bg.png"));
    }

    #[test]
    fn test_payload_without_background() {
        let json = r#"{
            "chart": {
                "title": "T",
                "artists": "A",
                "author": "B",
                "rating": 5,
                "cover": "/c.png",
                "data": "/d.gz",
                "engine": { "version": 11 }
            }
        }"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(response.chart.background.is_none());
    }
}
