//! Sekai Viewer adapter.
//!
//! This host speaks the Sonolus level API: the payload sits under `item` and
//! asset locations are `{ "url": ... }` objects. There is no vocalist credit,
//! so the whole artist string becomes the composer.

use serde::Deserialize;

use super::resolve_url;
use crate::chart::{Chart, Credits, EngineInfo};
use crate::error::{FetchStage, Result};
use crate::network::HttpClient;
use crate::source::ChartSource;

#[derive(Debug, Deserialize)]
struct LevelResponse {
    item: LevelItem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelItem {
    title: String,
    artists: String,
    author: String,
    rating: i32,
    engine: EngineItem,
    cover: Srl,
    data: Srl,
    #[serde(default)]
    use_background: Option<UseBackground>,
}

#[derive(Debug, Deserialize)]
struct EngineItem {
    version: u32,
}

/// Sonolus resource locator.
#[derive(Debug, Deserialize)]
struct Srl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct UseBackground {
    #[serde(default)]
    item: Option<BackgroundItem>,
}

#[derive(Debug, Deserialize)]
struct BackgroundItem {
    image: Srl,
}

pub(super) fn fetch_chart(
    client: &HttpClient,
    source: &ChartSource,
    identifier: &str,
) -> Result<Chart> {
    let url = format!("{}/sonolus/levels/{}", source.host, identifier);
    let response: LevelResponse = client.get_json(&url, FetchStage::Metadata)?;
    let item = response.item;

    let credits = Credits::composer_only(&item.artists);
    let background_url = item
        .use_background
        .and_then(|background| background.item)
        .map(|background| resolve_url(source.host, &background.image.url));

    Ok(Chart {
        id: identifier.to_string(),
        title: item.title,
        artists: item.artists,
        credits,
        author: item.author,
        rating: item.rating,
        engine: EngineInfo {
            version: item.engine.version,
        },
        cover_url: resolve_url(source.host, &item.cover.url),
        background_url,
        data_url: resolve_url(source.host, &item.data.url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_item_shape() {
        let json = r#"{
            "item": {
                "name": "sekai-best-42",
                "title": "Song",
                "artists": "Someone",
                "author": "mapper",
                "rating": 28,
                "engine": { "name": "pjsekai", "version": 12 },
                "cover": { "url": "/sonolus/repository/cover" },
                "data": { "url": "/sonolus/repository/data" },
                "useBackground": {
                    "useDefault": false,
                    "item": { "image": { "url": "/sonolus/repository/bg" } }
                }
            }
        }"#;
        let response: LevelResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.item.engine.version, 12);
        assert_eq!(response.item.cover.url, "/sonolus/repository/cover");
        assert!(response.item.use_background.unwrap().item.is_some());
    }

    #[test]
    fn test_level_item_without_background() {
        let json = r#"{
            "item": {
                "title": "Song",
                "artists": "Someone",
                "author": "mapper",
                "rating": 28,
                "engine": { "version": 12 },
                "cover": { "url": "/c" },
                "data": { "url": "/d" }
            }
        }"#;
        let response: LevelResponse = serde_json::from_str(json).unwrap();
        assert!(response.item.use_background.is_none());
    }
}
