//! Wire format of the volumes search endpoint and its normalization.
//!
//! The catalog returns far more than the core needs. These types keep only the
//! consumed fields; everything else (`kind`, `etag`, `saleInfo`, ...) is ignored by
//! serde. Every optional field tolerates both absence and an explicit `null`.

use crate::domain::error::{BookshelfError, Result};
use crate::domain::page::page_for_offset;
use crate::domain::{BookSummary, ResultPage};
use serde::Deserialize;

/// Top-level body: `{ items?: [...], totalItems?: n, kind?: "..." }`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<VolumeRecord>>,

    #[serde(default)]
    total_items: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeRecord {
    id: String,

    #[serde(default)]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    authors: Option<Vec<String>>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    image_links: Option<ImageLinks>,

    #[serde(default)]
    preview_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageLinks {
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<VolumeRecord> for BookSummary {
    fn from(record: VolumeRecord) -> Self {
        let info = record.volume_info.unwrap_or_default();
        Self {
            id: record.id,
            title: info.title,
            authors: info.authors.unwrap_or_default(),
            description: info.description.unwrap_or_default(),
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
            preview_link: info.preview_link,
        }
    }
}

/// Decodes a response body into a [`ResultPage`].
///
/// Missing `items` become an empty page and a missing `totalItems` becomes 0.
/// Items beyond `page_size` are dropped so the page invariant holds even when
/// the endpoint ignores `maxResults`.
///
/// # Errors
///
/// Returns [`BookshelfError::Decode`] if the body is not JSON, is not an object,
/// or contains a record without an `id`.
///
/// # Examples
///
/// ```
/// use bookshelf::catalog::parse_page;
///
/// let page = parse_page(r#"{"kind":"books#volumes"}"#, 0, 6)?;
/// assert!(page.items.is_empty());
/// assert_eq!(page.total_items, 0);
/// assert_eq!(page.current_page, 1);
/// # Ok::<(), bookshelf::BookshelfError>(())
/// ```
pub fn parse_page(body: &str, start_index: u32, page_size: u32) -> Result<ResultPage> {
    let response: VolumesResponse = serde_json::from_str(body)
        .map_err(|e| BookshelfError::Decode(format!("failed to parse volumes response: {e}")))?;

    let limit = usize::try_from(page_size).unwrap_or(usize::MAX);
    let items: Vec<BookSummary> = response
        .items
        .unwrap_or_default()
        .into_iter()
        .take(limit)
        .map(BookSummary::from)
        .collect();

    Ok(ResultPage {
        items,
        total_items: response.total_items.unwrap_or(0),
        current_page: page_for_offset(start_index, page_size),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BODY: &str = r#"{
        "kind": "books#volumes",
        "totalItems": 40,
        "items": [
            {
                "kind": "books#volume",
                "id": "abc123",
                "etag": "x",
                "volumeInfo": {
                    "title": "Example Book",
                    "authors": ["Ada", "Grace"],
                    "description": "A book about examples.",
                    "imageLinks": {
                        "smallThumbnail": "http://img/small",
                        "thumbnail": "http://img/thumb"
                    },
                    "previewLink": "http://preview/abc123",
                    "pageCount": 120
                },
                "saleInfo": { "country": "US" }
            },
            { "id": "bare" }
        ]
    }"#;

    #[test]
    fn normalizes_consumed_fields() {
        let page = parse_page(FULL_BODY, 6, 6).unwrap();

        assert_eq!(page.total_items, 40);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.id, "abc123");
        assert_eq!(first.title.as_deref(), Some("Example Book"));
        assert_eq!(first.authors, vec!["Ada", "Grace"]);
        assert_eq!(first.description, "A book about examples.");
        assert_eq!(first.thumbnail.as_deref(), Some("http://img/thumb"));
        assert_eq!(first.preview_link.as_deref(), Some("http://preview/abc123"));
    }

    #[test]
    fn record_without_volume_info_gets_empty_fields() {
        let page = parse_page(FULL_BODY, 0, 6).unwrap();
        let bare = &page.items[1];

        assert_eq!(bare.id, "bare");
        assert!(bare.title.is_none());
        assert!(bare.authors.is_empty());
        assert!(bare.description.is_empty());
        assert!(bare.thumbnail.is_none());
        assert!(bare.preview_link.is_none());
    }

    #[test]
    fn nulls_are_treated_as_absent() {
        let body = r#"{"items": null, "totalItems": null}"#;
        let page = parse_page(body, 0, 6).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);

        let body = r#"{"items": [{"id": "n", "volumeInfo": {"authors": null, "imageLinks": null}}]}"#;
        let page = parse_page(body, 0, 6).unwrap();
        assert!(page.items[0].authors.is_empty());
        assert!(page.items[0].thumbnail.is_none());
    }

    #[test]
    fn oversized_pages_are_truncated() {
        let items: Vec<String> = (0..10).map(|i| format!(r#"{{"id":"b{i}"}}"#)).collect();
        let body = format!(r#"{{"totalItems": 10, "items": [{}]}}"#, items.join(","));

        let page = parse_page(&body, 0, 6).unwrap();
        assert_eq!(page.items.len(), 6);
        assert_eq!(page.items[5].id, "b5");
    }

    #[test]
    fn malformed_bodies_are_decode_errors() {
        for body in ["not json", "[]", "\"text\"", r#"{"items": [{"title": "no id"}]}"#, r#"{"totalItems": -1}"#] {
            let err = parse_page(body, 0, 6).unwrap_err();
            assert!(matches!(err, BookshelfError::Decode(_)), "body {body:?} gave {err:?}");
        }
    }
}
