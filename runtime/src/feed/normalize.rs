//! Map raw articles of either shape into [`FeedItem`]s.
//!
//! An unparseable timestamp never drops the item: it is kept with
//! `pub_date: None` and a warning is logged against its guid.

use super::{FeedItem, RawArticle, ReleaseDate};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Naive layouts tried, in order, after RFC 3339 and RFC 2822.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Normalize one article. `announcement_url` is the category listing URL
/// that article links are derived from.
pub fn normalize(raw: &RawArticle, announcement_url: &str) -> FeedItem {
    let code = raw.code();
    let pub_date = raw.release_date().and_then(parse_release_date);
    if pub_date.is_none() {
        tracing::warn!(
            guid = code,
            release_date = ?raw.release_date(),
            "unparseable release date; item kept without pub_date"
        );
    }

    FeedItem {
        title: raw.title().to_string(),
        description: raw.title().to_string(),
        guid: code.to_string(),
        link: format!("{}/{}", announcement_url.trim_end_matches('/'), code),
        pub_date,
    }
}

/// Normalize a batch, preserving upstream order.
pub fn normalize_all(raws: &[RawArticle], announcement_url: &str) -> Vec<FeedItem> {
    raws.iter().map(|raw| normalize(raw, announcement_url)).collect()
}

/// Parse an upstream timestamp into a UTC instant.
pub fn parse_release_date(date: &ReleaseDate) -> Option<DateTime<Utc>> {
    match date {
        ReleaseDate::EpochMillis(ms) => Utc.timestamp_millis_opt(*ms).single(),
        ReleaseDate::Text(s) => parse_text_date(s.trim()),
        // Fractional epoch millis; anything non-numeric is unusable.
        ReleaseDate::Other(value) => value
            .as_f64()
            .filter(|ms| ms.is_finite() && ms.abs() < i64::MAX as f64)
            .and_then(|ms| Utc.timestamp_millis_opt(ms.trunc() as i64).single()),
    }
}

fn parse_text_date(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<i64>()
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{RenderedArticle, StructuredArticle};

    const BASE: &str = "https://www.binance.com/en/support/announcement/new-cryptocurrency-listing";

    fn structured(code: &str, title: &str, ms: i64) -> RawArticle {
        RawArticle::Structured(StructuredArticle {
            id: 1,
            code: code.into(),
            title: title.into(),
            kind: 1,
            release_date: Some(ReleaseDate::EpochMillis(ms)),
        })
    }

    fn rendered(code: &str, date: &str) -> RawArticle {
        RawArticle::Rendered(RenderedArticle {
            code: code.into(),
            title: "Rendered".into(),
            release_date: Some(ReleaseDate::Text(date.into())),
            kind: Some(1),
        })
    }

    #[test]
    fn test_normalize_structured_article() {
        let item = normalize(&structured("CMS-123", "New Listing", 1_700_000_000_000), BASE);
        assert_eq!(item.guid, "CMS-123");
        assert_eq!(item.title, "New Listing");
        assert_eq!(item.description, "New Listing");
        assert!(item.link.ends_with("/CMS-123"));
        assert_eq!(item.link, format!("{BASE}/CMS-123"));
        assert_eq!(
            item.pub_date,
            Utc.timestamp_millis_opt(1_700_000_000_000).single()
        );
    }

    #[test]
    fn test_parse_text_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).single();
        for s in [
            "2024-03-05T08:30:00Z",
            "2024-03-05T10:30:00+02:00",
            "Tue, 05 Mar 2024 08:30:00 +0000",
            "2024-03-05 08:30:00",
            "2024-03-05T08:30:00",
            "1709627400000",
        ] {
            assert_eq!(
                parse_release_date(&ReleaseDate::Text(s.into())),
                expected,
                "format {s}"
            );
        }

        assert_eq!(
            parse_release_date(&ReleaseDate::Text("2024-03-05".into())),
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).single()
        );
    }

    #[test]
    fn test_unparseable_date_keeps_item() {
        let raws = vec![rendered("a", "sometime last week"), rendered("b", "2024-03-05")];
        let items = normalize_all(&raws, BASE);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].guid, "a");
        assert_eq!(items[0].pub_date, None);
        assert!(items[1].pub_date.is_some());
    }

    #[test]
    fn test_missing_and_odd_dates_keep_item() {
        let no_date = RawArticle::Rendered(RenderedArticle {
            code: "none".into(),
            title: "No date".into(),
            release_date: None,
            kind: None,
        });
        let junk = RawArticle::Structured(StructuredArticle {
            id: 2,
            code: "junk".into(),
            title: "Junk".into(),
            kind: 1,
            release_date: Some(ReleaseDate::Other(serde_json::json!(true))),
        });
        let fractional = RawArticle::Structured(StructuredArticle {
            id: 3,
            code: "frac".into(),
            title: "Fractional".into(),
            kind: 1,
            release_date: Some(ReleaseDate::Other(serde_json::json!(1709627400000.9))),
        });

        let items = normalize_all(&[no_date, junk, fractional], BASE);
        let guids: Vec<_> = items.iter().map(|i| i.guid.as_str()).collect();
        assert_eq!(guids, ["none", "junk", "frac"]);
        assert_eq!(items[0].pub_date, None);
        assert_eq!(items[1].pub_date, None);
        assert_eq!(items[2].pub_date, Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).single());
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let raws = vec![
            structured("z", "Z", 3),
            structured("a", "A", 2),
            structured("m", "M", 1),
        ];
        let guids: Vec<_> = normalize_all(&raws, BASE).into_iter().map(|i| i.guid).collect();
        assert_eq!(guids, ["z", "a", "m"]);
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let item = normalize(&structured("X", "t", 0), "https://example.com/en/support/announcement/api-updates/");
        assert_eq!(item.link, "https://example.com/en/support/announcement/api-updates/X");
    }
}
