//! # Pagination
//!
//! Fixed-size, 1-based page windows over an ordered slice.

use serde::{Deserialize, Deserializer};

/// Questions shown per page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Return the `page`-th window of at most `page_size` items.
///
/// Pages are 1-based. A page at or below zero, or one that starts past the
/// end of `items`, yields an empty slice.
pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> &[T] {
    if page < 1 || page_size == 0 {
        return &[];
    }

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size));

    match start {
        Some(start) if start < items.len() => {
            let end = start.saturating_add(page_size).min(items.len());
            &items[start..end]
        }
        _ => &[],
    }
}

/// `?page=N` query parameter.
///
/// Anything that is not an integer (or no parameter at all) means page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "lenient_page")]
    pub page: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: first_page() }
    }
}

fn first_page() -> i64 {
    1
}

fn lenient_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(first_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: i32) -> Vec<i32> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page() {
        let items = numbers(25);
        assert_eq!(paginate(&items, 1, 10), &numbers(10)[..]);
    }

    #[test]
    fn test_page_window_bounds() {
        let items = numbers(25);
        for page in 1..=3i64 {
            let window = paginate(&items, page, QUESTIONS_PER_PAGE);
            let start = (page as usize - 1) * 10;
            let end = (start + 10).min(items.len());
            assert_eq!(window, &items[start..end]);
        }
    }

    #[test]
    fn test_last_partial_page() {
        let items = numbers(25);
        assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_past_the_end_is_empty() {
        let items = numbers(20);
        assert!(paginate(&items, 3, 10).is_empty());
        assert!(paginate(&items, 500, 10).is_empty());
        assert!(paginate(&items, i64::MAX, 10).is_empty());
    }

    #[test]
    fn test_non_positive_page_is_empty() {
        let items = numbers(5);
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, -3, 10).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<i32> = Vec::new();
        assert!(paginate(&items, 1, 10).is_empty());
    }

    #[test]
    fn test_page_query_parsing() {
        let parse = |qs: &str| -> PageQuery {
            let pairs: Vec<(String, String)> = qs
                .split('&')
                .filter(|p| !p.is_empty())
                .filter_map(|p| p.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            let value = serde_json::Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect(),
            );
            serde_json::from_value(value).unwrap()
        };

        assert_eq!(parse("").page, 1);
        assert_eq!(parse("page=2").page, 2);
        assert_eq!(parse("page=abc").page, 1);
        assert_eq!(parse("page=-1").page, -1);
    }
}
