//! Filter ⇄ query-string synchronization
//!
//! The browser address bar is the canonical encoding of a listing
//! filter: `categoryId`, `_page`, `_limit`, `_sort`, `_order`. Encoding
//! always writes `_page`/`_limit` and only writes the optional pairs
//! when set; parsing is tolerant and falls back to defaults for missing
//! or unparseable values.

use shared::{ListFilter, SortConfig, SortDirection};

/// Encode a filter into query-string pairs
pub fn encode_filter(filter: &ListFilter) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    if let Some(category_id) = filter.category_id {
        pairs.push(("categoryId".to_string(), category_id.to_string()));
    }

    pairs.push(("_page".to_string(), filter.page.to_string()));
    pairs.push(("_limit".to_string(), filter.page_size.to_string()));

    if let Some(sort) = &filter.sort
        && !sort.field.is_empty()
    {
        pairs.push(("_sort".to_string(), sort.field.clone()));
        pairs.push(("_order".to_string(), sort.direction.as_str().to_string()));
    }

    pairs
}

/// Parse query-string pairs into a filter
///
/// Accepts the `categoryId`, `categoryID` and `category_id` spellings
/// seen in the wild. The first parseable occurrence of a key wins.
pub fn parse_filter(pairs: &[(String, String)]) -> ListFilter {
    let lookup = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let defaults = ListFilter::default();

    let category_id = ["categoryId", "categoryID", "category_id"]
        .iter()
        .filter_map(|key| lookup(key))
        .find_map(|v| v.parse::<i64>().ok());

    let page = lookup("_page")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(defaults.page);

    let page_size = lookup("_limit")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&s| s > 0)
        .unwrap_or(defaults.page_size);

    let sort = lookup("_sort")
        .filter(|field| !field.is_empty())
        .map(|field| SortConfig {
            field: field.to_string(),
            direction: lookup("_order")
                .and_then(|v| v.parse::<SortDirection>().ok())
                .unwrap_or_default(),
        });

    ListFilter {
        category_id,
        page,
        page_size,
        sort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_round_trip() {
        let filter = ListFilter::default()
            .with_category(5)
            .paginate(3, 25)
            .order_by("name", SortDirection::Desc);

        assert_eq!(parse_filter(&encode_filter(&filter)), filter);
    }

    #[test]
    fn test_minimal_encoding() {
        let encoded = encode_filter(&ListFilter::default());
        assert_eq!(
            encoded,
            pairs(&[("_page", "1"), ("_limit", "10")])
        );
    }

    #[test]
    fn test_accepts_category_id_spellings() {
        for key in ["categoryId", "categoryID", "category_id"] {
            let filter = parse_filter(&pairs(&[(key, "7")]));
            assert_eq!(filter.category_id, Some(7), "spelling: {key}");
        }
    }

    #[test]
    fn test_unparseable_spelling_does_not_shadow_a_parseable_one() {
        let filter = parse_filter(&pairs(&[("categoryId", "junk"), ("category_id", "5")]));
        assert_eq!(filter.category_id, Some(5));
    }

    #[test]
    fn test_unparseable_values_fall_back_to_defaults() {
        let filter = parse_filter(&pairs(&[
            ("categoryId", "junk"),
            ("_page", "0"),
            ("_limit", "-5"),
            ("_sort", ""),
        ]));

        assert_eq!(filter.category_id, None);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 10);
        assert!(filter.sort.is_none());
    }

    #[test]
    fn test_missing_order_defaults_to_asc() {
        let filter = parse_filter(&pairs(&[("_sort", "name")]));
        let sort = filter.sort.unwrap();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.direction, SortDirection::Asc);
    }
}
