//! Listing pipeline: filter → sort → paginate
//!
//! Turns a raw collection plus a [`ListFilter`] into one deterministic
//! page of results and the pre-pagination total. Shared between the
//! client's local-pagination strategy and the mock backend.

use std::cmp::Ordering;

use super::{ListFilter, ListPage, Listable, SortDirection, SortValue};

/// Compare two sort values under the given direction.
///
/// Each branch mirrors its counterpart explicitly for `desc` instead of
/// negating a single delta, so the missing-value rule holds in both
/// directions: a missing value is always treated as the greater one
/// (last in ascending order, first in descending order).
pub fn compare(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => match direction {
            SortDirection::Asc => Ordering::Greater,
            SortDirection::Desc => Ordering::Less,
        },
        (_, SortValue::Missing) => match direction {
            SortDirection::Asc => Ordering::Less,
            SortDirection::Desc => Ordering::Greater,
        },
        (SortValue::Text(a), SortValue::Text(b)) => match direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        },
        (SortValue::Number(a), SortValue::Number(b)) => match direction {
            SortDirection::Asc => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            SortDirection::Desc => b.partial_cmp(a).unwrap_or(Ordering::Equal),
        },
        // Mixed or non-scalar values compare by their string rendering
        (a, b) => {
            let a = coerce_key(a);
            let b = coerce_key(b);
            match direction {
                SortDirection::Asc => a.cmp(&b),
                SortDirection::Desc => b.cmp(&a),
            }
        }
    }
}

fn coerce_key(value: &SortValue) -> String {
    match value {
        SortValue::Missing => String::new(),
        SortValue::Bool(b) => b.to_string(),
        SortValue::Number(n) => n.to_string(),
        SortValue::Text(s) => s.clone(),
        SortValue::Json(json) => json.clone(),
    }
}

/// Run the full pipeline over an owned collection.
///
/// - filter: keep records whose category matches `filter.category_id`
///   when set; `total` is the count after this step
/// - sort: stable, only when a sort field is set
/// - paginate: slice `(page-1)*page_size .. +page_size`; a page past the
///   end yields an empty slice, not an error
pub fn run<T: Listable>(records: Vec<T>, filter: &ListFilter) -> ListPage<T> {
    let mut records = records;

    if let Some(category_id) = filter.category_id {
        records.retain(|r| r.category_id() == Some(category_id));
    }
    let total = records.len() as u64;

    if let Some(sort) = &filter.sort
        && !sort.field.is_empty()
    {
        records.sort_by(|a, b| {
            compare(
                &a.sort_value(&sort.field),
                &b.sort_value(&sort.field),
                sort.direction,
            )
        });
    }

    let start = filter.page.saturating_sub(1) as usize * filter.page_size as usize;
    let items: Vec<T> = records
        .into_iter()
        .skip(start)
        .take(filter.page_size as usize)
        .collect();

    ListPage::new(items, total)
}
