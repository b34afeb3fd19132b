//! Listing query types
//!
//! A [`ListFilter`] describes one page of a product listing: optional
//! category filter, 1-based page, page size, optional sort. The
//! [`pipeline`] module turns a raw collection plus a filter into a
//! deterministic page.

pub mod pipeline;

use serde::{Deserialize, Serialize};

pub use pipeline::run;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Sort field + direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

/// Listing filter: category scope, pagination, sort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortConfig>,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            page: 1,
            page_size: 10,
            sort: None,
        }
    }
}

impl ListFilter {
    /// Scope to a single category
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set pagination
    pub fn paginate(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Set sorting
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortConfig {
            field: field.into(),
            direction,
        });
        self
    }
}

/// A comparable projection of one record field
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Field absent or null; always sorts toward the "greater" end
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Non-scalar fields compare by their JSON rendering
    Json(String),
}

/// Records the listing pipeline can filter and sort
///
/// Field access is typed through this trait rather than dynamic lookup;
/// unknown fields report [`SortValue::Missing`].
pub trait Listable {
    fn category_id(&self) -> Option<i64>;
    fn sort_value(&self, field: &str) -> SortValue;
}

/// One page of results plus the pre-pagination total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Count after filtering, before pagination
    pub total: u64,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Number of pages at the given page size (0 when page_size is 0)
    pub fn total_pages(&self, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(page_size as u64) as u32
    }
}
