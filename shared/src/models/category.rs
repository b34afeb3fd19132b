//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Categories form a forest via `parent_id`; see
/// [`crate::category_tree`] for the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "super::flexible_id")]
    pub id: i64,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "super::flexible_id_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<i64>,
}
