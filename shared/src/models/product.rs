//! Product Model

use serde::{Deserialize, Serialize};

use crate::query::{Listable, SortValue};

/// Attribute value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Text,
    Number,
    Boolean,
    Url,
    Tags,
}

/// Attribute payload value
///
/// The wire format is a JSON union: string, number, boolean, string
/// array or null. Which shapes are legal depends on [`AttributeType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Tags(Vec<String>),
}

impl AttrValue {
    /// Check that this value's shape is legal for the given type.
    ///
    /// Null is accepted everywhere; the array shape only for tags.
    pub fn matches(&self, attr_type: AttributeType) -> bool {
        match (self, attr_type) {
            (AttrValue::Null, _) => true,
            (AttrValue::Text(_), AttributeType::Text | AttributeType::Url) => true,
            (AttrValue::Number(_), AttributeType::Number) => true,
            (AttrValue::Bool(_), AttributeType::Boolean) => true,
            (AttrValue::Tags(_), AttributeType::Tags) => true,
            _ => false,
        }
    }
}

/// A single named attribute on a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Unique within one product's attribute set
    pub code: String,
    pub value: AttrValue,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Validate an attribute set: codes unique, value shapes matching types.
///
/// Returns the offending code on the first violation.
pub fn validate_attributes(attributes: &[AttributeValue]) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for attr in attributes {
        if !seen.insert(attr.code.as_str()) {
            return Err(format!("duplicate attribute code: {}", attr.code));
        }
        if !attr.value.matches(attr.attr_type) {
            return Err(format!(
                "attribute {} value does not match its declared type",
                attr.code
            ));
        }
    }
    Ok(())
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "super::flexible_id")]
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "super::flexible_id")]
    pub category_id: i64,
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
    /// ISO-8601, stamped client-side on create/update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category_id: i64,
    #[serde(default)]
    pub attributes: Vec<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

/// Update product payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Product {
    /// Apply a partial update in place
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(attributes) = update.attributes {
            self.attributes = attributes;
        }
        if let Some(last_modified) = update.last_modified {
            self.last_modified = Some(last_modified);
        }
    }
}

impl Listable for Product {
    fn category_id(&self) -> Option<i64> {
        Some(self.category_id)
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => SortValue::Number(self.id as f64),
            "name" => SortValue::Text(self.name.clone()),
            "category_id" => SortValue::Number(self.category_id as f64),
            "last_modified" => match &self.last_modified {
                Some(ts) => SortValue::Text(ts.clone()),
                None => SortValue::Missing,
            },
            // Non-scalar fields compare by their JSON rendering
            "attributes" => match serde_json::to_string(&self.attributes) {
                Ok(json) => SortValue::Json(json),
                Err(_) => SortValue::Missing,
            },
            _ => SortValue::Missing,
        }
    }
}
