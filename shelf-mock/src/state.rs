//! Mock backend state

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use shared::{AttrValue, AttributeType, AttributeValue, Category, Product};

/// The whole catalog, shaped like the JSON database file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog from a JSON database file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    /// Built-in demo catalog used when no database file is configured
    pub fn demo() -> Self {
        let attr = |code: &str, value: AttrValue, attr_type: AttributeType| AttributeValue {
            code: code.to_string(),
            value,
            attr_type,
            label: None,
        };

        Self {
            categories: vec![
                Category {
                    id: 1,
                    name: "Furniture".into(),
                    parent_id: None,
                },
                Category {
                    id: 2,
                    name: "Sofas".into(),
                    parent_id: Some(1),
                },
                Category {
                    id: 3,
                    name: "Tables".into(),
                    parent_id: Some(1),
                },
                Category {
                    id: 4,
                    name: "Lighting".into(),
                    parent_id: None,
                },
            ],
            products: vec![
                Product {
                    id: 1,
                    name: "Corner Sofa Bergen".into(),
                    category_id: 2,
                    attributes: vec![
                        attr("color", AttrValue::Text("anthracite".into()), AttributeType::Text),
                        attr("seats", AttrValue::Number(4.0), AttributeType::Number),
                        attr(
                            "tags",
                            AttrValue::Tags(vec!["fabric".into(), "corner".into()]),
                            AttributeType::Tags,
                        ),
                    ],
                    last_modified: None,
                },
                Product {
                    id: 2,
                    name: "Oak Dining Table".into(),
                    category_id: 3,
                    attributes: vec![
                        attr("material", AttrValue::Text("oak".into()), AttributeType::Text),
                        attr("extendable", AttrValue::Bool(true), AttributeType::Boolean),
                    ],
                    last_modified: None,
                },
                Product {
                    id: 3,
                    name: "Floor Lamp Aurora".into(),
                    category_id: 4,
                    attributes: vec![attr(
                        "datasheet",
                        AttrValue::Text("https://example.com/aurora.pdf".into()),
                        AttributeType::Url,
                    )],
                    last_modified: None,
                },
            ],
        }
    }

    /// Next free product id (json-server style: max + 1)
    pub fn next_product_id(&self) -> i64 {
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

/// Shared server state
#[derive(Debug)]
pub struct AppState {
    pub catalog: RwLock<Catalog>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "shelf-mock-dev-secret".to_string()),
        }
    }
}
