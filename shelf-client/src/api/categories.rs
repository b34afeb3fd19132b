//! Category API

use shared::{Category, CategoryNode, build_category_tree};

use crate::{ClientResult, HttpClient};

impl HttpClient {
    // ========== Category API ==========

    /// Fetch the flat category list
    pub async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/categories").await
    }

    /// Fetch categories and assemble the navigation forest
    pub async fn fetch_category_tree(&self) -> ClientResult<Vec<CategoryNode>> {
        let categories = self.fetch_categories().await?;
        Ok(build_category_tree(&categories))
    }
}
