//! Product API
//!
//! Two listing strategies are supported: server-side pagination via the
//! backend's `_page`/`_limit`/`_sort`/`_order` parameters, and a local
//! strategy that fetches the collection and runs the shared listing
//! pipeline. Both report `total` as the post-filter, pre-pagination
//! count.

use shared::models::validate_attributes;
use shared::{ListFilter, ListPage, Product, ProductCreate, ProductUpdate, query, util};

use crate::{ClientError, ClientResult, HttpClient, QueryParams};

impl HttpClient {
    // ========== Product API ==========

    /// Fetch one page of products, paginated and sorted by the server.
    ///
    /// A second, unpaginated request scoped to the same category
    /// provides the total count.
    pub async fn fetch_products(&self, filter: &ListFilter) -> ClientResult<ListPage<Product>> {
        let mut params = QueryParams::new();
        params.set("_page", filter.page);
        params.set("_limit", filter.page_size);
        params.set_opt("category_id", filter.category_id);
        if let Some(sort) = &filter.sort
            && !sort.field.is_empty()
        {
            params.set("_sort", &sort.field);
            params.set("_order", sort.direction.as_str());
        }

        let products: Vec<Product> = self.get_with_params("/products", &params).await?;

        let mut count_params = QueryParams::new();
        count_params.set_opt("category_id", filter.category_id);
        let all: Vec<Product> = self.get_with_params("/products", &count_params).await?;

        Ok(ListPage::new(products, all.len() as u64))
    }

    /// Fetch the collection and filter/sort/paginate locally
    pub async fn fetch_products_local(
        &self,
        filter: &ListFilter,
    ) -> ClientResult<ListPage<Product>> {
        let mut params = QueryParams::new();
        params.set_opt("category_id", filter.category_id);

        let all: Vec<Product> = self.get_with_params("/products", &params).await?;
        Ok(query::run(all, filter))
    }

    /// Fetch a single product by id.
    ///
    /// When the direct lookup fails, fall back to scanning the full
    /// collection; absence from both yields a not-found error naming
    /// the requested id.
    pub async fn fetch_product(&self, id: i64) -> ClientResult<Product> {
        match self.get::<Product>(&format!("/products/{id}")).await {
            Ok(product) => Ok(product),
            Err(err) => {
                tracing::warn!(
                    id,
                    error = %err,
                    "Direct product lookup failed, scanning full collection"
                );

                let all: Vec<Product> = self.get("/products").await?;
                all.into_iter()
                    .find(|product| product.id == id)
                    .ok_or_else(|| ClientError::NotFound(format!("Product {id} not found")))
            }
        }
    }

    /// Update a product, stamping `last_modified` with the current time
    pub async fn update_product(
        &self,
        id: i64,
        mut update: ProductUpdate,
    ) -> ClientResult<Product> {
        if let Some(attributes) = &update.attributes {
            validate_attributes(attributes).map_err(ClientError::Validation)?;
        }
        update.last_modified = Some(util::now_iso8601());

        self.put(&format!("/products/{id}"), &update).await
    }

    /// Create a product, stamping `last_modified` with the current time
    pub async fn create_product(&self, mut data: ProductCreate) -> ClientResult<Product> {
        validate_attributes(&data.attributes).map_err(ClientError::Validation)?;
        data.last_modified = Some(util::now_iso8601());

        self.post("/products", &data).await
    }
}
