//
//  storedesk
//  api/resources/products.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Product catalog endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use storedesk::api::AdminClient;
//! use storedesk::api::common::ListQuery;
//!
//! # async fn example(client: &AdminClient) -> Result<(), storedesk::api::ApiError> {
//! let page = client
//!     .list_products(&ListQuery::page(1, 20).keyword("mug"), None)
//!     .await?;
//! for product in page.records {
//!     println!("{} {}", product.id, product.name);
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{ApiError, ListQuery, Page};
use crate::api::envelope::Envelope;
use crate::api::request::{FilePart, RequestDescriptor};
use crate::api::AdminClient;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Unit price.
    #[serde(default)]
    pub price: f64,

    /// Units in stock.
    #[serde(default)]
    pub stock: i64,

    /// Category the product belongs to.
    #[serde(default)]
    pub category_id: Option<u64>,

    /// Whether the product is listed in the storefront.
    #[serde(default)]
    pub on_sale: bool,

    /// Main image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Fields sent when creating or updating a product.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: i64,
    /// Category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Main image URL, usually from [`AdminClient::upload_product_image`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl AdminClient {
    /// Lists products, optionally filtered by keyword and category.
    pub async fn list_products(
        &self,
        query: &ListQuery,
        category_id: Option<u64>,
    ) -> Result<Page<Product>, ApiError> {
        self.fetch(
            RequestDescriptor::get("/product/list")
                .page(query.page, query.size)
                .query_opt("keyword", query.keyword.clone())
                .query_opt("categoryId", category_id),
        )
        .await
    }

    /// Fetches one product.
    pub async fn get_product(&self, id: u64) -> Result<Product, ApiError> {
        self.get(&format!("/product/{}", id)).await
    }

    /// Creates a product.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Envelope, ApiError> {
        self.post("/product", draft).await
    }

    /// Replaces a product's editable fields.
    pub async fn update_product(
        &self,
        id: u64,
        draft: &ProductDraft,
    ) -> Result<Envelope, ApiError> {
        self.put(&format!("/product/{}", id), draft).await
    }

    /// Lists or unlists a product.
    pub async fn set_product_on_sale(&self, id: u64, on_sale: bool) -> Result<Envelope, ApiError> {
        self.request(
            RequestDescriptor::put(format!("/product/{}/status", id))
                .json(serde_json::json!({ "onSale": on_sale })),
        )
        .await
    }

    /// Deletes a product.
    pub async fn delete_product(&self, id: u64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/product/{}", id)).await
    }

    /// Uploads a product image and returns its public URL.
    ///
    /// The backend answers either with the URL as `data` or with an object
    /// holding it under `url`.
    pub async fn upload_product_image(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let data: Value = self
            .fetch(RequestDescriptor::post("/upload/image").file(FilePart {
                field: "file".to_string(),
                file_name: file_name.to_string(),
                mime: mime.to_string(),
                bytes,
                fields: vec![("biz".to_string(), "product".to_string())],
            }))
            .await?;

        match data {
            Value::String(url) => Ok(url),
            other => other
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ApiError::parse("upload response carries no url").logged()),
        }
    }
}
