//! Product catalog endpoints.

use reqwest::{Method, StatusCode};
use tracing::{debug, instrument};

use hstore_core::{ProductId, SellerId};

use super::{ApiClient, ApiError, ApiResult, NO_BODY, Product, ProductInput};
use crate::models::SessionToken;

/// Message the backend uses (with HTTP 400) when the catalog is empty.
pub const EMPTY_CATALOG_MESSAGE: &str = "No products in catalog";

impl ApiClient {
    /// Fetch the whole catalog.
    ///
    /// An empty catalog is reported by the backend as a 400; that case is
    /// returned as an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error for any other failure.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        match self
            .request(Method::GET, "/products", NO_BODY, None)
            .await
        {
            Err(ApiError::Status { status, message })
                if status == StatusCode::BAD_REQUEST && message.contains(EMPTY_CATALOG_MESSAGE) =>
            {
                debug!("Catalog is empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Fetch a single product.
    ///
    /// The body is inspected whatever the status: anything carrying a
    /// `productId` is the product; anything else is an
    /// [`ApiError::UnexpectedResponse`] with the body's `message`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response isn't a product.
    #[instrument(skip(self, token))]
    pub async fn get_product(
        &self,
        id: ProductId,
        token: Option<&SessionToken>,
    ) -> ApiResult<Product> {
        let raw = self
            .send(Method::GET, &format!("/product/{id}"), NO_BODY, token)
            .await?;

        let value: serde_json::Value =
            serde_json::from_str(&raw.body).map_err(|_| ApiError::UnexpectedResponse {
                status: raw.status,
                message: None,
            })?;

        if value.get("productId").is_some_and(|id| !id.is_null()) {
            return raw.json();
        }

        Err(ApiError::UnexpectedResponse {
            status: raw.status,
            message: value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(String::from),
        })
    }

    /// Fetch the products listed by one seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn seller_products(&self, seller_id: SellerId) -> ApiResult<Vec<Product>> {
        self.request(
            Method::GET,
            &format!("/products/seller/{seller_id}"),
            NO_BODY,
            None,
        )
        .await
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the product.
    #[instrument(skip(self, token, input), fields(name = %input.product_name))]
    pub async fn create_product(&self, token: &SessionToken, input: &ProductInput) -> ApiResult<()> {
        self.execute(Method::POST, "/products", Some(input), Some(token))
            .await
    }

    /// Replace a product's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the update.
    #[instrument(skip(self, token, input), fields(id = ?input.product_id))]
    pub async fn update_product(&self, token: &SessionToken, input: &ProductInput) -> ApiResult<()> {
        self.execute(Method::PUT, "/products", Some(input), Some(token))
            .await
    }

    /// Remove a product from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses the deletion.
    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &SessionToken, id: ProductId) -> ApiResult<()> {
        self.execute(Method::DELETE, &format!("/product/{id}"), NO_BODY, Some(token))
            .await
    }
}
