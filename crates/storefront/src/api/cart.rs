//! Cart endpoints.

use reqwest::Method;
use tracing::{instrument, warn};

use super::{ApiClient, ApiError, ApiResult, Cart, CartItem, CartLineRequest, NO_BODY, Product};
use crate::models::SessionToken;

impl ApiClient {
    /// Fetch the session's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn get_cart(&self, token: &SessionToken) -> ApiResult<Cart> {
        self.request(Method::GET, "/cart", NO_BODY, Some(token))
            .await
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the addition.
    #[instrument(skip(self, token, product), fields(product_id = %product.product_id))]
    pub async fn add_to_cart(&self, token: &SessionToken, product: &Product) -> ApiResult<Cart> {
        let line = CartLineRequest {
            product_id: product.product_id,
            product_name: product.product_name.clone(),
            price: product.price,
            quantity: 1,
        };

        self.request(Method::POST, "/cart/add", Some(&line), Some(token))
            .await
    }

    /// Remove a cart line.
    ///
    /// The backend keys removal on the product, and the line is matched back
    /// to the catalog by product name: the whole catalog is fetched and the
    /// first product with the same name supplies the ID and price. A line
    /// whose product has been renamed or removed fails with
    /// [`ApiError::NotInCatalog`] and nothing is deleted. The lookup goes
    /// through [`ApiClient::list_products`], so an empty catalog also ends in
    /// `NotInCatalog` rather than a fetch error.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup or the deletion fails.
    #[instrument(skip(self, token, item), fields(name = %item.cart_product.product_name))]
    pub async fn remove_from_cart(&self, token: &SessionToken, item: &CartItem) -> ApiResult<Cart> {
        let catalog = self.list_products().await?;
        let line = removal_request(&catalog, item)?;

        self.request(Method::DELETE, "/cart", Some(&line), Some(token))
            .await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn clear_cart(&self, token: &SessionToken) -> ApiResult<Cart> {
        self.request(Method::DELETE, "/cart/clear", NO_BODY, Some(token))
            .await
    }
}

/// Build the `DELETE /cart` body for `item` from the first catalog product
/// with the same name.
fn removal_request(catalog: &[Product], item: &CartItem) -> ApiResult<CartLineRequest> {
    let name = &item.cart_product.product_name;
    let Some(product) = catalog.iter().find(|p| &p.product_name == name) else {
        warn!(%name, "Cart line has no matching catalog product");
        return Err(ApiError::NotInCatalog(name.clone()));
    };

    Ok(CartLineRequest {
        product_id: product.product_id,
        product_name: product.product_name.clone(),
        price: product.price,
        quantity: item.cart_item_quantity,
    })
}
