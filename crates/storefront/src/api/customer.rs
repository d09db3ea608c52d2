//! Customer account and order endpoints.

use reqwest::Method;
use tracing::instrument;

use hstore_core::OrderId;

use super::{ApiClient, ApiResult, Customer, NO_BODY, Order};
use crate::models::SessionToken;

impl ApiClient {
    /// Fetch the logged-in customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn current_customer(&self, token: &SessionToken) -> ApiResult<Customer> {
        self.request(Method::GET, "/customer/current", NO_BODY, Some(token))
            .await
    }

    /// Fetch every order the logged-in customer has placed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn customer_orders(&self, token: &SessionToken) -> ApiResult<Vec<Order>> {
        self.request(Method::GET, "/customer/orders", NO_BODY, Some(token))
            .await
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order doesn't exist or the request fails.
    #[instrument(skip(self, token))]
    pub async fn order(&self, token: &SessionToken, id: OrderId) -> ApiResult<Order> {
        self.request(Method::GET, &format!("/orders/{id}"), NO_BODY, Some(token))
            .await
    }
}
