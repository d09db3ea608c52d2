//! Seller account endpoint.

use reqwest::Method;
use tracing::instrument;

use super::{ApiClient, ApiResult, NO_BODY, Seller};
use crate::models::SessionToken;

impl ApiClient {
    /// Fetch the logged-in seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn current_seller(&self, token: &SessionToken) -> ApiResult<Seller> {
        self.request(Method::GET, "/seller/current", NO_BODY, Some(token))
            .await
    }
}
