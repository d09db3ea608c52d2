//! Login, registration and logout endpoints.

use reqwest::Method;
use tracing::instrument;

use hstore_core::Role;

use super::{
    ApiClient, ApiResult, LoginRequest, LoginResponse, LogoutRequest, RegisterRequest,
    RegisteredAccount,
};
use crate::models::SessionToken;

/// Message sent with every logout call.
const LOGOUT_MESSAGE: &str = "User requested logout";

/// Registration form values, shared by both roles.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub mobile: &'a str,
    pub password: &'a str,
}

impl ApiClient {
    /// Log in as `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the API is unreachable.
    #[instrument(skip(self, password), fields(role = %role))]
    pub async fn login(
        &self,
        role: Role,
        mobile: &str,
        password: &str,
    ) -> ApiResult<LoginResponse> {
        let body = match role {
            Role::Customer => LoginRequest::Customer {
                mobile_id: mobile,
                password,
            },
            Role::Seller => LoginRequest::Seller { mobile, password },
        };

        self.request(
            Method::POST,
            &format!("/login/{}", role.as_str()),
            Some(&body),
            None,
        )
        .await
    }

    /// Register a new account as `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the registration.
    #[instrument(skip(self, form), fields(role = %role))]
    pub async fn register(
        &self,
        role: Role,
        form: Registration<'_>,
    ) -> ApiResult<RegisteredAccount> {
        let body = match role {
            Role::Customer => RegisterRequest::Customer {
                first_name: form.first_name,
                last_name: form.last_name,
                password: form.password,
                mobile_no: form.mobile,
                email_id: form.email,
            },
            Role::Seller => RegisterRequest::Seller {
                first_name: form.first_name,
                last_name: form.last_name,
                password: form.password,
                mobile: form.mobile,
                email_id: form.email,
            },
        };

        self.request(
            Method::POST,
            &format!("/register/{}", role.as_str()),
            Some(&body),
            None,
        )
        .await
    }

    /// End the backend session for `token` under `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails. Callers treat logout as best effort.
    #[instrument(skip(self, token), fields(role = %role))]
    pub async fn logout(&self, role: Role, token: &SessionToken) -> ApiResult<()> {
        let body = LogoutRequest {
            token: token.expose(),
            message: LOGOUT_MESSAGE,
        };

        self.execute(
            Method::POST,
            &format!("/logout/{}", role.as_str()),
            Some(&body),
            None,
        )
        .await
    }
}
