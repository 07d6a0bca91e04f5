//! Authentication and address-book endpoints.

use serde::Serialize;
use tracing::instrument;
use voidwear_core::AddressId;

use super::types::{Address, AddressPayload, AuthTokens, UserProfile};
use super::{ApiClient, ApiError, Identity};

/// Request body for `POST /auth/login`.
#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ApiError> {
        let body = LoginBody { email, password };
        self.execute(self.post("/auth/login", &Identity::default()).json(&body))
            .await
    }

    /// Create an account and return its first bearer token.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<AuthTokens, ApiError> {
        let body = RegisterBody {
            email,
            password,
            first_name,
            last_name,
        };
        self.execute(self.post("/auth/register", &Identity::default()).json(&body))
            .await
    }

    /// The authenticated user's profile.
    #[instrument(skip(self, identity))]
    pub async fn me(&self, identity: &Identity) -> Result<UserProfile, ApiError> {
        self.execute(self.get("/auth/me", identity)).await
    }

    /// The user's saved addresses, oldest first.
    #[instrument(skip(self, identity))]
    pub async fn addresses(&self, identity: &Identity) -> Result<Vec<Address>, ApiError> {
        self.execute(self.get("/user/addresses", identity)).await
    }

    /// Save a new address.
    #[instrument(skip(self, identity, payload))]
    pub async fn create_address(
        &self,
        identity: &Identity,
        payload: &AddressPayload,
    ) -> Result<Address, ApiError> {
        self.execute(self.post("/user/addresses", identity).json(payload))
            .await
    }

    /// Update an existing address.
    #[instrument(skip(self, identity, payload))]
    pub async fn update_address(
        &self,
        identity: &Identity,
        id: AddressId,
        payload: &AddressPayload,
    ) -> Result<Address, ApiError> {
        self.execute(self.put(&format!("/user/addresses/{id}"), identity).json(payload))
            .await
    }

    /// Delete an address.
    #[instrument(skip(self, identity))]
    pub async fn delete_address(&self, identity: &Identity, id: AddressId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .execute(self.delete(&format!("/user/addresses/{id}"), identity))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::MockBackend;

    #[tokio::test]
    async fn test_login_returns_bearer_token() {
        let backend = MockBackend::start().await;
        let client = backend.client();

        let tokens = client
            .login("shopper@example.com", "hunter2hunter2")
            .await
            .expect("login");
        assert_eq!(tokens.access_token, "token-1");
        assert_eq!(tokens.token_type, "bearer");

        // Credentials go in the body; no identity headers yet.
        let requests = backend.requests();
        assert!(requests[0].auth_header.is_none());
        let body = requests[0].body.as_ref().expect("body");
        assert_eq!(body["email"], "shopper@example.com");
    }
}
