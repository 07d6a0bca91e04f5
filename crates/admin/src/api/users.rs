//! User management endpoints.

use serde::Serialize;
use tracing::instrument;
use voidwear_core::{UserId, UserRole};

use super::types::{AdminUser, AuthTokens, RoleChange, UserProfile};
use super::{AdminClient, ApiError};

/// Request body for `POST /auth/login`.
#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body for `POST /admin/users`.
#[derive(Debug, Serialize)]
struct NewUserBody<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    role: UserRole,
}

impl AdminClient {
    /// Exchange operator credentials for a bearer token.
    ///
    /// The role check happens afterwards via [`Self::me`]; the login endpoint
    /// itself is shared with the storefront.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ApiError> {
        let body = LoginBody { email, password };
        self.execute(self.post_bare("/auth/login").json(&body)).await
    }

    /// The authenticated user's profile.
    #[instrument(skip(self, token))]
    pub async fn me(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.execute(self.get("/auth/me", token)).await
    }

    /// All registered users.
    #[instrument(skip(self, token))]
    pub async fn users(&self, token: &str) -> Result<Vec<AdminUser>, ApiError> {
        self.execute(self.get("/admin/users", token)).await
    }

    /// Create a user with an explicit role.
    #[instrument(skip(self, token, password))]
    pub async fn create_user(
        &self,
        token: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        role: UserRole,
    ) -> Result<AdminUser, ApiError> {
        let body = NewUserBody {
            email,
            password,
            first_name,
            last_name,
            role,
        };
        self.execute(self.post("/admin/users", token).json(&body))
            .await
    }

    /// Change a user's role.
    #[instrument(skip(self, token))]
    pub async fn update_user_role(
        &self,
        token: &str,
        id: UserId,
        role: UserRole,
    ) -> Result<AdminUser, ApiError> {
        self.execute(
            self.put(&format!("/admin/users/{id}/role"), token)
                .json(&RoleChange { role }),
        )
        .await
    }

    /// Soft-delete a user; the row stays listed but logins are refused.
    #[instrument(skip(self, token))]
    pub async fn deactivate_user(&self, token: &str, id: UserId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .execute(self.delete(&format!("/admin/users/{id}"), token))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::MockBackend;
    use super::*;

    #[tokio::test]
    async fn test_login_sends_no_bearer_token() {
        let backend = MockBackend::start().await;
        let client = backend.client();

        let tokens = client
            .login("boss@example.com", "hunter2hunter2")
            .await
            .expect("login");
        assert_eq!(tokens.access_token, "token-1");

        let requests = backend.requests();
        assert!(requests[0].auth_header.is_none());
    }

    #[tokio::test]
    async fn test_role_change_puts_to_scoped_path() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        backend.stub(
            "PUT",
            "/admin/users/7/role",
            serde_json::json!({
                "id": 7,
                "email": "ana@example.com",
                "first_name": "Ana",
                "last_name": "Paz",
                "role": "admin"
            }),
        );

        let user = client
            .update_user_role("token-1", UserId::new(7), UserRole::Admin)
            .await
            .expect("update role");
        assert_eq!(user.role, UserRole::Admin);

        let requests = backend.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].path, "/admin/users/7/role");
        assert_eq!(
            requests[0].auth_header.as_deref(),
            Some("Bearer token-1")
        );
        assert_eq!(
            requests[0].body.as_ref().expect("body")["role"],
            "admin"
        );
    }
}
