use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use common_errors::AppError;
use subtle::ConstantTimeEq;

/// The bearer token that grants admin access, configured at deployment
#[derive(Clone)]
pub struct AdminToken(String);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }

    /// Constant-time comparison against a presented token. An empty
    /// configured token never matches, so a blank deployment value cannot
    /// open the admin surface.
    pub fn verify(&self, presented: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }
        self.0.as_bytes().ct_eq(presented.as_bytes()).unwrap_u8() == 1
    }
}

/// Extractor proving the request carried a valid admin bearer token.
///
/// Rejects with 401 when no token is presented and 403 when the token does
/// not match.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl<S> FromRequestParts<S> for AdminUser
where
    AdminToken: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts, state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Some(presented) = bearer_token(parts) else {
            return Err(AppError::unauthorized(
                "MISSING_TOKEN",
                "Authentication required",
            ));
        };

        let token = AdminToken::from_ref(state);
        if !token.verify(presented) {
            return Err(AppError::forbidden(
                "INVALID_TOKEN",
                "Admin access required",
            ));
        }

        Ok(AdminUser)
    }
}

/// On public routes an invalid or absent token degrades to an anonymous
/// caller instead of rejecting the request.
impl<S> OptionalFromRequestParts<S> for AdminUser
where
    AdminToken: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts, state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(presented) = bearer_token(parts) else {
            return Ok(None);
        };

        let token = AdminToken::from_ref(state);
        Ok(token.verify(presented).then_some(AdminUser))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    #[derive(Clone)]
    struct TestState {
        admin_token: AdminToken,
    }

    impl FromRef<TestState> for AdminToken {
        fn from_ref(state: &TestState) -> Self { state.admin_token.clone() }
    }

    async fn admin_route(_admin: AdminUser) -> &'static str { "ok" }

    async fn public_route(admin: Option<AdminUser>) -> String {
        format!("admin={}", admin.is_some())
    }

    fn test_app(token: &str) -> Router {
        Router::new()
            .route("/admin", get(admin_route))
            .route("/public", get(public_route))
            .with_state(TestState {
                admin_token: AdminToken::new(token),
            })
    }

    fn request(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn verify_matches_only_the_exact_token() {
        let token = AdminToken::new("secret-token");
        assert!(token.verify("secret-token"));
        assert!(!token.verify("secret-toke"));
        assert!(!token.verify("secret-token2"));
        assert!(!token.verify(""));
    }

    #[test]
    fn empty_configured_token_never_matches() {
        let token = AdminToken::new("");
        assert!(!token.verify(""));
        assert!(!token.verify("anything"));
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let response = test_app("secret-token")
            .oneshot(request("/admin", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() {
        let response = test_app("secret-token")
            .oneshot(request("/admin", Some("Token secret-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_token_is_forbidden() {
        let response = test_app("secret-token")
            .oneshot(request("/admin", Some("Bearer wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn valid_token_is_accepted() {
        let response = test_app("secret-token")
            .oneshot(request("/admin", Some("Bearer secret-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn optional_extractor_degrades_to_anonymous() {
        let app = test_app("secret-token");

        let response = app
            .clone()
            .oneshot(request("/public", None))
            .await
            .unwrap();
        let body =
            axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"admin=false");

        let response = app
            .clone()
            .oneshot(request("/public", Some("Bearer wrong")))
            .await
            .unwrap();
        let body =
            axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"admin=false");

        let response = app
            .oneshot(request("/public", Some("Bearer secret-token")))
            .await
            .unwrap();
        let body =
            axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"admin=true");
    }
}
