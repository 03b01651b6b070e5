//! Authentication middleware and extractor for axum.
//!
//! ```text
//! Request → auth_middleware → resolves Bearer token to an Actor
//!                                      ↓
//!                              Handler → Caller extractor builds CommandMetadata
//! ```
//!
//! The middleware uses the `IdentityProvider` port, so JWT and static token
//! tables look the same to the API. Every route behind it requires a token.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::foundation::{Actor, CommandMetadata};
use crate::ports::IdentityProvider;

use super::super::error::ApiError;

/// Auth middleware state - wraps the identity provider.
pub type AuthState = Arc<dyn IdentityProvider>;

/// Header carrying a caller-supplied correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resolves the Bearer token and injects the [`Actor`] into extensions.
///
/// A missing, malformed or rejected token ends the request with 401.
pub async fn auth_middleware(
    State(identity): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        tracing::warn!(path = %request.uri().path(), "request without bearer token");
        return ApiError::unauthorized("Authentication required").into_response();
    };

    match identity.resolve(token).await {
        Ok(actor) => {
            tracing::debug!(user_id = %actor.id, role = %actor.role.as_str(), "actor resolved");
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => {
            if e.is_transient() {
                tracing::error!(error = %e, "identity provider unavailable");
            } else {
                tracing::warn!(error = %e, path = %request.uri().path(), "token rejected");
            }
            ApiError::from(e).into_response()
        }
    }
}

/// The authenticated caller, as command metadata.
///
/// Reads the [`Actor`] placed by [`auth_middleware`] and tags the metadata
/// with the request id, if one was sent.
#[derive(Debug, Clone)]
pub struct Caller(pub CommandMetadata);

impl<S> axum::extract::FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let actor = parts
                .extensions
                .get::<Actor>()
                .cloned()
                .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

            let mut metadata = CommandMetadata::new(actor).with_source("api");
            if let Some(id) = parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
            {
                metadata = metadata.with_correlation_id(id);
            }
            Ok(Caller(metadata))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::StaticIdentityProvider;
    use crate::domain::foundation::{Role, UserId};
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn hr() -> Actor {
        Actor::new(UserId::new("hr-1").unwrap(), Role::Hr)
    }

    async fn whoami(Caller(metadata): Caller) -> String {
        format!(
            "{}:{}",
            metadata.actor.id,
            metadata.correlation_id()
        )
    }

    fn app() -> Router {
        let identity: AuthState = Arc::new(StaticIdentityProvider::new().with_actor("hr-token", hr()));
        Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(identity, auth_middleware))
    }

    async fn call(auth: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        assert_eq!(call(Some("Bearer hr-token")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        assert_eq!(call(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(call(Some("Bearer ")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(call(Some("Basic dXNlcjpwYXNz")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        assert_eq!(call(Some("Bearer nope")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_id_becomes_correlation_id() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer hr-token")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"hr-1:req-42");
    }

    #[tokio::test]
    async fn caller_without_actor_is_rejected() {
        use axum::extract::FromRequestParts;

        let request: HttpRequest<()> = HttpRequest::builder().uri("/x").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let err = Caller::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
