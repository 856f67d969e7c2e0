//! Session cookie middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use super::store::SessionStore;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "louaj_session";

/// Resolve the request's session and insert it as an extension.
///
/// Handlers extract it with `Extension<Session>`. When a new session is
/// started, the response sets the cookie.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (session, created) = store.resume(cookie.as_deref()).await;

    let id = session.id();
    req.extensions_mut().insert(session);
    let response = next.run(req).await;

    if !created {
        return response;
    }

    debug!(session = %id, "started session");
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(store.secure_cookies());

    (jar.add(cookie), response).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    use super::*;
    use crate::session::{Session, SessionConfig};

    async fn whoami(Extension(session): Extension<Session>) -> String {
        session.id().to_string()
    }

    fn app(store: SessionStore) -> Router {
        Router::new()
            .route("/", get(whoami))
            .layer(axum::middleware::from_fn_with_state(
                store,
                session_middleware,
            ))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn first_visit_sets_cookie() {
        let store = SessionStore::new(&SessionConfig::default());

        let response = app(store)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let id = body_string(response).await;

        assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}={id}")));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(!set_cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn returning_visit_keeps_session() {
        let store = SessionStore::new(&SessionConfig::default());
        let existing = store.create().await;

        let response = app(store)
            .oneshot(
                Request::get("/")
                    .header(
                        header::COOKIE,
                        format!("{SESSION_COOKIE}={}", existing.id()),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_string(response).await, existing.id().to_string());
    }

    #[tokio::test]
    async fn secure_flag_follows_config() {
        let store = SessionStore::new(&SessionConfig {
            secure_cookies: true,
            ..SessionConfig::default()
        });

        let response = app(store)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(set_cookie.to_str().unwrap().contains("Secure"));
    }
}
