// Token manager against a local auth server:
//  - valid cached tokens never hit the network
//  - user tokens close to expiry go through keep-alive
//  - a burst of callers on an expired token triggers one token request

#[cfg(test)]
mod test {

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Form, Json};
use tokio::sync::Mutex;

use crate::auth::token::TokenKind;
use crate::error::SdkError;
use crate::tests::common::{
    basic_provider, client_for, http_session, json, oauth_provider, spawn_axum, user_token, user_token_body, Router,
};

#[derive(Default)]
struct Hits {
    token: AtomicUsize,
    keep_alive: AtomicUsize,
}

fn auth_router(hits: Arc<Hits>) -> Router {
    let token_hits = hits.clone();
    let keep_alive_hits = hits.clone();
    Router::new()
        .route("/api/v1/auth/token", post(move |headers: HeaderMap| {
            let hits = token_hits.clone();
            async move {
                let n = hits.token.fetch_add(1, Ordering::SeqCst);
                // slow enough for concurrent callers to pile up on the lock
                tokio::time::sleep(Duration::from_millis(100)).await;
                assert!(headers.get("authorization").unwrap().to_str().unwrap().starts_with("Basic "));
                Json(user_token_body(&format!("issued-{}", n), 1800))
            }
        }))
        .route("/api/v1/auth/keep-alive", post(move |headers: HeaderMap| {
            let hits = keep_alive_hits.clone();
            async move {
                hits.keep_alive.fetch_add(1, Ordering::SeqCst);
                let bearer = headers.get("authorization").unwrap().to_str().unwrap().to_owned();
                Json(user_token_body(&format!("renewed-{}", bearer.trim_start_matches("Bearer ")), 1800))
            }
        }))
}

#[tokio::test]
async fn cached_token_is_reused_without_network() {
    let hits = Arc::new(Hits::default());
    let (h, addr) = spawn_axum(auth_router(hits.clone())).await;

    let provider = basic_provider().with_cached_token(user_token("long-lived", 600));
    let client = client_for(addr.port(), provider, http_session());

    for _ in 0..3 {
        assert_eq!(client.credentials().get_token().await.unwrap(), "long-lived");
    }
    assert_eq!(hits.token.load(Ordering::SeqCst), 0);
    assert_eq!(hits.keep_alive.load(Ordering::SeqCst), 0);

    h.abort();
}

#[tokio::test]
async fn user_token_in_keep_alive_window_is_renewed() {
    let hits = Arc::new(Hits::default());
    let (h, addr) = spawn_axum(auth_router(hits.clone())).await;

    let provider = basic_provider().with_cached_token(user_token("old", 30));
    let client = client_for(addr.port(), provider, http_session());

    let token = client.get_access_token().await.unwrap();
    assert_eq!(token.token, "renewed-old");
    assert_eq!(token.kind, TokenKind::User);
    assert_eq!(hits.keep_alive.load(Ordering::SeqCst), 1);
    assert_eq!(hits.token.load(Ordering::SeqCst), 0);

    // renewed token is cached now
    assert_eq!(client.credentials().get_token().await.unwrap(), "renewed-old");
    assert_eq!(hits.keep_alive.load(Ordering::SeqCst), 1);

    h.abort();
}

#[tokio::test]
async fn nearly_expired_user_token_is_reissued() {
    let hits = Arc::new(Hits::default());
    let (h, addr) = spawn_axum(auth_router(hits.clone())).await;

    let provider = basic_provider().with_cached_token(user_token("old", 3));
    let client = client_for(addr.port(), provider, http_session());

    assert_eq!(client.credentials().get_token().await.unwrap(), "issued-0");
    assert_eq!(hits.keep_alive.load(Ordering::SeqCst), 0);
    assert_eq!(hits.token.load(Ordering::SeqCst), 1);

    h.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_refresh() {
    let hits = Arc::new(Hits::default());
    let (h, addr) = spawn_axum(auth_router(hits.clone())).await;

    let client = client_for(addr.port(), basic_provider(), http_session());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.credentials().get_token().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "issued-0");
    }
    assert_eq!(hits.token.load(Ordering::SeqCst), 1, "expired token must be refreshed exactly once");

    h.abort();
}

#[tokio::test]
async fn outer_lock_serializes_lookups() {
    let hits = Arc::new(Hits::default());
    let (h, addr) = spawn_axum(auth_router(hits.clone())).await;

    let client = client_for(addr.port(), basic_provider(), http_session());
    let outer = Mutex::new(());

    let first = client.credentials().get_access_token_with(&outer).await.unwrap();
    let second = client.credentials().get_access_token_with(&outer).await.unwrap();
    assert_eq!(first.token, second.token);
    assert_eq!(hits.token.load(Ordering::SeqCst), 1);

    h.abort();
}

#[tokio::test]
async fn oauth_client_credentials_flow() {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();
    let router = Router::new().route("/api/oauth/token", post(move |Form(form): Form<HashMap<String, String>>| {
        let hits = hits_clone.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            assert_eq!(form.get("grant_type").map(String::as_str), Some("client_credentials"));
            assert_eq!(form.get("client_id").map(String::as_str), Some("client-id"));
            assert_eq!(form.get("client_secret").map(String::as_str), Some("client-secret"));
            Json(json!({
                "access_token": "oauth-abc",
                "expires_in": 300,
                "scope": "api-role:1 api-role:2",
                "token_type": "Bearer"
            }))
        }
    }));
    let (h, addr) = spawn_axum(router).await;

    let client = client_for(addr.port(), oauth_provider(), http_session());
    let token = client.get_access_token().await.unwrap();

    assert_eq!(token.kind, TokenKind::OAuth);
    assert_eq!(token.token, "oauth-abc");
    assert_eq!(token.scope, Some(vec!["api-role:1".to_string(), "api-role:2".to_string()]));
    assert!(token.seconds_remaining() > 290);

    // 300s left is above the 3s OAuth cache window
    client.credentials().get_token().await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    h.abort();
}

#[tokio::test]
async fn rejected_credentials_surface_http_error() {
    let router = Router::new().route(
        "/api/v1/auth/token",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"httpStatus": 401}))) }),
    );
    let (h, addr) = spawn_axum(router).await;

    let client = client_for(addr.port(), basic_provider(), http_session());
    let err = client.credentials().get_token().await.unwrap_err();

    match err {
        SdkError::Http { status, body, .. } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("401"));
        }
        other => panic!("unexpected error {other:?}"),
    }

    h.abort();
}

#[tokio::test]
async fn keep_alive_failure_is_not_masked_by_reauth() {
    let token_hits = Arc::new(AtomicUsize::new(0));
    let token_hits_clone = token_hits.clone();
    let router = Router::new()
        .route("/api/v1/auth/keep-alive", post(|| async { StatusCode::UNAUTHORIZED }))
        .route("/api/v1/auth/token", post(move || {
            let hits = token_hits_clone.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(user_token_body("issued", 1800))
            }
        }));
    let (h, addr) = spawn_axum(router).await;

    let provider = basic_provider().with_cached_token(user_token("old", 30));
    let client = client_for(addr.port(), provider, http_session());

    let err = client.credentials().get_token().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(token_hits.load(Ordering::SeqCst), 0);

    h.abort();
}

}
