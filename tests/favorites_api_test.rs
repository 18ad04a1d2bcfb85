use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use country_favorites::utils::error::StoreResult;
use country_favorites::{
    create_router, AppState, FavoriteRecord, FavoriteStore, MemoryFavoriteStore, StoreError,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const USER: &str = "64f1c2aa9b1e8a0012345678";

fn app(store: &Arc<MemoryFavoriteStore>) -> Router {
    let state = AppState::new(Arc::clone(store) as Arc<dyn FavoriteStore>);
    create_router(state, "/api")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).unwrap()
}

fn delete(uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("x-user-id", user)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, user: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-user-id", user)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn united_states() -> Value {
    json!({"countryCode": "US", "name": "United States", "flag": "🇺🇸"})
}

#[tokio::test]
async fn test_add_duplicate_remove_check_scenario() {
    let store = Arc::new(MemoryFavoriteStore::new());

    let (status, body) = send(app(&store), post_json("/api/favorites", USER, &united_states())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["countryCode"], "US");
    assert_eq!(body["name"], "United States");
    assert_eq!(body["flag"], "🇺🇸");
    assert_eq!(body["ownerId"], USER);
    assert!(body["createdAt"].is_string());

    let (status, body) = send(app(&store), post_json("/api/favorites", USER, &united_states())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Country already in favorites"}));
    assert_eq!(store.len().await, 1);

    let (status, body) = send(app(&store), delete("/api/favorites/US", USER)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Favorite removed"}));

    let (status, body) = send(app(&store), get("/api/favorites/check/US", Some(USER))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"isFavorite": false}));
}

#[tokio::test]
async fn test_check_reports_existing_favorite() {
    let store = Arc::new(MemoryFavoriteStore::new());
    send(app(&store), post_json("/api/favorites", USER, &united_states())).await;

    let (status, body) = send(app(&store), get("/api/favorites/check/US", Some(USER))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"isFavorite": true}));

    // 代碼比對區分大小寫
    let (_, body) = send(app(&store), get("/api/favorites/check/us", Some(USER))).await;
    assert_eq!(body, json!({"isFavorite": false}));
}

#[tokio::test]
async fn test_list_empty_for_new_user() {
    let store = Arc::new(MemoryFavoriteStore::new());

    let (status, body) = send(app(&store), get("/api/favorites", Some(USER))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_returns_own_favorites_in_order() {
    let store = Arc::new(MemoryFavoriteStore::new());
    for (code, name, flag) in [("JP", "Japan", "🇯🇵"), ("BR", "Brazil", "🇧🇷")] {
        let body = json!({"countryCode": code, "name": name, "flag": flag});
        let (status, _) = send(app(&store), post_json("/api/favorites", USER, &body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    send(app(&store), post_json("/api/favorites", "someone-else", &united_states())).await;

    let (status, body) = send(app(&store), get("/api/favorites", Some(USER))).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["countryCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["JP", "BR"]);
}

#[tokio::test]
async fn test_add_with_missing_or_empty_fields_is_rejected() {
    let store = Arc::new(MemoryFavoriteStore::new());
    let bodies = [
        json!({"name": "France", "flag": "🇫🇷"}),
        json!({"countryCode": "FR", "flag": "🇫🇷"}),
        json!({"countryCode": "FR", "name": "France"}),
        json!({"countryCode": "", "name": "France", "flag": "🇫🇷"}),
        json!({"countryCode": "FR", "name": "", "flag": "🇫🇷"}),
        json!({"countryCode": "FR", "name": "France", "flag": ""}),
        json!({}),
    ];

    for body in bodies {
        let (status, response) = send(app(&store), post_json("/api/favorites", USER, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            response,
            json!({"message": "Country code, name, and flag are required"})
        );
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let store = Arc::new(MemoryFavoriteStore::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/favorites")
        .header("x-user-id", USER)
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app(&store), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_body_without_json_content_type_is_missing_fields() {
    let store = Arc::new(MemoryFavoriteStore::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/favorites")
        .header("x-user-id", USER)
        .body(Body::from(united_states().to_string()))
        .unwrap();

    let (status, body) = send(app(&store), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": "Country code, name, and flag are required"})
    );
    assert!(store.is_empty().await);

    let request = Request::builder()
        .method("POST")
        .uri("/api/favorites")
        .header("x-user-id", USER)
        .header("content-type", "text/plain")
        .body(Body::from(united_states().to_string()))
        .unwrap();

    let (status, body) = send(app(&store), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Country code, name, and flag are required");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_remove_unknown_favorite_is_not_found() {
    let store = Arc::new(MemoryFavoriteStore::new());
    send(app(&store), post_json("/api/favorites", USER, &united_states())).await;

    let (status, body) = send(app(&store), delete("/api/favorites/FR", USER)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Favorite not found"}));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let store = Arc::new(MemoryFavoriteStore::new());
    send(app(&store), post_json("/api/favorites", USER, &united_states())).await;

    let (status, _) = send(app(&store), delete("/api/favorites/US", "intruder")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app(&store), post_json("/api/favorites", "intruder", &united_states())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let store = Arc::new(MemoryFavoriteStore::new());

    let (status, body) = send(app(&store), get("/api/favorites", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"message": "Not authorized, no token"}));

    let (status, _) = send(app(&store), get("/api/favorites/check/US", Some("   "))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_custom_identity_header_and_root_prefix() {
    let store = Arc::new(MemoryFavoriteStore::new());
    let state = AppState::new(Arc::clone(&store) as Arc<dyn FavoriteStore>)
        .with_identity_header("x-auth-user")
        .unwrap();
    let router = create_router(state, "");

    let request = Request::builder()
        .method("GET")
        .uri("/favorites")
        .header("x-auth-user", USER)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(router.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(router, get("/favorites", Some(USER))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoints() {
    let store = Arc::new(MemoryFavoriteStore::new());

    let (status, body) = send(app(&store), get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(app(&store), get("/health/ready", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ready"}));
}

#[tokio::test]
async fn test_concurrent_adds_create_one_record() {
    let store = Arc::new(MemoryFavoriteStore::new());

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let router = app(&store);
            tokio::spawn(async move {
                send(router, post_json("/api/favorites", USER, &united_states()))
                    .await
                    .0
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => {}
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.len().await, 1);
}

struct UnreachableStore;

#[async_trait::async_trait]
impl FavoriteStore for UnreachableStore {
    async fn find_by_owner(&self, _: &str) -> StoreResult<Vec<FavoriteRecord>> {
        Err(unreachable_error())
    }

    async fn find_one(&self, _: &str, _: &str) -> StoreResult<Option<FavoriteRecord>> {
        Err(unreachable_error())
    }

    async fn insert(&self, _: FavoriteRecord) -> StoreResult<FavoriteRecord> {
        Err(unreachable_error())
    }

    async fn delete_one(&self, _: &str, _: &str) -> StoreResult<bool> {
        Err(unreachable_error())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(unreachable_error())
    }
}

fn unreachable_error() -> StoreError {
    StoreError::Io(std::io::Error::other("connection refused"))
}

#[tokio::test]
async fn test_storage_fault_is_internal_error() {
    let router = create_router(AppState::new(Arc::new(UnreachableStore)), "/api");

    let (status, body) = send(router.clone(), get("/api/favorites", Some(USER))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));

    let (status, _) = send(
        router.clone(),
        post_json("/api/favorites", USER, &united_states()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(router.clone(), delete("/api/favorites/US", USER)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(router.clone(), get("/api/favorites/check/US", Some(USER))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(router, get("/health/ready", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "unavailable"}));
}
