use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::admin;
use super::health;
use super::middleware::{caller_identity_middleware, logging_middleware};
use super::state::AppState;

/// Create the full router with application state
///
/// Requests exceeding `request_timeout` are answered with 408 and their
/// in-flight cache and store calls are dropped; detached audit writes are
/// unaffected.
pub fn create_router_with_state(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/admin", admin::create_admin_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn(caller_identity_middleware))
                .layer(middleware::from_fn(logging_middleware))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::domain::cache::{Cache, CachePolicy, EntityCache, MockCache};
    use crate::domain::dict::{Dict, DictRecord};
    use crate::domain::traits::EntityStore;
    use crate::domain::user::{User, UserRecord, UserStore};
    use crate::domain::DomainError;
    use crate::infrastructure::audit::{CacheAuditLogger, InMemoryAuditSink};
    use crate::infrastructure::cache::{AuditingEntityCache, KeyValueEntityCache};
    use crate::infrastructure::dict::{DictService, DictStore};
    use crate::infrastructure::storage::InMemoryEntityStore;
    use crate::infrastructure::user::UserService;

    struct TestApp {
        router: Router,
        cache: Arc<MockCache>,
        audit: Arc<InMemoryAuditSink>,
    }

    fn test_app() -> TestApp {
        let cache = Arc::new(MockCache::new());
        let audit = Arc::new(InMemoryAuditSink::new());
        let logger = CacheAuditLogger::with_defaults(audit.clone());

        let users: Arc<dyn EntityCache<User>> = Arc::new(AuditingEntityCache::new(
            Arc::new(KeyValueEntityCache::<User>::new(cache.clone(), CachePolicy::default())),
            logger.clone(),
        ));
        let dicts: Arc<dyn EntityCache<Dict>> = Arc::new(AuditingEntityCache::new(
            Arc::new(KeyValueEntityCache::<Dict>::new(cache.clone(), CachePolicy::default())),
            logger,
        ));

        let user_store: Arc<dyn UserStore> = Arc::new(InMemoryEntityStore::with_records(vec![
            UserRecord::new("u-1", "alice").with_password_hash("hash"),
        ]));
        let dict_store: Arc<DictStore> = Arc::new(InMemoryEntityStore::with_records(vec![
            DictRecord::new("D1", "Status", "status"),
        ]));

        let backend: Arc<dyn Cache> = cache.clone();
        let state = AppState::new(
            Arc::new(UserService::new(users, user_store)),
            Arc::new(DictService::new(dicts, dict_store)),
            backend,
        );

        TestApp {
            router: create_router_with_state(state, Duration::from_secs(5)),
            cache,
            audit,
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app();

        let response = app
            .router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_reports_unavailable_cache() {
        let app = test_app();
        app.cache.set_fail_reads(true);

        let response = app
            .router
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_get_user_returns_snapshot_and_audits() {
        let app = test_app();

        let request = Request::builder()
            .uri("/admin/users/u-1")
            .header("host", "admin.local")
            .header("x-user-id", "op-1")
            .header("x-dept-id", "d-1")
            .header("x-forwarded-for", "198.51.100.4")
            .body(Body::empty())
            .unwrap();

        let response = app.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());

        settle().await;
        let records = app.audit.records();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.creator.as_deref() == Some("op-1")));
        assert!(records.iter().all(|r| r.belong_dept.as_deref() == Some("d-1")));
        assert!(records.iter().all(|r| r.client_ip.as_deref() == Some("198.51.100.4")));
        assert!(records.iter().all(|r| r.host == "admin.local"));
        assert!(records.iter().all(|r| r.path == "/admin/users/u-1"));
    }

    #[tokio::test]
    async fn test_missing_dict_is_404_and_cached() {
        let app = test_app();

        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/admin/dicts/D404").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "not_found_error");

        assert_eq!(
            app.cache.raw("careful:tools:dict:info:D404").as_deref(),
            Some("not_found")
        );
    }

    #[tokio::test]
    async fn test_evict_dict_returns_no_content() {
        let app = test_app();

        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/admin/dicts/D1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(app.cache.raw("careful:tools:dict:info:D1").is_some());

        let response = app
            .router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/admin/dicts/D1/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(app.cache.raw("careful:tools:dict:info:D1").is_none());
    }

    #[tokio::test]
    async fn test_cache_failure_on_evict_is_generic_500() {
        let app = test_app();
        app.cache.set_fail_writes(true);
        app.cache.set_fail_reads(true);

        let response = app
            .router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/admin/users/u-1/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_get_user_by_username_reads_store() {
        let app = test_app();

        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/admin/users/by-username/alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["id"], "u-1");
        assert!(app.cache.raw("careful:system:user:info:u-1").is_none());

        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/admin/users/by-username/bob")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[derive(Debug)]
    struct SlowUserStore;

    #[async_trait::async_trait]
    impl EntityStore for SlowUserStore {
        type Record = UserRecord;

        async fn find_by_id(&self, _id: &str) -> Result<Option<UserRecord>, DomainError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
    }

    #[async_trait::async_trait]
    impl UserStore for SlowUserStore {
        async fn find_by_username(&self, _username: &str) -> Result<Option<UserRecord>, DomainError> {
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_is_answered_with_request_timeout() {
        let cache = Arc::new(MockCache::new());
        let users: Arc<dyn EntityCache<User>> = Arc::new(KeyValueEntityCache::<User>::new(
            cache.clone(),
            CachePolicy::default(),
        ));
        let dicts: Arc<dyn EntityCache<Dict>> = Arc::new(KeyValueEntityCache::<Dict>::new(
            cache.clone(),
            CachePolicy::default(),
        ));
        let dict_store: Arc<DictStore> = Arc::new(InMemoryEntityStore::<DictRecord>::new());
        let state = AppState::new(
            Arc::new(UserService::new(users, Arc::new(SlowUserStore))),
            Arc::new(DictService::new(dicts, dict_store)),
            cache.clone(),
        );
        let router = create_router_with_state(state, Duration::from_secs(2));

        let response = router
            .oneshot(Request::builder().uri("/admin/users/u-1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(cache.raw("careful:system:user:info:u-1").is_none());
    }
}
