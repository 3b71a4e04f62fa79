//! Integration tests for API endpoints.
//!
//! These tests use mock services to exercise routes without requiring
//! an actual database connection.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use user_api::api::{create_router, AppState};
use user_api::domain::{UserId, UserInput, UserView};
use user_api::errors::{AppError, AppResult};
use user_api::infra::Database;
use user_api::services::UserService;

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock user service: id 1 exists, "taken@example.com" is already in use.
struct MockUserService;

fn mock_view(id: UserId) -> UserView {
    UserView {
        id,
        name: "John".to_string(),
        email: "john@example.com".to_string(),
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn list_users(&self) -> AppResult<Vec<UserView>> {
        Ok(vec![
            mock_view(1),
            UserView {
                id: 2,
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            },
        ])
    }

    async fn get_user(&self, id: UserId) -> AppResult<UserView> {
        if id == 1 {
            Ok(mock_view(id))
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn create_user(&self, input: UserInput) -> AppResult<UserView> {
        if input.email == "taken@example.com" {
            return Err(AppError::EmailConflict);
        }
        Ok(UserView {
            id: 42,
            name: input.name,
            email: input.email,
        })
    }

    async fn update_user(&self, id: UserId, input: UserInput) -> AppResult<UserView> {
        if id != 1 {
            return Err(AppError::NotFound);
        }
        if input.email == "taken@example.com" {
            return Err(AppError::EmailConflict);
        }
        Ok(UserView {
            id,
            name: input.name,
            email: input.email,
        })
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        if id == 1 {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

/// Build a router over the mock service and a disconnected database handle.
fn app() -> axum::Router {
    let state = AppState::new(
        Arc::new(MockUserService),
        Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
    );
    create_router(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_root_returns_welcome_message() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_users_returns_views_without_password() {
    let response = app()
        .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], 1);
    assert_eq!(users[1]["email"], "jane@example.com");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn test_get_user_success() {
    let response = app()
        .oneshot(Request::builder().uri("/users/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["email"], "john@example.com");
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_get_user_not_found() {
    let response = app()
        .oneshot(Request::builder().uri("/users/99").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_user_success() {
    let body = serde_json::json!({
        "name": "New User",
        "email": "new@example.com",
        "password": "secret"
    });
    let response = app()
        .oneshot(json_request("POST", "/users", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "new@example.com");
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_create_user_email_conflict() {
    let body = serde_json::json!({
        "name": "Dup User",
        "email": "taken@example.com",
        "password": "secret"
    });
    let response = app()
        .oneshot(json_request("POST", "/users", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "EMAIL_CONFLICT");
}

#[tokio::test]
async fn test_update_user_success() {
    let body = serde_json::json!({
        "name": "John Renamed",
        "email": "john@example.com",
        "password": "secret"
    });
    let response = app()
        .oneshot(json_request("PUT", "/users/1", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "John Renamed");
}

#[tokio::test]
async fn test_update_user_not_found() {
    let body = serde_json::json!({
        "name": "Nobody",
        "email": "nobody@example.com",
        "password": "secret"
    });
    let response = app()
        .oneshot(json_request("PUT", "/users/99", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_email_conflict() {
    let body = serde_json::json!({
        "name": "John",
        "email": "taken@example.com",
        "password": "secret"
    });
    let response = app()
        .oneshot(json_request("PUT", "/users/1", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_user_success() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_user_not_found() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_degraded_without_database() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
}
