//! End-to-end tests for the HTTP surface.
//!
//! Each test builds the full router over a fresh in-memory database and
//! drives it with `tower::ServiceExt::oneshot`, so requests exercise the
//! same extractors, handlers, and error translation as a live server.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use task_api::db::Database;
use task_api::server::build_router;
use task_api::service::TaskService;
use tower::ServiceExt;

fn create_test_app() -> Router {
    let db = Database::open_in_memory().expect("Failed to create in-memory database");
    build_router(TaskService::new(db))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}

mod health_endpoint {
    use super::*;

    #[tokio::test]
    async fn health_check_returns_200_with_status() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
    }
}

mod create_endpoint {
    use super::*;

    #[tokio::test]
    async fn post_with_title_only_returns_201_with_defaults() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request("POST", "/tasks", json!({"title": "Buy milk"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({"id": 1, "title": "Buy milk", "description": null, "completed": false})
        );
    }

    #[tokio::test]
    async fn post_with_description_stores_it() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/tasks",
                json!({"title": "Write report", "description": "quarterly numbers"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["description"], "quarterly numbers");
        assert_eq!(body["completed"], false);
    }

    #[tokio::test]
    async fn post_without_title_returns_422_with_structured_body() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/tasks",
                json!({"description": "no title here"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["code"], "MISSING_REQUIRED_FIELD");
        assert_eq!(body["field"], "title");
        assert_eq!(body["message"], "title is required");
    }

    #[tokio::test]
    async fn post_with_wrong_field_type_returns_422_invalid_value() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request("POST", "/tasks", json!({"title": 123})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["code"], "INVALID_FIELD_VALUE");
    }

    #[tokio::test]
    async fn post_ignores_caller_supplied_id() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/tasks",
                json!({"id": 777, "title": "storage assigns ids"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
    }
}

mod get_endpoints {
    use super::*;

    #[tokio::test]
    async fn get_list_returns_created_tasks() {
        let app = create_test_app();

        app.clone()
            .oneshot(json_request("POST", "/tasks", json!({"title": "one"})))
            .await
            .unwrap();
        app.clone()
            .oneshot(json_request("POST", "/tasks", json!({"title": "two"})))
            .await
            .unwrap();

        let response = app.oneshot(get_request("/tasks")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_by_id_returns_task() {
        let app = create_test_app();

        app.clone()
            .oneshot(json_request("POST", "/tasks", json!({"title": "findable"})))
            .await
            .unwrap();

        let response = app.oneshot(get_request("/tasks/1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"], "findable");
    }

    #[tokio::test]
    async fn get_unknown_id_returns_404_with_detail() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/tasks/999")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["code"], "TASK_NOT_FOUND");
        assert_eq!(body["message"], "Task not found: 999");
    }

    #[tokio::test]
    async fn repeated_get_returns_identical_bodies() {
        let app = create_test_app();

        app.clone()
            .oneshot(json_request("POST", "/tasks", json!({"title": "stable"})))
            .await
            .unwrap();

        let first = json_body(app.clone().oneshot(get_request("/tasks/1")).await.unwrap()).await;
        let second = json_body(app.oneshot(get_request("/tasks/1")).await.unwrap()).await;

        assert_eq!(first, second);
    }
}

mod server_binding {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use task_api::server::start_server;

    #[tokio::test]
    async fn start_server_binds_requested_host() {
        let db = Database::open_in_memory().expect("Failed to create in-memory database");
        let service = TaskService::new(db);

        // Port 0 lets the OS pick a free port
        let (shutdown_tx, addr) = start_server(service, IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
            .await
            .expect("Failed to start server");

        assert_eq!(addr.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_ne!(addr.port(), 0);

        let _ = shutdown_tx.send(());
    }
}

mod update_endpoint {
    use super::*;

    #[tokio::test]
    async fn put_completed_only_keeps_other_fields() {
        let app = create_test_app();

        app.clone()
            .oneshot(json_request("POST", "/tasks", json!({"title": "Buy milk"})))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request("PUT", "/tasks/1", json!({"completed": true})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({"id": 1, "title": "Buy milk", "description": null, "completed": true})
        );
    }

    #[tokio::test]
    async fn put_replaces_supplied_fields() {
        let app = create_test_app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/tasks",
                json!({"title": "old", "description": "keep me"}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request("PUT", "/tasks/1", json!({"title": "new"})))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["title"], "new");
        assert_eq!(body["description"], "keep me");
    }

    #[tokio::test]
    async fn put_unknown_id_returns_404() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request("PUT", "/tasks/999", json!({"completed": true})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod delete_endpoint {
    use super::*;

    #[tokio::test]
    async fn delete_returns_204_and_task_is_gone() {
        let app = create_test_app();

        app.clone()
            .oneshot(json_request("POST", "/tasks", json!({"title": "doomed"})))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/tasks/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());

        let followup = app.oneshot(get_request("/tasks/1")).await.unwrap();
        assert_eq!(followup.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_unknown_id_returns_404() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/tasks/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
