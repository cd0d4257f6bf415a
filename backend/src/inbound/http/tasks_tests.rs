//! Tests for task HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, OperationResult, TaskPriority, UserRole};
use crate::inbound::http::test_utils::{MockPorts, bearer, fixed_now, test_app, test_caller};

fn payload_for(caller: CallerIdentity, id: TaskId) -> TaskPayload {
    TaskPayload {
        id,
        owner_id: *caller.user_id(),
        title: "Write report".to_owned(),
        description: String::new(),
        priority: TaskPriority::High,
        is_completed: false,
        category_id: None,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

#[actix_web::test]
async fn create_task_returns_created_with_location() {
    let caller = test_caller(UserRole::User);
    let id = TaskId::random();
    let mut ports = MockPorts::for_caller(caller);
    ports
        .tasks
        .expect_create()
        .withf(move |request, _| {
            request.id == Some(id)
                && request.title == "Write report"
                && request.priority == TaskPriority::High
        })
        .times(1)
        .returning(move |request, _| OperationResult::success(payload_for(request.caller, id)));
    let (state, log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/tasks")
        .insert_header(bearer())
        .set_json(json!({ "id": id.to_string(), "title": " Write report ", "priority": "high" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(location, Some(format!("/api/v1/tasks/{id}")));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], json!(id.to_string()));
    assert_eq!(body["priority"], json!("high"));
    assert!(log.entries().is_empty());
}

#[actix_web::test]
async fn create_task_rejects_blank_title_without_calling_the_handler() {
    let caller = test_caller(UserRole::User);
    let mut ports = MockPorts::for_caller(caller);
    ports.tasks.expect_create().never();
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/tasks")
        .insert_header(bearer())
        .set_json(json!({ "title": "   " }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["statusCode"], json!(400));
    assert_eq!(body["statusPhrase"], json!("Bad Request"));
}

#[actix_web::test]
async fn get_missing_task_maps_to_not_found_body() {
    let caller = test_caller(UserRole::User);
    let id = TaskId::random();
    let mut ports = MockPorts::for_caller(caller);
    ports
        .tasks_query
        .expect_get()
        .times(2)
        .returning(move |_, id, _| {
            OperationResult::failure(Error::not_found(format!("No task found with id {id}")))
        });
    let (state, log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    for _ in 0..2 {
        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/tasks/{id}"))
            .insert_header(bearer())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({
                "statusCode": 404,
                "statusPhrase": "Not Found",
                "timestamp": "2026-10-19T12:00:00Z",
                "errors": [format!("No task found with id {id}")],
            })
        );
    }
    assert!(log.entries().is_empty());
}

#[actix_web::test]
async fn get_foreign_task_is_forbidden() {
    let caller = test_caller(UserRole::User);
    let mut ports = MockPorts::for_caller(caller);
    ports
        .tasks_query
        .expect_get()
        .returning(|_, _, _| OperationResult::failure(Error::user_not_allowed()));
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/tasks/{}", TaskId::random()))
        .insert_header(bearer())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["statusPhrase"], json!("Forbidden Request"));
}

#[actix_web::test]
async fn get_task_rejects_malformed_identifier() {
    let caller = test_caller(UserRole::User);
    let mut ports = MockPorts::for_caller(caller);
    ports.tasks_query.expect_get().never();
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/tasks/not-a-uuid")
        .insert_header(bearer())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["errors"], json!(["task id must be a valid UUID"]));
}

#[actix_web::test]
async fn update_fault_maps_to_logged_server_error() {
    let caller = test_caller(UserRole::User);
    let mut ports = MockPorts::for_caller(caller);
    ports
        .tasks
        .expect_update()
        .withf(|request, _| request.patch.is_completed == Some(true))
        .times(1)
        .returning(|_, _| OperationResult::failure(Error::unknown("connection reset")));
    let (state, log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/v1/tasks/{}", TaskId::random()))
        .insert_header(bearer())
        .set_json(json!({ "isCompleted": true }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["statusPhrase"], json!("Server Error"));
    assert_eq!(body["errors"], json!(["Unknown Error"]));
    assert_eq!(log.entries().len(), 1);
}

#[actix_web::test]
async fn update_can_detach_category() {
    let caller = test_caller(UserRole::User);
    let id = TaskId::random();
    let mut ports = MockPorts::for_caller(caller);
    ports
        .tasks
        .expect_update()
        .withf(|request, _| request.patch.category_id == Some(None))
        .times(1)
        .returning(move |_, _| OperationResult::success(payload_for(caller, id)));
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/v1/tasks/{id}"))
        .insert_header(bearer())
        .set_json(json!({ "categoryId": null }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn update_rejects_empty_patch() {
    let caller = test_caller(UserRole::User);
    let mut ports = MockPorts::for_caller(caller);
    ports.tasks.expect_update().never();
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/v1/tasks/{}", TaskId::random()))
        .insert_header(bearer())
        .set_json(json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_task_returns_no_content() {
    let caller = test_caller(UserRole::User);
    let id = TaskId::random();
    let mut ports = MockPorts::for_caller(caller);
    ports
        .tasks
        .expect_delete()
        .withf(move |request, _| request.id == id)
        .times(1)
        .returning(|_, _| OperationResult::success(()));
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/tasks/{id}"))
        .insert_header(bearer())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[case("/api/v1/tasks", 1, 20)]
#[case("/api/v1/tasks?page=3&pageSize=5", 3, 5)]
#[actix_web::test]
async fn list_tasks_forwards_paging(
    #[case] uri: &str,
    #[case] page: u32,
    #[case] page_size: u32,
) {
    let caller = test_caller(UserRole::User);
    let mut ports = MockPorts::for_caller(caller);
    ports
        .tasks_query
        .expect_list()
        .withf(move |_, request, _| request.page() == page && request.page_size() == page_size)
        .times(1)
        .returning(move |caller, request, _| {
            OperationResult::success(Page::new(
                vec![payload_for(caller, TaskId::random())],
                request,
            ))
        });
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri(uri)
        .insert_header(bearer())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["page"], json!(page));
    assert_eq!(body["pageSize"], json!(page_size));
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn list_tasks_rejects_oversized_page() {
    let caller = test_caller(UserRole::User);
    let mut ports = MockPorts::for_caller(caller);
    ports.tasks_query.expect_list().never();
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/tasks?pageSize=500")
        .insert_header(bearer())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["errors"], json!(["pageSize must be between 1 and 100"]));
}

#[actix_web::test]
async fn missing_token_is_unauthorised() {
    let ports = MockPorts::for_caller(test_caller(UserRole::User));
    let (state, _log) = ports.into_state();
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get().uri("/api/v1/tasks").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "statusCode": 401, "message": "Unauthorized. Please provide a valid JWT." })
    );
}
