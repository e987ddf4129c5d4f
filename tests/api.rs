use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower::ServiceExt;
use trivia_api::model::DEFAULT_CATEGORIES;
use trivia_api::{app, AppState, MemoryStore, NewQuestion, TriviaStore};

const SEEDED_QUESTIONS: i64 = 25;

// six categories and 25 questions; question i belongs to category ((i - 1) % 6) + 1
async fn seeded_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_categories(DEFAULT_CATEGORIES.iter().copied()));
    for i in 1..=SEEDED_QUESTIONS {
        store
            .create_question(&NewQuestion {
                question: format!("Sample question number {}", i),
                answer: format!("Answer {}", i),
                category: (i - 1) % 6 + 1,
                difficulty: i % 5 + 1,
            })
            .await
            .unwrap();
    }
    let state = AppState { store: store.clone() };
    (state, store)
}

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app(state.clone())
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

fn assert_error(status: StatusCode, json: &Value, expected: StatusCode) {
    assert_eq!(status, expected);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], expected.as_u16());
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_get_all_categories() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let keys: BTreeSet<String> = json["categories"].as_object().unwrap().keys().cloned().collect();
    let expected: BTreeSet<String> = (1..=6).map(|i| i.to_string()).collect();
    assert_eq!(keys, expected);
    assert_eq!(json["categories"]["1"], "Science");
}

#[tokio::test]
async fn test_no_categories_is_404() {
    let state = AppState::new(MemoryStore::new());
    let (status, json) = send(&state, "GET", "/categories", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_paginate_questions() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["num_all_questions"], SEEDED_QUESTIONS);
    assert_eq!(ids(&json["questions"]), (1..=10).collect::<Vec<_>>());
    assert_eq!(json["categories"].as_object().unwrap().len(), 6);

    let first = &json["questions"][0];
    assert_eq!(first["question"], "Sample question number 1");
    assert_eq!(first["answer"], "Answer 1");
    assert_eq!(first["category"], 1);
    assert_eq!(first["difficulty"], 2);
}

#[tokio::test]
async fn test_every_page_is_its_slice_of_the_listing() {
    let (state, _) = seeded_state().await;
    let all: Vec<i64> = (1..=SEEDED_QUESTIONS).collect();
    for page in 1..=3 {
        let (status, json) = send(&state, "GET", &format!("/questions?page={}", page), None).await;
        assert_eq!(status, StatusCode::OK);
        let start = ((page - 1) * 10) as usize;
        let end = (start + 10).min(all.len());
        assert_eq!(ids(&json["questions"]), all[start..end].to_vec());
    }
}

#[tokio::test]
async fn test_invalid_page() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/questions?page=2500", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Requested page not found");

    let (status, json) = send(&state, "GET", "/questions?page=0", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unparseable_page_means_first_page() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/questions?page=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json["questions"]), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_no_questions_is_404() {
    let state = AppState::new(MemoryStore::with_categories(["Science"]));
    let (status, json) = send(&state, "GET", "/questions", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_question_deletion() {
    let (state, store) = seeded_state().await;
    let (status, json) = send(&state, "DELETE", "/questions/5", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Question has been deleted successfully");
    assert_eq!(json["total_questions"], SEEDED_QUESTIONS - 1);
    assert_eq!(store.count_questions().await.unwrap(), SEEDED_QUESTIONS - 1);

    let (_, json) = send(&state, "GET", "/questions?page=1", None).await;
    assert!(!ids(&json["questions"]).contains(&5));
    assert_eq!(json["num_all_questions"], SEEDED_QUESTIONS - 1);

    let (status, json) = send(&state, "DELETE", "/questions/5", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_nonexistent_question() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "DELETE", "/questions/2600", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);

    let (status, json) = send(&state, "DELETE", "/questions/not-a-number", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_question() {
    let (state, store) = seeded_state().await;
    let body = json!({
        "question": "What human organ is used to breathe?",
        "category": "1",
        "answer": "Lungs",
        "difficulty": "1"
    });
    let (status, json) = send(&state, "POST", "/questions", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Your Question has been added successfully");
    assert!(json.get("id").is_none());
    assert_eq!(store.count_questions().await.unwrap(), SEEDED_QUESTIONS + 1);

    let (_, json) = send(&state, "GET", "/questions?page=3", None).await;
    let last = json["questions"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["question"], "What human organ is used to breathe?");
    assert_eq!(last["category"], 1);
    assert_eq!(last["difficulty"], 1);
}

#[tokio::test]
async fn test_create_question_missing_field() {
    let (state, store) = seeded_state().await;
    let complete = json!({"question": "Q?", "answer": "A", "category": 2, "difficulty": 3});

    for field in ["question", "answer", "category", "difficulty"] {
        let mut body = complete.clone();
        body[field] = Value::Null;
        let (status, json) = send(&state, "POST", "/questions", Some(body)).await;
        assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "Request was unprocessable");
    }

    let (status, json) = send(&state, "POST", "/questions", Some(json!({"question": "Q?"}))).await;
    assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(store.count_questions().await.unwrap(), SEEDED_QUESTIONS);
}

#[tokio::test]
async fn test_create_question_malformed_body() {
    let (state, _) = seeded_state().await;
    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_search_questions() {
    let (state, _) = seeded_state().await;
    let (status, json) =
        send(&state, "POST", "/questions/search", Some(json!({"searchTerm": "NUMBER 2"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(ids(&json["questions"]), vec![2, 20, 21, 22, 23, 24, 25]);
    assert_eq!(json["total_questions"], 7);
    assert!(json["current_category"].is_null());

    let (status, json) =
        send(&state, "POST", "/questions/search", Some(json!({"searchTerm": "zebra"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["questions"].as_array().unwrap().is_empty());

    let (status, json) = send(&state, "POST", "/questions/search", Some(json!({"searchTerm": 7}))).await;
    assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_term_does_not_bypass_create_validation() {
    let (state, store) = seeded_state().await;
    let (status, json) = send(&state, "POST", "/questions", Some(json!({"searchTerm": "x"}))).await;

    assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.count_questions().await.unwrap(), SEEDED_QUESTIONS);
}

#[tokio::test]
async fn test_get_questions_by_category() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/categories/1/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(ids(&json["questions"]), vec![1, 7, 13, 19, 25]);
    assert_eq!(json["current_category"], "Science");
    assert_eq!(json["total_questions"], 5);
    assert!(json["questions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|q| q["category"] == 1));

    let (status, json) = send(&state, "GET", "/categories/1/questions?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["questions"].as_array().unwrap().is_empty());
    assert_eq!(json["total_questions"], 5);
}

#[tokio::test]
async fn test_questions_by_unknown_category() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/categories/2700/questions", None).await;
    assert_error(status, &json, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_play_quiz_skips_previous_questions() {
    let (state, _) = seeded_state().await;
    let body = json!({
        "quiz_category": {"type": "Science", "id": 1},
        "previous_questions": [1, 7, 13, 19]
    });
    for _ in 0..10 {
        let (status, json) = send(&state, "POST", "/quizzes", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["question"]["id"], 25);
    }

    let body = json!({
        "quiz_category": {"type": "Science", "id": 1},
        "previous_questions": [1, 7, 13, 19, 25]
    });
    let (status, json) = send(&state, "POST", "/quizzes", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["question"].is_null());
}

#[tokio::test]
async fn test_play_quiz_all_categories() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(
        &state,
        "POST",
        "/quizzes",
        Some(json!({"quiz_category": null, "previous_questions": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = json["question"]["id"].as_i64().unwrap();
    assert!((1..=SEEDED_QUESTIONS).contains(&id));
}

#[tokio::test]
async fn test_play_quiz_empty_pool() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(
        &state,
        "POST",
        "/quizzes",
        Some(json!({"quiz_category": {"id": 99}, "previous_questions": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["question"].is_null());
}

#[tokio::test]
async fn test_play_quiz_bad_request() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "POST", "/quizzes", Some(json!({"quiz_category": {}}))).await;
    assert_error(status, &json, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Bad Request");

    let (status, json) = send(
        &state,
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": "not a list"})),
    )
    .await;
    assert_error(status, &json, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/nowhere", None).await;
    assert_error(status, &json, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (state, _) = seeded_state().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/questions")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "DELETE")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("DELETE"));
    assert!(methods.contains("PATCH"));
}

#[tokio::test]
async fn test_health_and_ready() {
    let (state, _) = seeded_state().await;
    let (status, json) = send(&state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");

    let (status, json) = send(&state, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["database"], "ok");
}
