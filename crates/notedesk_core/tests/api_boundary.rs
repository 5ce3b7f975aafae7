use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use notedesk_core::api::{build_router, AppState};
use notedesk_core::db::open_db_in_memory;
use serde_json::{json, Value};
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|err| {
            panic!(
                "expected JSON body, got {:?}: {err}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

fn app() -> Router {
    build_router(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    Reply {
        status,
        content_type,
        body,
    }
}

#[tokio::test]
async fn note_crud_round_trip() {
    let app = app();

    let created = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"title": "Title", "content": "Content"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.json()["id"].as_i64().expect("id should be set");
    assert_eq!(created.json()["title"], "Title");

    let listed = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(listed.json().as_array().unwrap().len(), 1);

    let updated = send(
        &app,
        Method::PUT,
        &format!("/api/notes/{id}"),
        Some(json!({"id": 999, "title": "Updated Title", "content": "Content"})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["id"], id);
    assert_eq!(updated.json()["title"], "Updated Title");

    let deleted = send(&app, Method::DELETE, &format!("/api/notes/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let listed = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn missing_note_maps_to_404_and_delete_stays_idempotent() {
    let app = app();

    let missing = send(&app, Method::GET, "/api/notes/5", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    let body = missing.json();
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "note not found with id 5");
    assert_eq!(body["path"], "/api/notes/5");
    assert!(body["timestamp"].is_string());

    let update = send(
        &app,
        Method::PUT,
        "/api/notes/5",
        Some(json!({"title": "x", "content": ""})),
    )
    .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = send(&app, Method::DELETE, "/api/notes/5", None).await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn missing_user_delete_maps_to_404() {
    let app = app();
    let response = send(&app, Method::DELETE, "/api/users/5", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["message"], "user not found with id 5");
}

#[tokio::test]
async fn validation_failures_map_to_400_with_joined_messages() {
    let app = app();
    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "", "email": "nope"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Validation Error");
    assert_eq!(
        response.json()["message"],
        "name must not be blank; email must be a valid email address"
    );

    let listed = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn padded_user_fields_are_stored_trimmed() {
    let app = app();
    let created = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "  Ada ", "email": "  ada@example.com  "})),
    )
    .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json()["name"], "Ada");
    assert_eq!(created.json()["email"], "ada@example.com");

    let id = created.json()["id"].as_i64().unwrap();
    let fetched = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(fetched.json()["email"], "ada@example.com");
}

#[tokio::test]
async fn malformed_input_maps_to_400() {
    let app = app();

    let bad_json = send_request(
        &app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/notes")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(bad_json.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_json.json()["error"], "Malformed Request");

    let no_body = send(&app, Method::POST, "/api/notes", None).await;
    assert_eq!(no_body.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_body.json()["error"], "Malformed Request");

    let bad_id = send(&app, Method::GET, "/api/notes/abc", None).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.json()["path"], "/api/notes/abc");

    let zero_id = send(&app, Method::GET, "/api/users/0", None).await;
    assert_eq!(zero_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn summary_is_plain_text_and_projection_is_json() {
    let app = app();

    let empty = send(&app, Method::GET, "/api/notes/summary", None).await;
    assert_eq!(empty.text(), "No notes available");
    assert!(empty
        .content_type
        .as_deref()
        .is_some_and(|value| value.starts_with("text/plain")));

    for title in ["Title1", "Title2"] {
        send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({"title": title, "content": ""})),
        )
        .await;
    }

    let summary = send(&app, Method::GET, "/api/notes/summary", None).await;
    assert_eq!(summary.text(), "There are 2 notes");
    let titles = send(&app, Method::GET, "/api/notes/titles/uppercase", None).await;
    assert_eq!(titles.json(), json!(["TITLE1", "TITLE2"]));
}

#[tokio::test]
async fn search_endpoints_read_query_parameters() {
    let app = app();
    for (name, email) in [
        ("Ada Lovelace", "ada@example.com"),
        ("Alan Turing", "alan@example.com"),
        ("Émilie du Châtelet", "emilie@example.com"),
    ] {
        send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({"name": name, "email": email})),
        )
        .await;
    }
    send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"title": "Team sync", "content": ""})),
    )
    .await;

    let users = send(&app, Method::GET, "/api/users/search?name=ada%20love", None).await;
    let hits = users.json();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["email"], "ada@example.com");

    let accented = send(&app, Method::GET, "/api/users/search?name=%C3%89MILIE", None).await;
    assert_eq!(accented.json()[0]["email"], "emilie@example.com");

    let notes = send(&app, Method::GET, "/api/notes/search?q=SYNC", None).await;
    assert_eq!(notes.json().as_array().unwrap().len(), 1);

    let everyone = send(&app, Method::GET, "/api/users/search", None).await;
    assert_eq!(everyone.json().as_array().unwrap().len(), 3);

    let names = send(&app, Method::GET, "/api/users/names/uppercase", None).await;
    assert_eq!(
        names.json(),
        json!(["ADA LOVELACE", "ALAN TURING", "ÉMILIE DU CHÂTELET"])
    );
}

#[tokio::test]
async fn unknown_routes_and_methods_are_rejected() {
    let app = app();

    let unknown = send(&app, Method::GET, "/api/widgets", None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.json()["message"], "no route for GET /api/widgets");

    let nested = send(&app, Method::GET, "/api/notes/1/extra", None).await;
    assert_eq!(nested.status, StatusCode::NOT_FOUND);

    let wrong_method = send(&app, Method::DELETE, "/api/notes/summary", None).await;
    assert_eq!(wrong_method.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(wrong_method.json()["error"], "Method Not Allowed");

    let put_collection = send(&app, Method::PUT, "/api/users", None).await;
    assert_eq!(put_collection.status, StatusCode::METHOD_NOT_ALLOWED);
}
