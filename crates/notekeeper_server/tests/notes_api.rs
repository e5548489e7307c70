use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use notekeeper_core::{JsonFilePersistence, MemoryPersistence, Note, NoteStore};
use notekeeper_server::app;
use tower::ServiceExt;

fn memory_app() -> (Router, MemoryPersistence) {
    let persistence = MemoryPersistence::new();
    let store = NoteStore::load(persistence.clone()).unwrap();
    (app(store), persistence)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn write_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/write")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn full_note_lifecycle() {
    let (app, _) = memory_app();

    let (status, _) = send(&app, write_request("note_name=a&note=hello")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/notes/a")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello");

    let (status, body) = send(&app, put("/notes/a", "bye")).await;
    assert_eq!(status, StatusCode::OK);
    let note: Note = serde_json::from_str(&body).unwrap();
    assert_eq!(note, Note::new("a", "bye"));

    let (status, body) = send(&app, delete("/notes/a")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, get("/notes/a")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_unknown_note_is_not_found() {
    let (app, _) = memory_app();
    for name in ["missing", "with%20space", "x"] {
        let (status, _) = send(&app, get(&format!("/notes/{name}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn get_note_serves_plain_text() {
    let (app, _) = memory_app();
    send(&app, write_request("note_name=a&note=hello")).await;

    let response = app.clone().oneshot(get("/notes/a")).await.unwrap();
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn percent_encoded_names_round_trip() {
    let (app, _) = memory_app();
    let (status, _) = send(&app, write_request("note_name=my+note&note=a%26b")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/notes/my%20note")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "a&b");
}

#[tokio::test]
async fn duplicate_create_is_bad_request_and_keeps_one_note() {
    let (app, persistence) = memory_app();
    send(&app, write_request("note_name=a&note=first")).await;

    let (status, _) = send(&app, write_request("note_name=a&note=second")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, get("/notes")).await;
    let notes: Vec<Note> = serde_json::from_str(&body).unwrap();
    assert_eq!(notes, vec![Note::new("a", "first")]);
    assert_eq!(persistence.snapshot().unwrap(), notes);
}

#[tokio::test]
async fn write_with_missing_or_empty_fields_is_bad_request() {
    let (app, persistence) = memory_app();
    for body in ["note=hello", "note_name=a", "note_name=&note=hello", "note_name=a&note=", ""] {
        let (status, _) = send(&app, write_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body `{body}`");
    }
    assert!(persistence.snapshot().is_none());
}

#[tokio::test]
async fn write_without_form_content_type_is_bad_request() {
    let (app, _) = memory_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/write")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"note_name":"a","note":"b"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Bad Request");
}

#[tokio::test]
async fn put_unknown_note_is_not_found_and_store_unchanged() {
    let (app, persistence) = memory_app();
    send(&app, write_request("note_name=a&note=hello")).await;

    let (status, _) = send(&app, put("/notes/b", "text")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(persistence.snapshot().unwrap(), vec![Note::new("a", "hello")]);
}

#[tokio::test]
async fn delete_unknown_note_is_not_found_and_store_unchanged() {
    let (app, persistence) = memory_app();
    send(&app, write_request("note_name=a&note=hello")).await;

    let (status, _) = send(&app, delete("/notes/b")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(persistence.snapshot().unwrap(), vec![Note::new("a", "hello")]);
}

#[tokio::test]
async fn list_returns_notes_in_insertion_order() {
    let (app, _) = memory_app();
    let (status, body) = send(&app, get("/notes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    send(&app, write_request("note_name=b&note=2")).await;
    send(&app, write_request("note_name=a&note=1")).await;

    let (_, body) = send(&app, get("/notes")).await;
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "name": "b", "text": "2" },
            { "name": "a", "text": "1" }
        ])
    );
}

#[tokio::test]
async fn persistence_failure_is_internal_error_and_rolled_back() {
    let (app, persistence) = memory_app();
    send(&app, write_request("note_name=a&note=hello")).await;
    persistence.set_fail_writes(true);

    let (status, _) = send(&app, put("/notes/a", "bye")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(&app, get("/notes/a")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello");
}

#[tokio::test]
async fn notes_survive_restart_with_file_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");

    {
        let app = app(NoteStore::load(JsonFilePersistence::new(&path)).unwrap());
        send(&app, write_request("note_name=a&note=hello")).await;
        send(&app, write_request("note_name=b&note=world")).await;
        send(&app, put("/notes/b", "changed")).await;
    }

    let app = app(NoteStore::load(JsonFilePersistence::new(&path)).unwrap());
    let (_, body) = send(&app, get("/notes")).await;
    let notes: Vec<Note> = serde_json::from_str(&body).unwrap();
    assert_eq!(notes, vec![Note::new("a", "hello"), Note::new("b", "changed")]);
}

#[tokio::test]
async fn root_redirects_to_upload_form() {
    let (app, _) = memory_app();
    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/UploadForm.html");

    let (status, body) = send(&app, get("/UploadForm.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/write\""));
    assert!(body.contains("name=\"note_name\""));
}

#[tokio::test]
async fn docs_serves_swagger_ui_page() {
    let (app, _) = memory_app();
    let response = app.clone().oneshot(get("/docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("SwaggerUIBundle"));
    assert!(page.contains("/docs/openapi.json"));
}

#[tokio::test]
async fn openapi_json_describes_every_note_route() {
    let (app, _) = memory_app();
    let (status, body) = send(&app, get("/docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);

    let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert_eq!(doc["info"]["title"], "Notekeeper API");
    for method in ["get", "put", "delete"] {
        assert!(doc["paths"]["/notes/{name}"][method].is_object(), "missing {method}");
    }
    assert!(doc["paths"]["/notes"]["get"].is_object());
    let write = &doc["paths"]["/write"]["post"];
    assert!(write["requestBody"]["content"]["application/x-www-form-urlencoded"].is_object());
    assert!(doc["components"]["schemas"]["Note"].is_object());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writes_are_all_persisted() {
    const WRITERS: usize = 32;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let app = app(NoteStore::load(JsonFilePersistence::new(&path)).unwrap());

    let mut tasks = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let request = write_request(&format!("note_name=n{i}&note=text{i}"));
            app.oneshot(request).await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    let reloaded = NoteStore::load(JsonFilePersistence::new(&path)).unwrap();
    assert_eq!(reloaded.len(), WRITERS);
    for i in 0..WRITERS {
        assert_eq!(reloaded.find(&format!("n{i}")).unwrap().text, format!("text{i}"));
    }

    let (_, body) = send(&app, get("/notes")).await;
    let listed: Vec<Note> = serde_json::from_str(&body).unwrap();
    assert_eq!(listed.len(), WRITERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_of_one_note_keep_a_written_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let app = app(NoteStore::load(JsonFilePersistence::new(&path)).unwrap());
    send(&app, write_request("note_name=shared&note=start")).await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            app.oneshot(put("/notes/shared", &format!("v{i}"))).await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let (_, in_memory) = send(&app, get("/notes/shared")).await;
    let reloaded = NoteStore::load(JsonFilePersistence::new(&path)).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.find("shared").unwrap().text, in_memory);
    assert!(in_memory.starts_with('v'));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = memory_app();
    let (status, _) = send(&app, get("/nothing/here")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
