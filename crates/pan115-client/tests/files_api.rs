//! Integration tests for the files API against a mock backend.

mod common;

use common::{dir_item, file_item, TestBackend};
use pan115_client::{ApiErrorKind, Error, ListQuery};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_sends_defaults_and_maps_items() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("cid", "42"))
        .and(query_param("aid", "1"))
        .and(query_param("o", "user_ptime"))
        .and(query_param("asc", "0"))
        .and(query_param("show_dir", "1"))
        .and(query_param("limit", "50"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true,
            "cid": "42",
            "count": "2",
            "offset": 0,
            "page_size": "50",
            "path": [{"cid": "0", "pid": "", "name": "root"}, {"cid": "42", "pid": "0", "name": "Movies"}],
            "data": [
                dir_item("77", "42", "Extras"),
                file_item("1001", "42", "film.mkv", "1048576"),
            ],
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let query = ListQuery {
        limit: 50,
        ..ListQuery::new("42")
    };
    let listing = backend.client.files().list(&query).await.unwrap();

    assert_eq!(listing.dir_id, "42");
    assert_eq!(listing.count, 2);
    assert_eq!(listing.path.len(), 2);
    assert_eq!(listing.files.len(), 2);

    let dir = &listing.files[0];
    assert!(dir.is_directory);
    assert_eq!(dir.file_id, "77");
    assert_eq!(dir.parent_id, "42");

    let file = &listing.files[1];
    assert!(!file.is_directory);
    assert_eq!(file.file_id, "1001");
    assert_eq!(file.parent_id, "42");
    assert_eq!(file.size, 1_048_576);
    assert!(file.labels.is_empty());
}

#[tokio::test]
async fn test_list_all_walks_pages() {
    let backend = TestBackend::start().await;
    let first: Vec<_> = (0..1000)
        .map(|i| file_item(&format!("{}", 10_000 + i), "5", "part", "1"))
        .collect();

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true, "cid": "5", "count": 1001, "data": first,
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("offset", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true, "cid": "5", "count": 1001,
            "data": [file_item("99999", "5", "last", "1")],
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let listing = backend.client.files().list_all("5").await.unwrap();
    assert_eq!(listing.files.len(), 1001);
    assert_eq!(listing.page_size, 1001);
    assert_eq!(listing.files[1000].file_id, "99999");
}

#[tokio::test]
async fn test_bad_scalar_surfaces_as_decode_error() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true,
            "data": [{"fid": "1", "cid": "0", "n": "broken", "s": "12kb"}],
        })))
        .mount(&backend.server)
        .await;

    let err = backend
        .client
        .files()
        .list(&ListQuery::new("0"))
        .await
        .unwrap_err();
    match err {
        Error::Decode(decode) => assert_eq!(decode.field, "s"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_state_surfaces_as_decode_error() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "true",
            "data": [],
        })))
        .mount(&backend.server)
        .await;

    let err = backend
        .client
        .files()
        .list(&ListQuery::new("0"))
        .await
        .unwrap_err();
    assert_eq!(err.api_kind(), None);
    match err {
        Error::Decode(decode) => assert_eq!(decode.field, "state"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stat_numeric_size() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/category/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_name": "film.mkv",
            "pick_code": "fa1b2c",
            "file_category": "1",
            "size": 734003200,
        })))
        .mount(&backend.server)
        .await;

    let stat = backend.client.files().stat("1001").await.unwrap();
    assert_eq!(stat.size, "734003200");
    assert!(!stat.is_directory);
}

#[tokio::test]
async fn test_stat_without_envelope() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/category/get"))
        .and(query_param("cid", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_name": "Movies",
            "pick_code": "fa1b2c",
            "file_category": "0",
            "count": "12",
            "folder_count": "3",
            "size": "1.5GB",
            "ptime": "1700000000",
            "utime": 1700000500,
            "paths": [{"file_id": 0, "file_name": "root"}],
        })))
        .mount(&backend.server)
        .await;

    let stat = backend.client.files().stat("42").await.unwrap();
    assert_eq!(stat.name, "Movies");
    assert!(stat.is_directory);
    assert_eq!(stat.file_count, 12);
    assert_eq!(stat.folder_count, 3);
    assert_eq!(stat.paths.len(), 1);
}

#[tokio::test]
async fn test_stat_empty_body_is_api_state() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/category/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&backend.server)
        .await;

    let err = backend.client.files().stat("404").await.unwrap_err();
    assert_eq!(err.api_kind(), Some(ApiErrorKind::ApiState));
}

#[tokio::test]
async fn test_mkdir_posts_form() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/files/add"))
        .and(body_string_contains("pid=0"))
        .and(body_string_contains("cname=Photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": 1, "cid": 555, "cname": "Photos",
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let dir = backend.client.files().mkdir("", "Photos").await.unwrap();
    assert_eq!(dir.dir_id, "555");
    assert_eq!(dir.name, "Photos");
}

#[tokio::test]
async fn test_delete_posts_indexed_ids() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/rb/delete"))
        .and(body_string_contains("fid%5B0%5D=11"))
        .and(body_string_contains("fid%5B1%5D=22"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend
        .client
        .files()
        .delete(&["11".to_string(), "22".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_move_reports_api_state() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/files/move"))
        .and(body_string_contains("pid=9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": false, "errno": "990009", "error": "target is a child of the source",
        })))
        .mount(&backend.server)
        .await;

    let err = backend
        .client
        .files()
        .move_to("9", &["11".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some(990009));
    assert!(err.to_string().contains("target is a child of the source"));
}

#[tokio::test]
async fn test_rename_posts_keyed_field() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/files/batch_rename"))
        .and(body_string_contains("files_new_name%5B11%5D=new.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend.client.files().rename("11", "new.txt").await.unwrap();
}

#[tokio::test]
async fn test_validation_happens_before_any_request() {
    let backend = TestBackend::start().await;

    let err = backend.client.files().delete(&[]).await.unwrap_err();
    assert!(matches!(err, Error::Validation { field: "file_ids", .. }));

    let err = backend.client.files().copy_to("", &["1".to_string()]).await.unwrap_err();
    assert!(matches!(err, Error::Validation { field: "dir_id", .. }));

    let received = backend.server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
