//! Integration tests for offline downloads, the recycle bin and tool dispatch.

mod common;

use common::{file_item, TestBackend};
use pan115_client::{call_tool, ClearFlag, Error, OfflineTaskStatus, RecycleQuery};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_offline_list() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/web/lixian/"))
        .and(query_param("ct", "lixian"))
        .and(query_param("ac", "task_lists"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true,
            "page": 1,
            "page_count": "1",
            "page_row": 30,
            "count": 2,
            "quota": "1500",
            "total": "2",
            "tasks": [
                {
                    "info_hash": "aaaa",
                    "name": "ubuntu.iso",
                    "size": "4700000000",
                    "url": "magnet:?xt=urn:btih:aaaa",
                    "add_time": 1700000000,
                    "status": 2,
                    "percentDone": 100,
                    "rateDownload": 0,
                    "file_id": "777",
                    "wp_path_id": "0",
                    "move": 1,
                },
                {
                    "info_hash": "bbbb",
                    "name": "debian.iso",
                    "status": "1",
                    "percentDone": "42.5",
                    "rateDownload": "1048576.0",
                    "left_time": "600",
                },
            ],
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let page = backend.client.offline().list(0).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.quota, 1500);
    assert_eq!(page.tasks.len(), 2);
    assert_eq!(page.tasks[0].status, OfflineTaskStatus::Completed);
    assert_eq!(page.tasks[0].size, 4_700_000_000);
    assert_eq!(page.tasks[1].status, OfflineTaskStatus::Downloading);
    assert!((page.tasks[1].percent - 42.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_offline_add_reports_each_uri() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/web/lixian/"))
        .and(query_param("ac", "add_task_urls"))
        .and(body_string_contains("url%5B0%5D=magnet"))
        .and(body_string_contains("wp_path_id=42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true,
            "result": [
                {"state": true, "info_hash": "cccc", "url": "magnet:?xt=urn:btih:cccc"},
                {"state": false, "errcode": 10008, "error_msg": "task already exists", "url": "http://x/y"},
            ],
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let uris = vec![
        "magnet:?xt=urn:btih:cccc".to_string(),
        "http://x/y".to_string(),
    ];
    let added = backend.client.offline().add_uris(&uris, "42").await.unwrap();
    assert_eq!(added.hashes(), vec!["cccc"]);
    assert_eq!(added.tasks[1].error_code, Some(10008));
    assert_eq!(added.tasks[1].error.as_deref(), Some("task already exists"));
}

#[tokio::test]
async fn test_offline_delete_and_clear() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/web/lixian/"))
        .and(query_param("ac", "task_del"))
        .and(body_string_contains("hash%5B0%5D=aaaa"))
        .and(body_string_contains("flag=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/web/lixian/"))
        .and(query_param("ac", "task_clear"))
        .and(body_string_contains("flag=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let offline = backend.client.offline();
    offline.delete(&["aaaa".to_string()], true).await.unwrap();
    offline.clear(ClearFlag::Failed).await.unwrap();
}

#[tokio::test]
async fn test_offline_add_requires_uris() {
    let backend = TestBackend::start().await;
    let err = backend.client.offline().add_uris(&[], "0").await.unwrap_err();
    assert!(matches!(err, Error::Validation { field: "uris", .. }));
}

#[tokio::test]
async fn test_recycle_list_and_revert() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/rb"))
        .and(query_param("aid", "7"))
        .and(query_param("limit", "40"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true,
            "count": "41",
            "offset": 40,
            "page_size": 40,
            "data": [{
                "id": "9001",
                "file_name": "old.txt",
                "type": "1",
                "file_size": "10",
                "dtime": "1700000000",
                "cid": 12,
                "parent_name": "Documents",
                "pick_code": "pc9001",
            }],
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rb/revert"))
        .and(body_string_contains("rid%5B0%5D=9001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let recycle = backend.client.recycle();
    let page = recycle
        .list(&RecycleQuery {
            offset: 40,
            limit: 0,
        })
        .await
        .unwrap();
    assert_eq!(page.count, 41);
    assert_eq!(page.items[0].id, "9001");
    assert_eq!(page.items[0].parent_id, "12");

    recycle.revert(&["9001".to_string()]).await.unwrap();
}

#[tokio::test]
async fn test_recycle_clean_posts_ids_and_password() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/rb/secret_del"))
        .and(body_string_contains("rid%5B0%5D=9001"))
        .and(body_string_contains("password=123456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend
        .client
        .recycle()
        .clean("123456", &["9001".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_recycle_clean_requires_ids() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(0)
        .mount(&backend.server)
        .await;

    let err = backend.client.recycle().clean("123456", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Validation { field: "item_ids", .. }));

    let err = call_tool(&backend.client, "cleanRecycleBin", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "item_ids", .. }));

    let err = call_tool(&backend.client, "cleanRecycleBin", json!({"item_ids": []}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "item_ids", .. }));

    assert!(backend.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tool_list_directory_single_page() {
    let backend = TestBackend::start().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("cid", "8"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": true, "cid": "8", "count": 21,
            "data": [file_item("100", "8", "a.txt", "3")],
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let value = call_tool(
        &backend.client,
        "listDirectory",
        json!({"dir_id": "8", "offset": 20, "limit": "10"}),
    )
    .await
    .unwrap();
    assert_eq!(value["files"][0]["file_id"], "100");
    assert_eq!(value["files"][0]["labels"], json!([]));
}

#[tokio::test]
async fn test_tool_mutation_returns_message() {
    let backend = TestBackend::start().await;

    Mock::given(method("POST"))
        .and(path("/files/copy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": true})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let value = call_tool(
        &backend.client,
        "copy",
        json!({"dir_id": "9", "file_ids": ["1", "2"]}),
    )
    .await
    .unwrap();
    assert_eq!(value["message"], "Copied 2 item(s) to 9");
}

#[tokio::test]
async fn test_tool_clear_rejects_unknown_flag() {
    let backend = TestBackend::start().await;
    let err = call_tool(&backend.client, "clearOfflineTasks", json!({"clear_flag": 9}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "clear_flag", .. }));
}
