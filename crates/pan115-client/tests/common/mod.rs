//! Common test utilities for integration tests.

use pan115_client::Pan115Client;
use wiremock::MockServer;

/// A mock 115 backend serving both the web API and the offline API.
pub struct TestBackend {
    pub server: MockServer,
    pub client: Pan115Client,
}

impl TestBackend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let client = Pan115Client::builder()
            .cookie("UID=1_A1_1700000000; CID=abc; SEID=def")
            .web_api(server.uri())
            .offline_api(format!("{}/web/lixian/", server.uri()))
            .build()
            .expect("client builds");
        Self { server, client }
    }
}

/// A directory entry as the listing endpoint returns it.
#[allow(dead_code)]
pub fn dir_item(cid: &str, pid: &str, name: &str) -> serde_json::Value {
    serde_json::json!({ "cid": cid, "pid": pid, "n": name, "tp": "1700000000", "te": 1700000100 })
}

/// A file entry as the listing endpoint returns it.
#[allow(dead_code)]
pub fn file_item(fid: &str, cid: &str, name: &str, size: &str) -> serde_json::Value {
    serde_json::json!({
        "fid": fid,
        "cid": cid,
        "n": name,
        "s": size,
        "sha": "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709",
        "pc": "abcd1234",
        "m": "0",
        "tp": 1700000000,
        "te": "1700000100",
    })
}
