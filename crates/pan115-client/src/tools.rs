//! Tool dispatcher.
//!
//! Maps a tool name and its JSON arguments onto one API call and returns the
//! result as JSON. Read operations return the domain result; mutations return
//! `{"message": ...}`.
//!
//! Numeric arguments are read through [`Scalar`], so `"20"` and `20` are both
//! accepted.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{ListQuery, RecycleQuery, SearchQuery, ShareSnapQuery};
use crate::client::Pan115Client;
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::types::ClearFlag;

/// Name, description and parameter schema of a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Every tool the dispatcher knows.
pub fn tool_specs() -> Vec<ToolSpec> {
    let ids = |what: &str| json!({ "type": "array", "items": { "type": "string" }, "description": what });
    let int = |what: &str| json!({ "type": "integer", "description": what });
    let string = |what: &str| json!({ "type": "string", "description": what });

    vec![
        ToolSpec {
            name: "listDirectory",
            description: "List files and directories in a specific directory",
            parameters: json!({
                "type": "object",
                "properties": {
                    "dir_id": string("directory ID to list, default is root directory: 0"),
                    "offset": int("offset for pagination, default is 0"),
                    "limit": int("number of items to return, default is all items"),
                },
            }),
        },
        ToolSpec {
            name: "mkdir",
            description: "Create a new directory",
            parameters: json!({
                "type": "object",
                "properties": {
                    "parent_id": string("parent directory ID"),
                    "name": string("name of the new directory"),
                },
                "required": ["name"],
            }),
        },
        ToolSpec {
            name: "delete",
            description: "Delete files or directories",
            parameters: json!({
                "type": "object",
                "properties": { "file_ids": ids("IDs of files or directories to delete") },
                "required": ["file_ids"],
            }),
        },
        ToolSpec {
            name: "rename",
            description: "Rename a file or directory",
            parameters: json!({
                "type": "object",
                "properties": {
                    "file_id": string("ID of file or directory to rename"),
                    "new_name": string("new name for the file or directory"),
                },
                "required": ["file_id", "new_name"],
            }),
        },
        ToolSpec {
            name: "move",
            description: "Move files or directories to another directory",
            parameters: json!({
                "type": "object",
                "properties": {
                    "dir_id": string("target directory ID"),
                    "file_ids": ids("IDs of files or directories to move"),
                },
                "required": ["dir_id", "file_ids"],
            }),
        },
        ToolSpec {
            name: "copy",
            description: "Copy files or directories to another directory",
            parameters: json!({
                "type": "object",
                "properties": {
                    "dir_id": string("target directory ID"),
                    "file_ids": ids("IDs of files or directories to copy"),
                },
                "required": ["dir_id", "file_ids"],
            }),
        },
        ToolSpec {
            name: "stat",
            description: "Get detailed information about a file or directory",
            parameters: json!({
                "type": "object",
                "properties": { "file_id": string("ID of file or directory to get info") },
                "required": ["file_id"],
            }),
        },
        ToolSpec {
            name: "search",
            description: "Search for files and directories in the 115 cloud storage",
            parameters: json!({
                "type": "object",
                "properties": {
                    "search_value": string("search keyword"),
                    "offset": int("offset for pagination, default is 0"),
                    "limit": int("limit number of results, default is 30"),
                    "type": int("file type filter, 0:all 1:folder 2:document 3:image 4:video 5:audio 6:archive"),
                    "order": string("sort field, e.g. file_name, user_ptime"),
                    "asc": int("ascending order, 0:descending 1:ascending"),
                    "suffix": string("file suffix filter, e.g. mkv"),
                },
                "required": ["search_value"],
            }),
        },
        ToolSpec {
            name: "getShareSnap",
            description: "Get shared files and directories snapshot information",
            parameters: json!({
                "type": "object",
                "properties": {
                    "share_code": string("share code"),
                    "receive_code": string("receive code"),
                    "dir_id": string("directory ID to list, default is root directory"),
                    "offset": int("offset for pagination, default is 0"),
                    "limit": int("number of items to return, default is 20"),
                },
                "required": ["share_code", "receive_code"],
            }),
        },
        ToolSpec {
            name: "listRecycleBin",
            description: "List items in the recycle bin",
            parameters: json!({
                "type": "object",
                "properties": {
                    "offset": int("offset for pagination, default is 0"),
                    "limit": int("number of items to return, default is 40"),
                },
            }),
        },
        ToolSpec {
            name: "revertRecycleBin",
            description: "Revert items from the recycle bin",
            parameters: json!({
                "type": "object",
                "properties": { "item_ids": ids("IDs of items to revert") },
                "required": ["item_ids"],
            }),
        },
        ToolSpec {
            name: "cleanRecycleBin",
            description: "Clean items from the recycle bin",
            parameters: json!({
                "type": "object",
                "properties": {
                    "password": string("password for cleaning recycle bin"),
                    "item_ids": ids("IDs of items to clean"),
                },
                "required": ["item_ids"],
            }),
        },
        ToolSpec {
            name: "listOfflineTasks",
            description: "List offline download tasks",
            parameters: json!({
                "type": "object",
                "properties": { "page": int("page number for pagination, default is 1") },
            }),
        },
        ToolSpec {
            name: "addOfflineTaskURIs",
            description: "Add offline tasks by download URIs, supports http, ed2k, magnet",
            parameters: json!({
                "type": "object",
                "properties": {
                    "uris": ids("download URIs, supports http, ed2k, magnet"),
                    "save_dir_id": string("directory ID to save downloaded files"),
                },
                "required": ["uris"],
            }),
        },
        ToolSpec {
            name: "deleteOfflineTasks",
            description: "Delete offline tasks",
            parameters: json!({
                "type": "object",
                "properties": {
                    "hashes": ids("task hashes to delete"),
                    "delete_files": { "type": "boolean", "description": "whether to delete associated files, default is false" },
                },
                "required": ["hashes"],
            }),
        },
        ToolSpec {
            name: "clearOfflineTasks",
            description: "Clear offline tasks",
            parameters: json!({
                "type": "object",
                "properties": {
                    "clear_flag": int("0: completed, 1: all, 2: failed, 3: running, 4: completed and files, 5: all and files"),
                },
            }),
        },
        ToolSpec {
            name: "get_download_info",
            description: "Get download information for a file including URL, file name, and size",
            parameters: json!({
                "type": "object",
                "properties": {
                    "pick_code": string("pick code of the file"),
                    "user_agent": string("user agent the download URL is bound to"),
                },
                "required": ["pick_code"],
            }),
        },
        ToolSpec {
            name: "download_file",
            description: "Download a file from 115 cloud storage to local path",
            parameters: json!({
                "type": "object",
                "properties": {
                    "pick_code": string("pick code of the file"),
                    "local_path": string("local file path to write to"),
                    "user_agent": string("user agent for the download"),
                },
                "required": ["pick_code", "local_path"],
            }),
        },
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Arguments
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListDirectoryArgs {
    dir_id: String,
    offset: Scalar,
    limit: Scalar,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MkdirArgs {
    parent_id: String,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileIdsArgs {
    file_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenameArgs {
    file_id: String,
    new_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TransferArgs {
    dir_id: String,
    file_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatArgs {
    file_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchArgs {
    search_value: String,
    offset: Scalar,
    limit: Scalar,
    #[serde(rename = "type")]
    file_type: Scalar,
    order: String,
    asc: Scalar,
    suffix: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ShareSnapArgs {
    share_code: String,
    receive_code: String,
    dir_id: String,
    offset: Scalar,
    limit: Scalar,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecycleListArgs {
    offset: Scalar,
    limit: Scalar,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemIdsArgs {
    item_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CleanRecycleArgs {
    password: String,
    item_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OfflineListArgs {
    page: Scalar,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AddUrisArgs {
    uris: Vec<String>,
    save_dir_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeleteTasksArgs {
    hashes: Vec<String>,
    delete_files: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClearTasksArgs {
    clear_flag: Scalar,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DownloadInfoArgs {
    pick_code: String,
    user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DownloadFileArgs {
    pick_code: String,
    local_path: String,
    user_agent: Option<String>,
}

/// Parse tool arguments; `null` counts as an empty object.
fn args<T: DeserializeOwned>(value: Value) -> Result<T> {
    let value = if value.is_null() { json!({}) } else { value };
    Ok(serde_json::from_value(value)?)
}

fn message(text: impl Into<String>) -> Value {
    json!({ "message": text.into() })
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Run the tool `name` with `arguments`.
pub async fn call_tool(client: &Pan115Client, name: &str, arguments: Value) -> Result<Value> {
    tracing::debug!(tool = name, "calling tool");

    let result = match name {
        "listDirectory" => {
            let a: ListDirectoryArgs = args(arguments)?;
            let limit = a.limit.int64("limit")?;
            let listing = if limit > 0 {
                let query = ListQuery {
                    dir_id: a.dir_id,
                    offset: a.offset.int64("offset")?,
                    limit,
                    ..Default::default()
                };
                client.files().list(&query).await?
            } else {
                client.files().list_all(&a.dir_id).await?
            };
            serde_json::to_value(listing)?
        }
        "mkdir" => {
            let a: MkdirArgs = args(arguments)?;
            let dir = client.files().mkdir(&a.parent_id, &a.name).await?;
            serde_json::to_value(dir)?
        }
        "delete" => {
            let a: FileIdsArgs = args(arguments)?;
            client.files().delete(&a.file_ids).await?;
            message(format!("Deleted {} item(s)", a.file_ids.len()))
        }
        "rename" => {
            let a: RenameArgs = args(arguments)?;
            client.files().rename(&a.file_id, &a.new_name).await?;
            message(format!("Renamed {} to {}", a.file_id, a.new_name.trim()))
        }
        "move" => {
            let a: TransferArgs = args(arguments)?;
            client.files().move_to(&a.dir_id, &a.file_ids).await?;
            message(format!("Moved {} item(s) to {}", a.file_ids.len(), a.dir_id))
        }
        "copy" => {
            let a: TransferArgs = args(arguments)?;
            client.files().copy_to(&a.dir_id, &a.file_ids).await?;
            message(format!("Copied {} item(s) to {}", a.file_ids.len(), a.dir_id))
        }
        "stat" => {
            let a: StatArgs = args(arguments)?;
            serde_json::to_value(client.files().stat(&a.file_id).await?)?
        }
        "search" => {
            let a: SearchArgs = args(arguments)?;
            let asc = if a.asc.is_null() {
                None
            } else {
                Some(a.asc.flag("asc")?)
            };
            let query = SearchQuery {
                offset: a.offset.int64("offset")?,
                limit: a.limit.int64("limit")?,
                file_type: a.file_type.int64("type")?,
                order: a.order,
                asc,
                suffix: a.suffix,
                ..SearchQuery::new(a.search_value)
            };
            serde_json::to_value(client.search().search(&query).await?)?
        }
        "getShareSnap" => {
            let a: ShareSnapArgs = args(arguments)?;
            let query = ShareSnapQuery {
                dir_id: a.dir_id,
                offset: a.offset.int64("offset")?,
                limit: a.limit.int64("limit")?,
                ..ShareSnapQuery::new(a.share_code, a.receive_code)
            };
            serde_json::to_value(client.shares().snapshot(&query).await?)?
        }
        "listRecycleBin" => {
            let a: RecycleListArgs = args(arguments)?;
            let query = RecycleQuery {
                offset: a.offset.int64("offset")?,
                limit: a.limit.int64("limit")?,
            };
            serde_json::to_value(client.recycle().list(&query).await?)?
        }
        "revertRecycleBin" => {
            let a: ItemIdsArgs = args(arguments)?;
            client.recycle().revert(&a.item_ids).await?;
            message(format!("Reverted {} item(s)", a.item_ids.len()))
        }
        "cleanRecycleBin" => {
            let a: CleanRecycleArgs = args(arguments)?;
            client.recycle().clean(&a.password, &a.item_ids).await?;
            message(format!("Cleaned {} item(s)", a.item_ids.len()))
        }
        "listOfflineTasks" => {
            let a: OfflineListArgs = args(arguments)?;
            let page = a.page.int64("page")?;
            serde_json::to_value(client.offline().list(page).await?)?
        }
        "addOfflineTaskURIs" => {
            let a: AddUrisArgs = args(arguments)?;
            let added = client.offline().add_uris(&a.uris, &a.save_dir_id).await?;
            serde_json::to_value(added)?
        }
        "deleteOfflineTasks" => {
            let a: DeleteTasksArgs = args(arguments)?;
            client.offline().delete(&a.hashes, a.delete_files).await?;
            message(format!("Deleted {} task(s)", a.hashes.len()))
        }
        "clearOfflineTasks" => {
            let a: ClearTasksArgs = args(arguments)?;
            let code = a.clear_flag.int64("clear_flag")?;
            let flag = ClearFlag::from_code(code)
                .ok_or_else(|| Error::validation("clear_flag", format!("unknown flag {code}")))?;
            client.offline().clear(flag).await?;
            message("Offline tasks cleared")
        }
        "get_download_info" => {
            let a: DownloadInfoArgs = args(arguments)?;
            let info = client
                .downloads()
                .info(&a.pick_code, a.user_agent.as_deref())
                .await?;
            serde_json::to_value(info)?
        }
        "download_file" => {
            let a: DownloadFileArgs = args(arguments)?;
            let file = client
                .downloads()
                .download_to(&a.pick_code, Path::new(&a.local_path), a.user_agent.as_deref())
                .await?;
            message(format!(
                "File downloaded to {} ({} bytes)",
                file.local_path, file.size
            ))
        }
        other => return Err(Error::UnknownTool(other.to_string())),
    };

    Ok(result)
}
