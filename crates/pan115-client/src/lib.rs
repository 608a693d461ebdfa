//! Typed client for the 115 cloud storage web API.
//!
//! The 115 web API is loosely typed: numbers arrive as JSON strings or
//! numbers depending on the endpoint, booleans as `"0"`/`"1"`, and most calls
//! answer HTTP 200 even when they failed. This crate turns that into a stable,
//! strongly typed surface.
//!
//! Every call goes through the same steps:
//!
//! 1. typed options are composed into query parameters ([`query`]);
//! 2. the request is sent and the body decoded into a wire struct ([`wire`]);
//! 3. the exchange is classified into a payload or an [`ApiError`] ([`classify`]);
//! 4. the payload is mapped into the domain model ([`types`]), decoding each
//!    loosely typed field on the way ([`scalar`]).
//!
//! # Example
//!
//! ```no_run
//! use pan115_client::{ListQuery, Pan115Client, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = Pan115Client::builder()
//!     .cookie("UID=...; CID=...; SEID=...")
//!     .build()?;
//!
//! // One page of the root directory
//! let listing = client.files().list(&ListQuery::new("0")).await?;
//! for file in &listing.files {
//!     println!("{}\t{}", file.file_id, file.name);
//! }
//!
//! // The same through the tool dispatcher
//! let value = pan115_client::call_tool(
//!     &client,
//!     "listDirectory",
//!     serde_json::json!({ "dir_id": "0", "limit": 50 }),
//! )
//! .await?;
//! println!("{value}");
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Files**: list, stat, mkdir, delete, rename, move, copy
//! - **Search**: keyword search with type, suffix and sort filters
//! - **Shares**: browse a share snapshot
//! - **Recycle bin**: list, revert, clean
//! - **Offline downloads**: list, add URIs, delete, clear
//! - **Downloads**: resolve a pick code, download to a local file

pub mod api;
pub mod classify;
pub mod client;
pub mod error;
pub mod mapping;
pub mod query;
pub mod scalar;
pub mod tools;
pub mod types;
pub mod wire;

pub use client::{
    ClientBuilder, Pan115Client, DEFAULT_OFFLINE_API, DEFAULT_USER_AGENT, DEFAULT_WEB_API,
};
pub use error::{ApiError, ApiErrorKind, Error, Result};
pub use query::{compose, QueryOption, QueryParams};
pub use scalar::{decode, DecodeError, Scalar, ScalarKind, ScalarValue};
pub use tools::{call_tool, tool_specs, ToolSpec};
pub use types::*;

pub use api::{ListQuery, RecycleQuery, SearchQuery, ShareSnapQuery};
