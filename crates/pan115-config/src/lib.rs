//! Configuration for the pan115 command-line tool.
//!
//! Kubeconfig-style client configuration:
//! - Named account contexts, each with a cookie source (file, env var or inline)
//! - `current-context` for default selection
//! - Per-context user agent, timeout and endpoint overrides
//!
//! The config lives in `client.yaml` under `$PAN115_CONFIG_DIR`, or the
//! platform config directory (`~/.config/pan115` on Linux).

pub mod client;
pub mod credential;
pub mod error;
pub mod paths;

pub use client::{
    client_config_path, load_client_config, load_client_config_from, save_client_config,
    save_client_config_to, ClientConfig, ClientDefaults, Context, ResolvedContext,
};
pub use credential::Credential;
pub use error::{ConfigError, Result};
pub use paths::{config_dir, log_dir, CONFIG_DIR_ENV};
