//! Client configuration for the pan115 CLI.
//!
//! Implements a kubeconfig-style configuration with named contexts, one per
//! 115 account:
//!
//! ```yaml
//! api-version: v1
//! kind: ClientConfig
//!
//! current-context: main
//!
//! contexts:
//!   - name: main
//!     cookie-file: ~/.config/pan115/main.cookie
//!   - name: family
//!     cookie-env: PAN115_FAMILY_COOKIE
//!     timeout: 60
//!
//! defaults:
//!   timeout: 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::paths::{config_dir, expand_path};
use crate::{ConfigError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Client Config
// ─────────────────────────────────────────────────────────────────────────────

/// API version for the client config file format.
pub const API_VERSION: &str = "v1";

/// Kind identifier for client config files.
pub const KIND: &str = "ClientConfig";

/// Default config filename.
const CLIENT_CONFIG_FILE: &str = "client.yaml";

/// Root client configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
    /// API version (always "v1" currently).
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Config kind (always "ClientConfig").
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Name of the current/default context.
    #[serde(default)]
    pub current_context: Option<String>,

    /// Named account contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,

    /// Default settings applied to all contexts.
    #[serde(default)]
    pub defaults: ClientDefaults,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

impl ClientConfig {
    /// Create an empty client config.
    pub fn new() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            ..Default::default()
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_str).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Get the current context, if set and valid.
    pub fn current(&self) -> Option<&Context> {
        self.current_context
            .as_ref()
            .and_then(|name| self.get_context(name))
    }

    /// Get a context by name.
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Get a mutable context by name.
    pub fn get_context_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn set_context(&mut self, context: Context) {
        if let Some(existing) = self.get_context_mut(&context.name) {
            *existing = context;
        } else {
            self.contexts.push(context);
        }
    }

    /// Remove a context by name.
    pub fn remove_context(&mut self, name: &str) -> Option<Context> {
        let pos = self.contexts.iter().position(|c| c.name == name)?;
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        Some(self.contexts.remove(pos))
    }

    /// Set the current context by name.
    ///
    /// Returns an error if the context doesn't exist.
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if self.get_context(name).is_some() {
            self.current_context = Some(name.to_string());
            Ok(())
        } else {
            Err(ConfigError::ContextNotFound(name.to_string()))
        }
    }

    /// List all context names.
    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.name.as_str()).collect()
    }

    /// Resolve the settings for `name`, or the current context when `None`.
    ///
    /// A missing current context is not an error: the result then only
    /// carries the defaults, and the cookie is expected from elsewhere.
    pub fn resolve(&self, name: Option<&str>) -> Result<ResolvedContext> {
        self.resolve_with(name, |var| std::env::var(var).ok())
    }

    /// Like [`resolve`](Self::resolve), reading environment variables through `env`.
    pub fn resolve_with<F>(&self, name: Option<&str>, env: F) -> Result<ResolvedContext>
    where
        F: Fn(&str) -> Option<String>,
    {
        let context = match name {
            Some(name) => Some(
                self.get_context(name)
                    .ok_or_else(|| ConfigError::ContextNotFound(name.to_string()))?,
            ),
            None => self.current(),
        };

        let Some(context) = context else {
            return Ok(ResolvedContext {
                name: None,
                credential: None,
                user_agent: self.defaults.user_agent.clone(),
                timeout: self.defaults.timeout,
                web_api: None,
                offline_api: None,
            });
        };

        let credential = context
            .cookie_string(&env)?
            .map(|raw| Credential::from_cookie(&raw))
            .transpose()?;

        Ok(ResolvedContext {
            name: Some(context.name.clone()),
            credential,
            user_agent: context
                .user_agent
                .clone()
                .or_else(|| self.defaults.user_agent.clone()),
            timeout: context.timeout.unwrap_or(self.defaults.timeout),
            web_api: context.web_api.clone(),
            offline_api: context.offline_api.clone(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// A named account context.
///
/// The cookie comes from the first source that yields one, in the order
/// `cookie-file`, `cookie-env`, inline `cookie`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Context {
    /// Unique name for this context.
    pub name: String,

    /// Inline cookie string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,

    /// Environment variable holding the cookie string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_env: Option<String>,

    /// File holding the cookie string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_file: Option<PathBuf>,

    /// User agent override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Request timeout override (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Web API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_api: Option<String>,

    /// Offline download API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_api: Option<String>,
}

impl Context {
    /// Create a context with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Read the cookie from a file.
    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    /// Read the cookie from an environment variable.
    pub fn with_cookie_env(mut self, var: impl Into<String>) -> Self {
        self.cookie_env = Some(var.into());
        self
    }

    /// Store the cookie inline.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Find the raw cookie string, if any source yields one.
    fn cookie_string<F>(&self, env: &F) -> Result<Option<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.cookie_file {
            let expanded = expand_path(path);
            if expanded.exists() {
                let cookie = std::fs::read_to_string(&expanded).map_err(|e| {
                    ConfigError::ReadFile {
                        path: expanded.display().to_string(),
                        source: e,
                    }
                })?;
                let cookie = cookie.trim();
                if !cookie.is_empty() {
                    return Ok(Some(cookie.to_string()));
                }
            }
        }
        if let Some(var) = &self.cookie_env
            && let Some(cookie) = env(var.as_str()).filter(|c| !c.trim().is_empty())
        {
            return Ok(Some(cookie.trim().to_string()));
        }
        Ok(self
            .cookie
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string))
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    /// Name of the context used, if any.
    pub name: Option<String>,
    pub credential: Option<Credential>,
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub web_api: Option<String>,
    pub offline_api: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default settings applied to all contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientDefaults {
    /// Default request timeout in seconds.
    pub timeout: u64,

    /// Default user agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading / Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Get the path to the client config file.
pub fn client_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CLIENT_CONFIG_FILE))
}

/// Load the client configuration.
///
/// Returns a default config if the file doesn't exist.
pub fn load_client_config() -> Result<ClientConfig> {
    load_client_config_from(client_config_path().as_deref())
}

/// Load client config from a specific path.
pub fn load_client_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::new());
    };

    if !path.exists() {
        return Ok(ClientConfig::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    ClientConfig::from_yaml(&contents)
}

/// Save the client configuration.
pub fn save_client_config(config: &ClientConfig) -> Result<()> {
    let path = client_config_path()
        .ok_or_else(|| ConfigError::Other("Could not determine config directory".to_string()))?;
    save_client_config_to(config, &path)
}

/// Save client config to a specific path.
pub fn save_client_config_to(config: &ClientConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_yaml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
