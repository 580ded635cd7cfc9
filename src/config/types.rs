//! Raw config types matching the proxy JSON config file.

use serde::{Deserialize, Serialize};

/// One HTTP-exposed resource backed by a table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub endpoint: String,
    /// Backing table; defaults to the endpoint name.
    #[serde(default)]
    pub table: Option<String>,
    /// Columns stored as JSON text (list-valued fields).
    #[serde(default)]
    pub json_fields: Vec<String>,
    #[serde(default = "default_id_column")]
    pub id_column: String,
}

fn default_id_column() -> String {
    "id".into()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_settings_table")]
    pub table: String,
    #[serde(default = "default_key_column")]
    pub key_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
}

fn default_settings_table() -> String {
    "settings".into()
}

fn default_key_column() -> String {
    "key".into()
}

fn default_value_column() -> String {
    "value".into()
}

impl Default for SettingsConfig {
    fn default() -> Self {
        SettingsConfig {
            table: default_settings_table(),
            key_column: default_key_column(),
            value_column: default_value_column(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Settings key holding the expected password.
    #[serde(default = "default_password_key")]
    pub password_key: String,
}

fn default_password_key() -> String {
    "admin_password".into()
}

impl Default for LoginConfig {
    fn default() -> Self {
        LoginConfig {
            password_key: default_password_key(),
        }
    }
}

/// Comments nested under a parent resource: `/api/{parent}/:id/comments`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentsConfig {
    #[serde(default = "default_comments_parent")]
    pub parent: String,
    #[serde(default = "default_comments_table")]
    pub table: String,
    #[serde(default = "default_comments_parent_column")]
    pub parent_column: String,
}

fn default_comments_parent() -> String {
    "articles".into()
}

fn default_comments_table() -> String {
    "comments".into()
}

fn default_comments_parent_column() -> String {
    "article_id".into()
}

impl Default for CommentsConfig {
    fn default() -> Self {
        CommentsConfig {
            parent: default_comments_parent(),
            table: default_comments_table(),
            parent_column: default_comments_parent_column(),
        }
    }
}

/// All proxy config in one struct.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub comments: Option<CommentsConfig>,
}
