//! Resolved resource model: config validated and flattened for runtime use.

use crate::config::{CommentsConfig, LoginConfig, SettingsConfig};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Immutable description of one resource. Built once at startup and shared by its handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub endpoint: String,
    pub table: String,
    /// Columns stored as JSON text: decoded on list, encoded on create/update.
    pub json_fields: BTreeSet<String>,
    pub id_column: String,
}

impl ResourceDescriptor {
    pub fn new(endpoint: impl Into<String>, table: impl Into<String>) -> Self {
        ResourceDescriptor {
            endpoint: endpoint.into(),
            table: table.into(),
            json_fields: BTreeSet::new(),
            id_column: "id".into(),
        }
    }

    pub fn with_json_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.json_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResolvedModel {
    pub resources: Vec<Arc<ResourceDescriptor>>,
    pub settings: SettingsConfig,
    pub login: LoginConfig,
    pub comments: Option<CommentsConfig>,
}
