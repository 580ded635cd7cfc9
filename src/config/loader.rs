//! Load proxy config from a JSON file and resolve it into the runtime model.

use crate::config::resolved::{ResolvedModel, ResourceDescriptor};
use crate::config::{validate, ProxyConfig};
use crate::error::ConfigError;
use std::path::Path;
use std::sync::Arc;

/// Build resolved model from proxy config. Validates first.
pub fn resolve(config: &ProxyConfig) -> Result<ResolvedModel, ConfigError> {
    validate(config)?;

    let mut resources = Vec::with_capacity(config.resources.len());
    for res in &config.resources {
        let table = res.table.clone().unwrap_or_else(|| res.endpoint.clone());
        let descriptor = Arc::new(
            ResourceDescriptor::new(res.endpoint.clone(), table)
                .with_json_fields(res.json_fields.iter().cloned())
                .with_id_column(res.id_column.clone()),
        );
        resources.push(descriptor);
    }

    Ok(ResolvedModel {
        resources,
        settings: config.settings.clone(),
        login: config.login.clone(),
        comments: config.comments.clone(),
    })
}

pub fn parse_config(raw: &str) -> Result<ProxyConfig, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Read the proxy config file. A missing file yields an empty config (no resources).
pub async fn load_from_path(path: &Path) -> Result<ProxyConfig, ConfigError> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => parse_config(&raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "proxy config not found, no resources registered");
            Ok(ProxyConfig::default())
        }
        Err(e) => Err(ConfigError::Load(format!("{}: {}", path.display(), e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "resources": [
            { "endpoint": "articles", "json_fields": ["tags"] },
            { "endpoint": "projects", "table": "portfolio_projects", "json_fields": ["tech", "images"], "id_column": "slug" }
        ],
        "settings": { "table": "site_settings" },
        "comments": {}
    }"#;

    fn find<'a>(model: &'a ResolvedModel, endpoint: &str) -> &'a ResourceDescriptor {
        model.resources.iter().find(|r| r.endpoint == endpoint).unwrap()
    }

    #[test]
    fn resolves_descriptors_with_defaults() {
        let model = resolve(&parse_config(SAMPLE).unwrap()).unwrap();
        assert_eq!(model.resources.len(), 2);

        let articles = find(&model, "articles");
        assert_eq!(articles.table, "articles");
        assert_eq!(articles.id_column, "id");
        assert!(articles.json_fields.contains("tags"));

        let projects = find(&model, "projects");
        assert_eq!(projects.table, "portfolio_projects");
        assert_eq!(projects.id_column, "slug");
        assert_eq!(projects.json_fields.len(), 2);
    }

    #[test]
    fn fills_auxiliary_defaults() {
        let model = resolve(&parse_config(SAMPLE).unwrap()).unwrap();
        assert_eq!(model.settings.table, "site_settings");
        assert_eq!(model.settings.key_column, "key");
        assert_eq!(model.login.password_key, "admin_password");
        let comments = model.comments.unwrap();
        assert_eq!(comments.parent, "articles");
        assert_eq!(comments.parent_column, "article_id");
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(parse_config("{ nope"), Err(ConfigError::Load(_))));
    }

    #[tokio::test]
    async fn missing_file_yields_empty_config() {
        let config = load_from_path(Path::new("/definitely/not/here/proxy.json")).await.unwrap();
        assert!(config.resources.is_empty());
    }
}
