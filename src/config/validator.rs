//! Config validation: identifier safety and endpoint uniqueness.

use crate::config::ProxyConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Endpoints owned by the auxiliary routes.
pub const RESERVED_ENDPOINTS: &[&str] = &["settings", "login"];

fn sql_identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"))
}

fn endpoint_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex"))
}

/// Table and column names are interpolated into SQL, so only plain identifiers are accepted.
pub fn check_identifier(kind: &'static str, value: &str) -> Result<(), ConfigError> {
    if sql_identifier_re().is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}

pub fn validate(config: &ProxyConfig) -> Result<(), ConfigError> {
    let mut endpoints = HashSet::new();
    for res in &config.resources {
        if !endpoint_re().is_match(&res.endpoint) {
            return Err(ConfigError::InvalidIdentifier {
                kind: "endpoint",
                value: res.endpoint.clone(),
            });
        }
        if RESERVED_ENDPOINTS.contains(&res.endpoint.as_str()) {
            return Err(ConfigError::ReservedEndpoint(res.endpoint.clone()));
        }
        if !endpoints.insert(res.endpoint.as_str()) {
            return Err(ConfigError::DuplicateEndpoint(res.endpoint.clone()));
        }
        check_identifier("table", res.table.as_deref().unwrap_or(&res.endpoint))?;
        check_identifier("id column", &res.id_column)?;
        for field in &res.json_fields {
            check_identifier("json field", field)?;
        }
    }

    check_identifier("settings table", &config.settings.table)?;
    check_identifier("settings key column", &config.settings.key_column)?;
    check_identifier("settings value column", &config.settings.value_column)?;

    if let Some(comments) = &config.comments {
        if !endpoints.contains(comments.parent.as_str()) {
            return Err(ConfigError::MissingReference {
                kind: "comments parent resource",
                id: comments.parent.clone(),
            });
        }
        check_identifier("comments table", &comments.table)?;
        check_identifier("comments parent column", &comments.parent_column)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CommentsConfig, ResourceConfig};

    fn resource(endpoint: &str) -> ResourceConfig {
        ResourceConfig {
            endpoint: endpoint.into(),
            table: None,
            json_fields: vec!["tags".into()],
            id_column: "id".into(),
        }
    }

    #[test]
    fn accepts_plain_config() {
        let config = ProxyConfig {
            resources: vec![resource("articles"), resource("projects")],
            comments: Some(CommentsConfig::default()),
            ..Default::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_duplicate_endpoints() {
        let config = ProxyConfig {
            resources: vec![resource("articles"), resource("articles")],
            ..Default::default()
        };
        assert!(matches!(validate(&config), Err(ConfigError::DuplicateEndpoint(e)) if e == "articles"));
    }

    #[test]
    fn rejects_reserved_endpoints() {
        let config = ProxyConfig {
            resources: vec![resource("settings")],
            ..Default::default()
        };
        assert!(matches!(validate(&config), Err(ConfigError::ReservedEndpoint(_))));
    }

    #[test]
    fn rejects_injection_in_table_name() {
        let mut res = resource("articles");
        res.table = Some("articles; DROP TABLE users".into());
        let config = ProxyConfig {
            resources: vec![res],
            ..Default::default()
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidIdentifier { kind: "table", .. })
        ));
    }

    #[test]
    fn comments_parent_must_be_registered() {
        let config = ProxyConfig {
            resources: vec![resource("projects")],
            comments: Some(CommentsConfig::default()),
            ..Default::default()
        };
        assert!(matches!(validate(&config), Err(ConfigError::MissingReference { .. })));
    }
}
