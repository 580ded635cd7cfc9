//! Resource proxy: table-driven CRUD endpoints in front of a relational store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod json_fields;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{resolve, load_from_path, ProxyConfig, ResolvedModel, ResourceDescriptor, ServerSettings, StoreKind};
pub use error::{AppError, ConfigError};
pub use handlers::resource::resource_routes;
pub use routes::{api_routes, build_app, common_routes};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Record, RecordStore, Rejection, UpdateOutcome};
