//! Store-call-then-shape services behind the HTTP handlers.

pub mod comments;
pub mod login;
pub mod resource;
pub mod settings;

pub use comments::CommentService;
pub use login::LoginService;
pub use resource::ResourceService;
pub use settings::SettingsService;
