//! Custom extractors.

mod auth;
mod validated_json;

pub use auth::{require_admin, AdminUser, CurrentUser};
pub use validated_json::ValidatedJson;
