pub mod auth;
pub mod settings;
pub mod streak;
pub mod tasks;

/// Modules whose task lists are cleared by a full progress reset.
pub const MODULES: &[&str] = &["javascript"];
