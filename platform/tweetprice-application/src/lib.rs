pub mod config;
pub mod joining;
pub mod meta;
mod shared;
pub mod validation;

pub use shared::resolve_join_options;
