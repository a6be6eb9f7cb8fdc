//! authforge CLI library
//!
//! Everything the `authforge` binary does, exposed for integration tests:
//! settings loading, configuration documents, field specs and the command
//! implementations.

pub mod commands;
pub mod config_file;
pub mod field_spec;
pub mod observability;
pub mod settings;

pub use config_file::{load_config, save_config, ConfigFormat};
pub use field_spec::FieldSpec;
pub use settings::AuthforgeSettings;
