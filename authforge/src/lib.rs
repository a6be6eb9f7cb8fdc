//! authforge: deterministic generator for Better Auth plugins
//!
//! A [`PluginConfig`] describes one plugin: extra database tables and
//! fields, lifecycle hooks, path-scoped middlewares and rate limits. From it
//! the generator produces four TypeScript artifacts:
//!
//! 1. the server plugin module (`<kebab>-plugin/index.ts`)
//! 2. the client plugin module (`<kebab>-plugin/client.ts`)
//! 3. a snippet registering the plugin with `betterAuth`
//! 4. a snippet registering the client plugin with `createAuthClient`
//!
//! # Design Principles
//!
//! 1. **Pure generation**: same configuration in, byte-identical output out
//! 2. **Fail fast**: invalid input is an error, never malformed source
//! 3. **Structured output**: sections are built as a tree and rendered once
//!
//! # Quick Start
//!
//! ```rust
//! use authforge::{PluginConfig, PluginGenerator};
//!
//! # fn main() -> authforge::Result<()> {
//! let config = PluginConfig::from_json(r#"{
//!     "name": "birthdayPlugin",
//!     "tables": [{
//!         "id": "t1", "name": "userProfile", "isNew": true,
//!         "fields": [{ "id": "f1", "name": "birthday", "type": "date", "required": true }]
//!     }]
//! }"#).expect("valid configuration");
//!
//! let generator = PluginGenerator::new()?;
//! let plugin = generator.generate_all(&config)?;
//!
//! assert!(plugin.server_plugin.contains("export const birthdayPlugin"));
//! assert!(plugin.client_bootstrap.contains("\"./birthday-plugin/client\""));
//! # Ok(())
//! # }
//! ```

pub mod codegen;
pub mod editor;
pub mod emit;
pub mod error;
pub mod model;
pub mod naming;
pub mod templates;
pub mod validate;

mod generator;

pub use editor::ConfigEditor;
pub use error::{EditError, GenerateError, Result};
pub use generator::{Artifact, GenerateOptions, GeneratedFile, GeneratedPlugin, PluginGenerator};
pub use model::{OutputSelection, PluginConfig};
pub use naming::PluginNames;
