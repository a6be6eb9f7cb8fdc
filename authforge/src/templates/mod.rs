//! Handlebars frames for the generated artifacts
//!
//! Frames only substitute plain variables. Anything structured (imports,
//! the plugin body) is built by [`crate::codegen`] and handed in as text,
//! so the frames stay free of block helpers and escaping is disabled.

mod files;

pub use files::{CLIENT_BOOTSTRAP, CLIENT_PLUGIN, SERVER_BOOTSTRAP, SERVER_PLUGIN};

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

/// Registered template name of the server plugin module
pub const SERVER_PLUGIN_TEMPLATE: &str = "server_plugin";
/// Registered template name of the client plugin module
pub const CLIENT_PLUGIN_TEMPLATE: &str = "client_plugin";
/// Registered template name of the server bootstrap snippet
pub const SERVER_BOOTSTRAP_TEMPLATE: &str = "server_bootstrap";
/// Registered template name of the client bootstrap snippet
pub const CLIENT_BOOTSTRAP_TEMPLATE: &str = "client_bootstrap";

/// Compiled artifact frames
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Compile every frame
    ///
    /// # Errors
    ///
    /// Returns an error if a frame fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generating TypeScript, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        for (name, source) in [
            (SERVER_PLUGIN_TEMPLATE, SERVER_PLUGIN),
            (CLIENT_PLUGIN_TEMPLATE, CLIENT_PLUGIN),
            (SERVER_BOOTSTRAP_TEMPLATE, SERVER_BOOTSTRAP),
            (CLIENT_BOOTSTRAP_TEMPLATE, CLIENT_BOOTSTRAP),
        ] {
            handlebars
                .register_template_string(name, source)
                .map_err(Box::new)?;
        }

        Ok(Self { handlebars })
    }

    /// Render a registered frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is unknown or a variable is missing.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        Ok(self.handlebars.render(name, context)?)
    }
}
