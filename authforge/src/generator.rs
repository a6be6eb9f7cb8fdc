//! Plugin generation facade
//!
//! [`PluginGenerator`] validates a configuration, assembles the plugin
//! body from the section emitters and places it into the module frames.
//! Generation is a pure function of the configuration: the same input
//! always produces byte-identical output, and a generator can be shared
//! across threads.

use std::fmt;
use std::path::PathBuf;

use serde_json::json;
use tracing::{debug, info, instrument};

use crate::codegen::{doc_comment, quote, render_imports, Emitter, Expr, Import, LiteralPolicy, ObjectLit};
use crate::emit::{hooks_section, middlewares_section, rate_limit_section, schema_section};
use crate::error::Result;
use crate::model::{OutputSelection, PluginConfig};
use crate::naming::PluginNames;
use crate::templates::{
    TemplateRegistry, CLIENT_BOOTSTRAP_TEMPLATE, CLIENT_PLUGIN_TEMPLATE, SERVER_BOOTSTRAP_TEMPLATE,
    SERVER_PLUGIN_TEMPLATE,
};
use crate::validate::{AcceptAll, FragmentCheck, Validator};

const BETTER_AUTH: &str = "better-auth";
const BETTER_AUTH_CLIENT: &str = "better-auth/client";

/// Options that change how values are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Escape or reject values that need escaping in string literals
    pub literal_policy: LiteralPolicy,
}

/// One of the four generated artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Server plugin module
    ServerPlugin,
    /// Client plugin module
    ClientPlugin,
    /// Server initializer snippet
    ServerBootstrap,
    /// Client initializer snippet
    ClientBootstrap,
}

impl Artifact {
    /// Every artifact, in output order
    pub const ALL: [Self; 4] = [
        Self::ServerPlugin,
        Self::ClientPlugin,
        Self::ServerBootstrap,
        Self::ClientBootstrap,
    ];

    /// Where the artifact is written, relative to the output directory
    ///
    /// The plugin modules land where the bootstrap snippets import them from.
    #[must_use]
    pub fn path(self, names: &PluginNames) -> PathBuf {
        match self {
            Self::ServerPlugin => PathBuf::from(names.module_dir()).join("index.ts"),
            Self::ClientPlugin => PathBuf::from(names.module_dir()).join("client.ts"),
            Self::ServerBootstrap => PathBuf::from("server.ts"),
            Self::ClientBootstrap => PathBuf::from("auth-client.ts"),
        }
    }

    /// Whether the output flags ask for this artifact
    #[must_use]
    pub const fn is_selected(self, outputs: &OutputSelection) -> bool {
        match self {
            Self::ServerPlugin => outputs.generate_server,
            Self::ClientPlugin => outputs.generate_client,
            Self::ServerBootstrap => outputs.add_to_bootstrap,
            Self::ClientBootstrap => outputs.add_to_bootstrap && outputs.generate_client,
        }
    }

    /// Short description for user feedback
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ServerPlugin => "Server plugin",
            Self::ClientPlugin => "Client plugin",
            Self::ServerBootstrap => "Server bootstrap snippet",
            Self::ClientBootstrap => "Client bootstrap snippet",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// All four artifacts of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlugin {
    /// Names derived from the plugin name
    pub names: PluginNames,
    /// Server plugin module
    pub server_plugin: String,
    /// Client plugin module
    pub client_plugin: String,
    /// Server bootstrap snippet
    pub server_bootstrap: String,
    /// Client bootstrap snippet
    pub client_bootstrap: String,
}

impl GeneratedPlugin {
    /// Source of one artifact
    #[must_use]
    pub fn source(&self, artifact: Artifact) -> &str {
        match artifact {
            Artifact::ServerPlugin => &self.server_plugin,
            Artifact::ClientPlugin => &self.client_plugin,
            Artifact::ServerBootstrap => &self.server_bootstrap,
            Artifact::ClientBootstrap => &self.client_bootstrap,
        }
    }
}

/// A generated file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Which artifact this is
    pub artifact: Artifact,
    /// Path relative to the output directory
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

/// Turns plugin configurations into TypeScript sources
#[derive(Debug)]
pub struct PluginGenerator {
    templates: TemplateRegistry,
    options: GenerateOptions,
    checker: Box<dyn FragmentCheck>,
}

impl PluginGenerator {
    /// Generator with default options that accepts every fragment
    ///
    /// # Errors
    ///
    /// Returns an error if a module frame fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: TemplateRegistry::new()?,
            options: GenerateOptions::default(),
            checker: Box::new(AcceptAll),
        })
    }

    /// Replace the options
    #[must_use]
    pub const fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the fragment checker
    #[must_use]
    pub fn with_checker(mut self, checker: impl FragmentCheck + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    fn validator(&self) -> Validator<'_> {
        Validator::new(self.options.literal_policy, self.checker.as_ref())
    }

    /// Server plugin module
    ///
    /// # Errors
    ///
    /// Returns the first validation problem, or a template error.
    #[instrument(level = "debug", skip_all, fields(plugin = %config.name))]
    pub fn server_plugin(&self, config: &PluginConfig) -> Result<String> {
        let names = self.validator().validate(config)?;
        self.render_server_plugin(config, &names)
    }

    /// Client plugin module
    ///
    /// # Errors
    ///
    /// Returns the first validation problem, or a template error.
    #[instrument(level = "debug", skip_all, fields(plugin = %config.name))]
    pub fn client_plugin(&self, config: &PluginConfig) -> Result<String> {
        let names = self.validator().validate(config)?;
        self.render_client_plugin(config, &names)
    }

    /// Server bootstrap snippet; only the plugin name is used
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin name is unusable, or a template error.
    #[instrument(level = "debug", skip_all, fields(plugin = %config.name))]
    pub fn server_bootstrap(&self, config: &PluginConfig) -> Result<String> {
        let names = self.validator().plugin_names(config)?;
        self.render_server_bootstrap(&names)
    }

    /// Client bootstrap snippet; only the plugin name is used
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin name is unusable, or a template error.
    #[instrument(level = "debug", skip_all, fields(plugin = %config.name))]
    pub fn client_bootstrap(&self, config: &PluginConfig) -> Result<String> {
        let names = self.validator().plugin_names(config)?;
        self.render_client_bootstrap(&names)
    }

    /// All four artifacts, validating once
    ///
    /// # Errors
    ///
    /// Returns the first validation problem, or a template error.
    #[instrument(level = "debug", skip_all, fields(plugin = %config.name))]
    pub fn generate_all(&self, config: &PluginConfig) -> Result<GeneratedPlugin> {
        let names = self.validator().validate(config)?;
        let generated = GeneratedPlugin {
            server_plugin: self.render_server_plugin(config, &names)?,
            client_plugin: self.render_client_plugin(config, &names)?,
            server_bootstrap: self.render_server_bootstrap(&names)?,
            client_bootstrap: self.render_client_bootstrap(&names)?,
            names,
        };
        info!(symbol = %generated.names.symbol, "generated plugin sources");
        Ok(generated)
    }

    /// The artifacts asked for by the configuration's output flags
    ///
    /// # Errors
    ///
    /// Returns the first validation problem, or a template error.
    pub fn selected_files(&self, config: &PluginConfig) -> Result<Vec<GeneratedFile>> {
        let generated = self.generate_all(config)?;
        let files: Vec<GeneratedFile> = Artifact::ALL
            .into_iter()
            .filter(|artifact| artifact.is_selected(&config.outputs))
            .map(|artifact| GeneratedFile {
                artifact,
                path: artifact.path(&generated.names),
                content: generated.source(artifact).to_string(),
                description: artifact.description().to_string(),
            })
            .collect();
        debug!(count = files.len(), "selected output files");
        Ok(files)
    }

    fn render_server_plugin(&self, config: &PluginConfig, names: &PluginNames) -> Result<String> {
        let mut imports = vec![Import::types(&["BetterAuthPlugin"], BETTER_AUTH)];
        if config.needs_middleware_helpers() {
            imports.push(Import::named(&["createAuthMiddleware"], "better-auth/plugins"));
            imports.push(Import::named(&["APIError"], "better-auth/api"));
        }

        let body = ObjectLit::new()
            .prop("id", Expr::str(&names.symbol))
            .prop_opt("schema", schema_section(&config.tables))
            .prop_opt("hooks", hooks_section(&config.hooks))
            .prop_opt("middlewares", middlewares_section(&config.middlewares))
            .prop_opt("rateLimit", rate_limit_section(&config.rate_limits));

        let description = match config.description.trim() {
            "" => format!("{} plugin for Better Auth", names.symbol),
            description => description.to_string(),
        };

        self.templates.render(
            SERVER_PLUGIN_TEMPLATE,
            &json!({
                "imports": render_imports(&imports),
                "doc": doc_comment(&description),
                "symbol": names.symbol,
                "body": Emitter::render(&body.into(), 1),
            }),
        )
    }

    fn render_client_plugin(&self, config: &PluginConfig, names: &PluginNames) -> Result<String> {
        let imports = [
            Import::types(&["BetterAuthClientPlugin"], BETTER_AUTH_CLIENT),
            Import::types(&[names.symbol.as_str()], "./index"),
        ];

        let body = ObjectLit::new()
            .prop("id", Expr::str(&names.symbol))
            .prop(
                "$InferServerPlugin",
                Expr::raw(format!("{{}} as ReturnType<{}>", names.type_alias)),
            );

        let subject = match config.description.trim() {
            "" => names.symbol.as_str(),
            description => description,
        };

        self.templates.render(
            CLIENT_PLUGIN_TEMPLATE,
            &json!({
                "imports": render_imports(&imports),
                "alias": names.type_alias,
                "symbol": names.symbol,
                "doc": doc_comment(&format!("Client plugin for {subject}")),
                "client_symbol": names.client_symbol,
                "body": Emitter::render(&body.into(), 1),
            }),
        )
    }

    fn render_server_bootstrap(&self, names: &PluginNames) -> Result<String> {
        self.templates.render(
            SERVER_BOOTSTRAP_TEMPLATE,
            &json!({
                "better_auth": quote(BETTER_AUTH),
                "symbol": names.symbol,
                "plugin_path": quote(&names.server_import_path()),
            }),
        )
    }

    fn render_client_bootstrap(&self, names: &PluginNames) -> Result<String> {
        self.templates.render(
            CLIENT_BOOTSTRAP_TEMPLATE,
            &json!({
                "better_auth_client": quote(BETTER_AUTH_CLIENT),
                "client_symbol": names.client_symbol,
                "plugin_path": quote(&names.client_import_path()),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use crate::validate::BalancedDelimiters;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_server_plugin() {
        let generator = PluginGenerator::new().unwrap();
        let source = generator.server_plugin(&PluginConfig::new("birthdayPlugin")).unwrap();
        assert_eq!(
            source,
            r#"import type { BetterAuthPlugin } from "better-auth";

/**
 * birthdayPlugin plugin for Better Auth
 */
export const birthdayPlugin = () =>
  ({
    id: "birthdayPlugin",
  } satisfies BetterAuthPlugin);
"#
        );
    }

    #[test]
    fn test_minimal_client_plugin() {
        let generator = PluginGenerator::new().unwrap();
        let mut config = PluginConfig::new("birthday plugin");
        config.description = "Tracks birthdays".to_string();
        let source = generator.client_plugin(&config).unwrap();
        assert_eq!(
            source,
            r#"import type { BetterAuthClientPlugin } from "better-auth/client";
import type { birthdayPlugin } from "./index";

type BirthdayPluginPlugin = typeof birthdayPlugin;

/**
 * Client plugin for Tracks birthdays
 */
export const birthdayPluginClient = () => {
  return {
    id: "birthdayPlugin",
    $InferServerPlugin: {} as ReturnType<BirthdayPluginPlugin>,
  } satisfies BetterAuthClientPlugin;
};
"#
        );
    }

    #[test]
    fn test_client_bootstrap() {
        let generator = PluginGenerator::new().unwrap();
        let source = generator
            .client_bootstrap(&PluginConfig::new("TOSAgreement"))
            .unwrap();
        assert_eq!(
            source,
            r#"import { createAuthClient } from "better-auth/client";
import { TOSAgreementClient } from "./tos-agreement-plugin/client";

const authClient = createAuthClient({
  plugins: [
    TOSAgreementClient(),
    // ... other plugins
  ]
});
"#
        );
    }

    #[test]
    fn test_bootstrap_ignores_invalid_sections() {
        let generator = PluginGenerator::new().unwrap();
        let mut config = PluginConfig::new("p");
        config.tables.push(crate::model::SchemaTable {
            name: "not valid".to_string(),
            ..crate::model::SchemaTable::draft("t1", true, "f1")
        });

        assert!(generator.server_plugin(&config).is_err());
        assert!(generator.server_bootstrap(&config).is_ok());
    }

    #[test]
    fn test_selected_files_follow_flags() {
        let generator = PluginGenerator::new().unwrap();
        let mut config = PluginConfig::new("birthday plugin");

        let paths = |config: &PluginConfig| -> Vec<PathBuf> {
            generator
                .selected_files(config)
                .unwrap()
                .into_iter()
                .map(|file| file.path)
                .collect()
        };

        assert_eq!(
            paths(&config),
            [
                PathBuf::from("birthday-plugin/index.ts"),
                PathBuf::from("birthday-plugin/client.ts"),
            ]
        );

        config.outputs.add_to_bootstrap = true;
        config.outputs.generate_client = false;
        assert_eq!(
            paths(&config),
            [
                PathBuf::from("birthday-plugin/index.ts"),
                PathBuf::from("server.ts"),
            ]
        );
    }

    #[test]
    fn test_checker_and_policy_are_applied() {
        let mut config = PluginConfig::new("p");
        let mut middleware = crate::model::Middleware::draft("m1");
        middleware.path = "/x\"y".to_string();
        middleware.logic = "call(".to_string();
        config.middlewares.push(middleware);

        let lenient = PluginGenerator::new().unwrap();
        assert!(lenient.server_plugin(&config).unwrap().contains(r#"path: "/x\"y","#));

        let strict = PluginGenerator::new().unwrap().with_options(GenerateOptions {
            literal_policy: LiteralPolicy::Reject,
        });
        assert!(matches!(
            strict.server_plugin(&config),
            Err(GenerateError::UnterminatedLiteral { .. })
        ));

        let checked = PluginGenerator::new().unwrap().with_checker(BalancedDelimiters);
        assert!(matches!(
            checked.server_plugin(&config),
            Err(GenerateError::RejectedFragment { .. })
        ));
    }

    #[test]
    fn test_generator_is_shareable() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<PluginGenerator>();
    }
}
