//! Artifact frames
//!
//! Every frame ends with exactly one newline. Imports, doc blocks and
//! object bodies arrive pre-rendered; import specifiers arrive quoted.

/// Server plugin module
pub const SERVER_PLUGIN: &str = r"{{imports}}

{{doc}}
export const {{symbol}} = () =>
  ({{body}} satisfies BetterAuthPlugin);
";

/// Client plugin module
pub const CLIENT_PLUGIN: &str = r"{{imports}}

type {{alias}} = typeof {{symbol}};

{{doc}}
export const {{client_symbol}} = () => {
  return {{body}} satisfies BetterAuthClientPlugin;
};
";

/// Server bootstrap snippet
pub const SERVER_BOOTSTRAP: &str = r"import { betterAuth } from {{better_auth}};
import { {{symbol}} } from {{plugin_path}};

export const auth = betterAuth({
  plugins: [
    {{symbol}}(),
    // ... other plugins
  ]
});
";

/// Client bootstrap snippet
pub const CLIENT_BOOTSTRAP: &str = r"import { createAuthClient } from {{better_auth_client}};
import { {{client_symbol}} } from {{plugin_path}};

const authClient = createAuthClient({
  plugins: [
    {{client_symbol}}(),
    // ... other plugins
  ]
});
";
