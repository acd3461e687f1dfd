//! API profile: the fixed vocabulary of one portability check.
//!
//! A profile names the two API surfaces (source and reference crate), the
//! ordered rename rules used to guess a reference-side equivalent of a source
//! symbol, the command allow-list, and the literal prefixes that mark a string
//! as command-shaped. The default profile targets porting `vscode` plugins to
//! the `theia` API.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::mapper::RenameRule;

/// Commands the reference API is known to dispatch.
static DEFAULT_COMMANDS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    ["vscode.open", "vscode.diff", "setContext", "vscode.previewHtml"]
        .into_iter()
        .map(str::to_string)
        .collect()
});

/// Literal prefixes that mark a bare string as a command identifier.
const DEFAULT_COMMAND_PREFIXES: &[&str] = &[
    "vscode.",
    "workbench.",
    "editor.",
    "history.",
    "search.",
    "markdown.",
    "actions.",
];

/// Everything the analysis needs to know about the two API surfaces.
#[derive(Debug, Clone)]
pub struct ApiProfile {
    /// Crate name of the API the analyzed package is written against.
    pub source_namespace: String,
    /// Crate name of the API being checked for compatibility.
    pub reference_namespace: String,
    /// Ordered textual substitutions mapping source names to reference names.
    pub rename_rules: Vec<RenameRule>,
    /// Qualified-name suffix identifying the command-dispatch member.
    pub execute_command_suffix: String,
    /// Commands known to be supported by the reference API, matched verbatim.
    pub command_allow_list: BTreeSet<String>,
    /// Prefixes that make a standalone string literal command-shaped.
    pub command_prefixes: Vec<String>,
}

impl ApiProfile {
    /// Quoted-namespace prefix of source-API qualified names, e.g. `"vscode".`.
    pub fn source_marker(&self) -> String {
        format!("\"{}\".", self.source_namespace)
    }

    /// Quoted-namespace prefix of reference-API qualified names.
    pub fn reference_marker(&self) -> String {
        format!("\"{}\".", self.reference_namespace)
    }
}

impl Default for ApiProfile {
    fn default() -> Self {
        let source_namespace = "vscode".to_string();
        let reference_namespace = "theia".to_string();
        let rename_rules = vec![
            RenameRule::new(
                format!("\"{source_namespace}\""),
                format!("\"{reference_namespace}\""),
            ),
            RenameRule::new("ExtensionContext", "PluginContext"),
            RenameRule::new("Extension", "Plugin"),
            RenameRule::new("extensions", "plugins"),
        ];
        Self {
            source_namespace,
            reference_namespace,
            rename_rules,
            execute_command_suffix: ".execute_command".to_string(),
            command_allow_list: DEFAULT_COMMANDS.clone(),
            command_prefixes: DEFAULT_COMMAND_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}
