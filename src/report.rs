//! Report materialization: turns the traversal accumulators into the final
//! document, sorted and deduplicated, or the no-usage notice.

use std::collections::HashSet;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::walker::AnalysisContext;

/// The five output sequences, each lexicographically sorted with no repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub used_symbols: Vec<String>,
    pub used_commands: Vec<String>,
    pub missing_symbols: Vec<String>,
    pub missing_commands: Vec<String>,
    pub dynamic_command_calls: Vec<String>,
}

fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = set.iter().cloned().collect();
    out.sort();
    out
}

impl CompatibilityReport {
    pub fn from_context(ctx: &AnalysisContext<'_>) -> Self {
        Self {
            used_symbols: sorted(&ctx.used_symbols),
            used_commands: sorted(&ctx.used_commands),
            missing_symbols: sorted(&ctx.missing_symbols),
            missing_commands: sorted(&ctx.missing_commands),
            dynamic_command_calls: sorted(&ctx.dynamic_command_calls),
        }
    }

    /// No source-API symbol was observed anywhere in the program.
    pub fn is_empty_of_usages(&self) -> bool {
        self.used_symbols.is_empty() && self.missing_symbols.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report document, or the notice when nothing was found.
    ///
    /// The notice goes to the provided stream and stderr the way the CLI is
    /// expected to surface it: one informational line and one hint.
    pub fn emit(&self, source_namespace: &str, out: &mut dyn Write) -> Result<()> {
        if self.is_empty_of_usages() {
            writeln!(out, "No usages of the {source_namespace} API found")?;
            eprintln!(
                "make sure that package dependencies are present, i.e. run `cargo fetch` or `cargo vendor`"
            );
            return Ok(());
        }
        writeln!(out, "{}", self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SymbolIndex;
    use crate::profile::ApiProfile;

    fn context_with<'a>(
        profile: &'a ApiProfile,
        index: &'a SymbolIndex,
        missing: &[&str],
    ) -> AnalysisContext<'a> {
        let mut ctx = AnalysisContext::new(profile, index);
        for name in missing {
            ctx.missing_symbols.insert(name.to_string());
        }
        ctx
    }

    #[test]
    fn sequences_are_sorted_and_deduplicated() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let mut ctx = context_with(&profile, &index, &[]);
        ctx.used_symbols.insert("\"vscode\".window".to_string());
        ctx.used_symbols.insert("\"vscode\".commands".to_string());
        ctx.used_commands.insert("vscode.open".to_string());
        ctx.used_commands.insert("vscode.open".to_string());

        let report = CompatibilityReport::from_context(&ctx);
        assert_eq!(report.used_symbols, ["\"vscode\".commands", "\"vscode\".window"]);
        assert_eq!(report.used_commands, ["vscode.open"]);
    }

    #[test]
    fn json_uses_the_five_camel_case_keys_in_order() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let ctx = context_with(&profile, &index, &["\"vscode\".tasks"]);
        let report = CompatibilityReport::from_context(&ctx);
        let json = report.to_json().unwrap();
        let positions: Vec<usize> = [
            "\"usedSymbols\"",
            "\"usedCommands\"",
            "\"missingSymbols\"",
            "\"missingCommands\"",
            "\"dynamicCommandCalls\"",
        ]
        .iter()
        .map(|key| json.find(key).expect("key must be present"))
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn no_usages_produces_the_notice_instead_of_json() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let mut ctx = context_with(&profile, &index, &[]);
        // Commands alone do not count as API usage.
        ctx.missing_commands.insert("myExt.doThing".to_string());
        let report = CompatibilityReport::from_context(&ctx);
        assert!(report.is_empty_of_usages());

        let mut out = Vec::new();
        report.emit("vscode", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "No usages of the vscode API found\n");
    }

    #[test]
    fn reports_from_identical_contexts_are_byte_identical() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let build = || {
            let mut ctx = context_with(&profile, &index, &["\"vscode\".debug", "\"vscode\".tasks"]);
            ctx.dynamic_command_calls.insert("cmd (src/lib.rs 3:9)".to_string());
            CompatibilityReport::from_context(&ctx).to_json().unwrap()
        };
        assert_eq!(build(), build());
    }
}
