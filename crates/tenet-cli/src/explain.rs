//! `tenet explain`: per-rule report plus the composed system message.

use std::fmt::Write as _;
use std::io::Read as _;
use std::path::Path;

use anyhow::{Context, Result};
use tenet_core::{ContextItem, Rule};
use tenet_rules::{Decision, RuleEngine, SystemMessageRequest};
use tenet_settings::TenetSettings;
use tracing::debug;

use crate::ExplainArgs;

/// Load the inputs named by `args` and render the report.
pub(crate) fn run(args: &ExplainArgs, settings: &TenetSettings) -> Result<String> {
    let rules = load_rules(&args.rules)?;
    let message = args.message.as_deref().map(load_message).transpose()?;
    let context_items: Vec<ContextItem> = args.context.iter().map(|p| load_context(p)).collect();

    let engine = RuleEngine::from_settings(&settings.rules);
    let request = SystemMessageRequest {
        base_system_message: args.base.as_deref(),
        user_message: message.as_deref(),
        context_items: &context_items,
        rules: &rules,
    };

    if args.json {
        let composed = engine.compose(&request);
        return serde_json::to_string_pretty(&composed).context("Failed to serialize result");
    }

    let report = engine.explain(request.user_message, request.rules, request.context_items);
    let composed = engine.compose(&request);
    Ok(render(&report, &composed.system_message))
}

fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid rules JSON: {}", path.display()))
}

fn load_message(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        let _ = std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read message from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read message: {}", path.display()))
}

/// Context file as a file item. An unreadable file still contributes its path.
fn load_context(path: &Path) -> ContextItem {
    let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
        debug!(path = %path.display(), error = %e, "context file unreadable, using path only");
        String::new()
    });
    ContextItem::file(path.to_string_lossy(), content)
}

fn render(report: &[(&Rule, Decision)], system_message: &str) -> String {
    let mut out = String::new();
    for (rule, decision) in report {
        let verdict = if decision.applies { "apply" } else { "skip" };
        let _ = writeln!(out, "{verdict:<5} {}  ({})", rule.name, decision.reason);
    }
    let _ = writeln!(out, "\n--- system message ---");
    out.push_str(system_message);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
