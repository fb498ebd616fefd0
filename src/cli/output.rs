//! CLI output formatting

use serde_json::Value;

// Re-export style
pub use console::style;
use console::Emoji;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// Format one route table entry for display
pub fn format_route(party_id: &str, entry_point: &Value) -> String {
    let endpoints: Vec<String> = entry_point
        .get("default")
        .and_then(Value::as_array)
        .map(|targets| {
            targets
                .iter()
                .map(|target| {
                    let ip = target.get("ip").and_then(Value::as_str).unwrap_or("?");
                    let port = target
                        .get("port")
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "?".to_string());
                    format!("{}:{}", ip, port)
                })
                .collect()
        })
        .unwrap_or_default();

    if endpoints.is_empty() {
        format!("  {} {}", style(party_id).bold(), style("(no default entry point)").dim())
    } else {
        format!("  {} → {}", style(party_id).bold(), style(endpoints.join(", ")).cyan())
    }
}

/// Format a rendered document with a heading
pub fn format_document(title: &str, json: &str) -> String {
    format!("{} {}\n{}", INFO, style(title).bold(), json)
}
