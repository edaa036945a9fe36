//! 控制台输出
//!
//! 文本格式（带颜色）和 JSON 格式两种渲染

use colored::*;
use serde::Serialize;
use std::path::Path;

use crate::reconciler::{ReconcileReport, SceneOutcome};
use crate::scene::UidChange;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// 文本格式
// ═══════════════════════════════════════════════════════════════════

pub fn render_header(root: &Path, dry_run: bool) -> String {
    let mut out = format!("{}", "🔧 Fixing script UIDs...".cyan().bold());
    out.push_str(&format!("\n   📁 Project: {}", root.display().to_string().yellow()));
    if dry_run {
        out.push_str(&format!("\n   {}", "(dry run - no files will be written)".yellow()));
    }
    out
}

/// 一处改写
pub fn render_change(change: &UidChange) -> String {
    format!(
        "  {} {}\n    Script:  {}\n    Old UID: {}\n    New UID: {}",
        "✓".green(),
        change.scene,
        change.script_path.cyan(),
        change.old_uid.red(),
        change.new_uid.green()
    )
}

/// 失败的场景
pub fn render_failure(path: &Path, message: &str) -> String {
    format!(
        "  {} {} - {}",
        "⚠".yellow(),
        path.display().to_string().yellow(),
        message
    )
}

/// 处理完一个场景时的进度输出（stdout, stderr）
pub fn print_outcome(outcome: &SceneOutcome, quiet: bool) {
    match outcome {
        SceneOutcome::Updated { changes, .. } if !quiet => {
            for change in changes {
                println!("{}", render_change(change));
            }
        }
        SceneOutcome::Failed { path, message } => {
            eprintln!("{}", render_failure(path, message));
        }
        _ => {}
    }
}

pub fn render_summary(report: &ReconcileReport) -> String {
    let headline = if report.has_errors() {
        "⚠️  UID fix finished with errors".yellow().bold()
    } else {
        "✅ UID fix complete!".green().bold()
    };
    let verb = if report.dry_run { "Would update" } else { "Updated" };

    format!(
        "{}\n   {} {} scene file(s)\n   Unchanged: {}\n   Scripts scanned: {}\n   Errors: {}",
        headline,
        verb,
        report.updated_count().to_string().green(),
        report.unchanged_count(),
        report.identifiers.len(),
        if report.has_errors() {
            report.error_count().to_string().red()
        } else {
            report.error_count().to_string().normal()
        }
    )
}

// ═══════════════════════════════════════════════════════════════════
// JSON 格式
// ═══════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct JsonReport<'a> {
    updated: usize,
    unchanged: usize,
    errors: usize,
    dry_run: bool,
    scripts: usize,
    changes: Vec<&'a UidChange>,
    failures: Vec<JsonFailure<'a>>,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    path: &'a Path,
    message: &'a str,
}

pub fn render_json(report: &ReconcileReport) -> serde_json::Result<String> {
    let json = JsonReport {
        updated: report.updated_count(),
        unchanged: report.unchanged_count(),
        errors: report.error_count(),
        dry_run: report.dry_run,
        scripts: report.identifiers.len(),
        changes: report.changes().collect(),
        failures: report
            .failures()
            .map(|(path, message)| JsonFailure { path, message })
            .collect(),
    };

    serde_json::to_string_pretty(&json)
}
