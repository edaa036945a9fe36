use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use godot_uid_fix::project::resolve_project_root;
use godot_uid_fix::report::{self, OutputFormat};
use godot_uid_fix::{reconcile_with_progress, ReconcileOptions, DEFAULT_SCENES_DIR, DEFAULT_SCRIPTS_DIR};

/// Godot UID Fix
///
/// 读取脚本的 .uid 文件，批量修复场景文件中的 UID 引用
#[derive(Parser)]
#[command(name = "godot-uid-fix")]
#[command(author, version = env!("APP_VERSION"), about)]
#[command(
    long_about = "Rewrites stale uid=\"...\" attributes on [ext_resource type=\"Script\"] lines\n\
                  in .tscn scenes so they match the UID stored next to each script (.gd.uid)."
)]
struct Cli {
    /// 项目根目录（默认：向上查找 project.godot，找不到则使用当前目录）
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// 脚本目录（相对项目根目录）
    #[arg(long, default_value = DEFAULT_SCRIPTS_DIR)]
    scripts: PathBuf,

    /// 场景目录（相对项目根目录）
    #[arg(long, default_value = DEFAULT_SCENES_DIR)]
    scenes: PathBuf,

    /// 只报告，不写回文件
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// 输出格式：text, json（默认：text）
    #[arg(long, default_value = "text")]
    format: String,

    /// 不输出每处改写，只输出警告和汇总
    #[arg(short, long)]
    quiet: bool,

    /// 即使有场景处理失败也以 0 退出
    #[arg(long)]
    allow_errors: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = match OutputFormat::parse(&cli.format) {
        Some(format) => format,
        None => {
            eprintln!("{}", format!("❌ Unknown format: {}", cli.format).red());
            eprintln!("Available formats: text, json");
            std::process::exit(2);
        }
    };

    let root = resolve_project_root(cli.root.as_deref());
    let options = ReconcileOptions::new(&root)
        .scripts_dir(&cli.scripts)
        .scenes_dir(&cli.scenes)
        .dry_run(cli.dry_run);

    let text = format == OutputFormat::Text;
    if text {
        println!("{}", report::render_header(&root, cli.dry_run));
        println!();
    }

    let result = reconcile_with_progress(&options, |outcome| {
        if text {
            report::print_outcome(outcome, cli.quiet);
        }
    })
    .with_context(|| format!("UID fix aborted in {}", root.display()))?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", report::render_summary(&result));
        }
        OutputFormat::Json => {
            println!("{}", report::render_json(&result)?);
        }
    }

    // 有失败的场景时默认返回非 0；--allow-errors 保留总是成功的行为
    if result.has_errors() && !cli.allow_errors {
        std::process::exit(1);
    }

    Ok(())
}
