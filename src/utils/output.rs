//! # 美化输出工具
//!
//! 统一的终端输出样式，以及构建诊断和批量汇总的打印。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::batch::BatchResult;
use crate::report::{DiagnosticKind, Diagnostics};

use colored::Colorize;
use std::path::Path;

pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印写出的文件：`[OK] <what> -> <path>`
pub fn print_written(what: &str, path: &Path) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        what.dimmed(),
        "->".cyan(),
        path.display()
    );
}

/// 打印构建诊断，缺图只汇总数量
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        if diagnostic.kind != DiagnosticKind::MissingFigureAsset {
            print_warning(&format!("[{}] {}", diagnostic.kind, diagnostic.message));
        }
    }
    for line in diagnostic_summary(diagnostics) {
        print_skip(&line);
    }
}

/// 诊断数量汇总，没有对应诊断的类别不输出
pub fn diagnostic_summary(diagnostics: &Diagnostics) -> Vec<String> {
    let mut lines = Vec::new();

    let unmatched = diagnostics.unmatched_records();
    if unmatched > 0 {
        lines.push(format!(
            "{} record(s) without a recognised job type contributed no job-specific content",
            unmatched
        ));
    }

    let missing = diagnostics.count(DiagnosticKind::MissingFigureAsset);
    if missing > 0 {
        lines.push(format!("{} figure(s) not found in image directory", missing));
    }
    lines
}

/// 打印批量处理汇总
pub fn print_batch_summary(result: &BatchResult) {
    print_separator();
    println!(
        "  Total: {}  |  {} {}  |  {} {}  |  {} {}",
        result.total(),
        "Built:".green(),
        result.success,
        "Skipped:".dimmed(),
        result.skipped,
        "Failed:".red(),
        result.failed
    );
    print_separator();

    for (name, err) in &result.failures {
        print_error(&format!("{}: {}", name, err));
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
