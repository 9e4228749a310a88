//! # batch 命令实现
//!
//! 在根目录下按目录分组收集记录文件，每组并行生成一份报告，
//! 写入该目录，图片目录为 `<目录>/temp`。
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/` 收集和并行执行
//! - 使用 `report/`, `render/`, `utils/output.rs`

use super::{directory_name, read_files};
use crate::batch::{BatchRunner, FileCollector, ProcessResult, RecordGroup};
use crate::cli::batch::BatchArgs;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::render::{self, OutputFormat};
use crate::report::{build_report, BuildOptions};
use crate::utils::output;

use std::fs;
use std::path::Path;

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    let config = ReportConfig::resolve(args.config.as_deref(), args.mode)?;

    output::print_header(&format!("Batch {} reports", config.mode));

    let groups = FileCollector::new(args.root.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect_groups()?;

    if groups.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.root.display()
        ));
        return Ok(());
    }

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Found {} record directories, using {} thread(s)",
        groups.len(),
        runner.jobs()
    ));

    let format = format_for(&args.output_name);
    let result = runner.run(&groups, |group| {
        process_group(group, &config, &args.output_name, format, args.overwrite)
    })?;

    output::print_batch_summary(&result);
    output::print_done(&format!(
        "Built {} report(s) under '{}'",
        result.success,
        args.root.display()
    ));

    Ok(())
}

/// 由输出文件扩展名决定格式
fn format_for(output_name: &str) -> OutputFormat {
    match Path::new(output_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Markdown,
    }
}

/// 处理一个记录目录
fn process_group(
    group: &RecordGroup,
    config: &ReportConfig,
    output_name: &str,
    format: OutputFormat,
    overwrite: bool,
) -> ProcessResult {
    let name = group.directory.display().to_string();
    let output_path = group.directory.join(output_name);

    if output_path.exists() && !overwrite {
        return ProcessResult::Skipped(name);
    }

    match build_group(group, config, &output_path, format) {
        Ok(()) => ProcessResult::Success(name),
        Err(e) => ProcessResult::Failed(name, e.to_string()),
    }
}

fn build_group(
    group: &RecordGroup,
    config: &ReportConfig,
    output_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    // 批量进度条已在绘制，组内读取不再单独显示
    let records = read_files(&group.files, false)?;
    let options = BuildOptions {
        temp_dir: group.directory.join("temp"),
        directory_name: directory_name(&group.directory),
    };

    let built = build_report(&records, config, &options)?;
    let text = render::render(&built.document, format)?;

    fs::write(output_path, text).map_err(|e| ReportError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}
