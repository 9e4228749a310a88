//! # build 命令实现
//!
//! 读取记录，构建内容树，按所选格式写出，并可导出表格 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/build.rs` 定义的参数
//! - 使用 `config.rs`, `report/`, `render/`
//! - 使用 `utils/output.rs`

use super::{directory_name, read_inputs};
use crate::cli::build::BuildArgs;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::render::{self, csv as table_csv, OutputFormat};
use crate::report::{build_report, BuildOptions};
use crate::utils::output;

use std::fs;

/// 执行 build 命令
pub fn execute(args: BuildArgs) -> Result<()> {
    let config = ReportConfig::resolve(args.config.as_deref(), args.mode)?;
    let records = read_inputs(&args.inputs, &args.pattern)?;

    // 只有写文件时才打印过程信息，stdout 留给报告本身
    let verbose = args.output.is_some();
    if verbose {
        output::print_header(&format!("Building {} report", config.mode));
        output::print_info(&format!("Loaded {} record(s)", records.len()));
    }

    let directory = match (&args.name, args.inputs.first()) {
        (Some(name), _) => name.clone(),
        (None, Some(first)) => directory_name(first),
        (None, None) => String::new(),
    };
    let options = BuildOptions {
        temp_dir: args.temp_dir.clone(),
        directory_name: directory,
    };

    let built = build_report(&records, &config, &options)?;

    if verbose || args.format == OutputFormat::Terminal {
        output::print_diagnostics(&built.diagnostics);
    }

    let text = render::render(&built.document, args.format)?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| ReportError::FileWriteError {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
            fs::write(path, &text).map_err(|e| ReportError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_written(&format!("{} report", args.format), path);
        }
        None => print!("{}", text),
    }

    if let Some(csv_dir) = &args.csv_dir {
        let written = table_csv::export_tables(&built.document, csv_dir)?;
        if verbose {
            output::print_done(&format!(
                "Exported {} table(s) to '{}'",
                written.len(),
                csv_dir.display()
            ));
        }
    }

    Ok(())
}
