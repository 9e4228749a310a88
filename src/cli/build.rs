//! # build 子命令 CLI 定义
//!
//! 由一组计算记录（文件或目录）生成一份报告。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/build.rs`

use crate::config::ReportMode;
use crate::parsers::DEFAULT_PATTERN;
use crate::render::OutputFormat;

use clap::Args;
use std::path::PathBuf;

/// build 子命令参数
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Record files or directories, in document order (the last record is the reference)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, env = "QCREPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report mode, overrides the configuration file
    #[arg(short, long, value_enum)]
    pub mode: Option<ReportMode>,

    /// Directory holding pre-rendered figures
    #[arg(short, long, default_value = "temp")]
    pub temp_dir: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Also export every table as CSV into this directory
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Directory name shown in the report (defaults to the first input's directory)
    #[arg(long)]
    pub name: Option<String>,

    /// Glob pattern for record files inside directory inputs
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,
}
