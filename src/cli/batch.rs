//! # batch 子命令 CLI 定义
//!
//! 为根目录下每个包含记录文件的目录生成一份报告，
//! 图片目录为各自目录下的 `temp/`。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use crate::config::ReportMode;
use crate::parsers::DEFAULT_PATTERN;

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Root directory containing one sub-directory per molecule
    pub root: PathBuf,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, env = "QCREPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report mode, overrides the configuration file
    #[arg(short, long, value_enum)]
    pub mode: Option<ReportMode>,

    /// Glob pattern(s) for record files, comma separated
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Recurse into nested directories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing reports
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Report file name written into each directory
    #[arg(long, default_value = "report.md")]
    pub output_name: String,
}
