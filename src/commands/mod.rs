//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `report/`, `render/`, `utils/`
//! - 子模块: build, batch, spectra

pub mod batch;
pub mod build;
pub mod spectra;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::CalculationRecord;
use crate::parsers;
use crate::utils::progress;

use std::path::{Path, PathBuf};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Build(args) => build::execute(args),
        Commands::Batch(args) => batch::execute(args),
        Commands::Spectra(args) => spectra::execute(args),
    }
}

/// 展开输入并按顺序读取记录
pub(crate) fn read_inputs(inputs: &[PathBuf], pattern: &str) -> Result<Vec<CalculationRecord>> {
    let files = parsers::collect_record_files(inputs, pattern)?;
    read_files(&files, true)
}

/// 按顺序读取记录文件，`show_progress` 为假时不显示进度条
pub(crate) fn read_files(files: &[PathBuf], show_progress: bool) -> Result<Vec<CalculationRecord>> {
    let pb = progress::create_load_bar(files.len() as u64, show_progress);
    let mut records = Vec::with_capacity(files.len());
    for file in files {
        records.push(parsers::parse_record_file(file)?);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(records)
}

/// 报告中显示的目录名：目录本身的名字，文件则取所在目录
pub(crate) fn directory_name(path: &Path) -> String {
    let dir = if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    };

    let dir = dir.canonicalize().unwrap_or(dir);
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}
