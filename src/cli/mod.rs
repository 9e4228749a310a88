//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `build`: 由一组计算记录生成一份报告
//! - `batch`: 为根目录下每个记录目录生成报告
//! - `spectra`: 生成报告引用的 UV/IR 光谱图
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: build, batch, spectra

pub mod batch;
pub mod build;
pub mod spectra;

use clap::{Parser, Subcommand};

/// qcreport - 量子化学计算报告生成工具
#[derive(Parser)]
#[command(name = "qcreport")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Assemble reports from parsed quantum-chemistry calculation results", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Build one report from a sequence of calculation records
    Build(build::BuildArgs),

    /// Build a report for every record directory under a root
    Batch(batch::BatchArgs),

    /// Render UV-Vis and IR spectra into the image directory
    Spectra(spectra::SpectraArgs),
}
