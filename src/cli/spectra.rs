//! # spectra 子命令 CLI 定义
//!
//! 由激发态和振动数据生成 UV-可见吸收谱和 IR 谱图片。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/spectra.rs`

use crate::parsers::DEFAULT_PATTERN;

use clap::Args;
use std::path::PathBuf;

/// spectra 子命令参数
#[derive(Args, Debug)]
pub struct SpectraArgs {
    /// Record files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Image directory the spectra are written into
    #[arg(short, long, default_value = "temp")]
    pub temp_dir: PathBuf,

    /// Gaussian FWHM for the UV-Vis spectrum (nm)
    #[arg(long, default_value_t = 20.0)]
    pub fwhm_nm: f64,

    /// Lorentzian FWHM for the IR spectrum (cm-1)
    #[arg(long, default_value_t = 10.0)]
    pub fwhm_cm: f64,

    /// Overwrite existing images
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Glob pattern for record files inside directory inputs
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
