//! # 图表模块
//!
//! 生成报告图片目录中约定文件名的光谱图。
//!
//! ## 依赖关系
//! - 被 `commands/spectra.rs` 调用
//! - 使用 `plotters` crate

pub mod spectrum;

pub use spectrum::{Broadening, SpectrumStyle, Stick};
