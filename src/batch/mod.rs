//! # 批量处理模块
//!
//! 为多个分子目录并行生成报告。
//!
//! ## 功能
//! - 按目录分组收集记录文件
//! - 并行处理，每个任务独立构建上下文
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::{FileCollector, RecordGroup};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
