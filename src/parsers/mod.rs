//! # 解析器模块
//!
//! 读取上游解析器产出的计算记录。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: record

pub mod record;

pub use record::{collect_record_files, parse_record_file, DEFAULT_PATTERN};
