//! # 数据模型模块
//!
//! 定义计算记录、报告内容树和元素周期表。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `report/`, `render/` 使用
//! - 子模块: record, content, elements

pub mod content;
pub mod elements;
pub mod record;

pub use content::{ContentBlock, Document, FigureBlock, Footer, Row, TableBlock};
pub use record::{CalculationRecord, TransitionComponent};
