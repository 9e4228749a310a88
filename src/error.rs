//! # 统一错误处理模块
//!
//! 定义 qcreport 的所有错误类型，使用 `thiserror` 派生。
//!
//! 可选字段缺失不是错误（对应行直接省略）；只有每份报告都必需的字段
//! 缺失时才返回 `MissingField`，并注明字段路径和记录序号。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// qcreport 统一错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 报告数据错误
    // ─────────────────────────────────────────────────────────────
    #[error("Missing mandatory field '{field}' in record #{record}")]
    MissingField { field: String, record: usize },

    #[error("No calculation records to report")]
    NoRecords,

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

impl ReportError {
    /// 构造必需字段缺失错误
    pub fn missing(field: impl Into<String>, record: usize) -> Self {
        ReportError::MissingField {
            field: field.into(),
            record,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ReportError>;
