//! # 计算记录读取
//!
//! 读取外部解析器输出的 JSON 计算记录。输入既可以是单个文件，也可以是
//! 目录（取其中匹配模式的文件，按文件名排序），顺序即报告中的文档顺序，
//! 最后一条为参考记录。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/record.rs`
//! - 使用 `glob` 匹配文件名

use crate::error::{ReportError, Result};
use crate::models::CalculationRecord;

use std::fs;
use std::path::{Path, PathBuf};

/// 默认的记录文件模式
pub const DEFAULT_PATTERN: &str = "*.json";

/// 解析单个 JSON 记录文件
pub fn parse_record_file(path: &Path) -> Result<CalculationRecord> {
    let content = fs::read_to_string(path).map_err(|e| ReportError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_record_str(&content, path)
}

/// 解析 JSON 文本，`path` 仅用于错误信息
pub fn parse_record_str(content: &str, path: &Path) -> Result<CalculationRecord> {
    serde_json::from_str(content).map_err(|e| ReportError::ParseError {
        format: "JSON".to_string(),
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// 目录中匹配模式的文件（不递归），按文件名排序
pub fn list_directory(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let glob_pattern = glob::Pattern::new(pattern).map_err(|e| {
        ReportError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    let entries = fs::read_dir(dir).map_err(|e| ReportError::FileReadError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| glob_pattern.matches(n))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// 展开输入路径列表：文件保持原顺序，目录展开为排序后的匹配文件
pub fn collect_record_files(inputs: &[PathBuf], pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            files.extend(list_directory(input, pattern)?);
        } else {
            return Err(ReportError::FileNotFound {
                path: input.display().to_string(),
            });
        }
    }

    if files.is_empty() {
        return Err(ReportError::NoFilesFound {
            pattern: pattern.to_string(),
        });
    }
    Ok(files)
}
