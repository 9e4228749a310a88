//! # 进度条工具
//!
//! 封装 `indicatif`，记录读取和批量构建共用同一种样式。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// 创建标准进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// 记录读取进度条；记录很少或 `visible` 为假（如批量任务内部）时隐藏
pub fn create_load_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible || len < 10 {
        return ProgressBar::hidden();
    }
    create_progress_bar(len, "Reading records")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length() {
        let pb = create_progress_bar(5, "Building");
        assert_eq!(pb.length(), Some(5));
        assert_eq!(pb.message(), "Building");
    }

    #[test]
    fn test_small_loads_are_hidden() {
        assert!(create_load_bar(3, true).is_hidden());
    }

    #[test]
    fn test_nested_loads_are_hidden() {
        assert!(create_load_bar(50, false).is_hidden());
    }
}
