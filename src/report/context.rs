//! # 构建上下文
//!
//! 一次报告构建期间的可变状态：去重守卫、诊断信息和图表编号。
//! 由 `report/assembler.rs` 创建并依次传给各段落构建器，构建结束即丢弃。
//!
//! ## 依赖关系
//! - 被 `report/` 各构建器使用
//! - 使用 `report/dedup.rs`, `config.rs`

use crate::config::ReportMode;
use crate::report::dedup::DedupState;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// 诊断类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// 图片文件不存在
    MissingFigureAsset,
    /// 记录没有可识别的任务类型
    UnmatchedJobType,
    /// 可选数据缺失或不完整
    IncompleteData,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingFigureAsset => write!(f, "missing figure"),
            DiagnosticKind::UnmatchedJobType => write!(f, "job type"),
            DiagnosticKind::IncompleteData => write!(f, "incomplete data"),
        }
    }
}

/// 单条非致命诊断
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// 构建诊断汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            kind,
            message: message.into(),
        });
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// 没有可识别任务类型的记录数
    pub fn unmatched_records(&self) -> usize {
        self.count(DiagnosticKind::UnmatchedJobType)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

/// 单次构建的上下文
#[derive(Debug)]
pub struct BuildContext {
    pub mode: ReportMode,
    pub temp_dir: PathBuf,
    pub directory_name: String,
    pub dedup: DedupState,
    pub diagnostics: Diagnostics,
    figure_count: usize,
}

impl BuildContext {
    pub fn new(mode: ReportMode, temp_dir: impl Into<PathBuf>, directory_name: impl Into<String>) -> Self {
        BuildContext {
            mode,
            temp_dir: temp_dir.into(),
            directory_name: directory_name.into(),
            dedup: DedupState::new(),
            diagnostics: Diagnostics::default(),
            figure_count: 0,
        }
    }

    /// 下一个图号（从 1 开始）
    pub fn next_figure_number(&mut self) -> usize {
        self.figure_count += 1;
        self.figure_count
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics.push(kind, message);
    }
}
