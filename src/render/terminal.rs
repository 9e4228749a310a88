//! # 终端渲染
//!
//! 圆角表格 + 彩色标题，用于在终端直接预览报告。
//!
//! ## 依赖关系
//! - 实现 `render::Renderer`
//! - 使用 `tabled`, `colored` crate

use super::{build_table, Renderer};
use crate::models::{FigureBlock, Footer, TableBlock};

use colored::Colorize;
use tabled::settings::Style;

#[derive(Debug, Default)]
pub struct TerminalRenderer {
    buffer: String,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

impl Renderer for TerminalRenderer {
    fn section_title(&mut self, text: &str) {
        let line = "─".repeat(60);
        self.buffer.push_str(&format!(
            "\n{}\n  {}\n{}\n",
            line.dimmed(),
            text.bold(),
            line.dimmed()
        ));
    }

    fn table(&mut self, table: &TableBlock) {
        let mut rendered = build_table(table);
        rendered.with(Style::rounded());
        if let Some(caption) = &table.caption {
            self.buffer.push_str(&format!("{}\n", caption.italic()));
        }
        self.buffer.push_str(&format!("{}\n", rendered));
    }

    fn figure(&mut self, figure: &FigureBlock) {
        self.buffer.push_str(&format!("{} {}\n", "[FIG]".cyan().bold(), figure.caption));
        for image in &figure.images {
            self.buffer.push_str(&format!("      {}\n", image.display().to_string().dimmed()));
        }
    }

    fn footer(&mut self, footer: &Footer) {
        self.buffer.push_str(&format!(
            "\n{}\n",
            format!("Generated {}", footer.timestamp).dimmed()
        ));
    }
}
