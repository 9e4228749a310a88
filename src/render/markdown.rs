//! # Markdown 渲染
//!
//! 第一个标题作为文档标题 (`#`)，其余为二级标题；表格使用 `tabled`
//! 的 markdown 样式，图片按相对路径引用。
//!
//! ## 依赖关系
//! - 实现 `render::Renderer`
//! - 使用 `tabled` crate

use super::{build_table, Renderer};
use crate::models::{FigureBlock, Footer, TableBlock};

use tabled::settings::Style;

/// Markdown 渲染器，输出累积在内部缓冲区
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    buffer: String,
    titles: usize,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出渲染结果
    pub fn finish(self) -> String {
        self.buffer
    }
}

impl Renderer for MarkdownRenderer {
    fn section_title(&mut self, text: &str) {
        let marker = if self.titles == 0 { "#" } else { "##" };
        self.titles += 1;
        self.buffer.push_str(&format!("{} {}\n\n", marker, text));
    }

    fn table(&mut self, table: &TableBlock) {
        let mut rendered = build_table(table);
        rendered.with(Style::markdown());
        self.buffer.push_str(&rendered.to_string());
        self.buffer.push_str("\n\n");
        if let Some(caption) = &table.caption {
            self.buffer.push_str(&format!("*{}*\n\n", caption));
        }
    }

    fn figure(&mut self, figure: &FigureBlock) {
        let images: Vec<String> = figure
            .images
            .iter()
            .map(|p| format!("![]({})", p.display()))
            .collect();
        self.buffer.push_str(&images.join(" "));
        self.buffer.push_str(&format!("\n\n*{}*\n\n", figure.caption));
    }

    fn footer(&mut self, footer: &Footer) {
        self.buffer.push_str(&format!(
            "---\n\nGenerated {} | {}\n",
            footer.timestamp, footer.page_marker
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_document;
    use crate::render::tests::sample_document;

    #[test]
    fn test_markdown_layout() {
        let mut renderer = MarkdownRenderer::new();
        render_document(&sample_document(), &mut renderer);
        let text = renderer.finish();

        assert!(text.starts_with("# 1. MOLECULE\n"));
        assert!(text.contains("![](temp/img-TOPOLOGY.png)"));
        assert!(text.contains("*Figure 1: Structure.*"));
        assert!(text.contains("| Formula | H2O |"));
        assert!(text.trim_end().ends_with("Page {PAGE} of {NUMPAGES}"));
    }

    #[test]
    fn test_later_titles_are_second_level() {
        let mut renderer = MarkdownRenderer::new();
        renderer.section_title("MOLECULAR CALCULATION REPORT");
        renderer.section_title("1. MOLECULE");
        let text = renderer.finish();
        assert!(text.contains("\n## 1. MOLECULE\n"));
    }
}
