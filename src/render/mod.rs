//! # 文档渲染
//!
//! 内容树只依赖渲染器的四个基本操作：段落标题、表格、图片、页脚。
//! 不同输出格式各自实现 `Renderer`，由 `render_document` 按顺序驱动。
//!
//! ## 支持格式
//! - Markdown（默认，`markdown.rs`）
//! - 终端表格（`terminal.rs`）
//! - JSON 内容树（`to_json`）
//! - 每张表一个 CSV 文件（`csv.rs`）
//!
//! ## 依赖关系
//! - 被 `commands/build.rs`, `commands/batch.rs` 调用
//! - 使用 `models/content.rs`

pub mod csv;
pub mod markdown;
pub mod terminal;

use crate::error::Result;
use crate::models::{ContentBlock, Document, FigureBlock, Footer, TableBlock};

use clap::ValueEnum;
use tabled::builder::Builder;
use tabled::Table;

pub use markdown::MarkdownRenderer;
pub use terminal::TerminalRenderer;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Markdown 文档
    #[default]
    Markdown,
    /// JSON 内容树
    Json,
    /// 直接打印到终端
    Terminal,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Terminal => write!(f, "terminal"),
        }
    }
}

/// 渲染器基本操作
pub trait Renderer {
    fn section_title(&mut self, text: &str);
    fn table(&mut self, table: &TableBlock);
    fn figure(&mut self, figure: &FigureBlock);
    fn footer(&mut self, footer: &Footer);
}

/// 按内容树顺序调用渲染器
pub fn render_document<R: Renderer + ?Sized>(document: &Document, renderer: &mut R) {
    for block in &document.blocks {
        match block {
            ContentBlock::SectionTitle { text } => renderer.section_title(text),
            ContentBlock::Table(table) => renderer.table(table),
            ContentBlock::Figure(figure) => renderer.figure(figure),
        }
    }
    renderer.footer(&document.footer);
}

/// 内容树 JSON
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// 按输出格式渲染整份文档
pub fn render(document: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(document),
        OutputFormat::Markdown => {
            let mut renderer = MarkdownRenderer::new();
            render_document(document, &mut renderer);
            Ok(renderer.finish())
        }
        OutputFormat::Terminal => {
            let mut renderer = TerminalRenderer::new();
            render_document(document, &mut renderer);
            Ok(renderer.finish())
        }
    }
}

/// 由表格块构造 `tabled` 表格；没有表头时用空表头占位
pub(crate) fn build_table(block: &TableBlock) -> Table {
    let mut builder = Builder::default();
    match &block.header {
        Some(header) => builder.push_record(header.clone()),
        None => builder.push_record(vec![String::new(); block.column_count()]),
    }
    for row in &block.rows {
        builder.push_record(row.clone());
    }
    builder.build()
}
