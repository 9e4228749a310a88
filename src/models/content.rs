//! # 报告内容树
//!
//! 段落构建器产出的内容块，只由文档组装器和渲染器消费，创建后不再修改。
//!
//! ## 依赖关系
//! - 被 `report/` 构建器创建
//! - 被 `render/` 渲染器消费

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 表格行
pub type Row = Vec<String>;

/// 内容块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    SectionTitle { text: String },
    Table(TableBlock),
    Figure(FigureBlock),
}

/// 表格
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableBlock {
    pub caption: Option<String>,
    pub header: Option<Row>,
    pub rows: Vec<Row>,
    /// 列宽 (pt)
    pub column_widths: Vec<u32>,
}

impl TableBlock {
    pub fn new(column_widths: Vec<u32>) -> Self {
        TableBlock {
            column_widths,
            ..Default::default()
        }
    }

    pub fn with_header<S: Into<String>>(mut self, header: Vec<S>) -> Self {
        self.header = Some(header.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// 追加一行，列数不足时补空单元格
    pub fn push<S: Into<String>>(&mut self, cells: Vec<S>) {
        let mut row: Row = cells.into_iter().map(Into::into).collect();
        while row.len() < self.column_count() {
            row.push(String::new());
        }
        self.rows.push(row);
    }

    pub fn extend(&mut self, rows: Vec<Row>) {
        for row in rows {
            self.push(row);
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// 按首列标签查找行
    #[cfg(test)]
    pub fn find_row(&self, label: &str) -> Option<&Row> {
        self.rows
            .iter()
            .find(|r| r.first().map(|c| c == label).unwrap_or(false))
    }
}

/// 图片（一张或两张并排）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureBlock {
    pub images: Vec<PathBuf>,
    pub caption: String,
}

impl FigureBlock {
    #[cfg(test)]
    pub fn is_two_column(&self) -> bool {
        self.images.len() == 2
    }
}

/// 页脚
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub timestamp: String,
    pub page_marker: String,
}

/// 组装完成的文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<ContentBlock>,
    pub footer: Footer,
}

impl Document {
    /// 所有表格
    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.blocks.iter().filter_map(|b| match b {
            ContentBlock::Table(t) => Some(t),
            _ => None,
        })
    }

    /// 所有图片
    #[cfg(test)]
    pub fn figures(&self) -> impl Iterator<Item = &FigureBlock> {
        self.blocks.iter().filter_map(|b| match b {
            ContentBlock::Figure(f) => Some(f),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pads_short_rows() {
        let mut table = TableBlock::new(vec![200, 200, 80]);
        table.push(vec!["Total molecular energy", "-76.02 hartrees"]);
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], "");
    }

    #[test]
    fn test_find_row_by_label() {
        let mut table = TableBlock::new(vec![160, 320]);
        table.push(vec!["Formula", "H2O"]);
        table.push(vec!["Charge", "0"]);
        assert_eq!(table.find_row("Charge").unwrap()[1], "0");
        assert!(table.find_row("SMILES").is_none());
    }

    #[test]
    fn test_content_block_json_tag() {
        let block = ContentBlock::SectionTitle {
            text: "1. MOLECULE".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"kind\":\"section_title\""));
    }
}
