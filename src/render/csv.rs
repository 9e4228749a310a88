//! # 表格 CSV 导出
//!
//! 文档中的每张表写成一个 `table-NN.csv`（按出现顺序编号，从 01 开始），
//! 有表头时先写表头。
//!
//! ## 依赖关系
//! - 被 `commands/build.rs` 调用
//! - 使用 `csv` crate

use crate::error::{ReportError, Result};
use crate::models::{Document, TableBlock};

use std::fs;
use std::path::{Path, PathBuf};

/// 表格文件名
pub fn table_file_name(number: usize) -> String {
    format!("table-{:02}.csv", number)
}

/// 写出单张表
pub fn write_table(table: &TableBlock, output_path: &Path) -> Result<()> {
    let mut wtr = ::csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output_path)?;

    if let Some(header) = &table.header {
        wtr.write_record(header)?;
    }
    for row in &table.rows {
        wtr.write_record(row)?;
    }

    wtr.flush().map_err(|e| ReportError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出文档中所有表格，返回写出的文件路径
pub fn export_tables(document: &Document, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| ReportError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();
    for (i, table) in document.tables().enumerate() {
        let path = output_dir.join(table_file_name(i + 1));
        write_table(table, &path)?;
        written.push(path);
    }
    Ok(written)
}
