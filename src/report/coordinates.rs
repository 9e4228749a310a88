//! # 原子坐标段落
//!
//! 参考记录的最终收敛笛卡尔坐标 (Å)，每个原子一行，元素符号由原子序数
//! 查元素周期表得到。
//!
//! ## 依赖关系
//! - 被 `report/assembler.rs` 调用
//! - 使用 `models/elements.rs`

use crate::error::Result;
use crate::models::elements::element_symbol;
use crate::models::record::require;
use crate::models::{ContentBlock, TableBlock};
use crate::report::context::{BuildContext, DiagnosticKind};
use crate::report::format;
use crate::report::prepare::ReportData;

pub const TITLE: &str = "5. ATOMIC COORDINATES";

/// 坐标表
pub fn coordinates_table(data: &ReportData, ctx: &mut BuildContext) -> Result<TableBlock> {
    let reference = data.reference();
    let record = reference.record;
    let atoms = require(
        record.molecule.atomic_numbers.as_deref(),
        "molecule.atoms_Z",
        reference.index,
    )?;
    let coords = require(
        record
            .results
            .geometry
            .as_ref()
            .and_then(|g| g.converged_coords.as_deref()),
        "results.geometry.elements_3D_coords_converged",
        reference.index,
    )?;

    if coords.len() != atoms.len() * 3 {
        ctx.warn(
            DiagnosticKind::IncompleteData,
            format!(
                "record #{} has {} atoms but {} coordinate values",
                reference.index,
                atoms.len(),
                coords.len()
            ),
        );
    }

    let mut table = TableBlock::new(vec![60, 100, 100, 100])
        .with_header(vec!["Atom", "X (Å)", "Y (Å)", "Z (Å)"])
        .with_caption("Table: Cartesian atomic coordinates of the converged geometry");

    for (&z, xyz) in atoms.iter().zip(coords.chunks_exact(3)) {
        table.push(vec![
            element_symbol(z).unwrap_or("X").to_string(),
            format::fixed(xyz[0], 4),
            format::fixed(xyz[1], 4),
            format::fixed(xyz[2], 4),
        ]);
    }

    Ok(table)
}

/// 坐标段落
pub fn build(data: &ReportData, ctx: &mut BuildContext) -> Result<Vec<ContentBlock>> {
    Ok(vec![
        ContentBlock::SectionTitle {
            text: TITLE.to_string(),
        },
        ContentBlock::Table(coordinates_table(data, ctx)?),
    ])
}
