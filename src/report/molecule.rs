//! # 分子段落
//!
//! 结构图（两个视角）和分子基本信息表。`full` 模式额外列出单同位素
//! 质量、InChI 和较短的 SMILES。
//!
//! ## 依赖关系
//! - 被 `report/assembler.rs` 调用
//! - 使用 `report/figures.rs`, `report/format.rs`

use crate::error::Result;
use crate::models::record::require;
use crate::models::{ContentBlock, TableBlock};
use crate::report::context::BuildContext;
use crate::report::figures;
use crate::report::format;
use crate::report::prepare::ReportData;

pub const TITLE: &str = "1. MOLECULE";

/// SMILES 超过该长度时不列出
const SMILES_MAX_LEN: usize = 80;

/// 分子信息表
pub fn molecule_table(data: &ReportData, ctx: &BuildContext) -> Result<TableBlock> {
    let reference = data.reference();
    let molecule = &reference.record.molecule;
    let index = reference.index;

    let formula = require(molecule.formula.as_deref(), "molecule.formula", index)?;
    let charge = require(molecule.charge, "molecule.charge", index)?;
    let multiplicity = require(molecule.multiplicity, "molecule.multiplicity", index)?;

    let mut table = TableBlock::new(vec![160, 320]);
    table.push(vec!["Directory name".to_string(), ctx.directory_name.clone()]);
    table.push(vec!["Formula".to_string(), formula.to_string()]);
    table.push(vec!["Charge".to_string(), charge.to_string()]);
    table.push(vec!["Spin multiplicity".to_string(), multiplicity.to_string()]);

    if ctx.mode.is_full() {
        if let Some(mass) = molecule.monoisotopic_mass {
            table.push(vec!["Monoisotopic mass".to_string(), format!("{:.5} Da", mass)]);
        }
        if let Some(inchi) = &molecule.inchi {
            table.push(vec!["InChI", format::inchi_payload(inchi)]);
        }
        if let Some(smiles) = molecule.smiles.as_deref().filter(|s| s.len() < SMILES_MAX_LEN) {
            table.push(vec!["SMILES", smiles]);
        }
    }

    Ok(table)
}

/// 分子段落
pub fn build(data: &ReportData, ctx: &mut BuildContext) -> Result<Vec<ContentBlock>> {
    let mut blocks = vec![ContentBlock::SectionTitle {
        text: TITLE.to_string(),
    }];

    if let Some(figure) = figures::resolve(&figures::topology_slot(), ctx) {
        blocks.push(ContentBlock::Figure(figure));
    }
    blocks.push(ContentBlock::Table(molecule_table(data, ctx)?));

    Ok(blocks)
}
