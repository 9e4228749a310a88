//! # 计算细节段落
//!
//! 参考记录的通用计算参数（程序、方法、泛函、基组、SCF 收敛标准……），
//! 随后按文档顺序逐条记录追加任务相关参数：
//! - `OPT`: 几何优化收敛值与阈值，整个文档只输出一次，数据取自最后一条
//!   几何优化记录的最后一步
//! - `OPT_ES`: 被优化的激发态
//! - `FREQ`: 每条记录一块（温度、非谐效应）
//! - `TD`: 激发态数目与对称性
//!
//! ## 依赖关系
//! - 被 `report/assembler.rs` 调用
//! - 使用 `report/dedup.rs`, `report/format.rs`

use crate::error::Result;
use crate::models::record::require;
use crate::models::{CalculationRecord, ContentBlock, TableBlock};
use crate::report::context::{BuildContext, DiagnosticKind};
use crate::report::dedup::OPT_PARAMS;
use crate::report::format::{self, NOT_AVAILABLE};
use crate::report::jobtype::JobType;
use crate::report::prepare::{PreparedRecord, ReportData};

use std::collections::BTreeSet;

pub const TITLE: &str = "2. COMPUTATIONAL DETAILS";

pub const GAUSSIAN: &str = "Gaussian";
pub const GAMESS: &str = "GAMESS";

/// 几何收敛判据（GAMESS 只用前两项）
const OPT_CRITERIA: [&str; 4] = [
    "Max Force value and threshold",
    "RMS Force value and threshold",
    "Max Displacement value and threshold",
    "RMS Displacement value and threshold",
];

/// 三列表格的空行
fn blank() -> Vec<String> {
    vec![String::new(); 3]
}

/// 通用计算参数
fn general_rows(table: &mut TableBlock, data: &ReportData) -> Result<()> {
    let reference = data.reference();
    let general = &reference.record.comp_details.general;

    if let Some(package) = &general.package {
        let version = general
            .package_version
            .as_ref()
            .map(|v| format!("({})", v))
            .unwrap_or_default();
        table.push(vec!["Software".to_string(), package.clone(), version]);
    }

    let theory = require(
        general.last_theory.as_deref(),
        "comp_details.general.last_theory",
        reference.index,
    )?;
    table.push(vec!["Computational method", theory]);

    if let Some(functional) = &general.functional {
        table.push(vec!["Functional", functional.as_str()]);
    }
    if let Some(basis) = &general.basis_set_name {
        table.push(vec!["Basis set name", basis.as_str()]);
    }
    if let Some(size) = general.basis_set_size {
        table.push(vec!["Number of basis set functions".to_string(), size.to_string()]);
    }
    if let Some(closed_shell) = general.is_closed_shell {
        table.push(vec!["Closed shell calculation".to_string(), format::flag(closed_shell)]);
    }
    if let Some(grid) = &general.integration_grid {
        table.push(vec!["Integration grid", grid.as_str()]);
    }
    if let Some(solvent) = &general.solvent {
        table.push(vec!["Solvent", solvent.as_str()]);
    }

    scf_rows(table, reference.record);
    Ok(())
}

/// SCF 收敛标准，取最后一组；只有 Gaussian 和 GAMESS 有约定的含义
fn scf_rows(table: &mut TableBlock, record: &CalculationRecord) {
    let targets = match record
        .comp_details
        .general
        .scf_targets
        .as_ref()
        .and_then(|t| t.last())
    {
        Some(t) => t,
        None => return,
    };
    let target = |i: usize| {
        targets
            .get(i)
            .map(|v| format::compact(*v))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    match record.package() {
        Some(GAUSSIAN) => {
            table.push(vec![
                "Requested SCF convergence on RMS and Max density matrix".to_string(),
                target(0),
                target(1),
            ]);
            table.push(vec!["Requested SCF convergence on energy".to_string(), target(2)]);
        }
        Some(GAMESS) => {
            table.push(vec!["Requested SCF convergence on density".to_string(), target(0)]);
        }
        _ => {}
    }
}

/// 几何优化收敛参数行
pub fn optimization_rows(record: &CalculationRecord) -> Option<Vec<Vec<String>>> {
    let values = record.final_geometric_values()?;
    let targets = record.geometric_targets()?;
    let pairs: Vec<(f64, f64)> = values.iter().copied().zip(targets.iter().copied()).collect();

    let rows = match record.package() {
        Some(GAUSSIAN) => OPT_CRITERIA
            .iter()
            .zip(&pairs)
            .map(|(label, (value, target))| {
                vec![label.to_string(), format::fixed(*value, 6), format::fixed(*target, 6)]
            })
            .collect(),
        // 单位 hartree/bohr
        Some(GAMESS) => OPT_CRITERIA[..2]
            .iter()
            .zip(&pairs)
            .map(|(label, (value, target))| {
                vec![label.to_string(), format::compact(*value), format::compact(*target)]
            })
            .collect(),
        _ => pairs
            .iter()
            .enumerate()
            .map(|(i, (value, target))| {
                vec![
                    format!("Convergence criterion {} value and threshold", i + 1),
                    format::compact(*value),
                    format::compact(*target),
                ]
            })
            .collect(),
    };
    Some(rows)
}

fn optimization_block(table: &mut TableBlock, data: &ReportData, ctx: &mut BuildContext) {
    // 第一条 OPT 记录处输出，数据取最后一条 OPT 记录
    let source = match data.last_with(JobType::Opt) {
        Some(r) => r,
        None => return,
    };

    table.push(blank());
    table.push(vec!["Job type: Geometry optimization"]);
    match optimization_rows(source.record) {
        Some(rows) => table.extend(rows),
        None => ctx.warn(
            DiagnosticKind::IncompleteData,
            format!(
                "record #{} has no final geometry convergence values, optimization parameters left out",
                source.index
            ),
        ),
    }
    ctx.dedup.mark_emitted(OPT_PARAMS);
}

fn excited_optimization_block(table: &mut TableBlock, prepared: &PreparedRecord) {
    let state = prepared
        .record
        .comp_details
        .excited_states
        .as_ref()
        .and_then(|e| e.et_opt);
    if let Some(state) = state {
        table.push(vec!["Job type: Excited state geometry optimization"]);
        table.push(vec!["Optimized excited state".to_string(), format!("S{}", state)]);
    }
}

fn frequency_block(table: &mut TableBlock, prepared: &PreparedRecord) {
    table.push(vec!["Job type: Frequency and thermochemical analysis"]);
    for temperature in &prepared.temperatures {
        table.push(vec!["Temperature".to_string(), format::kelvin(*temperature)]);
    }

    let anharmonicity = prepared
        .record
        .comp_details
        .freq
        .as_ref()
        .and_then(|f| f.anharmonicity);
    if let (false, Some(anharmonic)) = (prepared.temperatures.is_empty(), anharmonicity) {
        table.push(vec!["Anharmonic effects".to_string(), format::flag(anharmonic)]);
    }
}

/// 激发态对称性（去重、排序）
pub fn distinct_symmetries(record: &CalculationRecord) -> Vec<String> {
    let labels: BTreeSet<&String> = record
        .results
        .excited_states
        .as_ref()
        .and_then(|e| e.et_sym.as_ref())
        .map(|s| s.iter().collect())
        .unwrap_or_default();
    labels.into_iter().cloned().collect()
}

fn time_dependent_block(table: &mut TableBlock, prepared: &PreparedRecord) {
    table.push(vec!["Job type: Time-dependent calculation"]);
    let states = prepared
        .record
        .comp_details
        .excited_states
        .as_ref()
        .and_then(|e| e.nb_et_states);
    if let Some(states) = states {
        table.push(vec![
            "Number of calculated excited states and spin state".to_string(),
            states.to_string(),
            distinct_symmetries(prepared.record).join(", "),
        ]);
    }
}

/// 计算细节表
pub fn details_table(data: &ReportData, ctx: &mut BuildContext) -> Result<TableBlock> {
    let mut table = TableBlock::new(vec![200, 200, 80]);
    general_rows(&mut table, data)?;

    for prepared in &data.records {
        if prepared.has(JobType::Opt) && !ctx.dedup.has_been_emitted(OPT_PARAMS) {
            optimization_block(&mut table, data, ctx);
        }
        if prepared.has(JobType::OptEs) {
            table.push(blank());
            excited_optimization_block(&mut table, prepared);
        }
        if prepared.has(JobType::Freq) {
            table.push(blank());
            frequency_block(&mut table, prepared);
        }
        if prepared.has(JobType::Td) {
            table.push(blank());
            time_dependent_block(&mut table, prepared);
        }
    }
    table.push(blank());

    Ok(table)
}

/// 计算细节段落
pub fn build(data: &ReportData, ctx: &mut BuildContext) -> Result<Vec<ContentBlock>> {
    Ok(vec![
        ContentBlock::SectionTitle {
            text: TITLE.to_string(),
        },
        ContentBlock::Table(details_table(data, ctx)?),
    ])
}
