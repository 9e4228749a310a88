//! # 激发态表格
//!
//! 每条带 `TD` 标签且含激发能的记录生成一张表：激发能 (cm⁻¹)、
//! 波长 (nm)、对称性、振子强度、旋转强度和主要跃迁组分。
//!
//! 激发态超过 20 个时只列出前 5 个，以及振子强度 > 0.1、
//! 旋转强度绝对值 > 10 或旋转强度缺失的态。跃迁组分只保留
//! CI 系数平方（百分比）超过 5% 的单电子激发。
//!
//! ## 依赖关系
//! - 被 `report/results.rs`, `report/figures.rs` 调用
//! - 使用 `report/format.rs`

use crate::models::{CalculationRecord, ContentBlock, TableBlock, TransitionComponent};
use crate::report::format::{self, NOT_AVAILABLE};
use crate::report::jobtype::JobType;
use crate::report::prepare::ReportData;

/// 超过该数量时启用筛选
pub const FULL_LIST_LIMIT: usize = 20;
/// 始终列出的前几个态
pub const ALWAYS_SHOWN: usize = 5;
pub const OSCILLATOR_THRESHOLD: f64 = 0.1;
pub const ROTATORY_THRESHOLD: f64 = 10.0;
/// 跃迁组分的最小贡献 (%)
pub const CONTRIBUTION_THRESHOLD: f64 = 5.0;

/// 选出要列出的激发态下标（从 0 开始）
pub fn select_states(count: usize, oscillators: &[f64], rotatory: Option<&[f64]>) -> Vec<usize> {
    if count <= FULL_LIST_LIMIT {
        return (0..count).collect();
    }

    (0..count)
        .filter(|&i| {
            if i < ALWAYS_SHOWN {
                return true;
            }
            let strong = oscillators
                .get(i)
                .map(|f| *f > OSCILLATOR_THRESHOLD)
                .unwrap_or(false);
            let chiral = match rotatory.and_then(|r| r.get(i)) {
                Some(r) => r.abs() > ROTATORY_THRESHOLD,
                None => true,
            };
            strong || chiral
        })
        .collect()
}

/// 记录中要列出的激发态编号（从 1 开始）
pub fn selected_state_numbers(record: &CalculationRecord) -> Vec<usize> {
    let states = match record.results.excited_states.as_ref() {
        Some(s) => s,
        None => return Vec::new(),
    };
    let count = states.et_energies.as_ref().map(|e| e.len()).unwrap_or(0);
    let oscillators = states.et_oscillator_strength.as_deref().unwrap_or(&[]);
    select_states(count, oscillators, states.et_rot.as_deref())
        .into_iter()
        .map(|i| i + 1)
        .collect()
}

/// 跃迁描述，例如 `HOMO→LUMO (92%)`
pub fn transition_text(
    components: &[TransitionComponent],
    homo_indexes: Option<&[usize]>,
    unrestricted: bool,
) -> String {
    let parts: Vec<String> = components
        .iter()
        .filter_map(|TransitionComponent(from, to, coefficient)| {
            let percent = 100.0 * coefficient * coefficient;
            if percent <= CONTRIBUTION_THRESHOLD {
                return None;
            }
            let from_name = orbital(from.0, from.1, homo_indexes);
            let to_name = orbital(to.0, to.1, homo_indexes);
            Some(if unrestricted {
                format!(
                    "{}({})→{}({}) ({:.0}%)",
                    from_name,
                    spin_label(from.1),
                    to_name,
                    spin_label(to.1),
                    percent
                )
            } else {
                format!("{}→{} ({:.0}%)", from_name, to_name, percent)
            })
        })
        .collect();
    parts.join("; ")
}

fn orbital(index: usize, spin: usize, homo_indexes: Option<&[usize]>) -> String {
    let homo = homo_indexes.and_then(|h| h.get(spin).or_else(|| h.first()));
    match homo {
        Some(&homo) => format::orbital_name(index, homo),
        None => format!("MO {}", index + 1),
    }
}

fn spin_label(spin: usize) -> &'static str {
    if spin == 0 {
        "α"
    } else {
        "β"
    }
}

/// 单条记录的激发态表
pub fn state_table(record: &CalculationRecord, index: usize) -> Option<TableBlock> {
    let states = record.results.excited_states.as_ref()?;
    let energies = states.et_energies.as_ref().filter(|e| !e.is_empty())?;
    let oscillators = states.et_oscillator_strength.as_deref().unwrap_or(&[]);
    let rotatory = states.et_rot.as_deref();
    let symmetries = states.et_sym.as_deref().unwrap_or(&[]);
    let transitions = states.et_transitions.as_deref().unwrap_or(&[]);

    let homo_indexes = record
        .wavefunction()
        .and_then(|w| w.homo_indexes.as_deref());
    let unrestricted = record.is_unrestricted();

    let selected = select_states(energies.len(), oscillators, rotatory);
    let caption = if selected.len() < energies.len() {
        format!(
            "Table: Selected excited states of job #{} ({} of {}; first {}, f > {}, |R| > {})",
            index,
            selected.len(),
            energies.len(),
            ALWAYS_SHOWN,
            OSCILLATOR_THRESHOLD,
            ROTATORY_THRESHOLD
        )
    } else {
        format!("Table: Calculated excited states of job #{}", index)
    };

    let mut table = TableBlock::new(vec![40, 70, 60, 80, 60, 60, 180])
        .with_header(vec![
            "State",
            "Energy (cm-1)",
            "λ (nm)",
            "Symmetry",
            "f",
            "R",
            "Transitions",
        ])
        .with_caption(caption);

    for i in selected {
        let energy = energies[i];
        table.push(vec![
            (i + 1).to_string(),
            format::fixed(energy, 0),
            format::wavenumber_to_nm(energy)
                .map(|nm| format::fixed(nm, 1))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            symmetries
                .get(i)
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            oscillators
                .get(i)
                .map(|f| format::fixed(*f, 4))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            rotatory
                .and_then(|r| r.get(i))
                .map(|r| format::fixed(*r, 2))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            transitions
                .get(i)
                .map(|c| transition_text(c, homo_indexes, unrestricted))
                .unwrap_or_default(),
        ]);
    }

    Some(table)
}

/// 所有 TD 记录的激发态表
pub fn build(data: &ReportData) -> Vec<ContentBlock> {
    data.records
        .iter()
        .filter(|r| r.has(JobType::Td))
        .filter_map(|r| state_table(r.record, r.index))
        .map(ContentBlock::Table)
        .collect()
}
