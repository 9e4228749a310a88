//! # 布居分析与 Fukui 表
//!
//! 仅在 `full` 模式下输出，数据取自参考记录。表中只列出离群原子
//! （μ ± σ 之外），分为负离群和正离群两组。
//!
//! 存在的电荷方法组合逐一列举：
//!
//! | Mulliken | Hirshfeld | CM5 | 划分依据 | 列 |
//! |----------|-----------|-----|----------|----|
//! | ✓ | | | Mulliken | Atom, Mulliken |
//! | ✓ | ✓ | ✓ | CM5 | Index, Atom, Hirshfeld, CM5, Mulliken |
//! | | ✓ | ✓ | CM5 | Index, Atom, Hirshfeld, CM5 |
//! | ✓ | ✓ | | Hirshfeld | Index, Atom, Hirshfeld, Mulliken |
//! | ✓ | | ✓ | CM5 | Index, Atom, CM5, Mulliken |
//! | | ✓ | | Hirshfeld | Index, Atom, Hirshfeld |
//! | | | ✓ | CM5 | Index, Atom, CM5 |
//!
//! Fukui 表优先使用 Hirshfeld 描述符，其次 Mulliken，按双描述符划分。
//!
//! ## 依赖关系
//! - 被 `report/results.rs` 调用
//! - 使用 `report/stats.rs`, `models/elements.rs`

use crate::models::elements::atom_label;
use crate::models::record::{FukuiDescriptors, Wavefunction};
use crate::models::{ContentBlock, Row, TableBlock};
use crate::report::format::{self, NOT_AVAILABLE};
use crate::report::prepare::ReportData;
use crate::report::stats::select_outliers;

use std::fmt;

/// 电荷布居方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeMethod {
    Mulliken,
    Hirshfeld,
    Cm5,
}

impl fmt::Display for ChargeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeMethod::Mulliken => write!(f, "Mulliken"),
            ChargeMethod::Hirshfeld => write!(f, "Hirshfeld"),
            ChargeMethod::Cm5 => write!(f, "CM5"),
        }
    }
}

impl ChargeMethod {
    fn charges(self, wavefunction: &Wavefunction) -> Option<&[f64]> {
        let charges = match self {
            ChargeMethod::Mulliken => wavefunction.mulliken_charges.as_ref(),
            ChargeMethod::Hirshfeld => wavefunction.hirshfeld_charges.as_ref(),
            ChargeMethod::Cm5 => wavefunction.cm5_charges.as_ref(),
        };
        charges.map(|c| c.as_slice()).filter(|c| !c.is_empty())
    }
}

/// 电荷表布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationLayout {
    /// 用于选择离群原子的方法
    pub split: ChargeMethod,
    /// 数值列（按顺序）
    pub columns: Vec<ChargeMethod>,
    /// 是否带原子序号列
    pub with_index: bool,
}

/// 由存在的方法组合得到表格布局，全都缺失时为 `None`
pub fn layout(mulliken: bool, hirshfeld: bool, cm5: bool) -> Option<PopulationLayout> {
    use ChargeMethod::*;

    let (split, columns, with_index) = match (mulliken, hirshfeld, cm5) {
        (false, false, false) => return None,
        (true, false, false) => (Mulliken, vec![Mulliken], false),
        (true, true, true) => (Cm5, vec![Hirshfeld, Cm5, Mulliken], true),
        (false, true, true) => (Cm5, vec![Hirshfeld, Cm5], true),
        (true, true, false) => (Hirshfeld, vec![Hirshfeld, Mulliken], true),
        (true, false, true) => (Cm5, vec![Cm5, Mulliken], true),
        (false, true, false) => (Hirshfeld, vec![Hirshfeld], true),
        (false, false, true) => (Cm5, vec![Cm5], true),
    };

    Some(PopulationLayout {
        split,
        columns,
        with_index,
    })
}

fn cell(values: Option<&[f64]>, index: usize) -> String {
    values
        .and_then(|v| v.get(index))
        .map(|v| format::fixed(*v, 3))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// 离群原子分组写入表格；两组都为空时返回 `false`
fn push_outlier_groups<F>(table: &mut TableBlock, split: &[f64], atoms: &[u32], row: F) -> bool
where
    F: Fn(usize) -> Row,
{
    let indices: Vec<usize> = (0..split.len().min(atoms.len())).collect();
    let (low, high) = select_outliers(split, &indices);
    if low.is_empty() && high.is_empty() {
        return false;
    }

    for (title, group) in [("Negative outliers", low), ("Positive outliers", high)] {
        if group.is_empty() {
            continue;
        }
        table.push(vec![title]);
        for (index, _) in group {
            table.push(row(index));
        }
    }
    true
}

/// 部分电荷表
pub fn charge_table(wavefunction: &Wavefunction, atoms: &[u32]) -> Option<TableBlock> {
    let layout = layout(
        ChargeMethod::Mulliken.charges(wavefunction).is_some(),
        ChargeMethod::Hirshfeld.charges(wavefunction).is_some(),
        ChargeMethod::Cm5.charges(wavefunction).is_some(),
    )?;
    let split = layout.split.charges(wavefunction)?;

    let mut header: Vec<String> = Vec::new();
    let mut widths: Vec<u32> = Vec::new();
    if layout.with_index {
        header.push("Index".to_string());
        widths.push(60);
    }
    header.push("Atom".to_string());
    widths.push(80);
    for method in &layout.columns {
        header.push(format!("{} charge", method));
        widths.push(100);
    }

    let mut table = TableBlock::new(widths)
        .with_header(header)
        .with_caption(format!(
            "Table: Atoms with {} partial charges outside the mean ± one standard deviation",
            layout.split
        ));

    let found = push_outlier_groups(&mut table, split, atoms, |i| {
        let mut row: Row = Vec::new();
        if layout.with_index {
            row.push((i + 1).to_string());
        }
        row.push(atom_label(atoms[i], i));
        for method in &layout.columns {
            row.push(cell(method.charges(wavefunction), i));
        }
        row
    });

    found.then_some(table)
}

/// 首选的 Fukui 描述符：Hirshfeld，其次 Mulliken
fn preferred_fukui(wavefunction: &Wavefunction) -> Option<(&'static str, &FukuiDescriptors)> {
    let usable = |d: &Option<FukuiDescriptors>| d.as_ref().filter(|d| !d.dual.is_empty()).is_some();

    if usable(&wavefunction.hirshfeld_fukui) {
        wavefunction.hirshfeld_fukui.as_ref().map(|d| ("Hirshfeld", d))
    } else if usable(&wavefunction.mulliken_fukui) {
        wavefunction.mulliken_fukui.as_ref().map(|d| ("Mulliken", d))
    } else {
        None
    }
}

/// 缩并 Fukui 函数表
pub fn fukui_table(wavefunction: &Wavefunction, atoms: &[u32]) -> Option<TableBlock> {
    let (method, descriptors) = preferred_fukui(wavefunction)?;

    let mut table = TableBlock::new(vec![60, 80, 90, 90, 110])
        .with_header(vec!["Index", "Atom", "f+", "f-", "Dual descriptor"])
        .with_caption(format!(
            "Table: Condensed {} Fukui functions of atoms with a dual descriptor outside the mean ± one standard deviation",
            method
        ));

    let found = push_outlier_groups(&mut table, &descriptors.dual, atoms, |i| {
        vec![
            (i + 1).to_string(),
            atom_label(atoms[i], i),
            cell(Some(descriptors.f_plus.as_slice()), i),
            cell(Some(descriptors.f_minus.as_slice()), i),
            cell(Some(descriptors.dual.as_slice()), i),
        ]
    });

    found.then_some(table)
}

/// 参考记录的电荷表和 Fukui 表
pub fn build(data: &ReportData) -> Vec<ContentBlock> {
    let reference = data.reference().record;
    let wavefunction = match reference.wavefunction() {
        Some(w) => w,
        None => return Vec::new(),
    };
    let atoms = reference.molecule.atomic_numbers.as_deref().unwrap_or(&[]);

    charge_table(wavefunction, atoms)
        .into_iter()
        .chain(fukui_table(wavefunction, atoms))
        .map(ContentBlock::Table)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::context::Diagnostics;
    use crate::report::fixtures;
    use serde_json::json;

    fn wavefunction_of(record: &crate::models::CalculationRecord) -> &Wavefunction {
        record.wavefunction().unwrap()
    }

    #[test]
    fn test_every_subset_has_a_layout() {
        assert!(layout(false, false, false).is_none());

        let mulliken = layout(true, false, false).unwrap();
        assert_eq!(mulliken.columns.len() + 1, 2);
        assert!(!mulliken.with_index);

        let all = layout(true, true, true).unwrap();
        assert_eq!(all.split, ChargeMethod::Cm5);
        assert_eq!(all.columns.len() + 2, 5);

        let hirshfeld_cm5 = layout(false, true, true).unwrap();
        assert_eq!(hirshfeld_cm5.split, ChargeMethod::Cm5);
        assert_eq!(hirshfeld_cm5.columns.len() + 2, 4);

        let mulliken_hirshfeld = layout(true, true, false).unwrap();
        assert_eq!(mulliken_hirshfeld.split, ChargeMethod::Hirshfeld);
        assert_eq!(mulliken_hirshfeld.columns.len() + 2, 4);

        assert_eq!(layout(false, false, true).unwrap().columns.len() + 2, 3);
    }

    #[test]
    fn test_mulliken_only_outliers() {
        let record = fixtures::population_record(Some(vec![-0.6, -0.1, 0.05, 0.7]), None, None);
        let atoms = record.molecule.atomic_numbers.clone().unwrap();
        let table = charge_table(wavefunction_of(&record), &atoms).unwrap();

        assert_eq!(table.header.as_ref().unwrap().len(), 2);
        assert_eq!(
            table.rows,
            vec![
                vec!["Negative outliers".to_string(), String::new()],
                vec!["O1".to_string(), "-0.600".to_string()],
                vec!["Positive outliers".to_string(), String::new()],
                vec!["H4".to_string(), "0.700".to_string()],
            ]
        );
    }

    #[test]
    fn test_hirshfeld_and_cm5_without_mulliken() {
        let record = fixtures::population_record(
            None,
            Some(vec![-0.4, 0.1, 0.15, 0.15]),
            Some(vec![-0.7, 0.2, 0.25, 0.25]),
        );
        let atoms = record.molecule.atomic_numbers.clone().unwrap();
        let table = charge_table(wavefunction_of(&record), &atoms).unwrap();

        assert_eq!(
            table.header.as_ref().unwrap(),
            &vec!["Index", "Atom", "Hirshfeld charge", "CM5 charge"]
        );
        let oxygen = table.find_row("1").unwrap();
        assert_eq!(oxygen, &vec!["1", "O1", "-0.400", "-0.700"]);
    }

    #[test]
    fn test_uniform_charges_omit_table() {
        let record = fixtures::population_record(Some(vec![0.1, 0.1, 0.1, 0.1]), None, None);
        let atoms = record.molecule.atomic_numbers.clone().unwrap();
        assert!(charge_table(wavefunction_of(&record), &atoms).is_none());
    }

    #[test]
    fn test_fukui_prefers_hirshfeld() {
        let mut value = fixtures::base_json();
        value["molecule"]["atoms_Z"] = json!([8, 6, 1, 1]);
        value["results"]["wavefunction"]["Mulliken_Fukui"] = json!({
            "f_plus": [0.1, 0.2, 0.3, 0.4],
            "f_minus": [0.4, 0.3, 0.2, 0.1],
            "dual": [-0.5, 0.0, 0.0, 0.5]
        });
        value["results"]["wavefunction"]["Hirshfeld_Fukui"] = json!({
            "f_plus": [0.3, 0.2, 0.25, 0.25],
            "f_minus": [0.1, 0.3, 0.3, 0.3],
            "dual": [0.2, -0.1, -0.05, -0.05]
        });
        let record = fixtures::record(value);
        let atoms = record.molecule.atomic_numbers.clone().unwrap();
        let table = fukui_table(wavefunction_of(&record), &atoms).unwrap();

        assert!(table.caption.as_ref().unwrap().contains("Hirshfeld"));
        assert_eq!(
            table.find_row("1").unwrap(),
            &vec!["1", "O1", "0.300", "0.100", "0.200"]
        );
    }

    fn mulliken_fukui_json() -> serde_json::Value {
        let mut value = fixtures::base_json();
        value["molecule"]["atoms_Z"] = json!([8, 6, 1, 1]);
        value["results"]["wavefunction"]["Mulliken_Fukui"] = json!({
            "f_plus": [0.1, 0.2, 0.3, 0.4],
            "f_minus": [0.4, 0.3, 0.2, 0.1],
            "dual": [-0.5, 0.0, 0.0, 0.5]
        });
        value
    }

    fn assert_mulliken_fukui(table: &TableBlock) {
        assert!(table.caption.as_ref().unwrap().contains("Mulliken"));
        assert_eq!(
            table.find_row("1").unwrap(),
            &vec!["1", "O1", "0.100", "0.400", "-0.500"]
        );
        assert_eq!(
            table.find_row("4").unwrap(),
            &vec!["4", "H4", "0.400", "0.100", "0.500"]
        );
        assert!(table.find_row("2").is_none());
    }

    #[test]
    fn test_fukui_falls_back_to_mulliken() {
        let record = fixtures::record(mulliken_fukui_json());
        let atoms = record.molecule.atomic_numbers.clone().unwrap();
        let table = fukui_table(wavefunction_of(&record), &atoms).unwrap();
        assert_mulliken_fukui(&table);
    }

    #[test]
    fn test_fukui_empty_hirshfeld_dual_falls_back_to_mulliken() {
        let mut value = mulliken_fukui_json();
        value["results"]["wavefunction"]["Hirshfeld_Fukui"] = json!({
            "f_plus": [0.3, 0.2, 0.25, 0.25],
            "f_minus": [0.1, 0.3, 0.3, 0.3],
            "dual": []
        });
        let record = fixtures::record(value);
        let atoms = record.molecule.atomic_numbers.clone().unwrap();
        let table = fukui_table(wavefunction_of(&record), &atoms).unwrap();
        assert_mulliken_fukui(&table);
    }

    #[test]
    fn test_fukui_without_descriptors_is_omitted() {
        let record = fixtures::population_record(Some(vec![-0.6, -0.1, 0.05, 0.7]), None, None);
        let atoms = record.molecule.atomic_numbers.clone().unwrap();
        assert!(fukui_table(wavefunction_of(&record), &atoms).is_none());
    }

    #[test]
    fn test_build_without_population_data_is_empty() {
        let records = vec![fixtures::base_record()];
        let mut diagnostics = Diagnostics::default();
        let data = ReportData::prepare(&records, &mut diagnostics).unwrap();
        assert!(build(&data).is_empty());
    }
}
