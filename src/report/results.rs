//! # 结果段落
//!
//! 主结果表：总能量、前线轨道能级（非限制性计算时分 α/β 两列）、
//! `full` 模式下的概念 DFT 指数，以及按任务类型追加的几何优化和热化学
//! 结果。几何优化结果与参数块一样只输出一次，热化学结果每条 FREQ
//! 记录一块。
//!
//! 主表之后依次是布居分析表、Fukui 表（仅 `full`）和激发态表。
//!
//! ## 依赖关系
//! - 被 `report/assembler.rs` 调用
//! - 使用 `report/population.rs`, `report/excited.rs`, `report/dedup.rs`

use crate::error::Result;
use crate::models::record::{require, Wavefunction};
use crate::models::{ContentBlock, TableBlock};
use crate::report::context::BuildContext;
use crate::report::dedup::OPT_RESULTS;
use crate::report::format;
use crate::report::jobtype::JobType;
use crate::report::prepare::{PreparedRecord, ReportData};
use crate::report::{excited, population};

pub const TITLE: &str = "3. RESULTS";

fn blank() -> Vec<String> {
    vec![String::new(); 3]
}

/// 指定自旋、指定序号的轨道能；越界时为 `N/A`
fn orbital_energy(mo_energies: &[Vec<f64>], spin: usize, index: Option<usize>) -> String {
    format::electron_volts_or_na(
        index.and_then(|i| mo_energies.get(spin).and_then(|e| e.get(i)).copied()),
    )
}

/// 前线轨道行：(标签, 相对 HOMO 的偏移)
const FRONTIER_ROWS: [(&str, isize); 4] = [
    ("LUMO+1 energies", 2),
    ("LUMO energies", 1),
    ("HOMO energies", 0),
    ("HOMO-1 energies", -1),
];

fn orbital_rows(table: &mut TableBlock, homo_indexes: &[usize], mo_energies: &[Vec<f64>]) {
    let spins = if homo_indexes.len() == 2 { 2 } else { 1 };
    if spins == 2 {
        table.push(vec!["Unrestricted calculation", "Alpha spin MO", "Beta spin MO"]);
    }

    let mut homo_row = vec!["HOMO number".to_string()];
    homo_row.extend(homo_indexes.iter().take(spins).map(|h| (h + 1).to_string()));
    table.push(homo_row);

    for (label, offset) in FRONTIER_ROWS {
        let mut row = vec![label.to_string()];
        for (spin, &homo) in homo_indexes.iter().take(spins).enumerate() {
            let index = homo.checked_add_signed(offset);
            row.push(orbital_energy(mo_energies, spin, index));
        }
        table.push(row);
    }
}

/// 概念 DFT 反应性指数，各自缺失时跳过
fn cdft_rows(table: &mut TableBlock, wavefunction: &Wavefunction) {
    let hartree = |v: f64| format!("{:.4} hartrees", v);
    let indices: [(&str, Option<String>); 6] = [
        ("CDFT indices: Electron Affinity", wavefunction.electron_affinity.map(hartree)),
        ("CDFT indices: Ionisation Potential", wavefunction.ionisation_potential.map(hartree)),
        ("CDFT indices: Electronegativity", wavefunction.electronegativity.map(hartree)),
        ("CDFT indices: Hardness", wavefunction.hardness.map(hartree)),
        (
            "CDFT indices: Electrophilicity",
            wavefunction.electrophilicity.map(|v| format::fixed(v, 4)),
        ),
        (
            "CDFT indices: Electron-flow",
            wavefunction.electron_flow.map(|v| format!("{:.4} e-", v)),
        ),
    ];

    let present: Vec<(&str, String)> = indices
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect();
    if present.is_empty() {
        return;
    }

    table.push(blank());
    for (label, value) in present {
        table.push(vec![label.to_string(), value]);
    }
}

fn optimization_results(table: &mut TableBlock, data: &ReportData, ctx: &mut BuildContext) {
    let energy = data
        .last_with(JobType::Opt)
        .and_then(|r| r.record.results.geometry.as_ref())
        .and_then(|g| g.nuclear_repulsion_energy_from_xyz);

    table.push(blank());
    table.push(vec!["Geometry optimization specific results"]);
    if let Some(energy) = energy {
        table.push(vec!["Converged nuclear repulsion energy".to_string(), format::hartrees(energy)]);
    }
    ctx.dedup.mark_emitted(OPT_RESULTS);
}

fn thermochemistry_results(table: &mut TableBlock, prepared: &PreparedRecord) {
    table.push(blank());
    table.push(vec!["Frequency and Thermochemistry specific results"]);

    let freq = match prepared.record.results.freq.as_ref() {
        Some(f) => f,
        None => return,
    };
    // 没有振动强度时不输出热化学数据
    if freq.vibrational_int.as_ref().map_or(true, |i| i.is_empty()) {
        return;
    }

    let imaginary = freq
        .vibrational_freq
        .as_ref()
        .map(|f| f.iter().filter(|v| **v < 0.0).count())
        .unwrap_or(0);
    table.push(vec!["Number of imaginary frequencies".to_string(), imaginary.to_string()]);

    let at = prepared
        .temperatures
        .first()
        .map(|t| format!(" at {:.2} K", t))
        .unwrap_or_default();

    let quantities = [
        ("Sum of electronic and zero-point energy".to_string(), freq.zero_point_energy),
        (
            format!("Sum of electronic and thermal energies{}", at),
            freq.electronic_thermal_energy,
        ),
        (format!("Enthalpy{}", at), freq.enthalpy),
        (format!("Gibbs free energy{}", at), freq.free_energy),
        (format!("Entropy{}", at), freq.entropy),
    ];
    for (label, value) in quantities {
        if let Some(value) = value {
            table.push(vec![label, format::hartrees(value)]);
        }
    }
}

/// 主结果表
pub fn results_table(data: &ReportData, ctx: &mut BuildContext) -> Result<TableBlock> {
    let reference = data.reference();
    let index = reference.index;
    let wavefunction = require(reference.record.wavefunction(), "results.wavefunction", index)?;
    let energy = require(
        wavefunction.total_molecular_energy,
        "results.wavefunction.total_molecular_energy",
        index,
    )?;
    let homo_indexes = require(
        wavefunction.homo_indexes.as_deref(),
        "results.wavefunction.homo_indexes",
        index,
    )?;
    let mo_energies = require(
        wavefunction.mo_energies.as_deref(),
        "results.wavefunction.MO_energies",
        index,
    )?;

    let mut table = TableBlock::new(vec![200, 200, 80]);
    table.push(vec!["Total molecular energy".to_string(), format::hartrees(energy)]);
    orbital_rows(&mut table, homo_indexes, mo_energies);

    if ctx.mode.is_full() {
        cdft_rows(&mut table, wavefunction);
    }

    for prepared in &data.records {
        if prepared.has(JobType::Opt) && !ctx.dedup.has_been_emitted(OPT_RESULTS) {
            optimization_results(&mut table, data, ctx);
        }
        if prepared.has(JobType::Freq) {
            thermochemistry_results(&mut table, prepared);
        }
    }

    Ok(table)
}

/// 结果段落
pub fn build(data: &ReportData, ctx: &mut BuildContext) -> Result<Vec<ContentBlock>> {
    let mut blocks = vec![
        ContentBlock::SectionTitle {
            text: TITLE.to_string(),
        },
        ContentBlock::Table(results_table(data, ctx)?),
    ];

    if ctx.mode.is_full() {
        blocks.extend(population::build(data));
    }
    blocks.extend(excited::build(data));

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportMode;
    use crate::error::ReportError;
    use crate::models::CalculationRecord;
    use crate::report::context::Diagnostics;
    use crate::report::fixtures;
    use serde_json::json;

    fn results(records: &[CalculationRecord], mode: ReportMode) -> Result<TableBlock> {
        let mut diagnostics = Diagnostics::default();
        let data = ReportData::prepare(records, &mut diagnostics)?;
        let mut ctx = BuildContext::new(mode, "temp", "water");
        results_table(&data, &mut ctx)
    }

    fn count_rows(table: &TableBlock, label: &str) -> usize {
        table.rows.iter().filter(|r| r[0] == label).count()
    }

    #[test]
    fn test_restricted_orbital_rows() {
        let table = results(&[fixtures::base_record()], ReportMode::Clean).unwrap();
        assert_eq!(table.find_row("Total molecular energy").unwrap()[1], "-76.40895 hartrees");
        assert_eq!(table.find_row("HOMO number").unwrap()[1], "5");
        assert_eq!(table.find_row("LUMO+1 energies").unwrap()[1], "3.22 eV");
        assert_eq!(table.find_row("LUMO energies").unwrap()[1], "1.93 eV");
        assert_eq!(table.find_row("HOMO energies").unwrap()[1], "-7.41 eV");
        assert_eq!(table.find_row("HOMO-1 energies").unwrap()[1], "-9.63 eV");
        assert!(table.find_row("Unrestricted calculation").is_none());
    }

    #[test]
    fn test_unrestricted_adds_beta_column() {
        let mut value = fixtures::base_json();
        value["results"]["wavefunction"]["homo_indexes"] = json!([4, 3]);
        value["results"]["wavefunction"]["MO_energies"] = json!([
            [-520.1, -27.0, -13.9, -9.6, -7.4, 1.9],
            [-520.0, -26.8, -13.5, -9.2, 2.1, 3.5]
        ]);
        let table = results(&[fixtures::record(value)], ReportMode::Clean).unwrap();

        assert_eq!(
            table.find_row("Unrestricted calculation").unwrap(),
            &vec!["Unrestricted calculation", "Alpha spin MO", "Beta spin MO"]
        );
        assert_eq!(table.find_row("HOMO number").unwrap(), &vec!["HOMO number", "5", "4"]);
        // α 轨道只有 6 个，LUMO+1 越界
        assert_eq!(
            table.find_row("LUMO+1 energies").unwrap(),
            &vec!["LUMO+1 energies", "N/A", "3.50 eV"]
        );
    }

    #[test]
    fn test_cdft_indices_only_in_full_mode() {
        let mut value = fixtures::base_json();
        value["results"]["wavefunction"]["A"] = json!(0.0123);
        value["results"]["wavefunction"]["Omega"] = json!(0.45678);
        let records = vec![fixtures::record(value)];

        let clean = results(&records, ReportMode::Clean).unwrap();
        assert!(clean.find_row("CDFT indices: Electron Affinity").is_none());

        let full = results(&records, ReportMode::Full).unwrap();
        assert_eq!(
            full.find_row("CDFT indices: Electron Affinity").unwrap()[1],
            "0.0123 hartrees"
        );
        assert_eq!(full.find_row("CDFT indices: Electrophilicity").unwrap()[1], "0.4568");
        assert!(full.find_row("CDFT indices: Hardness").is_none());
    }

    #[test]
    fn test_optimization_results_once_from_last_opt() {
        let records = vec![fixtures::opt_record(0), fixtures::freq_record(true)];
        let table = results(&records, ReportMode::Clean).unwrap();
        assert_eq!(count_rows(&table, "Geometry optimization specific results"), 1);
        assert_eq!(
            table.find_row("Converged nuclear repulsion energy").unwrap()[1],
            "10.10000 hartrees"
        );
        assert_eq!(count_rows(&table, "Frequency and Thermochemistry specific results"), 1);
    }

    #[test]
    fn test_thermochemistry_labels_use_first_temperature() {
        let table = results(&[fixtures::freq_record(false)], ReportMode::Clean).unwrap();
        assert_eq!(table.find_row("Number of imaginary frequencies").unwrap()[1], "0");
        assert_eq!(
            table.find_row("Sum of electronic and zero-point energy").unwrap()[1],
            "-76.38743 hartrees"
        );
        assert_eq!(
            table.find_row("Gibbs free energy at 298.15 K").unwrap()[1],
            "-76.40507 hartrees"
        );
    }

    #[test]
    fn test_thermochemistry_requires_intensities() {
        let mut value = fixtures::base_json();
        value["comp_details"]["freq"] = json!({"temperature": 298.15});
        value["results"]["freq"] = json!({"vibrational_freq": [-120.0, 1600.0], "enthalpy": -76.3});
        let table = results(&[fixtures::record(value)], ReportMode::Clean).unwrap();
        assert_eq!(count_rows(&table, "Frequency and Thermochemistry specific results"), 1);
        assert!(table.find_row("Number of imaginary frequencies").is_none());
        assert!(table.find_row("Enthalpy at 298.15 K").is_none());
    }

    #[test]
    fn test_missing_orbital_energies_is_fatal() {
        let mut value = fixtures::base_json();
        value["results"]["wavefunction"]
            .as_object_mut()
            .unwrap()
            .remove("MO_energies");
        match results(&[fixtures::record(value)], ReportMode::Clean) {
            Err(ReportError::MissingField { field, record }) => {
                assert_eq!(field, "results.wavefunction.MO_energies");
                assert_eq!(record, 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_population_tables_only_in_full_mode() {
        let records = vec![fixtures::population_record(
            Some(vec![-0.6, -0.1, 0.05, 0.7]),
            None,
            None,
        )];
        let mut diagnostics = Diagnostics::default();
        let data = ReportData::prepare(&records, &mut diagnostics).unwrap();

        let mut ctx = BuildContext::new(ReportMode::Clean, "temp", "water");
        assert_eq!(build(&data, &mut ctx).unwrap().len(), 2);

        let mut ctx = BuildContext::new(ReportMode::Full, "temp", "water");
        assert_eq!(build(&data, &mut ctx).unwrap().len(), 3);
    }
}
