//! # 文档组装
//!
//! 报告构建入口：预处理记录、校验参考记录的必需字段，再按固定顺序
//! 拼接各段落（分子 → 计算细节 → 结果 → 图片与光谱 → 坐标），最后附上
//! 页脚。段落内容的取舍全部由各构建器决定，这里只负责顺序。
//!
//! ## 依赖关系
//! - 被 `commands/build.rs`, `commands/batch.rs` 调用
//! - 使用 `report/` 下全部段落构建器

use crate::config::ReportConfig;
use crate::error::Result;
use crate::models::record::require;
use crate::models::{CalculationRecord, ContentBlock, Document, Footer};
use crate::report::context::{BuildContext, Diagnostics};
use crate::report::prepare::ReportData;
use crate::report::{coordinates, details, figures, molecule, results};

use std::path::PathBuf;

pub const REPORT_TITLE: &str = "MOLECULAR CALCULATION REPORT";
pub const FIGURES_TITLE: &str = "4. FIGURES AND SPECTRA";
pub const PAGE_MARKER: &str = "Page {PAGE} of {NUMPAGES}";

/// 构建选项
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// 预渲染图片所在目录
    pub temp_dir: PathBuf,
    /// 报告中显示的目录名
    pub directory_name: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            temp_dir: PathBuf::from("temp"),
            directory_name: String::new(),
        }
    }
}

/// 构建结果
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// 校验参考记录的必需字段
pub fn validate(data: &ReportData) -> Result<()> {
    let reference = data.reference();
    let record = reference.record;
    let index = reference.index;
    let molecule = &record.molecule;
    let wavefunction = record.wavefunction();

    require(molecule.formula.as_ref(), "molecule.formula", index)?;
    require(molecule.charge, "molecule.charge", index)?;
    require(molecule.multiplicity, "molecule.multiplicity", index)?;
    require(molecule.atomic_numbers.as_ref(), "molecule.atoms_Z", index)?;
    require(
        record.comp_details.general.last_theory.as_ref(),
        "comp_details.general.last_theory",
        index,
    )?;
    require(
        wavefunction.and_then(|w| w.total_molecular_energy),
        "results.wavefunction.total_molecular_energy",
        index,
    )?;
    require(
        wavefunction.and_then(|w| w.homo_indexes.as_ref()),
        "results.wavefunction.homo_indexes",
        index,
    )?;
    require(
        wavefunction.and_then(|w| w.mo_energies.as_ref()),
        "results.wavefunction.MO_energies",
        index,
    )?;
    require(
        record
            .results
            .geometry
            .as_ref()
            .and_then(|g| g.converged_coords.as_ref()),
        "results.geometry.elements_3D_coords_converged",
        index,
    )?;
    Ok(())
}

/// 按固定顺序拼接段落内容
pub fn assemble_blocks(data: &ReportData, ctx: &mut BuildContext) -> Result<Vec<ContentBlock>> {
    let mut blocks = vec![ContentBlock::SectionTitle {
        text: REPORT_TITLE.to_string(),
    }];

    blocks.extend(molecule::build(data, ctx)?);
    blocks.extend(details::build(data, ctx)?);
    blocks.extend(results::build(data, ctx)?);

    let figure_blocks = figures::build(data, ctx);
    if !figure_blocks.is_empty() {
        blocks.push(ContentBlock::SectionTitle {
            text: FIGURES_TITLE.to_string(),
        });
        blocks.extend(figure_blocks);
    }

    blocks.extend(coordinates::build(data, ctx)?);
    Ok(blocks)
}

/// 页脚：构建时间和页码占位符
pub fn footer() -> Footer {
    Footer {
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        page_marker: PAGE_MARKER.to_string(),
    }
}

/// 由记录序列构建报告
pub fn build_report(
    records: &[CalculationRecord],
    config: &ReportConfig,
    options: &BuildOptions,
) -> Result<BuildOutput> {
    let mut ctx = BuildContext::new(config.mode, &options.temp_dir, &options.directory_name);

    let data = ReportData::prepare(records, &mut ctx.diagnostics)?;
    validate(&data)?;
    let blocks = assemble_blocks(&data, &mut ctx)?;

    Ok(BuildOutput {
        document: Document {
            blocks,
            footer: footer(),
        },
        diagnostics: ctx.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportMode;
    use crate::error::ReportError;
    use crate::report::context::DiagnosticKind;
    use crate::report::fixtures;
    use std::fs;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> BuildOptions {
        BuildOptions {
            temp_dir: dir.path().to_path_buf(),
            directory_name: "water".to_string(),
        }
    }

    fn titles(document: &Document) -> Vec<String> {
        document
            .blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::SectionTitle { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_section_order_without_figures() {
        let dir = TempDir::new().unwrap();
        let records = vec![fixtures::opt_record(0)];
        let output = build_report(&records, &ReportConfig::new(ReportMode::Clean), &options(&dir)).unwrap();

        assert_eq!(
            titles(&output.document),
            vec![
                REPORT_TITLE,
                molecule::TITLE,
                details::TITLE,
                results::TITLE,
                coordinates::TITLE
            ]
        );
        assert_eq!(output.document.footer.page_marker, PAGE_MARKER);
    }

    #[test]
    fn test_figures_section_present_when_images_exist() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(figures::IR_SPECTRUM), b"png").unwrap();
        let records = vec![fixtures::freq_record(true)];
        let output = build_report(&records, &ReportConfig::new(ReportMode::Text), &options(&dir)).unwrap();

        let titles = titles(&output.document);
        assert_eq!(titles[4], FIGURES_TITLE);
        assert_eq!(output.document.figures().count(), 1);
    }

    #[test]
    fn test_opt_parameters_once_across_whole_document() {
        let dir = TempDir::new().unwrap();
        let records = vec![fixtures::opt_record(0), fixtures::freq_record(true)];
        let output = build_report(&records, &ReportConfig::new(ReportMode::Full), &options(&dir)).unwrap();

        let max_force_rows: Vec<_> = output
            .document
            .tables()
            .flat_map(|t| t.rows.iter())
            .filter(|r| r[0] == "Max Force value and threshold")
            .collect();
        assert_eq!(max_force_rows.len(), 1);
        assert_eq!(max_force_rows[0][1], "0.000012");
    }

    #[test]
    fn test_build_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(figures::TOPOLOGY), b"png").unwrap();
        let records = vec![
            fixtures::opt_record(0),
            fixtures::freq_record(true),
            fixtures::td_record(25),
        ];
        let config = ReportConfig::new(ReportMode::Full);

        let first = build_report(&records, &config, &options(&dir)).unwrap();
        let second = build_report(&records, &config, &options(&dir)).unwrap();
        assert_eq!(first.document.blocks, second.document.blocks);
        assert_eq!(first.diagnostics.entries, second.diagnostics.entries);
    }

    #[test]
    fn test_builds_do_not_share_dedup_state() {
        let dir = TempDir::new().unwrap();
        let records = vec![fixtures::opt_record(0)];
        let config = ReportConfig::new(ReportMode::Clean);

        for _ in 0..2 {
            let output = build_report(&records, &config, &options(&dir)).unwrap();
            let count = output
                .document
                .tables()
                .flat_map(|t| t.rows.iter())
                .filter(|r| r[0] == "Job type: Geometry optimization")
                .count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_unmatched_records_are_counted() {
        let dir = TempDir::new().unwrap();
        let records = vec![fixtures::base_record(), fixtures::opt_record(0)];
        let output = build_report(&records, &ReportConfig::new(ReportMode::Clean), &options(&dir)).unwrap();
        assert_eq!(output.diagnostics.unmatched_records(), 1);
        assert!(output.diagnostics.count(DiagnosticKind::MissingFigureAsset) > 0);
    }

    #[test]
    fn test_missing_mandatory_field_names_record() {
        let dir = TempDir::new().unwrap();
        let mut value = fixtures::base_json();
        value["results"]["wavefunction"]
            .as_object_mut()
            .unwrap()
            .remove("homo_indexes");
        let records = vec![fixtures::opt_record(0), fixtures::record(value)];

        match build_report(&records, &ReportConfig::new(ReportMode::Clean), &options(&dir)) {
            Err(ReportError::MissingField { field, record }) => {
                assert_eq!(field, "results.wavefunction.homo_indexes");
                assert_eq!(record, 1);
            }
            other => panic!("unexpected result: {:?}", other.map(|o| o.document.blocks.len())),
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            build_report(&[], &ReportConfig::default(), &options(&dir)),
            Err(ReportError::NoRecords)
        ));
    }
}
