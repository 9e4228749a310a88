//! # spectra 命令实现
//!
//! 生成报告图片目录中的光谱图：
//! - `img-UV-Abso-Spectrum.png`：全部激发态记录的振子强度，高斯展宽
//! - `img-IR-Spectrum.png`：最后一条含红外强度的记录，洛伦兹展宽
//!
//! ## 依赖关系
//! - 使用 `cli/spectra.rs` 定义的参数
//! - 使用 `plot/spectrum.rs`
//! - 使用 `report/figures.rs` 的约定文件名

use super::read_inputs;
use crate::cli::spectra::SpectraArgs;
use crate::error::{ReportError, Result};
use crate::models::CalculationRecord;
use crate::plot::{spectrum, Broadening, SpectrumStyle, Stick};
use crate::report::figures;
use crate::utils::output;

use std::fs;
use std::path::Path;

/// UV 谱范围两侧留白 (nm)，下限不低于 100 nm
const UV_PADDING: f64 = 60.0;
const UV_FLOOR: f64 = 100.0;
const UV_STEP: f64 = 0.5;

/// IR 谱范围两侧留白 (cm⁻¹)
const IR_PADDING: f64 = 200.0;
const IR_STEP: f64 = 1.0;

/// 执行 spectra 命令
pub fn execute(args: SpectraArgs) -> Result<()> {
    output::print_header("Rendering spectra");
    validate_widths(&args)?;

    let records = read_inputs(&args.inputs, &args.pattern)?;
    fs::create_dir_all(&args.temp_dir).map_err(|e| ReportError::FileWriteError {
        path: args.temp_dir.display().to_string(),
        source: e,
    })?;

    let mut written = 0;

    let uv = uv_sticks(&records);
    if uv.is_empty() {
        output::print_skip("No excited-state oscillator strengths, UV-Vis spectrum skipped");
    } else if render(
        &uv,
        &args.temp_dir.join(figures::UV_SPECTRUM),
        Broadening::Gaussian,
        args.fwhm_nm,
        &args,
        ("UV-Vis Absorption Spectrum", "Wavelength (nm)"),
    )? {
        written += 1;
    }

    let ir = ir_sticks(&records);
    if ir.is_empty() {
        output::print_skip("No vibrational intensities, IR spectrum skipped");
    } else if render(
        &ir,
        &args.temp_dir.join(figures::IR_SPECTRUM),
        Broadening::Lorentzian,
        args.fwhm_cm,
        &args,
        ("IR Spectrum", "Wavenumber (cm-1)"),
    )? {
        written += 1;
    }

    output::print_done(&format!(
        "Wrote {} spectrum image(s) to '{}'",
        written,
        args.temp_dir.display()
    ));
    Ok(())
}

/// 展宽宽度必须为有限正数
fn validate_widths(args: &SpectraArgs) -> Result<()> {
    for (flag, value) in [("--fwhm-nm", args.fwhm_nm), ("--fwhm-cm", args.fwhm_cm)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ReportError::InvalidArgument(format!(
                "{} must be a positive number, got {}",
                flag, value
            )));
        }
    }
    Ok(())
}

/// 全部激发态记录的谱线
fn uv_sticks(records: &[CalculationRecord]) -> Vec<Stick> {
    records.iter().flat_map(spectrum::uv_sticks).collect()
}

/// 多条频率记录时取最后一条
fn ir_sticks(records: &[CalculationRecord]) -> Vec<Stick> {
    records
        .iter()
        .rev()
        .map(spectrum::ir_sticks)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// 写出一张谱图，已存在且未要求覆盖时跳过，返回是否写出
fn render(
    sticks: &[Stick],
    path: &Path,
    broadening: Broadening,
    fwhm: f64,
    args: &SpectraArgs,
    labels: (&str, &str),
) -> Result<bool> {
    if path.exists() && !args.overwrite {
        output::print_skip(&format!("{} already exists", path.display()));
        return Ok(false);
    }

    let (padding, floor, step) = match broadening {
        Broadening::Gaussian => (UV_PADDING, UV_FLOOR, UV_STEP),
        Broadening::Lorentzian => (IR_PADDING, 0.0, IR_STEP),
    };
    let (min, max) = match spectrum::plot_range(sticks, padding, floor) {
        Some(range) => range,
        None => return Ok(false),
    };

    let curve = spectrum::broaden(sticks, min, max, step, fwhm, broadening);
    let style = SpectrumStyle {
        title: labels.0,
        x_desc: labels.1,
        width: args.width,
        height: args.height,
    };
    spectrum::generate_spectrum_plot(&curve, sticks, path, &style)?;

    output::print_written(labels.0, path);
    Ok(true)
}
