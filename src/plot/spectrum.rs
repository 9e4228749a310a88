//! # 光谱图生成
//!
//! 由激发态和振动数据生成报告中引用的光谱图：
//! - UV-可见吸收谱：振子强度在波长 (nm) 上做高斯展宽
//! - IR 谱：红外强度在波数 (cm⁻¹) 上做洛伦兹展宽
//!
//! 曲线归一化到最大值 100，并叠加谱线位置。
//!
//! ## 依赖关系
//! - 被 `commands/spectra.rs` 调用
//! - 使用 `report/format.rs` 的波数换算
//! - 使用 `plotters` 渲染图表

use crate::error::{ReportError, Result};
use crate::models::CalculationRecord;
use crate::report::format::wavenumber_to_nm;

use plotters::prelude::*;
use std::path::Path;

/// 展宽函数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Broadening {
    Gaussian,
    Lorentzian,
}

/// 谱线 (位置, 强度)
pub type Stick = (f64, f64);

/// 展宽后的曲线，采样区间 `[min, max]`，最大值归一化为 100。
/// `step` 或 `fwhm` 不是正数时返回空曲线。
pub fn broaden(
    sticks: &[Stick],
    min: f64,
    max: f64,
    step: f64,
    fwhm: f64,
    broadening: Broadening,
) -> Vec<(f64, f64)> {
    if !(step > 0.0 && fwhm > 0.0) || max < min {
        return Vec::new();
    }
    let n_points = ((max - min) / step).ceil() as usize + 1;
    let mut curve: Vec<(f64, f64)> = (0..n_points).map(|i| (min + i as f64 * step, 0.0)).collect();

    let sigma = fwhm / (2.0 * (2.0 * 2.0_f64.ln()).sqrt());
    let gamma = fwhm / 2.0;

    for &(position, strength) in sticks {
        if strength <= 0.0 {
            continue;
        }
        for (x, y) in curve.iter_mut() {
            let delta = *x - position;
            *y += match broadening {
                Broadening::Gaussian => strength * (-delta * delta / (2.0 * sigma * sigma)).exp(),
                Broadening::Lorentzian => strength * gamma * gamma / (delta * delta + gamma * gamma),
            };
        }
    }

    let max_intensity = curve.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
    if max_intensity > 0.0 {
        for (_, y) in curve.iter_mut() {
            *y = *y * 100.0 / max_intensity;
        }
    }
    curve
}

/// UV 谱线：(波长 nm, 振子强度)
pub fn uv_sticks(record: &CalculationRecord) -> Vec<Stick> {
    let states = match record.results.excited_states.as_ref() {
        Some(s) => s,
        None => return Vec::new(),
    };
    let energies = states.et_energies.as_deref().unwrap_or(&[]);
    let oscillators = states.et_oscillator_strength.as_deref().unwrap_or(&[]);

    energies
        .iter()
        .zip(oscillators)
        .filter_map(|(e, f)| wavenumber_to_nm(*e).map(|nm| (nm, *f)))
        .collect()
}

/// IR 谱线：(波数 cm⁻¹, 强度)，虚频不参与
pub fn ir_sticks(record: &CalculationRecord) -> Vec<Stick> {
    let freq = match record.results.freq.as_ref() {
        Some(f) => f,
        None => return Vec::new(),
    };
    let frequencies = freq.vibrational_freq.as_deref().unwrap_or(&[]);
    let intensities = freq.vibrational_int.as_deref().unwrap_or(&[]);

    frequencies
        .iter()
        .zip(intensities)
        .filter(|(v, _)| **v > 0.0)
        .map(|(v, i)| (*v, *i))
        .collect()
}

/// 谱线位置的绘图范围，两侧各留 `padding`
pub fn plot_range(sticks: &[Stick], padding: f64, floor: f64) -> Option<(f64, f64)> {
    if sticks.is_empty() {
        return None;
    }
    let min = sticks.iter().map(|s| s.0).fold(f64::INFINITY, f64::min);
    let max = sticks.iter().map(|s| s.0).fold(f64::NEG_INFINITY, f64::max);
    Some(((min - padding).max(floor), max + padding))
}

/// 图表外观参数
#[derive(Debug, Clone)]
pub struct SpectrumStyle<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub width: u32,
    pub height: u32,
}

/// 写出 PNG 光谱图
pub fn generate_spectrum_plot(
    curve: &[(f64, f64)],
    sticks: &[Stick],
    output_path: &Path,
    style: &SpectrumStyle,
) -> Result<()> {
    let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
    draw_spectrum(&root, curve, sticks, style)?;
    root.present()
        .map_err(|e| ReportError::PlotError(e.to_string()))?;
    Ok(())
}

/// 绘制展宽曲线和谱线
fn draw_spectrum<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    curve: &[(f64, f64)],
    sticks: &[Stick],
    style: &SpectrumStyle,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| ReportError::PlotError(format!("{:?}", e)))?;

    let x_min = curve.first().map(|(x, _)| *x).unwrap_or(0.0);
    let x_max = curve.last().map(|(x, _)| *x).unwrap_or(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(style.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..110.0)
        .map_err(|e| ReportError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(style.x_desc)
        .y_desc("Relative Intensity (%)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| ReportError::PlotError(format!("{:?}", e)))?;

    // 谱线高度按最强线归一
    let strongest = sticks.iter().map(|s| s.1).fold(0.0_f64, f64::max);
    if strongest > 0.0 {
        let stick_color = RGBColor(200, 60, 60);
        for &(x, y) in sticks {
            if x < x_min || x > x_max {
                continue;
            }
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x, 0.0), (x, y * 100.0 / strongest)],
                    stick_color.stroke_width(1),
                )))
                .map_err(|e| ReportError::PlotError(format!("{:?}", e)))?;
        }
    }

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            curve.iter().map(|(x, y)| (*x, *y)),
            line_color.stroke_width(2),
        ))
        .map_err(|e| ReportError::PlotError(format!("{:?}", e)))?;

    let fill_color = RGBColor(0, 102, 204).mix(0.2);
    chart
        .draw_series(AreaSeries::new(
            curve.iter().map(|(x, y)| (*x, *y)),
            0.0,
            fill_color,
        ))
        .map_err(|e| ReportError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn test_gaussian_half_width() {
        let curve = broaden(&[(300.0, 1.0)], 250.0, 350.0, 0.5, 20.0, Broadening::Gaussian);
        let peak = curve.iter().find(|(x, _)| (*x - 300.0).abs() < 1e-9).unwrap();
        let half = curve.iter().find(|(x, _)| (*x - 310.0).abs() < 1e-9).unwrap();
        assert!((peak.1 - 100.0).abs() < 1e-9);
        assert!((half.1 - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_lorentzian_half_width() {
        let curve = broaden(&[(1600.0, 40.0)], 1500.0, 1700.0, 1.0, 10.0, Broadening::Lorentzian);
        let half = curve.iter().find(|(x, _)| (*x - 1605.0).abs() < 1e-9).unwrap();
        assert!((half.1 - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_width_gives_no_curve() {
        let sticks = [(300.0, 1.0)];
        assert!(broaden(&sticks, 299.0, 301.0, 0.5, 0.0, Broadening::Gaussian).is_empty());
        assert!(broaden(&sticks, 299.0, 301.0, 0.5, -5.0, Broadening::Lorentzian).is_empty());
        assert!(broaden(&sticks, 299.0, 301.0, 0.0, 10.0, Broadening::Gaussian).is_empty());

        let curve = broaden(&sticks, 299.0, 301.0, 0.5, 1e-3, Broadening::Gaussian);
        assert!(curve.iter().all(|(_, y)| y.is_finite()));
    }

    #[test]
    fn test_empty_sticks_give_flat_curve() {
        let curve = broaden(&[], 0.0, 10.0, 1.0, 2.0, Broadening::Gaussian);
        assert_eq!(curve.len(), 11);
        assert!(curve.iter().all(|(_, y)| *y == 0.0));
    }

    #[test]
    fn test_sticks_from_records() {
        let uv = uv_sticks(&fixtures::td_record(2));
        assert_eq!(uv.len(), 2);
        assert!((uv[0].0 - 200.0).abs() < 1e-9);

        let ir = ir_sticks(&fixtures::freq_record(false));
        assert_eq!(ir, vec![(1648.5, 75.2), (3667.1, 4.1), (3765.7, 41.6)]);
        assert!(uv_sticks(&fixtures::base_record()).is_empty());
    }

    #[test]
    fn test_plot_range_respects_floor() {
        assert_eq!(plot_range(&[(120.0, 1.0), (300.0, 1.0)], 150.0, 0.0), Some((0.0, 450.0)));
        assert!(plot_range(&[], 10.0, 0.0).is_none());
    }
}
