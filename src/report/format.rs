//! # 数值格式化
//!
//! 报告中各物理量的统一格式（能量、轨道能、收敛阈值、波长……）。
//!
//! ## 依赖关系
//! - 被 `report/` 各构建器使用
//! - 无外部模块依赖

/// 缺失数据占位符
pub const NOT_AVAILABLE: &str = "N/A";

/// 波数 (cm⁻¹) 与波长 (nm) 的换算常数
pub const WAVENUMBER_TO_NM: f64 = 1.0e7;

/// 固定小数位
pub fn fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// 能量 (hartree)，5 位小数
pub fn hartrees(value: f64) -> String {
    format!("{:.5} hartrees", value)
}

/// 轨道能 (eV)，2 位小数
pub fn electron_volts(value: f64) -> String {
    format!("{:.2} eV", value)
}

/// 可选轨道能，缺失时为 `N/A`
pub fn electron_volts_or_na(value: Option<f64>) -> String {
    value.map(electron_volts).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// 温度 (K)，2 位小数
pub fn kelvin(value: f64) -> String {
    format!("{:.2} K", value)
}

/// 收敛阈值等小量：常规量级直接输出，过小或过大时用科学计数法
pub fn compact(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-4..1e6).contains(&magnitude) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}

/// 布尔值
pub fn flag(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

/// InChI 中最后一个 `=` 之后的部分
pub fn inchi_payload(inchi: &str) -> &str {
    inchi.trim_end().rsplit('=').next().unwrap_or("")
}

/// 波数 (cm⁻¹) 转波长 (nm)，非正波数没有对应波长
pub fn wavenumber_to_nm(wavenumber: f64) -> Option<f64> {
    (wavenumber > 0.0).then(|| WAVENUMBER_TO_NM / wavenumber)
}

/// 相对 HOMO 的轨道名称，例如 `HOMO-1`、`LUMO+2`
pub fn orbital_name(index: usize, homo: usize) -> String {
    let lumo = homo + 1;
    if index == homo {
        "HOMO".to_string()
    } else if index < homo {
        format!("HOMO-{}", homo - index)
    } else if index == lumo {
        "LUMO".to_string()
    } else {
        format!("LUMO+{}", index - lumo)
    }
}
