//! # 计算记录数据模型
//!
//! 一条记录对应一个计算任务（几何优化、频率分析、含时激发态……），
//! 字段名与外部解析器输出的 JSON 保持一致。
//!
//! 除少数每份报告必需的字段外，所有字段都是 `Option`：缺失即省略对应
//! 的行或表格。必需字段通过 [`require`] 读取，缺失时返回
//! `ReportError::MissingField`。
//!
//! ## 依赖关系
//! - 被 `parsers/record.rs` 反序列化
//! - 被 `report/` 各段落构建器只读使用

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// 读取必需字段，缺失时返回带字段路径和记录序号的错误
pub fn require<T>(value: Option<T>, field: &str, record: usize) -> Result<T> {
    value.ok_or_else(|| ReportError::missing(field, record))
}

/// 单个计算任务
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationRecord {
    pub molecule: Molecule,
    pub comp_details: CompDetails,
    pub results: Results,
}

impl CalculationRecord {
    /// 波函数结果
    pub fn wavefunction(&self) -> Option<&Wavefunction> {
        self.results.wavefunction.as_ref()
    }

    /// 是否为非限制性计算（两组 HOMO 序号）
    pub fn is_unrestricted(&self) -> bool {
        self.wavefunction()
            .and_then(|w| w.homo_indexes.as_ref())
            .map(|h| h.len() == 2)
            .unwrap_or(false)
    }

    /// 程序名称
    pub fn package(&self) -> Option<&str> {
        self.comp_details.general.package.as_deref()
    }

    /// 最后一步几何收敛值
    pub fn final_geometric_values(&self) -> Option<&[f64]> {
        self.results
            .geometry
            .as_ref()
            .and_then(|g| g.geometric_values.as_ref())
            .and_then(|v| v.last())
            .map(|v| v.as_slice())
    }

    /// 几何收敛阈值
    pub fn geometric_targets(&self) -> Option<&[f64]> {
        self.comp_details
            .geometry
            .as_ref()
            .and_then(|g| g.geometric_targets.as_ref())
            .map(|v| v.as_slice())
    }
}

// ─────────────────────────────────────────────────────────────
// 分子信息
// ─────────────────────────────────────────────────────────────

/// 分子信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Molecule {
    pub formula: Option<String>,
    pub charge: Option<i32>,
    pub multiplicity: Option<u32>,
    /// 单同位素质量 (Da)
    pub monoisotopic_mass: Option<f64>,
    pub inchi: Option<String>,
    #[serde(rename = "smi")]
    pub smiles: Option<String>,
    /// 原子序数
    #[serde(rename = "atoms_Z")]
    pub atomic_numbers: Option<Vec<u32>>,
}

// ─────────────────────────────────────────────────────────────
// 计算细节
// ─────────────────────────────────────────────────────────────

/// 计算参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompDetails {
    pub general: GeneralDetails,
    pub geometry: Option<GeometryDetails>,
    pub freq: Option<FreqDetails>,
    pub excited_states: Option<ExcitedStateDetails>,
}

/// 通用计算参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralDetails {
    pub package: Option<String>,
    pub package_version: Option<String>,
    pub last_theory: Option<String>,
    pub functional: Option<String>,
    pub basis_set_name: Option<String>,
    pub basis_set_size: Option<u32>,
    pub is_closed_shell: Option<bool>,
    pub integration_grid: Option<String>,
    pub solvent: Option<String>,
    /// 每个 SCF 步骤的收敛目标
    pub scf_targets: Option<Vec<Vec<f64>>>,
}

/// 几何优化参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryDetails {
    pub geometric_targets: Option<Vec<f64>>,
}

/// 温度：可以是单个值或温度序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Single(f64),
    Series(Vec<f64>),
}

impl Temperature {
    /// 统一为温度序列
    pub fn values(&self) -> Vec<f64> {
        match self {
            Temperature::Single(t) => vec![*t],
            Temperature::Series(ts) => ts.clone(),
        }
    }
}

/// 频率分析参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FreqDetails {
    pub temperature: Option<Temperature>,
    pub anharmonicity: Option<bool>,
}

/// 激发态计算参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcitedStateDetails {
    pub nb_et_states: Option<u32>,
    /// 激发态几何优化的目标态
    pub et_opt: Option<u32>,
}

// ─────────────────────────────────────────────────────────────
// 计算结果
// ─────────────────────────────────────────────────────────────

/// 计算结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Results {
    pub wavefunction: Option<Wavefunction>,
    pub geometry: Option<GeometryResults>,
    pub freq: Option<FreqResults>,
    pub excited_states: Option<ExcitedStateResults>,
}

/// 波函数相关结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wavefunction {
    /// 总能量 (hartree)
    pub total_molecular_energy: Option<f64>,
    /// 分子轨道能量 (eV)，非限制性计算有两组
    #[serde(rename = "MO_energies")]
    pub mo_energies: Option<Vec<Vec<f64>>>,
    /// HOMO 序号（从 0 开始）
    pub homo_indexes: Option<Vec<usize>>,

    // 概念 DFT 指标
    #[serde(rename = "A")]
    pub electron_affinity: Option<f64>,
    #[serde(rename = "I")]
    pub ionisation_potential: Option<f64>,
    #[serde(rename = "Khi")]
    pub electronegativity: Option<f64>,
    #[serde(rename = "Eta")]
    pub hardness: Option<f64>,
    #[serde(rename = "Omega")]
    pub electrophilicity: Option<f64>,
    #[serde(rename = "DeltaN")]
    pub electron_flow: Option<f64>,

    // 布居分析
    #[serde(rename = "Mulliken_partial_charges")]
    pub mulliken_charges: Option<Vec<f64>>,
    #[serde(rename = "Hirshfeld_partial_charges")]
    pub hirshfeld_charges: Option<Vec<f64>>,
    #[serde(rename = "CM5_partial_charges")]
    pub cm5_charges: Option<Vec<f64>>,

    // 缩并 Fukui 函数
    #[serde(rename = "Mulliken_Fukui")]
    pub mulliken_fukui: Option<FukuiDescriptors>,
    #[serde(rename = "Hirshfeld_Fukui")]
    pub hirshfeld_fukui: Option<FukuiDescriptors>,
}

/// 缩并 Fukui 函数与双描述符
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FukuiDescriptors {
    pub f_plus: Vec<f64>,
    pub f_minus: Vec<f64>,
    pub dual: Vec<f64>,
}

/// 几何优化结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryResults {
    /// 每个优化步骤的收敛值
    pub geometric_values: Option<Vec<Vec<f64>>>,
    pub nuclear_repulsion_energy_from_xyz: Option<f64>,
    /// 收敛后的笛卡尔坐标 (Å)，按原子依次排列 x, y, z
    #[serde(rename = "elements_3D_coords_converged")]
    pub converged_coords: Option<Vec<f64>>,
}

/// 频率与热化学结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FreqResults {
    /// 振动频率 (cm⁻¹)
    pub vibrational_freq: Option<Vec<f64>>,
    /// 红外强度 (km/mol)
    pub vibrational_int: Option<Vec<f64>>,
    pub zero_point_energy: Option<f64>,
    pub electronic_thermal_energy: Option<f64>,
    pub enthalpy: Option<f64>,
    pub free_energy: Option<f64>,
    pub entropy: Option<f64>,
}

/// 轨道引用 `[序号, 自旋]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitalRef(pub usize, pub usize);

/// 单电子激发分量 `[[起始轨道, 自旋], [目标轨道, 自旋], CI 系数]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionComponent(pub OrbitalRef, pub OrbitalRef, pub f64);

/// 激发态结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcitedStateResults {
    /// 激发能 (cm⁻¹)
    pub et_energies: Option<Vec<f64>>,
    pub et_oscillator_strength: Option<Vec<f64>>,
    /// 旋转强度
    pub et_rot: Option<Vec<f64>>,
    pub et_sym: Option<Vec<String>>,
    pub et_transitions: Option<Vec<Vec<TransitionComponent>>>,
}
