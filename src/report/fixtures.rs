//! 测试用计算记录（水分子，Gaussian）

use crate::models::CalculationRecord;
use serde_json::{json, Value};

/// 从 JSON 构造记录
pub fn record(value: Value) -> CalculationRecord {
    serde_json::from_value(value).unwrap()
}

/// 含全部必需字段的单点计算
pub fn base_json() -> Value {
    json!({
        "molecule": {
            "formula": "H2O",
            "charge": 0,
            "multiplicity": 1,
            "monoisotopic_mass": 18.0105646863,
            "inchi": "InChI=1S/H2O/h1H2",
            "smi": "O",
            "atoms_Z": [8, 1, 1]
        },
        "comp_details": {
            "general": {
                "package": "Gaussian",
                "package_version": "16revisionC.01",
                "last_theory": "DFT",
                "functional": "B3LYP",
                "basis_set_name": "6-31G(d)",
                "basis_set_size": 19,
                "is_closed_shell": true,
                "scf_targets": [[1e-6, 1e-4, 1e-5], [1e-8, 1e-6, 1e-6]]
            }
        },
        "results": {
            "wavefunction": {
                "total_molecular_energy": -76.40895,
                "MO_energies": [[-520.15, -27.01, -13.92, -9.63, -7.41, 1.93, 3.22]],
                "homo_indexes": [4]
            },
            "geometry": {
                "elements_3D_coords_converged": [
                    0.0, 0.0, 0.1173,
                    0.0, 0.7572, -0.4692,
                    0.0, -0.7572, -0.4692
                ]
            }
        }
    })
}

pub fn base_record() -> CalculationRecord {
    record(base_json())
}

fn add_opt(value: &mut Value, variant: usize) {
    let final_values = if variant == 0 {
        json!([0.000156, 0.000101, 0.000578, 0.000550])
    } else {
        json!([0.000012, 0.000008, 0.000045, 0.000030])
    };
    value["comp_details"]["geometry"] = json!({
        "geometric_targets": [0.00045, 0.0003, 0.0018, 0.0012]
    });
    value["results"]["geometry"]["geometric_values"] =
        json!([[0.0213, 0.0120, 0.0531, 0.0301], final_values]);
    value["results"]["geometry"]["nuclear_repulsion_energy_from_xyz"] = json!(9.1 + variant as f64);
}

fn add_freq(value: &mut Value) {
    value["comp_details"]["freq"] = json!({"temperature": 298.15, "anharmonicity": false});
    value["results"]["freq"] = json!({
        "vibrational_freq": [1648.5, 3667.1, 3765.7],
        "vibrational_int": [75.2, 4.1, 41.6],
        "zero_point_energy": -76.38743,
        "electronic_thermal_energy": -76.38460,
        "enthalpy": -76.38366,
        "free_energy": -76.40507,
        "entropy": 0.0000718
    });
}

/// 几何优化任务；`variant` 区分最终收敛值
pub fn opt_record(variant: usize) -> CalculationRecord {
    let mut value = base_json();
    add_opt(&mut value, variant);
    record(value)
}

/// 频率任务，`with_opt` 时为 OPT+FREQ 组合任务
pub fn freq_record(with_opt: bool) -> CalculationRecord {
    let mut value = base_json();
    if with_opt {
        add_opt(&mut value, 1);
    }
    add_freq(&mut value);
    record(value)
}

/// 含 `n` 个激发态的 TD 任务
pub fn td_json(n: usize) -> Value {
    let mut value = base_json();
    let energies: Vec<f64> = (0..n).map(|i| 50000.0 + 2500.0 * i as f64).collect();
    let oscillators: Vec<f64> = (0..n).map(|i| if i % 7 == 6 { 0.25 } else { 0.01 }).collect();
    let rotatory: Vec<f64> = (0..n).map(|i| if i % 9 == 8 { -15.0 } else { 1.5 }).collect();
    let symmetries: Vec<&str> = (0..n)
        .map(|i| if i % 2 == 0 { "Singlet-A1" } else { "Singlet-B2" })
        .collect();
    let transitions: Vec<Value> = (0..n)
        .map(|_| json!([[[4, 0], [5, 0], 0.68], [[3, 0], [5, 0], 0.12], [[4, 0], [6, 0], 0.05]]))
        .collect();

    value["comp_details"]["excited_states"] = json!({"nb_et_states": n});
    value["results"]["excited_states"] = json!({
        "et_energies": energies,
        "et_oscillator_strength": oscillators,
        "et_rot": rotatory,
        "et_sym": symmetries,
        "et_transitions": transitions
    });
    value
}

pub fn td_record(n: usize) -> CalculationRecord {
    record(td_json(n))
}

/// 参考记录附带指定的布居分析电荷
pub fn population_record(
    mulliken: Option<Vec<f64>>,
    hirshfeld: Option<Vec<f64>>,
    cm5: Option<Vec<f64>>,
) -> CalculationRecord {
    let mut value = base_json();
    value["molecule"]["atoms_Z"] = json!([8, 6, 1, 1]);
    if let Some(m) = mulliken {
        value["results"]["wavefunction"]["Mulliken_partial_charges"] = json!(m);
    }
    if let Some(h) = hirshfeld {
        value["results"]["wavefunction"]["Hirshfeld_partial_charges"] = json!(h);
    }
    if let Some(c) = cm5 {
        value["results"]["wavefunction"]["CM5_partial_charges"] = json!(c);
    }
    record(value)
}
