//! # 元素周期表
//!
//! 原子序数与元素符号的互相查找。
//!
//! ## 依赖关系
//! - 被 `report/coordinates.rs`, `report/population.rs` 使用
//! - 纯静态数据，无外部依赖

/// 元素符号，下标为原子序数 - 1
static SYMBOLS: [&str; 118] = [
    "H", "He", // 第 1 周期
    "Li", "Be", "B", "C", "N", "O", "F", "Ne", // 第 2 周期
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", // 第 3 周期
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se",
    "Br", "Kr", // 第 4 周期
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te",
    "I", "Xe", // 第 5 周期
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At",
    "Rn", // 第 6 周期
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No",
    "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts",
    "Og", // 第 7 周期
];

/// 由原子序数获取元素符号
pub fn element_symbol(atomic_number: u32) -> Option<&'static str> {
    let index = (atomic_number as usize).checked_sub(1)?;
    SYMBOLS.get(index).copied()
}

/// 原子标签，例如 `O1`；未知原子序数记为 `X`
pub fn atom_label(atomic_number: u32, index: usize) -> String {
    format!("{}{}", element_symbol(atomic_number).unwrap_or("X"), index + 1)
}
