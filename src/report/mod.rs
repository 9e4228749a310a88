//! # 报告组装引擎
//!
//! 由计算记录序列生成报告内容树：任务类型分类、逐段落内容选择、
//! 去重、离群原子筛选和数值格式化。
//!
//! ## 依赖关系
//! ```text
//! assembler.rs
//!   ├── prepare.rs     (任务分类 + 温度归一化)
//!   │     └── jobtype.rs
//!   ├── molecule.rs    1. MOLECULE
//!   ├── details.rs     2. COMPUTATIONAL DETAILS
//!   ├── results.rs     3. RESULTS
//!   │     ├── population.rs (stats.rs)
//!   │     └── excited.rs
//!   ├── figures.rs     4. FIGURES AND SPECTRA
//!   └── coordinates.rs 5. ATOMIC COORDINATES
//! context.rs (dedup.rs + 诊断) 贯穿整个构建过程
//! ```

pub mod assembler;
pub mod context;
pub mod coordinates;
pub mod dedup;
pub mod details;
pub mod excited;
pub mod figures;
pub mod format;
pub mod jobtype;
pub mod molecule;
pub mod population;
pub mod prepare;
pub mod results;
pub mod stats;

#[cfg(test)]
pub mod fixtures;

pub use assembler::{build_report, BuildOptions};
pub use context::{DiagnosticKind, Diagnostics};
