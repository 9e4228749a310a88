//! # 图片与光谱段落
//!
//! 图片由外部渲染工具预先写入临时目录，按约定文件名引用；是否插入
//! 只取决于文件是否存在，而不是数据是否存在。
//!
//! 每个图位包含一到两个物理量，每个物理量有主视角和备用视角两个候选
//! 文件，取第一个存在的：
//! - 两个物理量都找到 ⇒ 双栏图
//! - 只找到一个 ⇒ 单栏图
//! - 都没有 ⇒ 跳过并记录诊断，不视为错误
//!
//! 模式限制：`text` 模式不含前线轨道图；Fukui、静电势和密度差图
//! 只在 `full` 模式下出现。
//!
//! ## 依赖关系
//! - 被 `report/molecule.rs`, `report/assembler.rs` 调用
//! - 使用 `report/excited.rs` 选出的激发态

use crate::models::{ContentBlock, FigureBlock};
use crate::report::context::{BuildContext, DiagnosticKind};
use crate::report::excited;
use crate::report::jobtype::JobType;
use crate::report::prepare::ReportData;

use std::path::PathBuf;

pub const TOPOLOGY: &str = "img-TOPOLOGY.png";
pub const TOPOLOGY_CAM2: &str = "img-TOPOLOGY_cam2.png";
pub const MO_HOMO: &str = "img-MO-homo.png";
pub const MO_LUMO: &str = "img-MO-lumo.png";
pub const MEP: &str = "img-MEP.png";
pub const FUKUI_PLUS: &str = "img-FUKUI-plus.png";
pub const FUKUI_MINUS: &str = "img-FUKUI-minus.png";
pub const FUKUI_DUAL: &str = "img-FUKUI-dual.png";
pub const UV_SPECTRUM: &str = "img-UV-Abso-Spectrum.png";
pub const CD_SPECTRUM: &str = "img-CD-Spectrum.png";
pub const IR_SPECTRUM: &str = "img-IR-Spectrum.png";

/// 备用视角文件名：`img-X.png` → `img-X_cam2.png`
pub fn camera_two(name: &str) -> String {
    match name.strip_suffix(".png") {
        Some(stem) => format!("{}_cam2.png", stem),
        None => format!("{}_cam2", name),
    }
}

/// 密度差图文件名（激发态编号从 1 开始）
pub fn density_difference(state: usize) -> String {
    format!("img-EDD-S{}.png", state)
}

/// 一个物理量的候选文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub primary: String,
    pub alternate: Option<String>,
}

impl Quantity {
    /// 只有一个候选文件
    pub fn single(name: impl Into<String>) -> Self {
        Quantity {
            primary: name.into(),
            alternate: None,
        }
    }

    /// 主视角 + `_cam2` 备用视角
    pub fn with_camera_two(name: &str) -> Self {
        Quantity {
            primary: name.to_string(),
            alternate: Some(camera_two(name)),
        }
    }

    fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.alternate.as_deref())
    }
}

/// 图位
#[derive(Debug, Clone)]
pub struct FigureSlot {
    pub quantities: Vec<Quantity>,
    pub caption: String,
}

impl FigureSlot {
    pub fn new(quantities: Vec<Quantity>, caption: impl Into<String>) -> Self {
        FigureSlot {
            quantities,
            caption: caption.into(),
        }
    }
}

/// 按文件存在情况解析图位
pub fn resolve(slot: &FigureSlot, ctx: &mut BuildContext) -> Option<FigureBlock> {
    let mut images: Vec<PathBuf> = Vec::new();
    let mut missing: Vec<&str> = Vec::new();

    for quantity in &slot.quantities {
        let found = quantity
            .candidates()
            .map(|name| ctx.temp_dir().join(name))
            .find(|path| path.is_file());
        match found {
            Some(path) => images.push(path),
            None => missing.push(&quantity.primary),
        }
    }

    if images.is_empty() {
        ctx.warn(
            DiagnosticKind::MissingFigureAsset,
            format!("figure skipped, no image found for {}", missing.join(", ")),
        );
        return None;
    }
    if !missing.is_empty() {
        ctx.warn(
            DiagnosticKind::MissingFigureAsset,
            format!("figure reduced to one column, missing {}", missing.join(", ")),
        );
    }

    let number = ctx.next_figure_number();
    Some(FigureBlock {
        images,
        caption: format!("Figure {}: {}", number, slot.caption),
    })
}

/// 分子结构图（两个视角）
pub fn topology_slot() -> FigureSlot {
    FigureSlot::new(
        vec![Quantity::single(TOPOLOGY), Quantity::single(TOPOLOGY_CAM2)],
        "Chemical structure diagram with atomic numbering from two points of view.",
    )
}

/// 构建图片与光谱段落内容（不含标题）
pub fn build(data: &ReportData, ctx: &mut BuildContext) -> Vec<ContentBlock> {
    let mut slots: Vec<FigureSlot> = Vec::new();

    if !ctx.mode.is_text() {
        slots.push(FigureSlot::new(
            vec![
                Quantity::with_camera_two(MO_HOMO),
                Quantity::with_camera_two(MO_LUMO),
            ],
            "Representation of the frontier molecular orbitals: HOMO (left) and LUMO (right).",
        ));
    }

    if ctx.mode.is_full() {
        slots.push(FigureSlot::new(
            vec![Quantity::with_camera_two(MEP)],
            "Molecular electrostatic potential mapped on the electron density.",
        ));
        slots.push(FigureSlot::new(
            vec![
                Quantity::with_camera_two(FUKUI_PLUS),
                Quantity::with_camera_two(FUKUI_MINUS),
            ],
            "Fukui functions for nucleophilic (left) and electrophilic (right) attacks.",
        ));
        slots.push(FigureSlot::new(
            vec![Quantity::with_camera_two(FUKUI_DUAL)],
            "Dual descriptor of the Fukui function.",
        ));

        if let Some(td) = data.last_with(JobType::Td) {
            for state in excited::selected_state_numbers(td.record) {
                slots.push(FigureSlot::new(
                    vec![Quantity::with_camera_two(&density_difference(state))],
                    format!(
                        "Electron density difference between excited state {} and the ground state.",
                        state
                    ),
                ));
            }
        }
    }

    if data.any_with(JobType::Td) {
        slots.push(FigureSlot::new(
            vec![Quantity::single(UV_SPECTRUM)],
            "Calculated UV-visible absorption spectrum.",
        ));
        let has_rotatory = data
            .records
            .iter()
            .filter(|r| r.has(JobType::Td))
            .any(|r| {
                r.record
                    .results
                    .excited_states
                    .as_ref()
                    .map(|e| e.et_rot.is_some())
                    .unwrap_or(false)
            });
        if has_rotatory {
            slots.push(FigureSlot::new(
                vec![Quantity::single(CD_SPECTRUM)],
                "Calculated electronic circular dichroism spectrum.",
            ));
        }
    }

    if data.any_with(JobType::Freq) {
        slots.push(FigureSlot::new(
            vec![Quantity::single(IR_SPECTRUM)],
            "Calculated infrared spectrum.",
        ));
    }

    slots
        .iter()
        .filter_map(|slot| resolve(slot, ctx))
        .map(ContentBlock::Figure)
        .collect()
}
