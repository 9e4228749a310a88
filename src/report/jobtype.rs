//! # 任务类型分类
//!
//! 根据记录中存在的计算参数/结果推断任务类型标签：
//! - `OPT`: 存在几何收敛阈值
//! - `FREQ`: 存在频率参数或振动频率
//! - `TD`: 存在激发态参数或激发能
//! - `OPT_ES`: 存在激发态优化标记
//!
//! 下游一律用 `contains` 判断，一条 `{FREQ, OPT, TD}` 记录同时满足
//! 所有针对单个标签的条件。
//!
//! ## 依赖关系
//! - 被 `report/prepare.rs` 调用
//! - 使用 `models/record.rs`

use crate::models::CalculationRecord;

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// 任务类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum JobType {
    #[serde(rename = "OPT")]
    Opt,
    #[serde(rename = "FREQ")]
    Freq,
    #[serde(rename = "TD")]
    Td,
    #[serde(rename = "OPT_ES")]
    OptEs,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::Opt => write!(f, "OPT"),
            JobType::Freq => write!(f, "FREQ"),
            JobType::Td => write!(f, "TD"),
            JobType::OptEs => write!(f, "OPT_ES"),
        }
    }
}

/// 任务类型集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobTypeSet(BTreeSet<JobType>);

impl JobTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, job: JobType) {
        self.0.insert(job);
    }

    pub fn contains(&self, job: JobType) -> bool {
        self.0.contains(&job)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<JobType> for JobTypeSet {
    fn from_iter<I: IntoIterator<Item = JobType>>(iter: I) -> Self {
        JobTypeSet(iter.into_iter().collect())
    }
}

impl fmt::Display for JobTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "none");
        }
        let tags: Vec<String> = self.0.iter().map(|j| j.to_string()).collect();
        write!(f, "{}", tags.join("+"))
    }
}

/// 推断记录的任务类型
pub fn classify(record: &CalculationRecord) -> JobTypeSet {
    let mut tags = JobTypeSet::new();
    let details = &record.comp_details;
    let results = &record.results;

    let has_targets = details
        .geometry
        .as_ref()
        .and_then(|g| g.geometric_targets.as_ref())
        .map(|t| !t.is_empty())
        .unwrap_or(false);
    if has_targets {
        tags.insert(JobType::Opt);
    }

    let has_frequencies = results
        .freq
        .as_ref()
        .and_then(|f| f.vibrational_freq.as_ref())
        .map(|f| !f.is_empty())
        .unwrap_or(false);
    if details.freq.is_some() || has_frequencies {
        tags.insert(JobType::Freq);
    }

    let has_excitations = results
        .excited_states
        .as_ref()
        .and_then(|e| e.et_energies.as_ref())
        .map(|e| !e.is_empty())
        .unwrap_or(false);
    if details.excited_states.is_some() || has_excitations {
        tags.insert(JobType::Td);
    }

    let has_es_marker = details
        .excited_states
        .as_ref()
        .map(|e| e.et_opt.is_some())
        .unwrap_or(false);
    if has_es_marker {
        tags.insert(JobType::OptEs);
    }

    tags
}
