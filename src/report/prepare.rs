//! # 记录预处理
//!
//! 为每条记录计算任务类型集合，并把温度字段统一为序列（标量视为单值，
//! 缺失视为空序列）。结果是派生副本，调用方的记录保持不变。
//!
//! ## 依赖关系
//! - 被 `report/assembler.rs` 调用
//! - 使用 `report/jobtype.rs`, `report/context.rs`

use crate::error::{ReportError, Result};
use crate::models::CalculationRecord;
use crate::report::context::{DiagnosticKind, Diagnostics};
use crate::report::jobtype::{classify, JobType, JobTypeSet};

/// 预处理后的记录
#[derive(Debug, Clone)]
pub struct PreparedRecord<'a> {
    /// 在输入序列中的位置
    pub index: usize,
    pub record: &'a CalculationRecord,
    pub job_types: JobTypeSet,
    /// 归一化后的温度序列 (K)
    pub temperatures: Vec<f64>,
}

impl<'a> PreparedRecord<'a> {
    pub fn new(index: usize, record: &'a CalculationRecord) -> Self {
        let temperatures = record
            .comp_details
            .freq
            .as_ref()
            .and_then(|f| f.temperature.as_ref())
            .map(|t| t.values())
            .unwrap_or_default();

        PreparedRecord {
            index,
            record,
            job_types: classify(record),
            temperatures,
        }
    }

    pub fn has(&self, job: JobType) -> bool {
        self.job_types.contains(job)
    }
}

/// 一次构建的全部输入记录
#[derive(Debug, Clone)]
pub struct ReportData<'a> {
    pub records: Vec<PreparedRecord<'a>>,
}

impl<'a> ReportData<'a> {
    /// 预处理记录序列；没有任务类型的记录记入诊断
    pub fn prepare(records: &'a [CalculationRecord], diagnostics: &mut Diagnostics) -> Result<Self> {
        if records.is_empty() {
            return Err(ReportError::NoRecords);
        }

        let records: Vec<PreparedRecord<'a>> = records
            .iter()
            .enumerate()
            .map(|(i, r)| PreparedRecord::new(i, r))
            .collect();

        for prepared in &records {
            if prepared.job_types.is_empty() {
                diagnostics.push(
                    DiagnosticKind::UnmatchedJobType,
                    format!(
                        "record #{} matches no known job type and contributes no job-specific content",
                        prepared.index
                    ),
                );
            }
        }

        Ok(ReportData { records })
    }

    /// 参考记录（序列中最后一条）
    pub fn reference(&self) -> &PreparedRecord<'a> {
        // prepare() 保证非空
        &self.records[self.records.len() - 1]
    }

    /// 最后一条带指定标签的记录
    pub fn last_with(&self, job: JobType) -> Option<&PreparedRecord<'a>> {
        self.records.iter().rev().find(|r| r.has(job))
    }

    pub fn any_with(&self, job: JobType) -> bool {
        self.records.iter().any(|r| r.has(job))
    }
}
