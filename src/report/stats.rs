//! # 统计离群值选择
//!
//! 计算总体均值 μ 和总体标准差 σ，选出严格落在 μ ± σ 区间之外的条目，
//! 用于在电荷/Fukui 表中只展示“显著”原子。
//!
//! ## 依赖关系
//! - 被 `report/population.rs` 调用
//! - 无外部模块依赖

use std::cmp::Ordering;

/// 带标签的数值
pub type Labeled<L> = (L, f64);

/// 总体均值与总体标准差；空输入返回 `None`
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

/// 选出低于 μ − σ 和高于 μ + σ 的条目，两组均按数值升序排列
///
/// 标签与数值按位置配对，长度不一致时以较短者为准。
pub fn select_outliers<L: Clone>(values: &[f64], labels: &[L]) -> (Vec<Labeled<L>>, Vec<Labeled<L>>) {
    let n = values.len().min(labels.len());
    let values = &values[..n];

    let (mean, std) = match mean_std(values) {
        Some(stats) => stats,
        None => return (Vec::new(), Vec::new()),
    };

    let mut low = Vec::new();
    let mut high = Vec::new();
    for (label, &value) in labels.iter().zip(values) {
        if value < mean - std {
            low.push((label.clone(), value));
        } else if value > mean + std {
            high.push((label.clone(), value));
        }
    }

    sort_ascending(&mut low);
    sort_ascending(&mut high);
    (low, high)
}

fn sort_ascending<L>(entries: &mut [Labeled<L>]) {
    entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
}
