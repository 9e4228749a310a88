//! # 去重守卫
//!
//! 同一次构建内按主题记录已输出的内容，防止多条带 `OPT` 标签的记录
//! （例如单独的 OPT 任务和 OPT+FREQ 组合任务）重复输出几何优化内容。
//! 每次构建新建一个实例，不跨构建共享。
//!
//! ## 依赖关系
//! - 被 `report/context.rs` 持有
//! - 无外部模块依赖

use std::collections::BTreeSet;

/// 几何优化参数块
pub const OPT_PARAMS: &str = "opt_params";

/// 几何优化结果块
pub const OPT_RESULTS: &str = "opt_results";

/// 去重状态
#[derive(Debug, Clone, Default)]
pub struct DedupState {
    emitted: BTreeSet<String>,
}

impl DedupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_been_emitted(&self, topic: &str) -> bool {
        self.emitted.contains(topic)
    }

    pub fn mark_emitted(&mut self, topic: &str) {
        self.emitted.insert(topic.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_are_independent() {
        let mut state = DedupState::new();
        assert!(!state.has_been_emitted(OPT_PARAMS));

        state.mark_emitted(OPT_PARAMS);
        assert!(state.has_been_emitted(OPT_PARAMS));
        assert!(!state.has_been_emitted(OPT_RESULTS));
    }

    #[test]
    fn test_fresh_state_per_build() {
        let mut first = DedupState::new();
        first.mark_emitted(OPT_RESULTS);
        let second = DedupState::new();
        assert!(!second.has_been_emitted(OPT_RESULTS));
    }
}
