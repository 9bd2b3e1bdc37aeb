//! 情境記憶
//!
//! 各情境的累計統計，只作為遙測資料，不回饋到策略解析。

use replenish_core::UrgencyTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 單一情境的累計統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMemoryEntry {
    /// 出現次數
    pub encounters: u64,

    /// 平均需求（所有記錄值的算術平均）
    pub avg_demand: Decimal,

    /// 最大需求
    pub max_demand: Decimal,

    /// 需求總和
    pub total_demand: Decimal,

    /// 歷次緊急程度（依出現順序）
    pub urgency_history: Vec<UrgencyTier>,
}

impl ScenarioMemoryEntry {
    fn new() -> Self {
        Self {
            encounters: 0,
            avg_demand: Decimal::ZERO,
            max_demand: Decimal::ZERO,
            total_demand: Decimal::ZERO,
            urgency_history: Vec::new(),
        }
    }

    /// 記錄一次出現
    pub fn record(&mut self, demand: Decimal, urgency: UrgencyTier) {
        self.encounters += 1;
        self.total_demand += demand;
        // 由總和重新計算，避免累進誤差
        self.avg_demand = self.total_demand / Decimal::from(self.encounters);
        self.max_demand = self.max_demand.max(demand);
        self.urgency_history.push(urgency);
    }
}

/// 情境記憶表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMemory {
    entries: BTreeMap<String, ScenarioMemoryEntry>,
}

impl ScenarioMemory {
    /// 創建空的情境記憶
    pub fn new() -> Self {
        Self::default()
    }

    /// 記錄情境出現，首次出現時建立條目
    pub fn record(&mut self, scenario: &str, demand: Decimal, urgency: UrgencyTier) -> &ScenarioMemoryEntry {
        let entry = self
            .entries
            .entry(scenario.to_string())
            .or_insert_with(ScenarioMemoryEntry::new);
        entry.record(demand, urgency);
        entry
    }

    /// 查詢情境統計
    pub fn get(&self, scenario: &str) -> Option<&ScenarioMemoryEntry> {
        self.entries.get(scenario)
    }

    /// 已記錄的情境數
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依標籤排序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ScenarioMemoryEntry)> {
        self.entries.iter()
    }

    /// 清除所有記憶
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_entry_creation() {
        let mut memory = ScenarioMemory::new();
        assert!(memory.is_empty());
        assert!(memory.get("Viral_Event").is_none());

        let entry = memory.record("Viral_Event", Decimal::from(500), UrgencyTier::CriticalViralEvent);
        assert_eq!(entry.encounters, 1);
        assert_eq!(entry.avg_demand, Decimal::from(500));
        assert_eq!(entry.max_demand, Decimal::from(500));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_running_statistics() {
        let mut memory = ScenarioMemory::new();

        memory.record("Normal_Operations", Decimal::from(100), UrgencyTier::Normal);
        memory.record("Black_Friday", Decimal::from(900), UrgencyTier::CriticalBlackFriday);
        memory.record("Normal_Operations", Decimal::from(140), UrgencyTier::Normal);
        memory.record("Normal_Operations", Decimal::from(90), UrgencyTier::Normal);

        let normal = memory.get("Normal_Operations").unwrap();
        assert_eq!(normal.encounters, 3);
        assert_eq!(normal.avg_demand, Decimal::from(110));
        assert_eq!(normal.max_demand, Decimal::from(140));
        assert_eq!(normal.urgency_history, vec![UrgencyTier::Normal; 3]);

        let friday = memory.get("Black_Friday").unwrap();
        assert_eq!(friday.encounters, 1);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_average_matches_exact_mean() {
        let mut memory = ScenarioMemory::new();
        let values = [Decimal::from(1), Decimal::from(1), Decimal::from(2)];

        for value in values {
            memory.record("X", value, UrgencyTier::Normal);
        }

        let expected = values.iter().copied().sum::<Decimal>() / Decimal::from(values.len());
        assert_eq!(memory.get("X").unwrap().avg_demand, expected);
    }

    #[test]
    fn test_clear() {
        let mut memory = ScenarioMemory::new();
        memory.record("X", Decimal::ONE, UrgencyTier::Normal);
        memory.clear();
        assert!(memory.is_empty());
    }
}
