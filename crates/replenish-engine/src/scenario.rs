//! 情境參數調整表
//!
//! 情境標籤以子字串比對有序規則表，第一條命中的規則生效；
//! 皆未命中時使用一般營運策略。未知情境不是錯誤。

use replenish_core::{InventoryState, ScenarioPolicy, UrgencyTier};
use rust_decimal::Decimal;

/// 一般營運的策略說明
const DEFAULT_STRATEGY_NOTE: &str = "Standard operations";

/// 再訂購量調整方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityAdjustment {
    /// 乘上係數
    Scale(Decimal),
    /// 乘上係數後不超過訂單上限
    ScaleCapped(Decimal),
}

impl QuantityAdjustment {
    /// 計算調整後的再訂購量
    pub fn apply(&self, base_quantity: Decimal, max_order_size: Decimal) -> Decimal {
        match *self {
            QuantityAdjustment::Scale(factor) => base_quantity * factor,
            QuantityAdjustment::ScaleCapped(factor) => (base_quantity * factor).min(max_order_size),
        }
    }
}

/// 情境規則：(比對條件, 策略)
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRule {
    /// 任一關鍵字出現在標籤中即命中
    pub keywords: Vec<&'static str>,

    /// 再訂購點係數
    pub reorder_point_factor: Decimal,

    /// 再訂購量調整
    pub quantity: QuantityAdjustment,

    /// 緊急程度
    pub urgency_tier: UrgencyTier,

    /// 策略說明
    pub strategy_note: &'static str,
}

impl ScenarioRule {
    /// 檢查標籤是否命中此規則（區分大小寫）
    pub fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|keyword| label.contains(keyword))
    }

    /// 依基準庫存參數推導策略
    pub fn apply(&self, inventory: &InventoryState) -> ScenarioPolicy {
        ScenarioPolicy {
            reorder_point: inventory.base_reorder_point * self.reorder_point_factor,
            reorder_quantity: self
                .quantity
                .apply(inventory.base_reorder_quantity, inventory.max_order_size),
            urgency_tier: self.urgency_tier,
            strategy_note: self.strategy_note.to_string(),
        }
    }
}

/// 有序情境規則表
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioTable {
    rules: Vec<ScenarioRule>,
}

impl ScenarioTable {
    /// 以自訂規則建立規則表（順序即優先權）
    pub fn new(rules: Vec<ScenarioRule>) -> Self {
        Self { rules }
    }

    /// 標準規則表
    pub fn standard() -> Self {
        Self::new(vec![
            ScenarioRule {
                keywords: vec!["Viral", "Celebrity"],
                reorder_point_factor: Decimal::new(25, 1),
                quantity: QuantityAdjustment::ScaleCapped(Decimal::from(3)),
                urgency_tier: UrgencyTier::CriticalViralEvent,
                strategy_note: "Preparing for viral demand spike - maximizing availability",
            },
            ScenarioRule {
                keywords: vec!["Black_Friday"],
                reorder_point_factor: Decimal::from(3),
                quantity: QuantityAdjustment::ScaleCapped(Decimal::from(4)),
                urgency_tier: UrgencyTier::CriticalBlackFriday,
                strategy_note: "Black Friday preparation - ensuring maximum stock availability",
            },
            ScenarioRule {
                keywords: vec!["Supply_Chain_Disruption"],
                reorder_point_factor: Decimal::new(18, 1),
                quantity: QuantityAdjustment::Scale(Decimal::new(7, 1)),
                urgency_tier: UrgencyTier::CautionSupplyIssues,
                strategy_note: "Supply chain disruption - smaller orders to reduce risk",
            },
            ScenarioRule {
                keywords: vec!["Economic_Downturn"],
                reorder_point_factor: Decimal::new(7, 1),
                quantity: QuantityAdjustment::Scale(Decimal::new(6, 1)),
                urgency_tier: UrgencyTier::ConservativeEconomicRisk,
                strategy_note: "Economic downturn - minimizing inventory investment",
            },
            ScenarioRule {
                keywords: vec!["Competitor_Stockout"],
                reorder_point_factor: Decimal::new(15, 1),
                quantity: QuantityAdjustment::ScaleCapped(Decimal::from(2)),
                urgency_tier: UrgencyTier::OpportunityMarketCapture,
                strategy_note: "Competitor stockout - capturing increased market share",
            },
            ScenarioRule {
                keywords: vec!["Post_Holiday"],
                reorder_point_factor: Decimal::new(5, 1),
                quantity: QuantityAdjustment::Scale(Decimal::new(4, 1)),
                urgency_tier: UrgencyTier::ClearanceMode,
                strategy_note: "Post-holiday clearance - minimal restocking",
            },
        ])
    }

    /// 所有規則（依優先權排序）
    pub fn rules(&self) -> &[ScenarioRule] {
        &self.rules
    }

    /// 找出第一條命中的規則
    pub fn matching_rule(&self, label: &str) -> Option<&ScenarioRule> {
        self.rules.iter().find(|rule| rule.matches(label))
    }

    /// 解析情境策略
    pub fn resolve(&self, label: &str, inventory: &InventoryState) -> ScenarioPolicy {
        match self.matching_rule(label) {
            Some(rule) => rule.apply(inventory),
            None => Self::default_policy(inventory),
        }
    }

    /// 一般營運策略（基準值不變）
    pub fn default_policy(inventory: &InventoryState) -> ScenarioPolicy {
        ScenarioPolicy {
            reorder_point: inventory.base_reorder_point,
            reorder_quantity: inventory.base_reorder_quantity,
            urgency_tier: UrgencyTier::Normal,
            strategy_note: DEFAULT_STRATEGY_NOTE.to_string(),
        }
    }
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self::standard()
    }
}
