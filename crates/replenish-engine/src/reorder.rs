//! 補貨量計算

use replenish_core::{AgentConfig, ScenarioPolicy, UrgencyTier};
use rust_decimal::Decimal;

/// 每週天數
const DAYS_PER_WEEK: i64 = 7;

/// 補貨量計算器
pub struct ReorderCalculator;

impl ReorderCalculator {
    /// 依緊急程度決定需求覆蓋週數
    pub fn weeks_coverage(tier: UrgencyTier) -> Decimal {
        if tier.is_critical() {
            Decimal::from(4)
        } else if tier.is_conservative() {
            Decimal::new(15, 1)
        } else {
            Decimal::new(25, 1)
        }
    }

    /// 以近期實際需求推算的補貨量
    ///
    /// `recent_demand` 為先前各期的實際需求（時間順序）。
    /// 不足 `window` 期時返回 None。
    pub fn demand_based_quantity(
        recent_demand: &[Decimal],
        window: usize,
        tier: UrgencyTier,
    ) -> Option<Decimal> {
        if window == 0 || recent_demand.len() < window {
            return None;
        }

        let trailing = &recent_demand[recent_demand.len() - window..];
        let mean = trailing.iter().copied().sum::<Decimal>() / Decimal::from(window);
        let avg_weekly_demand = mean * Decimal::from(DAYS_PER_WEEK);

        Some(avg_weekly_demand * Self::weeks_coverage(tier))
    }

    /// 計算最終補貨量：max(策略再訂購量, 需求推算量)，截斷至訂單上限並取整
    pub fn order_quantity(
        policy: &ScenarioPolicy,
        recent_demand: &[Decimal],
        config: &AgentConfig,
    ) -> Decimal {
        let mut candidate = policy.reorder_quantity;

        if let Some(demand_based) =
            Self::demand_based_quantity(recent_demand, config.demand_window, policy.urgency_tier)
        {
            tracing::debug!(
                "需求推算補貨量 {}（策略量 {}）",
                demand_based,
                candidate
            );
            candidate = candidate.max(demand_based);
        }

        config.clamp_order_quantity(candidate)
    }
}
