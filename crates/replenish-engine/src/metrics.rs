//! 績效彙總
//!
//! 所有指標都由決策與訂單日誌即時重算，不做增量快取。

use replenish_core::{
    Decision, DecisionAction, InventoryState, Order, PerformanceTotals, UrgencyTier,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::memory::ScenarioMemory;

/// 百分比保留的小數位數
const PERCENT_DECIMAL_PLACES: u32 = 2;

/// 每期回傳的即時績效快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub periods: usize,
    pub current_stock: Decimal,
    pub total_revenue: Decimal,
    pub total_costs: Decimal,
    pub profit: Decimal,
    pub service_level: Decimal,
    pub stockout_count: u32,
    pub orders_placed: usize,
    pub satisfaction_score: Decimal,
}

/// 營運指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalMetrics {
    pub total_periods: usize,
    pub stockouts: u32,
    pub stockout_rate_percent: Decimal,
    pub service_level_percent: Decimal,
    pub customer_satisfaction: Decimal,
}

/// 財務指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub total_revenue: Decimal,
    pub total_costs: Decimal,
    pub profit: Decimal,
    pub profit_margin_percent: Decimal,
}

/// 庫存指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMetrics {
    pub current_stock: Decimal,
    pub total_orders_placed: usize,
    pub average_order_size: Decimal,
    pub total_units_ordered: Decimal,
    pub inventory_turnover_rate: Decimal,
}

/// 情境適應指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceMetrics {
    pub scenarios_encountered: usize,
    /// 各情境出現期數
    pub scenario_breakdown: BTreeMap<String, usize>,
    /// 非一般營運的決策數
    pub adaptive_decisions: usize,
    /// 情境記憶條目數
    pub learning_entries: usize,
}

/// 完整績效指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub operational: OperationalMetrics,
    pub financial: FinancialMetrics,
    pub inventory: InventoryMetrics,
    pub intelligence: IntelligenceMetrics,
}

/// 單一情境的績效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPerformance {
    pub encounters: usize,
    /// 決策動作為缺貨的期數（同期已補貨者不計）
    pub stockouts: usize,
    /// 需求未完全滿足的期數（含同期已補貨者）
    pub shortfall_periods: usize,
    pub orders_placed: usize,
    pub total_demand: Decimal,
    pub total_fulfilled: Decimal,
    pub stockout_rate: Decimal,
    pub avg_demand: Decimal,
    pub fulfillment_rate: Decimal,
    /// 出現最多的緊急程度（同數時取最早出現者）
    pub most_common_urgency: UrgencyTier,
    pub urgency_levels: Vec<UrgencyTier>,
}

/// 完整績效報告（指標 + 各情境績效）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub metrics: PerformanceMetrics,
    pub scenarios: BTreeMap<String, ScenarioPerformance>,
}

/// 績效彙總器
pub struct PerformanceAggregator;

impl PerformanceAggregator {
    /// 即時績效快照
    pub fn snapshot(
        inventory: &InventoryState,
        totals: &PerformanceTotals,
        decisions: &[Decision],
        orders: &[Order],
    ) -> PerformanceSnapshot {
        let periods = decisions.len();

        PerformanceSnapshot {
            periods,
            current_stock: inventory.current_stock,
            total_revenue: totals.total_revenue,
            total_costs: totals.total_costs,
            profit: totals.profit(),
            service_level: Self::service_level(totals.stockout_count, periods),
            stockout_count: totals.stockout_count,
            orders_placed: orders.len(),
            satisfaction_score: totals.satisfaction_score,
        }
    }

    /// 完整績效指標，尚未處理任何期別時返回 None
    pub fn metrics(
        inventory: &InventoryState,
        totals: &PerformanceTotals,
        decisions: &[Decision],
        orders: &[Order],
        memory: &ScenarioMemory,
    ) -> Option<PerformanceMetrics> {
        let total_periods = decisions.len();
        if total_periods == 0 {
            return None;
        }

        let stockout_rate = Self::stockout_rate(totals.stockout_count, total_periods);
        let service_level = Self::service_level(totals.stockout_count, total_periods);

        let profit = totals.profit();
        let profit_margin = if totals.total_revenue > Decimal::ZERO {
            profit / totals.total_revenue * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let total_units_ordered: Decimal = orders.iter().map(|o| o.quantity).sum();
        let average_order_size = if orders.is_empty() {
            Decimal::ZERO
        } else {
            (total_units_ordered / Decimal::from(orders.len())).round_dp(0)
        };
        let inventory_turnover =
            total_units_ordered / inventory.current_stock.max(Decimal::ONE);

        let mut scenario_breakdown: BTreeMap<String, usize> = BTreeMap::new();
        for decision in decisions {
            *scenario_breakdown.entry(decision.scenario.clone()).or_insert(0) += 1;
        }

        Some(PerformanceMetrics {
            operational: OperationalMetrics {
                total_periods,
                stockouts: totals.stockout_count,
                stockout_rate_percent: stockout_rate,
                service_level_percent: service_level,
                customer_satisfaction: totals.satisfaction_score.round_dp(1),
            },
            financial: FinancialMetrics {
                total_revenue: totals.total_revenue.round_dp(2),
                total_costs: totals.total_costs.round_dp(2),
                profit: profit.round_dp(2),
                profit_margin_percent: profit_margin.round_dp(PERCENT_DECIMAL_PLACES),
            },
            inventory: InventoryMetrics {
                current_stock: inventory.current_stock,
                total_orders_placed: orders.len(),
                average_order_size,
                total_units_ordered,
                inventory_turnover_rate: inventory_turnover.round_dp(2),
            },
            intelligence: IntelligenceMetrics {
                scenarios_encountered: scenario_breakdown.len(),
                scenario_breakdown,
                adaptive_decisions: decisions
                    .iter()
                    .filter(|d| !d.urgency_level.is_normal())
                    .count(),
                learning_entries: memory.len(),
            },
        })
    }

    /// 各情境績效
    pub fn scenario_performance(decisions: &[Decision]) -> BTreeMap<String, ScenarioPerformance> {
        let mut grouped: BTreeMap<String, Vec<&Decision>> = BTreeMap::new();
        for decision in decisions {
            grouped
                .entry(decision.scenario.clone())
                .or_insert_with(Vec::new)
                .push(decision);
        }

        grouped
            .into_iter()
            .map(|(scenario, items)| (scenario, Self::summarize_scenario(&items)))
            .collect()
    }

    fn summarize_scenario(decisions: &[&Decision]) -> ScenarioPerformance {
        let encounters = decisions.len();
        let stockouts = decisions
            .iter()
            .filter(|d| d.action == DecisionAction::Stockout)
            .count();
        let shortfall_periods = decisions.iter().filter(|d| d.had_stockout()).count();
        let orders_placed = decisions.iter().filter(|d| d.is_reorder()).count();
        let total_demand: Decimal = decisions.iter().map(|d| d.actual_demand).sum();
        let total_fulfilled: Decimal = decisions.iter().map(|d| d.demand_fulfilled).sum();
        let urgency_levels: Vec<UrgencyTier> = decisions.iter().map(|d| d.urgency_level).collect();

        let encounters_dec = Decimal::from(encounters.max(1));

        ScenarioPerformance {
            encounters,
            stockouts,
            shortfall_periods,
            orders_placed,
            total_demand,
            total_fulfilled,
            stockout_rate: (Decimal::from(stockouts) / encounters_dec * Decimal::ONE_HUNDRED)
                .round_dp(PERCENT_DECIMAL_PLACES),
            avg_demand: total_demand / encounters_dec,
            fulfillment_rate: (total_fulfilled / total_demand.max(Decimal::ONE)
                * Decimal::ONE_HUNDRED)
                .round_dp(PERCENT_DECIMAL_PLACES),
            most_common_urgency: Self::mode(&urgency_levels),
            urgency_levels,
        }
    }

    /// 眾數，同數時取最早出現者
    fn mode(levels: &[UrgencyTier]) -> UrgencyTier {
        let mut counts: Vec<(UrgencyTier, usize)> = Vec::new();
        for level in levels {
            match counts.iter_mut().find(|(tier, _)| tier == level) {
                Some((_, count)) => *count += 1,
                None => counts.push((*level, 1)),
            }
        }

        let mut best: Option<(UrgencyTier, usize)> = None;
        for (tier, count) in counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((tier, count));
            }
        }

        best.map(|(tier, _)| tier).unwrap_or(UrgencyTier::Normal)
    }

    fn stockout_rate(stockouts: u32, periods: usize) -> Decimal {
        if periods == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(stockouts) / Decimal::from(periods) * Decimal::ONE_HUNDRED)
            .round_dp(PERCENT_DECIMAL_PLACES)
    }

    fn service_level(stockouts: u32, periods: usize) -> Decimal {
        Decimal::ONE_HUNDRED - Self::stockout_rate(stockouts, periods)
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        let rule = "=".repeat(60);

        writeln!(f, "{}", rule)?;
        writeln!(f, "補貨代理績效摘要")?;
        writeln!(f, "{}", rule)?;

        writeln!(f, "\n營運績效:")?;
        writeln!(f, "  - 模擬期數: {}", m.operational.total_periods)?;
        writeln!(f, "  - 服務水準: {}%", m.operational.service_level_percent)?;
        writeln!(f, "  - 缺貨率: {}%", m.operational.stockout_rate_percent)?;
        writeln!(f, "  - 客戶滿意度: {}/100", m.operational.customer_satisfaction)?;

        writeln!(f, "\n財務績效:")?;
        writeln!(f, "  - 總營收: ${}", m.financial.total_revenue)?;
        writeln!(f, "  - 總成本: ${}", m.financial.total_costs)?;
        writeln!(f, "  - 利潤: ${}", m.financial.profit)?;
        writeln!(f, "  - 利潤率: {}%", m.financial.profit_margin_percent)?;

        writeln!(f, "\n庫存管理:")?;
        writeln!(f, "  - 現有庫存: {} 單位", m.inventory.current_stock.round_dp(0))?;
        writeln!(f, "  - 補貨次數: {}", m.inventory.total_orders_placed)?;
        writeln!(f, "  - 平均訂購量: {} 單位", m.inventory.average_order_size)?;
        writeln!(f, "  - 庫存周轉: {}", m.inventory.inventory_turnover_rate)?;

        writeln!(f, "\n情境適應:")?;
        writeln!(f, "  - 遇到情境數: {}", m.intelligence.scenarios_encountered)?;
        writeln!(f, "  - 適應性決策: {}", m.intelligence.adaptive_decisions)?;
        writeln!(f, "  - 記憶條目: {}", m.intelligence.learning_entries)?;

        writeln!(f, "\n情境績效:")?;
        for (scenario, perf) in &self.scenarios {
            writeln!(f, "  - {}:", scenario)?;
            writeln!(f, "      出現次數: {}", perf.encounters)?;
            writeln!(f, "      履行率: {}%", perf.fulfillment_rate)?;
            writeln!(f, "      主要策略: {}", perf.most_common_urgency)?;
        }

        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use replenish_core::AgentConfig;

    fn decision(
        day: u32,
        scenario: &str,
        actual: i64,
        fulfilled: i64,
        action: DecisionAction,
        tier: UrgencyTier,
    ) -> Decision {
        Decision {
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            scenario: scenario.to_string(),
            predicted_demand: Decimal::from(actual),
            actual_demand: Decimal::from(actual),
            demand_fulfilled: Decimal::from(fulfilled),
            stockout_amount: Decimal::from(actual - fulfilled),
            stock_before: Decimal::ZERO,
            stock_after: Decimal::ZERO,
            adaptive_reorder_point: Decimal::from(300),
            adaptive_reorder_quantity: Decimal::from(800),
            action,
            order_quantity: Decimal::ZERO,
            urgency_level: tier,
            strategy_note: String::new(),
            reason: String::new(),
        }
    }

    fn order(quantity: i64) -> Order {
        Order::new(
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            Decimal::from(quantity),
            "Normal_Operations".to_string(),
            UrgencyTier::Normal,
            Decimal::from(30),
            3,
        )
    }

    fn fixture() -> (InventoryState, PerformanceTotals, Vec<Decision>, Vec<Order>) {
        let mut inventory = InventoryState::from_config(&AgentConfig::default());
        inventory.current_stock = Decimal::from(400);

        let mut totals = PerformanceTotals::new(Decimal::from(100));
        totals.total_revenue = Decimal::from(10000);
        totals.total_costs = Decimal::from(6000);
        totals.record_stockout();

        let decisions = vec![
            decision(1, "Normal_Operations", 100, 100, DecisionAction::NoAction, UrgencyTier::Normal),
            decision(2, "Viral_Boost", 300, 200, DecisionAction::Stockout, UrgencyTier::CriticalViralEvent),
            decision(3, "Normal_Operations", 100, 100, DecisionAction::IntelligentReorder, UrgencyTier::Normal),
            decision(4, "Normal_Operations", 100, 100, DecisionAction::NoAction, UrgencyTier::Normal),
        ];
        let orders = vec![order(100), order(101)];

        (inventory, totals, decisions, orders)
    }

    #[test]
    fn test_snapshot() {
        let (inventory, totals, decisions, orders) = fixture();
        let snapshot = PerformanceAggregator::snapshot(&inventory, &totals, &decisions, &orders);

        assert_eq!(snapshot.periods, 4);
        assert_eq!(snapshot.profit, Decimal::from(4000));
        assert_eq!(snapshot.service_level, Decimal::from(75));
        assert_eq!(snapshot.stockout_count, 1);
        assert_eq!(snapshot.orders_placed, 2);
        assert_eq!(snapshot.satisfaction_score, Decimal::from(98));
    }

    #[test]
    fn test_empty_snapshot_has_full_service_level() {
        let inventory = InventoryState::from_config(&AgentConfig::default());
        let totals = PerformanceTotals::new(Decimal::from(100));
        let snapshot = PerformanceAggregator::snapshot(&inventory, &totals, &[], &[]);

        assert_eq!(snapshot.periods, 0);
        assert_eq!(snapshot.service_level, Decimal::ONE_HUNDRED);
        assert!(PerformanceAggregator::metrics(&inventory, &totals, &[], &[], &ScenarioMemory::new()).is_none());
    }

    #[test]
    fn test_full_metrics() {
        let (inventory, totals, decisions, orders) = fixture();
        let metrics =
            PerformanceAggregator::metrics(&inventory, &totals, &decisions, &orders, &ScenarioMemory::new())
                .unwrap();

        assert_eq!(metrics.operational.stockout_rate_percent, Decimal::from(25));
        assert_eq!(metrics.operational.service_level_percent, Decimal::from(75));
        assert_eq!(metrics.financial.profit_margin_percent, Decimal::from(40));
        assert_eq!(metrics.inventory.total_units_ordered, Decimal::from(201));
        // 100.5 四捨五入（銀行家捨入）
        assert_eq!(metrics.inventory.average_order_size, Decimal::from(100));
        // 201 / 400 = 0.5025 → 0.50
        assert_eq!(metrics.inventory.inventory_turnover_rate, Decimal::new(50, 2));
        assert_eq!(metrics.intelligence.scenarios_encountered, 2);
        assert_eq!(metrics.intelligence.scenario_breakdown["Normal_Operations"], 3);
        assert_eq!(metrics.intelligence.adaptive_decisions, 1);
    }

    #[test]
    fn test_zero_revenue_margin_and_empty_stock_turnover() {
        let (mut inventory, mut totals, decisions, orders) = fixture();
        inventory.current_stock = Decimal::ZERO;
        totals.total_revenue = Decimal::ZERO;

        let metrics =
            PerformanceAggregator::metrics(&inventory, &totals, &decisions, &orders, &ScenarioMemory::new())
                .unwrap();

        assert_eq!(metrics.financial.profit_margin_percent, Decimal::ZERO);
        assert_eq!(metrics.inventory.inventory_turnover_rate, Decimal::from(201));
    }

    #[test]
    fn test_scenario_performance() {
        let (_, _, decisions, _) = fixture();
        let scenarios = PerformanceAggregator::scenario_performance(&decisions);

        let viral = &scenarios["Viral_Boost"];
        assert_eq!(viral.encounters, 1);
        assert_eq!(viral.stockouts, 1);
        assert_eq!(viral.shortfall_periods, 1);
        // 200 / 300
        assert_eq!(viral.fulfillment_rate, Decimal::new(6667, 2));
        assert_eq!(viral.most_common_urgency, UrgencyTier::CriticalViralEvent);

        let normal = &scenarios["Normal_Operations"];
        assert_eq!(normal.encounters, 3);
        assert_eq!(normal.orders_placed, 1);
        assert_eq!(normal.fulfillment_rate, Decimal::ONE_HUNDRED);
        assert_eq!(normal.avg_demand, Decimal::from(100));
    }

    #[test]
    fn test_reorder_period_is_shortfall_but_not_stockout() {
        let mut overridden = decision(
            1,
            "Viral_Boost",
            500,
            300,
            DecisionAction::IntelligentReorder,
            UrgencyTier::CriticalViralEvent,
        );
        overridden.order_quantity = Decimal::from(2400);
        let decisions = vec![
            overridden,
            decision(2, "Viral_Boost", 400, 100, DecisionAction::Stockout, UrgencyTier::CriticalViralEvent),
            decision(3, "Viral_Boost", 100, 100, DecisionAction::NoAction, UrgencyTier::CriticalViralEvent),
            decision(4, "Viral_Boost", 100, 100, DecisionAction::NoAction, UrgencyTier::CriticalViralEvent),
        ];

        let viral = &PerformanceAggregator::scenario_performance(&decisions)["Viral_Boost"];
        assert_eq!(viral.stockouts, 1);
        assert_eq!(viral.shortfall_periods, 2);
        assert_eq!(viral.stockout_rate, Decimal::from(25));
        assert_eq!(viral.orders_placed, 1);
    }

    #[test]
    fn test_mode_tie_prefers_first_seen() {
        let levels = vec![
            UrgencyTier::ClearanceMode,
            UrgencyTier::Normal,
            UrgencyTier::Normal,
            UrgencyTier::ClearanceMode,
        ];
        assert_eq!(PerformanceAggregator::mode(&levels), UrgencyTier::ClearanceMode);
        assert_eq!(PerformanceAggregator::mode(&[]), UrgencyTier::Normal);
    }

    #[test]
    fn test_report_display() {
        let (inventory, totals, decisions, orders) = fixture();
        let report = PerformanceReport {
            metrics: PerformanceAggregator::metrics(&inventory, &totals, &decisions, &orders, &ScenarioMemory::new())
                .unwrap(),
            scenarios: PerformanceAggregator::scenario_performance(&decisions),
        };

        let text = report.to_string();
        assert!(text.contains("服務水準: 75"));
        assert!(text.contains("Viral_Boost"));
        assert!(text.contains("Critical - Viral Event"));
    }
}
