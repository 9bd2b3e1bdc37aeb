//! 補貨決策引擎

use chrono::NaiveDate;
use replenish_core::event::validate_demand;
use replenish_core::{
    AgentConfig, Decision, DecisionAction, InventoryState, Order, PerformanceTotals,
    PeriodEvent, ReplenishError, ScenarioPolicy,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, VecDeque};
use std::io::Write;

use crate::fulfillment::FulfillmentCalculator;
use crate::memory::ScenarioMemory;
use crate::metrics::{
    PerformanceAggregator, PerformanceMetrics, PerformanceReport, PerformanceSnapshot,
    ScenarioPerformance,
};
use crate::noise::{DemandNoise, GaussianNoise};
use crate::reorder::ReorderCalculator;
use crate::scenario::ScenarioTable;

/// 補貨決策引擎
///
/// 擁有全部可變狀態（庫存、累計值、日誌、情境記憶）。
/// 每次 `submit_period_event` 是一個完整的處理單位，呼叫端必須序列化存取。
pub struct ReplenishmentEngine {
    /// 代理配置
    config: AgentConfig,

    /// 情境規則表
    scenario_table: ScenarioTable,

    /// 需求波動來源
    noise: Box<dyn DemandNoise>,

    inventory: InventoryState,
    totals: PerformanceTotals,
    decisions: Vec<Decision>,
    orders: Vec<Order>,
    memory: ScenarioMemory,

    /// 最近各期實際需求（最多 `demand_window` 筆）
    recent_demand: VecDeque<Decimal>,

    /// 上一期日期
    last_date: Option<NaiveDate>,
}

impl ReplenishmentEngine {
    /// 創建新的引擎（常態分佈波動）
    pub fn new(config: AgentConfig) -> replenish_core::Result<Self> {
        Self::with_noise(config, Box::new(GaussianNoise::from_entropy()))
    }

    /// 以指定的波動來源創建引擎
    pub fn with_noise(
        config: AgentConfig,
        noise: Box<dyn DemandNoise>,
    ) -> replenish_core::Result<Self> {
        config.validate()?;

        tracing::debug!(
            "建立補貨引擎：期初庫存 {}，再訂購點 {}，再訂購量 {}",
            config.initial_stock,
            config.base_reorder_point,
            config.base_reorder_quantity
        );

        Ok(Self {
            inventory: InventoryState::from_config(&config),
            totals: PerformanceTotals::new(config.initial_satisfaction),
            recent_demand: VecDeque::with_capacity(config.demand_window),
            scenario_table: ScenarioTable::standard(),
            noise,
            decisions: Vec::new(),
            orders: Vec::new(),
            memory: ScenarioMemory::new(),
            last_date: None,
            config,
        })
    }

    /// 建構器模式：替換情境規則表
    pub fn with_scenario_table(mut self, table: ScenarioTable) -> Self {
        self.scenario_table = table;
        self
    }

    /// 處理一期事件（主入口）
    ///
    /// 依序執行：情境調整 → 需求履行 → 補貨決策，返回決策與績效快照。
    /// 輸入無效或日期未晚於上一期時返回錯誤，狀態不變。
    pub fn submit_period_event(
        &mut self,
        date: NaiveDate,
        predicted_demand: Decimal,
        scenario_label: &str,
    ) -> replenish_core::Result<(Decision, PerformanceSnapshot)> {
        self.validate_event(date, predicted_demand)?;

        // Step 1: 情境調整（同時更新情境記憶）
        let policy = self.adapt_to_scenario(scenario_label, predicted_demand);
        tracing::debug!(
            "{} 情境 {} → {}（再訂購點 {}，再訂購量 {}）",
            date,
            scenario_label,
            policy.urgency_tier,
            policy.reorder_point,
            policy.reorder_quantity
        );

        let stock_before = self.inventory.current_stock;

        // Step 2: 需求履行
        let actual_demand =
            FulfillmentCalculator::realize_demand(predicted_demand, self.noise.as_mut());
        let fulfillment = FulfillmentCalculator::apply(
            &mut self.inventory,
            &mut self.totals,
            actual_demand,
            self.config.unit_price,
        );

        let mut action = DecisionAction::NoAction;
        let mut reason = "庫存高於再訂購點".to_string();
        if fulfillment.is_stockout() {
            action = DecisionAction::Stockout;
            reason = format!("缺貨：{} 單位未滿足", fulfillment.stockout_amount.round_dp(0));
        }

        // Step 3: 補貨決策
        let mut order_quantity = Decimal::ZERO;
        if self.inventory.needs_reorder(policy.reorder_point) {
            let recent: Vec<Decimal> = self.recent_demand.iter().copied().collect();
            let quantity = ReorderCalculator::order_quantity(&policy, &recent, &self.config);

            if quantity > Decimal::ZERO {
                self.place_order(date, quantity, scenario_label, &policy);
                order_quantity = quantity;
                action = DecisionAction::IntelligentReorder;
                reason = format!("智慧補貨：{}", policy.strategy_note);
            }
        }

        // 本期需求在補貨計算之後才納入近期需求
        self.push_recent_demand(fulfillment.actual_demand);
        self.last_date = Some(date);

        let decision = Decision {
            date,
            scenario: scenario_label.to_string(),
            predicted_demand,
            actual_demand: fulfillment.actual_demand,
            demand_fulfilled: fulfillment.fulfilled,
            stockout_amount: fulfillment.stockout_amount,
            stock_before,
            stock_after: self.inventory.current_stock,
            adaptive_reorder_point: policy.reorder_point,
            adaptive_reorder_quantity: policy.reorder_quantity,
            action,
            order_quantity,
            urgency_level: policy.urgency_tier,
            strategy_note: policy.strategy_note,
            reason,
        };

        if decision.is_significant() {
            tracing::info!(
                "{}: {} - {}",
                decision.date,
                decision.urgency_level,
                decision.reason
            );
        }

        self.decisions.push(decision.clone());
        Ok((decision, self.snapshot()))
    }

    /// 處理已驗證的期別事件
    pub fn submit(
        &mut self,
        event: &PeriodEvent,
    ) -> replenish_core::Result<(Decision, PerformanceSnapshot)> {
        self.submit_period_event(event.date, event.predicted_demand, &event.scenario)
    }

    /// 解析情境策略並記錄情境記憶
    fn adapt_to_scenario(&mut self, scenario_label: &str, predicted_demand: Decimal) -> ScenarioPolicy {
        let policy = self.scenario_table.resolve(scenario_label, &self.inventory);
        self.memory
            .record(scenario_label, predicted_demand, policy.urgency_tier);
        policy
    }

    /// 驗證事件（在任何狀態變更之前）
    fn validate_event(&self, date: NaiveDate, predicted_demand: Decimal) -> replenish_core::Result<()> {
        if let Err(e) = validate_demand(predicted_demand) {
            tracing::warn!("拒絕預測需求 {}：{}", predicted_demand, e);
            return Err(e);
        }

        if let Some(previous) = self.last_date {
            if date <= previous {
                tracing::warn!("拒絕順序錯誤的事件：{}（上一期 {}）", date, previous);
                return Err(ReplenishError::OutOfOrderEvent {
                    previous,
                    submitted: date,
                });
            }
        }

        Ok(())
    }

    /// 下單並即時入庫
    fn place_order(
        &mut self,
        date: NaiveDate,
        quantity: Decimal,
        scenario_label: &str,
        policy: &ScenarioPolicy,
    ) {
        let order = Order::new(
            date,
            quantity,
            scenario_label.to_string(),
            policy.urgency_tier,
            self.config.unit_cost,
            self.config.lead_time_days,
        );

        self.inventory.receive(quantity);
        self.totals.record_order_cost(order.cost);

        tracing::debug!(
            "下單 {}：數量 {}，成本 {}，預計到貨 {}",
            order.id,
            order.quantity,
            order.cost,
            order.expected_delivery
        );

        self.orders.push(order);
    }

    fn push_recent_demand(&mut self, demand: Decimal) {
        if self.recent_demand.len() == self.config.demand_window {
            self.recent_demand.pop_front();
        }
        self.recent_demand.push_back(demand);
    }

    /// 重設引擎狀態
    ///
    /// 未指定期初庫存時使用配置值。
    pub fn reset(&mut self, initial_stock: Option<Decimal>) {
        self.inventory = InventoryState::from_config(&self.config);
        if let Some(stock) = initial_stock {
            self.inventory.reset_stock(stock);
        }

        self.totals = PerformanceTotals::new(self.config.initial_satisfaction);
        self.decisions.clear();
        self.orders.clear();
        self.memory.clear();
        self.recent_demand.clear();
        self.last_date = None;

        tracing::info!("引擎狀態已重設，期初庫存 {}", self.inventory.current_stock);
    }

    /// 即時績效快照
    pub fn snapshot(&self) -> PerformanceSnapshot {
        PerformanceAggregator::snapshot(&self.inventory, &self.totals, &self.decisions, &self.orders)
    }

    /// 完整績效指標
    pub fn performance_metrics(&self) -> Option<PerformanceMetrics> {
        PerformanceAggregator::metrics(
            &self.inventory,
            &self.totals,
            &self.decisions,
            &self.orders,
            &self.memory,
        )
    }

    /// 各情境績效
    pub fn scenario_performance(&self) -> BTreeMap<String, ScenarioPerformance> {
        PerformanceAggregator::scenario_performance(&self.decisions)
    }

    /// 完整績效報告
    pub fn performance_report(&self) -> Option<PerformanceReport> {
        self.performance_metrics().map(|metrics| PerformanceReport {
            metrics,
            scenarios: self.scenario_performance(),
        })
    }

    /// 以 JSON 陣列匯出決策日誌
    pub fn export_decisions_json<W: Write>(&self, writer: W) -> replenish_core::Result<()> {
        serde_json::to_writer_pretty(writer, &self.decisions)?;
        Ok(())
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn scenario_table(&self) -> &ScenarioTable {
        &self.scenario_table
    }

    pub fn inventory(&self) -> &InventoryState {
        &self.inventory
    }

    pub fn current_stock(&self) -> Decimal {
        self.inventory.current_stock
    }

    pub fn totals(&self) -> &PerformanceTotals {
        &self.totals
    }

    /// 決策日誌（依期別順序）
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// 訂單日誌
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn scenario_memory(&self) -> &ScenarioMemory {
        &self.memory
    }

    /// 已處理期數
    pub fn periods_processed(&self) -> usize {
        self.decisions.len()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last_date
    }
}
