//! 服務請求/回應契約

use chrono::NaiveDate;
use replenish_core::event::{decimal_from_f64, parse_date};
use replenish_core::{Decision, PeriodEvent, Result, UrgencyTier, DEFAULT_SCENARIO};
use replenish_engine::{PerformanceMetrics, PerformanceSnapshot, ScenarioPerformance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 單期輸入請求 `{date, sales, scenario, predicted_demand}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// YYYY-MM-DD
    pub date: String,

    /// 當期實際銷售（僅記錄）
    #[serde(default)]
    pub sales: f64,

    /// 情境標籤，預設 Normal_Operations
    #[serde(default)]
    pub scenario: Option<String>,

    /// 預測需求，未提供時使用 sales
    #[serde(default)]
    pub predicted_demand: Option<f64>,
}

impl PeriodRequest {
    /// 創建請求
    pub fn new(date: impl Into<String>, sales: f64) -> Self {
        Self {
            date: date.into(),
            sales,
            scenario: None,
            predicted_demand: None,
        }
    }

    /// 建構器模式：設置情境
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// 建構器模式：設置預測需求
    pub fn with_predicted_demand(mut self, predicted_demand: f64) -> Self {
        self.predicted_demand = Some(predicted_demand);
        self
    }

    /// 驗證並轉換為期別事件與銷售量
    pub fn validate(&self) -> Result<(PeriodEvent, Decimal)> {
        let sales = decimal_from_f64("sales", self.sales)?;
        let predicted = decimal_from_f64(
            "predicted_demand",
            self.predicted_demand.unwrap_or(self.sales),
        )?;
        let scenario = self
            .scenario
            .clone()
            .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());

        let event = PeriodEvent::new(parse_date(&self.date)?, predicted, scenario)?;
        Ok((event, sales))
    }
}

/// 補貨訊息（下單時附在回應中）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderMessage {
    pub action: String,
    pub item: String,
    pub quantity: Decimal,
    pub urgency: UrgencyTier,
    pub reason: String,
    pub supplier: String,
    pub estimated_cost: Decimal,
    pub order_date: NaiveDate,
    pub expected_delivery: NaiveDate,
}

/// 單期處理回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodResponse {
    pub status: String,
    /// 第幾天（從 1 開始）
    pub day: usize,
    pub agent_decision: Decision,
    pub reorder_message: Option<ReorderMessage>,
    pub performance_metrics: PerformanceSnapshot,
}

/// 每日輸入記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub day: usize,
    pub date: NaiveDate,
    pub sales: Decimal,
    pub scenario: String,
    pub predicted_demand: Decimal,
}

/// 目前服務狀態（唯讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceState {
    pub current_day: usize,
    pub current_stock: Decimal,
    pub performance_metrics: PerformanceSnapshot,
    pub recent_decisions: Vec<Decision>,
    pub uptime_seconds: u64,
    pub status: String,
}

/// 完整績效摘要（唯讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub status: String,
    pub days_processed: usize,
    pub service_metrics: PerformanceSnapshot,
    pub agent_metrics: Option<PerformanceMetrics>,
    pub scenario_performance: BTreeMap<String, ScenarioPerformance>,
}

/// 健康檢查
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}
