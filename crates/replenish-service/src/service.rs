//! 補貨代理服務
//!
//! 以互斥鎖包裝引擎，讓多個呼叫端共用同一個代理。
//! 每次請求在鎖內完整處理，各期事件依序套用。

use replenish_core::{Decision, ReplenishError, Result};
use replenish_engine::{DemandNoise, GaussianNoise, ReplenishmentEngine};
use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::config::ServiceConfig;
use crate::contract::{
    DailyRecord, HealthStatus, PerformanceSummary, PeriodRequest, PeriodResponse,
    ReorderMessage, ServiceState,
};

const SERVICE_NAME: &str = "replenish-agent";

struct ServiceInner {
    engine: ReplenishmentEngine,
    current_day: usize,
    daily_log: Vec<DailyRecord>,
}

/// 補貨代理服務
pub struct AgentService {
    config: ServiceConfig,
    started_at: Instant,
    inner: Mutex<ServiceInner>,
}

impl AgentService {
    /// 創建服務
    ///
    /// 配置了 `noise_seed` 時使用可重現的波動，否則使用系統熵。
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let noise = match config.noise_seed {
            Some(seed) => GaussianNoise::seeded(seed),
            None => GaussianNoise::from_entropy(),
        }
        .with_relative_std_dev(config.noise_relative_std_dev);
        Self::with_noise(config, Box::new(noise))
    }

    /// 以指定的波動來源創建服務
    pub fn with_noise(config: ServiceConfig, noise: Box<dyn DemandNoise>) -> Result<Self> {
        config.validate()?;
        let engine = ReplenishmentEngine::with_noise(config.agent.clone(), noise)?;

        tracing::info!(
            "補貨代理服務啟動：品項 {}，期初庫存 {}",
            config.item_id,
            config.agent.initial_stock
        );

        Ok(Self {
            config,
            started_at: Instant::now(),
            inner: Mutex::new(ServiceInner {
                engine,
                current_day: 0,
                daily_log: Vec::new(),
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, ServiceInner>> {
        self.inner.lock().map_err(|_| ReplenishError::StatePoisoned)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// 處理一期請求
    pub fn process_period(&self, request: &PeriodRequest) -> Result<PeriodResponse> {
        let (event, sales) = request.validate()?;

        let mut inner = self.lock()?;
        let (decision, snapshot) = inner.engine.submit(&event)?;

        inner.current_day += 1;
        let day = inner.current_day;
        inner.daily_log.push(DailyRecord {
            day,
            date: event.date,
            sales,
            scenario: event.scenario.clone(),
            predicted_demand: event.predicted_demand,
        });

        let reorder_message = if decision.is_reorder() {
            self.reorder_message(&decision, &inner.engine)
        } else {
            None
        };

        if let Some(message) = &reorder_message {
            tracing::info!(
                "第 {} 天補貨：{} 單位，{}",
                day,
                message.quantity,
                message.urgency
            );
        }

        Ok(PeriodResponse {
            status: "processed".to_string(),
            day,
            agent_decision: decision,
            reorder_message,
            performance_metrics: snapshot,
        })
    }

    /// 處理 JSON 格式的請求
    pub fn process_json(&self, body: &str) -> Result<PeriodResponse> {
        let request: PeriodRequest = serde_json::from_str(body)
            .map_err(|e| ReplenishError::InvalidInput(format!("無法解析請求: {}", e)))?;
        self.process_period(&request)
    }

    fn reorder_message(
        &self,
        decision: &Decision,
        engine: &ReplenishmentEngine,
    ) -> Option<ReorderMessage> {
        let order = engine.orders().last()?;

        Some(ReorderMessage {
            action: "REORDER".to_string(),
            item: self.config.item_id.clone(),
            quantity: order.quantity,
            urgency: order.urgency,
            reason: decision.reason.clone(),
            supplier: self.config.supplier_id.clone(),
            estimated_cost: order.cost,
            order_date: order.date,
            expected_delivery: order.expected_delivery,
        })
    }

    /// 目前狀態
    pub fn current_state(&self) -> Result<ServiceState> {
        let inner = self.lock()?;
        let decisions = inner.engine.decisions();
        let skip = decisions.len().saturating_sub(self.config.recent_decisions);

        Ok(ServiceState {
            current_day: inner.current_day,
            current_stock: inner.engine.current_stock(),
            performance_metrics: inner.engine.snapshot(),
            recent_decisions: decisions[skip..].to_vec(),
            uptime_seconds: self.uptime_seconds(),
            status: "running".to_string(),
        })
    }

    /// 完整績效摘要
    pub fn performance_summary(&self) -> Result<PerformanceSummary> {
        let inner = self.lock()?;

        Ok(PerformanceSummary {
            status: "success".to_string(),
            days_processed: inner.current_day,
            service_metrics: inner.engine.snapshot(),
            agent_metrics: inner.engine.performance_metrics(),
            scenario_performance: inner.engine.scenario_performance(),
        })
    }

    /// 健康檢查
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.uptime_seconds(),
        }
    }

    /// 重設代理狀態
    ///
    /// 狀態全部重新初始化，因此鎖已損毀時也可以重設並恢復服務。
    pub fn reset(&self, initial_stock: Option<Decimal>) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("狀態鎖已損毀，重設後恢復");
            PoisonError::into_inner(poisoned)
        });
        inner.engine.reset(initial_stock);
        inner.current_day = 0;
        inner.daily_log.clear();
        drop(inner);
        self.inner.clear_poison();

        tracing::info!("補貨代理服務已重設");
        Ok(())
    }

    /// 每日輸入記錄
    pub fn daily_log(&self) -> Result<Vec<DailyRecord>> {
        Ok(self.lock()?.daily_log.clone())
    }

    fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
