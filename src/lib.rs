//! # Replenish
//!
//! 單一品項的情境自適應補貨引擎。
//!
//! - [`model`]：資料模型、配置與錯誤類型
//! - [`engine`]：情境調整、需求履行、補貨決策與績效彙總
//! - [`service`]：序列化存取的服務邊界與 JSON 契約
//!
//! ```no_run
//! use replenish::prelude::*;
//!
//! let config = AgentConfig::new(Decimal::from(2000), Decimal::from(300), Decimal::from(800));
//! let mut engine = ReplenishmentEngine::new(config)?;
//! let event = PeriodEvent::from_raw("2024-07-01", 120.0, "Viral_Social_Media_Boost")?;
//! let (decision, snapshot) = engine.submit(&event)?;
//! println!("{} {}", decision.reason, snapshot.current_stock);
//! # Ok::<(), replenish::model::ReplenishError>(())
//! ```

pub use replenish_core as model;
pub use replenish_engine as engine;
pub use replenish_service as service;

/// 常用類型
pub mod prelude {
    pub use replenish_core::{
        AgentConfig, Decision, DecisionAction, Order, PeriodEvent, ReplenishError, Result,
        UrgencyTier, DEFAULT_SCENARIO,
    };
    pub use replenish_engine::{
        DemandNoise, GaussianNoise, PerformanceReport, PerformanceSnapshot, ReplenishmentEngine,
        ScenarioTable, ZeroNoise,
    };
    pub use replenish_service::{AgentService, PeriodRequest, ServiceConfig};
    pub use rust_decimal::Decimal;
}
