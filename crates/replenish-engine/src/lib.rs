//! # Replenishment Decision Engine
//!
//! 情境自適應補貨引擎：每期輸入一筆預測需求與情境標籤，
//! 依序執行情境調整、需求履行、情境記憶與補貨決策。

pub mod engine;
pub mod fulfillment;
pub mod memory;
pub mod metrics;
pub mod noise;
pub mod reorder;
pub mod scenario;

// Re-export 主要類型
pub use engine::ReplenishmentEngine;
pub use fulfillment::{FulfillmentCalculator, FulfillmentResult};
pub use memory::{ScenarioMemory, ScenarioMemoryEntry};
pub use metrics::{
    PerformanceAggregator, PerformanceMetrics, PerformanceReport, PerformanceSnapshot,
    ScenarioPerformance,
};
pub use noise::{DemandNoise, FixedNoise, GaussianNoise, ZeroNoise};
pub use reorder::ReorderCalculator;
pub use scenario::{QuantityAdjustment, ScenarioRule, ScenarioTable};
