//! # Replenish Service
//!
//! 引擎的服務邊界層：序列化存取、JSON 請求/回應契約、狀態查詢與重設。
//! 傳輸層（HTTP 等）不在此 crate 內。

pub mod config;
pub mod contract;
pub mod service;

// Re-export 主要類型
pub use config::ServiceConfig;
pub use contract::{
    DailyRecord, HealthStatus, PerformanceSummary, PeriodRequest, PeriodResponse,
    ReorderMessage, ServiceState,
};
pub use service::AgentService;
