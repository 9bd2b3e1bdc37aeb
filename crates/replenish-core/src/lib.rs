//! # Replenish Core
//!
//! 補貨引擎的核心資料模型與類型定義

pub mod config;
pub mod decision;
pub mod event;
pub mod inventory;
pub mod order;
pub mod performance;
pub mod scenario;

// Re-export 主要類型
pub use config::AgentConfig;
pub use decision::{Decision, DecisionAction};
pub use event::{PeriodEvent, DEFAULT_SCENARIO};
pub use inventory::InventoryState;
pub use order::Order;
pub use performance::PerformanceTotals;
pub use scenario::{ScenarioPolicy, UrgencyTier};

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// 單期需求與配置數值的上限（單位）
///
/// 超出此上限的輸入會被拒絕，累計營收與庫存因此不會溢位。
pub const QUANTITY_LIMIT: i64 = 1_000_000_000;

/// 以 `Decimal` 表示的 [`QUANTITY_LIMIT`]
pub fn quantity_limit() -> Decimal {
    Decimal::from(QUANTITY_LIMIT)
}

/// 補貨引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReplenishError {
    #[error("無效的輸入: {0}")]
    InvalidInput(String),

    #[error("事件順序錯誤：{submitted} 不晚於上一期 {previous}")]
    OutOfOrderEvent {
        previous: NaiveDate,
        submitted: NaiveDate,
    },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("引擎狀態鎖已損毀")]
    StatePoisoned,

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReplenishError>;
