//! 決策記錄模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::UrgencyTier;

/// 當期決策動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    /// 無動作
    NoAction,
    /// 已下補貨單（優先於缺貨）
    IntelligentReorder,
    /// 缺貨且未補貨
    Stockout,
}

/// 單期決策記錄（寫入後不再修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// 期別日期
    pub date: NaiveDate,

    /// 情境標籤
    pub scenario: String,

    /// 預測需求
    pub predicted_demand: Decimal,

    /// 實際需求（預測 + 波動）
    pub actual_demand: Decimal,

    /// 已履行數量
    pub demand_fulfilled: Decimal,

    /// 缺貨數量
    pub stockout_amount: Decimal,

    /// 期初庫存
    pub stock_before: Decimal,

    /// 期末庫存（履行與補貨之後）
    pub stock_after: Decimal,

    /// 調整後的再訂購點
    pub adaptive_reorder_point: Decimal,

    /// 調整後的再訂購量
    pub adaptive_reorder_quantity: Decimal,

    /// 決策動作
    pub action: DecisionAction,

    /// 訂購數量（未下單為 0）
    pub order_quantity: Decimal,

    /// 緊急程度
    pub urgency_level: UrgencyTier,

    /// 策略說明
    pub strategy_note: String,

    /// 決策原因
    pub reason: String,
}

impl Decision {
    /// 是否為需要關注的決策（補貨或缺貨）
    pub fn is_significant(&self) -> bool {
        self.action != DecisionAction::NoAction
    }

    /// 是否已下補貨單
    pub fn is_reorder(&self) -> bool {
        self.action == DecisionAction::IntelligentReorder
    }

    /// 當期是否發生缺貨（即使同期已補貨）
    pub fn had_stockout(&self) -> bool {
        self.stockout_amount > Decimal::ZERO
    }
}
