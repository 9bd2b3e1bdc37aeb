//! 補貨訂單模型

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::UrgencyTier;

/// 補貨訂單（寫入後不再修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// 訂單ID
    pub id: Uuid,

    /// 下單日期
    pub date: NaiveDate,

    /// 訂購數量（整數單位）
    pub quantity: Decimal,

    /// 下單時的情境標籤
    pub scenario: String,

    /// 下單時的緊急程度
    pub urgency: UrgencyTier,

    /// 訂單成本
    pub cost: Decimal,

    /// 預期提前期（天）
    pub expected_lead_time: u32,

    /// 預期到貨日期（僅供參考，庫存已即時入帳）
    pub expected_delivery: NaiveDate,
}

impl Order {
    /// 創建新的補貨訂單
    pub fn new(
        date: NaiveDate,
        quantity: Decimal,
        scenario: String,
        urgency: UrgencyTier,
        unit_cost: Decimal,
        lead_time_days: u32,
    ) -> Self {
        let expected_delivery = date
            .checked_add_days(Days::new(u64::from(lead_time_days)))
            .unwrap_or(date);

        Self {
            id: Uuid::new_v4(),
            date,
            quantity,
            scenario,
            urgency,
            cost: quantity * unit_cost,
            expected_lead_time: lead_time_days,
            expected_delivery,
        }
    }
}
