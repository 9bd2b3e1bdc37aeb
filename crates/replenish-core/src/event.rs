//! 期別事件模型

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{quantity_limit, ReplenishError, Result};

/// 未指定情境時使用的標籤
pub const DEFAULT_SCENARIO: &str = "Normal_Operations";

/// 日期格式（YYYY-MM-DD）
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 單期輸入事件（已驗證）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEvent {
    /// 期別日期
    pub date: NaiveDate,

    /// 預測需求（非負）
    pub predicted_demand: Decimal,

    /// 情境標籤
    pub scenario: String,
}

impl PeriodEvent {
    /// 創建並驗證期別事件
    pub fn new(date: NaiveDate, predicted_demand: Decimal, scenario: impl Into<String>) -> Result<Self> {
        validate_demand(predicted_demand)?;

        Ok(Self {
            date,
            predicted_demand,
            scenario: scenario.into(),
        })
    }

    /// 從原始輸入（字串日期、浮點需求）建立事件
    pub fn from_raw(date: &str, predicted_demand: f64, scenario: impl Into<String>) -> Result<Self> {
        let date = parse_date(date)?;
        let predicted_demand = decimal_from_f64("predicted_demand", predicted_demand)?;
        Self::new(date, predicted_demand, scenario)
    }
}

/// 驗證預測需求：不可為負，不可超過 [`crate::QUANTITY_LIMIT`]
pub fn validate_demand(predicted_demand: Decimal) -> Result<()> {
    if predicted_demand < Decimal::ZERO {
        return Err(ReplenishError::InvalidInput(format!(
            "predicted_demand 不可為負數：{}",
            predicted_demand
        )));
    }

    if predicted_demand > quantity_limit() {
        return Err(ReplenishError::InvalidInput(format!(
            "predicted_demand 超過上限 {}：{}",
            quantity_limit(),
            predicted_demand
        )));
    }

    Ok(())
}

/// 解析 YYYY-MM-DD 日期
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ReplenishError::InvalidInput(format!("無法解析日期 '{}': {}", value, e)))
}

/// 將浮點數轉為 Decimal，拒絕 NaN 與無窮大
pub fn decimal_from_f64(field: &str, value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(ReplenishError::InvalidInput(format!(
            "{} 必須是有限數值：{}",
            field, value
        )));
    }

    Decimal::from_f64(value).ok_or_else(|| {
        ReplenishError::InvalidInput(format!("{} 超出可表示範圍：{}", field, value))
    })
}
