//! 補貨代理配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{quantity_limit, ReplenishError, Result};

/// 補貨代理參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// 期初庫存
    pub initial_stock: Decimal,

    /// 基準再訂購點
    pub base_reorder_point: Decimal,

    /// 基準再訂購量
    pub base_reorder_quantity: Decimal,

    /// 單筆訂單上限
    pub max_order_size: Decimal,

    /// 提前期（天），僅作記錄，補貨即時入庫
    pub lead_time_days: u32,

    /// 安全庫存係數
    pub safety_stock_multiplier: Decimal,

    /// 銷售單價
    pub unit_price: Decimal,

    /// 採購單價
    pub unit_cost: Decimal,

    /// 期初客戶滿意度（0-100）
    pub initial_satisfaction: Decimal,

    /// 追蹤需求的期數（計算週平均需求）
    pub demand_window: usize,
}

impl AgentConfig {
    /// 創建新的代理配置，其餘參數使用預設值
    pub fn new(
        initial_stock: Decimal,
        base_reorder_point: Decimal,
        base_reorder_quantity: Decimal,
    ) -> Self {
        Self {
            initial_stock,
            base_reorder_point,
            base_reorder_quantity,
            max_order_size: Decimal::from(5000),
            lead_time_days: 3,
            safety_stock_multiplier: Decimal::new(12, 1),
            unit_price: Decimal::from(50),
            unit_cost: Decimal::from(30),
            initial_satisfaction: Decimal::from(100),
            demand_window: 7,
        }
    }

    /// 建構器模式：設置單筆訂單上限
    pub fn with_max_order_size(mut self, size: Decimal) -> Self {
        self.max_order_size = size;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置安全庫存係數
    pub fn with_safety_stock_multiplier(mut self, multiplier: Decimal) -> Self {
        self.safety_stock_multiplier = multiplier;
        self
    }

    /// 建構器模式：設置銷售單價
    pub fn with_unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = price;
        self
    }

    /// 建構器模式：設置採購單價
    pub fn with_unit_cost(mut self, cost: Decimal) -> Self {
        self.unit_cost = cost;
        self
    }

    /// 建構器模式：設置期初滿意度
    pub fn with_initial_satisfaction(mut self, score: Decimal) -> Self {
        self.initial_satisfaction = score;
        self
    }

    /// 建構器模式：設置需求追蹤期數
    pub fn with_demand_window(mut self, periods: usize) -> Self {
        self.demand_window = periods;
        self
    }

    /// 將訂購量限制在訂單上限內並取整數單位
    pub fn clamp_order_quantity(&self, quantity: Decimal) -> Decimal {
        quantity
            .min(self.max_order_size)
            .max(Decimal::ZERO)
            .floor()
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        let bounded = [
            ("initial_stock", self.initial_stock),
            ("base_reorder_point", self.base_reorder_point),
            ("base_reorder_quantity", self.base_reorder_quantity),
            ("safety_stock_multiplier", self.safety_stock_multiplier),
            ("unit_price", self.unit_price),
            ("unit_cost", self.unit_cost),
            ("initial_satisfaction", self.initial_satisfaction),
            ("max_order_size", self.max_order_size),
        ];

        for (field, value) in bounded {
            if value < Decimal::ZERO {
                return Err(ReplenishError::InvalidConfig(format!(
                    "{} 不可為負數：{}",
                    field, value
                )));
            }
            if value > quantity_limit() {
                return Err(ReplenishError::InvalidConfig(format!(
                    "{} 超過上限 {}：{}",
                    field,
                    quantity_limit(),
                    value
                )));
            }
        }

        if self.max_order_size <= Decimal::ZERO {
            return Err(ReplenishError::InvalidConfig(format!(
                "max_order_size 必須大於 0：{}",
                self.max_order_size
            )));
        }

        if self.demand_window == 0 {
            return Err(ReplenishError::InvalidConfig(
                "demand_window 必須大於 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Decimal::from(2000), Decimal::from(300), Decimal::from(800))
    }
}
