//! 績效累計模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 每次缺貨扣減的滿意度
const STOCKOUT_SATISFACTION_PENALTY: i64 = 2;

/// 逐期更新的績效累計值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTotals {
    /// 總營收
    pub total_revenue: Decimal,

    /// 總採購成本
    pub total_costs: Decimal,

    /// 缺貨期數
    pub stockout_count: u32,

    /// 客戶滿意度（0-100）
    pub satisfaction_score: Decimal,
}

impl PerformanceTotals {
    /// 創建新的累計值
    pub fn new(initial_satisfaction: Decimal) -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            total_costs: Decimal::ZERO,
            stockout_count: 0,
            satisfaction_score: initial_satisfaction,
        }
    }

    /// 記錄銷售營收
    pub fn record_sale(&mut self, fulfilled: Decimal, unit_price: Decimal) {
        self.total_revenue += fulfilled * unit_price;
    }

    /// 記錄一次缺貨，滿意度不低於 0
    pub fn record_stockout(&mut self) {
        self.stockout_count += 1;
        self.satisfaction_score = (self.satisfaction_score
            - Decimal::from(STOCKOUT_SATISFACTION_PENALTY))
        .max(Decimal::ZERO);
    }

    /// 記錄採購成本
    pub fn record_order_cost(&mut self, cost: Decimal) {
        self.total_costs += cost;
    }

    /// 利潤
    pub fn profit(&self) -> Decimal {
        self.total_revenue - self.total_costs
    }
}
