//! 需求履行

use replenish_core::{InventoryState, PerformanceTotals};
use rust_decimal::Decimal;

use crate::noise::DemandNoise;

/// 單期需求履行結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FulfillmentResult {
    /// 實際需求
    pub actual_demand: Decimal,
    /// 已履行數量
    pub fulfilled: Decimal,
    /// 缺貨數量
    pub stockout_amount: Decimal,
}

impl FulfillmentResult {
    /// 是否缺貨
    pub fn is_stockout(&self) -> bool {
        self.stockout_amount > Decimal::ZERO
    }
}

/// 需求履行計算器
pub struct FulfillmentCalculator;

impl FulfillmentCalculator {
    /// 由預測需求與波動推算實際需求（不低於 0）
    pub fn realize_demand(predicted_demand: Decimal, noise: &mut dyn DemandNoise) -> Decimal {
        let variance = noise.sample(predicted_demand);
        (predicted_demand + variance).max(Decimal::ZERO)
    }

    /// 以現有庫存履行需求，累計營收並記錄缺貨
    pub fn apply(
        inventory: &mut InventoryState,
        totals: &mut PerformanceTotals,
        actual_demand: Decimal,
        unit_price: Decimal,
    ) -> FulfillmentResult {
        let (fulfilled, stockout_amount) = inventory.fulfill(actual_demand);
        totals.record_sale(fulfilled, unit_price);

        let result = FulfillmentResult {
            actual_demand: actual_demand.max(Decimal::ZERO),
            fulfilled,
            stockout_amount,
        };

        if result.is_stockout() {
            totals.record_stockout();
            tracing::debug!(
                "缺貨：需求 {}，履行 {}，短缺 {}",
                result.actual_demand,
                fulfilled,
                stockout_amount
            );
        }

        result
    }
}
