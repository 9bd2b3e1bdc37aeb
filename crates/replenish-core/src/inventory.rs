//! 庫存狀態模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AgentConfig;

/// 單一品項的庫存狀態
///
/// 只由需求履行與補貨兩個步驟修改，`current_stock` 永遠不為負。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryState {
    /// 現有庫存
    pub current_stock: Decimal,

    /// 基準再訂購點
    pub base_reorder_point: Decimal,

    /// 基準再訂購量
    pub base_reorder_quantity: Decimal,

    /// 單筆訂單上限
    pub max_order_size: Decimal,

    /// 提前期（天）
    pub lead_time_days: u32,

    /// 安全庫存係數
    pub safety_stock_multiplier: Decimal,
}

impl InventoryState {
    /// 依配置建立期初庫存狀態
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            current_stock: config.initial_stock.max(Decimal::ZERO),
            base_reorder_point: config.base_reorder_point,
            base_reorder_quantity: config.base_reorder_quantity,
            max_order_size: config.max_order_size,
            lead_time_days: config.lead_time_days,
            safety_stock_multiplier: config.safety_stock_multiplier,
        }
    }

    /// 以現有庫存履行需求
    ///
    /// 返回 (已履行數量, 缺貨數量)，兩者相加恆等於需求量。
    pub fn fulfill(&mut self, demand: Decimal) -> (Decimal, Decimal) {
        let demand = demand.max(Decimal::ZERO);
        let fulfilled = self.current_stock.min(demand);
        let stockout = demand - fulfilled;

        self.current_stock -= fulfilled;
        (fulfilled, stockout)
    }

    /// 補貨入庫（無提前期延遲）
    pub fn receive(&mut self, quantity: Decimal) {
        if quantity > Decimal::ZERO {
            self.current_stock += quantity;
        }
    }

    /// 檢查庫存是否已達再訂購點
    pub fn needs_reorder(&self, reorder_point: Decimal) -> bool {
        self.current_stock <= reorder_point
    }

    /// 重設現有庫存
    pub fn reset_stock(&mut self, stock: Decimal) {
        self.current_stock = stock.max(Decimal::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_from_config() {
        let inventory = InventoryState::from_config(&AgentConfig::default());

        assert_eq!(inventory.current_stock, Decimal::from(2000));
        assert_eq!(inventory.base_reorder_point, Decimal::from(300));
        assert_eq!(inventory.max_order_size, Decimal::from(5000));
        assert!(!inventory.needs_reorder(Decimal::from(300)));
    }

    #[test]
    fn test_fulfill_full_and_partial() {
        let mut inventory = InventoryState::from_config(&AgentConfig::default());

        // 全數履行
        let (fulfilled, stockout) = inventory.fulfill(Decimal::from(500));
        assert_eq!(fulfilled, Decimal::from(500));
        assert_eq!(stockout, Decimal::ZERO);
        assert_eq!(inventory.current_stock, Decimal::from(1500));

        // 部分履行，庫存歸零
        let (fulfilled, stockout) = inventory.fulfill(Decimal::from(1800));
        assert_eq!(fulfilled, Decimal::from(1500));
        assert_eq!(stockout, Decimal::from(300));
        assert_eq!(inventory.current_stock, Decimal::ZERO);
    }

    #[test]
    fn test_receive_and_reorder_threshold() {
        let mut inventory = InventoryState::from_config(
            &AgentConfig::new(Decimal::from(200), Decimal::from(300), Decimal::from(800)),
        );

        assert!(inventory.needs_reorder(Decimal::from(300)));

        inventory.receive(Decimal::from(800));
        assert_eq!(inventory.current_stock, Decimal::from(1000));

        // 負數入庫被忽略
        inventory.receive(Decimal::from(-50));
        assert_eq!(inventory.current_stock, Decimal::from(1000));
    }
}
