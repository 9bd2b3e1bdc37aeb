//! 情境策略模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 緊急程度
///
/// 序列化為顯示標籤，與決策日誌中的 `urgency_level` 一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyTier {
    /// 病毒式爆量
    #[serde(rename = "Critical - Viral Event")]
    CriticalViralEvent,
    /// 黑色星期五
    #[serde(rename = "Critical - Black Friday")]
    CriticalBlackFriday,
    /// 供應鏈中斷
    #[serde(rename = "Caution - Supply Issues")]
    CautionSupplyIssues,
    /// 經濟衰退
    #[serde(rename = "Conservative - Economic Risk")]
    ConservativeEconomicRisk,
    /// 競爭對手缺貨
    #[serde(rename = "Opportunity - Market Capture")]
    OpportunityMarketCapture,
    /// 節後清倉
    #[serde(rename = "Clearance Mode")]
    ClearanceMode,
    /// 一般營運
    #[serde(rename = "Normal")]
    Normal,
}

impl UrgencyTier {
    /// 顯示標籤
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::CriticalViralEvent => "Critical - Viral Event",
            UrgencyTier::CriticalBlackFriday => "Critical - Black Friday",
            UrgencyTier::CautionSupplyIssues => "Caution - Supply Issues",
            UrgencyTier::ConservativeEconomicRisk => "Conservative - Economic Risk",
            UrgencyTier::OpportunityMarketCapture => "Opportunity - Market Capture",
            UrgencyTier::ClearanceMode => "Clearance Mode",
            UrgencyTier::Normal => "Normal",
        }
    }

    /// 是否為關鍵事件（需要更長的需求覆蓋）
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            UrgencyTier::CriticalViralEvent | UrgencyTier::CriticalBlackFriday
        )
    }

    /// 是否為保守策略
    pub fn is_conservative(&self) -> bool {
        *self == UrgencyTier::ConservativeEconomicRisk
    }

    /// 是否為一般營運
    pub fn is_normal(&self) -> bool {
        *self == UrgencyTier::Normal
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 當期情境策略（每期依情境標籤重新推導，不儲存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPolicy {
    /// 調整後的再訂購點
    pub reorder_point: Decimal,

    /// 調整後的再訂購量
    pub reorder_quantity: Decimal,

    /// 緊急程度
    pub urgency_tier: UrgencyTier,

    /// 策略說明
    pub strategy_note: String,
}
