//! 服務配置

use replenish_core::{AgentConfig, ReplenishError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 服務配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// 代理參數
    pub agent: AgentConfig,

    /// 品項代碼（補貨訊息用）
    pub item_id: String,

    /// 供應商代碼（補貨訊息用）
    pub supplier_id: String,

    /// 需求波動種子，None 時使用系統熵
    pub noise_seed: Option<u64>,

    /// 需求波動標準差佔預測需求的比例（0 到 1）
    pub noise_relative_std_dev: f64,

    /// 狀態查詢返回的最近決策數
    pub recent_decisions: usize,
}

impl ServiceConfig {
    /// 從 JSON 字串載入，未提供的欄位使用預設值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置代理參數
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// 建構器模式：設置波動種子
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// 建構器模式：設置波動幅度
    pub fn with_noise_relative_std_dev(mut self, relative_std_dev: f64) -> Self {
        self.noise_relative_std_dev = relative_std_dev;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;

        if self.item_id.trim().is_empty() {
            return Err(ReplenishError::InvalidConfig("item_id 不可為空".to_string()));
        }

        if !(0.0..=1.0).contains(&self.noise_relative_std_dev) {
            return Err(ReplenishError::InvalidConfig(format!(
                "noise_relative_std_dev 必須介於 0 與 1：{}",
                self.noise_relative_std_dev
            )));
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::new(Decimal::from(3000), Decimal::from(400), Decimal::from(1000)),
            item_id: "Electronics_DEMO_ITEM".to_string(),
            supplier_id: "SUPPLIER_001".to_string(),
            noise_seed: None,
            noise_relative_std_dev: 0.1,
            recent_decisions: 10,
        }
    }
}
