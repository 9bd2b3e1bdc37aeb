//! 需求波動來源
//!
//! 實際需求 = 預測需求 + 波動。波動來源可注入，測試時使用固定值或零。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// 預設波動幅度：標準差 = 0.1 × |預測需求|
const DEFAULT_RELATIVE_STD_DEV: f64 = 0.1;

/// 波動取樣後保留的小數位數
const NOISE_DECIMAL_PLACES: u32 = 4;

/// 需求波動產生器
pub trait DemandNoise: Send {
    /// 依預測需求取樣一個波動值
    fn sample(&mut self, predicted_demand: Decimal) -> Decimal;
}

/// 無波動
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl DemandNoise for ZeroNoise {
    fn sample(&mut self, _predicted_demand: Decimal) -> Decimal {
        Decimal::ZERO
    }
}

/// 固定波動
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub Decimal);

impl DemandNoise for FixedNoise {
    fn sample(&mut self, _predicted_demand: Decimal) -> Decimal {
        self.0
    }
}

/// 常態分佈波動（平均 0）
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    rng: StdRng,
    relative_std_dev: f64,
}

impl GaussianNoise {
    /// 以系統熵初始化
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            relative_std_dev: DEFAULT_RELATIVE_STD_DEV,
        }
    }

    /// 以固定種子初始化（可重現）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            relative_std_dev: DEFAULT_RELATIVE_STD_DEV,
        }
    }

    /// 建構器模式：設置相對標準差
    pub fn with_relative_std_dev(mut self, relative_std_dev: f64) -> Self {
        self.relative_std_dev = relative_std_dev.abs();
        self
    }
}

impl DemandNoise for GaussianNoise {
    fn sample(&mut self, predicted_demand: Decimal) -> Decimal {
        let std_dev = predicted_demand.abs().to_f64().unwrap_or(0.0) * self.relative_std_dev;
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Decimal::ZERO;
        }

        match Normal::new(0.0, std_dev) {
            Ok(normal) => {
                let value: f64 = self.rng.sample(normal);
                Decimal::from_f64(value)
                    .map(|v| v.round_dp(NOISE_DECIMAL_PLACES))
                    .unwrap_or(Decimal::ZERO)
            }
            Err(e) => {
                tracing::warn!("無法建立常態分佈（標準差 {}）: {}", std_dev, e);
                Decimal::ZERO
            }
        }
    }
}
