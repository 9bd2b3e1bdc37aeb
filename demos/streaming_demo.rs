//! 串流模擬示範
//!
//! 依情境日曆逐日產生預測需求，送入補貨代理服務，最後輸出績效報告。
//!
//! ```bash
//! RUST_LOG=info cargo run --example streaming_demo
//! ```

use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use replenish::prelude::*;
use std::f64::consts::PI;

/// 模擬天數
const SIMULATION_DAYS: u32 = 60;

/// 基準日需求
const BASE_DEMAND: f64 = 120.0;

/// 情境日曆項目
struct CalendarEntry {
    start_day: u32,
    scenario: &'static str,
    multiplier: f64,
    duration: u32,
}

const SCENARIO_CALENDAR: &[CalendarEntry] = &[
    CalendarEntry { start_day: 5, scenario: "Competitor_Stockout_Benefit", multiplier: 2.2, duration: 3 },
    CalendarEntry { start_day: 12, scenario: "Viral_Social_Media_Boost", multiplier: 3.5, duration: 2 },
    CalendarEntry { start_day: 20, scenario: "Supply_Chain_Disruption", multiplier: 0.3, duration: 5 },
    CalendarEntry { start_day: 30, scenario: "Celebrity_Endorsement_Spike", multiplier: 4.0, duration: 3 },
    CalendarEntry { start_day: 45, scenario: "Economic_Downturn_Effect", multiplier: 0.6, duration: 7 },
];

fn scenario_for_day(day: u32) -> (&'static str, f64) {
    SCENARIO_CALENDAR
        .iter()
        .find(|entry| entry.start_day <= day && day < entry.start_day + entry.duration)
        .map(|entry| (entry.scenario, entry.multiplier))
        .unwrap_or((DEFAULT_SCENARIO, 1.0))
}

/// 年度季節性與週間效應
fn seasonal_demand(date: NaiveDate) -> f64 {
    let yearly = 1.0 + 0.3 * (2.0 * PI * f64::from(date.ordinal()) / 365.0).sin();
    let weekday = match date.weekday() {
        Weekday::Sat => 1.3,
        Weekday::Sun => 1.1,
        Weekday::Mon => 0.8,
        _ => 1.0,
    };
    BASE_DEMAND * yearly * weekday
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = ServiceConfig::default().with_noise_seed(42);
    let service = AgentService::new(config).context("無法建立補貨代理服務")?;
    let health = service.health();
    println!("服務 {} v{}：{}", health.service, health.version, health.status);

    let start = NaiveDate::from_ymd_opt(2024, 7, 1).context("無效的起始日期")?;

    for day in 1..=SIMULATION_DAYS {
        let date = start + Duration::days(i64::from(day) - 1);
        let (scenario, multiplier) = scenario_for_day(day);
        let predicted = (seasonal_demand(date) * multiplier * 100.0).round() / 100.0;

        let request = PeriodRequest::new(date.format("%Y-%m-%d").to_string(), predicted)
            .with_scenario(scenario)
            .with_predicted_demand(predicted);
        let response = service
            .process_period(&request)
            .with_context(|| format!("第 {} 天處理失敗", day))?;

        let decision = &response.agent_decision;
        println!(
            "第 {:>2} 天 {} {:<28} 需求 {:>7.2} 庫存 {:>6} {}",
            response.day,
            decision.date,
            decision.scenario,
            decision.actual_demand,
            decision.stock_after.round_dp(0),
            decision.urgency_level
        );

        if let Some(message) = &response.reorder_message {
            println!(
                "    補貨 {} 單位（{}），成本 {}，預計 {} 到貨",
                message.quantity, message.urgency, message.estimated_cost, message.expected_delivery
            );
        }
    }

    let summary = service.performance_summary()?;
    println!("\n{}", serde_json::to_string_pretty(&summary.service_metrics)?);

    if let Some(metrics) = summary.agent_metrics {
        let report = PerformanceReport {
            metrics,
            scenarios: summary.scenario_performance,
        };
        println!("\n{}", report);
    }

    Ok(())
}
