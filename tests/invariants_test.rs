//! 引擎不變量的性質測試

use chrono::NaiveDate;
use proptest::prelude::*;
use replenish::prelude::*;
use rust_decimal::Decimal;

const SCENARIOS: &[&str] = &[
    "Normal_Operations",
    "Viral_Social_Media_Boost",
    "Celebrity_Endorsement_Spike",
    "Black_Friday_2024",
    "Supply_Chain_Disruption",
    "Economic_Downturn_Effect",
    "Competitor_Stockout_Benefit",
    "Post_Holiday_Clearance",
    "Unknown_Event",
];

fn run(
    initial_stock: u32,
    seed: u64,
    events: &[(u32, usize)],
) -> ReplenishmentEngine {
    let config = AgentConfig::new(
        Decimal::from(initial_stock),
        Decimal::from(300),
        Decimal::from(800),
    );
    let mut engine =
        ReplenishmentEngine::with_noise(config, Box::new(GaussianNoise::seeded(seed))).unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    for (offset, (demand, scenario)) in events.iter().enumerate() {
        let date = start + chrono::Duration::days(offset as i64);
        engine
            .submit_period_event(date, Decimal::from(*demand), SCENARIOS[*scenario])
            .unwrap();
    }
    engine
}

fn event_stream() -> impl Strategy<Value = Vec<(u32, usize)>> {
    prop::collection::vec((0u32..3000, 0usize..SCENARIOS.len()), 1..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_inventory_is_conserved(
        initial_stock in 0u32..5000,
        seed in any::<u64>(),
        events in event_stream(),
    ) {
        let engine = run(initial_stock, seed, &events);
        let config = engine.config().clone();

        let mut expected_stock = Decimal::from(initial_stock);
        let mut expected_revenue = Decimal::ZERO;
        for decision in engine.decisions() {
            prop_assert_eq!(decision.stock_before, expected_stock);
            prop_assert!(decision.actual_demand >= Decimal::ZERO);
            prop_assert!(decision.stock_after >= Decimal::ZERO);
            prop_assert_eq!(decision.demand_fulfilled + decision.stockout_amount, decision.actual_demand);
            prop_assert_eq!(
                decision.stock_before - decision.demand_fulfilled + decision.order_quantity,
                decision.stock_after
            );

            prop_assert!(decision.order_quantity <= config.max_order_size);
            prop_assert_eq!(decision.order_quantity, decision.order_quantity.floor());
            prop_assert_eq!(decision.is_reorder(), decision.order_quantity > Decimal::ZERO);

            expected_stock = decision.stock_after;
            expected_revenue += decision.demand_fulfilled * config.unit_price;
        }

        prop_assert_eq!(engine.current_stock(), expected_stock);
        prop_assert_eq!(engine.totals().total_revenue, expected_revenue);

        let ordered: Decimal = engine.orders().iter().map(|o| o.quantity).sum();
        let order_costs: Decimal = engine.orders().iter().map(|o| o.cost).sum();
        prop_assert_eq!(engine.totals().total_costs, order_costs);
        prop_assert_eq!(ordered * config.unit_cost, order_costs);
    }

    #[test]
    fn prop_scenario_memory_is_exact(
        seed in any::<u64>(),
        events in event_stream(),
    ) {
        let engine = run(2000, seed, &events);
        let memory = engine.scenario_memory();

        let mut encounters = 0;
        for (scenario, entry) in memory.iter() {
            let predicted: Vec<Decimal> = engine
                .decisions()
                .iter()
                .filter(|d| &d.scenario == scenario)
                .map(|d| d.predicted_demand)
                .collect();

            let total: Decimal = predicted.iter().copied().sum();
            let max = predicted.iter().copied().max().unwrap_or(Decimal::ZERO);

            prop_assert_eq!(entry.encounters as usize, predicted.len());
            prop_assert_eq!(entry.total_demand, total);
            prop_assert_eq!(entry.avg_demand, total / Decimal::from(predicted.len()));
            prop_assert_eq!(entry.max_demand, max);
            prop_assert_eq!(entry.urgency_history.len(), predicted.len());
            encounters += predicted.len();
        }

        prop_assert_eq!(encounters, engine.periods_processed());
    }

    #[test]
    fn prop_metrics_are_consistent_and_idempotent(
        seed in any::<u64>(),
        events in event_stream(),
    ) {
        let engine = run(1000, seed, &events);

        let first = engine.performance_report().unwrap();
        let second = engine.performance_report().unwrap();
        prop_assert_eq!(&first, &second);

        let snapshot = engine.snapshot();
        let stockout_periods = engine
            .decisions()
            .iter()
            .filter(|d| d.had_stockout())
            .count();
        prop_assert_eq!(snapshot.stockout_count as usize, stockout_periods);
        prop_assert!(snapshot.service_level >= Decimal::ZERO);
        prop_assert!(snapshot.service_level <= Decimal::ONE_HUNDRED);
        prop_assert!(snapshot.satisfaction_score >= Decimal::ZERO);

        let encounters: usize = first.scenarios.values().map(|s| s.encounters).sum();
        prop_assert_eq!(encounters, events.len());
        let shortfalls: usize = first.scenarios.values().map(|s| s.shortfall_periods).sum();
        prop_assert_eq!(shortfalls, stockout_periods);
        let stockout_actions: usize = first.scenarios.values().map(|s| s.stockouts).sum();
        prop_assert!(stockout_actions <= shortfalls);
        let orders: usize = first.scenarios.values().map(|s| s.orders_placed).sum();
        prop_assert_eq!(orders, engine.orders().len());
    }

    #[test]
    fn prop_rejected_events_leave_state_unchanged(
        seed in any::<u64>(),
        events in event_stream(),
        demand in 0u32..3000,
    ) {
        let mut engine = run(1500, seed, &events);
        let stock = engine.current_stock();
        let periods = engine.periods_processed();
        let memory = engine.scenario_memory().clone();
        let last = engine.last_date().unwrap();

        let repeated = engine.submit_period_event(last, Decimal::from(demand), "Viral_Event");
        let is_out_of_order = matches!(repeated, Err(ReplenishError::OutOfOrderEvent { .. }));
        prop_assert!(is_out_of_order);

        let next = last + chrono::Duration::days(1);
        let negative = engine.submit_period_event(next, -Decimal::from(demand + 1), "Viral_Event");
        let is_invalid = matches!(negative, Err(ReplenishError::InvalidInput(_)));
        prop_assert!(is_invalid);

        prop_assert_eq!(engine.current_stock(), stock);
        prop_assert_eq!(engine.periods_processed(), periods);
        prop_assert_eq!(engine.scenario_memory(), &memory);
    }
}
