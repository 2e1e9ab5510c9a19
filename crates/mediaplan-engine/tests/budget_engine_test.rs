use mediaplan_engine::{
    BudgetEngine, BudgetInput, BudgetMode, BudgetResult, FeeBasis, FeeCalculationType,
    FeeDefinition, FeeOption, FeeSlotInput, calculate_budget_for_row,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn percentage_fee(id: &str, order: u32, basis: FeeBasis, rate: f64) -> FeeDefinition {
    FeeDefinition {
        id: id.to_string(),
        label: id.to_string(),
        order,
        calculation: FeeCalculationType::Percentage,
        basis,
        options: vec![FeeOption {
            id: "std".to_string(),
            value: rate,
            buffer_percent: 0.0,
            editable: false,
        }],
    }
}

fn per_unit_volume_fee(id: &str, order: u32, unit_rate: f64) -> FeeDefinition {
    FeeDefinition {
        id: id.to_string(),
        label: id.to_string(),
        order,
        calculation: FeeCalculationType::PerUnitVolume,
        basis: FeeBasis::Media,
        options: vec![FeeOption {
            id: "std".to_string(),
            value: unit_rate,
            buffer_percent: 0.0,
            editable: false,
        }],
    }
}

fn select_first_slots(input: &mut BudgetInput, count: usize) {
    for slot in input.fees.iter_mut().take(count) {
        *slot = FeeSlotInput::selected("std");
    }
}

#[test]
fn media_mode_identity_holds_with_fees() {
    init_tracing();
    let defs = vec![
        percentage_fee("agency", 1, FeeBasis::Cumulative, 0.1),
        percentage_fee("tech", 2, FeeBasis::Cumulative, 0.1),
    ];
    let mut input = BudgetInput::new(BudgetMode::Media, 1000.0, "Clicks", 10.0);
    select_first_slots(&mut input, 2);

    let result = calculate_budget_for_row(&input, &defs);

    assert_eq!(result.media_budget, 1000.0);
    assert_eq!(result.fee_amount(1), 100.0);
    assert_eq!(result.fee_amount(2), 110.0);
    assert_eq!(result.total_fees, 210.0);
    assert_eq!(result.client_budget, 1210.0);
    assert!(result.converged);
    assert_eq!(result.iterations, None);
}

#[test]
fn client_mode_recovers_the_entered_client_budget() {
    init_tracing();
    let defs = vec![
        percentage_fee("agency", 1, FeeBasis::Cumulative, 0.1),
        percentage_fee("tech", 2, FeeBasis::Cumulative, 0.05),
    ];
    let mut input = BudgetInput::new(BudgetMode::Client, 6000.0, "Clicks", 2.0);
    select_first_slots(&mut input, 2);

    let result = calculate_budget_for_row(&input, &defs);

    assert!(result.converged);
    assert!(result.iterations.is_some());
    assert!((result.client_budget - 6000.0).abs() <= 0.01);
    assert!(result.media_budget < 6000.0);
    assert!(
        (result.client_budget - (result.media_budget + result.total_fees)).abs() < 1e-9
    );
}

#[test]
fn client_mode_with_per_unit_fees_still_converges() {
    let defs = vec![
        percentage_fee("agency", 1, FeeBasis::Cumulative, 0.08),
        per_unit_volume_fee("adserving", 2, 0.02),
    ];
    let mut input = BudgetInput::new(BudgetMode::Client, 12_500.0, "Clicks", 5.0);
    select_first_slots(&mut input, 2);

    let result = calculate_budget_for_row(&input, &defs);

    assert!(result.converged);
    assert!((result.client_budget - 12_500.0).abs() <= 0.01);
    // The per-unit fee tracked the solved volume, not the entered amount.
    let expected_volume =
        (result.media_budget / input.unit_price).round() as i64;
    assert_eq!(result.unit_volume, expected_volume);
}

#[test]
fn pathological_catalogue_fails_softly() {
    init_tracing();
    // A 100% cumulative fee contracts too slowly for the iteration budget
    // at this magnitude.
    let defs = vec![percentage_fee("everything", 1, FeeBasis::Cumulative, 1.0)];
    let mut input = BudgetInput::new(BudgetMode::Client, 1_000_000_000.0, "Clicks", 1.0);
    select_first_slots(&mut input, 1);

    let result = calculate_budget_for_row(&input, &defs);

    assert!(!result.converged);
    assert_eq!(result.iterations, Some(10));
    // Still a complete, displayable result.
    assert!(result.media_budget > 0.0);
    assert!(
        (result.client_budget - (result.media_budget + result.total_fees)).abs() < 1e-3
    );
}

#[test]
fn bonus_extends_volume_but_not_fees_base() {
    let defs = vec![percentage_fee("agency", 1, FeeBasis::Media, 0.1)];
    let mut input = BudgetInput::new(BudgetMode::Media, 1000.0, "Clicks", 10.0);
    input.real_value = Some(1200.0);
    select_first_slots(&mut input, 1);

    let result = calculate_budget_for_row(&input, &defs);

    assert_eq!(result.bonus, 200.0);
    // Volume runs on media + bonus.
    assert_eq!(result.unit_volume, 120);
    // The percentage fee runs on the media budget alone.
    assert_eq!(result.total_fees, 100.0);
}

#[test]
fn client_mode_bonus_tracks_the_solved_media_budget() {
    let defs = vec![percentage_fee("agency", 1, FeeBasis::Cumulative, 0.25)];
    let mut input = BudgetInput::new(BudgetMode::Client, 1250.0, "Clicks", 1.0);
    input.real_value = Some(1100.0);
    select_first_slots(&mut input, 1);

    let result = calculate_budget_for_row(&input, &defs);

    assert!(result.converged);
    // media solves to ~1000, so the declared 1100 yields ~100 bonus.
    assert!((result.media_budget - 1000.0).abs() < 1.0);
    assert!((result.bonus - (1100.0 - result.media_budget)).abs() < 1e-9);
}

#[test]
fn cpm_unit_types_scale_volume_through_the_engine() {
    let input = BudgetInput::new(BudgetMode::Media, 1000.0, "Impressions", 10.0);
    let result = calculate_budget_for_row(&input, &[]);
    assert_eq!(result.unit_volume, 100_000);

    let input = BudgetInput::new(BudgetMode::Media, 1000.0, "Clicks", 10.0);
    let result = calculate_budget_for_row(&input, &[]);
    assert_eq!(result.unit_volume, 100);
}

#[test]
fn degenerate_input_returns_the_zeroed_state() {
    for (amount, price) in [(0.0, 10.0), (-5.0, 10.0), (1000.0, 0.0), (1000.0, -1.0)] {
        let input = BudgetInput::new(BudgetMode::Client, amount, "Clicks", price);
        let result = calculate_budget_for_row(&input, &[]);
        assert_eq!(result, BudgetResult::zeroed());
    }
}

#[test]
fn repeated_calculation_is_bit_identical() {
    let defs = vec![
        percentage_fee("agency", 1, FeeBasis::Cumulative, 0.1),
        per_unit_volume_fee("adserving", 3, 0.015),
    ];
    let mut input = BudgetInput::new(BudgetMode::Client, 7500.0, "Impressions", 2.5);
    input.real_value = Some(4000.0);
    select_first_slots(&mut input, 2);

    let engine = BudgetEngine::new();
    let first = engine.calculate_budget_for_row(&input, &defs);
    let second = engine.calculate_budget_for_row(&input, &defs);

    assert_eq!(first, second);
}

#[test]
fn slot_mapping_is_positional_over_the_sorted_catalogue() {
    // Orders 3 and 8: gaps are irrelevant, slots follow sorted position.
    let defs = vec![
        percentage_fee("late", 8, FeeBasis::Media, 0.2),
        percentage_fee("early", 3, FeeBasis::Media, 0.1),
    ];
    let mut input = BudgetInput::new(BudgetMode::Media, 1000.0, "Clicks", 10.0);
    // Enable only slot 2, which maps to the fee with the higher order.
    input.fees[1] = FeeSlotInput::selected("std");

    let result = calculate_budget_for_row(&input, &defs);

    assert_eq!(result.fee_amount(1), 0.0);
    assert_eq!(result.fee_amount(2), 200.0);
}

#[test]
fn results_round_trip_through_json() {
    let defs = vec![percentage_fee("agency", 1, FeeBasis::Media, 0.1)];
    let mut input = BudgetInput::new(BudgetMode::Media, 1000.0, "Clicks", 10.0);
    select_first_slots(&mut input, 1);

    let result = calculate_budget_for_row(&input, &defs);

    let json = serde_json::to_string(&result).unwrap();
    let back: BudgetResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);

    let json = serde_json::to_string(&input).unwrap();
    let back: BudgetInput = serde_json::from_str(&json).unwrap();
    assert_eq!(input, back);
}
