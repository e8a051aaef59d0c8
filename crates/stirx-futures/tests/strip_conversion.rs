//! End-to-end strip generation and FRA conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stirx_futures::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn eleven_contracts_convert_at_par_without_convexity() {
    let valuation = date(2020, 5, 5);
    let strip = generate_series(valuation, 11, Tenor::THREE_MONTHS).unwrap();
    let expected_starts = [
        date(2020, 6, 17),
        date(2020, 9, 16),
        date(2020, 12, 16),
        date(2021, 3, 17),
        date(2021, 6, 16),
        date(2021, 9, 15),
        date(2021, 12, 15),
        date(2022, 3, 16),
        date(2022, 6, 15),
        date(2022, 9, 21),
        date(2022, 12, 21),
    ];

    for (i, contract) in strip.iter().enumerate() {
        assert_eq!(contract.sequence_number() as usize, i + 1);
        assert_eq!(contract.start_date(), expected_starts[i]);

        let fra = to_forward_rate_agreement(contract, dec!(0.020), Decimal::ZERO).unwrap();
        assert_eq!(fra.forward_rate(), dec!(0.020));
        assert_eq!(fra.start_date(), contract.start_date());
        assert_eq!(fra.end_date(), contract.end_date());
    }
}

#[test]
fn price_quotes_convert_like_rates() {
    let strip = generate_series(date(2020, 5, 5), 4, Tenor::THREE_MONTHS).unwrap();
    let prices = [dec!(99.75), dec!(99.70), dec!(99.62), dec!(99.55)];
    let rates: Vec<Decimal> = prices.iter().map(|&p| rate_from_price(p)).collect();

    let fras = convert_series(
        &ConvexityEngine::new(),
        &strip,
        &rates,
        &ConvexityModel::linear(dec!(0.0001)),
    )
    .unwrap();

    assert_eq!(fras.len(), 4);
    for (fra, rate) in fras.iter().zip(&rates) {
        assert!(fra.forward_rate() < *rate);
    }
    assert_eq!(rates[0], dec!(0.0025));
}

#[test]
fn later_contracts_carry_larger_adjustments() {
    let strip = generate_series(date(2024, 1, 10), 8, Tenor::THREE_MONTHS).unwrap();
    let engine = ConvexityEngine::new();
    let model = ConvexityModel::hull_white(0.012, 0.03);

    let adjustments: Vec<Decimal> = strip
        .iter()
        .map(|c| engine.adjustment(c, &model).unwrap())
        .collect();
    for pair in adjustments.windows(2) {
        assert!(pair[0] < pair[1], "{adjustments:?}");
    }
}

fn valuation_strategy() -> impl Strategy<Value = Date> {
    (2000i32..2080i32, 1u32..13u32, 1u32..29u32).prop_map(|(y, m, d)| date(y, m, d))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn strip_is_chained_and_strictly_increasing(valuation in valuation_strategy(), count in 1u32..30u32) {
        let strip = generate_series(valuation, count, Tenor::THREE_MONTHS).unwrap();
        prop_assert_eq!(strip.len(), count as usize);
        prop_assert!(strip[0].start_date() > valuation);
        for contract in &strip {
            prop_assert!(is_imm_date(contract.start_date()));
            prop_assert!(contract.last_trading_date() < contract.start_date());
        }
        for pair in strip.windows(2) {
            prop_assert!(pair[0].start_date() < pair[1].start_date());
            prop_assert_eq!(pair[0].end_date(), pair[1].start_date());
        }
    }

    #[test]
    fn adjustment_is_monotone_in_convexity(
        valuation in valuation_strategy(),
        low in 0u32..500u32,
        bump in 1u32..500u32,
    ) {
        let contract = generate_series(valuation, 3, Tenor::THREE_MONTHS).unwrap().remove(2);
        let engine = ConvexityEngine::new();
        let low = Decimal::new(i64::from(low), 4);
        let high = low + Decimal::new(i64::from(bump), 4);

        let fra_low = engine.to_forward_rate_agreement(&contract, dec!(0.03), low).unwrap();
        let fra_high = engine.to_forward_rate_agreement(&contract, dec!(0.03), high).unwrap();
        prop_assert!(fra_high.forward_rate() < fra_low.forward_rate());
        prop_assert!(fra_low.forward_rate() <= dec!(0.03));
    }

    #[test]
    fn conversion_is_deterministic(valuation in valuation_strategy(), rate in 0i64..800i64) {
        let contract = generate_series(valuation, 1, Tenor::THREE_MONTHS).unwrap().remove(0);
        let rate = Decimal::new(rate, 4);
        let first = to_forward_rate_agreement(&contract, rate, dec!(0.01)).unwrap();
        let second = to_forward_rate_agreement(&contract, rate, dec!(0.01)).unwrap();
        prop_assert_eq!(first, second);
    }
}
