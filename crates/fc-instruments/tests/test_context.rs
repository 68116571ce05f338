//! Pricing under scoped market-input overrides.

use fc_core::{MarketInput, Overrides, PricingContext};
use fc_instruments::{par_price, EquityMarket, EquityVanillaOption, OptionType, Priceable};
use fc_time::Date;
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn setup() -> (EquityVanillaOption, EquityMarket) {
    let market = EquityMarket::new(date(2020, 6, 1), 100.0, 0.03, 0.01, 0.25).unwrap();
    let option = EquityVanillaOption::new(OptionType::Call, 105.0, date(2021, 6, 1)).unwrap();
    (option, market)
}

fn rate(r: f64) -> Overrides {
    Overrides::new().with(MarketInput::InterestRate, r)
}

#[test]
fn scopes_shadow_and_restore() {
    let (option, market) = setup();
    let p0 = option.price(&market).unwrap();
    let at = |r: f64| option.price(&EquityMarket { rate: r, ..market }).unwrap();

    {
        let _outer = PricingContext::enter(rate(0.04));
        let p1 = option.price(&market).unwrap();
        assert_ne!(p1, p0);
        assert_eq!(p1, at(0.04));
        {
            let _inner = PricingContext::enter(rate(0.06));
            assert_eq!(option.price(&market).unwrap(), at(0.06));
        }
        assert_eq!(option.price(&market).unwrap(), p1);
    }
    assert_eq!(option.price(&market).unwrap(), p0);
    assert_eq!(PricingContext::depth(), 0);
}

#[test]
fn inner_scope_only_shadows_its_own_inputs() {
    let (option, market) = setup();
    let expected = option
        .price(&EquityMarket { rate: 0.04, volatility: 0.3, ..market })
        .unwrap();
    let nested = PricingContext::scoped(rate(0.04), || {
        PricingContext::scoped(Overrides::new().with(MarketInput::Volatility, 0.3), || {
            option.price(&market)
        })
    })
    .unwrap();
    assert_eq!(nested, expected);
}

#[test]
fn other_threads_do_not_see_the_scope() {
    let (option, market) = setup();
    let p0 = option.price(&market).unwrap();
    let _scope = PricingContext::enter(rate(0.05));
    let elsewhere = std::thread::spawn(move || option.price(&market).unwrap())
        .join()
        .unwrap();
    assert_eq!(elsewhere, p0);
}

#[test]
fn parallel_dispatch_carries_the_scope() {
    let (option, market) = setup();
    let options = vec![option; 64];
    let expected = option.price(&EquityMarket { rate: 0.05, ..market }).unwrap();
    let prices = PricingContext::scoped(rate(0.05), || par_price(&options, &market));
    for p in prices {
        assert_eq!(p.unwrap(), expected);
    }
}

proptest! {
    #[test]
    fn unwinding_restores_the_price_exactly(
        levels in proptest::collection::vec((0usize..4, -0.05..0.5f64), 1..6)
    ) {
        let (option, market) = setup();
        let p0 = option.price(&market).unwrap();
        let inputs = [
            MarketInput::InterestRate,
            MarketInput::DividendYield,
            MarketInput::Volatility,
            MarketInput::StockPrice,
        ];
        let mut guards = Vec::new();
        for &(i, shift) in &levels {
            let input = inputs[i];
            let value = match input {
                MarketInput::Volatility => 0.25 + shift.abs(),
                MarketInput::StockPrice => 100.0 * (1.0 + shift),
                _ => shift,
            };
            guards.push(PricingContext::enter(Overrides::new().with(input, value)));
            prop_assert!(option.price(&market).is_ok());
        }
        while let Some(guard) = guards.pop() {
            drop(guard);
        }
        prop_assert_eq!(PricingContext::depth(), 0);
        prop_assert_eq!(option.price(&market).unwrap(), p0);
    }
}
