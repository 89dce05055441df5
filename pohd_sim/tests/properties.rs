use pohd_core::calendar::{year_of_day, HORIZON_DAYS};
use pohd_sim::{ScenarioRunner, SessionPhase, SimConfig, Simulation};
use proptest::prelude::*;
use std::collections::HashSet;

fn session(seed: u64, users: usize) -> Simulation {
    let mut sim = Simulation::new(SimConfig::default().with_seed(seed).with_user_count(users))
        .expect("valid config");
    sim.initialize().expect("initialize");
    sim
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn hcs_stays_in_unit_interval(seed in any::<u64>(), users in 1usize..40, days in 0u64..400) {
        let mut sim = session(seed, users);
        sim.run_days(days).unwrap();

        for user in sim.population().users() {
            prop_assert!((0.0..=1.0).contains(&user.hcs));
        }
        for &h in sim.historical_hcs() {
            prop_assert!((0.0..=1.0).contains(&h));
        }
    }

    #[test]
    fn history_tracks_current_day(seed in any::<u64>(), days in 0u64..800) {
        let mut sim = session(seed, 5);
        let executed = sim.run_days(days).unwrap();

        prop_assert_eq!(executed, days);
        prop_assert_eq!(sim.current_day(), days);
        prop_assert_eq!(sim.historical_hcs().len() as u64, days);
        prop_assert_eq!(sim.historical_cw().len() as u64, days);
        prop_assert_eq!(sim.historical_gdp().len() as u64, days);
    }

    #[test]
    fn year_follows_day_index(day in 0u64..5475) {
        prop_assert_eq!(year_of_day(day), 2026 + (day / 365) as u32);
    }

    #[test]
    fn step_pattern_does_not_change_trajectory(
        seed in any::<u64>(),
        chunks in proptest::collection::vec(1u64..50, 1..8),
    ) {
        let total: u64 = chunks.iter().sum();

        let mut chunked = session(seed, 8);
        for chunk in &chunks {
            chunked.run_days(*chunk).unwrap();
        }

        let mut stepped = session(seed, 8);
        for _ in 0..total {
            stepped.run_daily_step().unwrap();
        }

        prop_assert_eq!(chunked.historical_gdp(), stepped.historical_gdp());
        prop_assert_eq!(chunked.historical_cw(), stepped.historical_cw());
        prop_assert_eq!(chunked.snapshot(), stepped.snapshot());
    }

    #[test]
    fn reset_then_initialize_replays(seed in any::<u64>(), days in 1u64..200) {
        let mut sim = session(seed, 6);
        sim.run_days(days).unwrap();
        let first = sim.historical_gdp().to_vec();

        sim.reset_simulation();
        prop_assert_eq!(sim.phase(), SessionPhase::Uninitialized);
        prop_assert_eq!(sim.current_day(), 0);

        sim.initialize().unwrap();
        sim.run_days(days).unwrap();
        prop_assert_eq!(sim.historical_gdp(), first.as_slice());
    }
}

#[test]
fn full_horizon_ends_in_2040() {
    let mut sim = session(42, 20);
    sim.run_to_completion().unwrap();

    assert_eq!(sim.current_day(), HORIZON_DAYS);
    assert_eq!(sim.current_year(), 2040);
    assert_eq!(sim.phase(), SessionPhase::Completed);

    let before = sim.snapshot();
    sim.run_daily_step().unwrap();
    assert_eq!(sim.snapshot(), before);
    assert_eq!(sim.historical_gdp().len() as u64, HORIZON_DAYS);
}

#[test]
fn burn_applies_exactly_once() {
    let mut sim = session(3, 20);
    sim.run_days(3285).unwrap();
    assert!(!sim.burn_applied());
    assert_eq!(year_of_day(3284), 2034);

    sim.run_daily_step().unwrap();
    assert_eq!(sim.burn_day(), Some(3285));
    assert_eq!(year_of_day(3285), 2035);

    sim.run_to_completion().unwrap();
    assert_eq!(sim.burn_day(), Some(3285));
}

#[test]
fn sensitivity_batch_covers_every_scenario() {
    let results = ScenarioRunner::new(42, 100).run_sensitivity_analysis().unwrap();

    assert_eq!(results.len(), 10);
    let names: HashSet<_> = results.iter().map(|r| r.scenario_name.as_str()).collect();
    assert_eq!(names.len(), 10);

    for r in &results {
        assert!((0.0..=1.0).contains(&r.final_hcs), "{}", r.scenario_name);
        assert!((0.0..=1.0).contains(&r.eligible_ratio), "{}", r.scenario_name);
        assert!(r.final_gdp_index.is_finite(), "{}", r.scenario_name);
        assert!(r.cagr_2035_2040.is_finite(), "{}", r.scenario_name);
    }
}
