use std::time::Duration;

use organic_core::config::{TriggerConfig, TriggerMode};
use organic_scheduler::{annealed_steps, annealed_unit, plan, PacingPlan};
use proptest::prelude::*;

fn arb_trigger(mode: TriggerMode) -> impl Strategy<Value = TriggerConfig> {
    (0.5f64..100.0, 0.01f64..1.0, 0.1f64..100.0).prop_map(move |(frequency, ratio, scaling)| {
        TriggerConfig::new(mode, frequency, frequency * ratio, scaling).unwrap()
    })
}

// ── Unit is bounded by [min_frequency, frequency] ─────────────────────

proptest! {
    #[test]
    fn unit_stays_within_bounds(
        trigger in arb_trigger(TriggerMode::Seconds),
        backlog in 0usize..100_000,
    ) {
        let unit = annealed_unit(&trigger, backlog);
        prop_assert!(unit >= trigger.min_frequency);
        prop_assert!(unit <= trigger.frequency);
    }
}

// ── More backlog never slows the loop down ────────────────────────────

proptest! {
    #[test]
    fn unit_is_non_increasing_in_backlog(
        trigger in arb_trigger(TriggerMode::Steps),
        a in 0usize..10_000,
        b in 0usize..10_000,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(annealed_unit(&trigger, hi) <= annealed_unit(&trigger, lo));
        prop_assert!(annealed_steps(&trigger, hi) <= annealed_steps(&trigger, lo));
        prop_assert!(annealed_steps(&trigger, hi) >= 1);
    }
}

// ── Seconds plan never sleeps longer than the unit ────────────────────

proptest! {
    #[test]
    fn sleep_is_unit_minus_elapsed(
        trigger in arb_trigger(TriggerMode::Seconds),
        backlog in 0usize..1_000,
        elapsed_ms in 0u64..200_000,
    ) {
        let elapsed = Duration::from_millis(elapsed_ms);
        let unit = annealed_unit(&trigger, backlog);
        match plan(&trigger, backlog, elapsed) {
            PacingPlan::Sleep(delay) => {
                let expected = (unit - elapsed.as_secs_f64()).max(0.0);
                prop_assert!((delay.as_secs_f64() - expected).abs() < 1e-6);
            }
            other => prop_assert!(false, "unexpected plan {:?}", other),
        }
    }
}
