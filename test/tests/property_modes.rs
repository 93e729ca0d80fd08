/// PROPERTY-BASED TESTS: mode table and period integration
///
/// Key invariants:
/// 1. The mode is a total function of the two threshold comparisons
/// 2. The mode hook fires exactly once per actual transition
/// 3. Integration never uses an unknown peer period
/// 4. Only intervals strictly inside (0, max) pass the guard

use proptest::prelude::*;

use entrain_shared::{Mode, ModeStateMachine, PeriodIntegrator, SoloPolicy};

fn deviation_strategy() -> impl Strategy<Value = f32> {
    -10.0f32..10.0f32
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop::sample::select(Mode::ALL.to_vec())
}

fn policy_strategy() -> impl Strategy<Value = SoloPolicy> {
    prop::sample::select(vec![SoloPolicy::AdoptPeer, SoloPolicy::Average])
}

proptest! {
    /// The mode depends only on which side of the threshold each deviation is
    #[test]
    fn prop_mode_table_is_total(
        local in deviation_strategy(),
        peer in deviation_strategy(),
        threshold in deviation_strategy(),
    ) {
        let expected = match (local >= threshold, peer >= threshold) {
            (true, true) => Mode::Disjoint,
            (true, false) => Mode::Baseline,
            (false, true) => Mode::Solo,
            (false, false) => Mode::Unity,
        };
        prop_assert_eq!(Mode::from_deviations(local, peer, threshold), expected);
    }

    /// Over any sequence of evaluations the hook count equals the number of
    /// times the mode actually changed
    #[test]
    fn prop_hook_fires_once_per_transition(
        initial in mode_strategy(),
        pairs in prop::collection::vec((deviation_strategy(), deviation_strategy()), 1..50),
    ) {
        let mut machine = ModeStateMachine::new(initial, 0.5);
        let mut fired = Vec::new();
        let mut changes = 0;

        for (local, peer) in pairs {
            let before = machine.mode();
            let transition = machine.evaluate(local, peer, |from, to| fired.push((from, to)));
            let after = machine.mode();

            prop_assert_eq!(after, Mode::from_deviations(local, peer, 0.5));
            if before != after {
                changes += 1;
                prop_assert_eq!(transition.map(|t| (t.from, t.to)), Some((before, after)));
            } else {
                prop_assert!(transition.is_none());
            }
        }
        prop_assert_eq!(fired.len(), changes);
    }

    /// A negative or non-finite peer period leaves the local period untouched
    #[test]
    fn prop_unknown_peer_is_never_integrated(
        mode in mode_strategy(),
        policy in policy_strategy(),
        local in 1.0f32..10_000.0f32,
        peer in prop_oneof![Just(-1.0f32), Just(f32::NAN), -1000.0f32..=0.0f32],
    ) {
        let integrator = PeriodIntegrator::new(policy, 100_000.0);
        prop_assert_eq!(integrator.integrate(mode, local, peer), local);
    }

    /// With a known peer the result always lies between the two periods
    #[test]
    fn prop_integration_stays_between_periods(
        mode in mode_strategy(),
        policy in policy_strategy(),
        local in 1.0f32..10_000.0f32,
        peer in 1.0f32..10_000.0f32,
    ) {
        let integrator = PeriodIntegrator::new(policy, 100_000.0);
        let integrated = integrator.integrate(mode, local, peer);
        prop_assert!(integrated >= local.min(peer) && integrated <= local.max(peer));
        if matches!(mode, Mode::Baseline | Mode::Disjoint) {
            prop_assert_eq!(integrated, local);
        }
    }

    /// The guard passes exactly the open interval and counts every rejection
    #[test]
    fn prop_guard_counts_rejections(values in prop::collection::vec(-200_000.0f32..200_000.0f32, 0..40)) {
        let mut integrator = PeriodIntegrator::new(SoloPolicy::AdoptPeer, 100_000.0);
        let mut expected_rejections = 0;
        for value in values {
            let passed = integrator.guard(value);
            if value > 0.0 && value < 100_000.0 {
                prop_assert_eq!(passed, Some(value));
            } else {
                prop_assert!(passed.is_none());
                expected_rejections += 1;
            }
        }
        prop_assert_eq!(integrator.rejected(), expected_rejections);
    }
}
