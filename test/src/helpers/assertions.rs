/// Assert that a period in milliseconds lies within a relative tolerance of
/// the expected one
#[macro_export]
macro_rules! assert_period_near {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let actual: f32 = $actual;
        let expected: f32 = $expected;
        assert!(
            (actual - expected).abs() <= expected * $tolerance,
            "period {}ms is not within {}% of {}ms",
            actual,
            $tolerance * 100.0,
            expected
        );
    };
}

/// Assert that a node ended up in the given mode
#[macro_export]
macro_rules! assert_mode {
    ($node:expr, $mode:expr) => {
        let status = $node.status();
        assert_eq!(
            status.mode, $mode,
            "expected mode {} but node is in {} (deviation {}, peer {})",
            $mode, status.mode, status.deviation, status.their_deviation
        );
    };
}
