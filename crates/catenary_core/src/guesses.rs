//! Starting points for the multi-start solve.
//!
//! The list is a pure function of the span and the slack so that repeated
//! solves of the same geometry walk the same candidates in the same order.

use crate::equations::TrialPoint;

/// Slack above which guesses scaled by `1/slack` are appended.
const INVERTED_SCALE_SLACK: f64 = 0.001;

/// Slack below which fixed large-scale guesses are appended.
const NEAR_TAUT_SLACK: f64 = 0.1;

/// Ordered candidate `(a, x0)` pairs for span `d` and `slack`.
pub fn generate(d: f64, slack: f64) -> Vec<TrialPoint> {
    let mid = d / 2.0;
    let mut guesses = vec![
        TrialPoint::new(0.1, 0.1),
        TrialPoint::new(0.1, mid),
        TrialPoint::new(0.2, mid),
        TrialPoint::new(0.5, mid),
        TrialPoint::new(1.0, mid),
        TrialPoint::new(2.0, mid),
        TrialPoint::new(5.0, mid),
        TrialPoint::new(10.0, mid),
        TrialPoint::new(d / 3.0, mid),
        TrialPoint::new(0.05, d * 0.3),
        TrialPoint::new(0.05, d * 0.7),
        TrialPoint::new(0.01, mid),
        TrialPoint::new(0.5, d * 0.25),
        TrialPoint::new(0.5, d * 0.75),
        TrialPoint::new(1.0, d * 0.3),
        TrialPoint::new(1.0, d * 0.7),
        TrialPoint::new(0.1, 0.1),
        TrialPoint::new(0.2, 0.2),
        TrialPoint::new(0.3, d / 3.0),
        TrialPoint::new(mid, mid),
    ];

    // Nearly taut chains need a ≫ d; the sag scales roughly with 1/slack.
    if slack > INVERTED_SCALE_SLACK {
        guesses.extend([
            TrialPoint::new(1.0 / slack, mid),
            TrialPoint::new(0.5 / slack, mid),
            TrialPoint::new(0.1 / slack, mid),
            TrialPoint::new(2.0 / slack, mid),
            TrialPoint::new(1.0 / slack, d * 0.3),
            TrialPoint::new(1.0 / slack, d * 0.7),
        ]);
    }

    if slack > 0.0 && slack < NEAR_TAUT_SLACK {
        guesses.extend([5.0, 10.0, 20.0, 50.0].map(|a| TrialPoint::new(a, mid)));
    }

    guesses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_set_only_for_tiny_or_non_positive_slack() {
        assert_eq!(generate(1.0, 0.0).len(), 20);
        assert_eq!(generate(1.0, -0.5).len(), 20);
    }

    #[test]
    fn list_sizes_by_slack_regime() {
        let cases = [
            (0.0005, 24), // near-taut only
            (0.001, 24),  // inversion threshold is exclusive
            (0.05, 30),   // both extensions
            (0.1, 26),    // near-taut threshold is exclusive
            (2.0, 26),    // inverted scales only
        ];
        for (slack, expected) in cases {
            assert_eq!(generate(1.0, slack).len(), expected, "slack = {slack}");
        }
    }

    #[test]
    fn first_guess_is_fixed_initial_point() {
        let guesses = generate(7.0, 0.5);
        assert_eq!(guesses[0], TrialPoint::new(0.1, 0.1));
        assert_eq!(guesses[16], TrialPoint::new(0.1, 0.1));
    }

    #[test]
    fn base_set_scales_with_span() {
        let guesses = generate(4.0, 0.0);
        assert_eq!(guesses[1], TrialPoint::new(0.1, 2.0));
        assert_eq!(guesses[8], TrialPoint::new(4.0 / 3.0, 2.0));
        assert_eq!(guesses[9], TrialPoint::new(0.05, 4.0 * 0.3));
        assert_eq!(guesses[13], TrialPoint::new(0.5, 3.0));
        assert_eq!(guesses[19], TrialPoint::new(2.0, 2.0));
    }

    #[test]
    fn inverted_scale_guesses_follow_base_set() {
        let guesses = generate(2.0, 0.5);
        assert_eq!(
            &guesses[20..],
            &[
                TrialPoint::new(2.0, 1.0),
                TrialPoint::new(1.0, 1.0),
                TrialPoint::new(0.2, 1.0),
                TrialPoint::new(4.0, 1.0),
                TrialPoint::new(2.0, 2.0 * 0.3),
                TrialPoint::new(2.0, 2.0 * 0.7),
            ]
        );
    }

    #[test]
    fn near_taut_guesses_come_last() {
        let guesses = generate(1.0, 0.0001);
        let tail: Vec<f64> = guesses[20..].iter().map(|g| g.a).collect();
        assert_eq!(tail, vec![5.0, 10.0, 20.0, 50.0]);
        assert!(guesses[20..].iter().all(|g| g.x0 == 0.5));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(0.96, 0.04), generate(0.96, 0.04));
    }
}
