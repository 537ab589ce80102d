use std::f64::consts::FRAC_PI_2;

/// Default number of trapezoid subintervals over `[0, π/2]`.
pub const QUADRATURE_INTERVALS: usize = 100;

/// Complete elliptic integral of the second kind, `E(m)`, in parameter form:
///
/// `E(m) = ∫₀^{π/2} sqrt(1 - m·sin²θ) dθ`
///
/// Approximated with the composite trapezoid rule. Accuracy tightens as
/// `intervals` grows, at linear cost. Negative `m` is valid and is what the
/// sinusoid arc length uses.
///
/// Points where the radicand is not positive (only possible for `m > 1`)
/// contribute zero instead of poisoning the sum with NaN.
pub fn complete_elliptic_e(m: f64, intervals: usize) -> f64 {
    let intervals = intervals.max(1);
    let step = FRAC_PI_2 / intervals as f64;

    let mut sum = 0.0;
    for i in 0..=intervals {
        let sin_theta = (i as f64 * step).sin();
        let contribution = integrand(m, sin_theta * sin_theta);

        if i == 0 || i == intervals {
            sum += contribution * 0.5;
        } else {
            sum += contribution;
        }
    }

    sum * step
}

#[inline]
fn integrand(m: f64, sin_squared: f64) -> f64 {
    let radicand = 1.0 - m * sin_squared;
    if radicand > 0.0 {
        radicand.sqrt()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_parameter_is_quarter_turn() {
        let e = complete_elliptic_e(0.0, QUADRATURE_INTERVALS);
        assert!((e - FRAC_PI_2).abs() < 1e-12, "E(0) = {e}");
    }

    #[test]
    fn test_unit_parameter_is_one() {
        // E(1) = ∫ cos θ dθ = 1
        let e = complete_elliptic_e(1.0, 1000);
        assert!((e - 1.0).abs() < 1e-5, "E(1) = {e}");
    }

    #[test]
    fn test_known_value() {
        // E(0.5) = 1.3506438810476755 (Abramowitz & Stegun table 17.1)
        let e = complete_elliptic_e(0.5, QUADRATURE_INTERVALS);
        assert!((e - 1.350_643_881_047_675_5).abs() < 1e-9, "E(0.5) = {e}");
    }

    #[test]
    fn test_degenerate_points_contribute_zero() {
        let e = complete_elliptic_e(4.0, QUADRATURE_INTERVALS);
        assert!(e.is_finite());
        assert!(e > 0.0);
        assert!(e < FRAC_PI_2);
    }

    #[test]
    fn test_zero_intervals_does_not_divide_by_zero() {
        assert!(complete_elliptic_e(0.3, 0).is_finite());
    }
}
