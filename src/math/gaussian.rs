//! Standard normal distribution primitives
//!
//! The error function uses the Cephes rational approximations so that tail
//! probabilities stay accurate near 0 and 1, where lopsided matches push the
//! rating models.

use std::f64::consts::{PI, SQRT_2};

/// Beyond this magnitude `erf` is exactly ±1 and `erfc` is 0 or 2 in f64.
const SATURATION: f64 = 6.0;

/// Numerator coefficients of `erf` on `|x| <= 1`.
const ERF_T: [f64; 5] = [
    9.60497373987051638749E0,
    9.00260197203842689217E1,
    2.23200534594684319226E3,
    7.00332514112805075473E3,
    5.55923013010394962768E4,
];

/// Denominator coefficients of `erf` on `|x| <= 1` (leading 1 implied).
const ERF_U: [f64; 5] = [
    3.35617141647503099647E1,
    5.21357949780152679795E2,
    4.59432382970980127987E3,
    2.26290000613890934246E4,
    4.92673942608635921086E4,
];

/// Numerator coefficients of `erfc` on `1 < |x| < 8`.
const ERFC_P: [f64; 9] = [
    2.46196981473530512524E-10,
    5.64189564831068821977E-1,
    7.46321056442269912687E0,
    4.86371970985681366614E1,
    1.96520832956077098242E2,
    5.26445194995477358631E2,
    9.34528527171957607540E2,
    1.02755188689515710272E3,
    5.57535335369399327526E2,
];

/// Denominator coefficients of `erfc` on `1 < |x| < 8` (leading 1 implied).
const ERFC_Q: [f64; 8] = [
    1.32281951154744992508E1,
    8.67072140885989742329E1,
    3.54937778887819891062E2,
    9.75708501743205489753E2,
    1.82390916687909736289E3,
    2.24633760818710981792E3,
    1.65666309194161350182E3,
    5.57535340817727675546E2,
];

/// Numerator coefficients of `erfc` on `|x| >= 8`.
const ERFC_R: [f64; 6] = [
    5.64189583547755073984E-1,
    1.27536670759978104416E0,
    5.01905042251180477414E0,
    6.16021097993053585195E0,
    7.40974269950448939160E0,
    2.97886665372100240670E0,
];

/// Denominator coefficients of `erfc` on `|x| >= 8` (leading 1 implied).
const ERFC_S: [f64; 6] = [
    2.26052863220117276590E0,
    9.39603524938001434673E0,
    1.20489539808096656605E1,
    1.70814450747565897222E1,
    9.60896809063285878198E0,
    3.36907645100081516050E0,
];

/// Evaluate a polynomial with coefficients ordered from the highest degree down.
///
/// Terms are computed as `coef * x^power` and summed in coefficient order.
fn polevl(x: f64, coefs: &[f64]) -> f64 {
    let top = coefs.len() as i32 - 1;
    coefs
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, coef)| {
            acc + coef * x.powf(f64::from(top - i as i32))
        })
}

/// Like [`polevl`] but with an implied leading coefficient of 1.
fn p1evl(x: f64, coefs: &[f64]) -> f64 {
    let degree = coefs.len() as i32;
    let leading = x.powf(f64::from(degree));
    coefs
        .iter()
        .enumerate()
        .fold(leading, |acc, (i, coef)| {
            acc + coef * x.powf(f64::from(degree - 1 - i as i32))
        })
}

/// Standard normal probability density function.
pub fn pdf(x: f64) -> f64 {
    (-x * x / 2.0).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution function.
pub fn cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Error function.
pub fn erf(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    if x >= SATURATION {
        return 1.0;
    }
    if x <= -SATURATION {
        return -1.0;
    }
    if x.abs() > 1.0 {
        return 1.0 - erfc(x);
    }

    let z = x * x;
    x * polevl(z, &ERF_T) / p1evl(z, &ERF_U)
}

/// Complementary error function, `1 - erf(x)`.
pub fn erfc(a: f64) -> f64 {
    if a == 0.0 {
        return 1.0;
    }
    if a >= SATURATION {
        return 0.0;
    }
    if a <= -SATURATION {
        return 2.0;
    }

    let x = a.abs();
    let z = (-a * a).exp();

    let (p, q) = if x < 8.0 {
        (polevl(x, &ERFC_P), p1evl(x, &ERFC_Q))
    } else {
        (polevl(x, &ERFC_R), p1evl(x, &ERFC_S))
    };

    let y = (z * p) / q;
    if a < 0.0 {
        2.0 - y
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pdf_peak_and_symmetry() {
        assert_abs_diff_eq!(pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_eq!(pdf(1.3), pdf(-1.3));
        assert!(pdf(40.0) >= 0.0);
    }

    #[test]
    fn test_cdf_known_values() {
        assert_eq!(cdf(0.0), 0.5);
        assert_abs_diff_eq!(cdf(1.0), 0.841_344_746_068_542_9, epsilon = 1e-15);
        assert_abs_diff_eq!(cdf(-1.0), 0.158_655_253_931_457_05, epsilon = 1e-15);
        assert_abs_diff_eq!(cdf(1.959_963_984_540_054), 0.975, epsilon = 1e-15);
    }

    #[test]
    fn test_erf_known_values() {
        assert_abs_diff_eq!(erf(0.5), 0.520_499_877_813_046_5, epsilon = 1e-15);
        assert_abs_diff_eq!(erf(1.0), 0.842_700_792_949_714_9, epsilon = 1e-15);
        assert_abs_diff_eq!(erf(2.0), 0.995_322_265_018_952_7, epsilon = 1e-15);
        assert_abs_diff_eq!(erf(-0.3), -0.328_626_759_459_127_4, epsilon = 1e-15);
    }

    #[test]
    fn test_erfc_known_values() {
        assert_abs_diff_eq!(erfc(1.5), 0.033_894_853_524_689_27, epsilon = 1e-15);
        assert_abs_diff_eq!(erfc(-1.5), 1.966_105_146_475_310_7, epsilon = 1e-15);
        assert_abs_diff_eq!(erfc(3.0), 2.209_049_699_858_544e-5, epsilon = 1e-18);
    }

    #[test]
    fn test_saturation() {
        assert_eq!(erf(6.0), 1.0);
        assert_eq!(erf(-7.5), -1.0);
        assert_eq!(erfc(6.0), 0.0);
        assert_eq!(erfc(-6.0), 2.0);
        assert_eq!(cdf(20.0), 1.0);
        assert_eq!(cdf(-20.0), 0.0);
    }

    #[test]
    fn test_erf_is_odd() {
        for x in [0.1, 0.75, 1.0, 1.25, 3.3, 5.9] {
            assert_abs_diff_eq!(erf(-x), -erf(x), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_erf_erfc_complement() {
        // erf delegates to erfc above |x| = 1, so the identity is exact there
        for x in [-4.0, -1.7, 1.1, 2.6, 5.0] {
            assert_abs_diff_eq!(erf(x) + erfc(x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_matches_statrs_on_dense_grid() {
        for i in 0..=12_000 {
            let x = -6.0 + i as f64 * 0.001;
            assert_abs_diff_eq!(erf(x), statrs::function::erf::erf(x), epsilon = 1e-15);
            assert_abs_diff_eq!(
                cdf(x),
                0.5 * statrs::function::erf::erfc(-x / SQRT_2),
                epsilon = 1e-15
            );
        }
    }
}
