//! Standard normal distribution functions.
//!
//! ## Purpose
//!
//! Inference for the DML coefficient is asymptotically normal. This module
//! provides the two functions it needs: the critical value for a two-sided
//! interval and the two-sided p-value of a z statistic.
//!
//! ## Design notes
//!
//! * **Quantile**: Acklam's rational approximation (relative error < 1.2e-9).
//! * **CDF**: Chebyshev approximation of `erfc` (fractional error < 1.2e-7).
//! * **No-std**: Works in `f64` through `num_traits::Float`.

// External dependencies
use core::f64::consts::SQRT_2;
use num_traits::Float;

/// Critical value `z = Φ⁻¹((1 + level) / 2)` for a two-sided interval.
///
/// `level` must lie in (0, 1); values outside yield 0.
pub fn z_critical<T: Float>(level: T) -> T {
    let cl = level.to_f64().unwrap_or(0.95);
    let p = (1.0 + cl) / 2.0;
    T::from(inverse_cdf(p)).unwrap_or_else(T::zero)
}

/// Two-sided p-value `2·(1 − Φ(|z|))` of a standard normal statistic.
pub fn two_sided_p_value<T: Float>(z: T) -> T {
    let z = z.to_f64().unwrap_or(f64::NAN);
    if z.is_nan() {
        return T::nan();
    }
    let p = erfc(Float::abs(z) / SQRT_2);
    T::from(p.clamp(0.0, 1.0)).unwrap_or_else(T::one)
}

/// Standard normal CDF Φ(x).
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Complementary error function.
fn erfc(x: f64) -> f64 {
    let z = Float::abs(x);
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * Float::exp(poly);
    if x >= 0.0 { ans } else { 2.0 - ans }
}

/// Rational approximation of the inverse standard normal CDF.
pub fn inverse_cdf(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }

    // Coefficients for central region
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239e0,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];

    // Coefficients for tail regions
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838e0,
        -2.549_732_539_343_734e0,
        4.374_664_141_464_968e0,
        2.938_163_982_698_783e0,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996e0,
        3.754_408_661_907_416e0,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 0.97575;

    if p < P_LOW {
        let q = Float::sqrt(-2.0 * Float::ln(p));
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    } else if p > P_HIGH {
        let q = Float::sqrt(-2.0 * Float::ln(1.0 - p));
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        -(num / den)
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    }
}
