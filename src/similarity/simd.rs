//! SIMD accumulation for the NCC kernel using the `wide` crate.
//!
//! The inner pixel loop processes 4 values at a time with `f64x4` partial
//! sums; widening before accumulation keeps the sweep numerically close to
//! the scalar path even on large sections. The trailing remainder goes
//! through the scalar kernel.

use wide::f64x4;

const LANES: usize = 4;

/// Load 4 f32 values widened into f64x4.
#[inline]
fn load_f32x4_wide(slice: &[f32]) -> f64x4 {
    f64x4::from([
        f64::from(slice[0]),
        f64::from(slice[1]),
        f64::from(slice[2]),
        f64::from(slice[3]),
    ])
}

/// Horizontal sum of f64x4.
#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

/// Accumulates the five running sums of the Pearson correlation.
pub(crate) fn ncc_sums(a: &[f32], b: &[f32]) -> (f64, f64, f64, f64, f64) {
    let simd_end = a.len() / LANES * LANES;

    let mut sum_a_vec = f64x4::ZERO;
    let mut sum_b_vec = f64x4::ZERO;
    let mut sum_ab_vec = f64x4::ZERO;
    let mut sum_aa_vec = f64x4::ZERO;
    let mut sum_bb_vec = f64x4::ZERO;

    let mut idx = 0;
    while idx < simd_end {
        let va = load_f32x4_wide(&a[idx..]);
        let vb = load_f32x4_wide(&b[idx..]);
        sum_a_vec += va;
        sum_b_vec += vb;
        sum_ab_vec += va * vb;
        sum_aa_vec += va * va;
        sum_bb_vec += vb * vb;
        idx += LANES;
    }

    // Scalar remainder
    let (rem_a, rem_b, rem_ab, rem_aa, rem_bb) =
        super::scalar::ncc_sums(&a[simd_end..], &b[simd_end..]);

    (
        hsum(sum_a_vec) + rem_a,
        hsum(sum_b_vec) + rem_b,
        hsum(sum_ab_vec) + rem_ab,
        hsum(sum_aa_vec) + rem_aa,
        hsum(sum_bb_vec) + rem_bb,
    )
}
