// SPDX-License-Identifier: AGPL-3.0-only
//! Integer math for the pool: no floating point anywhere.
//!
//! Every product of two `u128` amounts is formed in 256 bits before the final
//! division, so intermediate overflow is impossible and only a result that
//! does not fit `u128` is reported.

use thiserror::Error;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate products.
    pub struct U256(4);
}

/// Fixed-point scale for prices (1e18).
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;
/// Decimals of [`PRICE_SCALE`].
pub const PRICE_DECIMALS: u8 = 18;
/// Basis point denominator.
pub const BPS_DENOMINATOR: u128 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("result does not fit in u128")]
    Overflow,
}

fn narrow(v: U256) -> Result<u128, MathError> {
    if v > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(v.as_u128())
}

fn div_floor(num: U256, den: U256) -> Result<U256, MathError> {
    if den.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(num / den)
}

fn div_ceil(num: U256, den: U256) -> Result<U256, MathError> {
    if den.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let q = num / den;
    if (num % den).is_zero() {
        Ok(q)
    } else {
        Ok(q + U256::one())
    }
}

/// `floor(a * b / d)`.
pub fn mul_div(a: u128, b: u128, d: u128) -> Result<u128, MathError> {
    narrow(div_floor(U256::from(a) * U256::from(b), U256::from(d))?)
}

/// `ceil(a * b / d)`.
pub fn mul_div_ceil(a: u128, b: u128, d: u128) -> Result<u128, MathError> {
    narrow(div_ceil(U256::from(a) * U256::from(b), U256::from(d))?)
}

/// `a * b` in 256 bits (never overflows for `u128` inputs).
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Integer square root via Newton's method. Returns `floor(√n)`.
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return n;
    }
    let mut x = n;
    let mut y = (x >> 1) + (x & U256::one());
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}

/// `floor(√(a·b))`, the initial LP mint. Always fits `u128`.
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    isqrt(product(a, b)).as_u128()
}

/// Split `amount` into `(net, fee)` where
/// `net = floor(amount * (10000 - fee_bps) / 10000)`.
///
/// The fee is the rounded-up remainder, so truncation always lands in the pool.
pub fn apply_fee(amount: u128, fee_bps: u16) -> Result<(u128, u128), MathError> {
    let keep = BPS_DENOMINATOR - fee_bps as u128;
    let net = mul_div(amount, keep, BPS_DENOMINATOR)?;
    Ok((net, amount - net))
}

/// Smallest gross input whose [`apply_fee`] net is at least `net`.
pub fn gross_for_net(net: u128, fee_bps: u16) -> Result<u128, MathError> {
    let keep = BPS_DENOMINATOR - fee_bps as u128;
    mul_div_ceil(net, BPS_DENOMINATOR, keep)
}

/// Constant-product output for `net_in`:
/// `reserve_out - ceil(reserve_in * reserve_out / (reserve_in + net_in))`,
/// evaluated as the identical `floor(net_in * reserve_out / (reserve_in + net_in))`.
///
/// Always strictly below `reserve_out` when `reserve_in > 0`.
pub fn constant_product_out(net_in: u128, reserve_in: u128, reserve_out: u128) -> Result<u128, MathError> {
    let den = U256::from(reserve_in) + U256::from(net_in);
    narrow(div_floor(product(net_in, reserve_out), den)?)
}

/// Net input required to take `amount_out` out of the pool, rounded up:
/// `ceil(reserve_in * amount_out / (reserve_out - amount_out))`.
pub fn constant_product_in(amount_out: u128, reserve_in: u128, reserve_out: u128) -> Result<u128, MathError> {
    let remaining = reserve_out
        .checked_sub(amount_out)
        .ok_or(MathError::Overflow)?;
    narrow(div_ceil(product(reserve_in, amount_out), U256::from(remaining))?)
}

/// Price of one whole unit of A in whole units of B, scaled by [`PRICE_SCALE`]:
/// `reserve_b * 10^decimals_a * 1e18 / (reserve_a * 10^decimals_b)`.
pub fn whole_unit_price(
    reserve_a: u128,
    reserve_b: u128,
    decimals_a: u8,
    decimals_b: u8,
) -> Result<u128, MathError> {
    let num = scale_up(U256::from(reserve_b), decimals_a)?
        .checked_mul(U256::from(PRICE_SCALE))
        .ok_or(MathError::Overflow)?;
    let den = scale_up(U256::from(reserve_a), decimals_b)?;
    narrow(div_floor(num, den)?)
}

/// `v * 10^decimals`, failing instead of wrapping past 256 bits.
fn scale_up(v: U256, decimals: u8) -> Result<U256, MathError> {
    U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .and_then(|p| v.checked_mul(p))
        .ok_or(MathError::Overflow)
}

/// Price impact in bps: the share of `reserve_out` a trade takes.
pub fn price_impact_bps(amount_out: u128, reserve_out: u128) -> Result<u128, MathError> {
    if reserve_out == 0 {
        return Ok(0);
    }
    mul_div(amount_out, BPS_DENOMINATOR, reserve_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    // ── isqrt ───────────────────────────────────────────────────

    #[test]
    fn test_isqrt_small_values() {
        for (n, r) in [(0u128, 0u128), (1, 1), (2, 1), (3, 1), (4, 2), (8, 2), (9, 3), (99, 9), (101, 10)] {
            assert_eq!(isqrt(U256::from(n)), U256::from(r), "isqrt({})", n);
        }
    }

    #[test]
    fn test_sqrt_product_spec_example() {
        // isqrt(1000 * 2000) = isqrt(2_000_000) = 1414
        assert_eq!(sqrt_product(1_000, 2_000), 1_414);
    }

    #[test]
    fn test_sqrt_product_beyond_u128() {
        // 1000e18 * 2000e18 = 2e42 overflows u128 but not U256
        let root = sqrt_product(1_000 * E18, 2_000 * E18);
        assert_eq!(root, 1_414_213_562_373_095_048_801);
    }

    #[test]
    fn test_sqrt_product_max() {
        assert_eq!(sqrt_product(u128::MAX, u128::MAX), u128::MAX);
    }

    // ── fees ────────────────────────────────────────────────────

    #[test]
    fn test_apply_fee_30_bps() {
        assert_eq!(apply_fee(10_000, 30).unwrap(), (9_970, 30));
    }

    #[test]
    fn test_apply_fee_rounds_toward_pool() {
        // 100 * 9970 / 10000 = 99.7 → net 99, fee 1
        assert_eq!(apply_fee(100, 30).unwrap(), (99, 1));
    }

    #[test]
    fn test_apply_fee_zero() {
        assert_eq!(apply_fee(12_345, 0).unwrap(), (12_345, 0));
    }

    #[test]
    fn test_gross_for_net_inverts_apply_fee() {
        for net in [1u128, 99, 997, 1_000_000, 123_456_789] {
            let gross = gross_for_net(net, 30).unwrap();
            assert!(apply_fee(gross, 30).unwrap().0 >= net);
            assert!(apply_fee(gross - 1, 30).unwrap().0 < net);
        }
    }

    // ── constant product ────────────────────────────────────────

    #[test]
    fn test_constant_product_out_basic() {
        // 1000 * 10000 / (10000 + 1000) = 909
        assert_eq!(constant_product_out(1_000, 10_000, 10_000).unwrap(), 909);
    }

    #[test]
    fn test_constant_product_out_never_reaches_reserve() {
        let out = constant_product_out(u128::MAX, 1_000, 1_000_000).unwrap();
        assert!(out < 1_000_000);
    }

    #[test]
    fn test_constant_product_out_tiny_trade_truncates() {
        assert_eq!(constant_product_out(1, 1_000_000, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn test_constant_product_out_zero_reserves() {
        assert_eq!(constant_product_out(0, 0, 10), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_constant_product_in_covers_output() {
        let need = constant_product_in(909, 10_000, 10_000).unwrap();
        assert!(constant_product_out(need, 10_000, 10_000).unwrap() >= 909);
        assert!(constant_product_out(need - 1, 10_000, 10_000).unwrap() < 909 || need == 1);
    }

    #[test]
    fn test_constant_product_in_full_reserve_rejected() {
        assert_eq!(constant_product_in(10, 10, 10), Err(MathError::DivisionByZero));
        assert_eq!(constant_product_in(11, 10, 10), Err(MathError::Overflow));
    }

    #[test]
    fn test_k_non_decreasing_large_reserves() {
        let (ra, rb) = (1_000 * E18, 2_000 * E18);
        let (net, _) = apply_fee(100 * E18, 30).unwrap();
        let out = constant_product_out(net, ra, rb).unwrap();
        assert!(product(ra + 100 * E18, rb - out) > product(ra, rb));
    }

    // ── mul_div ─────────────────────────────────────────────────

    #[test]
    fn test_mul_div_wide_intermediate() {
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX).unwrap(), u128::MAX);
    }

    #[test]
    fn test_mul_div_overflowing_result() {
        assert_eq!(mul_div(u128::MAX, 2, 1), Err(MathError::Overflow));
    }

    #[test]
    fn test_mul_div_ceil() {
        assert_eq!(mul_div_ceil(7, 3, 2).unwrap(), 11);
        assert_eq!(mul_div_ceil(8, 3, 2).unwrap(), 12);
    }

    // ── prices ──────────────────────────────────────────────────

    #[test]
    fn test_whole_unit_price_same_decimals() {
        assert_eq!(whole_unit_price(1_000 * E18, 2_000 * E18, 18, 18).unwrap(), 2 * E18);
    }

    #[test]
    fn test_whole_unit_price_mixed_decimals() {
        // 1 WETH (18 dp) against 3000 USDC (6 dp) → 3000.0
        let price = whole_unit_price(E18, 3_000_000_000, 18, 6).unwrap();
        assert_eq!(price, 3_000 * E18);
    }

    #[test]
    fn test_whole_unit_price_extreme_decimals_overflow() {
        // 10^255 alone exceeds 256 bits
        assert_eq!(
            whole_unit_price(u128::MAX, u128::MAX, 255, 0),
            Err(MathError::Overflow)
        );
        assert_eq!(
            whole_unit_price(1, u128::MAX, 38, 0),
            Err(MathError::Overflow)
        );
        assert_eq!(whole_unit_price(E18, 1, 0, 200), Err(MathError::Overflow));
    }

    #[test]
    fn test_price_impact_share_of_output_reserve() {
        assert_eq!(price_impact_bps(909, 10_000).unwrap(), 909);
        assert_eq!(price_impact_bps(1, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn test_price_impact_empty_reserve() {
        assert_eq!(price_impact_bps(5, 0).unwrap(), 0);
    }
}
