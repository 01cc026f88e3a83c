//! Factorials via recursive splitting, plus the naive fallback.

use num_bigint::BigUint;

use crate::domain::service::ComputeSequence;
use sequences_sdk::Response;

/// `n` when `n` is odd, else `n - 1`.
fn nearest_odd(n: u64) -> u64 {
    n - (n + 1) % 2
}

/// Product of the odd numbers `low, low + 2, ..., high`, bounds included.
fn odds_product(low: u64, high: u64) -> BigUint {
    if high < low {
        return BigUint::from(1_u32);
    }
    if high == low {
        return BigUint::from(low);
    }
    if high == low + 2 {
        return BigUint::from(low) * BigUint::from(high);
    }
    let m = nearest_odd((low + high) / 2);
    odds_product(low, m) * odds_product(m + 2, high)
}

/// Factorials by recursive splitting.
///
/// Halving bounds split `n!` into odd-range products accumulated per
/// level; the even factors collapse into one final left shift.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitFactorial;

impl SplitFactorial {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// `n!`, with `0! = 1`.
    #[must_use]
    pub fn value(&self, n: u32) -> BigUint {
        if n < 2 {
            return BigUint::from(1_u32);
        }

        let mut bounds = vec![u64::from(n)];
        let mut m = u64::from(n);
        while m > 1 {
            m >>= 1;
            bounds.push(m);
        }
        bounds.reverse();

        let mut shift: u64 = 0;
        let mut prod = BigUint::from(1_u32);
        let mut odd_prod = BigUint::from(1_u32);
        for i in 0..bounds.len() - 1 {
            odd_prod *= odds_product(nearest_odd(bounds[i]) + 2, nearest_odd(bounds[i + 1]));
            prod *= &odd_prod;
            shift += bounds[i];
        }
        prod << shift
    }
}

impl ComputeSequence for SplitFactorial {
    fn compute(&self, index: i32) -> anyhow::Result<Response> {
        let n = u32::try_from(index)?;
        Ok(Response::digits(self.value(n).to_string()))
    }
}

/// Factorials by plain repeated multiplication. Rather slow for big `n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveFactorial;

impl NaiveFactorial {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// `n!`, with `0! = 1`.
    #[must_use]
    pub fn value(&self, n: u32) -> BigUint {
        let mut prod = BigUint::from(1_u32);
        for i in 2..=u64::from(n) {
            prod *= i;
        }
        prod
    }
}

impl ComputeSequence for NaiveFactorial {
    fn compute(&self, index: i32) -> anyhow::Result<Response> {
        let n = u32::try_from(index)?;
        Ok(Response::digits(self.value(n).to_string()))
    }
}
