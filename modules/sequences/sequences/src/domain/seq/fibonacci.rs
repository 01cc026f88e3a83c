//! Fast Fibonacci numbers via 2x2 matrix exponentiation.

use std::collections::HashMap;

use num_bigint::BigUint;
use parking_lot::Mutex;

use crate::domain::service::ComputeSequence;
use sequences_sdk::Response;

/// 2x2 matrix of arbitrary-precision integers.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Mat2 {
    a00: BigUint,
    a01: BigUint,
    a10: BigUint,
    a11: BigUint,
}

impl Mat2 {
    fn new(a00: u32, a01: u32, a10: u32, a11: u32) -> Self {
        Self {
            a00: BigUint::from(a00),
            a01: BigUint::from(a01),
            a10: BigUint::from(a10),
            a11: BigUint::from(a11),
        }
    }

    fn identity() -> Self {
        Self::new(1, 0, 0, 1)
    }

    fn multiply(&self, other: &Self) -> Self {
        Self {
            a00: &self.a00 * &other.a00 + &self.a01 * &other.a10,
            a01: &self.a00 * &other.a01 + &self.a01 * &other.a11,
            a10: &self.a10 * &other.a00 + &self.a11 * &other.a10,
            a11: &self.a10 * &other.a01 + &self.a11 * &other.a11,
        }
    }
}

/// Fibonacci numbers computed as powers of `[[1, 1], [1, 0]]`:
/// `fib(n)` is the top-left element of the matrix raised to `n - 1`.
///
/// Matrices for power-of-two exponents are cached across requests. The
/// cache only grows; concurrent callers of the same instance share it.
pub struct FastFibonacci {
    powers: Mutex<HashMap<u32, Mat2>>,
}

impl FastFibonacci {
    #[must_use]
    pub fn new() -> Self {
        let mut powers = HashMap::new();
        powers.insert(1, Mat2::new(1, 1, 1, 0));
        Self {
            powers: Mutex::new(powers),
        }
    }

    /// `fib(n)`, with `fib(0) = 0` and `fib(1) = 1`.
    #[must_use]
    pub fn value(&self, n: u32) -> BigUint {
        if n == 0 {
            return BigUint::from(0_u32);
        }
        self.pow(n - 1).a00
    }

    /// Base matrix raised to `exponent`, by binary exponentiation over the
    /// cached squares.
    fn pow(&self, mut exponent: u32) -> Mat2 {
        let mut result = Mat2::identity();
        let mut pow2: u32 = 1;
        while exponent > 0 {
            if exponent % 2 == 1 {
                result = result.multiply(&self.pow2_matrix(pow2));
            }
            exponent >>= 1;
            pow2 <<= 1;
        }
        result
    }

    /// Cached matrix for the power-of-two exponent `pow2`.
    ///
    /// Walks down to the largest cached power below it, then squares back
    /// up, filling the cache on the way. The seed entry for exponent 1
    /// guarantees the walk terminates.
    fn pow2_matrix(&self, pow2: u32) -> Mat2 {
        let mut cache = self.powers.lock();

        let mut i = pow2;
        while !cache.contains_key(&i) {
            i >>= 1;
        }
        while i < pow2 {
            i <<= 1;
            let half = &cache[&(i >> 1)];
            let squared = half.multiply(half);
            cache.insert(i, squared);
        }
        cache[&pow2].clone()
    }
}

impl Default for FastFibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeSequence for FastFibonacci {
    fn compute(&self, index: i32) -> anyhow::Result<Response> {
        let n = u32::try_from(index)?;
        Ok(Response::digits(self.value(n).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fibonacci_numbers() {
        let fib = FastFibonacci::new();
        let expected: [u32; 11] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(fib.value(i as u32), BigUint::from(*want), "fib({i})");
        }
    }

    #[test]
    fn known_large_value() {
        let fib = FastFibonacci::new();
        assert_eq!(fib.value(100).to_string(), "354224848179261915075");
    }

    #[test]
    fn cache_survives_out_of_order_requests() {
        let fib = FastFibonacci::new();
        let big = fib.value(300);
        assert_eq!(fib.value(10), BigUint::from(55_u32));
        assert_eq!(fib.value(300), big);
    }
}
