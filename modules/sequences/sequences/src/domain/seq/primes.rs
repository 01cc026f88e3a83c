//! Prime numbers from an incrementally grown sieve of Eratosthenes.

use parking_lot::Mutex;

use crate::domain::service::ComputeSequence;
use sequences_sdk::Response;

const SEED_PRIMES: [u64; 17] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59,
];

fn integer_sqrt(n: u64) -> u64 {
    let mut s = (n as f64).sqrt() as u64;
    while s > 0 && s * s > n {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= n {
        s += 1;
    }
    s
}

struct Sieve {
    primes: Vec<u64>,
}

impl Sieve {
    fn new() -> Self {
        Self {
            primes: SEED_PRIMES.to_vec(),
        }
    }

    fn last(&self) -> u64 {
        self.primes.last().copied().unwrap_or(2)
    }

    /// Upper bound estimate for the prime with the given index, found by
    /// bisecting `x / ln(x)`. Undershoots the prime-counting function, so
    /// sieving up to the estimate always covers the requested index.
    fn estimate_max(index: usize) -> u64 {
        let target = index as f64;
        let density = |x: u64| {
            let x = x as f64;
            x / x.ln()
        };

        let (mut lo, mut hi) = (1_u64, (index as u64).pow(2));
        while lo + 1 < hi {
            let mid = lo + (hi - lo) / 2;
            if density(mid) < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        hi
    }

    /// Extend the prime list with every prime in `[min, max]`.
    ///
    /// Recurses first when the known primes do not yet reach `sqrt(max)`,
    /// so the sieve below always has the factors it needs.
    fn add_primes(&mut self, min: u64, max: u64) {
        let sqrt = integer_sqrt(max);
        let mut min = min;
        if self.last() < sqrt {
            self.add_primes(self.last() + 1, sqrt);
            min = sqrt + 1;
        }
        if max < min {
            return;
        }

        let mut is_prime = vec![true; (max - min + 1) as usize];
        for &prime in &self.primes {
            if prime > sqrt {
                break;
            }
            for i in (min / prime).max(2)..=max / prime {
                let multiple = i * prime;
                if multiple >= min {
                    is_prime[(multiple - min) as usize] = false;
                }
            }
        }
        for (offset, flag) in is_prime.iter().enumerate() {
            if *flag {
                self.primes.push(min + offset as u64);
            }
        }
    }

    fn get(&mut self, index: usize) -> Option<u64> {
        if self.primes.len() <= index {
            let max = Self::estimate_max(index);
            self.add_primes(self.last() + 1, max);
        }
        self.primes.get(index).copied()
    }
}

/// Prime numbers indexed from zero: `p(0) = 2`, `p(1) = 3`, ...
///
/// The sieve grows on demand and is kept across requests; callers of the
/// same instance share it.
pub struct Primes {
    sieve: Mutex<Sieve>,
}

impl Primes {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sieve: Mutex::new(Sieve::new()),
        }
    }

    /// The prime with the given index, if the sieve estimate covers it.
    #[must_use]
    pub fn value(&self, index: u32) -> Option<u64> {
        self.sieve.lock().get(index as usize)
    }
}

impl Default for Primes {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeSequence for Primes {
    fn compute(&self, index: i32) -> anyhow::Result<Response> {
        let n = u32::try_from(index)?;
        let prime = self
            .value(n)
            .ok_or_else(|| anyhow::anyhow!("sieve bound estimate fell short of index {n}"))?;
        Ok(Response::int(i32::try_from(prime)?))
    }
}
