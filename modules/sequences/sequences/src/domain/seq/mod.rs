//! Sequence algorithms behind the builtin services.

mod factorial;
mod fibonacci;
mod primes;

pub use factorial::{NaiveFactorial, SplitFactorial};
pub use fibonacci::FastFibonacci;
pub use primes::Primes;
