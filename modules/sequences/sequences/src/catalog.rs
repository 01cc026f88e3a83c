//! The builtin service catalog and its directory hosting.

use std::sync::Arc;

use seqhub_directory::{ServiceBinding, ServiceName};
use sequences_sdk::{SequenceApi, SequenceDirectory, SequenceInfo};

use crate::domain::seq::{FastFibonacci, NaiveFactorial, Primes, SplitFactorial};
use crate::domain::service::{ComputeSequence, SequenceService};

/// Kind suffix shared by every builtin service of this family.
///
/// The purge in [`host_builtins`] removes exactly the names carrying it,
/// so services of other families bound in the same namespace survive a
/// restart untouched.
pub const FAMILY_TAG: &str = "core";

/// Largest index the fast Fibonacci service accepts.
pub const FIB_MAX_INDEX: i32 = 2_000_000;
/// Largest index both factorial services accept.
pub const FAC_MAX_INDEX: i32 = 100_000;
/// Largest index the primes service accepts.
pub const PRIMES_MAX_INDEX: i32 = 500_000;

const FIB_DESCRIPTION: &str = "Fibonacci numbers, defined by equalities\n    \
    fib(i) = fib(i-1) + fib(i-2), fib(0) = 0, fib(1) = 1.\n\
    This implementation uses 2x2 matrices and fast exponentiation\n\
    for calculations.\n\nSee https://oeis.org/A000045";

const FAC_DESCRIPTION: &str = "Factorials\n    \
    n! = 1 * 2 * ... * n;  0! = 1.\n\
    This implementation uses the recursive splitting technique.";

const FAC_NAIVE_DESCRIPTION: &str = "Factorials\n    \
    n! = 1 * 2 * ... * n;  0! = 1.\n\
    This implementation uses repeated multiplication and is rather\n\
    slow for big n.";

const PRIMES_DESCRIPTION: &str =
    "Prime numbers implemented using the sieve of Eratosthenes.\n\nSee https://oeis.org/A000040";

fn service(
    display_name: &str,
    max_index: i32,
    description: &str,
    algorithm: Box<dyn ComputeSequence>,
) -> Arc<SequenceService> {
    Arc::new(SequenceService::new(
        SequenceInfo {
            display_name: display_name.to_owned(),
            max_index,
            description: description.to_owned(),
        },
        algorithm,
    ))
}

/// Every builtin service, paired with the name it is bound under.
pub fn builtin_services() -> anyhow::Result<Vec<(ServiceName, Arc<SequenceService>)>> {
    Ok(vec![
        (
            ServiceName::new("fib", FAMILY_TAG)?,
            service(
                "Fibonacci numbers",
                FIB_MAX_INDEX,
                FIB_DESCRIPTION,
                Box::new(FastFibonacci::new()),
            ),
        ),
        (
            ServiceName::new("fac", FAMILY_TAG)?,
            service(
                "Factorials",
                FAC_MAX_INDEX,
                FAC_DESCRIPTION,
                Box::new(SplitFactorial::new()),
            ),
        ),
        (
            ServiceName::new("fac", format!("naive-{FAMILY_TAG}"))?,
            service(
                "Factorials, naive",
                FAC_MAX_INDEX,
                FAC_NAIVE_DESCRIPTION,
                Box::new(NaiveFactorial::new()),
            ),
        ),
        (
            ServiceName::new("primes", FAMILY_TAG)?,
            service(
                "Primes",
                PRIMES_MAX_INDEX,
                PRIMES_DESCRIPTION,
                Box::new(Primes::new()),
            ),
        ),
    ])
}

/// True when `name` belongs to the builtin family.
#[must_use]
pub fn is_family(name: &ServiceName) -> bool {
    name.kind().ends_with(FAMILY_TAG)
}

/// Purge stale family registrations, then bind every builtin service.
///
/// Registrations outlive their hosting process in the directory, so a
/// restart first sweeps every name carrying the family tag. Returns the
/// binding guards; dropping them makes the services unreachable.
pub async fn host_builtins(directory: &SequenceDirectory) -> anyhow::Result<Vec<ServiceBinding>> {
    let purged = directory.unbind_all(is_family).await?;
    if !purged.is_empty() {
        tracing::info!(count = purged.len(), "purged stale family registrations");
    }

    let mut bindings = Vec::new();
    for (name, service) in builtin_services()? {
        tracing::info!(name = %name, sequence = %service.info().display_name, "hosting sequence");
        let service: Arc<dyn SequenceApi> = service;
        bindings.push(directory.bind(&name, service).await?);
    }
    Ok(bindings)
}
