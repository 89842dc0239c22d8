use std::future::Future;
use std::time::Duration;

use super::errors::{DomainError, DomainResult};

/// Time budgets for store-bound operations
///
/// `short` covers single cart mutations, `long` covers aggregation,
/// checkout and account work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTimeouts {
    pub short: Duration,
    pub long: Duration,
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        Self {
            short: Duration::from_secs(5),
            long: Duration::from_secs(100),
        }
    }
}

/// Runs `operation` under `budget`, failing with a persistence error on expiry
///
/// Writes already applied by the operation are left in place.
pub async fn bounded<T, F>(budget: Duration, name: &'static str, operation: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation = name, budget_ms = budget.as_millis() as u64, "store operation timed out");
            Err(DomainError::Persistence(format!("{} timed out", name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_within_budget() {
        let value = bounded(Duration::from_secs(1), "quick", async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_budget_is_a_persistence_failure() {
        let result: DomainResult<()> = bounded(Duration::from_millis(10), "slow", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(DomainError::Persistence(_))));
    }

    #[tokio::test]
    async fn inner_errors_pass_through() {
        let result: DomainResult<()> =
            bounded(Duration::from_secs(1), "fails", async { Err(DomainError::UserNotFound) }).await;
        assert!(matches!(result, Err(DomainError::UserNotFound)));
    }
}
