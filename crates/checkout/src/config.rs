//! Checkout configuration.

use std::time::Duration;

/// Default upper bound on a single payment collaborator call.
pub const DEFAULT_PAYMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// How long to wait for the payment collaborator before giving up.
    pub payment_timeout: Duration,
}

impl CheckoutConfig {
    /// Returns a copy with a different payment timeout.
    pub fn with_payment_timeout(mut self, timeout: Duration) -> Self {
        self.payment_timeout = timeout;
        self
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            payment_timeout: DEFAULT_PAYMENT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(
            CheckoutConfig::default().payment_timeout,
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_with_payment_timeout() {
        let config = CheckoutConfig::default().with_payment_timeout(Duration::from_millis(250));
        assert_eq!(config.payment_timeout, Duration::from_millis(250));
    }
}
