//! Checkout stage state machine.

use serde::{Deserialize, Serialize};

/// The stage a checkout session is in.
///
/// State transitions:
/// ```text
/// Shipping ◄──► Payment ◄──► Review ──► Confirmed
/// ```
/// Forward moves require a successful validation; backward moves are always
/// allowed except out of the terminal `Confirmed` stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStage {
    /// Collecting the shipping address.
    #[default]
    Shipping,

    /// Collecting and validating card details.
    Payment,

    /// Order summary, waiting for "place order".
    Review,

    /// Payment confirmed and cart cleared (terminal state).
    Confirmed,
}

impl CheckoutStage {
    /// Returns the 1-based step number shown in the progress indicator.
    ///
    /// `Confirmed` is past the last step and has no number.
    pub fn step_number(&self) -> Option<u8> {
        match self {
            CheckoutStage::Shipping => Some(1),
            CheckoutStage::Payment => Some(2),
            CheckoutStage::Review => Some(3),
            CheckoutStage::Confirmed => None,
        }
    }

    /// Returns the stage a "back" action leads to, if any.
    pub fn previous(&self) -> Option<CheckoutStage> {
        match self {
            CheckoutStage::Payment => Some(CheckoutStage::Shipping),
            CheckoutStage::Review => Some(CheckoutStage::Payment),
            CheckoutStage::Shipping | CheckoutStage::Confirmed => None,
        }
    }

    /// Returns true if a "back" action is allowed in this stage.
    pub fn can_go_back(&self) -> bool {
        self.previous().is_some()
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStage::Confirmed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Shipping => "Shipping",
            CheckoutStage::Payment => "Payment",
            CheckoutStage::Review => "Review",
            CheckoutStage::Confirmed => "Confirmed",
        }
    }
}

impl std::fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stage_is_shipping() {
        assert_eq!(CheckoutStage::default(), CheckoutStage::Shipping);
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(CheckoutStage::Shipping.step_number(), Some(1));
        assert_eq!(CheckoutStage::Payment.step_number(), Some(2));
        assert_eq!(CheckoutStage::Review.step_number(), Some(3));
        assert_eq!(CheckoutStage::Confirmed.step_number(), None);
    }

    #[test]
    fn test_back_transitions() {
        assert!(!CheckoutStage::Shipping.can_go_back());
        assert_eq!(CheckoutStage::Payment.previous(), Some(CheckoutStage::Shipping));
        assert_eq!(CheckoutStage::Review.previous(), Some(CheckoutStage::Payment));
        assert!(!CheckoutStage::Confirmed.can_go_back());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!CheckoutStage::Shipping.is_terminal());
        assert!(!CheckoutStage::Payment.is_terminal());
        assert!(!CheckoutStage::Review.is_terminal());
        assert!(CheckoutStage::Confirmed.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckoutStage::Shipping.to_string(), "Shipping");
        assert_eq!(CheckoutStage::Confirmed.to_string(), "Confirmed");
    }
}
