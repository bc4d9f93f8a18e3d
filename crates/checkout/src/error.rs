//! Checkout error types.

use std::time::Duration;

use thiserror::Error;

use crate::payment::PaymentError;
use crate::shipping::ValidationErrors;
use crate::stage::CheckoutStage;

/// Errors that can occur while driving a checkout session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The action is not available in the current stage.
    #[error("Invalid checkout stage: cannot {action} from {current} stage")]
    InvalidStage {
        current: CheckoutStage,
        action: &'static str,
    },

    /// One or more shipping fields failed validation.
    #[error("Invalid shipping details: {0}")]
    Validation(ValidationErrors),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Review was reached without shipping details.
    #[error("Shipping details are missing")]
    MissingShippingInfo,

    /// No payment method has been validated for this session.
    #[error("No validated payment method")]
    MissingPaymentMethod,

    /// The cart changed after the payment method was validated.
    #[error("Cart changed since the payment method was validated; please re-enter payment")]
    CartChanged,

    /// The payment collaborator reported an error.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// The payment collaborator did not answer in time.
    #[error("Payment {operation} timed out after {timeout:?}")]
    PaymentTimeout {
        operation: &'static str,
        timeout: Duration,
    },
}

impl CheckoutError {
    /// Returns true if the user can correct input or retry the action.
    ///
    /// Only an unavailable payment system is unrecoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CheckoutError::Payment(e) => e.is_recoverable(),
            _ => true,
        }
    }

    /// Returns the field errors, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CheckoutError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
