//! Payment collaborator trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use common::Money;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("Invalid regex"));

/// Card number the in-memory collaborator always declines.
pub const DECLINED_TEST_CARD: &str = "4000000000000002";

/// Raw card input. Forwarded to the collaborator, never kept by the session.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub number: String,
    pub name: String,

    /// `MM/YY`
    pub expiry: String,
    pub cvc: String,
}

impl CardDetails {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        expiry: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }

    /// Returns the card number with spaces removed.
    pub fn normalized_number(&self) -> String {
        self.number.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Returns the last four digits of the card number.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.normalized_number().chars().collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format_args!("**** {}", self.last4()))
            .field("name", &self.name)
            .field("expiry", &"**/**")
            .field("cvc", &"***")
            .finish()
    }
}

/// Opaque reference to a tokenized payment method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentMethodToken(String);

impl PaymentMethodToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentMethodToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a successful confirm (charge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// The payment ID assigned by the collaborator.
    pub payment_id: String,
    pub amount: Money,
}

/// Errors reported by the payment collaborator.
///
/// Messages are the collaborator's own and are shown to the user unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Card details were rejected during validation.
    #[error("{0}")]
    InvalidCard(String),

    /// The charge was refused.
    #[error("{0}")]
    Declined(String),

    /// The payment system cannot be reached. Retrying will not help.
    #[error("{0}")]
    Unavailable(String),
}

impl PaymentError {
    /// Returns true if the user can correct input or retry.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PaymentError::Unavailable(_))
    }
}

/// The external payment processor.
#[async_trait]
pub trait PaymentCollaborator: Send + Sync {
    /// Validates card details and returns a tokenized payment method.
    ///
    /// Does not charge the card.
    async fn validate(&self, card: &CardDetails) -> Result<PaymentMethodToken, PaymentError>;

    /// Charges a previously tokenized payment method.
    async fn confirm(
        &self,
        token: &PaymentMethodToken,
        amount: Money,
    ) -> Result<PaymentConfirmation, PaymentError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    /// Issued tokens and the last four digits they stand for.
    tokens: HashMap<PaymentMethodToken, String>,
    confirmations: Vec<PaymentConfirmation>,
    next_id: u32,
    confirm_calls: usize,
    unavailable: Option<String>,
    decline_on_confirm: bool,
    delay: Option<Duration>,
}

/// In-memory payment collaborator for testing and the local storefront.
///
/// Applies the card form rules (16-digit number, `MM/YY` expiry, 3-digit CVC,
/// name required) and declines [`DECLINED_TEST_CARD`]. Tokens are single-use.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentCollaborator {
    state: Arc<Mutex<InMemoryPaymentState>>,
}

impl InMemoryPaymentCollaborator {
    /// Creates a new in-memory payment collaborator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with [`PaymentError::Unavailable`] until reset with `None`.
    pub async fn set_unavailable(&self, reason: Option<String>) {
        self.state.lock().await.unavailable = reason;
    }

    /// Configures the service to decline confirm calls.
    pub async fn set_decline_on_confirm(&self, decline: bool) {
        self.state.lock().await.decline_on_confirm = decline;
    }

    /// Delays every response, for exercising timeouts.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        self.state.lock().await.delay = delay;
    }

    /// Returns the number of successful confirms.
    pub async fn confirmation_count(&self) -> usize {
        self.state.lock().await.confirmations.len()
    }

    /// Returns how many times confirm was called, successful or not.
    pub async fn confirm_calls(&self) -> usize {
        self.state.lock().await.confirm_calls
    }

    /// Returns true if the token is issued and not yet used.
    pub async fn has_token(&self, token: &PaymentMethodToken) -> bool {
        self.state.lock().await.tokens.contains_key(token)
    }

    async fn pause(&self) {
        let delay = self.state.lock().await.delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn check_card(card: &CardDetails) -> Result<(), PaymentError> {
    let number = card.normalized_number();
    if number.len() != 16 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(PaymentError::InvalidCard(
            "Card number must be 16 digits".to_string(),
        ));
    }
    if card.name.trim().is_empty() {
        return Err(PaymentError::InvalidCard(
            "Name on card is required".to_string(),
        ));
    }
    if !EXPIRY_RE.is_match(card.expiry.trim()) {
        return Err(PaymentError::InvalidCard(
            "Invalid expiry date (MM/YY)".to_string(),
        ));
    }
    let cvc = card.cvc.trim();
    if cvc.len() != 3 || !cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(PaymentError::InvalidCard("CVC must be 3 digits".to_string()));
    }
    Ok(())
}

#[async_trait]
impl PaymentCollaborator for InMemoryPaymentCollaborator {
    async fn validate(&self, card: &CardDetails) -> Result<PaymentMethodToken, PaymentError> {
        self.pause().await;
        let mut state = self.state.lock().await;

        if let Some(reason) = &state.unavailable {
            return Err(PaymentError::Unavailable(reason.clone()));
        }

        check_card(card)?;
        if card.normalized_number() == DECLINED_TEST_CARD {
            return Err(PaymentError::InvalidCard(
                "Your card was declined.".to_string(),
            ));
        }

        state.next_id += 1;
        let token = PaymentMethodToken::new(format!("pm_{:04}", state.next_id));
        state.tokens.insert(token.clone(), card.last4());

        Ok(token)
    }

    async fn confirm(
        &self,
        token: &PaymentMethodToken,
        amount: Money,
    ) -> Result<PaymentConfirmation, PaymentError> {
        self.pause().await;
        let mut state = self.state.lock().await;
        state.confirm_calls += 1;

        if let Some(reason) = &state.unavailable {
            return Err(PaymentError::Unavailable(reason.clone()));
        }

        if !state.tokens.contains_key(token) {
            return Err(PaymentError::InvalidCard(
                "No such payment method".to_string(),
            ));
        }

        if state.decline_on_confirm {
            return Err(PaymentError::Declined("Payment declined".to_string()));
        }

        state.tokens.remove(token);
        state.next_id += 1;
        let confirmation = PaymentConfirmation {
            payment_id: format!("PAY-{:04}", state.next_id),
            amount,
        };
        state.confirmations.push(confirmation.clone());

        Ok(confirmation)
    }
}
