//! Checkout flow controller.

use std::future::Future;

use cart::{Cart, CartItem, CartSnapshot};
use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::payment::{CardDetails, PaymentCollaborator, PaymentError, PaymentMethodToken};
use crate::shipping::ShippingInfo;
use crate::stage::CheckoutStage;

/// Returned to the caller when an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,

    /// Payment ID assigned by the collaborator.
    pub payment_id: String,
    pub shipping: ShippingInfo,
    pub items: Vec<CartItem>,

    #[serde(with = "common::money::decimal")]
    pub total: Money,
    pub placed_at: DateTime<Utc>,
}

/// In-progress checkout state.
///
/// Nothing here outlives the session: abandoning checkout drops it all.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    stage: CheckoutStage,
    shipping: Option<ShippingInfo>,
    payment_method: Option<PaymentMethodToken>,
    review: Option<CartSnapshot>,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutSession {
    /// Returns the current stage.
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Returns the last accepted shipping details.
    pub fn shipping(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    /// Returns true if a tokenized payment method is held.
    pub fn is_card_valid(&self) -> bool {
        self.payment_method.is_some()
    }

    /// Returns the cart contents the payment method was validated against.
    pub fn review(&self) -> Option<&CartSnapshot> {
        self.review.as_ref()
    }

    /// Returns the confirmation once the order is placed.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }
}

/// Drives one checkout session through Shipping, Payment and Review.
///
/// Every transition is a method called for an explicit user action; nothing
/// advances the stage implicitly. The cart is borrowed per call rather than
/// owned so the cart page and checkout share the same value.
pub struct CheckoutFlow<P: PaymentCollaborator> {
    payment: P,
    config: CheckoutConfig,
    session: CheckoutSession,
}

impl<P: PaymentCollaborator> CheckoutFlow<P> {
    /// Creates a checkout flow in the Shipping stage with default settings.
    pub fn new(payment: P) -> Self {
        Self::with_config(payment, CheckoutConfig::default())
    }

    /// Creates a checkout flow with explicit settings.
    pub fn with_config(payment: P, config: CheckoutConfig) -> Self {
        Self {
            payment,
            config,
            session: CheckoutSession::default(),
        }
    }

    /// Returns the session state.
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Returns the current stage.
    pub fn stage(&self) -> CheckoutStage {
        self.session.stage
    }

    /// Returns the payment collaborator.
    pub fn payment(&self) -> &P {
        &self.payment
    }

    /// Shipping → Payment.
    ///
    /// On validation failure the stage does not change and every field error
    /// is returned.
    #[tracing::instrument(skip(self, info), fields(stage = %self.session.stage))]
    pub fn submit_shipping(&mut self, info: ShippingInfo) -> Result<CheckoutStage> {
        self.expect_stage(CheckoutStage::Shipping, "submit shipping details")?;

        if let Err(errors) = info.validate() {
            tracing::debug!(error_count = errors.len(), "shipping details rejected");
            return Err(CheckoutError::Validation(errors));
        }

        self.session.shipping = Some(info.trimmed());
        Ok(self.advance_to(CheckoutStage::Payment))
    }

    /// Payment → Review.
    ///
    /// Asks the collaborator to validate and tokenize the card. Nothing is
    /// charged. The cart contents are captured for the order summary.
    #[tracing::instrument(skip(self, card, cart), fields(stage = %self.session.stage))]
    pub async fn submit_payment(&mut self, card: &CardDetails, cart: &Cart) -> Result<CheckoutStage> {
        self.expect_stage(CheckoutStage::Payment, "submit payment details")?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let token = self
            .call_payment("validate", self.payment.validate(card))
            .await?;

        self.session.payment_method = Some(token);
        self.session.review = Some(cart.snapshot());
        Ok(self.advance_to(CheckoutStage::Review))
    }

    /// Review → Confirmed.
    ///
    /// Preconditions are checked before the collaborator is contacted. On a
    /// successful confirm the cart is cleared and the confirmation returned.
    /// On failure the session stays in Review and the action can be retried;
    /// nothing is retried automatically. A confirm timeout is the exception:
    /// the token is discarded and the session returns to Payment.
    #[tracing::instrument(skip(self, cart), fields(stage = %self.session.stage))]
    pub async fn place_order(&mut self, cart: &mut Cart) -> Result<OrderConfirmation> {
        self.expect_stage(CheckoutStage::Review, "place order")?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let shipping = self
            .session
            .shipping
            .clone()
            .ok_or(CheckoutError::MissingShippingInfo)?;
        let token = self
            .session
            .payment_method
            .clone()
            .ok_or(CheckoutError::MissingPaymentMethod)?;

        let snapshot = cart.snapshot();
        if self.session.review.as_ref() != Some(&snapshot) {
            // The token was validated for different contents.
            self.session.payment_method = None;
            self.session.review = None;
            self.session.stage = CheckoutStage::Payment;
            tracing::info!("cart changed during review; payment must be re-entered");
            return Err(CheckoutError::CartChanged);
        }

        let started = std::time::Instant::now();
        let confirmation = match self
            .call_payment("confirm", self.payment.confirm(&token, snapshot.total))
            .await
        {
            Ok(confirmation) => confirmation,
            Err(e @ CheckoutError::PaymentTimeout { .. }) => {
                // Whether the charge went through is unknown; the token must not be reused.
                self.session.payment_method = None;
                self.session.review = None;
                self.session.stage = CheckoutStage::Payment;
                tracing::warn!("confirm timed out; payment must be re-entered");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        cart.clear();

        let order = OrderConfirmation {
            order_id: OrderId::generate(),
            payment_id: confirmation.payment_id,
            shipping,
            items: snapshot.items,
            total: snapshot.total,
            placed_at: Utc::now(),
        };

        self.session.payment_method = None;
        self.session.confirmation = Some(order.clone());
        self.advance_to(CheckoutStage::Confirmed);

        metrics::counter!("checkout_orders_placed_total").increment(1);
        metrics::histogram!("checkout_place_order_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::info!(order_id = %order.order_id, total = %order.total, "order placed");

        Ok(order)
    }

    /// Steps back one stage.
    ///
    /// Leaving Review discards the payment method and order summary. Leaving
    /// Payment keeps the shipping details so the form can be edited.
    #[tracing::instrument(skip(self), fields(stage = %self.session.stage))]
    pub fn back(&mut self) -> Result<CheckoutStage> {
        let previous = self
            .session
            .stage
            .previous()
            .ok_or(CheckoutError::InvalidStage {
                current: self.session.stage,
                action: "go back",
            })?;

        if self.session.stage == CheckoutStage::Review {
            self.session.payment_method = None;
            self.session.review = None;
        }

        self.session.stage = previous;
        tracing::debug!(to = %previous, "checkout stepped back");
        Ok(previous)
    }

    /// Abandons the session and starts again at Shipping.
    pub fn reset(&mut self) {
        self.session = CheckoutSession::default();
        tracing::debug!("checkout session reset");
    }

    fn expect_stage(&self, expected: CheckoutStage, action: &'static str) -> Result<()> {
        if self.session.stage != expected {
            return Err(CheckoutError::InvalidStage {
                current: self.session.stage,
                action,
            });
        }
        Ok(())
    }

    fn advance_to(&mut self, next: CheckoutStage) -> CheckoutStage {
        tracing::info!(from = %self.session.stage, to = %next, "checkout stage advanced");
        metrics::counter!("checkout_stage_advanced_total", "stage" => next.as_str()).increment(1);
        self.session.stage = next;
        next
    }

    /// Awaits a collaborator call, bounded by the configured timeout.
    async fn call_payment<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = std::result::Result<T, PaymentError>>,
    ) -> Result<T> {
        let timeout = self.config.payment_timeout;
        let outcome = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result.map_err(CheckoutError::from),
            Err(_) => Err(CheckoutError::PaymentTimeout { operation, timeout }),
        };

        if let Err(e) = &outcome {
            metrics::counter!("checkout_payment_failures_total", "operation" => operation)
                .increment(1);
            if e.is_recoverable() {
                tracing::warn!(operation, error = %e, "payment call failed");
            } else {
                tracing::error!(operation, error = %e, "payment system unavailable");
            }
        }

        outcome
    }
}
