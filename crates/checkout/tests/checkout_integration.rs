//! Integration tests for the checkout flow driving a real cart.

use std::time::Duration;

use cart::Cart;
use catalog::{CatalogService, InMemoryCatalog};
use checkout::{
    CardDetails, CheckoutConfig, CheckoutError, CheckoutFlow, CheckoutStage,
    InMemoryPaymentCollaborator, ShippingField, ShippingInfo,
};
use common::{Money, ProductId};

struct TestHarness {
    flow: CheckoutFlow<InMemoryPaymentCollaborator>,
    payment: InMemoryPaymentCollaborator,
    catalog: InMemoryCatalog,
    cart: Cart,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config(CheckoutConfig::default())
    }

    fn with_config(config: CheckoutConfig) -> Self {
        let payment = InMemoryPaymentCollaborator::new();
        Self {
            flow: CheckoutFlow::with_config(payment.clone(), config),
            payment,
            catalog: InMemoryCatalog::seeded().unwrap(),
            cart: Cart::new(),
        }
    }

    async fn add(&mut self, id: u64, quantity: u32) {
        let product = self.catalog.get_product(ProductId::new(id)).await.unwrap();
        self.cart.add_item(product, quantity).unwrap();
    }

    async fn fill_cart(&mut self) {
        self.add(1, 1).await;
        self.add(2, 1).await;
    }

    async fn advance_to_review(&mut self) {
        self.flow.submit_shipping(valid_shipping()).unwrap();
        self.flow
            .submit_payment(&valid_card(), &self.cart)
            .await
            .unwrap();
    }
}

fn valid_shipping() -> ShippingInfo {
    ShippingInfo {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        address: "10 Navy Yard".to_string(),
        city: "Arlington".to_string(),
        state: "VA".to_string(),
        zip_code: "22202".to_string(),
    }
}

fn valid_card() -> CardDetails {
    CardDetails::new("4242 4242 4242 4242", "Grace Hopper", "08/30", "737")
}

#[tokio::test]
async fn test_happy_path_checkout() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    assert_eq!(h.cart.total(), Money::from_cents(34998));

    let stage = h.flow.submit_shipping(valid_shipping()).unwrap();
    assert_eq!(stage, CheckoutStage::Payment);

    let stage = h.flow.submit_payment(&valid_card(), &h.cart).await.unwrap();
    assert_eq!(stage, CheckoutStage::Review);
    assert_eq!(h.payment.confirm_calls().await, 0);

    let confirmation = h.flow.place_order(&mut h.cart).await.unwrap();

    assert_eq!(h.flow.stage(), CheckoutStage::Confirmed);
    assert!(h.flow.stage().is_terminal());
    assert!(h.cart.is_empty());
    assert_eq!(h.cart.total(), Money::zero());
    assert_eq!(confirmation.total, Money::from_cents(34998));
    assert!(confirmation.order_id.as_str().starts_with("ORD-"));
    assert!(confirmation.payment_id.starts_with("PAY-"));
    assert_eq!(h.payment.confirmation_count().await, 1);
}

#[tokio::test]
async fn test_invalid_email_keeps_shipping_stage() {
    let mut h = TestHarness::new();
    h.fill_cart().await;

    let info = ShippingInfo {
        email: "not-an-email".to_string(),
        ..valid_shipping()
    };
    let err = h.flow.submit_shipping(info).unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.for_field(ShippingField::Email).unwrap().message,
        "Invalid email address"
    );
    assert_eq!(h.flow.stage(), CheckoutStage::Shipping);
}

#[tokio::test]
async fn test_declined_card_at_payment_stage() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.flow.submit_shipping(valid_shipping()).unwrap();

    let card = CardDetails::new("4000 0000 0000 0002", "Grace Hopper", "08/30", "737");
    let err = h.flow.submit_payment(&card, &h.cart).await.unwrap_err();

    assert_eq!(err.to_string(), "Your card was declined.");
    assert!(err.is_recoverable());
    assert_eq!(h.flow.stage(), CheckoutStage::Payment);
    assert!(!h.flow.session().is_card_valid());

    h.flow.submit_payment(&valid_card(), &h.cart).await.unwrap();
    assert_eq!(h.flow.stage(), CheckoutStage::Review);
}

#[tokio::test]
async fn test_confirm_declined_then_retry_succeeds() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.advance_to_review().await;
    h.payment.set_decline_on_confirm(true).await;

    let err = h.flow.place_order(&mut h.cart).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Payment(_)));
    assert_eq!(h.flow.stage(), CheckoutStage::Review);
    assert_eq!(h.cart.total(), Money::from_cents(34998));

    h.payment.set_decline_on_confirm(false).await;
    let confirmation = h.flow.place_order(&mut h.cart).await.unwrap();
    assert_eq!(confirmation.total, Money::from_cents(34998));
    assert_eq!(h.payment.confirm_calls().await, 2);
}

#[tokio::test]
async fn test_payment_system_unavailable() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.advance_to_review().await;
    h.payment
        .set_unavailable(Some("Payment system permanently unavailable".to_string()))
        .await;

    let err = h.flow.place_order(&mut h.cart).await.unwrap_err();

    assert_eq!(err.to_string(), "Payment system permanently unavailable");
    assert!(!err.is_recoverable());
    assert_eq!(h.payment.confirm_calls().await, 1);
    assert_eq!(h.payment.confirmation_count().await, 0);
    assert_ne!(h.flow.stage(), CheckoutStage::Confirmed);
    assert_eq!(h.cart.len(), 2);
}

#[tokio::test]
async fn test_place_order_with_emptied_cart() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.advance_to_review().await;
    h.cart.clear();

    let err = h.flow.place_order(&mut h.cart).await.unwrap_err();

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(h.payment.confirm_calls().await, 0);
}

#[tokio::test]
async fn test_cart_change_requires_new_payment_method() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.advance_to_review().await;

    h.add(3, 1).await;
    let err = h.flow.place_order(&mut h.cart).await.unwrap_err();

    assert!(matches!(err, CheckoutError::CartChanged));
    assert_eq!(h.flow.stage(), CheckoutStage::Payment);
    assert!(!h.flow.session().is_card_valid());
    assert_eq!(h.payment.confirm_calls().await, 0);

    h.flow.submit_payment(&valid_card(), &h.cart).await.unwrap();
    let confirmation = h.flow.place_order(&mut h.cart).await.unwrap();
    assert_eq!(confirmation.total, Money::from_cents(64997));
    assert_eq!(confirmation.items.len(), 3);
}

#[tokio::test]
async fn test_back_navigation_preserves_shipping() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.advance_to_review().await;

    assert_eq!(h.flow.back().unwrap(), CheckoutStage::Payment);
    assert!(!h.flow.session().is_card_valid());
    assert_eq!(h.flow.back().unwrap(), CheckoutStage::Shipping);
    assert_eq!(h.flow.session().shipping(), Some(&valid_shipping()));

    let err = h.flow.back().unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::InvalidStage {
            current: CheckoutStage::Shipping,
            ..
        }
    ));

    // Editing the form and moving forward again works from the start.
    let edited = ShippingInfo {
        city: "Washington".to_string(),
        ..valid_shipping()
    };
    h.flow.submit_shipping(edited.clone()).unwrap();
    assert_eq!(h.flow.session().shipping(), Some(&edited));
}

#[tokio::test]
async fn test_slow_confirm_discards_token_and_returns_to_payment() {
    let config = CheckoutConfig::default().with_payment_timeout(Duration::from_millis(50));
    let mut h = TestHarness::with_config(config);
    h.fill_cart().await;
    h.advance_to_review().await;
    h.payment.set_delay(Some(Duration::from_secs(10))).await;

    let err = h.flow.place_order(&mut h.cart).await.unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::PaymentTimeout {
            operation: "confirm",
            ..
        }
    ));
    assert!(err.is_recoverable());
    assert_eq!(h.flow.stage(), CheckoutStage::Payment);
    assert!(!h.flow.session().is_card_valid());
    assert!(h.flow.session().review().is_none());
    assert!(!h.cart.is_empty());

    let err = h.flow.place_order(&mut h.cart).await.unwrap_err();
    assert!(matches!(err, CheckoutError::InvalidStage { .. }));

    h.payment.set_delay(None).await;
    h.flow.submit_payment(&valid_card(), &h.cart).await.unwrap();
    h.flow.place_order(&mut h.cart).await.unwrap();
    assert_eq!(h.flow.stage(), CheckoutStage::Confirmed);
    assert_eq!(h.payment.confirmation_count().await, 1);
}

#[tokio::test]
async fn test_confirmed_only_after_successful_confirm() {
    // Run a series of failing attempts; the stage must never be Confirmed
    // while the collaborator has recorded no successful charge.
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.advance_to_review().await;

    h.payment.set_decline_on_confirm(true).await;
    for _ in 0..3 {
        let _ = h.flow.place_order(&mut h.cart).await;
        assert_eq!(h.payment.confirmation_count().await, 0);
        assert_ne!(h.flow.stage(), CheckoutStage::Confirmed);
    }

    h.payment.set_decline_on_confirm(false).await;
    h.flow.place_order(&mut h.cart).await.unwrap();
    assert_eq!(h.payment.confirmation_count().await, 1);
    assert_eq!(h.flow.stage(), CheckoutStage::Confirmed);
}

#[tokio::test]
async fn test_reset_after_confirmation_starts_new_session() {
    let mut h = TestHarness::new();
    h.fill_cart().await;
    h.advance_to_review().await;
    h.flow.place_order(&mut h.cart).await.unwrap();

    h.flow.reset();
    assert_eq!(h.flow.stage(), CheckoutStage::Shipping);
    assert!(h.flow.session().confirmation().is_none());
}
