//! Cart Snapshot model
//!
//! Read-only view of the checkout state handed to the engine on every
//! evaluation call: cart lines, delivery groups, the permitted discount
//! classes, and the shop's configured rules blob.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Full input document for one evaluation call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInput {
    /// Cart state at evaluation time.
    pub cart: Cart,

    /// Discount context declared by the checkout.
    pub discount: DiscountContext,

    /// Shop-level configuration.
    pub shop: Shop,
}

/// Cart state: ordered lines plus delivery groups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart lines in checkout order.
    #[serde(default)]
    pub lines: Vec<CartLine>,

    /// Delivery groups; non-empty is a structural invariant on the
    /// delivery evaluation path.
    #[serde(default)]
    pub delivery_groups: Vec<DeliveryGroup>,
}

/// One purchasable entry in the cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Opaque line identifier, unique within the cart.
    pub id: String,

    /// Units of the line's merchandise.
    pub quantity: u64,

    /// Pre-discount subtotal for the line.
    pub subtotal_amount: Amount,

    /// Tag identifying whether the line belongs to the discount-eligible
    /// bundle. Absent on ordinary lines.
    #[serde(default)]
    pub scope_marker: Option<String>,
}

/// A monetary amount. All amounts in one cart share a currency, so the
/// currency code is carried for display only and never used in arithmetic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    /// Decimal amount in major units.
    pub amount: Decimal,

    /// ISO currency code.
    #[serde(default)]
    pub currency_code: String,
}

/// A set of cart lines that ship together.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryGroup {
    /// Opaque delivery group identifier.
    pub id: String,
}

/// Discount context declared by the checkout for this evaluation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountContext {
    /// Discount classes the checkout currently permits evaluating.
    #[serde(default)]
    pub discount_classes: Vec<DiscountClass>,
}

/// Permission gate for which checkout dimension may be discounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountClass {
    /// Order-level discounts are permitted.
    Order,

    /// Shipping-level discounts are permitted.
    Shipping,

    /// A class this engine does not evaluate. Kept so an unrecognized
    /// class skips gating instead of failing the whole input decode.
    #[serde(other)]
    Other,
}

/// Shop-level configuration relevant to the engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    /// Opaque string that, when present, decodes to an array of rule
    /// records. Absence or decode failure means "no rules configured".
    #[serde(default)]
    pub rules_blob: Option<String>,
}

impl Cart {
    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl DiscountContext {
    /// Check whether the checkout permits a given discount class.
    #[must_use]
    pub fn permits(&self, class: DiscountClass) -> bool {
        self.discount_classes.contains(&class)
    }
}
