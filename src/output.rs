//! Discount operation output model
//!
//! The wire shapes handed back to the checkout engine. Field and variant
//! names serialize to the camelCase / SCREAMING_SNAKE_CASE forms the
//! checkout engine expects; construction is left to the engine module.

use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;

/// Policy the checkout engine uses to combine simultaneously eligible
/// candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStrategy {
    /// Apply every eligible candidate.
    All,

    /// Apply only the candidate yielding the largest discount. The
    /// max-pick happens downstream; this engine declares all candidates.
    Maximum,
}

/// Numeric value of a discount candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountValue {
    /// Percentage off.
    Percentage {
        /// Percentage as a whole-number decimal (e.g. `10` for 10%).
        value: Decimal,
    },

    /// Fixed amount off, in the cart's currency.
    FixedAmount {
        /// Amount in major units.
        amount: Decimal,
    },
}

/// What a discount candidate applies to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Target {
    /// The order subtotal, minus the listed lines.
    OrderSubtotal {
        /// Lines whose contribution the discount must never reduce.
        excluded_cart_line_ids: Vec<String>,
    },

    /// A single delivery group.
    DeliveryGroup {
        /// Delivery group identifier.
        id: String,
    },
}

/// Eligibility predicate re-declared for the checkout engine's own
/// re-validation at application time.
///
/// These must agree with this engine's eligibility decision; they exist to
/// protect against the cart changing between evaluation and application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Condition {
    /// The order subtotal, minus excluded lines, must meet a minimum.
    OrderMinimumSubtotal {
        /// Minimum subtotal, inclusive.
        minimum_amount: Decimal,

        /// Lines excluded from the subtotal before comparison.
        excluded_cart_line_ids: Vec<String>,
    },

    /// The listed lines' combined quantity must meet a minimum.
    CartLineMinimumQuantity {
        /// Minimum quantity, inclusive.
        minimum_quantity: u64,

        /// Lines whose quantities count toward the minimum.
        ids: Vec<String>,
    },
}

/// One proposed discount offered to the checkout engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Display message, taken from the rule name.
    pub message: String,

    /// What the discount applies to.
    pub targets: SmallVec<[Target; 1]>,

    /// Discount value.
    pub value: DiscountValue,

    /// Re-declared eligibility predicates; omitted when empty.
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub conditions: SmallVec<[Condition; 1]>,
}

/// A batch of candidates plus the strategy for combining them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountsAdd {
    /// How the checkout engine combines simultaneously true candidates.
    pub selection_strategy: SelectionStrategy,

    /// All eligible candidates for this scope.
    pub candidates: Vec<Candidate>,
}

/// Order-path operation entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOperation {
    /// Order discount batch.
    pub order_discounts_add: DiscountsAdd,
}

/// Delivery-path operation entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOperation {
    /// Delivery discount batch.
    pub delivery_discounts_add: DiscountsAdd,
}

/// Order-path result: empty, or exactly one operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderDiscounts {
    /// Emitted operations; never more than one entry.
    pub operations: Vec<OrderOperation>,
}

/// Delivery-path result: empty, or exactly one operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeliveryDiscounts {
    /// Emitted operations; never more than one entry.
    pub operations: Vec<DeliveryOperation>,
}
