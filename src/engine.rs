//! Evaluation engine
//!
//! Ties the pipeline together: parse rules, partition the cart, evaluate
//! eligibility, build candidates, and emit at most one operation per path.
//! Every branch that cannot produce a discount resolves to an explicit
//! empty result; the single exception is a delivery evaluation against a
//! cart with no delivery groups, which is a structural invariant violation
//! the engine surfaces rather than masks.

use rust_decimal::Decimal;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;
use tracing::debug;

use crate::cart::{DiscountClass, FunctionInput};
use crate::eligibility::{eligible_for_delivery, eligible_for_order};
use crate::output::{
    Candidate, Condition, DeliveryDiscounts, DeliveryOperation, DiscountValue, DiscountsAdd,
    OrderDiscounts, OrderOperation, SelectionStrategy, Target,
};
use crate::rules::{Rule, RuleAction, RuleKind, parse_rules};
use crate::scope::{DEFAULT_BUNDLE_MARKER, ScopedLines};

/// Errors surfaced by the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The delivery path was invoked against a cart with no delivery
    /// groups. There is no safe default target, and the checkout engine
    /// itself requires a non-empty set, so this is surfaced instead of
    /// silently no-opping.
    #[error("cart has no delivery groups")]
    NoDeliveryGroups,
}

/// The discount rule evaluation engine.
///
/// Stateless apart from the injected bundle marker: every evaluation is an
/// independent, side-effect-free function of its input.
#[derive(Debug, Clone)]
pub struct Engine {
    bundle_marker: String,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_marker(DEFAULT_BUNDLE_MARKER)
    }
}

impl Engine {
    /// Create an engine scoped to a custom bundle marker.
    #[must_use]
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            bundle_marker: marker.into(),
        }
    }

    /// The bundle marker this engine scopes to.
    #[must_use]
    pub fn bundle_marker(&self) -> &str {
        &self.bundle_marker
    }

    /// Evaluate the order-discount path.
    ///
    /// Returns one `orderDiscountsAdd` operation under the `Maximum`
    /// selection strategy holding a candidate per eligible order rule, or
    /// an empty operation list when the cart is empty, the `Order`
    /// discount class is not permitted, no line carries the bundle
    /// marker, or no rule is eligible.
    #[must_use]
    pub fn evaluate_order(&self, input: &FunctionInput) -> OrderDiscounts {
        if input.cart.is_empty() {
            return OrderDiscounts::default();
        }

        if !input.discount.permits(DiscountClass::Order) {
            debug!("order discount class not permitted");
            return OrderDiscounts::default();
        }

        let scoped = ScopedLines::partition(&input.cart, &self.bundle_marker);
        if scoped.is_empty() {
            debug!("no in-scope lines; order path fails closed");
            return OrderDiscounts::default();
        }

        let rules = parse_rules(input.shop.rules_blob.as_deref());
        let candidates: Vec<Candidate> = rules
            .iter()
            .filter(|rule| eligible_for_order(rule, &scoped))
            .filter_map(|rule| order_candidate(rule, &scoped))
            .collect();

        if candidates.is_empty() {
            return OrderDiscounts::default();
        }

        OrderDiscounts {
            operations: vec![OrderOperation {
                order_discounts_add: DiscountsAdd {
                    selection_strategy: SelectionStrategy::Maximum,
                    candidates,
                },
            }],
        }
    }

    /// Evaluate the delivery-discount path.
    ///
    /// Returns one `deliveryDiscountsAdd` operation under the `All`
    /// selection strategy holding a candidate per eligible shipping rule,
    /// each targeting the first delivery group, or an empty operation
    /// list for the usual no-op cases.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoDeliveryGroups`] when the cart carries no
    /// delivery groups. Checked before any empty-result shortcut so the
    /// structural violation is never masked by a no-op.
    pub fn evaluate_delivery(
        &self,
        input: &FunctionInput,
    ) -> Result<DeliveryDiscounts, EngineError> {
        let Some(first_group) = input.cart.delivery_groups.first() else {
            return Err(EngineError::NoDeliveryGroups);
        };

        if input.cart.is_empty() {
            return Ok(DeliveryDiscounts::default());
        }

        if !input.discount.permits(DiscountClass::Shipping) {
            debug!("shipping discount class not permitted");
            return Ok(DeliveryDiscounts::default());
        }

        let scoped = ScopedLines::partition(&input.cart, &self.bundle_marker);
        if scoped.is_empty() {
            debug!("no in-scope lines; delivery path fails closed");
            return Ok(DeliveryDiscounts::default());
        }

        let rules = parse_rules(input.shop.rules_blob.as_deref());
        let candidates: Vec<Candidate> = rules
            .iter()
            .filter(|rule| eligible_for_delivery(rule, &scoped))
            .map(|rule| delivery_candidate(rule, &first_group.id))
            .collect();

        if candidates.is_empty() {
            return Ok(DeliveryDiscounts::default());
        }

        Ok(DeliveryDiscounts {
            operations: vec![DeliveryOperation {
                delivery_discounts_add: DiscountsAdd {
                    selection_strategy: SelectionStrategy::All,
                    candidates,
                },
            }],
        })
    }
}

/// Build the order-path candidate for an eligible rule.
///
/// The target excludes every out-of-scope line so the discount can only
/// reduce the bundle's own contribution, and the rule's condition is
/// re-declared in the checkout engine's predicate language so the
/// application-time re-check matches this engine's decision.
fn order_candidate(rule: &Rule, scoped: &ScopedLines<'_>) -> Option<Candidate> {
    let value = match rule.action {
        RuleAction::Percentage(value) => DiscountValue::Percentage { value },
        RuleAction::Fixed(amount) => DiscountValue::FixedAmount { amount },
        // Already filtered by eligibility; no order-path value exists.
        RuleAction::FreeShipping => return None,
    };

    let excluded = || {
        scoped
            .excluded_line_ids()
            .iter()
            .map(|id| (*id).to_owned())
            .collect::<Vec<_>>()
    };

    let conditions: SmallVec<[Condition; 1]> = match rule.kind {
        RuleKind::SpendThreshold { min_subtotal } => smallvec![Condition::OrderMinimumSubtotal {
            minimum_amount: min_subtotal,
            excluded_cart_line_ids: excluded(),
        }],
        RuleKind::ItemCount { min_items } => smallvec![Condition::CartLineMinimumQuantity {
            minimum_quantity: min_items,
            ids: scoped.in_scope_ids().map(str::to_owned).collect(),
        }],
        RuleKind::ReduceShipping { .. } | RuleKind::FreeShipping => SmallVec::new(),
    };

    Some(Candidate {
        message: rule.name.clone(),
        targets: smallvec![Target::OrderSubtotal {
            excluded_cart_line_ids: excluded(),
        }],
        value,
        conditions,
    })
}

/// Build the delivery-path candidate for an eligible rule, targeting the
/// first delivery group.
fn delivery_candidate(rule: &Rule, group_id: &str) -> Candidate {
    let value = match rule.action {
        RuleAction::Percentage(value) => DiscountValue::Percentage { value },
        RuleAction::Fixed(amount) => DiscountValue::FixedAmount { amount },
        RuleAction::FreeShipping => DiscountValue::Percentage {
            value: Decimal::ONE_HUNDRED,
        },
    };

    Candidate {
        message: rule.name.clone(),
        targets: smallvec![Target::DeliveryGroup {
            id: group_id.to_owned(),
        }],
        value,
        conditions: SmallVec::new(),
    }
}
