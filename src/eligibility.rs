//! Condition Evaluator
//!
//! Decides, per rule, whether the scoped cart data satisfies the rule's
//! condition. Thresholds on both paths are evaluated against the in-scope
//! subtotal, never the full cart subtotal.

use crate::rules::{Rule, RuleAction, RuleKind, RuleScope};
use crate::scope::ScopedLines;

/// Check whether an order-scope rule is eligible against the scoped cart.
///
/// Draft rules, shipping-scope rules, and the inert `free_shipping` kind
/// are never eligible here. A rule whose action is `free_shipping` carries
/// no valid order-path value, so it is excluded as well.
#[must_use]
pub fn eligible_for_order(rule: &Rule, scoped: &ScopedLines<'_>) -> bool {
    if !rule.is_active() || rule.scope != RuleScope::Order {
        return false;
    }

    if rule.action == RuleAction::FreeShipping {
        return false;
    }

    match rule.kind {
        RuleKind::SpendThreshold { min_subtotal } => scoped.subtotal() >= min_subtotal,
        RuleKind::ItemCount { min_items } => scoped.quantity() >= min_items,
        RuleKind::ReduceShipping { .. } | RuleKind::FreeShipping => false,
    }
}

/// Check whether a shipping-scope rule is eligible against the scoped cart.
///
/// Only active `reduce_shipping` rules ever qualify; the threshold is the
/// in-scope subtotal, a deliberate scoping choice mirrored from the order
/// path.
#[must_use]
pub fn eligible_for_delivery(rule: &Rule, scoped: &ScopedLines<'_>) -> bool {
    if !rule.is_active() || rule.scope != RuleScope::Shipping {
        return false;
    }

    match rule.kind {
        RuleKind::ReduceShipping { min_subtotal } => scoped.subtotal() >= min_subtotal,
        RuleKind::SpendThreshold { .. } | RuleKind::ItemCount { .. } | RuleKind::FreeShipping => {
            false
        }
    }
}
