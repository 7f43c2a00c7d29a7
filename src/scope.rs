//! Scope Filter
//!
//! Partitions cart lines into the bundle lines these rules may discount and
//! everything else. The partition fails closed: a cart with no marked line
//! produces an empty in-scope set, which short-circuits both evaluation
//! paths to an empty result.

use rust_decimal::Decimal;

use crate::cart::{Cart, CartLine};

/// Sentinel tag identifying a cart line as part of the merchant's bundle.
///
/// Injected into the filter rather than matched inline so the partition can
/// be exercised with arbitrary tag values.
pub const DEFAULT_BUNDLE_MARKER: &str = "unique-pc-builder-id";

/// Cart lines partitioned by bundle membership.
///
/// Both sides preserve cart order, so identical carts always produce
/// identical exclusion lists.
#[derive(Debug)]
pub struct ScopedLines<'a> {
    in_scope: Vec<&'a CartLine>,
    excluded_line_ids: Vec<&'a str>,
}

impl<'a> ScopedLines<'a> {
    /// Partition a cart's lines against a bundle marker.
    #[must_use]
    pub fn partition(cart: &'a Cart, marker: &str) -> Self {
        let mut in_scope = Vec::new();
        let mut excluded_line_ids = Vec::new();

        for line in &cart.lines {
            if line.scope_marker.as_deref() == Some(marker) {
                in_scope.push(line);
            } else {
                excluded_line_ids.push(line.id.as_str());
            }
        }

        Self {
            in_scope,
            excluded_line_ids,
        }
    }

    /// In-scope lines, in cart order.
    #[must_use]
    pub fn in_scope(&self) -> &[&'a CartLine] {
        &self.in_scope
    }

    /// Ids of out-of-scope lines, in cart order. Used as the exclusion
    /// list on every order-level target so non-bundle purchases are never
    /// discounted.
    #[must_use]
    pub fn excluded_line_ids(&self) -> &[&'a str] {
        &self.excluded_line_ids
    }

    /// Ids of in-scope lines, in cart order.
    pub fn in_scope_ids(&self) -> impl Iterator<Item = &'a str> {
        self.in_scope.iter().map(|line| line.id.as_str())
    }

    /// Sum of subtotal amounts over in-scope lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.in_scope
            .iter()
            .map(|line| line.subtotal_amount.amount)
            .sum()
    }

    /// Sum of quantities over in-scope lines.
    #[must_use]
    pub fn quantity(&self) -> u64 {
        self.in_scope.iter().map(|line| line.quantity).sum()
    }

    /// Check if no line carried the bundle marker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_scope.is_empty()
    }
}
