//! Chassis prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, DiscountClass, FunctionInput},
    engine::{Engine, EngineError},
    output::{Candidate, DeliveryDiscounts, DiscountValue, OrderDiscounts, SelectionStrategy},
    rules::{Rule, RuleAction, RuleKind, RuleScope, RuleStatus, parse_rules},
    scope::{DEFAULT_BUNDLE_MARKER, ScopedLines},
};
