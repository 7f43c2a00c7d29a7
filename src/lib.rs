//! Chassis
//!
//! Chassis is a deterministic discount rule evaluation engine for checkout
//! extensions: given a cart snapshot, a merchant's configured rule blob,
//! and the permitted discount classes, it emits order and delivery
//! discount operations, or an explicit empty result. It performs no I/O,
//! keeps no state between calls, and degrades to "no discount" on any
//! malformed input.

pub mod cart;
pub mod eligibility;
pub mod engine;
pub mod output;
pub mod prelude;
pub mod rules;
pub mod scope;
