//! Discount Rules
//!
//! Typed rule model plus the non-fatal parser that turns the shop's raw
//! rules blob into it. Rule kind and condition are resolved into a single
//! tagged variant once, at parse time, so nothing downstream branches on
//! loosely-typed strings.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// A merchant-configured discount rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Opaque identifier, unique among rules.
    pub id: String,

    /// Display name, echoed into emitted discount messages.
    pub name: String,

    /// Whether the rule participates in evaluation.
    pub status: RuleStatus,

    /// Which checkout dimension the rule discounts.
    pub scope: RuleScope,

    /// Condition logic, resolved at parse time.
    pub kind: RuleKind,

    /// The discount the rule applies when eligible.
    pub action: RuleAction,
}

/// Rule lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    /// Participates in evaluation.
    Active,

    /// Configured but not live; filtered out before condition checks.
    Draft,
}

/// Checkout dimension a rule discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// Discounts the order subtotal.
    Order,

    /// Discounts delivery cost.
    Shipping,
}

/// Rule kind with its condition payload.
///
/// The raw record keeps the condition in a separate object; validation
/// pulls the required field into the matching variant so a rule can never
/// reach eligibility checks with its threshold missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleKind {
    /// Eligible when the in-scope subtotal meets a minimum.
    SpendThreshold {
        /// Minimum in-scope subtotal, inclusive.
        min_subtotal: Decimal,
    },

    /// Eligible when the in-scope quantity meets a minimum.
    ItemCount {
        /// Minimum total quantity over in-scope lines, inclusive.
        min_items: u64,
    },

    /// Shipping-path kind: eligible when the in-scope subtotal meets a
    /// minimum.
    ReduceShipping {
        /// Minimum in-scope subtotal, inclusive.
        min_subtotal: Decimal,
    },

    /// Reserved kind with no active evaluation path; parsed but never
    /// eligible.
    FreeShipping,
}

/// The discount a rule applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleAction {
    /// Percentage off (e.g. `10` for 10% off).
    Percentage(Decimal),

    /// Fixed amount off, in the cart's currency.
    Fixed(Decimal),

    /// Full shipping-cost reduction; equivalent to a 100% value on the
    /// delivery path and carries no value of its own.
    FreeShipping,
}

/// Why a decoded rule record failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleValidationError {
    /// `rule_type` was not one of the recognized kinds.
    #[error("unknown rule kind `{0}`")]
    UnknownKind(String),

    /// The kind's required condition field was absent.
    #[error("rule kind `{0}` requires condition field `{1}`")]
    MissingCondition(&'static str, &'static str),

    /// `action.discount_type` was not one of the recognized types.
    #[error("unknown discount type `{0}`")]
    UnknownDiscountType(String),

    /// A valued discount type was missing its `action.value`.
    #[error("discount type `{0}` requires a value")]
    MissingValue(&'static str),
}

/// Raw rule record as stored in the blob. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawRule {
    id: String,
    name: String,
    status: RuleStatus,
    #[serde(rename = "type")]
    scope: RuleScope,
    rule_type: String,
    #[serde(default)]
    condition: RawCondition,
    action: RawAction,
}

#[derive(Debug, Default, Deserialize)]
struct RawCondition {
    #[serde(default)]
    subtotal_gte: Option<Decimal>,
    #[serde(default)]
    item_count_gte: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawAction {
    discount_type: String,
    #[serde(default)]
    value: Option<Decimal>,
}

impl TryFrom<RawRule> for Rule {
    type Error = RuleValidationError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let kind = match raw.rule_type.as_str() {
            "spend_threshold" => RuleKind::SpendThreshold {
                min_subtotal: raw.condition.subtotal_gte.ok_or(
                    RuleValidationError::MissingCondition("spend_threshold", "subtotal_gte"),
                )?,
            },
            "item_count" => RuleKind::ItemCount {
                min_items: raw.condition.item_count_gte.ok_or(
                    RuleValidationError::MissingCondition("item_count", "item_count_gte"),
                )?,
            },
            "reduce_shipping" => RuleKind::ReduceShipping {
                min_subtotal: raw.condition.subtotal_gte.ok_or(
                    RuleValidationError::MissingCondition("reduce_shipping", "subtotal_gte"),
                )?,
            },
            "free_shipping" => RuleKind::FreeShipping,
            other => return Err(RuleValidationError::UnknownKind(other.to_owned())),
        };

        let action = match raw.action.discount_type.as_str() {
            "percentage" => RuleAction::Percentage(
                raw.action
                    .value
                    .ok_or(RuleValidationError::MissingValue("percentage"))?,
            ),
            "fixed" => RuleAction::Fixed(
                raw.action
                    .value
                    .ok_or(RuleValidationError::MissingValue("fixed"))?,
            ),
            "free_shipping" => RuleAction::FreeShipping,
            other => return Err(RuleValidationError::UnknownDiscountType(other.to_owned())),
        };

        Ok(Rule {
            id: raw.id,
            name: raw.name,
            status: raw.status,
            scope: raw.scope,
            kind,
            action,
        })
    }
}

impl Rule {
    /// Check whether the rule is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }
}

/// Parse the shop's rules blob into typed rules.
///
/// Parsing is non-fatal per record: a record that fails to decode or
/// validate is dropped and the rest are kept. An absent, empty, or wholly
/// undecodable blob yields an empty list — the "no rules configured"
/// state, never an error.
#[must_use]
pub fn parse_rules(blob: Option<&str>) -> Vec<Rule> {
    let Some(blob) = blob else {
        return Vec::new();
    };

    let records: Vec<serde_json::Value> = match serde_json::from_str(blob) {
        Ok(records) => records,
        Err(error) => {
            debug!(%error, "rules blob is not a JSON array; treating as no rules");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<RawRule>(record) {
            Ok(raw) => {
                let id = raw.id.clone();
                match Rule::try_from(raw) {
                    Ok(rule) => Some(rule),
                    Err(error) => {
                        debug!(rule_id = %id, %error, "skipping invalid rule record");
                        None
                    }
                }
            }
            Err(error) => {
                debug!(%error, "skipping undecodable rule record");
                None
            }
        })
        .collect()
}
