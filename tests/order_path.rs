//! Order-path evaluation scenarios, end to end over the wire shapes.

use chassis::prelude::*;
use testresult::TestResult;

fn input_document(lines: &str, classes: &str, blob: &str) -> String {
    let blob = serde_json::to_string(blob).unwrap_or_default();
    format!(
        r#"{{
            "cart": {{
                "lines": [{lines}],
                "deliveryGroups": [{{"id": "g1"}}]
            }},
            "discount": {{"discountClasses": [{classes}]}},
            "shop": {{"rulesBlob": {blob}}}
        }}"#
    )
}

fn bundle_line(id: &str, quantity: u64, subtotal: &str) -> String {
    format!(
        r#"{{"id": "{id}", "quantity": {quantity},
            "subtotalAmount": {{"amount": "{subtotal}", "currencyCode": "USD"}},
            "scopeMarker": "unique-pc-builder-id"}}"#
    )
}

fn plain_line(id: &str, quantity: u64, subtotal: &str) -> String {
    format!(
        r#"{{"id": "{id}", "quantity": {quantity},
            "subtotalAmount": {{"amount": "{subtotal}", "currencyCode": "USD"}}}}"#
    )
}

const SPEND_RULE: &str = r#"[{
    "id": "dsc-001",
    "name": "10% off orders over $100",
    "status": "active",
    "rule_type": "spend_threshold",
    "type": "order",
    "condition": {"subtotal_gte": 100},
    "action": {"discount_type": "percentage", "value": 10}
}]"#;

#[test]
fn spend_threshold_met_emits_single_percentage_candidate() -> TestResult {
    let document = input_document(&bundle_line("l1", 1, "120.0"), r#""ORDER""#, SPEND_RULE);
    let input: FunctionInput = serde_json::from_str(&document)?;

    let result = Engine::default().evaluate_order(&input);
    let json = serde_json::to_value(&result)?;

    assert_eq!(
        json,
        serde_json::json!({
            "operations": [{
                "orderDiscountsAdd": {
                    "selectionStrategy": "MAXIMUM",
                    "candidates": [{
                        "message": "10% off orders over $100",
                        "targets": [{"orderSubtotal": {"excludedCartLineIds": []}}],
                        "value": {"percentage": {"value": "10"}},
                        "conditions": [{
                            "orderMinimumSubtotal": {
                                "minimumAmount": "100",
                                "excludedCartLineIds": []
                            }
                        }]
                    }]
                }
            }]
        })
    );

    Ok(())
}

#[test]
fn draft_rule_emits_nothing() -> TestResult {
    let blob = SPEND_RULE.replace(r#""status": "active""#, r#""status": "draft""#);
    let document = input_document(&bundle_line("l1", 1, "120.0"), r#""ORDER""#, &blob);
    let input: FunctionInput = serde_json::from_str(&document)?;

    let result = Engine::default().evaluate_order(&input);
    assert!(result.operations.is_empty());

    Ok(())
}

#[test]
fn item_count_rule_excludes_out_of_scope_line_from_target() -> TestResult {
    let lines = format!(
        "{}, {}, {}",
        bundle_line("l1", 2, "40.0"),
        bundle_line("l2", 1, "25.0"),
        plain_line("l3", 4, "99.0"),
    );
    let blob = r#"[{
        "id": "dsc-002",
        "name": "$15 off when buying 3+ items",
        "status": "active",
        "rule_type": "item_count",
        "type": "order",
        "condition": {"item_count_gte": 3},
        "action": {"discount_type": "fixed", "value": 15}
    }]"#;
    let document = input_document(&lines, r#""ORDER""#, blob);
    let input: FunctionInput = serde_json::from_str(&document)?;

    let result = Engine::default().evaluate_order(&input);
    let json = serde_json::to_value(&result)?;

    // In-scope quantities sum to 3; the plain line's quantity must not count.
    let candidate = &json["operations"][0]["orderDiscountsAdd"]["candidates"][0];
    assert_eq!(
        candidate["targets"],
        serde_json::json!([{"orderSubtotal": {"excludedCartLineIds": ["l3"]}}])
    );
    assert_eq!(candidate["value"], serde_json::json!({"fixedAmount": {"amount": "15"}}));
    assert_eq!(
        candidate["conditions"],
        serde_json::json!([{
            "cartLineMinimumQuantity": {"minimumQuantity": 3, "ids": ["l1", "l2"]}
        }])
    );

    Ok(())
}

#[test]
fn item_count_below_threshold_emits_nothing() -> TestResult {
    let lines = format!(
        "{}, {}",
        bundle_line("l1", 1, "40.0"),
        plain_line("l2", 10, "99.0"),
    );
    let blob = r#"[{
        "id": "dsc-002", "name": "n", "status": "active",
        "rule_type": "item_count", "type": "order",
        "condition": {"item_count_gte": 3},
        "action": {"discount_type": "fixed", "value": 15}
    }]"#;
    let document = input_document(&lines, r#""ORDER""#, blob);
    let input: FunctionInput = serde_json::from_str(&document)?;

    assert!(Engine::default().evaluate_order(&input).operations.is_empty());

    Ok(())
}

#[test]
fn garbage_blob_behaves_as_zero_rules() -> TestResult {
    let document = input_document(&bundle_line("l1", 1, "120.0"), r#""ORDER""#, "not-json");
    let input: FunctionInput = serde_json::from_str(&document)?;

    let result = Engine::default().evaluate_order(&input);
    assert_eq!(serde_json::to_string(&result)?, r#"{"operations":[]}"#);

    Ok(())
}

#[test]
fn cart_without_bundle_lines_is_never_discounted() -> TestResult {
    let document = input_document(&plain_line("l1", 2, "500.0"), r#""ORDER""#, SPEND_RULE);
    let input: FunctionInput = serde_json::from_str(&document)?;

    assert!(Engine::default().evaluate_order(&input).operations.is_empty());

    Ok(())
}

#[test]
fn disallowed_discount_class_emits_nothing() -> TestResult {
    let document = input_document(&bundle_line("l1", 1, "120.0"), r#""SHIPPING""#, SPEND_RULE);
    let input: FunctionInput = serde_json::from_str(&document)?;

    assert!(Engine::default().evaluate_order(&input).operations.is_empty());

    Ok(())
}

#[test]
fn multiple_eligible_rules_emit_one_operation_with_all_candidates() -> TestResult {
    let blob = r#"[
        {"id": "a", "name": "10% off", "status": "active",
         "rule_type": "spend_threshold", "type": "order",
         "condition": {"subtotal_gte": 100},
         "action": {"discount_type": "percentage", "value": 10}},
        {"id": "b", "name": "$5 off", "status": "active",
         "rule_type": "item_count", "type": "order",
         "condition": {"item_count_gte": 1},
         "action": {"discount_type": "fixed", "value": 5}},
        {"id": "c", "name": "never", "status": "active",
         "rule_type": "spend_threshold", "type": "order",
         "condition": {"subtotal_gte": 1000},
         "action": {"discount_type": "percentage", "value": 50}}
    ]"#;
    let document = input_document(&bundle_line("l1", 1, "120.0"), r#""ORDER""#, blob);
    let input: FunctionInput = serde_json::from_str(&document)?;

    let result = Engine::default().evaluate_order(&input);

    assert_eq!(result.operations.len(), 1);
    let operation = result.operations.first().ok_or("expected one operation")?;
    let add = &operation.order_discounts_add;
    assert_eq!(add.selection_strategy, SelectionStrategy::Maximum);
    assert_eq!(add.candidates.len(), 2, "ineligible rule must not appear");

    Ok(())
}

#[test]
fn evaluation_is_deterministic() -> TestResult {
    let lines = format!(
        "{}, {}",
        bundle_line("l1", 2, "80.5"),
        plain_line("l2", 1, "10.0"),
    );
    let document = input_document(&lines, r#""ORDER""#, SPEND_RULE);
    let input: FunctionInput = serde_json::from_str(&document)?;
    let engine = Engine::default();

    let first = serde_json::to_string(&engine.evaluate_order(&input))?;
    let second = serde_json::to_string(&engine.evaluate_order(&input))?;

    assert_eq!(first, second, "identical inputs must serialize identically");

    Ok(())
}
