use serde_json::json;

use super::*;

/// 两个条目、总数 3、总额 45000 的典型服务端快照
fn server_cart() -> Cart {
    serde_json::from_value(json!({
        "id": 1,
        "items": [
            {
                "producto": { "slug": "hoodie-negro", "nombre": "Hoodie Negro", "precio": 15000 },
                "cantidad": 2,
                "talle": "M",
                "subtotal": 30000
            },
            {
                "product": { "slug": "remera-blanca", "nombre": "Remera Blanca", "precio": 15000 },
                "quantity": 1,
                "subtotal": 15000
            }
        ],
        "total_items": 3,
        "total_precio": "45000.00"
    }))
    .unwrap()
}

#[test]
fn snapshot_replaces_state_wholesale() {
    let mut state = CartState::default();
    let ticket = state.begin_mutation();
    assert!(state.updating);

    state.apply_snapshot(ticket, server_cart());

    assert!(!state.updating);
    assert_eq!(state.item_count(), 3);
    assert_eq!(state.total_amount(), 45000.0);
    let cart = state.cart.as_ref().unwrap();
    assert!(cart.find_item("hoodie-negro", Some("M")).is_some());
    assert!(cart.find_item("remera-blanca", None).is_some());
}

#[test]
fn stale_response_is_discarded_entirely() {
    let mut state = CartState::default();
    let first = state.begin_mutation();
    let second = state.begin_mutation();

    // 第一次变更的响应晚到：整个丢弃，不合并
    let stale: Cart = serde_json::from_value(json!({
        "items": [],
        "total_items": 99,
        "total_precio": 1.0
    }))
    .unwrap();
    state.apply_snapshot(first, stale);
    assert!(state.cart.is_none());
    assert!(state.updating);

    state.apply_snapshot(second, server_cart());
    assert_eq!(state.item_count(), 3);
    assert!(!state.updating);
}

#[test]
fn stale_failure_does_not_clobber_newer_mutation() {
    let mut state = CartState::default();
    let first = state.begin_mutation();
    let second = state.begin_mutation();

    state.fail_mutation(first, "viejo error".into());
    assert!(state.error.is_none());
    assert!(state.updating);

    state.apply_snapshot(second, server_cart());
    assert!(state.error.is_none());
    assert!(!state.updating);
}

#[test]
fn begin_mutation_clears_previous_error() {
    let mut state = CartState::default();
    let ticket = state.begin_mutation();
    state.fail_mutation(ticket, "Sin stock disponible".into());
    assert_eq!(state.error.as_deref(), Some("Sin stock disponible"));

    state.begin_mutation();
    assert!(state.error.is_none());
}

#[test]
fn derive_last_added_reads_the_snapshot() {
    let cart = server_cart();
    let added = derive_last_added(&cart, "hoodie-negro", Some("M")).unwrap();

    assert_eq!(added.item.cantidad, 2);
    assert_eq!(added.total_items, 3);
    assert_eq!(added.total_amount, 45000.0);
}

#[test]
fn derive_last_added_missing_item_skips_popup() {
    let cart = server_cart();
    // talle 不匹配视为未找到
    assert!(derive_last_added(&cart, "hoodie-negro", Some("XL")).is_none());
    assert!(derive_last_added(&cart, "inexistente", None).is_none());
}

#[test]
fn totals_fall_back_to_zero_before_first_load() {
    let state = CartState::default();
    assert_eq!(state.item_count(), 0);
    assert_eq!(state.total_amount(), 0.0);
}
