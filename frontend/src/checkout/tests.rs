use serde_json::json;

use super::*;
use crate::api::mock::MockBackend;

fn saved_address() -> Address {
    Address {
        direccion: "San Martín 1234".into(),
        ciudad: "Rosario".into(),
        provincia: "Santa Fe".into(),
        codigo_postal: "2000".into(),
        telefono: "341-5550000".into(),
    }
}

#[tokio::test]
async fn full_chain_yields_init_point() {
    let backend = MockBackend::new();
    backend.mock_ok("create_order", json!({ "id": 42 }));
    backend.mock_ok("confirm_shipping", json!({ "id": 42, "total_final": "45500.00" }));
    backend.mock_ok(
        "mp_preference",
        json!({
            "init_point": "https://mp.example/checkout/42",
            "preference_id": "pref-42"
        }),
    );

    let outcome = run_mp_checkout(&backend, &saved_address()).await.unwrap();

    assert_eq!(outcome.order_id, 42);
    assert_eq!(outcome.init_point, "https://mp.example/checkout/42");
    assert_eq!(
        backend.recorded_calls(),
        vec![
            "create_order",
            "confirm_shipping order=42",
            "mp_preference order=42"
        ]
    );
}

#[tokio::test]
async fn shipping_failure_stops_the_chain() {
    let backend = MockBackend::new();
    backend.mock_ok("create_order", json!({ "id": 7 }));
    backend.mock_err(
        "confirm_shipping",
        ApiError::Http {
            status: 400,
            detail: Some("El pedido ya fue confirmado.".into()),
        },
    );
    backend.mock_ok("mp_preference", json!({ "init_point": "https://mp.example/x" }));

    let err = run_mp_checkout(&backend, &saved_address()).await.unwrap_err();

    assert_eq!(err.user_message(), "El pedido ya fue confirmado.");
    // 第二步失败后不能再发第三步
    assert_eq!(
        backend.recorded_calls(),
        vec!["create_order", "confirm_shipping order=7"]
    );
}

#[tokio::test]
async fn create_order_failure_sends_nothing_else() {
    let backend = MockBackend::new();
    backend.mock_err(
        "create_order",
        ApiError::Http {
            status: 400,
            detail: Some("El carrito está vacío.".into()),
        },
    );

    let err = run_mp_checkout(&backend, &saved_address()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::CreateOrder(_)));
    assert_eq!(backend.recorded_calls(), vec!["create_order"]);
}

#[tokio::test]
async fn missing_init_point_is_an_error() {
    let backend = MockBackend::new();
    backend.mock_ok("create_order", json!({ "id": 9 }));
    backend.mock_ok("confirm_shipping", json!({ "id": 9 }));
    backend.mock_ok("mp_preference", json!({ "preference_id": "pref-9" }));

    let err = run_mp_checkout(&backend, &saved_address()).await.unwrap_err();
    assert_eq!(err, CheckoutError::MissingInitPoint);
}

#[test]
fn shipping_request_uses_saved_address() {
    let request = shipping_request(1, &saved_address());
    assert_eq!(request.direccion, "San Martín 1234");
    assert_eq!(request.ciudad, "Rosario");
    assert_eq!(request.costo_envio, 0.0);
}

#[test]
fn shipping_request_falls_back_to_placeholders() {
    let request = shipping_request(1, &Address::default());
    assert_eq!(request.direccion, "A coordinar");
    assert_eq!(request.ciudad, "Rosario");
    assert_eq!(request.provincia, "Santa Fe");
    assert_eq!(request.codigo_postal, "2000");
}

#[test]
fn mp_error_message_wins_over_detail() {
    let err = CheckoutError::Preference(ApiError::Http {
        status: 502,
        detail: Some("Invalid access token".into()),
    });
    assert_eq!(err.user_message(), "Invalid access token");

    let bare = CheckoutError::Preference(ApiError::Network("timeout".into()));
    assert_eq!(
        bare.user_message(),
        "No se pudo iniciar el pago con Mercado Pago."
    );
}
