//! Checkout 流程模块
//!
//! Mercado Pago 结账是严格的三步链：
//! 创建订单 → 确认配送 → 创建支付偏好。
//! 任一步失败立即中止，后续请求不再发出；
//! 成功则把浏览器交给 `init_point` 的外部跳转。

use scuffers_shared::protocol::ConfirmShippingRequest;
use scuffers_shared::Address;

use crate::api::{ApiError, ShopBackend};

#[cfg(test)]
mod tests;

/// 没有保存地址时的占位配送数据（门店自提场景，后台再协调）
const PLACEHOLDER_DIRECCION: &str = "A coordinar";
const PLACEHOLDER_CIUDAD: &str = "Rosario";
const PLACEHOLDER_PROVINCIA: &str = "Santa Fe";
const PLACEHOLDER_CODIGO_POSTAL: &str = "2000";

// =========================================================
// 错误 (Checkout Error)
// =========================================================

/// 结账链的失败原因，按失败的步骤区分
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutError {
    CreateOrder(ApiError),
    ConfirmShipping(ApiError),
    Preference(ApiError),
    /// 偏好创建成功但响应里没有跳转链接
    MissingInitPoint,
}

impl CheckoutError {
    /// 给用户看的文案：后端 detail（含 mp_error）优先
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::CreateOrder(err) => {
                err.user_message("No se pudo crear el pedido.")
            }
            CheckoutError::ConfirmShipping(err) => {
                err.user_message("No se pudo confirmar el envío.")
            }
            CheckoutError::Preference(err) => {
                err.user_message("No se pudo iniciar el pago con Mercado Pago.")
            }
            CheckoutError::MissingInitPoint => {
                "Mercado Pago no devolvió un link de pago.".to_string()
            }
        }
    }
}

// =========================================================
// 结账链 (Checkout Chain)
// =========================================================

/// 结账链的成功结果
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub order_id: i64,
    /// MP 支付页链接，调用方负责跳转
    pub init_point: String,
}

/// 组装配送确认请求：有可用保存地址用它，否则用占位数据
pub fn shipping_request(order_id: i64, address: &Address) -> ConfirmShippingRequest {
    if address.is_usable() {
        ConfirmShippingRequest {
            order_id,
            direccion: address.direccion.clone(),
            ciudad: address.ciudad.clone(),
            provincia: address.provincia.clone(),
            codigo_postal: address.codigo_postal.clone(),
            costo_envio: 0.0,
            observaciones: String::new(),
        }
    } else {
        ConfirmShippingRequest {
            order_id,
            direccion: PLACEHOLDER_DIRECCION.into(),
            ciudad: PLACEHOLDER_CIUDAD.into(),
            provincia: PLACEHOLDER_PROVINCIA.into(),
            codigo_postal: PLACEHOLDER_CODIGO_POSTAL.into(),
            costo_envio: 0.0,
            observaciones: String::new(),
        }
    }
}

/// 执行完整的 MP 结账链
///
/// 订单从当前购物车创建（服务端读取，不传条目）。
/// 返回的 `init_point` 由调用方执行外部跳转。
pub async fn run_mp_checkout<B: ShopBackend>(
    backend: &B,
    address: &Address,
) -> Result<CheckoutOutcome, CheckoutError> {
    let order = backend
        .create_order()
        .await
        .map_err(CheckoutError::CreateOrder)?;
    log_info!("[Checkout] Order {} created.", order.id);

    backend
        .confirm_shipping(shipping_request(order.id, address))
        .await
        .map_err(CheckoutError::ConfirmShipping)?;

    let preference = backend
        .mp_preference(order.id)
        .await
        .map_err(CheckoutError::Preference)?;

    let init_point = preference
        .init_point
        .filter(|p| !p.is_empty())
        .ok_or(CheckoutError::MissingInitPoint)?;

    Ok(CheckoutOutcome {
        order_id: order.id,
        init_point,
    })
}
