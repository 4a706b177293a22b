//! API 客户端模块
//!
//! 所有 HTTP 通信集中在这里：固定基地址、统一的 Bearer 附带、
//! 统一的错误提取，以及 401 时恰好一次的 refresh-重试。
//! 端点元数据来自 `scuffers_shared::protocol::ApiRequest`，
//! 本模块只负责「怎么发」。

use gloo_net::http::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use scuffers_shared::BEARER_PREFIX;
use scuffers_shared::protocol::{
    AddToCartRequest, ApiRequest, ConfirmShippingRequest, CreateMpPreferenceRequest,
    CreateOrderRequest, HttpMethod, LoginRequest, MeRequest, MyCartRequest, RefreshRequest,
    RegisterRequest, RemoveFromCartRequest,
};
use scuffers_shared::{
    Cart, CreatedOrder, ErrorBody, MpPreference, RefreshResponse, RegisterResponse,
    ShippingConfirmation, TokenPair, User,
};

use crate::config;
use crate::web::storage::{BrowserTokens, TokenStore};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
mod tests;

// =========================================================
// 错误类型 (Error Type)
// =========================================================

/// API 调用错误。分类是扁平的、面向展示的：
/// 调用方只需要决定给用户看哪句话。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络层失败（fetch 抛错，没有拿到响应）
    Network(String),
    /// 非 2xx 响应。`detail` 是后端错误体里的人类可读信息
    Http { status: u16, detail: Option<String> },
    /// 2xx 但响应体解析失败
    Decode(String),
}

impl ApiError {
    /// HTTP 状态码（仅 Http 变体有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 给用户看的信息：后端 detail 优先，否则用调用方的兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "error de red: {msg}"),
            ApiError::Http { status, detail } => match detail {
                Some(detail) => write!(f, "HTTP {status}: {detail}"),
                None => write!(f, "HTTP {status}"),
            },
            ApiError::Decode(msg) => write!(f, "respuesta inválida: {msg}"),
        }
    }
}

// =========================================================
// HTTP 客户端 (ShopApi)
// =========================================================

/// 商店 API 客户端（无状态，token 每次从存储读取）
#[derive(Clone, Debug, PartialEq)]
pub struct ShopApi {
    base_url: String,
}

impl Default for ShopApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopApi {
    pub fn new() -> Self {
        Self::with_base(config::api_base())
    }

    pub fn with_base(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送一个协议请求并解析响应
    ///
    /// 鉴权端点返回 401 时做恰好一次 refresh-重试；
    /// refresh 也失败则清会话并把 401 原样返回。
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let wire = Wire { api: self, request };
        with_auth_retry(R::REQUIRES_AUTH, &wire).await
    }

    async fn perform<R: ApiRequest>(&self, request: &R) -> Result<Response, ApiError> {
        let url = self.url(&request.path());
        let mut builder = RequestBuilder::new(&url).method(as_gloo_method(R::METHOD));

        if R::REQUIRES_AUTH {
            if let Some(token) = BrowserTokens.access() {
                builder = builder.header("Authorization", &format!("{BEARER_PREFIX}{token}"));
            }
        }

        let req = if R::METHOD.has_body() {
            builder
                .header("Content-Type", "application/json")
                .json(request)
                .map_err(|e| ApiError::Network(e.to_string()))?
        } else {
            builder
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?
        };

        req.send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// 解析响应：非 2xx 提取错误体 detail；204 / 空 body 按 null 处理
    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if !(200..300).contains(&status) {
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message().map(str::to_string));
            return Err(ApiError::Http { status, detail });
        }

        let payload = if text.trim().is_empty() {
            "null"
        } else {
            text.as_str()
        };
        serde_json::from_str(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 用 refresh token 换新的 access token，返回是否成功
    async fn refresh_access(&self) -> bool {
        let Some(refresh) = BrowserTokens.refresh() else {
            return false;
        };

        let request = RefreshRequest { refresh };
        let Ok(response) = self.perform(&request).await else {
            return false;
        };
        match Self::parse::<RefreshResponse>(response).await {
            Ok(body) => {
                BrowserTokens.store(&body.access, body.refresh.as_deref());
                true
            }
            Err(_) => false,
        }
    }
}

fn as_gloo_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

// =========================================================
// 401 重试 (Auth Retry)
// =========================================================

/// 单次请求尝试的结果分类
#[derive(Debug)]
pub(crate) enum Attempt<T> {
    Success(T),
    /// 401：access token 过期或无效
    Unauthorized(ApiError),
    /// 其余失败（网络、非 401 状态、解析）
    Failed(ApiError),
}

/// [`ShopApi::send`] 的传输面
///
/// 生产实现是 [`Wire`]；测试换成脚本化实现，
/// 逐步验证重试序列和会话清理。
#[async_trait::async_trait(?Send)]
pub(crate) trait RetryTransport<T> {
    async fn attempt(&self) -> Attempt<T>;
    async fn refresh(&self) -> bool;
    fn session_lost(&self);
}

/// 重试策略本体：鉴权端点 401 时最多 refresh-重试一次
///
/// refresh 失败清会话并返回原 401；
/// 重试后的 401 不触发第二次 refresh。
pub(crate) async fn with_auth_retry<T>(
    requires_auth: bool,
    wire: &impl RetryTransport<T>,
) -> Result<T, ApiError> {
    match wire.attempt().await {
        Attempt::Success(value) => Ok(value),
        Attempt::Failed(err) => Err(err),
        Attempt::Unauthorized(err) => {
            if !requires_auth {
                return Err(err);
            }
            if !wire.refresh().await {
                wire.session_lost();
                return Err(err);
            }
            match wire.attempt().await {
                Attempt::Success(value) => Ok(value),
                Attempt::Unauthorized(err) | Attempt::Failed(err) => Err(err),
            }
        }
    }
}

struct Wire<'a, R: ApiRequest> {
    api: &'a ShopApi,
    request: &'a R,
}

#[async_trait::async_trait(?Send)]
impl<R: ApiRequest> RetryTransport<R::Response> for Wire<'_, R> {
    async fn attempt(&self) -> Attempt<R::Response> {
        let response = match self.api.perform(self.request).await {
            Ok(response) => response,
            Err(err) => return Attempt::Failed(err),
        };
        match ShopApi::parse(response).await {
            Ok(value) => Attempt::Success(value),
            Err(err) if err.status() == Some(401) => Attempt::Unauthorized(err),
            Err(err) => Attempt::Failed(err),
        }
    }

    async fn refresh(&self) -> bool {
        self.api.refresh_access().await
    }

    fn session_lost(&self) {
        // refresh 失败：token 已不可用，清掉避免反复 401
        log_error!("[Api] Token refresh failed, clearing session.");
        BrowserTokens.clear();
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ShopApi {
    leptos::prelude::use_context::<ShopApi>().expect("ShopApi should be provided")
}

// =========================================================
// Store 接口 (Backend Seam)
// =========================================================

/// 认证 / 购物车 / checkout store 消费的后端操作集合
///
/// 生产实现是 [`ShopApi`]；测试注入 mock，
/// store 的状态转移逻辑因此可以在宿主机上跑。
#[async_trait::async_trait(?Send)]
pub trait ShopBackend {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError>;
    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, ApiError>;
    async fn me(&self) -> Result<User, ApiError>;

    async fn my_cart(&self) -> Result<Cart, ApiError>;
    async fn cart_add(&self, slug: &str, quantity: u32, talle: Option<&str>)
    -> Result<Cart, ApiError>;
    async fn cart_remove(
        &self,
        slug: &str,
        quantity: u32,
        talle: Option<&str>,
    ) -> Result<Cart, ApiError>;

    async fn create_order(&self) -> Result<CreatedOrder, ApiError>;
    async fn confirm_shipping(
        &self,
        request: ConfirmShippingRequest,
    ) -> Result<ShippingConfirmation, ApiError>;
    async fn mp_preference(&self, order_id: i64) -> Result<MpPreference, ApiError>;
}

#[async_trait::async_trait(?Send)]
impl ShopBackend for ShopApi {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        // 前端把 email 填进 username；后端两种拼法都认
        self.send(&LoginRequest {
            username: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.send(&request).await
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.send(&MeRequest).await
    }

    async fn my_cart(&self) -> Result<Cart, ApiError> {
        self.send(&MyCartRequest).await
    }

    async fn cart_add(
        &self,
        slug: &str,
        quantity: u32,
        talle: Option<&str>,
    ) -> Result<Cart, ApiError> {
        self.send(&AddToCartRequest {
            product_slug: slug.to_string(),
            quantity,
            size: talle.map(str::to_string),
        })
        .await
    }

    async fn cart_remove(
        &self,
        slug: &str,
        quantity: u32,
        talle: Option<&str>,
    ) -> Result<Cart, ApiError> {
        self.send(&RemoveFromCartRequest {
            product_slug: slug.to_string(),
            quantity,
            size: talle.map(str::to_string),
        })
        .await
    }

    async fn create_order(&self) -> Result<CreatedOrder, ApiError> {
        self.send(&CreateOrderRequest {}).await
    }

    async fn confirm_shipping(
        &self,
        request: ConfirmShippingRequest,
    ) -> Result<ShippingConfirmation, ApiError> {
        self.send(&request).await
    }

    async fn mp_preference(&self, order_id: i64) -> Result<MpPreference, ApiError> {
        self.send(&CreateMpPreferenceRequest { order_id }).await
    }
}
