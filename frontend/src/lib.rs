//! Scuffers 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `guard`: 路由守卫状态机
//! - `api`: HTTP 客户端与后端接口
//! - `auth` / `cart` / `checkout`: 业务状态管理
//! - `components`: UI 组件层

// =========================================================
// 日志宏：wasm 走浏览器 console，宿主测试走标准输出
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

// =========================================================
// 模块 (Modules)
// =========================================================

pub mod api;
mod auth;
mod cart;
mod checkout;
mod config;
mod guard;

mod components {
    pub mod account;
    pub mod added_popup;
    pub mod admin;
    pub mod cart_page;
    pub mod checkout_feedback;
    pub mod contact;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod newsletter;
    pub mod orders;
    pub mod product_card;
    pub mod product_detail;
    pub mod register;
    pub mod shop;
}

// 原生 Web API 封装模块
// 提供对浏览器 History / LocalStorage 的轻量级封装，
// 所有 web_sys 调用集中在此。
pub(crate) mod web {
    pub mod route;
    pub mod router;
    pub mod storage;
}

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ShopApi;
use crate::auth::AuthContext;
use crate::cart::CartContext;
use crate::components::account::AccountPage;
use crate::components::admin::{AdminHomePage, AdminOrderDetailPage, AdminOrdersPage, AdminProductsPage};
use crate::components::added_popup::AddedPopup;
use crate::components::cart_page::CartPage;
use crate::components::checkout_feedback::{
    CheckoutFailurePage, CheckoutPendingPage, CheckoutSuccessPage,
};
use crate::components::contact::ContactPage;
use crate::components::home::HomePage;
use crate::components::layout::{Footer, Header, WhatsAppButton};
use crate::components::login::LoginPage;
use crate::components::orders::{MyOrdersPage, OrderDetailPage};
use crate::components::product_detail::ProductDetailPage;
use crate::components::register::RegisterPage;
use crate::components::shop::ShopPage;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};
use crate::web::storage::BrowserTokens;

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Shop { cat, search } => view! { <ShopPage cat=cat search=search /> }.into_any(),
        AppRoute::ProductDetail { slug } => view! { <ProductDetailPage slug=slug /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Login { .. } => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Contact => view! { <ContactPage /> }.into_any(),
        AppRoute::MyAccount => view! { <AccountPage /> }.into_any(),
        AppRoute::MyOrders => view! { <MyOrdersPage /> }.into_any(),
        AppRoute::OrderDetail { id } => view! { <OrderDetailPage id=id /> }.into_any(),
        AppRoute::CheckoutSuccess { raw_query } => {
            view! { <CheckoutSuccessPage raw_query=raw_query /> }.into_any()
        }
        AppRoute::CheckoutFailure => view! { <CheckoutFailurePage /> }.into_any(),
        AppRoute::CheckoutPending => view! { <CheckoutPendingPage /> }.into_any(),
        AppRoute::AdminHome => view! { <AdminHomePage /> }.into_any(),
        AppRoute::AdminProducts => view! { <AdminProductsPage /> }.into_any(),
        AppRoute::AdminOrders => view! { <AdminOrdersPage /> }.into_any(),
        AppRoute::AdminOrderDetail { id } => view! { <AdminOrderDetailPage id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    let cart_ctx = CartContext::new();
    provide_context(cart_ctx);
    let api = ShopApi::new();
    provide_context(api.clone());

    // 2. 旧 token key 一次性迁移，然后恢复会话
    web::storage::migrate_legacy_keys();
    {
        let api = api.clone();
        spawn_local(async move {
            match auth::restore_with(&api, &BrowserTokens).await {
                Some(user) => auth_ctx.set_authenticated(user),
                None => auth_ctx.set_anonymous(),
            }
        });
    }

    // 3. 认证快照信号，注入路由服务实现守卫（解耦！）
    let auth_snapshot = auth_ctx.snapshot();

    // 4. 认证状态驱动购物车：登录后加载，登出时清空
    Effect::new(move |_| {
        let snapshot = auth_snapshot.get();
        if snapshot.is_loading {
            return;
        }
        if snapshot.is_authenticated {
            let api = api.clone();
            spawn_local(async move {
                cart_ctx.refresh(&api).await;
            });
        } else {
            cart_ctx.reset();
        }
    });

    view! {
        <Router auth=auth_snapshot>
            <div class="min-h-screen flex flex-col bg-base-100">
                <Header />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
            <AddedPopup />
            <WhatsAppButton />
        </Router>
    }
}
