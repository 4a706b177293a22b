//! 后台管理（仅 staff / superuser，守卫在路由层）

pub mod orders;
pub mod products;

pub use orders::{AdminOrderDetailPage, AdminOrdersPage};
pub use products::AdminProductsPage;

use leptos::prelude::*;

use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 后台顶部导航
#[component]
pub(super) fn AdminNav(active: &'static str) -> impl IntoView {
    let router = use_router();

    let tab = move |label: &'static str, route: AppRoute, href: &'static str| {
        let is_active = label == active;
        view! {
            <a
                href=href
                role="tab"
                class="tab"
                class:tab-active=is_active
                on:click=move |ev: leptos::web_sys::MouseEvent| {
                    ev.prevent_default();
                    router.navigate_to(route.clone());
                }
            >
                {label}
            </a>
        }
    };

    view! {
        <div role="tablist" class="tabs tabs-bordered mb-6">
            {tab("Inicio", AppRoute::AdminHome, "/admin")}
            {tab("Productos", AppRoute::AdminProducts, "/admin/products")}
            {tab("Pedidos", AppRoute::AdminOrders, "/admin/orders")}
        </div>
    }
}

#[component]
pub fn AdminHomePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="max-w-4xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold uppercase tracking-wide mb-6">"Administración"</h1>
            <AdminNav active="Inicio" />

            <div class="grid md:grid-cols-2 gap-4">
                <div
                    class="card bg-base-100 border border-base-200 cursor-pointer hover:shadow-lg transition-shadow"
                    on:click=move |_| router.navigate_to(AppRoute::AdminProducts)
                >
                    <div class="card-body">
                        <h2 class="card-title">"Productos"</h2>
                        <p class="text-base-content/60">
                            "Crear, editar y dar de baja productos del catálogo."
                        </p>
                    </div>
                </div>
                <div
                    class="card bg-base-100 border border-base-200 cursor-pointer hover:shadow-lg transition-shadow"
                    on:click=move |_| router.navigate_to(AppRoute::AdminOrders)
                >
                    <div class="card-body">
                        <h2 class="card-title">"Pedidos"</h2>
                        <p class="text-base-content/60">
                            "Ver todos los pedidos y actualizar su estado."
                        </p>
                    </div>
                </div>
            </div>
        </div>
    }
}
