//! 页面骨架：Header / Footer

use leptos::prelude::*;

use crate::auth::{logout_with, use_auth};
use crate::cart::use_cart;
use crate::components::icons::{ShoppingBag, UserRound};
use crate::components::newsletter::NewsletterForm;
use crate::web::route::AppRoute;
use crate::web::router::{RouterService, use_router};
use crate::web::storage::BrowserTokens;

/// 生成拦截默认跳转、走内部路由的点击处理器
fn nav(router: RouterService, route: AppRoute) -> impl Fn(leptos::web_sys::MouseEvent) {
    move |ev| {
        ev.prevent_default();
        router.navigate_to(route.clone());
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let cart = use_cart();
    let state = auth.state();
    let count = cart.item_count();
    // view! 会把闭包里的 `>` 当成标签结束符，比较必须在宏外做
    let has_items = move || count.get() > 0;

    let on_logout = move |_| {
        logout_with(&BrowserTokens);
        auth.set_anonymous();
        router.navigate_to(AppRoute::Home);
    };

    view! {
        <header class="navbar bg-base-100 border-b border-base-200 sticky top-0 z-40">
            <div class="navbar-start">
                <a
                    href="/"
                    class="btn btn-ghost text-xl font-black tracking-widest"
                    on:click=nav(router, AppRoute::Home)
                >
                    "SCUFFERS"
                </a>
            </div>
            <div class="navbar-center hidden md:flex gap-1">
                <a
                    href="/shop"
                    class="btn btn-ghost btn-sm"
                    on:click=nav(router, AppRoute::Shop { cat: None, search: None })
                >
                    "Tienda"
                </a>
                <a
                    href="/contact"
                    class="btn btn-ghost btn-sm"
                    on:click=nav(router, AppRoute::Contact)
                >
                    "Contacto"
                </a>
            </div>
            <div class="navbar-end gap-1">
                <a
                    href="/cart"
                    class="btn btn-ghost btn-circle"
                    on:click=nav(router, AppRoute::Cart)
                >
                    <div class="indicator">
                        <ShoppingBag attr:class="h-5 w-5" />
                        <Show when=has_items>
                            <span class="badge badge-sm badge-primary indicator-item">
                                {move || count.get()}
                            </span>
                        </Show>
                    </div>
                </a>
                <div class="dropdown dropdown-end">
                    <div tabindex="0" role="button" class="btn btn-ghost btn-circle">
                        <UserRound attr:class="h-5 w-5" />
                    </div>
                    <ul
                        tabindex="0"
                        class="menu menu-sm dropdown-content mt-3 z-50 p-2 shadow bg-base-100 rounded-box w-52"
                    >
                        <Show
                            when=move || state.get().is_authenticated
                            fallback=move || {
                                view! {
                                    <li>
                                        <a
                                            href="/login"
                                            on:click=nav(router, AppRoute::Login { next: None })
                                        >
                                            "Ingresar"
                                        </a>
                                    </li>
                                    <li>
                                        <a
                                            href="/register"
                                            on:click=nav(router, AppRoute::Register)
                                        >
                                            "Crear cuenta"
                                        </a>
                                    </li>
                                }
                            }
                        >
                            <li class="menu-title">
                                {move || {
                                    state
                                        .get()
                                        .user
                                        .map(|u| u.display_name().to_string())
                                        .unwrap_or_default()
                                }}
                            </li>
                            <li>
                                <a href="/account" on:click=nav(router, AppRoute::MyAccount)>
                                    "Mi cuenta"
                                </a>
                            </li>
                            <li>
                                <a href="/orders" on:click=nav(router, AppRoute::MyOrders)>
                                    "Mis pedidos"
                                </a>
                            </li>
                            <Show when=move || state.get().is_admin()>
                                <li>
                                    <a href="/admin" on:click=nav(router, AppRoute::AdminHome)>
                                        "Administración"
                                    </a>
                                </li>
                            </Show>
                            <li>
                                <button on:click=on_logout>"Cerrar sesión"</button>
                            </li>
                        </Show>
                    </ul>
                </div>
            </div>
        </header>
    }
}

/// 浮动 WhatsApp 咨询按钮
#[component]
pub fn WhatsAppButton() -> impl IntoView {
    view! {
        <a
            href="https://wa.me/5493412732527?text=Hola!%20Quiero%20hacer%20una%20consulta"
            target="_blank"
            rel="noopener noreferrer"
            aria-label="WhatsApp"
            class="fixed bottom-6 right-6 z-50 flex h-14 w-14 items-center justify-center rounded-full bg-[#25D366] shadow-xl transition-transform hover:scale-110"
        >
            <img
                src="https://upload.wikimedia.org/wikipedia/commons/6/6b/WhatsApp.svg"
                alt="WhatsApp"
                class="h-8 w-8"
            />
        </a>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let router = use_router();

    view! {
        <footer class="bg-neutral text-neutral-content mt-16">
            <div class="footer p-10 max-w-6xl mx-auto">
                <aside>
                    <p class="text-2xl font-black tracking-widest">"SCUFFERS"</p>
                    <p class="opacity-70">"Streetwear desde Rosario, Argentina."</p>
                </aside>
                <nav>
                    <h6 class="footer-title">"Tienda"</h6>
                    <a
                        href="/shop"
                        class="link link-hover"
                        on:click=nav(router, AppRoute::Shop { cat: None, search: None })
                    >
                        "Todos los productos"
                    </a>
                    <a
                        href="/contact"
                        class="link link-hover"
                        on:click=nav(router, AppRoute::Contact)
                    >
                        "Contacto"
                    </a>
                </nav>
                <div>
                    <h6 class="footer-title">"Newsletter"</h6>
                    <NewsletterForm />
                </div>
            </div>
            <div class="border-t border-neutral-content/10 py-4 text-center text-sm opacity-60">
                "© 2025 Scuffers. Todos los derechos reservados."
            </div>
        </footer>
    }
}
