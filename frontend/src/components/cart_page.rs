//! 购物车页：行内增减、移除、结账入口

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::format_precio;
use scuffers_shared::protocol::GetAddressRequest;

use crate::api::use_api;
use crate::cart::use_cart;
use crate::checkout::run_mp_checkout;
use crate::components::icons::{Minus, Plus, Trash};
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn CartPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let cart = use_cart();
    let router = use_router();
    let state = cart.state();

    let (checking_out, set_checking_out) = signal(false);
    let (checkout_error, set_checkout_error) = signal(Option::<String>::None);

    // 进入页面时拉取最新快照
    spawn_local(async move {
        cart.refresh(&api.get_value()).await;
    });

    let on_checkout = move |_| {
        set_checking_out.set(true);
        set_checkout_error.set(None);

        spawn_local(async move {
            let api = api.get_value();
            // 有保存地址就用，取不到按占位数据处理
            let address = api.send(&GetAddressRequest).await.unwrap_or_default();
            match run_mp_checkout(&api, &address).await {
                Ok(outcome) => {
                    // 把浏览器交给 Mercado Pago
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&outcome.init_point);
                    }
                }
                Err(err) => {
                    set_checkout_error.set(Some(err.user_message()));
                    set_checking_out.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-4xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold uppercase tracking-wide mb-6">"Tu carrito"</h1>

            <Show
                when=move || !state.get().loading
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <Show
                    when=move || state.get().cart.as_ref().is_some_and(|c| !c.is_empty())
                    fallback=move || view! {
                        <div class="text-center py-16">
                            <p class="text-base-content/60 mb-4">"Tu carrito está vacío."</p>
                            <a
                                href="/shop"
                                class="btn btn-primary"
                                on:click=move |ev: leptos::web_sys::MouseEvent| {
                                    ev.prevent_default();
                                    router.navigate_to(AppRoute::Shop { cat: None, search: None });
                                }
                            >
                                "Ir a la tienda"
                            </a>
                        </div>
                    }
                >
                    <div class="flex flex-col gap-4">
                        <For
                            each=move || state.get().cart.map(|c| c.items).unwrap_or_default()
                            key=|item| (item.product_slug().unwrap_or_default().to_string(), item.talle.clone())
                            children=move |item| {
                                let slug = item.product_slug().unwrap_or_default().to_string();
                                let talle = item.talle.clone();
                                let image = item
                                    .producto
                                    .as_ref()
                                    .and_then(|p| p.primary_image(config::media_base()));
                                let nombre = item
                                    .producto
                                    .as_ref()
                                    .map(|p| p.nombre.clone())
                                    .unwrap_or_else(|| slug.clone());
                                let cantidad = item.cantidad;
                                let line_total = item.line_total();

                                let mutate = {
                                    let slug = slug.clone();
                                    let talle = talle.clone();
                                    move |quantity: u32, add: bool| {
                                        let slug = slug.clone();
                                        let talle = talle.clone();
                                        spawn_local(async move {
                                            let api = api.get_value();
                                            if add {
                                                cart.add(&api, &slug, quantity, talle.as_deref()).await;
                                                // 行内 +1 不需要弹窗
                                                cart.close_added_popup();
                                            } else {
                                                cart.remove(&api, &slug, quantity, talle.as_deref())
                                                    .await;
                                            }
                                        });
                                    }
                                };
                                let inc = {
                                    let mutate = mutate.clone();
                                    move |_| mutate(1, true)
                                };
                                let dec = {
                                    let mutate = mutate.clone();
                                    move |_| mutate(1, false)
                                };
                                let drop_item = move |_| mutate(cantidad, false);

                                view! {
                                    <div class="card card-side bg-base-100 border border-base-200">
                                        <figure class="w-24 h-24 bg-base-200 shrink-0">
                                            {image
                                                .map(|src| {
                                                    view! {
                                                        <img src=src class="object-cover w-full h-full" />
                                                    }
                                                    .into_any()
                                                })
                                                .unwrap_or_else(|| {
                                                    view! { <div class="w-full h-full"></div> }.into_any()
                                                })}
                                        </figure>
                                        <div class="card-body py-3 px-4 flex-row items-center justify-between gap-4">
                                            <div>
                                                <h3 class="font-semibold uppercase">{nombre}</h3>
                                                {talle
                                                    .clone()
                                                    .map(|t| {
                                                        view! {
                                                            <p class="text-sm text-base-content/60">
                                                                "Talle " {t}
                                                            </p>
                                                        }
                                                    })}
                                            </div>
                                            <div class="join">
                                                <button
                                                    class="btn btn-xs join-item"
                                                    disabled=move || state.get().updating
                                                    on:click=dec
                                                >
                                                    <Minus attr:class="h-3 w-3" />
                                                </button>
                                                <span class="btn btn-xs join-item no-animation pointer-events-none">
                                                    {cantidad}
                                                </span>
                                                <button
                                                    class="btn btn-xs join-item"
                                                    disabled=move || state.get().updating
                                                    on:click=inc
                                                >
                                                    <Plus attr:class="h-3 w-3" />
                                                </button>
                                            </div>
                                            <p class="font-semibold w-24 text-right">
                                                {format_precio(line_total)}
                                            </p>
                                            <button
                                                class="btn btn-ghost btn-xs text-error"
                                                disabled=move || state.get().updating
                                                on:click=drop_item
                                            >
                                                <Trash attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>

                    <Show when=move || state.get().error.is_some()>
                        <div role="alert" class="alert alert-error mt-4">
                            <span>{move || state.get().error.unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="card bg-base-200 mt-6">
                        <div class="card-body flex-row items-center justify-between">
                            <div>
                                <p class="text-sm text-base-content/60">
                                    {move || format!("{} productos", state.get().item_count())}
                                </p>
                                <p class="text-2xl font-bold">
                                    {move || format_precio(state.get().total_amount())}
                                </p>
                            </div>
                            <button
                                class="btn btn-primary"
                                disabled=move || checking_out.get() || state.get().updating
                                on:click=on_checkout
                            >
                                {move || if checking_out.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        "Redirigiendo..."
                                    }
                                    .into_any()
                                } else {
                                    "Pagar con Mercado Pago".into_any()
                                }}
                            </button>
                        </div>
                    </div>

                    <Show when=move || checkout_error.get().is_some()>
                        <div role="alert" class="alert alert-error mt-4">
                            <span>{move || checkout_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                </Show>
            </Show>
        </div>
    }
}
