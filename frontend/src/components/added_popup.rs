//! 「Agregado al carrito」确认弹窗
//!
//! 内容取自加购响应的服务端快照，不做本地推算。

use leptos::prelude::*;

use scuffers_shared::format_precio;

use crate::cart::use_cart;
use crate::components::icons::CheckCircle;
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn AddedPopup() -> impl IntoView {
    let cart = use_cart();
    let router = use_router();
    let state = cart.state();

    let go_cart = move |_| {
        cart.close_added_popup();
        router.navigate_to(AppRoute::Cart);
    };

    view! {
        <Show when=move || state.get().show_added_popup && state.get().last_added.is_some()>
            <div class="fixed inset-0 z-50 flex items-end md:items-start justify-center md:justify-end p-4 pointer-events-none">
                <div class="card bg-base-100 shadow-2xl w-full max-w-sm pointer-events-auto border border-base-200">
                    <div class="card-body p-4">
                        <div class="flex items-center gap-2 text-success">
                            <CheckCircle attr:class="h-5 w-5" />
                            <span class="font-semibold">"Agregado al carrito"</span>
                        </div>
                        {move || {
                            state
                                .get()
                                .last_added
                                .map(|added| {
                                    let image = added
                                        .item
                                        .producto
                                        .as_ref()
                                        .and_then(|p| p.primary_image(config::media_base()));
                                    let nombre = added
                                        .item
                                        .producto
                                        .as_ref()
                                        .map(|p| p.nombre.clone())
                                        .unwrap_or_default();
                                    view! {
                                        <div class="flex gap-3 items-center">
                                            {image
                                                .map(|src| {
                                                    view! {
                                                        <img
                                                            src=src
                                                            class="w-16 h-16 object-cover rounded bg-base-200"
                                                        />
                                                    }
                                                })}
                                            <div class="text-sm">
                                                <p class="font-semibold uppercase">{nombre}</p>
                                                {added
                                                    .item
                                                    .talle
                                                    .clone()
                                                    .map(|t| {
                                                        view! {
                                                            <p class="text-base-content/60">"Talle " {t}</p>
                                                        }
                                                    })}
                                                <p class="text-base-content/60">
                                                    "Cantidad: " {added.item.cantidad}
                                                </p>
                                            </div>
                                        </div>
                                        <div class="text-sm text-base-content/70 border-t border-base-200 pt-2 mt-2">
                                            {format!(
                                                "{} productos · {}",
                                                added.total_items,
                                                format_precio(added.total_amount),
                                            )}
                                        </div>
                                    }
                                })
                        }}
                        <div class="card-actions justify-end mt-2">
                            <button
                                class="btn btn-ghost btn-sm"
                                on:click=move |_| cart.close_added_popup()
                            >
                                "Seguir comprando"
                            </button>
                            <button class="btn btn-primary btn-sm" on:click=go_cart>
                                "Ver carrito"
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
