//! 商品详情页：画廊、talle 选择、加购

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::protocol::ProductDetailRequest;
use scuffers_shared::{Product, format_precio};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::cart::use_cart;
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 固定的 talle 表（后端不按产品区分）
const TALLES: [&str; 4] = ["S", "M", "L", "XL"];

#[component]
pub fn ProductDetailPage(slug: String) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let auth = use_auth();
    let cart = use_cart();

    let (product, set_product) = signal(Option::<Product>::None);
    let (loading, set_loading) = signal(true);
    let (selected_image, set_selected_image) = signal(0usize);
    let (talle, set_talle) = signal(Option::<String>::None);
    let (cantidad, set_cantidad) = signal(1u32);
    let (adding, set_adding) = signal(false);

    {
        let api = api.clone();
        let slug = slug.clone();
        spawn_local(async move {
            if let Ok(p) = api.send(&ProductDetailRequest { slug }).await {
                set_product.set(Some(p));
            }
            set_loading.set(false);
        });
    }

    let auth_state = auth.state();
    let cart_state = cart.state();

    // StoredValue 让事件闭包保持 Copy，可以在重算的视图闭包里复用
    let api_stored = StoredValue::new(api);

    let on_add = move |_| {
        let Some(p) = product.get_untracked() else {
            return;
        };
        // 未登录先去登录，登录成功后 next 带回本页
        if !auth_state.get_untracked().is_authenticated {
            router.navigate_to(AppRoute::Login {
                next: Some(format!("/product/{}", p.slug)),
            });
            return;
        }

        set_adding.set(true);
        let api = api_stored.get_value();
        let talle = talle.get_untracked();
        let q = cantidad.get_untracked();
        spawn_local(async move {
            cart.add(&api, &p.slug, q, talle.as_deref()).await;
            set_adding.set(false);
        });
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex justify-center py-24">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            {move || match product.get() {
                None => view! {
                    <p class="text-center py-24 text-base-content/60">
                        "No encontramos ese producto."
                    </p>
                }
                .into_any(),
                Some(p) => {
                    let gallery = p.gallery(config::media_base());
                    let agotado = p.stock == Some(0) || !p.activo;
                    let thumbs = gallery.clone();
                    let main = gallery.clone();

                    view! {
                        <div class="max-w-6xl mx-auto px-4 py-8 grid md:grid-cols-2 gap-8">
                            <div>
                                <figure class="aspect-square bg-base-200 overflow-hidden rounded-box">
                                    {move || {
                                        main.get(selected_image.get())
                                            .or_else(|| main.first())
                                            .map(|src| {
                                                view! {
                                                    <img src=src.clone() class="object-cover w-full h-full" />
                                                }
                                                .into_any()
                                            })
                                            .unwrap_or_else(|| {
                                                view! {
                                                    <div class="flex items-center justify-center w-full h-full text-base-content/30">
                                                        "Sin imagen"
                                                    </div>
                                                }
                                                .into_any()
                                            })
                                    }}
                                </figure>
                                <Show when={
                                    let n = thumbs.len();
                                    move || n > 1
                                }>
                                    <div class="flex gap-2 mt-2">
                                        {thumbs
                                            .iter()
                                            .enumerate()
                                            .map(|(i, src)| {
                                                view! {
                                                    <button
                                                        class="w-16 h-16 rounded overflow-hidden border"
                                                        class:border-primary=move || selected_image.get() == i
                                                        on:click=move |_| set_selected_image.set(i)
                                                    >
                                                        <img src=src.clone() class="object-cover w-full h-full" />
                                                    </button>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </Show>
                            </div>

                            <div class="flex flex-col gap-4">
                                <h1 class="text-3xl font-bold uppercase">{p.nombre.clone()}</h1>
                                <p class="text-2xl">{format_precio(p.precio)}</p>
                                {p.descripcion
                                    .clone()
                                    .filter(|d| !d.is_empty())
                                    .map(|d| view! { <p class="text-base-content/70">{d}</p> })}

                                <div>
                                    <p class="font-semibold mb-2">"Talle"</p>
                                    <div class="flex gap-2">
                                        {TALLES
                                            .iter()
                                            .map(|t| {
                                                let value = t.to_string();
                                                let label = value.clone();
                                                let is_selected = {
                                                    let value = value.clone();
                                                    move || talle.get().as_deref() == Some(value.as_str())
                                                };
                                                view! {
                                                    <button
                                                        class="btn btn-sm btn-outline"
                                                        class:btn-active=is_selected
                                                        on:click=move |_| set_talle.set(Some(value.clone()))
                                                    >
                                                        {label}
                                                    </button>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>

                                <div>
                                    <p class="font-semibold mb-2">"Cantidad"</p>
                                    <div class="join">
                                        <button
                                            class="btn btn-sm join-item"
                                            on:click=move |_| {
                                                set_cantidad.update(|q| *q = (*q).saturating_sub(1).max(1))
                                            }
                                        >
                                            "−"
                                        </button>
                                        <span class="btn btn-sm join-item no-animation pointer-events-none">
                                            {move || cantidad.get()}
                                        </span>
                                        <button
                                            class="btn btn-sm join-item"
                                            on:click=move |_| set_cantidad.update(|q| *q += 1)
                                        >
                                            "+"
                                        </button>
                                    </div>
                                </div>

                                <button
                                    class="btn btn-primary btn-block mt-2"
                                    disabled=move || adding.get() || agotado
                                    on:click=on_add
                                >
                                    {move || if adding.get() {
                                        view! { <span class="loading loading-spinner"></span> "Agregando..." }
                                            .into_any()
                                    } else if agotado {
                                        "Agotado".into_any()
                                    } else {
                                        "Agregar al carrito".into_any()
                                    }}
                                </button>

                                <Show when=move || cart_state.get().error.is_some()>
                                    <div role="alert" class="alert alert-error text-sm py-2">
                                        <span>
                                            {move || cart_state.get().error.unwrap_or_default()}
                                        </span>
                                    </div>
                                </Show>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </Show>
    }
}
