//! 产品卡片（列表 / 首页共用）

use leptos::prelude::*;

use scuffers_shared::{Product, format_precio};

use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let router = use_router();
    let media = config::media_base();

    let primary = product.primary_image(media);
    let hover = product.hover_image(media);
    let slug = product.slug.clone();
    let href = format!("/product/{}", slug);
    let agotado = product.stock == Some(0) || !product.activo;

    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(AppRoute::ProductDetail { slug: slug.clone() });
    };

    view! {
        <a href=href class="card bg-base-100 group cursor-pointer" on:click=on_click>
            <figure class="aspect-square bg-base-200 relative overflow-hidden">
                {match (primary, hover) {
                    (Some(main), Some(alt)) => view! {
                        <img
                            src=main
                            alt=product.nombre.clone()
                            class="object-cover w-full h-full group-hover:opacity-0 transition-opacity"
                        />
                        <img
                            src=alt
                            alt=product.nombre.clone()
                            class="object-cover w-full h-full absolute inset-0 opacity-0 group-hover:opacity-100 transition-opacity"
                        />
                    }
                    .into_any(),
                    (Some(main), None) => view! {
                        <img src=main alt=product.nombre.clone() class="object-cover w-full h-full" />
                    }
                    .into_any(),
                    _ => view! {
                        <div class="flex items-center justify-center w-full h-full text-base-content/30">
                            "Sin imagen"
                        </div>
                    }
                    .into_any(),
                }}
                {product
                    .tag
                    .clone()
                    .filter(|t| !t.is_empty())
                    .map(|tag| {
                        view! {
                            <span class="badge badge-neutral absolute top-2 left-2">{tag}</span>
                        }
                    })}
                <Show when=move || agotado>
                    <span class="badge badge-error absolute top-2 right-2">"Agotado"</span>
                </Show>
            </figure>
            <div class="card-body p-3 gap-0">
                <h3 class="text-sm font-semibold uppercase">{product.nombre.clone()}</h3>
                <p class="text-sm text-base-content/70">{format_precio(product.precio)}</p>
            </div>
        </a>
    }
}
