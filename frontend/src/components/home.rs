//! 首页：hero + 新品栅格

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::Product;
use scuffers_shared::protocol::ListProductsRequest;

use crate::api::use_api;
use crate::components::product_card::ProductCard;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        if let Ok(list) = api.send(&ListProductsRequest::default()).await {
            set_products.set(list.into_iter().filter(|p| p.activo).take(8).collect());
        }
        set_loading.set(false);
    });

    let go_shop = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(AppRoute::Shop {
            cat: None,
            search: None,
        });
    };

    view! {
        <div>
            <section class="hero min-h-[60vh] bg-base-200">
                <div class="hero-content text-center">
                    <div class="max-w-lg">
                        <h1 class="text-5xl font-black tracking-widest">"SCUFFERS"</h1>
                        <p class="py-6 text-base-content/70">
                            "Drops limitados. Calidad premium. Hecho en Argentina."
                        </p>
                        <a href="/shop" class="btn btn-primary btn-wide" on:click=go_shop>
                            "Ver tienda"
                        </a>
                    </div>
                </div>
            </section>

            <section class="max-w-6xl mx-auto px-4 py-12">
                <h2 class="text-2xl font-bold uppercase tracking-wide mb-6">"Novedades"</h2>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <For
                            each=move || products.get()
                            key=|p| p.slug.clone()
                            children=move |p| view! { <ProductCard product=p /> }
                        />
                    </div>
                </Show>
            </section>
        </div>
    }
}
