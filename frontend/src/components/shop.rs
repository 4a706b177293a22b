//! 商品列表页：分类过滤 + 搜索
//!
//! 过滤条件活在 URL（`?cat=` / `?search=`）里，不在本地状态：
//! 改变过滤 = 导航到新的 Shop 路由，组件整体重建并重新拉取。

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::Product;
use scuffers_shared::protocol::ListProductsRequest;

use crate::api::use_api;
use crate::components::product_card::ProductCard;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn ShopPage(cat: Option<String>, search: Option<String>) -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (query, set_query) = signal(search.clone().unwrap_or_default());

    let active_cat = cat.clone();

    {
        let request = ListProductsRequest {
            cat: cat.clone(),
            search: search.clone(),
        };
        spawn_local(async move {
            match api.send(&request).await {
                Ok(list) => set_products.set(list.into_iter().filter(|p| p.activo).collect()),
                Err(err) => set_error.set(Some(
                    err.user_message("No se pudieron cargar los productos."),
                )),
            }
            set_loading.set(false);
        });
    }

    // 分类 pill 从当前结果里归纳
    let categories = Signal::derive(move || {
        let mut cats: Vec<String> = products
            .get()
            .iter()
            .filter_map(|p| p.categoria.clone())
            .filter(|c| !c.is_empty())
            .collect();
        cats.sort();
        cats.dedup();
        cats
    });

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let q = query.get();
        router.navigate_to(AppRoute::Shop {
            cat: None,
            search: Some(q).filter(|q| !q.trim().is_empty()),
        });
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4 mb-6">
                <h1 class="text-2xl font-bold uppercase tracking-wide">
                    {match &active_cat {
                        Some(c) => c.clone(),
                        None => "Tienda".to_string(),
                    }}
                </h1>
                <form class="join" on:submit=on_search>
                    <input
                        type="search"
                        placeholder="Buscar..."
                        class="input input-bordered input-sm join-item"
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        prop:value=query
                    />
                    <button class="btn btn-sm btn-primary join-item">"Buscar"</button>
                </form>
            </div>

            <div class="flex flex-wrap gap-2 mb-6">
                <button
                    class="btn btn-xs"
                    class:btn-neutral=active_cat.is_none()
                    on:click=move |_| {
                        router.navigate_to(AppRoute::Shop { cat: None, search: None })
                    }
                >
                    "Todos"
                </button>
                <For
                    each=move || categories.get()
                    key=|c| c.clone()
                    children={
                        let active_cat = active_cat.clone();
                        move |c: String| {
                            let is_active = active_cat.as_deref() == Some(c.as_str());
                            let target = c.clone();
                            view! {
                                <button
                                    class="btn btn-xs"
                                    class:btn-neutral=is_active
                                    on:click=move |_| {
                                        router
                                            .navigate_to(AppRoute::Shop {
                                                cat: Some(target.clone()),
                                                search: None,
                                            })
                                    }
                                >
                                    {c}
                                </button>
                            }
                        }
                    }
                />
            </div>

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error mb-6">
                    <span>{move || error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <Show
                    when=move || !products.get().is_empty()
                    fallback=|| view! {
                        <p class="text-center py-16 text-base-content/60">
                            "No encontramos productos para esa búsqueda."
                        </p>
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
            </Show>
        </div>
    }
}
