//! 后台产品 CRUD

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::protocol::{
    AdminCreateProductRequest, AdminDeleteProductRequest, AdminListProductsRequest,
    AdminUpdateProductRequest, ProductPayload,
};
use scuffers_shared::{Product, format_precio};

use super::AdminNav;
use crate::api::{ShopApi, use_api};

#[component]
pub fn AdminProductsPage() -> impl IntoView {
    let api = StoredValue::new(use_api());

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    // 表单状态。editing_id 为 Some 时是编辑模式
    let (editing_id, set_editing_id) = signal(Option::<i64>::None);
    let (nombre, set_nombre) = signal(String::new());
    let (precio, set_precio) = signal(String::new());
    let (categoria, set_categoria) = signal(String::new());
    let (descripcion, set_descripcion) = signal(String::new());
    let (stock, set_stock) = signal(String::new());
    let (tag, set_tag) = signal(String::new());
    let (activo, set_activo) = signal(true);
    let (is_saving, set_is_saving) = signal(false);

    async fn load(api: &ShopApi, set_products: WriteSignal<Vec<Product>>) -> Result<(), String> {
        match api.send(&AdminListProductsRequest).await {
            Ok(list) => {
                set_products.set(list);
                Ok(())
            }
            Err(err) => Err(err.user_message("No se pudieron cargar los productos.")),
        }
    }

    spawn_local(async move {
        if let Err(msg) = load(&api.get_value(), set_products).await {
            set_error.set(Some(msg));
        }
        set_loading.set(false);
    });

    let reset_form = move || {
        set_editing_id.set(None);
        set_nombre.set(String::new());
        set_precio.set(String::new());
        set_categoria.set(String::new());
        set_descripcion.set(String::new());
        set_stock.set(String::new());
        set_tag.set(String::new());
        set_activo.set(true);
    };

    let edit = move |p: Product| {
        set_editing_id.set(p.id);
        set_nombre.set(p.nombre);
        set_precio.set(p.precio.to_string());
        set_categoria.set(p.categoria.unwrap_or_default());
        set_descripcion.set(p.descripcion.unwrap_or_default());
        set_stock.set(p.stock.map(|s| s.to_string()).unwrap_or_default());
        set_tag.set(p.tag.unwrap_or_default());
        set_activo.set(p.activo);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(precio_value) = precio.get().trim().parse::<f64>() else {
            set_error.set(Some("El precio no es un número válido.".into()));
            return;
        };
        if nombre.get().trim().is_empty() {
            set_error.set(Some("El nombre es obligatorio.".into()));
            return;
        }

        let payload = ProductPayload {
            nombre: nombre.get_untracked(),
            slug: None,
            precio: precio_value,
            categoria: Some(categoria.get_untracked()).filter(|c| !c.trim().is_empty()),
            descripcion: Some(descripcion.get_untracked()).filter(|d| !d.trim().is_empty()),
            stock: stock.get_untracked().trim().parse::<i64>().ok(),
            tag: Some(tag.get_untracked()).filter(|t| !t.trim().is_empty()),
            activo: activo.get_untracked(),
        };

        set_is_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            let api = api.get_value();
            let result = match editing_id.get_untracked() {
                Some(id) => api
                    .send(&AdminUpdateProductRequest { id, payload })
                    .await
                    .map(|_| ()),
                None => api
                    .send(&AdminCreateProductRequest { payload })
                    .await
                    .map(|_| ()),
            };

            match result {
                Ok(()) => {
                    reset_form();
                    if let Err(msg) = load(&api, set_products).await {
                        set_error.set(Some(msg));
                    }
                }
                Err(err) => {
                    set_error.set(Some(err.user_message("No se pudo guardar el producto.")))
                }
            }
            set_is_saving.set(false);
        });
    };

    let delete = move |id: i64| {
        spawn_local(async move {
            let api = api.get_value();
            match api.send(&AdminDeleteProductRequest { id }).await {
                Ok(()) => {
                    if let Err(msg) = load(&api, set_products).await {
                        set_error.set(Some(msg));
                    }
                }
                Err(err) => {
                    set_error.set(Some(err.user_message("No se pudo eliminar el producto.")))
                }
            }
        });
    };

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold uppercase tracking-wide mb-6">"Productos"</h1>
            <AdminNav active="Productos" />

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error mb-4">
                    <span>{move || error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="grid lg:grid-cols-3 gap-6">
                <div class="card bg-base-100 border border-base-200 h-fit">
                    <div class="card-body">
                        <h2 class="card-title text-base">
                            {move || if editing_id.get().is_some() {
                                "Editar producto"
                            } else {
                                "Nuevo producto"
                            }}
                        </h2>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <input
                                type="text"
                                placeholder="Nombre"
                                class="input input-bordered input-sm"
                                on:input=move |ev| set_nombre.set(event_target_value(&ev))
                                prop:value=nombre
                                required
                            />
                            <input
                                type="text"
                                placeholder="Precio"
                                class="input input-bordered input-sm"
                                on:input=move |ev| set_precio.set(event_target_value(&ev))
                                prop:value=precio
                                required
                            />
                            <input
                                type="text"
                                placeholder="Categoría"
                                class="input input-bordered input-sm"
                                on:input=move |ev| set_categoria.set(event_target_value(&ev))
                                prop:value=categoria
                            />
                            <textarea
                                placeholder="Descripción"
                                class="textarea textarea-bordered textarea-sm"
                                on:input=move |ev| set_descripcion.set(event_target_value(&ev))
                                prop:value=descripcion
                            ></textarea>
                            <div class="grid grid-cols-2 gap-3">
                                <input
                                    type="text"
                                    placeholder="Stock"
                                    class="input input-bordered input-sm"
                                    on:input=move |ev| set_stock.set(event_target_value(&ev))
                                    prop:value=stock
                                />
                                <input
                                    type="text"
                                    placeholder="Tag"
                                    class="input input-bordered input-sm"
                                    on:input=move |ev| set_tag.set(event_target_value(&ev))
                                    prop:value=tag
                                />
                            </div>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="toggle toggle-sm"
                                    prop:checked=activo
                                    on:change=move |ev| set_activo.set(event_target_checked(&ev))
                                />
                                <span class="label-text">"Visible en tienda"</span>
                            </label>
                            <div class="flex gap-2 mt-2">
                                <button
                                    class="btn btn-primary btn-sm flex-1"
                                    disabled=move || is_saving.get()
                                >
                                    {move || if is_saving.get() { "Guardando..." } else { "Guardar" }}
                                </button>
                                <Show when=move || editing_id.get().is_some()>
                                    <button
                                        type="button"
                                        class="btn btn-ghost btn-sm"
                                        on:click=move |_| reset_form()
                                    >
                                        "Cancelar"
                                    </button>
                                </Show>
                            </div>
                        </form>
                    </div>
                </div>

                <div class="lg:col-span-2">
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="flex justify-center py-16">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                    >
                        <div class="overflow-x-auto">
                            <table class="table table-sm">
                                <thead>
                                    <tr>
                                        <th>"Nombre"</th>
                                        <th>"Categoría"</th>
                                        <th class="text-right">"Precio"</th>
                                        <th class="text-right">"Stock"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || products.get()
                                        key=|p| (p.id, p.slug.clone())
                                        children=move |p| {
                                            let id = p.id;
                                            let row = p.clone();
                                            let inactive = !p.activo;
                                            view! {
                                                <tr class=("opacity-50", inactive)>
                                                    <td class="font-semibold">{p.nombre.clone()}</td>
                                                    <td>{p.categoria.clone().unwrap_or_default()}</td>
                                                    <td class="text-right">{format_precio(p.precio)}</td>
                                                    <td class="text-right">
                                                        {p.stock.map(|s| s.to_string()).unwrap_or_else(|| "—".into())}
                                                    </td>
                                                    <td class="text-right whitespace-nowrap">
                                                        <button
                                                            class="btn btn-ghost btn-xs"
                                                            on:click=move |_| edit(row.clone())
                                                        >
                                                            "Editar"
                                                        </button>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| {
                                                                if let Some(id) = id {
                                                                    delete(id);
                                                                }
                                                            }
                                                        >
                                                            "Eliminar"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}
