//! 后台订单：列表 + 详情 + 状态变更

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::date::format_fecha;
use scuffers_shared::protocol::{
    AdminListOrdersRequest, AdminOrderDetailRequest, AdminUpdateOrderRequest,
};
use scuffers_shared::{OrderDetail, OrderStatus, OrderSummary, format_precio};

use super::AdminNav;
use crate::api::use_api;
use crate::components::orders::status_badge_class;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn AdminOrdersPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (orders, set_orders) = signal(Vec::<OrderSummary>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    spawn_local(async move {
        match api.send(&AdminListOrdersRequest).await {
            Ok(list) => set_orders.set(list),
            Err(err) => {
                set_error.set(Some(err.user_message("No se pudieron cargar los pedidos.")))
            }
        }
        set_loading.set(false);
    });

    view! {
        <div class="max-w-5xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold uppercase tracking-wide mb-6">"Pedidos"</h1>
            <AdminNav active="Pedidos" />

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error mb-4">
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
                <div class="overflow-x-auto">
                    <table class="table table-sm">
                        <thead>
                            <tr>
                                <th>"Pedido"</th>
                                <th>"Fecha"</th>
                                <th>"Estado"</th>
                                <th>"MP"</th>
                                <th class="text-right">"Total"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || orders.get()
                                key=|o| o.id
                                children=move |o| {
                                    let id = o.id;
                                    let href = format!("/admin/orders/{id}");
                                    let on_click = move |ev: leptos::web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        router.navigate_to(AppRoute::AdminOrderDetail { id });
                                    };
                                    view! {
                                        <tr>
                                            <td class="font-mono">{format!("#{id}")}</td>
                                            <td>{format_fecha(&o.creado)}</td>
                                            <td>
                                                <span class=status_badge_class(o.estado)>
                                                    {o.status_label().to_string()}
                                                </span>
                                            </td>
                                            <td class="text-xs text-base-content/60">
                                                {o.mp_status.clone().unwrap_or_default()}
                                            </td>
                                            <td class="text-right">
                                                {o.total_final.map(format_precio).unwrap_or_default()}
                                            </td>
                                            <td class="text-right">
                                                <a
                                                    href=href
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=on_click
                                                >
                                                    "Ver"
                                                </a>
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
    }
}

#[component]
pub fn AdminOrderDetailPage(id: i64) -> impl IntoView {
    let api = StoredValue::new(use_api());

    let (order, set_order) = signal(Option::<OrderDetail>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (estado, set_estado) = signal(OrderStatus::default());
    let (is_saving, set_is_saving) = signal(false);

    spawn_local(async move {
        match api.get_value().send(&AdminOrderDetailRequest { order_id: id }).await {
            Ok(detail) => {
                set_estado.set(detail.estado);
                set_order.set(Some(detail));
            }
            Err(err) => set_error.set(Some(err.user_message("No se pudo cargar el pedido."))),
        }
        set_loading.set(false);
    });

    let on_update = move |_| {
        set_is_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            let request = AdminUpdateOrderRequest {
                order_id: id,
                estado: estado.get_untracked(),
            };
            match api.get_value().send(&request).await {
                Ok(detail) => set_order.set(Some(detail)),
                Err(err) => {
                    set_error.set(Some(err.user_message("No se pudo actualizar el estado.")))
                }
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div class="max-w-3xl mx-auto px-4 py-8">
            <AdminNav active="Pedidos" />

            <Show when=move || error.get().is_some()>
                <div role="alert" class="alert alert-error mb-4">
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
                {move || {
                    order
                        .get()
                        .map(|o| {
                            view! {
                                <div class="flex items-center justify-between mb-2">
                                    <h1 class="text-2xl font-bold uppercase tracking-wide">
                                        {format!("Pedido #{}", o.id)}
                                    </h1>
                                    <span class=status_badge_class(o.estado)>
                                        {o.status_label().to_string()}
                                    </span>
                                </div>
                                <p class="text-sm text-base-content/60 mb-6">
                                    {format_fecha(&o.creado)}
                                </p>

                                <div class="card bg-base-100 border border-base-200 mb-4">
                                    <div class="card-body flex-row items-end gap-3">
                                        <label class="form-control">
                                            <span class="label-text mb-1">"Estado"</span>
                                            <select
                                                class="select select-bordered select-sm"
                                                on:change=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    if let Some(s) = OrderStatus::ALL
                                                        .into_iter()
                                                        .find(|s| s.as_str() == value)
                                                    {
                                                        set_estado.set(s);
                                                    }
                                                }
                                            >
                                                {OrderStatus::ALL
                                                    .into_iter()
                                                    .map(|s| {
                                                        let selected = s == o.estado;
                                                        view! {
                                                            <option value=s.as_str() selected=selected>
                                                                {s.label()}
                                                            </option>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </select>
                                        </label>
                                        <button
                                            class="btn btn-primary btn-sm"
                                            disabled=move || is_saving.get()
                                            on:click=on_update
                                        >
                                            {move || if is_saving.get() {
                                                "Actualizando..."
                                            } else {
                                                "Actualizar estado"
                                            }}
                                        </button>
                                    </div>
                                </div>

                                <div class="card bg-base-100 border border-base-200 mb-4">
                                    <div class="card-body">
                                        <h2 class="card-title text-base">"Productos"</h2>
                                        <table class="table table-sm">
                                            <tbody>
                                                {o.items
                                                    .iter()
                                                    .map(|item| {
                                                        view! {
                                                            <tr>
                                                                <td>
                                                                    {item.nombre_producto.clone()}
                                                                    {item
                                                                        .talle
                                                                        .clone()
                                                                        .map(|t| format!(" · Talle {t}"))
                                                                        .unwrap_or_default()}
                                                                </td>
                                                                <td>{format!("x{}", item.cantidad)}</td>
                                                                <td class="text-right">
                                                                    {item
                                                                        .subtotal
                                                                        .map(format_precio)
                                                                        .unwrap_or_default()}
                                                                </td>
                                                            </tr>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </tbody>
                                        </table>
                                        <p class="text-right text-lg font-bold">
                                            {o.total_final
                                                .map(|t| format!("Total: {}", format_precio(t)))
                                                .unwrap_or_default()}
                                        </p>
                                    </div>
                                </div>

                                <div class="card bg-base-100 border border-base-200">
                                    <div class="card-body">
                                        <h2 class="card-title text-base">"Envío y pago"</h2>
                                        <p>{format!("{}, {} ({}), {}", o.direccion, o.ciudad, o.codigo_postal, o.provincia)}</p>
                                        {o.mp_status
                                            .clone()
                                            .map(|s| {
                                                view! {
                                                    <p class="text-sm text-base-content/60">
                                                        "Estado MP: " {s}
                                                    </p>
                                                }
                                            })}
                                        {o.mp_payment_id
                                            .clone()
                                            .map(|pid| {
                                                view! {
                                                    <p class="text-sm text-base-content/60 font-mono">
                                                        "Pago MP: " {pid}
                                                    </p>
                                                }
                                            })}
                                    </div>
                                </div>
                            }
                        })
                }}
            </Show>
        </div>
    }
}
