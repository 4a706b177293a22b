//! 我的订单：列表 + 详情

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::date::format_fecha;
use scuffers_shared::protocol::{MyOrdersRequest, OrderDetailRequest};
use scuffers_shared::{OrderDetail, OrderStatus, OrderSummary, format_precio};

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 状态 badge 的 daisyUI 配色
pub(super) fn status_badge_class(estado: OrderStatus) -> &'static str {
    match estado {
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::Paid => "badge badge-success",
        OrderStatus::Cancelled => "badge badge-error",
        OrderStatus::Shipped => "badge badge-info",
    }
}

#[component]
pub fn MyOrdersPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (orders, set_orders) = signal(Vec::<OrderSummary>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    spawn_local(async move {
        match api.send(&MyOrdersRequest).await {
            Ok(list) => set_orders.set(list),
            Err(err) => {
                set_error.set(Some(err.user_message("No se pudieron cargar tus pedidos.")))
            }
        }
        set_loading.set(false);
    });

    view! {
        <div class="max-w-4xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold uppercase tracking-wide mb-6">"Mis pedidos"</h1>

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
                <Show
                    when=move || !orders.get().is_empty()
                    fallback=|| view! {
                        <p class="text-center py-16 text-base-content/60">
                            "Todavía no hiciste ningún pedido."
                        </p>
                    }
                >
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Pedido"</th>
                                    <th>"Fecha"</th>
                                    <th>"Estado"</th>
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
                                        let href = format!("/orders/{id}");
                                        let on_click = move |ev: leptos::web_sys::MouseEvent| {
                                            ev.prevent_default();
                                            router.navigate_to(AppRoute::OrderDetail { id });
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
            </Show>
        </div>
    }
}

#[component]
pub fn OrderDetailPage(id: i64) -> impl IntoView {
    let api = use_api();

    let (order, set_order) = signal(Option::<OrderDetail>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    spawn_local(async move {
        match api.send(&OrderDetailRequest { order_id: id }).await {
            Ok(detail) => set_order.set(Some(detail)),
            Err(err) => set_error.set(Some(err.user_message("No se pudo cargar el pedido."))),
        }
        set_loading.set(false);
    });

    view! {
        <div class="max-w-3xl mx-auto px-4 py-8">
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
                                <div class="flex items-center justify-between mb-6">
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
                                        <div class="text-right text-sm text-base-content/70 flex flex-col gap-1">
                                            {o.total_productos
                                                .map(|t| format!("Subtotal: {}", format_precio(t)))}
                                            {o.costo_envio
                                                .map(|c| format!("Envío: {}", format_precio(c)))}
                                            <span class="text-lg font-bold text-base-content">
                                                {o.total_final
                                                    .map(|t| format!("Total: {}", format_precio(t)))
                                                    .unwrap_or_default()}
                                            </span>
                                        </div>
                                    </div>
                                </div>

                                <div class="card bg-base-100 border border-base-200">
                                    <div class="card-body">
                                        <h2 class="card-title text-base">"Envío"</h2>
                                        <p>{format!("{}, {} ({}), {}", o.direccion, o.ciudad, o.codigo_postal, o.provincia)}</p>
                                        {Some(o.observaciones.clone())
                                            .filter(|obs| !obs.is_empty())
                                            .map(|obs| {
                                                view! {
                                                    <p class="text-sm text-base-content/60">{obs}</p>
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
