//! MP 支付回跳页（success / failure / pending）
//!
//! success 页把 MP 附带的 query 参数原样转发给后端，
//! 由后端核实支付并落库；前端只展示结论。

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::MpFeedback;
use scuffers_shared::protocol::MpFeedbackRequest;

use crate::api::use_api;
use crate::components::icons::{CheckCircle, Clock, XCircle};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn CheckoutSuccessPage(raw_query: String) -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (feedback, set_feedback) = signal(Option::<MpFeedback>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    spawn_local(async move {
        match api.send(&MpFeedbackRequest { raw_query }).await {
            Ok(result) => set_feedback.set(Some(result)),
            Err(err) => set_error.set(Some(
                err.user_message("No pudimos verificar el estado del pago."),
            )),
        }
        set_loading.set(false);
    });

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                            <p class="mt-4 text-base-content/60">"Verificando tu pago..."</p>
                        }
                    >
                        {move || match (feedback.get(), error.get()) {
                            (Some(result), _) => {
                                let order_link = result.pedido_id.map(|id| {
                                    let href = format!("/orders/{id}");
                                    let on_click = move |ev: leptos::web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        router.navigate_to(AppRoute::OrderDetail { id });
                                    };
                                    view! {
                                        <a href=href class="btn btn-primary" on:click=on_click>
                                            "Ver mi pedido"
                                        </a>
                                    }
                                });
                                view! {
                                    <div class="flex justify-center text-success mb-4">
                                        <CheckCircle attr:class="h-16 w-16" />
                                    </div>
                                    <h1 class="text-3xl font-bold">"¡Gracias por tu compra!"</h1>
                                    <p class="py-4 text-base-content/70">
                                        {if result.ok {
                                            "Tu pago fue acreditado y el pedido está confirmado."
                                        } else {
                                            "Recibimos tu pago y lo estamos procesando."
                                        }}
                                    </p>
                                    <div class="flex justify-center gap-2">{order_link}</div>
                                }
                                .into_any()
                            }
                            (None, Some(msg)) => view! {
                                <div class="flex justify-center text-warning mb-4">
                                    <Clock attr:class="h-16 w-16" />
                                </div>
                                <h1 class="text-2xl font-bold">"Pago en verificación"</h1>
                                <p class="py-4 text-base-content/70">{msg}</p>
                                <FeedbackActions router=router />
                            }
                            .into_any(),
                            (None, None) => view! { <div></div> }.into_any(),
                        }}
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn CheckoutFailurePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <div class="flex justify-center text-error mb-4">
                        <XCircle attr:class="h-16 w-16" />
                    </div>
                    <h1 class="text-3xl font-bold">"El pago no se completó"</h1>
                    <p class="py-4 text-base-content/70">
                        "No se realizó ningún cargo. Podés intentarlo de nuevo desde tu carrito."
                    </p>
                    <FeedbackActions router=router />
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn CheckoutPendingPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <div class="flex justify-center text-warning mb-4">
                        <Clock attr:class="h-16 w-16" />
                    </div>
                    <h1 class="text-3xl font-bold">"Pago pendiente"</h1>
                    <p class="py-4 text-base-content/70">
                        "Mercado Pago todavía está procesando tu pago. "
                        "Te va a llegar un email cuando se acredite."
                    </p>
                    <FeedbackActions router=router />
                </div>
            </div>
        </div>
    }
}

#[component]
fn FeedbackActions(router: crate::web::router::RouterService) -> impl IntoView {
    view! {
        <div class="flex justify-center gap-2">
            <a
                href="/orders"
                class="btn btn-primary"
                on:click=move |ev: leptos::web_sys::MouseEvent| {
                    ev.prevent_default();
                    router.navigate_to(AppRoute::MyOrders);
                }
            >
                "Mis pedidos"
            </a>
            <a
                href="/cart"
                class="btn btn-ghost"
                on:click=move |ev: leptos::web_sys::MouseEvent| {
                    ev.prevent_default();
                    router.navigate_to(AppRoute::Cart);
                }
            >
                "Volver al carrito"
            </a>
        </div>
    }
}
