//! 登录页

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{login_with, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::storage::BrowserTokens;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 登录成功后的跳转（含 next）由路由服务的 Effect 统一处理
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Completá email y contraseña.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let api = api.get_value();
            match login_with(&api, &BrowserTokens, &email.get_untracked(), &password.get_untracked())
                .await
            {
                Ok(user) => auth.set_authenticated(user),
                Err(err) => {
                    set_error_msg.set(Some(err.user_message("Credenciales inválidas.")));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let go_register = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(AppRoute::Register);
    };

    view! {
        <div class="hero min-h-[70vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Ingresar"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="tu@email.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        "Ingresando..."
                                    }
                                    .into_any()
                                } else {
                                    "Ingresar".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿No tenés cuenta? "
                            <a href="/register" class="link link-primary" on:click=go_register>
                                "Registrate"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
