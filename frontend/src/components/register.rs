//! 注册页

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::protocol::RegisterRequest;

use crate::api::use_api;
use crate::auth::{register_with, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::storage::BrowserTokens;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (first_name, set_first_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().is_empty() || email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Completá todos los campos obligatorios.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let request = RegisterRequest {
                username: username.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
                first_name: first_name.get_untracked(),
            };
            match register_with(&api.get_value(), &BrowserTokens, request).await {
                // 注册即登录，跳转交给路由服务
                Ok(user) => auth.set_authenticated(user),
                Err(err) => {
                    set_error_msg.set(Some(err.user_message("No se pudo crear la cuenta.")));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let go_login = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(AppRoute::Login { next: None });
    };

    view! {
        <div class="hero min-h-[70vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Crear cuenta"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Usuario"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="first-name">
                                <span class="label-text">"Nombre (opcional)"</span>
                            </label>
                            <input
                                id="first-name"
                                type="text"
                                on:input=move |ev| set_first_name.set(event_target_value(&ev))
                                prop:value=first_name
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
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
                                        "Creando..."
                                    }
                                    .into_any()
                                } else {
                                    "Crear cuenta".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿Ya tenés cuenta? "
                            <a href="/login" class="link link-primary" on:click=go_login>
                                "Ingresá"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
