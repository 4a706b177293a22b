//! 我的账户：档案 + 配送地址

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::Address;
use scuffers_shared::protocol::{GetAddressRequest, UpdateAddressRequest};

use crate::api::use_api;
use crate::auth::use_auth;

#[component]
pub fn AccountPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let state = auth.state();

    let (direccion, set_direccion) = signal(String::new());
    let (ciudad, set_ciudad) = signal(String::new());
    let (provincia, set_provincia) = signal(String::new());
    let (codigo_postal, set_codigo_postal) = signal(String::new());
    let (telefono, set_telefono) = signal(String::new());
    let (is_saving, set_is_saving) = signal(false);
    let (feedback, set_feedback) = signal(Option::<(bool, String)>::None);

    // 加载已保存地址
    spawn_local(async move {
        if let Ok(address) = api.get_value().send(&GetAddressRequest).await {
            set_direccion.set(address.direccion);
            set_ciudad.set(address.ciudad);
            set_provincia.set(address.provincia);
            set_codigo_postal.set(address.codigo_postal);
            set_telefono.set(address.telefono);
        }
    });

    let on_save = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_saving.set(true);
        set_feedback.set(None);

        spawn_local(async move {
            let request = UpdateAddressRequest {
                address: Address {
                    direccion: direccion.get_untracked(),
                    ciudad: ciudad.get_untracked(),
                    provincia: provincia.get_untracked(),
                    codigo_postal: codigo_postal.get_untracked(),
                    telefono: telefono.get_untracked(),
                },
            };
            match api.get_value().send(&request).await {
                Ok(_) => set_feedback.set(Some((true, "Dirección guardada.".into()))),
                Err(err) => set_feedback.set(Some((
                    false,
                    err.user_message("No se pudo guardar la dirección."),
                ))),
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div class="max-w-xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold uppercase tracking-wide mb-6">"Mi cuenta"</h1>

            <div class="card bg-base-100 border border-base-200 mb-6">
                <div class="card-body">
                    <h2 class="card-title text-base">"Perfil"</h2>
                    {move || {
                        state
                            .get()
                            .user
                            .map(|u| {
                                view! {
                                    <p>{u.display_name().to_string()}</p>
                                    <p class="text-sm text-base-content/60">{u.email.clone()}</p>
                                }
                            })
                    }}
                </div>
            </div>

            <div class="card bg-base-100 border border-base-200">
                <div class="card-body">
                    <h2 class="card-title text-base">"Dirección de envío"</h2>
                    <form class="flex flex-col gap-3" on:submit=on_save>
                        <Show when=move || feedback.get().is_some()>
                            {move || {
                                let (ok, msg) = feedback.get().unwrap_or_default();
                                let class = if ok {
                                    "alert alert-success text-sm py-2"
                                } else {
                                    "alert alert-error text-sm py-2"
                                };
                                view! {
                                    <div role="alert" class=class>
                                        <span>{msg}</span>
                                    </div>
                                }
                            }}
                        </Show>

                        <input
                            type="text"
                            placeholder="Dirección"
                            class="input input-bordered"
                            on:input=move |ev| set_direccion.set(event_target_value(&ev))
                            prop:value=direccion
                        />
                        <div class="grid grid-cols-2 gap-3">
                            <input
                                type="text"
                                placeholder="Ciudad"
                                class="input input-bordered"
                                on:input=move |ev| set_ciudad.set(event_target_value(&ev))
                                prop:value=ciudad
                            />
                            <input
                                type="text"
                                placeholder="Provincia"
                                class="input input-bordered"
                                on:input=move |ev| set_provincia.set(event_target_value(&ev))
                                prop:value=provincia
                            />
                        </div>
                        <div class="grid grid-cols-2 gap-3">
                            <input
                                type="text"
                                placeholder="Código postal"
                                class="input input-bordered"
                                on:input=move |ev| set_codigo_postal.set(event_target_value(&ev))
                                prop:value=codigo_postal
                            />
                            <input
                                type="tel"
                                placeholder="Teléfono"
                                class="input input-bordered"
                                on:input=move |ev| set_telefono.set(event_target_value(&ev))
                                prop:value=telefono
                            />
                        </div>
                        <button class="btn btn-primary mt-2" disabled=move || is_saving.get()>
                            {move || if is_saving.get() { "Guardando..." } else { "Guardar" }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
