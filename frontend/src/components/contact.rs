//! 联系页

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::protocol::ContactRequest;

use crate::api::use_api;

#[component]
pub fn ContactPage() -> impl IntoView {
    let api = StoredValue::new(use_api());

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (feedback, set_feedback) = signal(Option::<(bool, String)>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_feedback.set(None);

        spawn_local(async move {
            let request = ContactRequest {
                name: name.get_untracked(),
                email: email.get_untracked(),
                message: message.get_untracked(),
            };
            match api.get_value().send(&request).await {
                Ok(resp) => {
                    set_feedback.set(Some((
                        true,
                        resp.detail
                            .unwrap_or_else(|| "¡Mensaje enviado! Te respondemos pronto.".into()),
                    )));
                    set_name.set(String::new());
                    set_email.set(String::new());
                    set_message.set(String::new());
                }
                Err(err) => {
                    set_feedback
                        .set(Some((false, err.user_message("No se pudo enviar el mensaje."))));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-xl mx-auto px-4 py-12">
            <h1 class="text-2xl font-bold uppercase tracking-wide mb-2">"Contacto"</h1>
            <p class="text-base-content/70 mb-6">
                "¿Dudas sobre tu pedido o nuestros productos? Escribinos."
            </p>

            <form class="flex flex-col gap-4" on:submit=on_submit>
                <Show when=move || feedback.get().is_some()>
                    {move || {
                        let (ok, msg) = feedback.get().unwrap_or_default();
                        let class = if ok { "alert alert-success" } else { "alert alert-error" };
                        view! {
                            <div role="alert" class=class>
                                <span>{msg}</span>
                            </div>
                        }
                    }}
                </Show>

                <input
                    type="text"
                    placeholder="Nombre"
                    class="input input-bordered w-full"
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    prop:value=name
                    required
                />
                <input
                    type="email"
                    placeholder="Email"
                    class="input input-bordered w-full"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                    required
                />
                <textarea
                    placeholder="Tu mensaje"
                    class="textarea textarea-bordered w-full h-32"
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                    prop:value=message
                    required
                ></textarea>
                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() { "Enviando..." } else { "Enviar" }}
                </button>
            </form>
        </div>
    }
}
