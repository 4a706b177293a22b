//! Newsletter 订阅表单

use leptos::prelude::*;
use leptos::task::spawn_local;

use scuffers_shared::protocol::NewsletterRequest;

use crate::api::use_api;

const DEFAULT_OK: &str = "¡Gracias por suscribirte!";
const DEFAULT_ERR: &str = "No se pudo completar la suscripción.";

#[component]
pub fn NewsletterForm() -> impl IntoView {
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (feedback, set_feedback) = signal(Option::<(bool, String)>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = email.get();
        if value.trim().is_empty() {
            return;
        }

        set_is_submitting.set(true);
        set_feedback.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.send(&NewsletterRequest { email: value }).await {
                Ok(resp) => {
                    set_feedback
                        .set(Some((true, resp.detail.unwrap_or_else(|| DEFAULT_OK.into()))));
                    set_email.set(String::new());
                }
                Err(err) => {
                    set_feedback.set(Some((false, err.user_message(DEFAULT_ERR))));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <form class="flex flex-col gap-2" on:submit=on_submit>
            <div class="join">
                <input
                    type="email"
                    placeholder="tu@email.com"
                    class="input input-bordered join-item text-base-content"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                    required
                />
                <button class="btn btn-primary join-item" disabled=move || is_submitting.get()>
                    "Suscribirme"
                </button>
            </div>
            <Show when=move || feedback.get().is_some()>
                {move || {
                    let (ok, msg) = feedback.get().unwrap_or_default();
                    let class = if ok { "text-success text-sm" } else { "text-error text-sm" };
                    view! { <p class=class>{msg}</p> }
                }}
            </Show>
        </form>
    }
}
