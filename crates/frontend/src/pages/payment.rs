//! Application fee payment setup

use super::{BUTTON_CLASS, use_student};
use admissions_frontend_common::ErrorBanner;
use admissions_frontend_common::auth::user_message;
use admissions_frontend_common::reload::navigate_to;
use admissions_http::types::{PaymentMethod, PaymentSetup, PaymentSetupRequest};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

fn parse_method(value: &str) -> PaymentMethod {
    match value {
        "bank_transfer" => PaymentMethod::BankTransfer,
        "waiver" => PaymentMethod::Waiver,
        _ => PaymentMethod::Card,
    }
}

#[derive(Properties, PartialEq)]
pub struct PaymentPageProps {
    pub id: String,
}

/// Application fee payment setup
#[function_component(PaymentPage)]
pub fn payment_page(props: &PaymentPageProps) -> Html {
    let student = use_student();
    let method = use_state(|| PaymentMethod::Card);
    let setup = use_state(|| None::<PaymentSetup>);
    let error = use_state(|| None::<String>);

    let on_method = {
        let method = method.clone();
        Callback::from(move |e: Event| {
            method.set(parse_method(
                &e.target_unchecked_into::<HtmlSelectElement>().value(),
            ));
        })
    };

    let on_submit = {
        let method = method.clone();
        let setup = setup.clone();
        let error = error.clone();
        let application_id = props.id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some((client, _)) = student.clone() else {
                return;
            };
            let request = PaymentSetupRequest {
                application_id: application_id.clone(),
                method: *method,
            };
            let setup = setup.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.setup_payment(&request).await {
                    Ok(result) => {
                        if let Some(url) = &result.checkout_url {
                            navigate_to(url);
                        }
                        setup.set(Some(result));
                    }
                    Err(e) => error.set(Some(user_message(&e))),
                }
            });
        })
    };

    html! {
        <div class="max-w-md mx-auto bg-white rounded-lg shadow p-8">
            <h1 class="text-2xl font-bold mb-6">{"Application fee"}</h1>
            if let Some(message) = &*error {
                <ErrorBanner message={message.clone()} />
            }
            if let Some(result) = &*setup {
                <p class="text-gray-700">
                    { format!(
                        "Payment {} created for {}.{:02} {}.",
                        result.payment_id,
                        result.amount_cents / 100,
                        result.amount_cents % 100,
                        result.currency,
                    ) }
                </p>
            } else {
                <form onsubmit={on_submit} class="space-y-4">
                    <select class="w-full px-3 py-2 border border-gray-300 rounded-md" onchange={on_method}>
                        <option value="card" selected=true>{"Card"}</option>
                        <option value="bank_transfer">{"Bank transfer"}</option>
                        <option value="waiver">{"Fee waiver"}</option>
                    </select>
                    <button type="submit" class={BUTTON_CLASS}>{"Continue to payment"}</button>
                </form>
            }
        </div>
    }
}
