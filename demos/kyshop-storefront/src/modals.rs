//! Sign-in and purchase dialogs.

use kyshop_auth::{Credentials, Field, Registration};
use kyshop_commerce::PaymentGateway;
use kyshop_ui::{request_purchase, AuthMode, PurchasePhase, PurchaseQuote};
use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::{use_store, Store};
use crate::browser::BrowserGateway;

/// A buy click: the auth dialog for guests, the purchase dialog otherwise.
pub fn buy(store: Store, quote: PurchaseQuote) {
    let user = store.user.get_untracked();
    store.auth.update(|auth| {
        store.purchase.update(|purchase| {
            request_purchase(user.as_ref(), quote, auth, purchase);
        })
    });
}

// ============================================================================
// Auth Dialog
// ============================================================================

#[component]
pub fn AuthDialog() -> impl IntoView {
    let Store { session, auth, .. } = use_store();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let is_sign_up = move || auth.with(|m| m.mode() == AuthMode::SignUp);
    let submitting = move || auth.with(|m| m.is_submitting());
    let field_error = move |field: Field| auth.with(|m| m.field_error(field).map(str::to_string));

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mode = auth.with_untracked(|m| m.mode());
        let Some(ticket) = auth.try_update(|m| m.begin_submit()).flatten() else {
            return;
        };

        let session = session.get_value();
        let registration = Registration {
            full_name: full_name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        spawn_local(async move {
            let result = match mode {
                AuthMode::SignIn => {
                    let credentials = Credentials::new(registration.email, registration.password);
                    session.sign_in(&credentials).await
                }
                AuthMode::SignUp => session.sign_up(&registration).await,
            };
            let signed_in = auth.try_update(|m| m.finish_submit(ticket, result).is_some());
            if signed_in == Some(true) {
                password.set(String::new());
                confirm_password.set(String::new());
            }
        });
    };

    let switch = move |_| {
        let target = match auth.with_untracked(|m| m.mode()) {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        auth.update(|m| m.switch_mode(target));
    };

    view! {
        <Show when=move || auth.with(|m| m.is_open())>
            <div class="modal-backdrop">
                <form class="modal" on:submit=submit>
                    <button type="button" class="modal-close" on:click=move |_| auth.update(|m| m.close())>"×"</button>
                    <h2>{move || auth.with(|m| m.mode().title())}</h2>

                    {move || auth.with(|m| m.banner().map(str::to_string)).map(|banner| view! {
                        <p class="form-error">{banner}</p>
                    })}

                    <Show when=is_sign_up>
                        <label>"Full Name"
                            <input type="text" prop:value=full_name on:input=move |ev| full_name.set(event_target_value(&ev))/>
                        </label>
                        <p class="field-error">{move || field_error(Field::FullName)}</p>
                    </Show>

                    <label>"Email"
                        <input type="email" prop:value=email on:input=move |ev| email.set(event_target_value(&ev))/>
                    </label>
                    <p class="field-error">{move || field_error(Field::Email)}</p>

                    <label>"Password"
                        <input type="password" prop:value=password on:input=move |ev| password.set(event_target_value(&ev))/>
                    </label>
                    <p class="field-error">{move || field_error(Field::Password)}</p>

                    <Show when=is_sign_up>
                        <label>"Confirm Password"
                            <input type="password" prop:value=confirm_password on:input=move |ev| confirm_password.set(event_target_value(&ev))/>
                        </label>
                        <p class="field-error">{move || field_error(Field::ConfirmPassword)}</p>
                    </Show>

                    <button type="submit" class="btn" disabled=submitting>
                        {move || {
                            let mode = auth.with(|m| m.mode());
                            if submitting() { mode.busy_label() } else { mode.title() }
                        }}
                    </button>
                    <button type="button" class="btn-link" on:click=switch>
                        {move || if is_sign_up() {
                            "Already have an account? Sign In"
                        } else {
                            "Don't have an account? Sign Up"
                        }}
                    </button>
                </form>
            </div>
        </Show>
    }
}

// ============================================================================
// Purchase Dialog
// ============================================================================

#[component]
pub fn PurchaseDialog() -> impl IntoView {
    let Store { config, user, purchase, .. } = use_store();

    let confirm = move |_| {
        let current = user.get_untracked();
        let begun = match purchase.try_update(|m| m.begin(current.as_ref())) {
            Some(begun) => begun,
            None => return,
        };
        let (ticket, transaction) = match begun {
            Ok(begun) => begun,
            Err(e) => {
                warn!("purchase: {e}");
                return;
            }
        };

        let gateway = BrowserGateway::new(config.with_value(|c| c.processing_delay()));
        spawn_local(async move {
            let outcome = gateway.submit(&transaction).await;
            // A closed or reopened dialog has moved on; resolve drops the result.
            purchase.try_update(|m| m.resolve(ticket, outcome));
        });
    };

    let close = move |_| purchase.update(|m| m.close());
    let processing = move || purchase.with(|m| m.is_processing());

    view! {
        <Show when=move || purchase.with(|m| m.is_open())>
            <div class="modal-backdrop">
                <div class="modal">
                    <button type="button" class="modal-close" disabled=processing on:click=close>"×"</button>
                    {move || purchase.with(|m| m.quote().cloned()).map(|quote| {
                        let complete = purchase.with(|m| matches!(m.phase(), PurchasePhase::Complete { .. }));
                        if complete {
                            view! {
                                <div class="purchase-success">
                                    <h2>"Purchase Successful!"</h2>
                                    <p>{quote.success_message()}</p>
                                    <button class="btn" on:click=close>"Continue Shopping"</button>
                                </div>
                            }.into_any()
                        } else {
                            view! { <PurchaseReview quote=quote processing=Signal::derive(processing)/> }.into_any()
                        }
                    })}
                    {move || purchase.with(|m| m.banner().map(str::to_string)).map(|banner| view! {
                        <p class="form-error">{banner}</p>
                    })}
                    <Show when=move || !purchase.with(|m| matches!(m.phase(), PurchasePhase::Complete { .. }))>
                        <button class="btn" disabled=processing on:click=confirm>
                            {move || if processing() {
                                "Processing Payment...".to_string()
                            } else {
                                purchase.with(|m| m.quote().map(|q| q.confirm_label()).unwrap_or_default())
                            }}
                        </button>
                    </Show>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn PurchaseReview(quote: PurchaseQuote, processing: Signal<bool>) -> impl IntoView {
    let platforms = quote.platforms.join(", ");
    let discounted = quote.discount.is_active();

    view! {
        <div class="purchase-review" class:dimmed=move || processing.get()>
            <h2>"Confirm Purchase"</h2>
            <div class="purchase-game">
                <img src=quote.image_url.clone() alt=quote.title.clone()/>
                <div>
                    <h3>{quote.title.clone()}</h3>
                    <p class="platforms">{platforms}</p>
                </div>
            </div>
            <dl class="price-breakdown">
                <dt>"Original Price:"</dt>
                <dd>{quote.original_price.display()}</dd>
                {discounted.then(|| view! {
                    <dt>{quote.discount_label()}</dt>
                    <dd class="savings">"-" {quote.savings().display()}</dd>
                })}
                <dt class="total">"Total:"</dt>
                <dd class="total">{quote.sale_price().display()}</dd>
            </dl>
        </div>
    }
}
