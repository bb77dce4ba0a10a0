//! Application shell and shared state.

use std::sync::Arc;

use kyshop_auth::{InMemoryIdentity, PasswordHasher, SessionOwner, User};
use kyshop_ui::{AuthMode, AuthModal, PurchaseModal, StorefrontConfig};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;

use crate::hero::HeroSection;
use crate::modals::{AuthDialog, PurchaseDialog};
use crate::shelf::Shelf;

/// Demo account available in the local identity provider.
const DEMO_EMAIL: &str = "demo@kyshop.ph";
const DEMO_PASSWORD: &str = "secret1";

// ============================================================================
// Shared State
// ============================================================================

/// Everything the dialogs and cards share, provided as context by [`App`].
#[derive(Clone, Copy)]
pub struct Store {
    pub config: StoredValue<StorefrontConfig>,
    pub session: StoredValue<Arc<SessionOwner>>,
    /// Mirror of the session owner's user, for views.
    pub user: RwSignal<Option<User>>,
    pub auth: RwSignal<AuthModal>,
    pub purchase: RwSignal<PurchaseModal>,
}

pub fn use_store() -> Store {
    expect_context::<Store>()
}

fn identity() -> InMemoryIdentity {
    let seeded = InMemoryIdentity::new(PasswordHasher::default()).with_account(
        DEMO_EMAIL,
        DEMO_PASSWORD,
        Some("Demo Player"),
    );
    match seeded {
        Ok(identity) => identity,
        Err(e) => {
            warn!("demo account unavailable: {e}");
            InMemoryIdentity::new(PasswordHasher::default())
        }
    }
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Arc::new(SessionOwner::new(Arc::new(identity())));
    let user = RwSignal::new(session.current_user());

    // Views never write `user`; they follow the session owner.
    let mut changes = session.subscribe();
    spawn_local(async move {
        while changes.changed().await.is_ok() {
            let current = changes.borrow_and_update().clone();
            user.set(current);
        }
    });

    provide_context(Store {
        config: StoredValue::new(StorefrontConfig::default()),
        session: StoredValue::new(session),
        user,
        auth: RwSignal::new(AuthModal::new()),
        purchase: RwSignal::new(PurchaseModal::new()),
    });

    view! {
        <Meta name="description" content="Ky Shop - Discounted games, delivered instantly"/>
        <Title text="Ky Shop"/>

        <Header/>
        <main>
            <HeroSection/>
            <Shelf/>
        </main>
        <Footer/>

        <AuthDialog/>
        <PurchaseDialog/>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header() -> impl IntoView {
    let Store { session, user, auth, .. } = use_store();

    let sign_out = move |_| {
        let session = session.get_value();
        spawn_local(async move {
            if let Err(e) = session.sign_out().await {
                warn!("sign out: {e}");
            }
        });
    };

    view! {
        <header class="site-header">
            <h1>"Ky Shop"</h1>
            {move || match user.get() {
                Some(current) => view! {
                    <div class="user-menu">
                        <span class="user-name">{current.display_name().to_string()}</span>
                        <span class="user-email">{current.email.clone()}</span>
                        <button class="btn-link" on:click=sign_out>"Sign Out"</button>
                    </div>
                }.into_any(),
                None => view! {
                    <div class="user-menu">
                        <button class="btn" on:click=move |_| auth.update(|m| m.open(AuthMode::SignIn))>
                            "Sign In"
                        </button>
                        <button class="btn-link" on:click=move |_| auth.update(|m| m.open(AuthMode::SignUp))>
                            "Create Account"
                        </button>
                    </div>
                }.into_any(),
            }}
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p>"Ky Shop - Prices in Philippine pesos"</p>
            <p style="font-size: 0.8rem; color: #888;">
                "Demo account: " {DEMO_EMAIL} " / " {DEMO_PASSWORD}
            </p>
        </footer>
    }
}
