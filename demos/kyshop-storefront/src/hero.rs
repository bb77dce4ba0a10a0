//! Hero carousel.

use kyshop_commerce::catalog::{load_promotions, StaticCatalog};
use kyshop_commerce::PromotedItem;
use kyshop_ui::{buy_button_label, PurchaseQuote, SlideState};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::{use_store, Store};
use crate::browser;
use crate::modals::buy;

type Slides = RwSignal<SlideState<PromotedItem>>;
type Timer = StoredValue<Option<TimeoutHandle>>;

fn cancel(timer: Timer) {
    if let Some(handle) = timer.get_value() {
        handle.clear();
    }
    timer.set_value(None);
}

/// Arm one timeout for the carousel's next deadline, replacing any pending one.
fn schedule(slides: Slides, timer: Timer) {
    cancel(timer);
    let Some(deadline) = slides.with_untracked(|s| s.next_deadline()) else {
        return;
    };
    let delay = deadline.saturating_sub(browser::now());
    let handle = set_timeout_with_handle(
        move || {
            timer.set_value(None);
            slides.update(|s| {
                s.poll(browser::now());
            });
            schedule(slides, timer);
        },
        delay,
    );
    match handle {
        Ok(handle) => timer.set_value(Some(handle)),
        Err(e) => warn!("carousel timer: {e:?}"),
    }
}

#[component]
pub fn HeroSection() -> impl IntoView {
    let store = use_store();
    let timing = store.config.with_value(|c| c.carousel_timing());
    let slides: Slides = RwSignal::new(SlideState::new(Vec::new(), timing, browser::now()));
    let timer: Timer = StoredValue::new(None);
    let loaded = RwSignal::new(false);

    spawn_local(async move {
        let promotions = load_promotions(&StaticCatalog::default()).await;
        slides.update(|s| s.set_items(promotions, browser::now()));
        loaded.set(true);
        schedule(slides, timer);
    });
    on_cleanup(move || cancel(timer));

    let previous = move |_| {
        slides.update(|s| s.previous(browser::now()));
        schedule(slides, timer);
    };
    let next = move |_| {
        slides.update(|s| s.next(browser::now()));
        schedule(slides, timer);
    };
    let go_to = move |index: usize| {
        slides.update(|s| {
            if let Err(e) = s.go_to(index, browser::now()) {
                warn!("{e}");
            }
        });
        schedule(slides, timer);
    };

    let has_slides = move || !slides.with(|s| s.is_empty());

    view! {
        <section class="hero">
            {move || match slides.with(|s| s.current_item().cloned()) {
                Some(item) => view! { <HeroSlide item=item store=store/> }.into_any(),
                None if loaded.get() => ().into_any(),
                None => view! { <div class="hero-slide skeleton"></div> }.into_any(),
            }}
            // No promotions means no controls either.
            <Show when=has_slides>
                <button class="hero-arrow left" aria-label="Previous slide" on:click=previous>"‹"</button>
                <button class="hero-arrow right" aria-label="Next slide" on:click=next>"›"</button>
                <div class="hero-dots">
                    {move || {
                        let (len, current) = slides.with(|s| (s.len(), s.current()));
                        (0..len).map(|index| {
                            let class = if current == Some(index) { "dot active" } else { "dot" };
                            view! {
                                <button class=class aria-label="Go to slide" on:click=move |_| go_to(index)></button>
                            }
                        }).collect::<Vec<_>>()
                    }}
                </div>
            </Show>
        </section>
    }
}

#[component]
fn HeroSlide(item: PromotedItem, store: Store) -> impl IntoView {
    let quote = PurchaseQuote::from(&item);
    let original = item.original_price.display();
    let sale = item.sale_price().display();
    let badge = format!("-{}", item.discount);
    let label = move || store.user.with(|user| buy_button_label(user.as_ref()));

    view! {
        <div class="hero-slide" style=format!("background-image: url('{}');", item.image_url)>
            <div class="hero-copy">
                <span class="discount-badge">{badge}</span>
                <h2>{item.title.clone()}</h2>
                <p>{item.description.clone()}</p>
                <div class="hero-price">
                    <span class="original">{original}</span>
                    <span class="sale">{sale}</span>
                </div>
                <button class="btn" on:click=move |_| buy(store, quote.clone())>{label}</button>
            </div>
        </div>
    }
}
