//! Category strip and the game grid beneath it.

use kyshop_commerce::catalog::{load_catalog, StaticCatalog};
use kyshop_commerce::CatalogEntry;
use kyshop_ui::{
    buy_button_label, CategoryFilterState, Direction, GridView, PurchaseQuote,
    ScrollAffordanceState, NO_RESULTS_MESSAGE,
};
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::{use_store, Store};
use crate::browser;
use crate::modals::buy;

/// What the grid renders, detached from the filter's borrow.
#[derive(Clone, PartialEq)]
enum Grid {
    Loading,
    Empty,
    Entries(Vec<CatalogEntry>),
}

#[component]
pub fn Shelf() -> impl IntoView {
    let filter = RwSignal::new(CategoryFilterState::default());

    spawn_local(async move {
        let entries = load_catalog(&StaticCatalog::default()).await;
        filter.update(|f| f.load(entries));
    });

    let grid = Memo::new(move |_| {
        filter.with(|f| match f.view() {
            GridView::Loading => Grid::Loading,
            GridView::Empty { .. } => Grid::Empty,
            GridView::Entries(entries) => Grid::Entries(entries.into_iter().cloned().collect()),
        })
    });

    view! {
        <CategoryBar filter=filter/>
        <section class="games">
            <h2>{move || filter.with(|f| f.heading())}</h2>
            {move || match grid.get() {
                Grid::Loading => view! { <GameGridSkeleton/> }.into_any(),
                Grid::Empty => view! { <p class="no-results">{NO_RESULTS_MESSAGE}</p> }.into_any(),
                Grid::Entries(entries) => view! {
                    <div class="game-grid">
                        {entries.into_iter().map(|entry| view! { <GameCard entry=entry/> }).collect::<Vec<_>>()}
                    </div>
                }.into_any(),
            }}
        </section>
    }
}

#[component]
fn CategoryBar(filter: RwSignal<CategoryFilterState>) -> impl IntoView {
    let settings = use_store().config.with_value(|c| c.scroll_settings());
    let affordance = RwSignal::new(ScrollAffordanceState::new(settings));
    let strip = NodeRef::<Div>::new();

    // Runs once the strip is in the DOM.
    Effect::new(move |_| {
        if let Some(el) = strip.get() {
            affordance.update(|a| {
                a.mount(browser::geometry(&el));
            });
        }
    });

    let on_scroll = move |_| {
        if let Some(el) = strip.get_untracked() {
            affordance.update(|a| {
                a.on_scroll(browser::geometry(&el));
            });
        }
    };

    let scroll = move |direction: Direction| {
        let Some(el) = strip.get_untracked() else {
            return;
        };
        if let Some(animation) = affordance.with_untracked(|a| a.scroll_by(direction)) {
            browser::animate_scroll(el.into(), animation, browser::now());
        }
    };

    view! {
        <nav class="category-bar">
            <Show when=move || affordance.with(|a| a.left_visible())>
                <button class="scroll-arrow left" aria-label="Scroll left" on:click=move |_| scroll(Direction::Left)>"‹"</button>
            </Show>
            <div class="category-strip" node_ref=strip on:scroll=on_scroll>
                {move || filter.with(|f| f.categories().to_vec()).into_iter().map(|label| {
                    let name = label.clone();
                    let active = label.clone();
                    view! {
                        <button
                            class="category"
                            class:active=move || filter.with(|f| f.is_active(&active))
                            on:click=move |_| filter.update(|f| f.select_category(&name))
                        >
                            {label}
                        </button>
                    }
                }).collect::<Vec<_>>()}
            </div>
            <Show when=move || affordance.with(|a| a.right_visible())>
                <button class="scroll-arrow right" aria-label="Scroll right" on:click=move |_| scroll(Direction::Right)>"›"</button>
            </Show>
        </nav>
    }
}

#[component]
fn GameCard(entry: CatalogEntry) -> impl IntoView {
    let store: Store = use_store();
    let quote = PurchaseQuote::from(&entry);
    let discounted = entry.discount.is_active();
    let original = entry.original_price.display();
    let sale = entry.sale_price().display();
    let badge = format!("-{}", entry.discount);
    let label = move || store.user.with(|user| buy_button_label(user.as_ref()));

    view! {
        <div class="game-card">
            <div class="game-cover">
                <img src=entry.cover_image.clone() alt=entry.title.clone()/>
                {discounted.then(|| view! { <span class="discount-badge">{badge}</span> })}
            </div>
            <div class="game-info">
                <h3>{entry.title.clone()}</h3>
                <p class="genre">{entry.genre.clone()}</p>
                <p class="platforms">{entry.platforms.join(" · ")}</p>
                <p class="price">
                    {discounted.then(|| view! { <span class="original">{original}</span> })}
                    <span class="sale">{sale}</span>
                </p>
                <button class="btn" on:click=move |_| buy(store, quote.clone())>{label}</button>
            </div>
        </div>
    }
}

#[component]
fn GameGridSkeleton() -> impl IntoView {
    view! {
        <div class="game-grid">
            <GameCardSkeleton/>
            <GameCardSkeleton/>
            <GameCardSkeleton/>
            <GameCardSkeleton/>
        </div>
    }
}

#[component]
fn GameCardSkeleton() -> impl IntoView {
    view! {
        <div class="game-card">
            <div class="skeleton" style="width: 100%; height: 200px;"></div>
            <div class="game-info">
                <div class="skeleton" style="width: 80%; height: 1.5rem; margin-bottom: 0.5rem;"></div>
                <div class="skeleton" style="width: 40%; height: 1.25rem;"></div>
            </div>
        </div>
    }
}
