//! Browser glue: the page clock, strip geometry and a timer-backed gateway.

use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use kyshop_commerce::{PaymentGateway, PaymentOutcome, Transaction};
use kyshop_ui::{ScrollGeometry, SmoothScroll};
use leptos::prelude::*;
use web_sys::Element;

/// Time since the page started; the origin every state machine here shares.
pub fn now() -> Duration {
    let millis = window()
        .performance()
        .map(|performance| performance.now())
        .unwrap_or_default();
    Duration::from_secs_f64(millis.max(0.0) / 1000.0)
}

pub fn geometry(el: &Element) -> ScrollGeometry {
    ScrollGeometry::new(
        el.scroll_left() as f64,
        el.scroll_width() as f64,
        el.client_width() as f64,
    )
}

/// Step `animation` one frame at a time until it lands.
pub fn animate_scroll(el: Element, animation: SmoothScroll, started: Duration) {
    let elapsed = now().saturating_sub(started);
    el.scroll_to_with_x_and_y(animation.position_at(elapsed), el.scroll_top() as f64);
    if !animation.is_finished(elapsed) {
        request_animation_frame(move || animate_scroll(el, animation, started));
    }
}

/// Approves every purchase after a fixed delay, driven by `setTimeout`.
pub struct BrowserGateway {
    delay: Duration,
}

impl BrowserGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentGateway for BrowserGateway {
    async fn submit(&self, transaction: &Transaction) -> PaymentOutcome {
        let (done, elapsed) = oneshot::channel::<()>();
        set_timeout(
            move || {
                let _ = done.send(());
            },
            self.delay,
        );

        match elapsed.await {
            Ok(()) => PaymentOutcome::Approved {
                reference: format!("ref_{}", transaction.id),
            },
            Err(_) => PaymentOutcome::Declined {
                reason: "Payment timer was cancelled".to_string(),
            },
        }
    }
}
