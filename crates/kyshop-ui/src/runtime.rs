//! Tokio driver for the hero carousel.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::carousel::{CarouselTiming, SlideState};
use crate::UiError;

const COMMAND_BUFFER: usize = 32;

/// What the carousel shows right now.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot<T> {
    pub index: Option<usize>,
    pub item: Option<T>,
    pub len: usize,
    pub auto: bool,
}

impl<T: Clone> CarouselSnapshot<T> {
    fn of(state: &SlideState<T>) -> Self {
        Self {
            index: state.current(),
            item: state.current_item().cloned(),
            len: state.len(),
            auto: state.is_auto(),
        }
    }
}

enum Command<T> {
    Next,
    Previous,
    GoTo(usize, oneshot::Sender<Result<(), UiError>>),
    SetItems(Vec<T>),
}

/// A carousel running on its own task.
///
/// The task owns the [`SlideState`] and sleeps on its single deadline.
/// Dropping the handle aborts the task, which cancels the pending timer.
pub struct CarouselHandle<T> {
    commands: mpsc::Sender<Command<T>>,
    snapshots: watch::Receiver<CarouselSnapshot<T>>,
    task: JoinHandle<()>,
}

impl<T> CarouselHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Mount a carousel and start auto-play.
    pub fn spawn(items: Vec<T>, timing: CarouselTiming) -> Self {
        let start = Instant::now();
        let state = SlideState::new(items, timing, Duration::ZERO);
        let (snapshot_tx, snapshots) = watch::channel(CarouselSnapshot::of(&state));
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(drive(state, start, command_rx, snapshot_tx));
        Self {
            commands,
            snapshots,
            task,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot<T>> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> CarouselSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    pub async fn next(&self) -> Result<(), UiError> {
        self.send(Command::Next).await
    }

    pub async fn previous(&self) -> Result<(), UiError> {
        self.send(Command::Previous).await
    }

    /// Jump to a slide. Out-of-range indices are rejected.
    pub async fn go_to(&self, index: usize) -> Result<(), UiError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::GoTo(index, reply)).await?;
        rx.await.map_err(|_| UiError::DriverStopped)?
    }

    pub async fn set_items(&self, items: Vec<T>) -> Result<(), UiError> {
        self.send(Command::SetItems(items)).await
    }

    async fn send(&self, command: Command<T>) -> Result<(), UiError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| UiError::DriverStopped)
    }
}

impl<T> Drop for CarouselHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn drive<T: Clone>(
    mut state: SlideState<T>,
    start: Instant,
    mut commands: mpsc::Receiver<Command<T>>,
    snapshots: watch::Sender<CarouselSnapshot<T>>,
) {
    loop {
        // A fresh sleep each turn; the previous one is dropped with the select.
        let deadline = state.next_deadline().map(|d| start + d);

        let mut reply = None;
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                let now = start.elapsed();
                match command {
                    Command::Next => state.next(now),
                    Command::Previous => state.previous(now),
                    Command::GoTo(index, tx) => reply = Some((tx, state.go_to(index, now))),
                    Command::SetItems(items) => state.set_items(items, now),
                }
            }
            _ = sleep_until(deadline) => {
                state.poll(start.elapsed());
            }
        }

        snapshots.send_replace(CarouselSnapshot::of(&state));
        if let Some((tx, result)) = reply {
            let _ = tx.send(result);
        }
    }
    tracing::debug!("carousel driver stopped");
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles() -> Vec<&'static str> {
        vec!["Cyber Odyssey", "Mystic Realms", "Velocity Rush"]
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advances_every_interval() {
        let start = Instant::now();
        let handle = CarouselHandle::spawn(titles(), CarouselTiming::default());
        let mut rx = handle.subscribe();
        assert_eq!(rx.borrow_and_update().index, Some(0));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().item, Some("Mystic Realms"));
        assert_eq!(start.elapsed(), Duration::from_secs(5));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().index, Some(2));
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_to_suspends_then_resumes() {
        let start = Instant::now();
        let handle = CarouselHandle::spawn(titles(), CarouselTiming::default());
        let mut rx = handle.subscribe();

        handle.go_to(2).await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.index, Some(2));
        assert!(!snapshot.auto);

        rx.changed().await.unwrap();
        let resumed = rx.borrow_and_update().clone();
        assert!(resumed.auto);
        assert_eq!(resumed.index, Some(2));
        assert_eq!(start.elapsed(), Duration::from_secs(5));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().index, Some(0));
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_clicks_extend_cooldown() {
        let start = Instant::now();
        let handle = CarouselHandle::spawn(titles(), CarouselTiming::default());
        let mut rx = handle.subscribe();

        handle.next().await.unwrap();
        time::sleep(Duration::from_secs(3)).await;
        // go_to replies after the snapshot is published
        handle.go_to(0).await.unwrap();
        rx.borrow_and_update();

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().auto);
        assert_eq!(start.elapsed(), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_to_out_of_range() {
        let handle = CarouselHandle::spawn(titles(), CarouselTiming::default());
        let err = handle.go_to(7).await.unwrap_err();
        assert_eq!(err, UiError::SlideOutOfRange { index: 7, len: 3 });
        assert!(handle.snapshot().auto);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_carousel_stays_idle() {
        let handle = CarouselHandle::spawn(Vec::<&str>::new(), CarouselTiming::default());
        time::sleep(Duration::from_secs(60)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.index, None);
        assert_eq!(snapshot.len, 0);

        handle.set_items(titles()).await.unwrap();
        handle.go_to(2).await.unwrap();
        assert_eq!(handle.snapshot().item, Some("Velocity Rush"));
        assert_eq!(handle.snapshot().len, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_driver() {
        let handle = CarouselHandle::spawn(titles(), CarouselTiming::default());
        let mut rx = handle.subscribe();
        drop(handle);
        assert!(rx.changed().await.is_err());
    }
}
