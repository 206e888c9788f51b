//! Background feed loading.
//!
//! Fetches run on the IO task pool so the frame loop never waits on the
//! network. The finished task is polled once per frame; its result replaces
//! [`FeedState`]. A refresh timer re-runs the fetch on the configured
//! revalidation interval.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task};

use super::{FeedSource, RawFeed};
use crate::config::AppConfig;
use crate::normalize::{normalize, NormalizeOptions, NormalizedObject};

/// Plugin owning the feed lifecycle.
///
/// Expects [`AppConfig`] and [`FeedSourceHandle`] to be inserted first.
pub struct FeedLoaderPlugin;

impl Plugin for FeedLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FeedState>()
            .init_resource::<PendingFetch>()
            .init_resource::<RevalidateTimer>()
            .add_systems(Startup, (configure_revalidation, start_fetch).chain())
            .add_systems(Update, (revalidate_feed, poll_fetch).chain());
    }
}

/// What the presentation layers currently have to show.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub enum FeedState {
    /// First fetch still running.
    #[default]
    Loading,
    /// Normalized objects, ready for display.
    Ready(Vec<NormalizedObject>),
    /// The feed could not be retrieved.
    Unavailable,
}

impl FeedState {
    /// Normalized objects, if any.
    pub fn objects(&self) -> &[NormalizedObject] {
        match self {
            FeedState::Ready(objects) => objects,
            FeedState::Loading | FeedState::Unavailable => &[],
        }
    }

    /// State after a fetch finished.
    ///
    /// A failed refresh keeps previously loaded data; a failed first load
    /// makes the feed unavailable.
    pub fn after_fetch(&self, fetched: Option<RawFeed>, options: NormalizeOptions) -> FeedState {
        match (fetched, self) {
            (Some(feed), _) => FeedState::Ready(normalize(&feed, options)),
            (None, FeedState::Ready(objects)) => FeedState::Ready(objects.clone()),
            (None, _) => FeedState::Unavailable,
        }
    }
}

/// Source used for every fetch.
#[derive(Resource, Clone)]
pub struct FeedSourceHandle(pub Arc<dyn FeedSource>);

/// In-flight fetch, if any.
#[derive(Resource, Default)]
struct PendingFetch(Option<Task<Option<RawFeed>>>);

/// Timer driving periodic refetches.
#[derive(Resource)]
pub struct RevalidateTimer(pub Timer);

impl Default for RevalidateTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(3600.0, TimerMode::Repeating))
    }
}

fn configure_revalidation(config: Res<AppConfig>, mut timer: ResMut<RevalidateTimer>) {
    timer.0 = Timer::new(config.revalidate, TimerMode::Repeating);
}

/// Spawn a fetch on the IO pool unless one is already running.
fn spawn_fetch(pending: &mut PendingFetch, source: &FeedSourceHandle) {
    if pending.0.is_some() {
        return;
    }

    let source = Arc::clone(&source.0);
    let task = IoTaskPool::get().spawn(async move {
        match source.fetch_merged() {
            Ok(feed) => feed,
            Err(err) => {
                warn!("Feed fetch failed: {}", err);
                None
            }
        }
    });
    pending.0 = Some(task);
}

fn start_fetch(mut pending: ResMut<PendingFetch>, source: Res<FeedSourceHandle>) {
    info!("Starting initial feed fetch");
    spawn_fetch(&mut pending, &source);
}

fn revalidate_feed(
    time: Res<Time>,
    mut timer: ResMut<RevalidateTimer>,
    mut pending: ResMut<PendingFetch>,
    source: Res<FeedSourceHandle>,
) {
    if timer.0.tick(time.delta()).just_finished() {
        info!("Revalidating feed (every {:?})", timer.0.duration());
        spawn_fetch(&mut pending, &source);
    }
}

fn poll_fetch(
    mut pending: ResMut<PendingFetch>,
    mut state: ResMut<FeedState>,
    config: Res<AppConfig>,
) {
    let Some(task) = pending.0.as_mut() else {
        return;
    };
    let Some(fetched) = block_on(future::poll_once(task)) else {
        return;
    };
    pending.0 = None;

    let was_ready = matches!(*state, FeedState::Ready(_));
    let got_data = fetched.is_some();
    let next = state.after_fetch(fetched, config.normalize);
    if *state != next {
        *state = next;
    }

    match &*state {
        FeedState::Ready(objects) if got_data => {
            info!("Feed ready: {} objects to display", objects.len());
        }
        FeedState::Ready(_) if was_ready => warn!("Feed refresh failed; keeping previous data"),
        _ => warn!("No feed data available"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{feed_page, object};

    #[test]
    fn test_first_fetch_without_data_is_unavailable() {
        let state = FeedState::Loading.after_fetch(None, NormalizeOptions::default());
        assert_eq!(state, FeedState::Unavailable);
        assert!(state.objects().is_empty());
    }

    #[test]
    fn test_fetch_normalizes() {
        let feed = feed_page(
            "2024-03-01",
            vec![object("A", &[(100, "5"), (300, "2")]), object("B", &[(200, "10")])],
        );
        let state = FeedState::Loading.after_fetch(Some(feed), NormalizeOptions::default());
        let ids: Vec<_> = state.objects().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_data() {
        let feed = feed_page("2024-03-01", vec![object("A", &[(100, "5")])]);
        let ready = FeedState::Loading.after_fetch(Some(feed), NormalizeOptions::default());
        let after = ready.after_fetch(None, NormalizeOptions::default());
        assert_eq!(after, ready);
    }

    #[test]
    fn test_refresh_recovers_from_unavailable() {
        let feed = feed_page("2024-03-01", vec![object("A", &[(100, "5")])]);
        let state = FeedState::Unavailable.after_fetch(Some(feed), NormalizeOptions::default());
        assert_eq!(state.objects().len(), 1);
    }
}
