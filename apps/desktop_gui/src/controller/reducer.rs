//! Feeds events into the session reducer and turns its effects into backend
//! commands.

use std::collections::{HashMap, VecDeque};

use client_core::{SessionEvent, SessionState, TransportError};
use crossbeam_channel::Sender;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::widgets::ImageSlot;

/// Applies `event` and queues the resulting requests. A request the worker
/// cannot accept is resolved on the spot as a network failure, which keeps
/// it out of `pending` and leaves a retryable error on screen.
pub fn apply_session_event(
    state: &mut SessionState,
    event: SessionEvent,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    let mut events = VecDeque::from([event]);
    while let Some(event) = events.pop_front() {
        for effect in state.apply(event) {
            let Err(BackendCommand::Execute(effect)) =
                dispatch_backend_command(cmd_tx, BackendCommand::Execute(effect), status)
            else {
                continue;
            };
            let error = TransportError::Network {
                endpoint: effect.stage().label().to_string(),
                message: status.clone(),
            };
            events.push_back(effect.into_failure(error));
        }
    }
}

/// Every image URL the current screen can show, in display order, without
/// duplicates.
pub fn visible_image_urls(state: &SessionState) -> Vec<String> {
    let candidates = state
        .guess_image_url
        .iter()
        .chain(state.metadata.iter().filter_map(|m| m.image_url.as_ref()))
        .map(String::as_str)
        .chain(state.detail.url());

    let mut urls: Vec<String> = Vec::new();
    for url in candidates {
        if !url.is_empty() && !urls.iter().any(|known| known == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

/// Visible URLs with no texture yet and no download in flight. Failed
/// downloads are attempted again.
pub fn image_urls_to_fetch(state: &SessionState, cache: &HashMap<String, ImageSlot>) -> Vec<String> {
    visible_image_urls(state)
        .into_iter()
        .filter(|url| matches!(cache.get(url), None | Some(ImageSlot::Failed(_))))
        .collect()
}

/// Drops cached images the current screen no longer shows.
pub fn prune_image_cache(cache: &mut HashMap<String, ImageSlot>, state: &SessionState) {
    let visible = visible_image_urls(state);
    cache.retain(|url, _| visible.contains(url));
}
