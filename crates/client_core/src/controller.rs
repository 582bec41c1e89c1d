use std::{collections::VecDeque, sync::Arc};

use tracing::{debug, info};

use crate::{
    protocol_client::AkinatorApi,
    session::{Effect, SessionEvent, SessionState},
    transport::ApiTransport,
};

/// Performs one [`Effect`] and turns its outcome into the tagged resolution
/// event the reducer expects.
pub async fn run_effect(api: &AkinatorApi, effect: Effect) -> SessionEvent {
    match effect {
        Effect::RequestGuess {
            tag,
            game_type,
            strategy,
            request,
        } => SessionEvent::GuessResolved {
            tag,
            result: api.request_guess(game_type, strategy, &request).await,
        },
        Effect::FetchQuestionMetadata {
            tag,
            game_type,
            question,
        } => {
            let result = api.question_metadata(game_type, &question).await;
            SessionEvent::MetadataResolved {
                tag,
                question,
                result,
            }
        }
        Effect::FetchGuessMedia {
            tag,
            guess,
            category,
        } => {
            let result = api.guess_media(&guess, category).await;
            SessionEvent::MediaResolved { tag, guess, result }
        }
    }
}

/// Drives a [`SessionState`] against the backend one request at a time.
pub struct GameController {
    api: AkinatorApi,
    state: SessionState,
    queue: VecDeque<Effect>,
}

impl GameController {
    pub fn new(transport: Arc<dyn ApiTransport>, state: SessionState) -> Self {
        Self {
            api: AkinatorApi::new(transport),
            state,
            queue: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn has_queued_effects(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Applies a user event and queues its effects without running them.
    pub fn submit(&mut self, event: SessionEvent) {
        let effects = self.state.apply(event);
        self.queue.extend(effects);
    }

    /// Runs the next queued effect and applies its resolution. Returns
    /// `false` when nothing was queued.
    pub async fn step(&mut self) -> bool {
        let Some(effect) = self.queue.pop_front() else {
            return false;
        };
        debug!(stage = effect.stage().label(), tag = ?effect.tag(), "controller: running effect");
        let resolution = run_effect(&self.api, effect).await;
        let follow_up = self.state.apply(resolution);
        self.queue.extend(follow_up);
        true
    }

    /// Applies `event` and awaits every request it triggers, including the
    /// secondary metadata/media fetch, until the session is idle again.
    pub async fn dispatch(&mut self, event: SessionEvent) -> &SessionState {
        self.submit(event);
        let mut steps = 0usize;
        while self.step().await {
            steps += 1;
        }
        if steps > 0 {
            info!(
                requests = steps,
                history_len = self.state.history.len(),
                failed = self.state.error.is_some(),
                "controller: settled"
            );
        }
        &self.state
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
