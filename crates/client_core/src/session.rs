//! Game session state machine.
//!
//! [`SessionState::reduce`] is a pure transition: it takes the current state
//! and one [`SessionEvent`] and returns the next state together with the
//! [`Effect`]s (network requests) the driver has to perform. Every effect is
//! tagged with the session/turn it belongs to; resolutions carrying any other
//! tag are discarded, so a late reply from an abandoned game can never
//! overwrite a newer one.

use serde::{Deserialize, Serialize};
use shared::{
    domain::{GameType, Strategy},
    protocol::{
        GuessOutcome, GuessRequest, GuessResponse, MediaResponse, Question, QuestionMetadata,
        QuestionMetadataResponse,
    },
};
use tracing::{debug, info, warn};

use crate::{
    error::TransportError,
    view::{DetailOverlay, OverlayKey},
};

/// Label of the UI-only option meaning "omit this answer".
pub const DONT_KNOW_LABEL: &str = "Don't know";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RequestTag {
    pub session: u64,
    pub turn: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerChoice {
    Value(String),
    DontKnow,
}

impl AnswerChoice {
    /// Maps a selected option label to a choice; the sentinel label becomes
    /// [`AnswerChoice::DontKnow`].
    pub fn from_label(label: &str) -> Self {
        if label == DONT_KNOW_LABEL {
            Self::DontKnow
        } else {
            Self::Value(label.to_string())
        }
    }

    pub fn into_answer(self) -> Option<String> {
        match self {
            Self::Value(value) => Some(value),
            Self::DontKnow => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStage {
    Guess,
    Metadata,
    Media,
}

impl RequestStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Guess => "guess",
            Self::Metadata => "question details",
            Self::Media => "guess image",
        }
    }
}

/// A network request the reducer wants performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    RequestGuess {
        tag: RequestTag,
        game_type: GameType,
        strategy: Strategy,
        request: GuessRequest,
    },
    FetchQuestionMetadata {
        tag: RequestTag,
        game_type: GameType,
        question: String,
    },
    FetchGuessMedia {
        tag: RequestTag,
        guess: String,
        category: u8,
    },
}

impl Effect {
    pub fn tag(&self) -> RequestTag {
        match self {
            Self::RequestGuess { tag, .. }
            | Self::FetchQuestionMetadata { tag, .. }
            | Self::FetchGuessMedia { tag, .. } => *tag,
        }
    }

    pub fn stage(&self) -> RequestStage {
        match self {
            Self::RequestGuess { .. } => RequestStage::Guess,
            Self::FetchQuestionMetadata { .. } => RequestStage::Metadata,
            Self::FetchGuessMedia { .. } => RequestStage::Media,
        }
    }

    /// The resolution to apply when this request could not be performed at
    /// all, such as when the driver failed to hand it to a worker.
    pub fn into_failure(self, error: TransportError) -> SessionEvent {
        match self {
            Self::RequestGuess { tag, .. } => SessionEvent::GuessResolved {
                tag,
                result: Err(error),
            },
            Self::FetchQuestionMetadata { tag, question, .. } => SessionEvent::MetadataResolved {
                tag,
                question,
                result: Err(error),
            },
            Self::FetchGuessMedia { tag, guess, .. } => SessionEvent::MediaResolved {
                tag,
                guess,
                result: Err(error),
            },
        }
    }
}

/// Visible failure of the most recent request, with the effect to re-issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFailure {
    pub stage: RequestStage,
    pub message: String,
    pub retryable: bool,
    pub retry: Option<Effect>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StartSession(GameType),
    SetStrategy(Strategy),
    SubmitAnswer(AnswerChoice),
    Retry,
    OpenDetail(String),
    CloseDetail,
    KeyPressed(OverlayKey),
    GuessResolved {
        tag: RequestTag,
        result: Result<GuessResponse, TransportError>,
    },
    MetadataResolved {
        tag: RequestTag,
        question: String,
        result: Result<QuestionMetadataResponse, TransportError>,
    },
    MediaResolved {
        tag: RequestTag,
        guess: String,
        result: Result<MediaResponse, TransportError>,
    },
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::StartSession(_) => "start_session",
            Self::SetStrategy(_) => "set_strategy",
            Self::SubmitAnswer(_) => "submit_answer",
            Self::Retry => "retry",
            Self::OpenDetail(_) => "open_detail",
            Self::CloseDetail => "close_detail",
            Self::KeyPressed(_) => "key_pressed",
            Self::GuessResolved { .. } => "guess_resolved",
            Self::MetadataResolved { .. } => "metadata_resolved",
            Self::MediaResolved { .. } => "media_resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub history: Vec<Question>,
    pub strategy: Strategy,
    pub game_type: GameType,
    pub current_question: Option<String>,
    /// Candidate answers exactly as returned by the backend.
    pub answer_values: Vec<String>,
    pub current_guess: Option<String>,
    pub guess_image_url: Option<String>,
    pub metadata: Vec<QuestionMetadata>,
    pub detail: DetailOverlay,
    pub max_depth: Option<u32>,
    pub error: Option<SessionFailure>,
    session: u64,
    turn: u64,
    pending: Vec<Effect>,
}

impl SessionState {
    pub fn new(game_type: GameType, strategy: Strategy, max_depth: Option<u32>) -> Self {
        Self {
            game_type,
            strategy,
            max_depth,
            ..Self::default()
        }
    }

    pub fn current_tag(&self) -> RequestTag {
        RequestTag {
            session: self.session,
            turn: self.turn,
        }
    }

    pub fn pending(&self) -> &[Effect] {
        &self.pending
    }

    pub fn is_awaiting_guess(&self) -> bool {
        self.pending
            .iter()
            .any(|effect| effect.stage() == RequestStage::Guess)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pure transition: consumes the state and returns the next one plus the
    /// requests to issue.
    pub fn reduce(mut self, event: SessionEvent) -> (Self, Vec<Effect>) {
        let effects = self.apply(event);
        (self, effects)
    }

    /// In-place form of [`SessionState::reduce`].
    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        debug!(event = event.name(), tag = ?self.current_tag(), "session: apply");
        match event {
            SessionEvent::StartSession(game_type) => self.start_session(game_type),
            SessionEvent::SetStrategy(strategy) => {
                self.strategy = strategy;
                Vec::new()
            }
            SessionEvent::SubmitAnswer(choice) => self.submit_answer(choice),
            SessionEvent::Retry => self.retry(),
            SessionEvent::OpenDetail(url) => {
                self.detail.open(url);
                Vec::new()
            }
            SessionEvent::CloseDetail => {
                self.detail.close();
                Vec::new()
            }
            SessionEvent::KeyPressed(key) => {
                self.detail.handle_key(key);
                Vec::new()
            }
            SessionEvent::GuessResolved { tag, result } => self.guess_resolved(tag, result),
            SessionEvent::MetadataResolved {
                tag,
                question,
                result,
            } => self.metadata_resolved(tag, question, result),
            SessionEvent::MediaResolved { tag, guess, result } => {
                self.media_resolved(tag, guess, result)
            }
        }
    }

    fn start_session(&mut self, game_type: GameType) -> Vec<Effect> {
        self.session += 1;
        self.turn = 0;
        self.game_type = game_type;
        self.history.clear();
        self.pending.clear();
        self.error = None;
        self.detail.close();
        self.clear_display();
        info!(
            session = self.session,
            game_type = %game_type,
            strategy = %self.strategy,
            "session: new game"
        );
        vec![self.issue_guess()]
    }

    fn submit_answer(&mut self, choice: AnswerChoice) -> Vec<Effect> {
        if self.is_awaiting_guess() {
            warn!("session: answer ignored while a guess request is in flight");
            return Vec::new();
        }
        let Some(question) = self.current_question.clone() else {
            warn!("session: answer ignored, no question is being asked");
            return Vec::new();
        };

        self.history.push(Question {
            name: question,
            answer: choice.into_answer(),
        });
        self.error = None;
        debug!(history_len = self.history.len(), "session: answer recorded");
        vec![self.issue_guess()]
    }

    fn retry(&mut self) -> Vec<Effect> {
        let Some(failure) = self.error.take() else {
            debug!("session: nothing to retry");
            return Vec::new();
        };
        match failure.retry {
            Some(effect) if effect.tag() == self.current_tag() => {
                info!(stage = failure.stage.label(), "session: retrying request");
                self.pending.push(effect.clone());
                vec![effect]
            }
            _ => Vec::new(),
        }
    }

    fn issue_guess(&mut self) -> Effect {
        self.turn += 1;
        let tag = self.current_tag();
        // Secondary fetches of the previous turn can no longer apply.
        self.pending.retain(|effect| effect.tag() == tag);
        let effect = Effect::RequestGuess {
            tag,
            game_type: self.game_type,
            strategy: self.strategy,
            request: GuessRequest {
                questions: self.history.clone(),
                max_depth: self.max_depth,
            },
        };
        self.pending.push(effect.clone());
        effect
    }

    fn issue(&mut self, effect: Effect) -> Vec<Effect> {
        self.pending.push(effect.clone());
        vec![effect]
    }

    fn take_pending(&mut self, tag: RequestTag, stage: RequestStage) -> Option<Effect> {
        let index = self
            .pending
            .iter()
            .position(|effect| effect.tag() == tag && effect.stage() == stage)?;
        Some(self.pending.remove(index))
    }

    fn is_stale(&self, tag: RequestTag, stage: RequestStage) -> bool {
        if tag == self.current_tag() {
            return false;
        }
        debug!(
            stage = stage.label(),
            response_tag = ?tag,
            current_tag = ?self.current_tag(),
            "session: dropping stale response"
        );
        true
    }

    fn fail(&mut self, stage: RequestStage, err: TransportError, retry: Option<Effect>) {
        warn!(stage = stage.label(), "session: request failed: {err}");
        self.error = Some(SessionFailure {
            stage,
            message: err.to_string(),
            retryable: err.is_retryable(),
            retry,
        });
    }

    fn clear_display(&mut self) {
        self.current_question = None;
        self.answer_values.clear();
        self.current_guess = None;
        self.guess_image_url = None;
        self.metadata.clear();
    }

    fn guess_resolved(
        &mut self,
        tag: RequestTag,
        result: Result<GuessResponse, TransportError>,
    ) -> Vec<Effect> {
        if self.is_stale(tag, RequestStage::Guess) {
            return Vec::new();
        }
        let issued = self.take_pending(tag, RequestStage::Guess);
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.fail(RequestStage::Guess, err, issued);
                return Vec::new();
            }
        };

        self.error = None;
        match response.outcome() {
            GuessOutcome::NextQuestion { name, values } => {
                self.clear_display();
                self.current_question = Some(name.clone());
                self.answer_values = values;
                self.issue(Effect::FetchQuestionMetadata {
                    tag,
                    game_type: self.game_type,
                    question: name,
                })
            }
            GuessOutcome::Guess(guess) => {
                self.clear_display();
                self.current_guess = Some(guess.clone());
                info!(guess = %guess, turns = self.history.len(), "session: backend guessed");
                self.issue(Effect::FetchGuessMedia {
                    tag,
                    guess,
                    category: self.game_type.media_category(),
                })
            }
            GuessOutcome::Empty => {
                self.clear_display();
                warn!("session: backend returned neither a question nor a guess");
                Vec::new()
            }
        }
    }

    fn metadata_resolved(
        &mut self,
        tag: RequestTag,
        question: String,
        result: Result<QuestionMetadataResponse, TransportError>,
    ) -> Vec<Effect> {
        if self.is_stale(tag, RequestStage::Metadata) {
            return Vec::new();
        }
        let issued = self.take_pending(tag, RequestStage::Metadata);
        if self.current_question.as_deref() != Some(question.as_str()) {
            debug!(question = %question, "session: metadata for a question no longer shown");
            return Vec::new();
        }
        match result {
            Ok(response) => self.metadata = response.metadata.unwrap_or_default(),
            Err(err) => self.fail(RequestStage::Metadata, err, issued),
        }
        Vec::new()
    }

    fn media_resolved(
        &mut self,
        tag: RequestTag,
        guess: String,
        result: Result<MediaResponse, TransportError>,
    ) -> Vec<Effect> {
        if self.is_stale(tag, RequestStage::Media) {
            return Vec::new();
        }
        let issued = self.take_pending(tag, RequestStage::Media);
        if self.current_guess.as_deref() != Some(guess.as_str()) {
            debug!(guess = %guess, "session: media for a guess no longer shown");
            return Vec::new();
        }
        match result {
            Ok(response) => {
                self.guess_image_url = response.first_thumbnail().map(str::to_string);
                if self.guess_image_url.is_none() {
                    debug!(guess = %guess, "session: no image files for guess");
                }
            }
            Err(err) => self.fail(RequestStage::Media, err, issued),
        }
        Vec::new()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
