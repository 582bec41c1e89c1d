//! Front-end independent view model: what a question form shows for a given
//! [`SessionState`], plus the two small widgets it is made of.

use serde::{Deserialize, Serialize};
use shared::{
    domain::{GameType, Strategy},
    protocol::QuestionMetadata,
};

use crate::session::{AnswerChoice, SessionFailure, SessionState, DONT_KNOW_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    Escape,
    Other,
}

/// Dismissible detail dialog showing one image URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailOverlay {
    open: bool,
    url: Option<String>,
}

impl DetailOverlay {
    pub fn open(&mut self, url: impl Into<String>) {
        self.open = true;
        self.url = Some(url.into());
    }

    pub fn close(&mut self) {
        self.open = false;
        self.url = None;
    }

    pub fn handle_key(&mut self, key: OverlayKey) {
        if key == OverlayKey::Escape && self.open {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|_| self.open)
    }
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub id: String,
    pub value: String,
}

impl AnswerOption {
    pub fn choice(&self) -> AnswerChoice {
        AnswerChoice::from_label(&self.value)
    }

    pub fn is_dont_know(&self) -> bool {
        self.value == DONT_KNOW_LABEL
    }
}

/// Real values sorted, the "Don't know" sentinel appended last. Empty when
/// the backend offered no values.
pub fn answer_options(values: &[String]) -> Vec<AnswerOption> {
    let mut sorted: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_unstable();
    sorted.push(DONT_KNOW_LABEL);
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, value)| AnswerOption {
            id: format!("answer{index}"),
            value: value.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCapabilities {
    pub strategy_selectable: bool,
    pub restart_targets: Vec<GameType>,
    pub metadata_panel: bool,
}

impl FormCapabilities {
    pub fn full() -> Self {
        Self {
            strategy_selectable: true,
            restart_targets: GameType::ALL.to_vec(),
            metadata_panel: true,
        }
    }
}

impl Default for FormCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartButton {
    pub game_type: GameType,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOption {
    pub strategy: Strategy,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessView {
    pub heading: String,
    pub label: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionForm {
    pub restart_buttons: Vec<RestartButton>,
    pub strategies: Vec<StrategyOption>,
    pub question_heading: Option<String>,
    pub options: Vec<AnswerOption>,
    pub can_submit: bool,
    pub guess: Option<GuessView>,
    pub metadata: Vec<QuestionMetadata>,
    pub error: Option<SessionFailure>,
    pub loading: bool,
}

impl QuestionForm {
    pub fn new(state: &SessionState, capabilities: &FormCapabilities) -> Self {
        let restart_buttons = capabilities
            .restart_targets
            .iter()
            .map(|&game_type| RestartButton {
                game_type,
                label: format!("Start new {} game", game_type.label()),
            })
            .collect();

        let strategies = if capabilities.strategy_selectable {
            Strategy::ALL
                .into_iter()
                .map(|strategy| StrategyOption {
                    strategy,
                    label: strategy.label(),
                    selected: strategy == state.strategy,
                })
                .collect()
        } else {
            Vec::new()
        };

        let options = if state.current_guess.is_none() {
            answer_options(&state.answer_values)
        } else {
            Vec::new()
        };

        let guess = state.current_guess.as_ref().map(|label| GuessView {
            heading: format!("My guess for you is: {label}"),
            label: label.clone(),
            image_url: state.guess_image_url.clone(),
        });

        Self {
            restart_buttons,
            strategies,
            question_heading: state
                .current_question
                .as_ref()
                .filter(|_| state.current_guess.is_none())
                .map(|question| format!("Question: {question}?")),
            can_submit: !options.is_empty() && !state.is_awaiting_guess(),
            options,
            guess,
            metadata: if capabilities.metadata_panel {
                state.metadata.clone()
            } else {
                Vec::new()
            },
            error: state.error.clone(),
            loading: !state.is_idle(),
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
