use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseDomainError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseDomainError {
    fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Category of entity being guessed. Selects both the backend dataset and
/// the media lookup category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[default]
    Anime,
    Criminal,
}

impl GameType {
    pub const ALL: [GameType; 2] = [GameType::Anime, GameType::Criminal];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Criminal => "criminal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Anime => "Anime",
            Self::Criminal => "Criminal",
        }
    }

    /// Value of the `category` query parameter on `media/{guess}`.
    pub fn media_category(self) -> u8 {
        match self {
            Self::Anime => 1,
            Self::Criminal => 0,
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|game| game.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                ParseDomainError::new("game type", s, &Self::ALL.map(GameType::as_str))
            })
    }
}

/// Question-selection heuristic executed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    InformationGain,
    GainRatio,
    GiniImpurity,
    MrInformationGain,
    MrGainRatio,
    MrGiniImpurity,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::InformationGain,
        Strategy::GainRatio,
        Strategy::GiniImpurity,
        Strategy::MrInformationGain,
        Strategy::MrGiniImpurity,
        Strategy::MrGainRatio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InformationGain => "information_gain",
            Self::GainRatio => "gain_ratio",
            Self::GiniImpurity => "gini_impurity",
            Self::MrInformationGain => "mr_information_gain",
            Self::MrGainRatio => "mr_gain_ratio",
            Self::MrGiniImpurity => "mr_gini_impurity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InformationGain => "Information Gain",
            Self::GainRatio => "Gain Ratio",
            Self::GiniImpurity => "Gini Impurity",
            Self::MrInformationGain => "MapReduce: Information Gain",
            Self::MrGainRatio => "MapReduce: Gain Ratio",
            Self::MrGiniImpurity => "MapReduce: Gini Impurity",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseDomainError::new("strategy", s, &Self::ALL.map(Strategy::as_str)))
    }
}
