use client_core::{OverlayKey, QuestionForm, SessionEvent};
use shared::domain::{GameType, Strategy};
use thiserror::Error;

/// Rejected prompt input, shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CommandError(pub String);

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    /// 1-based index into the rendered answer options.
    Answer(usize),
    DontKnow,
    NewGame(GameType),
    Strategy(Strategy),
    Retry,
    Detail(usize),
    Close,
    Quit,
    Help,
}

pub fn parse_command(line: &str) -> Result<Option<PromptCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("d") {
        return Ok(Some(PromptCommand::DontKnow));
    }
    if let Ok(index) = line.parse::<usize>() {
        return positive(index, "answer").map(|i| Some(PromptCommand::Answer(i)));
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Err(CommandError(format!(
            "unrecognised input '{line}', type :help for commands"
        )));
    };
    let mut parts = rest.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next();

    let command = match (verb, arg) {
        ("new", Some(raw)) => PromptCommand::NewGame(
            raw.parse::<GameType>()
                .map_err(|err| CommandError(err.to_string()))?,
        ),
        ("strategy", Some(raw)) => PromptCommand::Strategy(
            raw.parse::<Strategy>()
                .map_err(|err| CommandError(err.to_string()))?,
        ),
        ("detail", Some(raw)) => {
            let index = raw
                .parse::<usize>()
                .map_err(|_| CommandError(format!("'{raw}' is not a metadata index")))?;
            PromptCommand::Detail(positive(index, "detail")?)
        }
        ("retry", None) => PromptCommand::Retry,
        ("close", None) => PromptCommand::Close,
        ("quit" | "q", None) => PromptCommand::Quit,
        ("help" | "h", None) => PromptCommand::Help,
        ("new" | "strategy" | "detail", None) => {
            return Err(CommandError(format!(":{verb} needs an argument")))
        }
        _ => return Err(CommandError(format!("unknown command ':{rest}'"))),
    };
    Ok(Some(command))
}

fn positive(index: usize, what: &str) -> Result<usize, CommandError> {
    if index == 0 {
        return Err(CommandError(format!("{what} numbers start at 1")));
    }
    Ok(index)
}

/// Maps a parsed command onto the session event it stands for, resolving
/// option and metadata numbers against the form currently on screen.
/// `Quit` and `Help` have no session counterpart.
pub fn session_event(
    command: &PromptCommand,
    form: &QuestionForm,
) -> Result<Option<SessionEvent>, CommandError> {
    let event = match command {
        PromptCommand::Answer(n) => {
            let option = form.options.get(n - 1).ok_or_else(|| {
                CommandError(format!("there is no answer option {n}"))
            })?;
            SessionEvent::SubmitAnswer(option.choice())
        }
        PromptCommand::DontKnow => {
            let option = form
                .options
                .iter()
                .find(|option| option.is_dont_know())
                .ok_or_else(|| CommandError("no question is waiting for an answer".into()))?;
            SessionEvent::SubmitAnswer(option.choice())
        }
        PromptCommand::NewGame(game_type) => SessionEvent::StartSession(*game_type),
        PromptCommand::Strategy(strategy) => SessionEvent::SetStrategy(*strategy),
        PromptCommand::Retry => SessionEvent::Retry,
        PromptCommand::Detail(n) => {
            let url = form
                .metadata
                .get(n - 1)
                .and_then(|entry| entry.image_url.clone())
                .ok_or_else(|| CommandError(format!("metadata entry {n} has no image")))?;
            SessionEvent::OpenDetail(url)
        }
        PromptCommand::Close => SessionEvent::KeyPressed(OverlayKey::Escape),
        PromptCommand::Quit | PromptCommand::Help => return Ok(None),
    };
    Ok(Some(event))
}

pub const HELP: &str = "\
  <n>               answer with option n
  d                 answer \"Don't know\"
  :new anime|criminal
  :strategy <id>    information_gain, gain_ratio, mr_gini_impurity, ...
  :retry            repeat the failed request
  :detail <n>       open metadata image n
  :close            close the image overlay
  :quit";

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
