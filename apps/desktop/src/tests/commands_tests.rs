use super::*;

use client_core::{AnswerChoice, FormCapabilities, SessionState};
use shared::protocol::{GuessResponse, QuestionMetadata};

fn asking(values: &[&str]) -> QuestionForm {
    let (state, effects) =
        SessionState::default().reduce(SessionEvent::StartSession(GameType::Anime));
    let (mut state, _) = state.reduce(SessionEvent::GuessResolved {
        tag: effects[0].tag(),
        result: Ok(GuessResponse {
            question: Some("hair_color".into()),
            values: Some(values.iter().map(|v| v.to_string()).collect()),
            guess: None,
        }),
    });
    state.metadata = vec![
        QuestionMetadata {
            description: "no picture".into(),
            image_url: None,
            image_id: None,
        },
        QuestionMetadata {
            description: "with picture".into(),
            image_url: Some("https://img/hair.png".into()),
            image_id: Some("hair".into()),
        },
    ];
    QuestionForm::new(&state, &FormCapabilities::full())
}

#[test]
fn parses_answers_and_commands() {
    assert_eq!(parse_command("  2 ").unwrap(), Some(PromptCommand::Answer(2)));
    assert_eq!(parse_command("D").unwrap(), Some(PromptCommand::DontKnow));
    assert_eq!(
        parse_command(":new criminal").unwrap(),
        Some(PromptCommand::NewGame(GameType::Criminal))
    );
    assert_eq!(
        parse_command(":strategy mr_gain_ratio").unwrap(),
        Some(PromptCommand::Strategy(Strategy::MrGainRatio))
    );
    assert_eq!(parse_command(":detail 3").unwrap(), Some(PromptCommand::Detail(3)));
    assert_eq!(parse_command(":retry").unwrap(), Some(PromptCommand::Retry));
    assert_eq!(parse_command(":q").unwrap(), Some(PromptCommand::Quit));
    assert_eq!(parse_command("   ").unwrap(), None);
}

#[test]
fn rejects_bad_input() {
    assert!(parse_command("0").is_err());
    assert!(parse_command("blue").is_err());
    assert!(parse_command(":new").is_err());
    assert!(parse_command(":new pokemon").is_err());
    assert!(parse_command(":strategy fastest").is_err());
    assert!(parse_command(":dance").is_err());
}

#[test]
fn answer_numbers_follow_rendered_order() {
    let form = asking(&["red", "blue"]);

    let event = session_event(&PromptCommand::Answer(1), &form).unwrap();
    assert_eq!(
        event,
        Some(SessionEvent::SubmitAnswer(AnswerChoice::Value("blue".into())))
    );
    let event = session_event(&PromptCommand::DontKnow, &form).unwrap();
    assert_eq!(event, Some(SessionEvent::SubmitAnswer(AnswerChoice::DontKnow)));
    assert!(session_event(&PromptCommand::Answer(4), &form).is_err());
}

#[test]
fn dont_know_needs_a_question() {
    let form = QuestionForm::new(&SessionState::default(), &FormCapabilities::full());
    assert!(session_event(&PromptCommand::DontKnow, &form).is_err());
}

#[test]
fn detail_requires_an_image() {
    let form = asking(&["red"]);
    assert_eq!(
        session_event(&PromptCommand::Detail(2), &form).unwrap(),
        Some(SessionEvent::OpenDetail("https://img/hair.png".into()))
    );
    assert!(session_event(&PromptCommand::Detail(1), &form).is_err());
    assert_eq!(
        session_event(&PromptCommand::Close, &form).unwrap(),
        Some(SessionEvent::KeyPressed(OverlayKey::Escape))
    );
    assert_eq!(session_event(&PromptCommand::Quit, &form).unwrap(), None);
}
