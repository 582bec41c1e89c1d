use super::*;

use serde_json::json;
use shared::{
    domain::{GameType, Strategy},
    protocol::Question,
};

use crate::{
    error::TransportError,
    session::{AnswerChoice, RequestStage},
    tests::ScriptedTransport,
};

const OPENING: &str = "guess/anime?strategy=information_gain";

fn controller_with(transport: Arc<ScriptedTransport>) -> GameController {
    GameController::new(transport, SessionState::default())
}

#[tokio::test]
async fn opening_question_triggers_exactly_one_metadata_fetch() {
    let transport = ScriptedTransport::new();
    transport.respond(
        OPENING,
        json!({"question": "hair_color", "values": ["red", "blue"]}),
    );
    transport.respond(
        "question/anime/hair_color",
        json!({"metadata": [{"description": "Colour of the hair"}]}),
    );
    let mut controller = controller_with(transport.clone());

    let state = controller
        .dispatch(SessionEvent::StartSession(GameType::Anime))
        .await;

    assert_eq!(state.current_question.as_deref(), Some("hair_color"));
    assert_eq!(state.metadata.len(), 1);
    assert!(state.is_idle());

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].body, Some(json!({"questions": []})));
    assert_eq!(calls[1].method, "GET");
    assert_eq!(calls[1].endpoint, "question/anime/hair_color");
}

#[tokio::test]
async fn answer_then_guess_fetches_media_with_category() {
    let transport = ScriptedTransport::new();
    transport.respond(OPENING, json!({"question": "hair_color", "values": ["red", "blue"]}));
    transport.respond("question/anime/hair_color", json!({}));
    transport.respond(OPENING, json!({"guess": "CharacterX"}));
    transport.respond("media/CharacterX?category=1", json!({"files": []}));
    let mut controller = controller_with(transport.clone());

    controller
        .dispatch(SessionEvent::StartSession(GameType::Anime))
        .await;
    let state = controller
        .dispatch(SessionEvent::SubmitAnswer(AnswerChoice::Value("blue".into())))
        .await;

    assert_eq!(state.history, vec![Question::answered("hair_color", "blue")]);
    assert_eq!(state.current_guess.as_deref(), Some("CharacterX"));
    assert_eq!(state.guess_image_url, None);
    assert!(state.error.is_none());

    let calls = transport.calls();
    assert_eq!(calls[2].body, Some(json!({"questions": [{"name": "hair_color", "answer": "blue"}]})));
    assert_eq!(calls[3].endpoint, "media/CharacterX?category=1");
    assert_eq!(calls.len(), 4);
}

#[tokio::test]
async fn step_exposes_intermediate_state_between_guess_and_media() {
    let transport = ScriptedTransport::new();
    transport.respond(OPENING, json!({"guess": "CharacterX"}));
    transport.respond(
        "media/CharacterX?category=1",
        json!({"files": [{"thumbnailLink": "https://img/x"}]}),
    );
    let mut controller = controller_with(transport);

    controller.submit(SessionEvent::StartSession(GameType::Anime));
    assert!(controller.step().await);
    assert_eq!(controller.state().current_guess.as_deref(), Some("CharacterX"));
    assert_eq!(controller.state().guess_image_url, None);
    assert!(controller.has_queued_effects());

    assert!(controller.step().await);
    assert_eq!(
        controller.state().guess_image_url.as_deref(),
        Some("https://img/x")
    );
    assert!(!controller.step().await);
}

#[tokio::test]
async fn failed_guess_is_visible_and_retry_recovers() {
    let transport = ScriptedTransport::new();
    transport.fail(
        OPENING,
        TransportError::Network {
            endpoint: OPENING.into(),
            message: "connection refused".into(),
        },
    );
    transport.respond(OPENING, json!({"question": "age", "values": ["young", "old"]}));
    transport.respond("question/anime/age", json!({"metadata": null}));
    let mut controller = controller_with(transport.clone());

    let state = controller
        .dispatch(SessionEvent::StartSession(GameType::Anime))
        .await;
    let failure = state.error.clone().expect("visible error");
    assert_eq!(failure.stage, RequestStage::Guess);
    assert_eq!(state.current_question, None);

    let state = controller.dispatch(SessionEvent::Retry).await;
    assert!(state.error.is_none());
    assert_eq!(state.current_question.as_deref(), Some("age"));
    assert!(state.metadata.is_empty());
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn malformed_payload_is_reported_as_decode_failure() {
    let transport = ScriptedTransport::new();
    transport.respond(OPENING, json!({"question": 42}));
    let mut controller = controller_with(transport);

    let state = controller
        .dispatch(SessionEvent::StartSession(GameType::Anime))
        .await;
    let failure = state.error.clone().expect("visible error");
    assert!(failure.message.contains("malformed response"), "{failure:?}");
    assert!(!failure.retryable);
}

#[tokio::test]
async fn strategy_change_is_used_on_next_request() {
    let transport = ScriptedTransport::new();
    transport.respond(
        "guess/criminal?strategy=mr_gain_ratio",
        json!({"guess": "Suspect 7"}),
    );
    transport.respond("media/Suspect 7?category=0", json!({}));
    let mut controller = controller_with(transport.clone());

    controller
        .dispatch(SessionEvent::SetStrategy(Strategy::MrGainRatio))
        .await;
    let state = controller
        .dispatch(SessionEvent::StartSession(GameType::Criminal))
        .await;

    assert_eq!(state.current_guess.as_deref(), Some("Suspect 7"));
    let endpoints: Vec<String> = transport.calls().into_iter().map(|c| c.endpoint).collect();
    assert_eq!(
        endpoints,
        vec![
            "guess/criminal?strategy=mr_gain_ratio".to_string(),
            "media/Suspect 7?category=0".to_string(),
        ]
    );
}

#[tokio::test]
async fn run_effect_tags_resolution_with_effect_tag() {
    let transport = ScriptedTransport::new();
    transport.respond("question/anime/age", json!({}));
    let api = AkinatorApi::new(transport);
    let tag = crate::session::RequestTag {
        session: 4,
        turn: 2,
    };

    let event = run_effect(
        &api,
        Effect::FetchQuestionMetadata {
            tag,
            game_type: GameType::Anime,
            question: "age".into(),
        },
    )
    .await;

    match event {
        SessionEvent::MetadataResolved {
            tag: resolved,
            question,
            result,
        } => {
            assert_eq!(resolved, tag);
            assert_eq!(question, "age");
            assert_eq!(result.expect("ok").metadata, None);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
