use client_core::{DetailOverlay, QuestionForm};

/// Plain-text rendering of the form shown before every prompt.
pub fn render_form(form: &QuestionForm, overlay: &DetailOverlay) -> String {
    let mut out = String::new();

    if let Some(selected) = form.strategies.iter().find(|s| s.selected) {
        out.push_str(&format!("[strategy: {}]\n", selected.label));
    }
    if form.loading {
        out.push_str("... waiting for the backend\n");
    }
    if let Some(error) = &form.error {
        let hint = if error.retry.is_some() { " (:retry)" } else { "" };
        out.push_str(&format!(
            "! {} failed: {}{hint}\n",
            error.stage.label(),
            error.message
        ));
    }

    if let Some(guess) = &form.guess {
        out.push_str(&format!("{}\n", guess.heading));
        match &guess.image_url {
            Some(url) => out.push_str(&format!("  image: {url}\n")),
            None => out.push_str(&format!("  ({})\n", guess.label)),
        }
    }

    if let Some(heading) = &form.question_heading {
        out.push_str(&format!("{heading}\n"));
        for (i, option) in form.options.iter().enumerate() {
            out.push_str(&format!("  {}) {}\n", i + 1, option.value));
        }
    }

    if !form.metadata.is_empty() {
        out.push_str("About this question:\n");
        for (i, entry) in form.metadata.iter().enumerate() {
            out.push_str(&format!("  [{}] {}", i + 1, entry.description));
            if entry.image_url.is_some() {
                out.push_str(&format!(" (image, :detail {})", i + 1));
            }
            out.push('\n');
        }
    }

    if let Some(url) = overlay.url() {
        out.push_str(&format!("Detail image: {url}  (:close)\n"));
    }

    if form.guess.is_none() && form.question_heading.is_none() && !form.loading {
        let labels: Vec<&str> = form
            .restart_buttons
            .iter()
            .map(|button| button.label.as_str())
            .collect();
        out.push_str(&format!("{} (:new <type>)\n", labels.join(" / ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use client_core::{FormCapabilities, SessionEvent, SessionState};
    use shared::{domain::GameType, protocol::GuessResponse};

    #[test]
    fn question_is_rendered_with_numbered_options() {
        let (state, effects) =
            SessionState::default().reduce(SessionEvent::StartSession(GameType::Anime));
        let (state, _) = state.reduce(SessionEvent::GuessResolved {
            tag: effects[0].tag(),
            result: Ok(GuessResponse {
                question: Some("hair_color".into()),
                values: Some(vec!["red".into(), "blue".into()]),
                guess: None,
            }),
        });
        let form = QuestionForm::new(&state, &FormCapabilities::full());

        let text = render_form(&form, &state.detail);
        assert!(text.contains("[strategy: Information Gain]\n"), "{text}");
        assert!(text.contains("Question: hair_color?\n  1) blue\n  2) red\n  3) Don't know\n"), "{text}");
    }

    #[test]
    fn idle_screen_offers_restart() {
        let state = SessionState::default();
        let form = QuestionForm::new(&state, &FormCapabilities::full());
        let text = render_form(&form, &state.detail);
        assert!(text.ends_with("Start new Anime game / Start new Criminal game (:new <type>)\n"), "{text}");
    }
}
