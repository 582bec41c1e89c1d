//! Game window: restart and strategy controls, the question form, metadata
//! panel and the image detail overlay.

use std::collections::HashMap;

use client_core::{
    FormCapabilities, OverlayKey, QuestionForm, SessionEvent, SessionState,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{apply_session_event, image_urls_to_fetch, prune_image_cache},
};
use crate::ui::widgets::{
    answer_radios, failure_banner, image_slot, texture_from_preview, ImageSlot,
};

pub struct AkinatorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: SessionState,
    capabilities: FormCapabilities,
    images: HashMap<String, ImageSlot>,
    selected_answer: Option<String>,
    /// Question the radio selection belongs to.
    selected_for: Option<String>,
    status: String,
    startup_error: Option<UiError>,
    pending_images: Vec<(String, crate::backend_bridge::images::PreviewImage)>,
}

impl AkinatorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        state: SessionState,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state,
            capabilities: FormCapabilities::full(),
            images: HashMap::new(),
            selected_answer: None,
            selected_for: None,
            status: String::new(),
            startup_error: None,
            pending_images: Vec::new(),
        };
        let game_type = app.state.game_type;
        app.session(SessionEvent::StartSession(game_type));
        app
    }

    fn session(&mut self, event: SessionEvent) {
        let restart = matches!(event, SessionEvent::StartSession(_));
        apply_session_event(&mut self.state, event, &self.cmd_tx, &mut self.status);
        if restart {
            prune_image_cache(&mut self.images, &self.state);
        }
        self.request_missing_images();
    }

    fn request_missing_images(&mut self) {
        for url in image_urls_to_fetch(&self.state, &self.images) {
            self.images.insert(url.clone(), ImageSlot::Loading);
            let queued = dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchImage { url },
                &mut self.status,
            );
            if let Err(BackendCommand::FetchImage { url }) = queued {
                self.images.remove(&url);
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Session(event) => self.session(event),
                UiEvent::ImageLoaded { url, image } => {
                    self.pending_images.push((url, image));
                }
                UiEvent::ImageFailed { url, reason } => {
                    if let Some(slot) = self.images.get_mut(&url) {
                        *slot = ImageSlot::Failed(reason);
                    }
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "ui error: {}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                    if !err.is_transient() {
                        self.startup_error = Some(err);
                    }
                }
            }
        }
    }

    fn upload_textures(&mut self, ctx: &egui::Context) {
        for (url, image) in self.pending_images.drain(..) {
            // Pruned by a restart while the download was in flight.
            if !self.images.contains_key(&url) {
                continue;
            }
            let texture = texture_from_preview(ctx, &url, &image);
            self.images.insert(url, ImageSlot::Ready(texture));
        }
    }

    fn show_left_panel(&mut self, ctx: &egui::Context, form: &QuestionForm) {
        egui::SidePanel::left("game_controls_panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("New game");
                for button in &form.restart_buttons {
                    if ui.button(&button.label).clicked() {
                        self.session(SessionEvent::StartSession(button.game_type));
                    }
                }

                if !form.strategies.is_empty() {
                    ui.separator();
                    ui.heading("Strategy");
                    for option in &form.strategies {
                        if ui.radio(option.selected, option.label).clicked() && !option.selected {
                            self.session(SessionEvent::SetStrategy(option.strategy));
                        }
                    }
                }
            });
    }

    fn show_metadata_panel(&mut self, ctx: &egui::Context, form: &QuestionForm) {
        if form.metadata.is_empty() {
            return;
        }
        egui::SidePanel::right("question_metadata_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("About this question");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for entry in &form.metadata {
                        ui.label(&entry.description);
                        if let Some(url) = &entry.image_url {
                            let response =
                                image_slot(ui, self.images.get(url), egui::vec2(220.0, 160.0));
                            if response.clicked() {
                                self.session(SessionEvent::OpenDetail(url.clone()));
                            }
                        }
                        ui.separator();
                    }
                });
            });
    }

    fn show_main_panel(&mut self, ctx: &egui::Context, form: &QuestionForm) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.startup_error {
                ui.colored_label(ui.visuals().error_fg_color, err.message());
                ui.separator();
            }
            if let Some(failure) = &form.error {
                if failure_banner(ui, failure) {
                    self.session(SessionEvent::Retry);
                }
                ui.add_space(8.0);
            }

            if let Some(guess) = &form.guess {
                ui.heading(&guess.heading);
                if let Some(url) = &guess.image_url {
                    let response =
                        image_slot(ui, self.images.get(url), egui::vec2(320.0, 320.0));
                    if response.clicked() {
                        self.session(SessionEvent::OpenDetail(url.clone()));
                    }
                }
            }

            if let Some(heading) = &form.question_heading {
                if self.selected_for != self.state.current_question {
                    self.selected_for = self.state.current_question.clone();
                    self.selected_answer = None;
                }
                ui.heading(heading);
                answer_radios(ui, &form.options, &mut self.selected_answer);
                let chosen = self
                    .selected_answer
                    .as_ref()
                    .and_then(|id| form.options.iter().find(|option| &option.id == id));
                let enabled = form.can_submit && chosen.is_some();
                if ui.add_enabled(enabled, egui::Button::new("Submit")).clicked() {
                    if let Some(option) = chosen {
                        let event = SessionEvent::SubmitAnswer(option.choice());
                        self.selected_answer = None;
                        self.session(event);
                    }
                }
            }

            if form.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Thinking...");
                });
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.small(&self.status);
            });
        });
    }

    fn show_detail_overlay(&mut self, ctx: &egui::Context) {
        let Some(url) = self.state.detail.url().map(str::to_string) else {
            return;
        };

        let mut keep_open = true;
        egui::Window::new("Detail")
            .open(&mut keep_open)
            .resizable(true)
            .collapsible(false)
            .show(ctx, |ui| {
                let max_size = ui.available_size().max(egui::vec2(480.0, 480.0));
                image_slot(ui, self.images.get(&url), max_size);
            });

        if !keep_open {
            self.session(SessionEvent::CloseDetail);
        }
    }
}

impl eframe::App for AkinatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.upload_textures(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.session(SessionEvent::KeyPressed(OverlayKey::Escape));
        }

        let form = QuestionForm::new(&self.state, &self.capabilities);
        self.show_left_panel(ctx, &form);
        self.show_metadata_panel(ctx, &form);
        self.show_main_panel(ctx, &form);
        self.show_detail_overlay(ctx);

        let waiting = !self.state.is_idle()
            || self
                .images
                .values()
                .any(|slot| matches!(slot, ImageSlot::Loading));
        if waiting {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
