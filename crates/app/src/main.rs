//! Deskmate - a chat window that opens local files from fuzzy keyword
//! triggers and hands everything else to the OpenAI completion API.

use std::sync::Arc;

use assistant::dispatch::Dispatcher;
use assistant::session::ChatSession;
use eframe::egui;
use providers::openai::OpenAIClient;
use services::keyword_index::KeywordIndex;
use services::launcher::FileLauncher;
use services::threshold::{ThresholdStore, DEFAULT_THRESHOLD};
use tracing::warn;

mod config;
mod transcript;

use transcript::{outcome_line, Speaker, TranscriptLine};

const GREETING: &str = "Hi! Ask me anything, or type a keyword to open its files.";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 700.0])
            .with_min_inner_size([480.0, 480.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "Deskmate",
        options,
        Box::new(|_cc| Box::new(DeskmateApp::new())),
    )
}

struct DeskmateApp {
    runtime: tokio::runtime::Runtime,
    dispatcher: Dispatcher,
    threshold_store: ThresholdStore,
    threshold: u8,
    allow_functions: bool,
    input_text: String,
    transcript: Vec<TranscriptLine>,
}

impl DeskmateApp {
    fn new() -> Self {
        let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");

        let paths = config::ConfigPaths::resolve();
        let api_key = match config::load_api_key(&paths.api_key) {
            Some(key) => key,
            None => {
                warn!("no API key configured; remote chat will fail until one is set");
                String::new()
            }
        };

        let client = Arc::new(OpenAIClient::new(api_key, config::model()));
        let launcher = Arc::new(FileLauncher::system());
        let index = KeywordIndex::load(&paths.keywords);
        let session = ChatSession::new(client, launcher.clone());
        let dispatcher = Dispatcher::new(index, session, launcher);

        let threshold_store = ThresholdStore::new(paths.threshold);
        let threshold = threshold_store.load(DEFAULT_THRESHOLD);

        Self {
            runtime,
            dispatcher,
            threshold_store,
            threshold,
            allow_functions: true,
            input_text: String::new(),
            transcript: vec![TranscriptLine::assistant(GREETING)],
        }
    }

    fn submit(&mut self) {
        let text = std::mem::take(&mut self.input_text);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.transcript.push(TranscriptLine::user(trimmed));

        // One blocking exchange per submission; the window waits for it.
        let outcome = self.runtime.block_on(self.dispatcher.dispatch(
            trimmed,
            self.threshold,
            self.allow_functions,
        ));
        if let Some(outcome) = outcome {
            self.transcript.push(outcome_line(outcome));
        }
    }

    fn clear_history(&mut self) {
        self.dispatcher.clear_history();
        self.transcript
            .push(TranscriptLine::notice("Conversation history cleared."));
    }
}

impl eframe::App for DeskmateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Match threshold");
                if ui
                    .add(egui::Slider::new(&mut self.threshold, 0..=100))
                    .changed()
                {
                    self.threshold_store.save(self.threshold);
                }
            });
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.allow_functions, "Allow file-open function calls");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear history").clicked() {
                        self.clear_history();
                    }
                });
            });
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("input").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let response = ui.add_sized(
                    [ui.available_width() - 80.0, 36.0],
                    egui::TextEdit::singleline(&mut self.input_text)
                        .hint_text("Type a message or keyword"),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let send = egui::Button::new("Send").fill(egui::Color32::from_rgb(70, 130, 180));
                if ui.add_sized([70.0, 36.0], send).clicked() || submitted {
                    self.submit();
                    response.request_focus();
                }
            });
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.transcript {
                        ui.add_space(6.0);
                        render_line(ui, line);
                        ui.add_space(6.0);
                    }
                });
        });
    }
}

fn render_line(ui: &mut egui::Ui, line: &TranscriptLine) {
    match line.speaker {
        Speaker::User => {
            // User message - right aligned, blue
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.add_space(8.0);
                egui::Frame::none()
                    .fill(egui::Color32::from_rgb(70, 130, 180))
                    .rounding(egui::Rounding::same(12.0))
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        ui.set_max_width(480.0);
                        ui.label(
                            egui::RichText::new(&line.text)
                                .color(egui::Color32::WHITE)
                                .size(15.0),
                        );
                    });
            });
        }
        Speaker::Assistant => {
            // Assistant message - left aligned, gray
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(50, 50, 58))
                .rounding(egui::Rounding::same(12.0))
                .inner_margin(egui::Margin::same(12.0))
                .show(ui, |ui| {
                    ui.set_max_width(560.0);
                    ui.label(
                        egui::RichText::new(&line.text)
                            .color(egui::Color32::from_rgb(220, 220, 230))
                            .size(15.0),
                    );
                });
        }
        Speaker::Notice => {
            ui.label(
                egui::RichText::new(&line.text)
                    .color(egui::Color32::from_rgb(220, 160, 80))
                    .italics()
                    .size(13.0),
            );
        }
    }
}
