use egui::{Button, CentralPanel, Color32, Context, ProgressBar, RichText, ScrollArea};

use crate::QuizApp;
use crate::model::{AppView, bilingual_parts};

/// The countdown turns accent-colored below this many seconds.
const LOW_TIME_SECS: f64 = 20.0;

fn format_time(seconds: f64) -> String {
    let total = seconds.ceil() as i64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let now = ctx.input(|i| i.time);

    // Snapshot everything the frame needs before any click is handled.
    let (index, total, remaining, question, selected, is_last) = match &app.view {
        AppView::Quiz { session, .. } => (
            session.index(),
            session.total(),
            session.remaining(now),
            session.current().clone(),
            session.selected_answer(),
            session.is_last(),
        ),
        _ => return,
    };

    let mut clicked_option: Option<usize> = None;
    let mut go_previous = false;
    let mut go_skip = false;
    let mut go_next = false;
    let mut cancel = false;

    CentralPanel::default().show(ctx, |ui| {
        let panel_width = ui.available_width().min(720.0);

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("Question Status").small().weak());
                ui.label(RichText::new(format!("{} / {}", index + 1, total)).strong());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                cancel = ui.add_sized([36.0, 36.0], Button::new("✖")).clicked();
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new("Time Remaining").small().weak());
                    let time = RichText::new(format_time(remaining)).strong();
                    let time = if remaining < LOW_TIME_SECS {
                        time.color(Color32::RED)
                    } else {
                        time
                    };
                    ui.label(time);
                });
            });
        });

        ui.add_space(6.0);
        ui.add(ProgressBar::new((index + 1) as f32 / total.max(1) as f32));
        ui.add_space(14.0);

        // Leave room for the navigation row below the scrolling body.
        let body_height = (ui.available_height() - 64.0).max(120.0);
        ScrollArea::vertical().max_height(body_height).show(ui, |ui| {
            let (primary, secondary) = bilingual_parts(&question.text);
            ui.heading(RichText::new(primary).strong());
            if let Some(secondary) = secondary {
                ui.label(RichText::new(secondary).weak());
            }
            ui.add_space(16.0);

            for (i, option) in question.options.iter().enumerate() {
                let letter = (b'A' + i as u8) as char;
                let (primary, secondary) = bilingual_parts(option);
                let text = match secondary {
                    Some(secondary) => format!("{letter}.  {primary}\n      {secondary}"),
                    None => format!("{letter}.  {primary}"),
                };
                let mut button = Button::new(RichText::new(text)).min_size([panel_width, 52.0].into());
                if selected == Some(i) {
                    button = button.fill(ui.visuals().selection.bg_fill);
                }
                if ui.add(button).clicked() {
                    clicked_option = Some(i);
                }
                ui.add_space(8.0);
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            go_previous = ui
                .add_enabled(index > 0, Button::new("Previous").min_size([120.0, 36.0].into()))
                .clicked();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let next_label = if is_last { "Finish" } else { "Next" };
                go_next = ui
                    .add_enabled(
                        selected.is_some(),
                        Button::new(next_label).min_size([140.0, 36.0].into()),
                    )
                    .clicked();
                ui.add_space(8.0);
                go_skip = ui
                    .add(Button::new("Skip").min_size([120.0, 36.0].into()))
                    .clicked();
            });
        });
    });

    if let Some(i) = clicked_option {
        app.answer_current(i);
    }
    if go_previous {
        app.previous_question();
    }
    if go_skip || go_next {
        app.advance_question();
    }
    if cancel {
        app.cancel_quiz();
    }

    // Tick the countdown even while the learner is idle.
    ctx.request_repaint_after(std::time::Duration::from_millis(250));
}
