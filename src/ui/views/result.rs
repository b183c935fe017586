use egui::{CentralPanel, Color32, Context, RichText, ScrollArea};

use crate::QuizApp;
use crate::model::{AppView, bilingual_parts};
use crate::ui::layout::two_button_row;

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let now = ctx.input(|i| i.time);

    let outcome = match &app.view {
        AppView::Result { outcome, .. } => outcome.clone(),
        _ => return,
    };
    let percentage = if outcome.total > 0 {
        (outcome.score as f32 / outcome.total as f32 * 100.0).round() as u32
    } else {
        0
    };

    let mut retry = false;
    let mut home = false;

    CentralPanel::default().show(ctx, |ui| {
        let panel_width = ui.available_width().min(640.0);

        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Evaluation Summary").strong());
            ui.add_space(12.0);
            ui.label(RichText::new(format!("{percentage}%")).size(44.0).strong());
            ui.label(RichText::new("Accuracy").small().weak());
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.add_space((ui.available_width() - 260.0).max(0.0) / 2.0);
                ui.label(
                    RichText::new(format!("Correct: {}", outcome.score))
                        .color(Color32::from_rgb(0x4c, 0xaf, 0x50)),
                );
                ui.add_space(24.0);
                ui.label(
                    RichText::new(format!("Incorrect: {}", outcome.total - outcome.score))
                        .color(Color32::from_rgb(0xe5, 0x39, 0x35)),
                );
            });
            ui.add_space(14.0);
            let (left, right) = two_button_row(ui, panel_width.min(420.0), "Re-Attempt", "Main Menu");
            retry = left;
            home = right;
        });

        ui.add_space(18.0);
        ui.heading("Question Audit");
        ui.add_space(6.0);

        ScrollArea::vertical().show(ui, |ui| {
            for (i, question) in outcome.set.questions.iter().enumerate() {
                let user_choice = outcome.answers.get(&question.id).copied();
                let correct = user_choice == Some(question.correct_answer_index);

                let (primary, _) = bilingual_parts(&question.text);
                let verdict = if correct {
                    RichText::new("✔").color(Color32::from_rgb(0x4c, 0xaf, 0x50))
                } else {
                    RichText::new("✘").color(Color32::from_rgb(0xe5, 0x39, 0x35))
                };
                ui.horizontal(|ui| {
                    ui.label(verdict);
                    ui.label(RichText::new(format!("{}. {}", i + 1, primary)).strong());
                });

                for (j, option) in question.options.iter().enumerate() {
                    let (opt_primary, _) = bilingual_parts(option);
                    let marker = if j == question.correct_answer_index {
                        "✔"
                    } else if user_choice == Some(j) {
                        "✘"
                    } else {
                        "  "
                    };
                    let mut line = RichText::new(format!("    {marker} {opt_primary}"));
                    if j == question.correct_answer_index {
                        line = line.color(Color32::from_rgb(0x4c, 0xaf, 0x50));
                    } else if user_choice == Some(j) {
                        line = line.color(Color32::from_rgb(0xe5, 0x39, 0x35));
                    } else {
                        line = line.weak();
                    }
                    ui.label(line);
                }
                if user_choice.is_none() {
                    ui.label(RichText::new("    Skipped").italics().weak());
                }
                ui.add_space(10.0);
            }
        });
    });

    if retry {
        app.retry_quiz(now);
    }
    if home {
        app.go_home();
    }
}
