use egui::{CentralPanel, Context, ProgressBar, RichText};

use crate::QuizApp;
use crate::app::navigation::SPLASH_SECS;
use crate::model::AppView;

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let now = ctx.input(|i| i.time);
    let frac = match &app.view {
        AppView::Splash {
            entered_at: Some(start),
        } => ((now - start) / SPLASH_SECS).clamp(0.0, 1.0) as f32,
        _ => 0.0,
    };

    CentralPanel::default().show(ctx, |ui| {
        let vs = ((ui.available_height() - 180.0) / 2.0).max(0.0);
        ui.add_space(vs);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("🤖").size(64.0));
            ui.add_space(12.0);
            ui.heading(RichText::new("ITI CBT EXAM MCQ").strong());
            ui.add_space(16.0);
            ui.add_sized([240.0, 8.0], ProgressBar::new(frac));
        });
        ui.add_space(vs);
    });

    // Keep the loading bar moving even without input events.
    ctx.request_repaint_after(std::time::Duration::from_millis(100));
}
