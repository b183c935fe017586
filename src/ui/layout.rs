use egui::{Align, Button, CentralPanel, Context, Frame, RichText, Ui, Visuals};

use crate::QuizApp;
use crate::model::AppView;

/// Top chrome: app title, home/admin shortcuts, theme toggles and any
/// persistence warning. Hidden on the splash screen.
pub fn top_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("🤖 ITI CBT Exam MCQ").strong());
            ui.separator();
            if ui.button("🏠 Home").clicked() {
                app.go_home();
            }
            if !matches!(app.view, AppView::Admin) && ui.button("🔧 Admin").clicked() {
                app.open_admin();
            }

            ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                if ui.button("🌙").clicked() {
                    ctx.set_visuals(Visuals::dark());
                }
                if ui.button("☀").clicked() {
                    ctx.set_visuals(Visuals::light());
                }
                if let Some(notice) = app.notice.clone() {
                    if ui.button("✖").on_hover_text("Dismiss").clicked() {
                        app.notice = None;
                    }
                    ui.label(RichText::new(notice).color(egui::Color32::YELLOW));
                }
            });
        });
    });
}

/// Panel centered vertically, with a maximum content width and an inner
/// content block.
pub fn centered_panel(ctx: &Context, est_height: f32, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra / 2.0);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_width(w);
                    inner(ui);
                });
        });
        ui.add_space(extra / 2.0);
    });
}

/// Two same-sized buttons in one row; returns (left clicked, right clicked).
pub fn two_button_row(
    ui: &mut Ui,
    panel_width: f32,
    left_label: &str,
    right_label: &str,
) -> (bool, bool) {
    let btn_w = (panel_width - 8.0) / 2.0;
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        ui.add_space((ui.available_width() - panel_width).max(0.0) / 2.0);
        clicked_left = ui.add_sized([btn_w, 36.0], Button::new(left_label)).clicked();
        clicked_right = ui.add_sized([btn_w, 36.0], Button::new(right_label)).clicked();
    });
    (clicked_left, clicked_right)
}

/// Small back arrow + heading row used on every drill-down screen.
/// Returns true when the back button was clicked.
pub fn back_heading(ui: &mut Ui, heading: &str) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        clicked = ui.add_sized([36.0, 36.0], Button::new("⬅")).clicked();
        ui.add_space(8.0);
        ui.heading(heading);
    });
    ui.add_space(12.0);
    clicked
}
