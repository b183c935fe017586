use egui::{Button, Context, RichText};

use crate::QuizApp;
use crate::ui::layout::centered_panel;

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let rows = app.subject_rows();

    let est_height = 160.0 + rows.len() as f32 * 128.0;
    centered_panel(ctx, est_height, 520.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Select Trade").strong());
            ui.label("Choose your trade to begin CBT exam practice.");
            ui.add_space(24.0);

            let btn_w = (ui.available_width() * 0.9).clamp(200.0, 420.0);
            let mut clicked: Option<String> = None;
            for row in &rows {
                let label = format!("{}\n{}", row.icon, row.name);
                if ui
                    .add_sized([btn_w, 110.0], Button::new(RichText::new(label).size(22.0)))
                    .clicked()
                {
                    clicked = Some(row.id.clone());
                }
                ui.add_space(10.0);
            }
            if let Some(id) = clicked {
                app.select_subject(&id);
            }
        });
    });
}
