use egui::{Button, Context, RichText};

use crate::QuizApp;
use crate::model::AppView;
use crate::ui::layout::{back_heading, centered_panel};

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let subject_id = match &app.view {
        AppView::ModuleSelect { subject_id } => subject_id.clone(),
        _ => return,
    };
    let subject_name = app.subject_name(&subject_id);
    let rows = app.module_rows(&subject_id);

    let est_height = 120.0 + rows.len() as f32 * 74.0;
    centered_panel(ctx, est_height, 560.0, |ui| {
        let back = back_heading(ui, &format!("{subject_name} / Modules"));

        let btn_w = ui.available_width().min(520.0);
        let mut clicked: Option<String> = None;
        for row in &rows {
            let label = format!("{}\nTotal Units: {}", row.name, row.block_count);
            if ui
                .add_sized([btn_w, 64.0], Button::new(RichText::new(label)))
                .clicked()
            {
                clicked = Some(row.id.clone());
            }
            ui.add_space(8.0);
        }

        if let Some(id) = clicked {
            app.select_module(&id);
        } else if back {
            app.back_from_modules();
        }
    });
}
