use egui::{Button, Context, RichText, ScrollArea};

use crate::QuizApp;
use crate::model::AppView;
use crate::ui::layout::back_heading;

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let (subject_id, module_id) = match &app.view {
        AppView::SetSelect {
            subject_id,
            module_id,
        } => (subject_id.clone(), module_id.clone()),
        _ => return,
    };
    let rows = app.block_rows(&subject_id, &module_id);

    egui::CentralPanel::default().show(ctx, |ui| {
        let back = back_heading(ui, "Syllabus Blocks");

        let btn_w = ui.available_width().min(640.0);
        let mut clicked: Option<String> = None;
        ScrollArea::vertical().show(ui, |ui| {
            for (idx, row) in rows.iter().enumerate() {
                let status = if row.live_count > 0 {
                    format!("{} of {} sets live", row.live_count, row.set_count)
                } else {
                    format!("{} sets pending", row.set_count)
                };
                let label = format!("Block {}  ·  {}\n{}", idx + 1, row.title, status);
                if ui
                    .add_sized([btn_w, 58.0], Button::new(RichText::new(label)))
                    .clicked()
                {
                    clicked = Some(row.id.clone());
                }
                ui.add_space(6.0);
            }
        });

        if let Some(id) = clicked {
            app.select_block(&id);
        } else if back {
            app.back_from_sets();
        }
    });
}
