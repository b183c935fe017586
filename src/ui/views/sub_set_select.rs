use egui::{Button, Context, RichText};

use crate::QuizApp;
use crate::model::AppView;
use crate::ui::layout::{back_heading, centered_panel};

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let block_id = match &app.view {
        AppView::SubSetSelect { block_id, .. } => block_id.clone(),
        _ => return,
    };
    let block_title = app.block_title(&block_id);
    let rows = app.set_rows(&block_id);
    let now = ctx.input(|i| i.time);

    let est_height = 180.0 + rows.len() as f32 * 104.0;
    centered_panel(ctx, est_height, 560.0, |ui| {
        let back = back_heading(ui, "Practice Sets");

        ui.label(RichText::new("Selected Unit").small().weak());
        ui.label(RichText::new(&block_title).strong());
        ui.add_space(16.0);

        let btn_w = ui.available_width().min(520.0);
        let mut clicked: Option<String> = None;
        for row in &rows {
            let (icon, status) = if row.playable {
                ("📝", format!("{} questions · Start Exam", row.question_count))
            } else {
                ("🔒", "Locked until content is added".to_string())
            };
            let label = format!("{icon}  {}\n{status}", row.title);
            if ui
                .add_enabled(row.playable, Button::new(RichText::new(label)).min_size([btn_w, 92.0].into()))
                .clicked()
            {
                clicked = Some(row.id.clone());
            }
            ui.add_space(10.0);
        }

        if let Some(id) = clicked {
            app.start_quiz(&id, now);
        } else if back {
            app.back_from_sub_sets();
        }
    });
}
