use egui::{Button, CentralPanel, Color32, Context, RichText, ScrollArea, TextEdit};

use crate::QuizApp;
use crate::app::{AdminTab, PendingDelete, SourceMode};

const TRADE_ICONS: [(&str, &str); 5] = [
    ("🤖", "Robotics"),
    ("⚡", "Electrical"),
    ("⚙", "Mechanical"),
    ("🛠", "Workshop"),
    ("💻", "IT / Computer"),
];

pub fn show(app: &mut QuizApp, ctx: &Context) {
    let mut exit_admin = false;

    CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            exit_admin = ui.button("⬅ Exit Admin").clicked();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new("Infrastructure Management").small().weak());
            });
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.selectable_value(&mut app.admin.tab, AdminTab::Synthesize, "Synthesize Content");
            ui.selectable_value(&mut app.admin.tab, AdminTab::Infrastructure, "Infrastructure");
        });
        ui.separator();
        ui.add_space(8.0);

        match app.admin.tab {
            AdminTab::Synthesize => synthesize_tab(app, ui),
            AdminTab::Infrastructure => infrastructure_tab(app, ui),
        }

        if let Some(error) = app.admin.error.clone() {
            ui.add_space(10.0);
            ui.label(RichText::new(error).color(Color32::from_rgb(0xe5, 0x39, 0x35)));
        }
        if let Some(success) = app.admin.success.clone() {
            ui.add_space(10.0);
            ui.label(RichText::new(success).color(Color32::from_rgb(0x4c, 0xaf, 0x50)));
        }
    });

    confirm_delete_window(app, ctx);

    if exit_admin {
        app.close_admin();
    }

    // A pending synthesis finishes without any input event; keep polling.
    if app.synthesis_pending() {
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}

fn synthesize_tab(app: &mut QuizApp, ui: &mut egui::Ui) {
    let subjects = app.subject_rows();
    let pending = app.synthesis_pending();

    ui.heading("Quiz Synthesizer");
    ui.label(RichText::new("Deploy new MCQ sets via AI analysis.").weak());
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.label("Subject Branch");
        let selected_name = subjects
            .iter()
            .find(|s| s.id == app.admin.selected_subject_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "-- Select Subject --".to_string());
        let before = app.admin.selected_subject_id.clone();
        egui::ComboBox::from_id_salt("synth_subject")
            .width(220.0)
            .selected_text(selected_name)
            .show_ui(ui, |ui| {
                for subject in &subjects {
                    ui.selectable_value(
                        &mut app.admin.selected_subject_id,
                        subject.id.clone(),
                        &subject.name,
                    );
                }
            });
        if app.admin.selected_subject_id != before {
            // Units belong to one subject; a stale pick must not survive.
            app.admin.selected_block_id.clear();
        }
    });

    let block_choices = app.admin_block_choices();
    ui.horizontal(|ui| {
        ui.label("Operational Unit");
        let selected_block = block_choices
            .iter()
            .find(|(id, _)| *id == app.admin.selected_block_id)
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| "-- Select Unit --".to_string());
        egui::ComboBox::from_id_salt("synth_block")
            .width(320.0)
            .selected_text(selected_block)
            .show_ui(ui, |ui| {
                for (id, label) in &block_choices {
                    ui.selectable_value(&mut app.admin.selected_block_id, id.clone(), label);
                }
            });
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label("Set Identification");
        ui.add(
            TextEdit::singleline(&mut app.admin.new_set_title)
                .desired_width(340.0)
                .hint_text("e.g. Unit 1 Advanced Robotics Practice"),
        );
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.selectable_value(&mut app.admin.source_mode, SourceMode::Text, "Raw Text");
        #[cfg(not(target_arch = "wasm32"))]
        ui.selectable_value(&mut app.admin.source_mode, SourceMode::Pdf, "PDF Data");
    });
    ui.add_space(6.0);

    let mut submit_text = false;
    #[cfg(not(target_arch = "wasm32"))]
    let mut submit_pdf = false;

    match app.admin.source_mode {
        SourceMode::Text => {
            ui.add(
                TextEdit::multiline(&mut app.admin.raw_text)
                    .desired_rows(8)
                    .desired_width(f32::INFINITY)
                    .hint_text("Paste the source material here for AI synthesis..."),
            );
            ui.add_space(8.0);
            let label = if pending {
                "Synthesizing..."
            } else {
                "Begin Generation"
            };
            submit_text = ui
                .add_enabled(!pending, Button::new(label).min_size([220.0, 40.0].into()))
                .clicked();
        }
        SourceMode::Pdf => {
            #[cfg(not(target_arch = "wasm32"))]
            {
                ui.horizontal(|ui| {
                    ui.label("Source PDF path");
                    ui.add(
                        TextEdit::singleline(&mut app.admin.pdf_path)
                            .desired_width(340.0)
                            .hint_text("/path/to/syllabus.pdf"),
                    );
                });
                ui.add_space(8.0);
                let label = if pending {
                    "Synthesizing..."
                } else {
                    "Extract & Generate"
                };
                submit_pdf = ui
                    .add_enabled(!pending, Button::new(label).min_size([220.0, 40.0].into()))
                    .clicked();
            }
            #[cfg(target_arch = "wasm32")]
            {
                ui.label(RichText::new("PDF upload is available in the desktop build.").weak());
            }
        }
    }

    if pending {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Extracting and synthesizing questions...");
        });
    }

    if submit_text {
        app.submit_synthesis();
    }
    #[cfg(not(target_arch = "wasm32"))]
    if submit_pdf {
        app.submit_pdf_synthesis();
    }
}

fn infrastructure_tab(app: &mut QuizApp, ui: &mut egui::Ui) {
    let subjects = app.subject_rows();

    ui.columns(2, |columns| {
        let ui = &mut columns[0];
        ui.heading("Register Trade");
        ui.add(
            TextEdit::singleline(&mut app.admin.new_trade_name)
                .hint_text("Trade Name (e.g. Fitter)"),
        );
        egui::ComboBox::from_id_salt("trade_icon")
            .selected_text(app.admin.new_trade_icon.clone())
            .show_ui(ui, |ui| {
                for (icon, label) in TRADE_ICONS {
                    ui.selectable_value(
                        &mut app.admin.new_trade_icon,
                        icon.to_string(),
                        format!("{icon} {label}"),
                    );
                }
            });
        if ui.button("Add Trade").clicked() {
            app.admin_add_trade();
        }

        let ui = &mut columns[1];
        ui.heading("New Unit");
        let selected_name = subjects
            .iter()
            .find(|s| s.id == app.admin.selected_subject_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "-- Target Trade --".to_string());
        egui::ComboBox::from_id_salt("unit_subject")
            .selected_text(selected_name)
            .show_ui(ui, |ui| {
                for subject in &subjects {
                    ui.selectable_value(
                        &mut app.admin.selected_subject_id,
                        subject.id.clone(),
                        &subject.name,
                    );
                }
            });
        ui.add(
            TextEdit::singleline(&mut app.admin.new_block_title)
                .hint_text("Unit Title (e.g. Workshop Safety)"),
        );
        if ui.button("Create Unit").clicked() {
            app.admin_add_block();
        }
    });

    ui.add_space(14.0);
    ui.heading("System Hierarchy");
    ui.add_space(6.0);

    let tree = app.admin_tree();
    let mut request_delete: Option<PendingDelete> = None;

    ScrollArea::vertical().show(ui, |ui| {
        for subject in &tree {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&subject.icon).size(22.0));
                ui.label(RichText::new(&subject.name).strong());
                ui.label(
                    RichText::new(format!("{} units online", subject.blocks.len()))
                        .small()
                        .weak(),
                );
                if ui.button("🗑").on_hover_text("Erase this trade").clicked() {
                    request_delete = Some(PendingDelete::Subject {
                        subject_id: subject.id.clone(),
                    });
                }
            });

            for (idx, block) in subject.blocks.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.add_space(26.0);
                    ui.label(format!("#{} {}", idx + 1, block.title));
                    ui.label(
                        RichText::new(format!("{} sets", block.sets.len()))
                            .small()
                            .weak(),
                    );
                    if ui.button("✖").on_hover_text("Erase this unit").clicked() {
                        request_delete = Some(PendingDelete::Block {
                            subject_id: subject.id.clone(),
                            block_id: block.id.clone(),
                        });
                    }
                });
                for set in &block.sets {
                    ui.horizontal(|ui| {
                        ui.add_space(52.0);
                        let marker = if set.playable { "📝" } else { "🔒" };
                        ui.label(
                            RichText::new(format!(
                                "{marker} {} ({} questions)",
                                set.title, set.question_count
                            ))
                            .small(),
                        );
                        if ui.small_button("✖").on_hover_text("Erase this set").clicked() {
                            request_delete = Some(PendingDelete::Set {
                                block_id: block.id.clone(),
                                set_id: set.id.clone(),
                            });
                        }
                    });
                }
            }
            ui.add_space(10.0);
        }
    });

    if request_delete.is_some() {
        app.admin.confirm_delete = request_delete;
    }
}

/// Modal-style confirmation for destructive deletes; mirrors the original
/// flow where every erase asks first.
fn confirm_delete_window(app: &mut QuizApp, ctx: &Context) {
    let Some(pending) = app.admin.confirm_delete.clone() else {
        return;
    };

    let what = match &pending {
        PendingDelete::Subject { .. } => "this trade and every unit beneath it",
        PendingDelete::Block { .. } => "this unit and all of its practice sets",
        PendingDelete::Set { .. } => "this practice set",
    };

    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Confirm delete")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Erase {what}? This cannot be undone."));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                confirmed = ui.button("Delete").clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

    if confirmed {
        app.admin_confirmed_delete(pending);
    } else if cancelled {
        app.admin.confirm_delete = None;
    }
}
