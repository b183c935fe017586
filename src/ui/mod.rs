pub mod layout;
pub mod views;

use eframe::{App, Frame};
use egui::Context;

use crate::QuizApp;
use crate::model::AppView;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now = ctx.input(|i| i.time);

        // Time-driven transitions run before anything is painted: splash
        // advance, countdown expiry, a finished synthesis.
        self.tick_splash(now);
        self.tick_quiz(now);
        self.poll_synthesis();

        if !matches!(self.view, AppView::Splash { .. }) {
            layout::top_panel(self, ctx);
        }

        match self.view {
            AppView::Splash { .. } => views::splash::show(self, ctx),
            AppView::SubjectSelect => views::subject_select::show(self, ctx),
            AppView::ModuleSelect { .. } => views::module_select::show(self, ctx),
            AppView::SetSelect { .. } => views::set_select::show(self, ctx),
            AppView::SubSetSelect { .. } => views::sub_set_select::show(self, ctx),
            AppView::Quiz { .. } => views::quiz::show(self, ctx),
            AppView::Result { .. } => views::result::show(self, ctx),
            AppView::Admin => views::admin::show(self, ctx),
        }
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        // The catalog persists itself on every mutation; this is only a
        // best-effort flush on shutdown.
        self.catalog.flush();
    }
}
