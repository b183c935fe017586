use super::*;

/// How long the splash screen stays up before moving on by itself.
pub(crate) const SPLASH_SECS: f64 = 2.5;

impl QuizApp {
    /// Advances the splash screen once its fixed delay has elapsed. The
    /// first tick stamps the entry time; later ticks compare against it.
    pub fn tick_splash(&mut self, now: f64) {
        if let AppView::Splash { entered_at } = &mut self.view {
            match entered_at {
                None => *entered_at = Some(now),
                Some(start) if now - *start >= SPLASH_SECS => {
                    self.view = AppView::SubjectSelect;
                }
                Some(_) => {}
            }
        }
    }

    /// Entering a subject drops any deeper focus: the new view carries the
    /// subject and nothing else.
    pub fn select_subject(&mut self, subject_id: &str) {
        if self.catalog.subject(subject_id).is_none() {
            return;
        }
        self.view = AppView::ModuleSelect {
            subject_id: subject_id.to_string(),
        };
    }

    pub fn select_module(&mut self, module_id: &str) {
        let subject_id = match &self.view {
            AppView::ModuleSelect { subject_id } => subject_id.clone(),
            _ => return,
        };
        if self.catalog.module(&subject_id, module_id).is_none() {
            return;
        }
        self.view = AppView::SetSelect {
            subject_id,
            module_id: module_id.to_string(),
        };
    }

    pub fn select_block(&mut self, block_id: &str) {
        let (subject_id, module_id) = match &self.view {
            AppView::SetSelect {
                subject_id,
                module_id,
            } => (subject_id.clone(), module_id.clone()),
            _ => return,
        };
        if self.catalog.find_block(block_id).is_none() {
            return;
        }
        self.view = AppView::SubSetSelect {
            subject_id,
            module_id,
            block_id: block_id.to_string(),
        };
    }

    pub fn back_from_modules(&mut self) {
        if matches!(self.view, AppView::ModuleSelect { .. }) {
            self.view = AppView::SubjectSelect;
        }
    }

    pub fn back_from_sets(&mut self) {
        let subject_id = match &self.view {
            AppView::SetSelect { subject_id, .. } => subject_id.clone(),
            _ => return,
        };
        self.view = AppView::ModuleSelect { subject_id };
    }

    pub fn back_from_sub_sets(&mut self) {
        let (subject_id, module_id) = match &self.view {
            AppView::SubSetSelect {
                subject_id,
                module_id,
                ..
            } => (subject_id.clone(), module_id.clone()),
            _ => return,
        };
        self.view = AppView::SetSelect {
            subject_id,
            module_id,
        };
    }

    /// Clears every focus entity and returns to subject selection. A quiz
    /// in progress is abandoned, an in-flight synthesis result dropped.
    pub fn go_home(&mut self) {
        self.synth_rx = None;
        self.view = AppView::SubjectSelect;
    }

    /// The admin screen is reachable from anywhere. Whatever was on screen
    /// (including a running quiz) is left behind.
    pub fn open_admin(&mut self) {
        self.admin.error = None;
        self.admin.success = None;
        self.view = AppView::Admin;
    }

    /// Leaving admin always lands on subject selection; a synthesis still
    /// in flight is disregarded when it eventually arrives.
    pub fn close_admin(&mut self) {
        self.synth_rx = None;
        self.admin.confirm_delete = None;
        self.view = AppView::SubjectSelect;
    }
}
