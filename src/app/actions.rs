use super::*;
use crate::model::QuizContext;
use crate::session::{QuizSession, SessionOutcome};

impl QuizApp {
    /// Starts an attempt of the given set. Placeholder or empty sets are
    /// refused here even if the UI failed to disable them.
    pub fn start_quiz(&mut self, set_id: &str, now: f64) {
        let (subject_id, module_id, block_id) = match &self.view {
            AppView::SubSetSelect {
                subject_id,
                module_id,
                block_id,
            } => (subject_id.clone(), module_id.clone(), block_id.clone()),
            _ => return,
        };

        let set = match self
            .catalog
            .find_block(&block_id)
            .and_then(|b| b.sets.iter().find(|s| s.id == set_id))
        {
            Some(set) if set.is_playable() => set.clone(),
            _ => return,
        };

        log::info!("starting quiz '{}' ({} questions)", set.title, set.questions.len());
        let session = QuizSession::start(set, &self.session_config, now);
        self.view = AppView::Quiz {
            context: QuizContext {
                subject_id,
                module_id,
                block_id,
            },
            session,
        };
    }

    /// Records the answer for the question on screen.
    pub fn answer_current(&mut self, option_index: usize) {
        if let AppView::Quiz { session, .. } = &mut self.view {
            session.select_answer(option_index);
        }
    }

    /// Next/Skip: moves forward, submitting the attempt when the learner is
    /// already on the last question.
    pub fn advance_question(&mut self) {
        let outcome = match &mut self.view {
            AppView::Quiz { session, .. } => session.next(),
            _ => return,
        };
        if let Some(outcome) = outcome {
            self.show_result(outcome);
        }
    }

    pub fn previous_question(&mut self) {
        if let AppView::Quiz { session, .. } = &mut self.view {
            session.previous();
        }
    }

    /// Forces submission once the countdown runs out, whatever the current
    /// position or unanswered questions.
    pub fn tick_quiz(&mut self, now: f64) {
        let expired = matches!(&self.view, AppView::Quiz { session, .. } if session.expired(now));
        if expired {
            log::info!("quiz deadline reached, forcing submission");
            self.finish_quiz();
        }
    }

    /// Explicit submit.
    pub fn finish_quiz(&mut self) {
        let outcome = match &mut self.view {
            AppView::Quiz { session, .. } => session.finish(),
            _ => return,
        };
        self.show_result(outcome);
    }

    /// Abandons the attempt without scoring and returns to the set list.
    pub fn cancel_quiz(&mut self) {
        let context = match &self.view {
            AppView::Quiz { context, .. } => context.clone(),
            _ => return,
        };
        self.view = AppView::SubSetSelect {
            subject_id: context.subject_id,
            module_id: context.module_id,
            block_id: context.block_id,
        };
    }

    /// Replays the same set from the result screen.
    pub fn retry_quiz(&mut self, now: f64) {
        let (context, set) = match &self.view {
            AppView::Result { context, outcome } => (context.clone(), outcome.set.clone()),
            _ => return,
        };
        let session = QuizSession::start(set, &self.session_config, now);
        self.view = AppView::Quiz { context, session };
    }

    fn show_result(&mut self, outcome: SessionOutcome) {
        let context = match &self.view {
            AppView::Quiz { context, .. } => context.clone(),
            _ => return,
        };
        log::info!("quiz finished: {}/{}", outcome.score, outcome.total);
        self.view = AppView::Result { context, outcome };
    }
}
