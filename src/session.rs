use std::collections::HashMap;

use crate::model::{Question, QuizSet};

/// Per-question time budget. 30 seconds per question matches the CBT exam
/// pacing; product iterations have also shipped 45.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seconds_per_question: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: 30,
        }
    }
}

impl SessionConfig {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let seconds = std::env::var("TRADE_QUIZ_SECONDS_PER_QUESTION")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&s| s > 0);
        match seconds {
            Some(seconds_per_question) => Self {
                seconds_per_question,
            },
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// One attempt at one quiz set, from the first question to a final score.
///
/// The session owns its copy of the set and never touches the catalog.
/// Clock values are the UI time in seconds; the deadline is fixed at start
/// and the remaining time is always recomputed from it, so ticks cannot
/// drift. Dropping the session without calling [`QuizSession::finish`]
/// abandons the attempt (cancel).
#[derive(Debug, Clone)]
pub struct QuizSession {
    set: QuizSet,
    index: usize,
    answers: HashMap<String, usize>,
    deadline: f64,
}

/// Final score of a finished session. `answers` holds only the questions
/// the learner actually answered; skipped ones are simply absent.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub score: usize,
    pub total: usize,
    pub answers: HashMap<String, usize>,
    pub set: QuizSet,
}

impl QuizSession {
    pub fn start(set: QuizSet, config: &SessionConfig, now: f64) -> Self {
        let budget = set.questions.len() as f64 * f64::from(config.seconds_per_question);
        Self {
            set,
            index: 0,
            answers: HashMap::new(),
            deadline: now + budget,
        }
    }

    pub fn set(&self) -> &QuizSet {
        &self.set
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.set.questions.len()
    }

    pub fn current(&self) -> &Question {
        &self.set.questions[self.index]
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.set.questions.len()
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.answers.get(&self.current().id).copied()
    }

    /// Records (or overwrites) the answer for the current question without
    /// advancing. Indices outside the option list are ignored.
    pub fn select_answer(&mut self, option_index: usize) {
        if option_index >= self.current().options.len() {
            return;
        }
        let id = self.current().id.clone();
        self.answers.insert(id, option_index);
    }

    /// Advances to the next question, finishing the attempt when called on
    /// the last one. Advancing past an unanswered question is allowed
    /// (skip).
    pub fn next(&mut self) -> Option<SessionOutcome> {
        if self.is_last() {
            Some(self.finish())
        } else {
            self.index += 1;
            None
        }
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Seconds left on the clock, never negative.
    pub fn remaining(&self, now: f64) -> f64 {
        (self.deadline - now).max(0.0)
    }

    /// Once this turns true the controller forces [`QuizSession::finish`],
    /// whatever the current position.
    pub fn expired(&self, now: f64) -> bool {
        now >= self.deadline
    }

    /// Scores the attempt: one point per question whose recorded answer
    /// matches its correct index. Unanswered questions are incorrect, never
    /// an error.
    pub fn finish(&mut self) -> SessionOutcome {
        let score = self
            .set
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id) == Some(&q.correct_answer_index))
            .count();
        SessionOutcome {
            score,
            total: self.set.questions.len(),
            answers: std::mem::take(&mut self.answers),
            set: self.set.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize) -> Question {
        Question {
            id: id.into(),
            text: format!("Question {id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer_index: correct,
        }
    }

    fn set_with(correct: &[usize]) -> QuizSet {
        QuizSet {
            id: "set-1".into(),
            title: "Set 1".into(),
            description: String::new(),
            questions: correct
                .iter()
                .enumerate()
                .map(|(i, &c)| question(&format!("q{}", i + 1), c))
                .collect(),
            created_at: 0,
            is_placeholder: false,
        }
    }

    fn config(seconds: u32) -> SessionConfig {
        SessionConfig {
            seconds_per_question: seconds,
        }
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let mut session = QuizSession::start(set_with(&[0, 1, 2, 3]), &config(30), 0.0);
        let mut outcome = None;
        for answer in [0, 1, 2, 3] {
            session.select_answer(answer);
            outcome = session.next();
        }
        let outcome = outcome.expect("next() on the last question must finish");
        assert_eq!(outcome.score, 4);
        assert_eq!(outcome.total, 4);
    }

    #[test]
    fn all_wrong_and_all_skipped_score_zero() {
        let mut wrong = QuizSession::start(set_with(&[0, 0, 0]), &config(30), 0.0);
        let mut out = None;
        for _ in 0..3 {
            wrong.select_answer(1);
            out = wrong.next().or(out);
        }
        assert_eq!(out.unwrap().score, 0);

        let mut skipped = QuizSession::start(set_with(&[0, 0, 0]), &config(30), 0.0);
        skipped.next();
        skipped.next();
        let outcome = skipped.next().unwrap();
        assert_eq!(outcome.score, 0);
        assert!(outcome.answers.is_empty());
    }

    #[test]
    fn answers_map_holds_only_selected_questions() {
        let mut session = QuizSession::start(set_with(&[1, 2, 0]), &config(30), 0.0);
        session.select_answer(1);
        session.next();
        session.next(); // skip q2
        session.select_answer(1);
        let outcome = session.next().unwrap();
        assert_eq!(outcome.answers.len(), 2);
        assert_eq!(outcome.answers.get("q1"), Some(&1));
        assert_eq!(outcome.answers.get("q2"), None);
        assert_eq!(outcome.answers.get("q3"), Some(&1));
    }

    #[test]
    fn reselecting_overwrites_and_out_of_range_is_ignored() {
        let mut session = QuizSession::start(set_with(&[2]), &config(30), 0.0);
        session.select_answer(0);
        session.select_answer(2);
        session.select_answer(9); // no such option
        assert_eq!(session.selected_answer(), Some(2));
        let outcome = session.next().unwrap();
        assert_eq!(outcome.score, 1);
    }

    #[test]
    fn previous_saturates_at_the_first_question() {
        let mut session = QuizSession::start(set_with(&[0, 0]), &config(30), 0.0);
        session.previous();
        assert_eq!(session.index(), 0);
        session.next();
        assert_eq!(session.index(), 1);
        session.previous();
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn deadline_is_question_count_times_budget() {
        let session = QuizSession::start(set_with(&[0, 0]), &config(30), 100.0);
        assert!(!session.expired(159.9));
        assert!(session.expired(160.0));
        assert_eq!(session.remaining(100.0), 60.0);
        assert_eq!(session.remaining(170.0), 0.0);
    }

    #[test]
    fn expiry_with_no_answers_scores_zero() {
        let mut session = QuizSession::start(set_with(&[0, 0]), &config(30), 0.0);
        assert!(session.expired(60.0));
        let outcome = session.finish();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.total, 2);
        assert!(outcome.answers.is_empty());
    }

    #[test]
    fn walkthrough_scores_two_of_three() {
        // Correct indices [1, 2, 0], learner picks [1, 2, 1].
        let mut session = QuizSession::start(set_with(&[1, 2, 0]), &config(30), 0.0);
        session.select_answer(1);
        session.next();
        session.select_answer(2);
        session.next();
        session.select_answer(1);
        let outcome = session.next().unwrap();
        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.total, 3);
        let expected: HashMap<String, usize> =
            [("q1".to_string(), 1), ("q2".to_string(), 2), ("q3".to_string(), 1)]
                .into_iter()
                .collect();
        assert_eq!(outcome.answers, expected);
    }
}
