use serde::{Deserialize, Serialize};

use crate::session::{QuizSession, SessionOutcome};

/// A question or option string may carry two language variants joined by
/// this separator (e.g. `"Red / लाल"`). The string is stored verbatim; it
/// is only ever split for display.
pub const BILINGUAL_SEPARATOR: &str = " / ";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    #[serde(default)]
    pub is_placeholder: bool,
}

impl QuizSet {
    /// A set can only be played when it actually holds questions. An empty
    /// set counts as a placeholder whatever its flag says.
    pub fn is_playable(&self) -> bool {
        !self.is_placeholder && !self.questions.is_empty()
    }
}

/// Syllabus unit grouping one or more practice sets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub title: String,
    pub sets: Vec<QuizSet>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub name: String,
    pub blocks: Vec<Block>,
}

/// Top-level practice category ("trade"). Root of the catalog tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub modules: Vec<Module>,
}

/// Which subject/module/block a running quiz was launched from, so cancel
/// and the result screen know where to return.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizContext {
    pub subject_id: String,
    pub module_id: String,
    pub block_id: String,
}

/// The screen currently showing. Each variant carries exactly the focus
/// that screen needs, so a stale cross-tree selection (or a quiz without a
/// set) cannot be represented at all.
#[derive(Debug, Clone)]
pub enum AppView {
    Splash {
        /// UI clock at first paint; the splash advances after a fixed delay.
        entered_at: Option<f64>,
    },
    SubjectSelect,
    ModuleSelect {
        subject_id: String,
    },
    SetSelect {
        subject_id: String,
        module_id: String,
    },
    SubSetSelect {
        subject_id: String,
        module_id: String,
        block_id: String,
    },
    Quiz {
        context: QuizContext,
        session: QuizSession,
    },
    Result {
        context: QuizContext,
        outcome: SessionOutcome,
    },
    Admin,
}

impl Default for AppView {
    fn default() -> Self {
        AppView::Splash { entered_at: None }
    }
}

/// Splits a bilingual string into its primary variant and the optional
/// secondary one.
pub fn bilingual_parts(text: &str) -> (&str, Option<&str>) {
    match text.split_once(BILINGUAL_SEPARATOR) {
        Some((first, second)) => (first, Some(second)),
        None => (text, None),
    }
}

/// Milliseconds since the Unix epoch. Ids and `createdAt` stamps are
/// derived from this.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

/// Time-based id: `<prefix>-<millis>`.
pub fn fresh_id(prefix: &str) -> String {
    format!("{prefix}-{}", now_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set(questions: Vec<Question>, is_placeholder: bool) -> QuizSet {
        QuizSet {
            id: "set-1".into(),
            title: "Set 1".into(),
            description: "demo".into(),
            questions,
            created_at: 1_700_000_000_000,
            is_placeholder,
        }
    }

    fn sample_question() -> Question {
        Question {
            id: "q1".into(),
            text: "Which color marks caution? / कौन सा रंग सावधानी दर्शाता है?".into(),
            options: vec![
                "Red / लाल".into(),
                "Yellow / पीला".into(),
                "Green / हरा".into(),
                "Blue / नीला".into(),
            ],
            correct_answer_index: 1,
        }
    }

    #[test]
    fn empty_set_is_never_playable() {
        assert!(!sample_set(vec![], false).is_playable());
        assert!(!sample_set(vec![], true).is_playable());
        assert!(!sample_set(vec![sample_question()], true).is_playable());
        assert!(sample_set(vec![sample_question()], false).is_playable());
    }

    #[test]
    fn bilingual_split_keeps_single_variant_whole() {
        assert_eq!(bilingual_parts("Red / लाल"), ("Red", Some("लाल")));
        assert_eq!(bilingual_parts("CO2"), ("CO2", None));
        // Only the first separator splits; the rest stays in the tail.
        assert_eq!(bilingual_parts("a / b / c"), ("a", Some("b / c")));
    }

    #[test]
    fn tree_serializes_with_camel_case_wire_names() {
        let subject = Subject {
            id: "irdmt".into(),
            name: "IRDMT".into(),
            icon: "🤖".into(),
            modules: vec![Module {
                id: "m1".into(),
                name: "Learning Outcome".into(),
                blocks: vec![Block {
                    id: "b1".into(),
                    title: "Safety".into(),
                    sets: vec![sample_set(vec![sample_question()], false)],
                }],
            }],
        };
        let json = serde_json::to_string(&subject).unwrap();
        assert!(json.contains("\"correctAnswerIndex\":1"));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"isPlaceholder\":false"));

        let back: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, subject);
    }

    #[test]
    fn placeholder_flag_defaults_to_false_when_absent() {
        let json = r#"{
            "id": "s", "title": "t", "description": "d",
            "questions": [], "createdAt": 0
        }"#;
        let set: QuizSet = serde_json::from_str(json).unwrap();
        assert!(!set.is_placeholder);
    }
}
