use std::sync::mpsc::Receiver;

use crate::catalog::{CatalogStore, PersistError, platform_storage};
use crate::data::seed_subjects;
use crate::model::{AppView, Question};
use crate::session::SessionConfig;
use crate::synth::{SynthError, SynthProvider};

pub mod actions;
pub mod admin;
pub mod navigation;
pub mod queries;

pub use queries::{AdminBlockRow, AdminSubjectRow, BlockRow, ModuleRow, SetRow, SubjectRow};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdminTab {
    Synthesize,
    Infrastructure,
}

/// Where the synthesis source comes from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SourceMode {
    Text,
    Pdf,
}

/// A delete waiting for the user to confirm it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PendingDelete {
    Subject {
        subject_id: String,
    },
    Block {
        subject_id: String,
        block_id: String,
    },
    Set {
        block_id: String,
        set_id: String,
    },
}

/// Everything the admin screen edits. Kept across failed attempts so the
/// user can correct the form and retry without retyping.
pub struct AdminForm {
    pub tab: AdminTab,
    pub source_mode: SourceMode,
    pub selected_subject_id: String,
    pub selected_block_id: String,
    pub new_set_title: String,
    pub raw_text: String,
    pub pdf_path: String,
    pub new_block_title: String,
    pub new_trade_name: String,
    pub new_trade_icon: String,
    pub confirm_delete: Option<PendingDelete>,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Default for AdminForm {
    fn default() -> Self {
        Self {
            tab: AdminTab::Synthesize,
            source_mode: SourceMode::Text,
            selected_subject_id: String::new(),
            selected_block_id: String::new(),
            new_set_title: String::new(),
            raw_text: String::new(),
            pdf_path: String::new(),
            new_block_title: String::new(),
            new_trade_name: String::new(),
            new_trade_icon: "🤖".to_string(),
            confirm_delete: None,
            error: None,
            success: None,
        }
    }
}

/// Top-level application state: the catalog, the current view and the
/// transient bits around them. All mutation goes through the methods in
/// the submodules; the UI layer only renders and forwards clicks.
pub struct QuizApp {
    pub catalog: CatalogStore,
    pub view: AppView,
    pub session_config: SessionConfig,
    pub synth: SynthProvider,
    pub admin: AdminForm,
    /// Non-fatal warning shown in the chrome (e.g. a failed storage write).
    pub notice: Option<String>,
    /// Delivers the outcome of the synthesis currently in flight, if any.
    pub(crate) synth_rx: Option<Receiver<Result<Vec<Question>, SynthError>>>,
}

impl QuizApp {
    pub fn new() -> Self {
        Self::with_store(CatalogStore::load(platform_storage(), seed_subjects))
    }

    pub fn with_store(catalog: CatalogStore) -> Self {
        Self {
            catalog,
            view: AppView::default(),
            session_config: SessionConfig::from_env(),
            synth: SynthProvider::from_env(),
            admin: AdminForm::default(),
            notice: None,
            synth_rx: None,
        }
    }

    pub fn synthesis_pending(&self) -> bool {
        self.synth_rx.is_some()
    }

    /// Records a persistence failure as a visible warning; the in-memory
    /// tree is already updated, so the session keeps working.
    pub(crate) fn note_persist_result(&mut self, result: Result<(), PersistError>) {
        match result {
            Ok(()) => {}
            Err(e) => {
                log::warn!("catalog persist failed: {e}");
                self.notice = Some(e.to_string());
            }
        }
    }
}

impl Default for QuizApp {
    fn default() -> Self {
        Self::new()
    }
}
