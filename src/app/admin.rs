use std::sync::mpsc;

use super::*;
use crate::model::{QuizSet, fresh_id, now_millis};
use crate::synth::{DEFAULT_QUESTION_COUNT, MIN_SOURCE_CHARS, SynthRequest};

impl QuizApp {
    pub fn admin_add_trade(&mut self) {
        let name = self.admin.new_trade_name.trim().to_string();
        if name.is_empty() {
            self.admin.error = Some("Trade name is required.".into());
            return;
        }
        let icon = self.admin.new_trade_icon.clone();
        let result = self.catalog.add_subject(&name, &icon);
        self.note_persist_result(result);
        self.admin.new_trade_name.clear();
        self.admin.error = None;
    }

    pub fn admin_add_block(&mut self) {
        let title = self.admin.new_block_title.trim().to_string();
        if title.is_empty() || self.admin.selected_subject_id.is_empty() {
            self.admin.error = Some("Pick a trade and give the unit a title.".into());
            return;
        }
        let subject_id = self.admin.selected_subject_id.clone();
        let result = self.catalog.add_block(&subject_id, &title);
        self.note_persist_result(result);
        self.admin.new_block_title.clear();
        self.admin.error = None;
    }

    /// Executes a confirmed delete. Deletes cascade in the store; here we
    /// only keep the form's selection from pointing at a removed node.
    pub fn admin_confirmed_delete(&mut self, delete: PendingDelete) {
        let result = match &delete {
            PendingDelete::Subject { subject_id } => {
                if self.admin.selected_subject_id == *subject_id {
                    self.admin.selected_subject_id.clear();
                    self.admin.selected_block_id.clear();
                }
                self.catalog.delete_subject(subject_id)
            }
            PendingDelete::Block {
                subject_id,
                block_id,
            } => {
                if self.admin.selected_block_id == *block_id {
                    self.admin.selected_block_id.clear();
                }
                self.catalog.delete_block(subject_id, block_id)
            }
            PendingDelete::Set { block_id, set_id } => self.catalog.delete_set(block_id, set_id),
        };
        self.note_persist_result(result);
        self.admin.confirm_delete = None;
    }

    /// Validates the synthesis form and launches the AI call in the
    /// background. A second submission while one is pending is ignored.
    pub fn submit_synthesis(&mut self) {
        if self.synthesis_pending() {
            self.admin.error = Some("A synthesis is already running. Wait for it to finish.".into());
            return;
        }
        let title = self.admin.new_set_title.trim().to_string();
        let source = self.admin.raw_text.clone();
        if title.is_empty() || self.admin.selected_block_id.is_empty() || source.trim().is_empty() {
            self.admin.error = Some("Title, source content and a target unit are all required.".into());
            return;
        }
        if source.trim().chars().count() < MIN_SOURCE_CHARS {
            self.admin.error = Some(crate::synth::SynthError::SourceTooShort.to_string());
            return;
        }

        self.admin.error = None;
        self.admin.success = None;
        self.spawn_synthesis(SynthRequest {
            source_text: source,
            title,
            desired_count: DEFAULT_QUESTION_COUNT,
        });
    }

    /// Native only: reads the PDF at the given path, extracts its text and
    /// feeds it through the same pipeline as pasted text.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn submit_pdf_synthesis(&mut self) {
        if self.synthesis_pending() {
            self.admin.error = Some("A synthesis is already running. Wait for it to finish.".into());
            return;
        }
        let title = self.admin.new_set_title.trim().to_string();
        let path = self.admin.pdf_path.trim().to_string();
        if title.is_empty() || self.admin.selected_block_id.is_empty() || path.is_empty() {
            self.admin.error = Some("Title, a PDF file and a target unit are all required.".into());
            return;
        }

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.admin.error = Some(format!("Could not open '{path}': {e}"));
                return;
            }
        };
        let text = match crate::extract::extract_pdf_text(&bytes) {
            Ok(text) => text,
            Err(e) => {
                self.admin.error = Some(e.to_string());
                return;
            }
        };
        if text.trim().chars().count() < MIN_SOURCE_CHARS {
            self.admin.error = Some(crate::synth::SynthError::SourceTooShort.to_string());
            return;
        }

        self.admin.error = None;
        self.admin.success = None;
        self.spawn_synthesis(SynthRequest {
            source_text: text,
            title,
            desired_count: DEFAULT_QUESTION_COUNT,
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn_synthesis(&mut self, req: SynthRequest) {
        let (tx, rx) = mpsc::channel();
        let provider = self.synth.clone();
        self.synth_rx = Some(rx);
        log::info!(
            "synthesis started: '{}' ({} source chars)",
            req.title,
            req.source_text.chars().count()
        );
        std::thread::spawn(move || {
            let _ = tx.send(provider.synthesize(&req));
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn_synthesis(&mut self, req: SynthRequest) {
        let (tx, rx) = mpsc::channel();
        let provider = self.synth.clone();
        self.synth_rx = Some(rx);
        log::info!(
            "synthesis started: '{}' ({} source chars)",
            req.title,
            req.source_text.chars().count()
        );
        wasm_bindgen_futures::spawn_local(async move {
            let _ = tx.send(provider.synthesize(&req).await);
        });
    }

    /// Collects a finished synthesis, if any; called once per frame. On
    /// success the new set lands in the catalog and the form resets; on
    /// failure the form keeps the user's input for a retry.
    pub fn poll_synthesis(&mut self) {
        let result = match self.synth_rx.as_ref().and_then(|rx| rx.try_recv().ok()) {
            Some(result) => result,
            None => return,
        };
        self.synth_rx = None;

        match result {
            Ok(questions) => {
                let set = QuizSet {
                    id: fresh_id("set"),
                    title: self.admin.new_set_title.trim().to_string(),
                    description: "AI-synthesized unit practice set.".to_string(),
                    questions,
                    created_at: now_millis(),
                    is_placeholder: false,
                };
                let count = set.questions.len();
                let block_id = self.admin.selected_block_id.clone();
                let persist = self.catalog.append_set(&block_id, set);
                self.note_persist_result(persist);
                self.admin.new_set_title.clear();
                self.admin.raw_text.clear();
                self.admin.pdf_path.clear();
                self.admin.success = Some(format!("Practice set deployed with {count} questions."));
            }
            Err(e) => {
                log::warn!("synthesis failed: {e}");
                self.admin.error = Some(e.to_string());
            }
        }
    }
}
