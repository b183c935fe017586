use std::fmt;

use crate::model::{Block, Module, QuizSet, Subject, fresh_id, now_millis};

/// Versioned storage key. A change in the persisted shape must bump this so
/// stale incompatible trees are abandoned instead of misread.
pub const STORAGE_KEY: &str = "trade_quiz_v7_db";

/// Name every admin-created module gets; the catalog keeps one module per
/// subject.
const DEFAULT_MODULE_NAME: &str = "Learning Outcome";

/// A storage write failed (quota, I/O). The in-memory tree keeps the edit
/// for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistError(pub String);

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not save your changes ({}). They stay until the app closes.",
            self.0
        )
    }
}

impl std::error::Error for PersistError {}

/// Where the serialized tree lives: one whole-document read at startup, one
/// whole-document replace per mutation. No partial writes.
pub trait TreeStorage {
    fn read(&self) -> Option<String>;
    fn write(&mut self, json: &str) -> Result<(), PersistError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub struct FileStorage {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new() -> Self {
        Self {
            path: std::path::PathBuf::from(format!("{STORAGE_KEY}.json")),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TreeStorage for FileStorage {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn write(&mut self, json: &str) -> Result<(), PersistError> {
        std::fs::write(&self.path, json).map_err(|e| PersistError(e.to_string()))
    }
}

/// Browser build: the tree lives in window local storage under
/// [`STORAGE_KEY`].
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl TreeStorage for LocalStorage {
    fn read(&self) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(STORAGE_KEY).ok()?
    }

    fn write(&mut self, json: &str) -> Result<(), PersistError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| PersistError("local storage unavailable".into()))?;
        storage
            .set_item(STORAGE_KEY, json)
            .map_err(|_| PersistError("local storage rejected the write".into()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_storage() -> Box<dyn TreeStorage> {
    Box::new(FileStorage::new())
}

#[cfg(target_arch = "wasm32")]
pub fn platform_storage() -> Box<dyn TreeStorage> {
    Box::new(LocalStorage)
}

/// Owns the canonical subject tree. Every mutation edits the tree in
/// memory, then serializes the whole thing and replaces the persisted copy
/// before returning; a failed write comes back as `Err` while the edit
/// stays applied, so the caller can warn without losing work.
pub struct CatalogStore {
    subjects: Vec<Subject>,
    storage: Box<dyn TreeStorage>,
}

impl CatalogStore {
    /// Loads the persisted tree, falling back to `seed` when nothing usable
    /// is stored. Never fails: corrupt or empty data also lands on the
    /// seed, which is persisted right away.
    pub fn load(storage: Box<dyn TreeStorage>, seed: impl FnOnce() -> Vec<Subject>) -> Self {
        let mut seeded = false;
        let subjects = match storage.read() {
            Some(raw) => match serde_json::from_str::<Vec<Subject>>(&raw) {
                Ok(tree) if !tree.is_empty() => tree,
                Ok(_) => {
                    seeded = true;
                    seed()
                }
                Err(e) => {
                    log::warn!("stored catalog is unreadable ({e}); starting from seed data");
                    seeded = true;
                    seed()
                }
            },
            None => {
                seeded = true;
                seed()
            }
        };

        let mut store = Self { subjects, storage };
        if seeded {
            if let Err(e) = store.persist() {
                log::warn!("could not persist seed catalog: {e}");
            }
        }
        store
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn module(&self, subject_id: &str, module_id: &str) -> Option<&Module> {
        self.subject(subject_id)?
            .modules
            .iter()
            .find(|m| m.id == module_id)
    }

    /// Finds a block anywhere in the tree.
    pub fn find_block(&self, block_id: &str) -> Option<&Block> {
        self.subjects
            .iter()
            .flat_map(|s| &s.modules)
            .flat_map(|m| &m.blocks)
            .find(|b| b.id == block_id)
    }

    fn find_block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.subjects
            .iter_mut()
            .flat_map(|s| &mut s.modules)
            .flat_map(|m| &mut m.blocks)
            .find(|b| b.id == block_id)
    }

    /// Appends a new trade with one empty module. Name validity is the
    /// caller's job; the store does not re-check it.
    pub fn add_subject(&mut self, name: &str, icon: &str) -> Result<(), PersistError> {
        let millis = now_millis();
        self.subjects.push(Subject {
            id: format!("sub-{millis}"),
            name: name.to_string(),
            icon: icon.to_string(),
            modules: vec![Module {
                id: format!("mod-{millis}"),
                name: DEFAULT_MODULE_NAME.to_string(),
                blocks: Vec::new(),
            }],
        });
        log::info!("added subject '{name}'");
        self.persist()
    }

    /// Removes a subject and everything beneath it. No-op when the id is
    /// unknown.
    pub fn delete_subject(&mut self, id: &str) -> Result<(), PersistError> {
        self.subjects.retain(|s| s.id != id);
        self.persist()
    }

    /// Appends an empty block to the first module of the named subject.
    pub fn add_block(&mut self, subject_id: &str, title: &str) -> Result<(), PersistError> {
        if let Some(subject) = self.subjects.iter_mut().find(|s| s.id == subject_id) {
            if let Some(module) = subject.modules.first_mut() {
                module.blocks.push(Block {
                    id: fresh_id("block"),
                    title: title.to_string(),
                    sets: Vec::new(),
                });
                log::info!("added block '{title}' to subject {subject_id}");
            }
        }
        self.persist()
    }

    pub fn delete_block(&mut self, subject_id: &str, block_id: &str) -> Result<(), PersistError> {
        if let Some(subject) = self.subjects.iter_mut().find(|s| s.id == subject_id) {
            for module in &mut subject.modules {
                module.blocks.retain(|b| b.id != block_id);
            }
        }
        self.persist()
    }

    /// Appends a set to the named block, wherever it lives in the tree. The
    /// stored copy is always marked live: attaching real questions is what
    /// turns a placeholder slot playable.
    pub fn append_set(&mut self, block_id: &str, mut set: QuizSet) -> Result<(), PersistError> {
        set.is_placeholder = false;
        if let Some(block) = self.find_block_mut(block_id) {
            log::info!(
                "appended set '{}' ({} questions) to block {block_id}",
                set.title,
                set.questions.len()
            );
            block.sets.push(set);
        }
        self.persist()
    }

    pub fn delete_set(&mut self, block_id: &str, set_id: &str) -> Result<(), PersistError> {
        if let Some(block) = self.find_block_mut(block_id) {
            block.sets.retain(|s| s.id != set_id);
        }
        self.persist()
    }

    /// Best-effort write of the current tree; used as a shutdown flush.
    pub fn flush(&mut self) {
        if let Err(e) = self.persist() {
            log::warn!("final catalog flush failed: {e}");
        }
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        let json =
            serde_json::to_string(&self.subjects).map_err(|e| PersistError(e.to_string()))?;
        self.storage.write(&json)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Test backend: shared buffer, optionally failing every write.
    pub(crate) struct MemStorage {
        pub data: Rc<RefCell<Option<String>>>,
        pub fail_writes: bool,
    }

    impl MemStorage {
        pub fn empty() -> (Self, Rc<RefCell<Option<String>>>) {
            let data = Rc::new(RefCell::new(None));
            (
                Self {
                    data: Rc::clone(&data),
                    fail_writes: false,
                },
                data,
            )
        }

        pub fn with(json: &str) -> Self {
            Self {
                data: Rc::new(RefCell::new(Some(json.to_string()))),
                fail_writes: false,
            }
        }
    }

    impl TreeStorage for MemStorage {
        fn read(&self) -> Option<String> {
            self.data.borrow().clone()
        }

        fn write(&mut self, json: &str) -> Result<(), PersistError> {
            if self.fail_writes {
                return Err(PersistError("disk full".into()));
            }
            *self.data.borrow_mut() = Some(json.to_string());
            Ok(())
        }
    }

    pub(crate) fn seed() -> Vec<Subject> {
        crate::data::seed_subjects()
    }

    fn empty_store() -> CatalogStore {
        let (mem, _) = MemStorage::empty();
        CatalogStore::load(Box::new(mem), Vec::new)
    }

    fn playable_set(id: &str, question_count: usize) -> QuizSet {
        QuizSet {
            id: id.into(),
            title: format!("Set {id}"),
            description: "unit practice".into(),
            questions: (0..question_count)
                .map(|i| crate::model::Question {
                    id: format!("{id}-q{i}"),
                    text: format!("Q{i}"),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer_index: i % 4,
                })
                .collect(),
            created_at: 1,
            is_placeholder: false,
        }
    }

    #[test]
    fn missing_storage_falls_back_to_seed_and_persists_it() {
        let (mem, data) = MemStorage::empty();
        let store = CatalogStore::load(Box::new(mem), seed);
        assert_eq!(store.subjects().len(), 2);
        let persisted = data.borrow().clone().expect("seed must be written");
        let tree: Vec<Subject> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn corrupt_storage_falls_back_to_seed() {
        let mem = MemStorage::with("{not json at all");
        let store = CatalogStore::load(Box::new(mem), seed);
        assert_eq!(store.subjects().len(), 2);
    }

    #[test]
    fn persisted_tree_round_trips_exactly() {
        let (mem, data) = MemStorage::empty();
        let mut store = CatalogStore::load(Box::new(mem), seed);
        store.add_subject("Welding", "🛠️").unwrap();

        let raw = data.borrow().clone().unwrap();
        let reloaded = CatalogStore::load(Box::new(MemStorage::with(&raw)), Vec::new);
        assert_eq!(reloaded.subjects(), store.subjects());
    }

    #[test]
    fn add_subject_then_block_then_set_builds_the_expected_branch() {
        let mut store = empty_store();
        store.add_subject("Welding", "🔧").unwrap();
        assert_eq!(store.subjects().len(), 1);
        let subject_id = store.subjects()[0].id.clone();
        assert_eq!(store.subjects()[0].modules.len(), 1);

        store.add_block(&subject_id, "Arc Safety").unwrap();
        let block = &store.subjects()[0].modules[0].blocks[0];
        assert_eq!(block.title, "Arc Safety");
        let block_id = block.id.clone();

        store.append_set(&block_id, playable_set("s1", 5)).unwrap();
        let sets = &store.find_block(&block_id).unwrap().sets;
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].questions.len(), 5);
        assert!(!sets[0].is_placeholder);
    }

    #[test]
    fn append_set_forces_the_placeholder_flag_off() {
        let mut store = empty_store();
        store.add_subject("Fitter", "⚙️").unwrap();
        let subject_id = store.subjects()[0].id.clone();
        store.add_block(&subject_id, "Measurement").unwrap();
        let block_id = store.subjects()[0].modules[0].blocks[0].id.clone();

        let mut set = playable_set("s1", 2);
        set.is_placeholder = true;
        store.append_set(&block_id, set).unwrap();
        assert!(!store.find_block(&block_id).unwrap().sets[0].is_placeholder);
    }

    #[test]
    fn delete_subject_cascades_through_the_whole_branch() {
        let (mem, _) = MemStorage::empty();
        let mut store = CatalogStore::load(Box::new(mem), seed);
        let doomed = store.subjects()[0].id.clone();
        let survivor = store.subjects()[1].id.clone();

        store.delete_subject(&doomed).unwrap();

        assert!(store.subject(&doomed).is_none());
        assert!(store.subject(&survivor).is_some());
        // Nothing below the deleted subject may survive anywhere.
        let orphaned = store
            .subjects()
            .iter()
            .flat_map(|s| &s.modules)
            .flat_map(|m| &m.blocks)
            .any(|b| b.id.starts_with("irdmt-b-"));
        assert!(!orphaned);
    }

    #[test]
    fn delete_block_twice_equals_delete_once() {
        let (mem, _) = MemStorage::empty();
        let mut store = CatalogStore::load(Box::new(mem), seed);
        let subject_id = store.subjects()[0].id.clone();
        let block_id = store.subjects()[0].modules[0].blocks[0].id.clone();

        store.delete_block(&subject_id, &block_id).unwrap();
        let after_once = store.subjects().to_vec();
        store.delete_block(&subject_id, &block_id).unwrap();
        assert_eq!(store.subjects(), &after_once[..]);
    }

    #[test]
    fn unknown_id_mutations_are_silent_no_ops() {
        let (mem, _) = MemStorage::empty();
        let mut store = CatalogStore::load(Box::new(mem), seed);
        let before = store.subjects().to_vec();

        store.delete_subject("nope").unwrap();
        store.delete_block("nope", "nada").unwrap();
        store.delete_set("nope", "nada").unwrap();
        store.add_block("nope", "ghost unit").unwrap();
        store.append_set("nope", playable_set("ghost", 1)).unwrap();

        assert_eq!(store.subjects(), &before[..]);
    }

    #[test]
    fn failed_write_keeps_the_edit_in_memory() {
        let data = Rc::new(RefCell::new(None));
        let mem = MemStorage {
            data: Rc::clone(&data),
            fail_writes: true,
        };
        let mut store = CatalogStore::load(Box::new(mem), Vec::new);

        let err = store.add_subject("Electrician", "⚡").unwrap_err();
        assert!(err.0.contains("disk full"));
        // The edit survives even though nothing hit storage.
        assert_eq!(store.subjects().len(), 1);
        assert!(data.borrow().is_none());
    }
}
