use super::*;

// Display rows precomputed for the views, so rendering never holds a borrow
// of the catalog while handling clicks.

#[derive(Debug, Clone)]
pub struct SubjectRow {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub struct ModuleRow {
    pub id: String,
    pub name: String,
    pub block_count: usize,
}

#[derive(Debug, Clone)]
pub struct BlockRow {
    pub id: String,
    pub title: String,
    pub set_count: usize,
    pub live_count: usize,
}

#[derive(Debug, Clone)]
pub struct SetRow {
    pub id: String,
    pub title: String,
    pub question_count: usize,
    pub playable: bool,
}

/// One subject with its flattened block/set listing for the admin
/// hierarchy table.
#[derive(Debug, Clone)]
pub struct AdminSubjectRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub blocks: Vec<AdminBlockRow>,
}

#[derive(Debug, Clone)]
pub struct AdminBlockRow {
    pub id: String,
    pub title: String,
    pub sets: Vec<SetRow>,
}

impl QuizApp {
    pub fn subject_rows(&self) -> Vec<SubjectRow> {
        self.catalog
            .subjects()
            .iter()
            .map(|s| SubjectRow {
                id: s.id.clone(),
                name: s.name.clone(),
                icon: s.icon.clone(),
            })
            .collect()
    }

    pub fn module_rows(&self, subject_id: &str) -> Vec<ModuleRow> {
        self.catalog
            .subject(subject_id)
            .map(|s| {
                s.modules
                    .iter()
                    .map(|m| ModuleRow {
                        id: m.id.clone(),
                        name: m.name.clone(),
                        block_count: m.blocks.len(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn block_rows(&self, subject_id: &str, module_id: &str) -> Vec<BlockRow> {
        self.catalog
            .module(subject_id, module_id)
            .map(|m| {
                m.blocks
                    .iter()
                    .map(|b| BlockRow {
                        id: b.id.clone(),
                        title: b.title.clone(),
                        set_count: b.sets.len(),
                        live_count: b.sets.iter().filter(|s| s.is_playable()).count(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_rows(&self, block_id: &str) -> Vec<SetRow> {
        self.catalog
            .find_block(block_id)
            .map(|b| b.sets.iter().map(set_row).collect())
            .unwrap_or_default()
    }

    pub fn subject_name(&self, subject_id: &str) -> String {
        self.catalog
            .subject(subject_id)
            .map(|s| s.name.clone())
            .unwrap_or_default()
    }

    pub fn block_title(&self, block_id: &str) -> String {
        self.catalog
            .find_block(block_id)
            .map(|b| b.title.clone())
            .unwrap_or_default()
    }

    /// Blocks of the subject currently picked in the admin form (first
    /// module, like every admin mutation).
    pub fn admin_block_choices(&self) -> Vec<(String, String)> {
        self.catalog
            .subject(&self.admin.selected_subject_id)
            .and_then(|s| s.modules.first())
            .map(|m| {
                m.blocks
                    .iter()
                    .enumerate()
                    .map(|(i, b)| (b.id.clone(), format!("{}. {}", i + 1, b.title)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The whole tree flattened for the admin hierarchy listing.
    pub fn admin_tree(&self) -> Vec<AdminSubjectRow> {
        self.catalog
            .subjects()
            .iter()
            .map(|s| AdminSubjectRow {
                id: s.id.clone(),
                name: s.name.clone(),
                icon: s.icon.clone(),
                blocks: s
                    .modules
                    .iter()
                    .flat_map(|m| &m.blocks)
                    .map(|b| AdminBlockRow {
                        id: b.id.clone(),
                        title: b.title.clone(),
                        sets: b.sets.iter().map(set_row).collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

fn set_row(set: &crate::model::QuizSet) -> SetRow {
    SetRow {
        id: set.id.clone(),
        title: set.title.clone(),
        question_count: set.questions.len(),
        playable: set.is_playable(),
    }
}
