use crate::model::Subject;

/// Bootstrap catalog used when no persisted tree exists: the standard IRDMT
/// and Employability Skill syllabi. Embedded at compile time.
pub fn seed_subjects() -> Vec<Subject> {
    let file_content = include_str!("data/seed.yaml");
    let mut subjects: Vec<Subject> =
        serde_yaml::from_str(file_content).expect("embedded seed catalog must parse");

    // Seed sets carry no timestamp of their own; stamp them at first load.
    let stamp = crate::model::now_millis();
    for subject in &mut subjects {
        for module in &mut subject.modules {
            for block in &mut module.blocks {
                for set in &mut block.sets {
                    set.created_at = stamp;
                }
            }
        }
    }
    subjects
}
