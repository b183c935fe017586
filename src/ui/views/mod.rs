pub mod admin;
pub mod module_select;
pub mod quiz;
pub mod result;
pub mod set_select;
pub mod splash;
pub mod sub_set_select;
pub mod subject_select;
