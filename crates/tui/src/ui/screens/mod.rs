pub mod focus;
pub mod goals;
pub mod notes;
pub mod resources;
pub mod tasks;
pub mod tutoring;
