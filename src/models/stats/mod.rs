pub mod responses;

pub use responses::{StudentStats, TeacherStats};
