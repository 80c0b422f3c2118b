pub mod course;
pub mod error;

pub use course::{CourseFields, CourseService, CourseUpdate};
pub use error::CourseError;
