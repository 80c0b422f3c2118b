pub mod course;

pub use course::Entity as Course;
