pub mod multipart;

pub use app::make_test_app;
pub use multipart::MultipartBuilder;
