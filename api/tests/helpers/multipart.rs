use axum::{body::Body, http::Request};

const BOUNDARY: &str = "----BoundaryTest";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend(format!("--{BOUNDARY}\r\n").as_bytes());
        self.body.extend(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, content: &[u8]) -> Self {
        self.body.extend(format!("--{BOUNDARY}\r\n").as_bytes());
        self.body.extend(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend(content);
        self.body.extend(b"\r\n");
        self
    }

    pub fn png(self, filename: &str) -> Self {
        self.file("images", filename, "image/png", b"\x89PNG\r\n\x1a\nfake")
    }

    pub fn course_fields(self, name: &str, description: &str, instructor: &str) -> Self {
        self.text("name", name)
            .text("description", description)
            .text("instructor", instructor)
    }

    pub fn request(mut self, method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        self.body.extend(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(self.body)).unwrap()
    }
}
