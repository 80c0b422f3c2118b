#[cfg(test)]
mod tests {
    use crate::helpers::{
        MultipartBuilder,
        app::{body_json, stored_file_count},
        make_test_app,
    };
    use api::auth::generate_jwt;
    use axum::http::StatusCode;
    use db::models::course::Model as CourseModel;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn admin_creates_course_with_images() {
        let (app, app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("  Rust 101 ", "Ownership and borrowing", "Ferris")
            .png("Cover.PNG")
            .png("second.png")
            .request("POST", "/api/data/course", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Course added successfully");
        assert_eq!(json["data"]["name"], "Rust 101");

        let images: Vec<String> = json["data"]["images"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(images.len(), 2);
        assert!(images[0].starts_with("uploads/") && images[0].ends_with(".png"));
        assert_ne!(images[0], images[1]);

        for path in &images {
            assert!(app_state.store().exists(path).await);
        }

        let id = json["data"]["id"].as_i64().unwrap();
        let stored = CourseModel::find(app_state.db(), id).await.unwrap().unwrap();
        assert_eq!(stored.images.into_inner(), images);
    }

    #[tokio::test]
    #[serial]
    async fn legacy_field_names_and_array_file_field_are_accepted() {
        let (app, _app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .text("coursename", "Legacy")
            .text("coursedesc", "Old form")
            .text("courseinstruct", "Someone")
            .file("images[]", "a.jpg", "image/jpeg", b"jpeg")
            .request("POST", "/api/data/course", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Legacy");
        assert_eq!(json["data"]["instructor"], "Someone");
        assert!(json["data"]["images"][0].as_str().unwrap().ends_with(".jpg"));
    }

    #[tokio::test]
    #[serial]
    async fn create_without_images_is_rejected_before_any_write() {
        let (app, app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Rust", "Desc", "Ferris")
            .request("POST", "/api/data/course", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "At least one image file is required.");

        assert!(CourseModel::list(app_state.db()).await.unwrap().is_empty());
        assert_eq!(stored_file_count(&app_state), 0);
    }

    #[tokio::test]
    #[serial]
    async fn empty_file_input_counts_as_no_images() {
        let (app, _app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Rust", "Desc", "Ferris")
            .file("images", "", "application/octet-stream", b"")
            .request("POST", "/api/data/course", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn non_image_upload_is_rejected() {
        let (app, app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Rust", "Desc", "Ferris")
            .file("images", "notes.txt", "text/plain", b"hello")
            .request("POST", "/api/data/course", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["message"], "File 'notes.txt' is not an image");
        assert_eq!(stored_file_count(&app_state), 0);
    }

    #[tokio::test]
    #[serial]
    async fn blank_fields_fail_validation() {
        let (app, app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("   ", "Desc", "")
            .png("cover.png")
            .request("POST", "/api/data/course", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("Course name is required"));
        assert!(message.contains("Course instructor is required"));
        assert_eq!(stored_file_count(&app_state), 0);
    }

    #[tokio::test]
    #[serial]
    async fn create_requires_authentication() {
        let (app, _app_state, _tmp) = make_test_app().await;

        let req = MultipartBuilder::new()
            .course_fields("Rust", "Desc", "Ferris")
            .png("cover.png")
            .request("POST", "/api/data/course", None);

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
