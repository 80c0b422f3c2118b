#[cfg(test)]
mod tests {
    use crate::helpers::{
        MultipartBuilder,
        app::{body_json, seed_course, stored_file_count},
        make_test_app,
    };
    use api::auth::generate_jwt;
    use axum::http::StatusCode;
    use db::models::course::Model as CourseModel;
    use serial_test::serial;
    use tower::ServiceExt;

    fn kept(paths: &[&String]) -> String {
        serde_json::to_string(paths).unwrap()
    }

    fn images_of(json: &serde_json::Value) -> Vec<String> {
        json["data"]["images"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    #[serial]
    async fn update_keeps_submitted_order_then_appends_uploads() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 3).await;
        let current = course.images.as_slice().to_vec();
        let (a, b, c) = (&current[0], &current[1], &current[2]);
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Rust 102", "Lifetimes", "Ferris Jr")
            .text("existingImages", &kept(&[c, a]))
            .png("new.png")
            .request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Course updated successfully");
        assert_eq!(json["data"]["name"], "Rust 102");

        let images = images_of(&json);
        assert_eq!(images.len(), 3);
        assert_eq!(&images[0], c);
        assert_eq!(&images[1], a);
        assert!(!current.contains(&images[2]));

        app_state.cleanup().flush().await;
        assert!(!app_state.store().exists(b).await, "dropped image removed");
        assert!(app_state.store().exists(a).await);
        assert!(app_state.store().exists(c).await);
        assert!(app_state.store().exists(&images[2]).await);
        assert_eq!(app_state.cleanup().stats().deleted, 1);

        let stored = CourseModel::find(app_state.db(), course.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.images.into_inner(), images);
    }

    #[tokio::test]
    #[serial]
    async fn resubmitting_unchanged_course_is_idempotent() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 2).await;
        let current = course.images.as_slice().to_vec();
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields(&course.name, &course.description, &course.instructor)
            .text("existingImages", &kept(&current.iter().collect::<Vec<_>>()))
            .request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(images_of(&body_json(response).await), current);

        app_state.cleanup().flush().await;
        assert_eq!(app_state.cleanup().stats().queued, 0);
        assert_eq!(stored_file_count(&app_state), 2);
    }

    #[tokio::test]
    #[serial]
    async fn empty_kept_list_replaces_every_image() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 2).await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Rust", "Desc", "Ferris")
            .text("existingImages", "[]")
            .png("only.png")
            .request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(images_of(&body_json(response).await).len(), 1);

        app_state.cleanup().flush().await;
        for old in course.images.as_slice() {
            assert!(!app_state.store().exists(old).await);
        }
        assert_eq!(stored_file_count(&app_state), 1);
    }

    #[tokio::test]
    #[serial]
    async fn foreign_kept_paths_are_dropped() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 1).await;
        let other = seed_course(&app_state, 1).await;
        let own = &course.images.as_slice()[0];
        let foreign = &other.images.as_slice()[0];
        let escape = "../../etc/passwd".to_string();
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Rust", "Desc", "Ferris")
            .text("existingImages", &kept(&[own, foreign, &escape]))
            .request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(images_of(&body_json(response).await), vec![own.clone()]);

        app_state.cleanup().flush().await;
        assert!(app_state.store().exists(foreign).await);
    }

    #[tokio::test]
    #[serial]
    async fn update_unknown_course_is_not_found_and_stores_nothing() {
        let (app, app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Rust", "Desc", "Ferris")
            .text("existingImages", "[]")
            .png("new.png")
            .request("PATCH", "/api/data/courseupdate/4242", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Course Not Found");
        assert_eq!(stored_file_count(&app_state), 0);
    }

    #[tokio::test]
    #[serial]
    async fn unknown_course_is_not_found_even_with_invalid_fields() {
        let (app, app_state, _tmp) = make_test_app().await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("", "Desc", "Ferris")
            .text("existingImages", "[]")
            .file("images", "notes.txt", "text/plain", b"hello")
            .request("PATCH", "/api/data/courseupdate/4242", Some(&token));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Course Not Found");
        assert_eq!(stored_file_count(&app_state), 0);
    }

    #[tokio::test]
    #[serial]
    async fn blank_name_on_existing_course_is_bad_request() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 1).await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("  ", "Desc", "Ferris")
            .text("existingImages", "[]")
            .request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        app_state.cleanup().flush().await;
        assert_eq!(stored_file_count(&app_state), 1);
    }

    #[tokio::test]
    #[serial]
    async fn malformed_existing_images_is_bad_request() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 1).await;
        let (token, _) = generate_jwt(1, true).unwrap();

        for body in [Some("uploads/a.png"), None] {
            let mut builder = MultipartBuilder::new().course_fields("Changed", "Desc", "Ferris");
            if let Some(raw) = body {
                builder = builder.text("existingImages", raw);
            }
            let req = builder.request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

            let response = app.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        let stored = CourseModel::find(app_state.db(), course.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Rust 101");
        assert_eq!(stored.images, course.images);
    }

    #[tokio::test]
    #[serial]
    async fn legacy_field_names_update_the_course() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 1).await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let req = MultipartBuilder::new()
            .text("coursename", "Renamed")
            .text("coursedesc", "New description")
            .text("courseinstruct", "New instructor")
            .text(
                "existingImages",
                &kept(&course.images.as_slice().iter().collect::<Vec<_>>()),
            )
            .request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Renamed");
        assert_eq!(json["data"]["description"], "New description");
        assert_eq!(json["data"]["instructor"], "New instructor");
    }

    #[tokio::test]
    #[serial]
    async fn non_admin_cannot_update() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 1).await;
        let (token, _) = generate_jwt(2, false).unwrap();

        let req = MultipartBuilder::new()
            .course_fields("Hijacked", "Desc", "Ferris")
            .text("existingImages", "[]")
            .request(
                "PATCH",
                &format!("/api/data/courseupdate/{}", course.id),
                Some(&token),
            );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let stored = CourseModel::find(app_state.db(), course.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Rust 101");
    }
}
