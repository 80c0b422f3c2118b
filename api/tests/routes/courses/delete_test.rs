#[cfg(test)]
mod tests {
    use crate::helpers::{
        app::{body_json, seed_course, stored_file_count},
        make_test_app,
    };
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::course::Model as CourseModel;
    use serial_test::serial;
    use tower::ServiceExt;
    use util::config::AppConfig;

    fn delete_request(id: i64, token: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/data/course/{id}"))
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn admin_deletes_course_and_images_stay_by_default() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 2).await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let response = app.oneshot(delete_request(course.id, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Course Deleted Successfully");
        assert!(json["data"].is_null());

        assert!(CourseModel::find(app_state.db(), course.id).await.unwrap().is_none());

        app_state.cleanup().flush().await;
        assert_eq!(stored_file_count(&app_state), 2);
    }

    #[tokio::test]
    #[serial]
    async fn purge_flag_removes_images_with_the_course() {
        let (app, app_state, _tmp) = make_test_app().await;
        AppConfig::set_purge_images_on_delete(true);
        let course = seed_course(&app_state, 2).await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let response = app.oneshot(delete_request(course.id, &token)).await.unwrap();
        AppConfig::set_purge_images_on_delete(false);
        assert_eq!(response.status(), StatusCode::OK);

        app_state.cleanup().flush().await;
        assert_eq!(stored_file_count(&app_state), 0);
        assert_eq!(app_state.cleanup().stats().deleted, 2);
    }

    #[tokio::test]
    #[serial]
    async fn deleting_unknown_course_is_not_found() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 1).await;
        let (token, _) = generate_jwt(1, true).unwrap();

        let response = app.oneshot(delete_request(course.id + 100, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Course Not Found");

        assert_eq!(CourseModel::list(app_state.db()).await.unwrap().len(), 1);
        assert_eq!(stored_file_count(&app_state), 1);
    }

    #[tokio::test]
    #[serial]
    async fn non_admin_cannot_delete() {
        let (app, app_state, _tmp) = make_test_app().await;
        let course = seed_course(&app_state, 1).await;
        let (token, _) = generate_jwt(3, false).unwrap();

        let response = app.oneshot(delete_request(course.id, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(CourseModel::find(app_state.db(), course.id).await.unwrap().is_some());
    }
}
