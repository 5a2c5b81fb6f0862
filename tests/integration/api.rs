use actix_web::cookie::Cookie;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use rust_tutordesk::routes;
use rust_tutordesk::utils::{json_error_handler, query_error_handler};

use crate::common;

macro_rules! init_app {
    ($storage:expr, $cache:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new($cache.clone()))
                .configure(routes::configure_api_routes),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": $username, "password": common::TEST_PASSWORD}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 200);
        session_cookie(&resp)
    }};
}

fn register_body(username: &str, role: &str) -> Value {
    json!({
        "username": username,
        "password": common::TEST_PASSWORD,
        "role": role,
        "full_name": "Test User",
    })
}

fn session_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "sessionid")
        .map(|c| c.into_owned())
        .expect("session cookie")
}

mod auth {
    use super::*;

    #[actix_web::test]
    async fn registration_logs_the_user_in() {
        let storage = common::storage().await;
        let cache = common::cache();
        let app = init_app!(storage, cache);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("tina", "teacher"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let cookie = session_cookie(&resp);
        assert!(cookie.http_only().unwrap_or(false));

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(cookie)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["user"]["username"], "tina");
        assert_eq!(body["data"]["user"]["role"], "teacher");
        assert!(body["data"]["user"].get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn registration_rejects_unknown_roles_with_field_errors() {
        let storage = common::storage().await;
        let cache = common::cache();
        let app = init_app!(storage, cache);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("root", "admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["data"]["role"].is_array());
    }

    #[actix_web::test]
    async fn duplicate_username_is_a_conflict() {
        let storage = common::storage().await;
        let cache = common::cache();
        let app = init_app!(storage, cache);

        for expected in [201, 409] {
            let req = test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(register_body("sam", "student"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn login_and_logout_manage_the_session() {
        let storage = common::storage().await;
        let cache = common::cache();
        common::student(&storage, "sam").await;
        let app = init_app!(storage, cache);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": "sam", "password": "wrong-password"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": "sam", "password": common::TEST_PASSWORD}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let cookie = session_cookie(&resp);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
    #[actix_web::test]
    async fn password_change_requires_the_current_password() {
        let storage = common::storage().await;
        let cache = common::cache();
        common::student(&storage, "sam").await;
        let app = init_app!(storage, cache);
        let cookie = login!(app, "sam");

        let attempts = [
            json!({"password": "brand-new-secret"}),
            json!({"password": "brand-new-secret", "current_password": "not-my-password"}),
        ];
        for body in attempts {
            let req = test::TestRequest::put()
                .uri("/api/v1/auth/me")
                .cookie(cookie.clone())
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400);
            let body: Value = test::read_body_json(resp).await;
            assert!(body["data"]["current_password"].is_array());
        }

        // 旧密码仍然有效
        login!(app, "sam");

        let req = test::TestRequest::put()
            .uri("/api/v1/auth/me")
            .cookie(cookie)
            .set_json(json!({
                "password": "brand-new-secret",
                "current_password": common::TEST_PASSWORD,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"username": "sam", "password": "brand-new-secret"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}

mod access {
    use super::*;

    #[actix_web::test]
    async fn unauthenticated_requests_are_rejected() {
        let storage = common::storage().await;
        let cache = common::cache();
        let app = init_app!(storage, cache);

        let req = test::TestRequest::get()
            .uri("/api/v1/assignments")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn students_are_rejected_from_teacher_stats() {
        let storage = common::storage().await;
        let cache = common::cache();
        common::student(&storage, "sam").await;
        let app = init_app!(storage, cache);
        let cookie = login!(app, "sam");

        let req = test::TestRequest::get()
            .uri("/api/v1/stats/teacher")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
        let body: Value = test::read_body_json(resp).await;
        assert!(body.get("data").is_none());

        let req = test::TestRequest::get()
            .uri("/api/v1/stats/student")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn students_cannot_create_assignments() {
        let storage = common::storage().await;
        let cache = common::cache();
        common::student(&storage, "sam").await;
        let app = init_app!(storage, cache);
        let cookie = login!(app, "sam");

        let req = test::TestRequest::post()
            .uri("/api/v1/assignments")
            .cookie(cookie)
            .set_json(json!({"title": "Mine", "due_date": "2030-01-01T00:00:00Z"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }

    #[actix_web::test]
    async fn teacher_creates_assignment_for_linked_student() {
        let storage = common::storage().await;
        let cache = common::cache();
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (sam, _) = common::student(&storage, "sam").await;
        common::link(&storage, &teacher, sam.id).await;
        let app = init_app!(storage, cache);
        let cookie = login!(app, "tina");

        let req = test::TestRequest::post()
            .uri("/api/v1/assignments")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Essay 1",
                "due_date": "2030-01-01T00:00:00Z",
                "student_id": sam.id,
                "teacher_id": 999,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["teacher_id"], teacher.id);
        assert_eq!(body["data"]["status"], "pending");

        let req = test::TestRequest::get()
            .uri("/api/v1/assignments?page=1&size=500")
            .cookie(cookie)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["pagination"]["page_size"], 100);
    }

    #[actix_web::test]
    async fn invalid_path_ids_are_bad_requests() {
        let storage = common::storage().await;
        let cache = common::cache();
        common::teacher(&storage, "tina").await;
        let app = init_app!(storage, cache);
        let cookie = login!(app, "tina");

        let req = test::TestRequest::get()
            .uri("/api/v1/assignments/abc")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
