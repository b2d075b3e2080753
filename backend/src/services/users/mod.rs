//! Account management, restricted to administrators.
//!
//! - `GET /api/users`: every account.
//! - `POST /api/users`: registers an account.
//! - `DELETE /api/users/{id}`: removes an account other than the caller's and
//!   revokes its sessions.

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

pub(crate) mod create;
mod list;
mod remove;

const API_PATH: &str = "/api/users";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", delete().to(remove::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::user::User;
    use serde_json::json;

    #[actix_web::test]
    async fn only_admins_manage_accounts() {
        let (state, _dir) = test_state();
        let clerk = login(&state, "clerk", false);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/users")
            .cookie(clerk)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn admin_creates_and_deletes_accounts() {
        let (state, _dir) = test_state();
        let admin = login(&state, "admin", true);
        let clerk = login(&state, "clerk", false);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .cookie(admin.clone())
            .set_json(json!({"username": "novo", "password": "senha"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: User = test::read_body_json(resp).await;
        assert!(!created.is_admin);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .cookie(admin.clone())
            .set_json(json!({"username": "novo", "password": "outra"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/users")
            .cookie(admin.clone())
            .to_request();
        let all: Vec<User> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 3);
        let admin_id = all.iter().find(|u| u.username == "admin").unwrap().id;
        let clerk_id = all.iter().find(|u| u.username == "clerk").unwrap().id;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/users/{}", admin_id))
            .cookie(admin.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/users/{}", clerk_id))
            .cookie(admin)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.sessions.get(clerk.value()).is_none());
    }
}
