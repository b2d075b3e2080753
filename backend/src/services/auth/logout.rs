use crate::auth::session::{logout_cookie, SESSION_COOKIE_NAME};
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::responses::ActionResponse;

pub(crate) async fn process(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if let Some(cookie) = req.cookie(SESSION_COOKIE_NAME) {
        state.sessions.remove(cookie.value());
    }
    HttpResponse::Ok()
        .cookie(logout_cookie())
        .json(ActionResponse::ok("You have been logged out"))
}
