use crate::auth::CurrentUser;
use actix_web::{HttpResponse, Responder};

pub(crate) async fn process(CurrentUser(user): CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(user)
}
