use crate::session::{removal_cookie, SessionToken};
use crate::state::AppState;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use common::responses::MessageResponse;
use log::info;

/// Handler for `POST /logout`. Always succeeds, even without a session.
pub async fn process(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let token = req.extensions().get::<SessionToken>().cloned();

    if let Some(SessionToken(token)) = token {
        if let Some(identity) = state.sessions.remove(&token).await {
            info!("User {} logged out", identity.user_id);
        }
    }

    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(MessageResponse::new("Logged out"))
}
