//! Login and the static wizard pages.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use tracing::{info, warn};

use crate::rest::dto::LoginForm;
use crate::rest::session::{session_cookie, session_from_headers};
use crate::rest::state::ApiState;

const LOGIN_PAGE: &str = include_str!("../../../web/login.html");
const WIZARD_PAGE: &str = include_str!("../../../web/wizard.html");

/// `GET /`: the login page, or straight to the wizard for a live session
pub async fn home(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    if session_from_headers(&state, &headers).is_some() {
        Redirect::to("/wizard").into_response()
    } else {
        Html(LOGIN_PAGE).into_response()
    }
}

/// `GET /wizard`: the wizard page; falls back to the login page without
/// a session rather than a bare 401, since a browser lands here
pub async fn wizard(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    if session_from_headers(&state, &headers).is_some() {
        Html(WIZARD_PAGE).into_response()
    } else {
        Html(LOGIN_PAGE).into_response()
    }
}

/// `POST /login`: check the demo credentials; success creates a session
/// at step 1 and redirects into the wizard
pub async fn login(State(state): State<ApiState>, Form(form): Form<LoginForm>) -> Response {
    let server = &state.config.server;
    if form.username == server.username && form.password == server.password {
        let session = state.sessions.create();
        info!("User '{}' logged in, session {}", form.username, session.id);
        (
            [(header::SET_COOKIE, session_cookie(session.id))],
            Redirect::to("/wizard"),
        )
            .into_response()
    } else {
        warn!("Failed login attempt for '{}'", form.username);
        Html(LOGIN_PAGE).into_response()
    }
}
