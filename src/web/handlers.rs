// src/web/handlers.rs

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};

use crate::web::sessions::{session_cookie, SessionHandle};
use crate::web::{types::*, AppState};

/// Attach the session cookie when the session was created by this request.
fn with_session_cookie(mut response: Response, handle: &SessionHandle) -> Response {
    if handle.created {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(&handle.id)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// GET / — Render the page. The pending notice is shown once and then cleared.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let handle = state.sessions.resolve(&headers, &state.defaults);
    let rendered = {
        let mut session = handle.session.lock().await;
        let notice = session.take_notice();
        state.page.render(&session, notice.as_ref())
    };

    let response = match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("page render failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal error: failed to render page".into(),
                }),
            )
                .into_response()
        }
    };
    with_session_cookie(response, &handle)
}

/// POST /fetch — Call the report service with the sidebar values.
pub async fn fetch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<FetchForm>,
) -> Response {
    let handle = state.sessions.resolve(&headers, &state.defaults);
    {
        let mut session = handle.session.lock().await;
        state.assistant.fetch(&mut session, form.into_params()).await;
    }
    with_session_cookie(Redirect::to("/").into_response(), &handle)
}

/// POST /chat — Submit a chat message.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let handle = state.sessions.resolve(&headers, &state.defaults);
    {
        let mut session = handle.session.lock().await;
        state.assistant.submit(&mut session, &form.message).await;
    }
    with_session_cookie(Redirect::to("/").into_response(), &handle)
}

/// GET /api/v1/session — Current session as JSON. Read-only: never creates a session.
pub async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(handle) = state.sessions.lookup(&headers) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No active session".into(),
            }),
        )
            .into_response();
    };
    let session = handle.session.lock().await;
    Json(SessionView::from(&*session)).into_response()
}

/// GET /api/v1/health — Simple health check.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len(),
    }))
}
