//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::SearchField;
use crate::sort::SortKey;
use crate::view::{BookingOutcome, submit};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/search", post(search))
        .route("/sort", post(change_sort))
        .route("/book/:index", get(book))
        .route("/api/results", get(results))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The search page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate::from_view(&*state.view.read().await);
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Update the form from a submission and run the search.
///
/// Always lands back on the page; failures only show up in the logs. A form
/// with any rejected field is not searched, so the results stay as they were.
async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Redirect {
    let accepted = state.view.write().await.apply_form(&[
        (SearchField::Date, form.date.as_str()),
        (SearchField::Departure, form.departure.as_str()),
        (SearchField::Arrival, form.arrival.as_str()),
        (SearchField::Passengers, form.passengers.as_str()),
    ]);

    if accepted {
        submit(&state.view, state.schedule.as_ref()).await;
    } else {
        warn!("search form has invalid input, not submitting");
    }
    Redirect::to("/")
}

/// Change the display order.
async fn change_sort(State(state): State<AppState>, Form(form): Form<SortForm>) -> Redirect {
    match form.key.parse::<SortKey>() {
        Ok(key) => state.view.write().await.set_sort(key),
        Err(e) => warn!(error = %e, "ignoring sort change"),
    }
    Redirect::to("/")
}

/// Follow the booking control of a displayed result.
///
/// Redirects to the operator's site, or answers `204 No Content` so the
/// browser stays where it is when there is nothing to open.
async fn book(State(state): State<AppState>, Path(index): Path<usize>) -> Result<Response, AppError> {
    let outcome = state.view.read().await.book(index);

    match outcome {
        BookingOutcome::Open(nav) => Ok(Redirect::to(nav.url.as_str()).into_response()),
        BookingOutcome::Skipped => Ok(StatusCode::NO_CONTENT.into_response()),
        BookingOutcome::NoSuchResult => Err(AppError::NotFound {
            message: format!("No result at position {index}"),
        }),
    }
}

/// Current page state as JSON.
async fn results(State(state): State<AppState>) -> Json<ResultsResponse> {
    let view = state.view.read().await;
    Json(ResultsResponse {
        criteria: view.criteria().clone(),
        sort: view.sort_key(),
        results: view.displayed(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => {
                warn!(%message, "not found");
                (StatusCode::NOT_FOUND, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
