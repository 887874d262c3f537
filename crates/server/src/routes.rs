use std::convert::Infallible;

use interview_core::model::SessionId;
use serde::Serialize;
use services::{AnswerOutcome, InterviewError, InterviewService};
use warp::Filter;
use warp::reply::{Json, json};

use crate::api::{
    ALREADY_COMPLETE, AnswerRequest, AnswerResponse, ErrorResponse, HealthResponse,
    HistoryResponse, MessageResponse, SessionRequest, StartSessionRequest, StartSessionResponse,
    SummaryResponse,
};
use crate::config::{DEFAULT_DIFFICULTY, DEFAULT_NUM_QUESTIONS, DEFAULT_ROLE};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: InterviewService,
    pub max_questions: usize,
}

/// All HTTP routes of the interview service.
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_state = warp::any().map(move || state.clone());

    let start = warp::path!("start_session")
        .and(warp::post())
        .and(json_body::<StartSessionRequest>())
        .and(with_state.clone())
        .and_then(start_session);

    let answer = warp::path!("answer_question")
        .and(warp::post())
        .and(json_body::<AnswerRequest>())
        .and(with_state.clone())
        .and_then(answer_question);

    let summary = warp::path!("get_summary")
        .and(warp::post())
        .and(json_body::<SessionRequest>())
        .and(with_state.clone())
        .and_then(get_summary);

    let history = warp::path!("get_history")
        .and(warp::post())
        .and(json_body::<SessionRequest>())
        .and(with_state.clone())
        .and_then(get_history);

    let health = warp::path!("health")
        .and(warp::get())
        .and(with_state)
        .and_then(health);

    start
        .or(answer)
        .or(summary)
        .or(history)
        .or(health)
        .with(warp::trace::request())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(64 * 1024).and(warp::body::json())
}

async fn start_session(
    request: StartSessionRequest,
    state: AppState,
) -> Result<Json, Infallible> {
    let role = non_blank(request.role).unwrap_or_else(|| DEFAULT_ROLE.to_owned());
    let difficulty = non_blank(request.difficulty).unwrap_or_else(|| DEFAULT_DIFFICULTY.to_owned());
    let num_questions = request
        .num_questions
        .unwrap_or(DEFAULT_NUM_QUESTIONS)
        .min(state.max_questions);

    let result = state
        .service
        .start_session(&role, &difficulty, num_questions)
        .await
        .map(StartSessionResponse::from);
    Ok(respond(result))
}

async fn answer_question(request: AnswerRequest, state: AppState) -> Result<Json, Infallible> {
    let Some(id) = parse_session_id(&request.session_id) else {
        return Ok(json(&ErrorResponse::unknown_session(&request.session_id)));
    };

    let reply = match state.service.submit_answer(id, &request.answer).await {
        Ok(AnswerOutcome::Answered(feedback)) => json(&AnswerResponse::from(feedback)),
        Ok(AnswerOutcome::AlreadyComplete) => json(&MessageResponse {
            message: ALREADY_COMPLETE,
        }),
        Err(err) => error_reply(&err),
    };
    Ok(reply)
}

async fn get_summary(request: SessionRequest, state: AppState) -> Result<Json, Infallible> {
    let Some(id) = parse_session_id(&request.session_id) else {
        return Ok(json(&ErrorResponse::unknown_session(&request.session_id)));
    };
    let result = state.service.summary(id).await.map(SummaryResponse::from);
    Ok(respond(result))
}

async fn get_history(request: SessionRequest, state: AppState) -> Result<Json, Infallible> {
    let Some(id) = parse_session_id(&request.session_id) else {
        return Ok(json(&ErrorResponse::unknown_session(&request.session_id)));
    };
    let result = state.service.history(id).await.map(HistoryResponse::from);
    Ok(respond(result))
}

async fn health(state: AppState) -> Result<Json, Infallible> {
    let result = state
        .service
        .session_count()
        .await
        .map(|sessions| HealthResponse {
            status: "ok",
            sessions,
        });
    Ok(respond(result))
}

fn respond<T: Serialize>(result: Result<T, InterviewError>) -> Json {
    match result {
        Ok(body) => json(&body),
        Err(err) => error_reply(&err),
    }
}

fn error_reply(err: &InterviewError) -> Json {
    match err {
        InterviewError::UnknownSession(_) | InterviewError::EmptyHistory => {
            tracing::debug!(error = %err, "request rejected");
        }
        _ => tracing::error!(error = %err, "request failed"),
    }
    json(&ErrorResponse::from(err))
}

fn parse_session_id(raw: &str) -> Option<SessionId> {
    raw.parse().ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
