use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{LevelAchieved, Question, SessionId};
use quiz_core::time::fixed_clock;
use quiz_core::wire::{
    AnswerResponse, CompleteResponse, ErrorResponse, HealthResponse, QuestionResponse,
    StartResponse,
};
use quiz_server::bank::QUESTION_BANK;
use quiz_server::{AppState, create_router};
use serde_json::json;
use services::evaluator::FALLBACK_EXPLANATION;
use services::{
    FallbackQuestionSource, QuestionSource, QuizApiClient, QuizConfig, QuizSession,
    RemoteEvaluator, RemoteQuestionSource, Render, SessionLoop, SessionState, SourceError,
};

/// Spawn the service on a random port and return its base URL.
async fn spawn_app() -> String {
    let app = create_router(AppState::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn correct_index(question_id: &str) -> usize {
    QUESTION_BANK
        .iter()
        .find(|e| e.id == question_id)
        .map(|e| e.correct)
        .expect("question comes from the bank")
}

async fn start(client: &reqwest::Client, address: &str) -> String {
    let body: StartResponse = client
        .post(format!("{address}/api/quiz/start"))
        .json(&json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body.success);
    assert_eq!(body.total_questions, Some(10));
    body.session_id.unwrap()
}

async fn next_question(client: &reqwest::Client, address: &str, session: &str) -> QuestionResponse {
    client
        .post(format!("{address}/api/quiz/question"))
        .json(&json!({ "session_id": session }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_reports_bank_and_sessions() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    start(&client, &address).await;

    let health: HealthResponse = client
        .get(format!("{address}/api/system/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(health.status, "healthy");
    assert_eq!(health.active_sessions, 1);
    assert_eq!(health.total_questions, 20);
    assert_eq!(health.questions_per_quiz, 10);
}

#[tokio::test]
async fn unknown_session_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/api/quiz/question"))
        .json(&json!({ "session_id": "student_0_0000" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: ErrorResponse = response.json().await.unwrap();
    assert!(!body.success);
    assert_eq!(body.error, "Invalid or expired session");
}

#[tokio::test]
async fn mismatched_question_id_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let session = start(&client, &address).await;

    let response = client
        .post(format!("{address}/api/quiz/answer"))
        .json(&json!({ "session_id": session, "question_id": "nope", "selected_index": 0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "Question ID mismatch");
}

#[tokio::test]
async fn full_quiz_over_http_scores_and_forgets_session() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let session = start(&client, &address).await;

    let mut seen = Vec::new();
    for i in 1..=10_u32 {
        let body = next_question(&client, &address, &session).await;
        let question = body.question.unwrap();
        assert_eq!(question.question_number, i);
        assert_eq!(body.progress.unwrap().current, i);
        assert!(!seen.contains(&question.id));

        // Miss the last two.
        let correct = correct_index(&question.id);
        let selected = if i > 8 { (correct + 1) % question.options.len() } else { correct };
        let answer: AnswerResponse = client
            .post(format!("{address}/api/quiz/answer"))
            .json(&json!({
                "session_id": session,
                "question_id": question.id,
                "selected_index": selected,
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert!(answer.success);
        assert_eq!(answer.correct, i <= 8);
        assert_eq!(answer.questions_answered, i);
        assert_eq!(answer.is_complete, i == 10);
        seen.push(question.id);
    }
    let done = next_question(&client, &address, &session).await;
    assert!(!done.success);
    assert_eq!(done.error.as_deref(), Some("Quiz already completed"));

    let complete: CompleteResponse = client
        .post(format!("{address}/api/quiz/complete"))
        .json(&json!({ "session_id": session }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let summary = complete.summary.unwrap();
    assert_eq!(summary.total_questions(), 10);
    assert_eq!(summary.final_score(), 80);
    assert_eq!(summary.accuracy(), 80);
    assert_eq!(summary.level_achieved(), LevelAchieved::Advanced);

    let again = next_question(&client, &address, &session).await;
    assert_eq!(again.error.as_deref(), Some("Invalid or expired session"));
}

async fn active_sessions(client: &reqwest::Client, address: &str) -> usize {
    let health: HealthResponse = client
        .get(format!("{address}/api/system/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    health.active_sessions
}

fn live_loop(address: &str) -> SessionLoop {
    let backends = QuizConfig::default()
        .with_base_url(&format!("{address}/api/quiz"))
        .unwrap()
        .build_backends()
        .unwrap();
    SessionLoop::from_backends(backends)
}

fn api_client(address: &str) -> QuizApiClient {
    let url = reqwest::Url::parse(&format!("{address}/api/quiz")).unwrap();
    QuizApiClient::new(url, Duration::from_secs(2)).unwrap()
}

/// Start a session and answer every question with the bank's correct option.
async fn play_correctly(
    runner: &SessionLoop,
    session: &mut QuizSession,
    renders: &mut Vec<Render>,
) {
    runner.start_session(session, renders).await.unwrap();
    for _ in 0..10 {
        let id = session.current_question().unwrap().id().as_str().to_owned();
        runner
            .select_option(session, correct_index(&id), renders)
            .unwrap();
        runner.submit_answer(session, renders).await.unwrap();
        runner.advance(session, renders).await.unwrap();
    }
}

#[tokio::test]
async fn session_loop_plays_against_live_service() {
    let address = spawn_app().await;
    let runner = live_loop(&address);
    let mut session = QuizSession::new(fixed_clock());
    let mut renders: Vec<Render> = Vec::new();

    play_correctly(&runner, &mut session, &mut renders).await;

    assert!(session.session_id().is_some_and(|id| !id.is_local()));
    assert!(
        session
            .session_id()
            .map(SessionId::as_str)
            .is_some_and(|id| id.starts_with("student_"))
    );
    assert_eq!(session.state(), SessionState::Complete);
    let summary = session.summary().unwrap();
    assert_eq!(summary.final_score(), 100);
    assert_eq!(summary.level_achieved(), LevelAchieved::Advanced);
    // Server explanations come through rather than the offline placeholder.
    assert!(renders.iter().any(|r| matches!(
        r,
        Render::Feedback { evaluation, .. } if evaluation.explanation != FALLBACK_EXPLANATION
    )));
}

#[tokio::test]
async fn finished_and_abandoned_sessions_are_closed_on_the_service() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let runner = live_loop(&address);
    let mut session = QuizSession::new(fixed_clock());
    let mut renders: Vec<Render> = Vec::new();

    play_correctly(&runner, &mut session, &mut renders).await;
    assert_eq!(session.state(), SessionState::Complete);
    assert_eq!(active_sessions(&client, &address).await, 0);

    runner.restart(&mut session, &mut renders).await.unwrap();
    assert_eq!(active_sessions(&client, &address).await, 1);

    runner.exit(&mut session, &mut renders).await;
    assert_eq!(active_sessions(&client, &address).await, 0);
    assert!(!renders.iter().any(|r| matches!(r, Render::Alert(_))));
}

/// Opens under an id the service never issued; questions still go to the service.
struct UnknownSessionSource {
    inner: RemoteQuestionSource,
}

#[async_trait]
impl QuestionSource for UnknownSessionSource {
    async fn open_session(&self) -> Result<SessionId, SourceError> {
        Ok(SessionId::new("student_0_0000"))
    }

    async fn request_question(&self, session: &SessionId, index: u32) -> Question {
        self.inner.request_question(session, index).await
    }
}

#[tokio::test]
async fn client_reports_service_rejections() {
    let address = spawn_app().await;
    let client = api_client(&address);
    let unknown = SessionId::new("student_0_0000");

    let err = client.question(&unknown, 0).await.unwrap_err();
    assert!(matches!(&err, SourceError::Rejected(msg) if msg == "Invalid or expired session"));

    let question = FallbackQuestionSource::question_at(0);
    let err = client.answer(&unknown, &question, 0).await.unwrap_err();
    assert!(matches!(&err, SourceError::Rejected(msg) if msg == "Invalid or expired session"));

    let err = client.complete(&unknown).await.unwrap_err();
    assert!(matches!(err, SourceError::Rejected(_)));
}

#[tokio::test]
async fn rejected_session_still_completes_with_fallback_content() {
    let address = spawn_app().await;
    let client = api_client(&address);
    let runner = SessionLoop::new(
        Arc::new(UnknownSessionSource {
            inner: RemoteQuestionSource::new(client.clone()),
        }),
        Arc::new(RemoteEvaluator::new(client)),
    );
    let mut session = QuizSession::new(fixed_clock());
    let mut renders: Vec<Render> = Vec::new();

    runner.start_session(&mut session, &mut renders).await.unwrap();
    for _ in 0..10 {
        runner.select_option(&mut session, 0, &mut renders).unwrap();
        runner.submit_answer(&mut session, &mut renders).await.unwrap();
        runner.advance(&mut session, &mut renders).await.unwrap();
    }

    assert_eq!(session.state(), SessionState::Complete);
    assert_eq!(session.answer_log().len(), 10);
    for (i, record) in session.answer_log().iter().enumerate() {
        let expected = FallbackQuestionSource::question_at(u32::try_from(i).unwrap());
        assert_eq!(record.question().id(), expected.id());
        assert!(record.is_correct());
    }
    assert_eq!(session.summary().unwrap().final_score(), 100);
    assert!(renders.iter().all(|r| match r {
        Render::Feedback { evaluation, .. } => evaluation.explanation == FALLBACK_EXPLANATION,
        Render::Alert(_) => false,
        _ => true,
    }));
}
