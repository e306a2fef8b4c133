//! Interview Coach: question generation, clarifications, solution evaluation.
//!
//! Flow per operation: validate under the session lock → begin (new request id)
//! → build prompt → gateway call with the lock released → settle under the lock.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::controller::{settle_structured, Operation, OperationState};
use crate::errors::AppError;
use crate::interview::models::{Difficulty, InterviewQuestion, Language, Scorecard};
use crate::interview::prompts::{
    build_clarification_prompt, build_evaluation_prompt, build_question_prompt,
};
use crate::interview::timer::Countdown;
use crate::llm_client::AiGateway;
use crate::sessions::SessionStore;

pub const QUESTION_FAILED: &str = "Failed to generate question. Please try again.";
pub const EVALUATION_FAILED: &str = "Evaluation failed. Please try again.";
/// Shown as the interviewer's reply while a clarification is in flight.
pub const THINKING_PLACEHOLDER: &str = "Interviewer is thinking...";

#[derive(Debug)]
pub struct InterviewCoach {
    pub language: Language,
    pub difficulty: Difficulty,
    pub code: String,
    question: Operation<InterviewQuestion>,
    evaluation: Operation<Scorecard>,
    clarification: Operation<String>,
    last_clarification: String,
    countdown: Countdown,
}

#[derive(Debug, Serialize)]
pub struct ClarificationView {
    pub question: String,
    pub reply: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterviewView {
    pub language: Language,
    pub difficulty: Difficulty,
    pub code: String,
    pub question: OperationState<InterviewQuestion>,
    pub evaluation: OperationState<Scorecard>,
    pub clarification: ClarificationView,
    pub feedback: Option<String>,
    pub time_left_secs: u32,
    pub time_left: String,
    pub timer_running: bool,
}

impl InterviewCoach {
    pub fn new(duration_secs: u32) -> Self {
        let language = Language::default();
        Self {
            language,
            difficulty: Difficulty::default(),
            code: language.template().to_string(),
            question: Operation::default(),
            evaluation: Operation::default(),
            clarification: Operation::default(),
            last_clarification: String::new(),
            countdown: Countdown::new(duration_secs),
        }
    }

    /// Switching language swaps the editor to that language's template.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.code = language.template().to_string();
    }

    /// Clears the problem, scorecard, clarification and timer.
    pub fn reset(&mut self) {
        self.question.reset();
        self.evaluation.reset();
        self.clarification.reset();
        self.last_clarification.clear();
        self.countdown.stop_and_reset();
        self.code = self.language.template().to_string();
    }

    pub fn view(&self) -> InterviewView {
        InterviewView {
            language: self.language,
            difficulty: self.difficulty,
            code: self.code.clone(),
            question: self.question.state().clone(),
            evaluation: self.evaluation.state().clone(),
            clarification: ClarificationView {
                question: self.last_clarification.clone(),
                reply: self.clarification_reply(),
            },
            feedback: self.feedback(),
            time_left_secs: self.countdown.remaining_secs(),
            time_left: self.countdown.display(),
            timer_running: self.countdown.is_running(),
        }
    }

    fn clarification_reply(&self) -> Option<String> {
        match self.clarification.state() {
            OperationState::Idle => None,
            OperationState::Loading => Some(THINKING_PLACEHOLDER.to_string()),
            OperationState::Success { data } => Some(data.clone()),
            OperationState::Failed { message } => Some(message.clone()),
        }
    }

    fn feedback(&self) -> Option<String> {
        match (self.evaluation.state(), self.question.state()) {
            (OperationState::Success { data }, _) => Some(data.feedback.clone()),
            (OperationState::Failed { message }, _) => Some(message.clone()),
            (_, OperationState::Failed { message }) => Some(message.clone()),
            _ => None,
        }
    }
}

/// Resets the interview and asks the gateway for a new problem.
/// On success the countdown starts from the full duration.
pub async fn generate_question(
    sessions: &SessionStore,
    gateway: &dyn AiGateway,
    session_id: Uuid,
) -> Result<InterviewView, AppError> {
    let (request, prompt) = sessions.with(session_id, |ws| {
        let coach = &mut ws.interview;
        coach.reset();
        (coach.question.begin(), build_question_prompt(coach.difficulty))
    })?;

    info!("Generating interview question for session {session_id}");
    let reply = gateway.chat(&prompt).await;
    let outcome = settle_structured::<InterviewQuestion>(reply, QUESTION_FAILED);

    sessions.with(session_id, |ws| {
        let coach = &mut ws.interview;
        if coach.question.complete(request, outcome) && coach.question.data().is_some() {
            coach.countdown.start();
        }
        coach.view()
    })
}

/// Scores the submitted code against the current problem.
pub async fn submit_solution(
    sessions: &SessionStore,
    gateway: &dyn AiGateway,
    session_id: Uuid,
    code: Option<String>,
) -> Result<InterviewView, AppError> {
    let (request, prompt) = sessions.with(session_id, |ws| {
        let coach = &mut ws.interview;
        if let Some(code) = code {
            coach.code = code;
        }
        let problem = coach
            .question
            .data()
            .map(|q| q.problem.clone())
            .ok_or_else(|| {
                AppError::Validation("Generate a question before submitting a solution".to_string())
            })?;
        if coach.code.trim().is_empty() {
            return Err(AppError::Validation("Solution code cannot be empty".to_string()));
        }
        let prompt = build_evaluation_prompt(coach.language, &problem, &coach.code);
        Ok((coach.evaluation.begin(), prompt))
    })??;

    info!("Evaluating solution for session {session_id}");
    let reply = gateway.chat(&prompt).await;
    let outcome = settle_structured::<Scorecard>(reply, EVALUATION_FAILED);

    sessions.with(session_id, |ws| {
        let coach = &mut ws.interview;
        if coach.evaluation.complete(request, outcome) {
            if let Some(card) = coach.evaluation.data() {
                info!("Session {session_id} verdict: {}", card.verdict);
            }
        }
        coach.view()
    })
}

/// Answers a clarification question in plain text. The reply shows the
/// thinking placeholder until the gateway answers.
pub async fn ask_clarification(
    sessions: &SessionStore,
    gateway: &dyn AiGateway,
    session_id: Uuid,
    question: &str,
) -> Result<InterviewView, AppError> {
    if question.trim().is_empty() {
        return Err(AppError::Validation(
            "Clarification question cannot be empty".to_string(),
        ));
    }

    let request = sessions.with(session_id, |ws| {
        let coach = &mut ws.interview;
        coach.last_clarification = question.to_string();
        coach.clarification.begin()
    })?;

    let reply = gateway
        .chat(&build_clarification_prompt(question))
        .await
        .map(|r| r.into_text())
        .map_err(|e| format!("Error: {e}"));

    sessions.with(session_id, |ws| {
        ws.interview.clarification.complete(request, reply);
        ws.interview.view()
    })
}
