use interview_core::model::{Score, SessionSummary};

use super::{Prompt, ResponseFormat};

/// System message for question generation.
pub const INTERVIEWER_PERSONA: &str =
    "You are an expert technical interviewer. You write clear, self-contained questions.";

/// System message for scoring answers and writing the closing assessment.
pub const COACH_PERSONA: &str =
    "You are a supportive but honest interview coach. You judge answers on correctness and clarity.";

pub(crate) fn questions(role: &str, difficulty: &str, count: usize) -> Prompt {
    Prompt {
        system: INTERVIEWER_PERSONA,
        user: format!(
            "Generate {count} {difficulty}-level interview questions for the role of {role}.\n\
             Return the questions as a numbered list, one per line, without answers or formatting."
        ),
        format: ResponseFormat::Text,
    }
}

pub(crate) fn evaluation(question: &str, answer: &str) -> Prompt {
    let max = Score::MAX;
    let user = format!(
        "Evaluate the candidate's answer.\n\
         Question: {question}\n\
         Answer: {answer}\n\
         Respond with a single JSON object and nothing else, using exactly these keys:\n\
         {{\"feedback\": \"short, constructive feedback (2-3 sentences)\", \
         \"score\": <integer from 0 to {max}>, \
         \"improvement\": \"one concrete thing to improve, or null\"}}"
    );
    Prompt {
        system: COACH_PERSONA,
        user,
        format: ResponseFormat::JsonObject,
    }
}

pub(crate) fn summary(role: &str, difficulty: &str, summary: &SessionSummary) -> Prompt {
    let improvements = if summary.improvements().is_empty() {
        "none noted".to_string()
    } else {
        summary
            .improvements()
            .iter()
            .map(|note| format!("- {note}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let max = Score::MAX;
    let user = format!(
        "Wrap up a {difficulty}-level mock interview for the role of {role}.\n\
         Questions answered: {answered}\n\
         Total score: {total}\n\
         Average score: {average:.1} out of {max}\n\
         Improvement notes:\n{improvements}\n\
         Write a short overall assessment (3-4 sentences) with the candidate's strengths and next steps.",
        answered = summary.answered(),
        total = summary.total_score(),
        average = summary.average_score(),
    );
    Prompt {
        system: COACH_PERSONA,
        user,
        format: ResponseFormat::Text,
    }
}
