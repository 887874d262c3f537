//! Narrow decoders for generative provider output.
//!
//! Providers return free text. Everything that must be machine-readable goes
//! through these functions so malformed output surfaces as a typed error.

use serde::Deserialize;

use interview_core::model::Score;

use crate::error::DecodeError;
use crate::provider::Evaluation;

/// Extract up to `limit` questions from a (usually numbered) list.
///
/// Blank lines are skipped and list markers (`1.`, `2)`, `-`, `*`) are stripped,
/// along with markdown emphasis wrapped around the item or its marker.
/// When at least one line carries a marker, unmarked lines such as preambles are
/// dropped. Returns fewer than `limit` entries if the text holds fewer.
#[must_use]
pub fn decode_questions(text: &str, limit: usize) -> Vec<String> {
    let lines: Vec<(bool, &str)> = text
        .lines()
        .map(split_list_marker)
        .map(|(marked, line)| (marked, clean_question(line)))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let any_marked = lines.iter().any(|(marked, _)| *marked);
    lines
        .into_iter()
        .filter(|(marked, _)| *marked || !any_marked)
        .map(|(_, line)| line.to_owned())
        .take(limit)
        .collect()
}

const EMPHASIS: [&str; 4] = ["**", "__", "*", "_"];

fn split_list_marker(line: &str) -> (bool, &str) {
    let line = unwrap_emphasis(line.trim());

    // `**1.** Question` keeps the emphasis on the marker only
    let (open, body) = EMPHASIS[..2]
        .iter()
        .find_map(|mark| line.strip_prefix(mark).map(|rest| (Some(*mark), rest)))
        .unwrap_or((None, line));
    let rest = body.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < body.len() {
        if let Some(after) = rest.strip_prefix(['.', ')']) {
            let after = open
                .and_then(|mark| after.strip_prefix(mark))
                .unwrap_or(after);
            return (true, after);
        }
    }

    if let Some(after) = line
        .strip_prefix(['-', '*', '•'])
        .filter(|after| after.starts_with(char::is_whitespace))
    {
        return (true, after);
    }
    (false, line)
}

fn clean_question(line: &str) -> &str {
    let mut current = line;
    loop {
        let trimmed =
            unwrap_emphasis(current.trim_matches(|c: char| c == '.' || c.is_whitespace()));
        if trimmed.len() == current.len() {
            return trimmed;
        }
        current = trimmed;
    }
}

/// Strip emphasis markers that wrap the whole text, e.g. `**text**`.
fn unwrap_emphasis(text: &str) -> &str {
    let mut current = text;
    while let Some(inner) = EMPHASIS.iter().find_map(|mark| {
        current
            .strip_prefix(mark)
            .and_then(|rest| rest.strip_suffix(mark))
            .filter(|inner| !inner.trim().is_empty())
    }) {
        current = inner.trim();
    }
    current
}

#[derive(Debug, Deserialize)]
struct RawEvaluation {
    feedback: String,
    score: f64,
    #[serde(default)]
    improvement: Option<String>,
}

/// Decode an evaluation object of the shape
/// `{"feedback": str, "score": number, "improvement": str | null}`.
///
/// Markdown fences or prose around the object are ignored. Fractional scores are
/// rounded to the nearest integer before range checking.
///
/// # Errors
///
/// Returns `DecodeError` if no object is present, the JSON does not match the shape,
/// the feedback is blank, or the score is not a finite value in `0..=Score::MAX`.
pub fn decode_evaluation(text: &str) -> Result<Evaluation, DecodeError> {
    let raw = first_evaluation_object(text)?;

    let feedback = raw.feedback.trim();
    if feedback.is_empty() {
        return Err(DecodeError::EmptyFeedback);
    }

    let score = decode_score(raw.score)?;
    let improvement = raw
        .improvement
        .map(|note| note.trim().to_owned())
        .filter(|note| !note.is_empty());

    Ok(Evaluation {
        feedback: feedback.to_owned(),
        score,
        improvement,
    })
}

/// Parse the first JSON object that matches the evaluation shape.
///
/// Each `{` is tried as a candidate start; parsing stops at the end of the first
/// complete value, so trailing prose (braces included) is ignored. When no
/// candidate parses, the error from the first candidate is reported.
fn first_evaluation_object(text: &str) -> Result<RawEvaluation, DecodeError> {
    let mut first_error = None;
    for (start, _) in text.match_indices('{') {
        let parsed = serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<RawEvaluation>()
            .next();
        match parsed {
            Some(Ok(raw)) => return Ok(raw),
            Some(Err(err)) => {
                first_error.get_or_insert(err);
            }
            None => {}
        }
    }
    Err(first_error.map_or(DecodeError::MissingObject, DecodeError::Json))
}

fn decode_score(raw: f64) -> Result<Score, DecodeError> {
    if !raw.is_finite() {
        return Err(DecodeError::NonFiniteScore);
    }
    let rounded = raw.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return Err(DecodeError::NonFiniteScore);
    }
    #[allow(clippy::cast_possible_truncation)]
    let value = rounded as i64;
    Ok(Score::try_from(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_list_is_cleaned() {
        let text = "1. What is ownership?\n2) Explain borrowing.\n\n3. Describe lifetimes .";
        assert_eq!(
            decode_questions(text, 5),
            vec![
                "What is ownership?".to_string(),
                "Explain borrowing".to_string(),
                "Describe lifetimes".to_string(),
            ]
        );
    }

    #[test]
    fn preamble_is_dropped_when_list_is_numbered() {
        let text = "Here are your questions:\n1. First?\n2. Second?";
        assert_eq!(decode_questions(text, 5), vec!["First?", "Second?"]);
    }

    #[test]
    fn unnumbered_lines_are_kept_when_nothing_is_marked() {
        let text = "What is a trait?\nWhat is a closure?";
        assert_eq!(
            decode_questions(text, 5),
            vec!["What is a trait?", "What is a closure?"]
        );
    }

    #[test]
    fn leading_digits_without_marker_are_preserved() {
        let text = "2024 was a busy year, what did you ship?";
        assert_eq!(decode_questions(text, 1), vec![text.to_string()]);
    }

    #[test]
    fn extra_questions_are_truncated() {
        let text = "1. A?\n2. B?\n3. C?";
        assert_eq!(decode_questions(text, 2), vec!["A?", "B?"]);
    }

    #[test]
    fn bullets_are_markers() {
        let text = "- Why Rust?\n* Why not C?";
        assert_eq!(decode_questions(text, 5), vec!["Why Rust?", "Why not C?"]);
    }

    #[test]
    fn empty_text_yields_no_questions() {
        assert!(decode_questions("  \n\n", 3).is_empty());
    }

    #[test]
    fn evaluation_decodes_plain_object() {
        let eval = decode_evaluation(
            r#"{"feedback": "Clear answer.", "score": 8, "improvement": "Mention Drop."}"#,
        )
        .unwrap();
        assert_eq!(eval.feedback, "Clear answer.");
        assert_eq!(eval.score.value(), 8);
        assert_eq!(eval.improvement.as_deref(), Some("Mention Drop."));
    }

    #[test]
    fn evaluation_tolerates_code_fences_and_prose() {
        let text = "Sure!\n```json\n{\"feedback\": \"Good\", \"score\": 6.6, \"improvement\": null}\n```";
        let eval = decode_evaluation(text).unwrap();
        assert_eq!(eval.score.value(), 7);
        assert_eq!(eval.improvement, None);
    }

    #[test]
    fn blank_improvement_is_none() {
        let eval =
            decode_evaluation(r#"{"feedback": "ok", "score": 5, "improvement": "  "}"#).unwrap();
        assert_eq!(eval.improvement, None);
    }

    #[test]
    fn missing_improvement_key_is_none() {
        let eval = decode_evaluation(r#"{"feedback": "ok", "score": 5}"#).unwrap();
        assert_eq!(eval.improvement, None);
    }

    #[test]
    fn bold_numbered_items_are_cleaned() {
        let text = "**1. What is ownership?**\n**2. What is borrowing?**";
        assert_eq!(
            decode_questions(text, 5),
            vec!["What is ownership?", "What is borrowing?"]
        );
    }

    #[test]
    fn bold_question_text_is_cleaned() {
        let text = "1. **What is ownership?**\n2. **Explain borrowing.**";
        assert_eq!(
            decode_questions(text, 5),
            vec!["What is ownership?", "Explain borrowing"]
        );
    }

    #[test]
    fn bold_marker_is_stripped() {
        let text = "**1.** What is ownership?\n__2)__ What is borrowing?";
        assert_eq!(
            decode_questions(text, 5),
            vec!["What is ownership?", "What is borrowing?"]
        );
    }

    #[test]
    fn inner_identifiers_keep_their_underscores() {
        let text = "1. What does __init__ do?\n2. Why is 2 ** 3 equal to 8?";
        assert_eq!(
            decode_questions(text, 5),
            vec!["What does __init__ do?", "Why is 2 ** 3 equal to 8?"]
        );
    }

    #[test]
    fn object_followed_by_braced_prose_is_accepted() {
        let eval =
            decode_evaluation("{\"feedback\": \"ok\", \"score\": 7}\nTip: wrap code in {} blocks.")
                .unwrap();
        assert_eq!(eval.feedback, "ok");
        assert_eq!(eval.score.value(), 7);
    }

    #[test]
    fn braced_prose_before_object_is_skipped() {
        let eval = decode_evaluation(
            "Using {} as a template:\n{\"feedback\": \"fine\", \"score\": 4, \"improvement\": \"x\"}",
        )
        .unwrap();
        assert_eq!(eval.score.value(), 4);
        assert_eq!(eval.improvement.as_deref(), Some("x"));
    }

    #[test]
    fn prose_without_object_is_rejected() {
        let err = decode_evaluation("Great answer, 9/10!").unwrap_err();
        assert!(matches!(err, DecodeError::MissingObject));
    }

    #[test]
    fn missing_score_is_rejected() {
        let err = decode_evaluation(r#"{"feedback": "ok"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let err = decode_evaluation(r#"{"feedback": "ok", "score": 42}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Score(_)));

        let err = decode_evaluation(r#"{"feedback": "ok", "score": -1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Score(_)));
    }

    #[test]
    fn blank_feedback_is_rejected() {
        let err = decode_evaluation(r#"{"feedback": " ", "score": 3}"#).unwrap_err();
        assert!(matches!(err, DecodeError::EmptyFeedback));
    }
}
