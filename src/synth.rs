use std::fmt;

use serde::Deserialize;

use crate::model::{Question, now_millis};

/// Hosted model used for question synthesis.
const SYNTH_MODEL: &str = "gemini-3-flash-preview";

/// Shortest source text worth sending to the model; anything shorter is
/// rejected before any network traffic.
pub const MIN_SOURCE_CHARS: usize = 50;

/// The source is cut here before the call to keep the prompt within limits.
const MAX_SOURCE_CHARS: usize = 15_000;

/// How many questions a synthesis asks for by default.
pub const DEFAULT_QUESTION_COUNT: usize = 25;

#[derive(Debug, Clone)]
pub struct SynthRequest {
    pub source_text: String,
    pub title: String,
    pub desired_count: usize,
}

/// Every way a synthesis can fail, each with its own user-facing message.
/// Raw transport or parser errors never reach the UI verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthError {
    SourceTooShort,
    Unauthorized,
    Http(u16),
    Transport(String),
    Malformed(String),
    Empty,
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::SourceTooShort => write!(
                f,
                "Source content is too brief to generate a quality quiz. Please provide more text."
            ),
            SynthError::Unauthorized => write!(
                f,
                "AI service authorization failed. Check the configured API key."
            ),
            SynthError::Http(status) => write!(f, "AI service returned HTTP {status}."),
            SynthError::Transport(msg) => write!(f, "Could not reach the AI service: {msg}"),
            SynthError::Malformed(msg) => {
                write!(f, "AI response was not a usable question list: {msg}")
            }
            SynthError::Empty => write!(
                f,
                "The AI produced no usable questions for this content."
            ),
        }
    }
}

impl std::error::Error for SynthError {}

/// The synthesis backend behind the admin flow. `Gemini` talks to the
/// hosted model; `Offline` is a deterministic local generator so the flow
/// stays usable without network access or a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthProvider {
    Gemini { api_key: String },
    Offline,
}

impl SynthProvider {
    /// A configured API key selects the hosted model, otherwise the offline
    /// generator.
    pub fn from_env() -> Self {
        match resolve_api_key() {
            Some(api_key) => SynthProvider::Gemini { api_key },
            None => SynthProvider::Offline,
        }
    }

    /// Runs one synthesis call to completion. At most one call should be in
    /// flight at a time; the caller enforces that.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn synthesize(&self, req: &SynthRequest) -> Result<Vec<Question>, SynthError> {
        validate(req)?;
        match self {
            SynthProvider::Offline => Ok(synthesize_offline(req)),
            SynthProvider::Gemini { api_key } => synthesize_gemini_blocking(api_key, req),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn synthesize(&self, req: &SynthRequest) -> Result<Vec<Question>, SynthError> {
        validate(req)?;
        match self {
            SynthProvider::Offline => Ok(synthesize_offline(req)),
            SynthProvider::Gemini { api_key } => synthesize_gemini_fetch(api_key, req).await,
        }
    }
}

fn validate(req: &SynthRequest) -> Result<(), SynthError> {
    if req.source_text.trim().chars().count() < MIN_SOURCE_CHARS {
        return Err(SynthError::SourceTooShort);
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn resolve_api_key() -> Option<String> {
    fn normalize(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn key_from_local_storage() -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let value = storage.get_item("gemini_api_key").ok()??;
        normalize(&value)
    }

    option_env!("GEMINI_API_KEY")
        .and_then(normalize)
        .or_else(key_from_local_storage)
}

fn endpoint_url() -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{SYNTH_MODEL}:generateContent")
}

/// Cuts the source at a char boundary; Hindi text makes byte slicing unsafe.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn build_prompt(req: &SynthRequest) -> String {
    format!(
        "You are a professional ITI examiner. Create a comprehensive MCQ quiz based on the \
         following content titled \"{}\".\n\
         Generate exactly {} questions.\n\
         Format: Each question and option must be bilingual (English / Hindi).\n\
         Source Content: {}",
        req.title,
        req.desired_count,
        truncate_chars(&req.source_text, MAX_SOURCE_CHARS),
    )
}

/// The fixed output schema the model is constrained to: an array of
/// four-option questions with one correct index.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "text": {
                    "type": "STRING",
                    "description": "The question text, bilingual in English and Hindi if possible."
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Exactly 4 options, bilingual."
                },
                "correctAnswerIndex": {
                    "type": "INTEGER",
                    "description": "Index of the correct option (0-3)."
                }
            },
            "required": ["text", "options", "correctAnswerIndex"]
        }
    })
}

fn build_body(req: &SynthRequest) -> serde_json::Value {
    serde_json::json!({
        "contents": [{ "parts": [{ "text": build_prompt(req) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    })
}

/// One question as the gateway returns it, before ids are assigned.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    options: Vec<String>,
    #[serde(rename = "correctAnswerIndex")]
    correct_answer_index: usize,
}

/// Digs the generated text out of a `generateContent` response envelope.
fn extract_text(value: &serde_json::Value) -> Result<String, SynthError> {
    value
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_owned)
        .ok_or_else(|| SynthError::Malformed("no candidate text in the response".into()))
}

/// Parses the model payload, drops questions the app cannot present (wrong
/// option count, out-of-range answer, blank text) and assigns fresh ids.
/// Fewer questions than asked for is fine; none at all is an error.
fn parse_payload(text: &str) -> Result<Vec<Question>, SynthError> {
    let raw: Vec<RawQuestion> =
        serde_json::from_str(text).map_err(|e| SynthError::Malformed(e.to_string()))?;
    if raw.is_empty() {
        return Err(SynthError::Empty);
    }

    let stamp = now_millis();
    let questions: Vec<Question> = raw
        .into_iter()
        .filter(|q| {
            q.options.len() == 4 && q.correct_answer_index < 4 && !q.text.trim().is_empty()
        })
        .enumerate()
        .map(|(i, q)| Question {
            id: format!("ai-q-{stamp}-{i}"),
            text: q.text,
            options: q.options,
            correct_answer_index: q.correct_answer_index,
        })
        .collect();

    if questions.is_empty() {
        return Err(SynthError::Empty);
    }
    Ok(questions)
}

#[cfg(not(target_arch = "wasm32"))]
fn synthesize_gemini_blocking(
    api_key: &str,
    req: &SynthRequest,
) -> Result<Vec<Question>, SynthError> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .post(endpoint_url())
        .header("x-goog-api-key", api_key)
        .json(&build_body(req))
        .send()
        .map_err(|e| SynthError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    if status == 401 || status == 403 {
        return Err(SynthError::Unauthorized);
    }
    if !response.status().is_success() {
        return Err(SynthError::Http(status));
    }

    let envelope: serde_json::Value = response
        .json()
        .map_err(|e| SynthError::Malformed(e.to_string()))?;
    parse_payload(&extract_text(&envelope)?)
}

#[cfg(target_arch = "wasm32")]
async fn synthesize_gemini_fetch(
    api_key: &str,
    req: &SynthRequest,
) -> Result<Vec<Question>, SynthError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let payload = serde_json::to_string(&build_body(req))
        .map_err(|e| SynthError::Malformed(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&payload));

    let request = Request::new_with_str_and_init(&endpoint_url(), &opts)
        .map_err(|e| SynthError::Transport(format!("{e:?}")))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| SynthError::Transport(format!("{e:?}")))?;
    request
        .headers()
        .set("x-goog-api-key", api_key)
        .map_err(|e| SynthError::Transport(format!("{e:?}")))?;

    let window =
        web_sys::window().ok_or_else(|| SynthError::Transport("no window in this context".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| SynthError::Transport(format!("{e:?}")))?;
    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| SynthError::Transport("fetch did not return a Response".into()))?;

    let status = response.status();
    if status == 401 || status == 403 {
        return Err(SynthError::Unauthorized);
    }

    let text_promise = response
        .text()
        .map_err(|e| SynthError::Transport(format!("{e:?}")))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| SynthError::Transport(format!("{e:?}")))?
        .as_string()
        .ok_or_else(|| SynthError::Transport("response body was not text".into()))?;

    if !response.ok() {
        return Err(SynthError::Http(status));
    }

    let envelope: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| SynthError::Malformed(e.to_string()))?;
    parse_payload(&extract_text(&envelope)?)
}

/// Deterministic fallback generator: turns the longest sentences of the
/// source into fill-in-the-blank questions, hiding each sentence's longest
/// word among distractors drawn from the rest of the text. Keeps the admin
/// flow demonstrable offline; not a substitute for the hosted model.
pub fn synthesize_offline(req: &SynthRequest) -> Vec<Question> {
    let stamp = now_millis();

    let sentences: Vec<&str> = req
        .source_text
        .split(['.', '?', '!', '।', '\n'])
        .map(str::trim)
        .filter(|s| s.split_whitespace().count() >= 4)
        .take(req.desired_count.max(1))
        .collect();

    // Distractor pool: distinct longer words from the whole source.
    let mut pool: Vec<&str> = Vec::new();
    for word in req.source_text.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        if word.chars().count() >= 4 && !pool.contains(&word) {
            pool.push(word);
        }
    }

    sentences
        .iter()
        .enumerate()
        .filter_map(|(i, sentence)| {
            let answer = sentence
                .split_whitespace()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
                .max_by_key(|w| w.chars().count())?;
            if answer.is_empty() {
                return None;
            }

            let blanked = sentence.replacen(answer, "_____", 1);
            let candidates: Vec<&str> = pool.iter().copied().filter(|w| *w != answer).collect();
            let mut distractors: Vec<String> = (0..candidates.len().min(3))
                .map(|k| candidates[(i * 3 + k) % candidates.len()].to_string())
                .collect();
            while distractors.len() < 3 {
                distractors.push(format!("Option {}", distractors.len() + 2));
            }

            let correct_answer_index = i % 4;
            let mut options = distractors;
            options.insert(correct_answer_index, answer.to_string());

            Some(Question {
                id: format!("ai-q-{stamp}-{i}"),
                text: format!("Complete the statement: {blanked}"),
                options,
                correct_answer_index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(source: &str) -> SynthRequest {
        SynthRequest {
            source_text: source.to_string(),
            title: "Unit practice".to_string(),
            desired_count: 5,
        }
    }

    const LONG_SOURCE: &str = "Industrial robots are programmable manipulators used for \
        welding, painting and assembly. A teach pendant lets the operator jog each joint \
        of the robot safely. Coordinate systems define how the tool frame moves through \
        the work cell. Preventive maintenance keeps the robotic cell healthy over time.";

    #[test]
    fn short_source_is_rejected_before_any_call() {
        let err = validate(&request("too short")).unwrap_err();
        assert_eq!(err, SynthError::SourceTooShort);
        assert!(validate(&request(LONG_SOURCE)).is_ok());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let hindi = "सुरक्षा ".repeat(40);
        let cut = truncate_chars(&hindi, 10);
        assert_eq!(cut.chars().count(), 10);
        // Must not panic on multi-byte boundaries and must keep whole chars.
        assert!(hindi.starts_with(cut));
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn prompt_embeds_title_and_count() {
        let prompt = build_prompt(&request(LONG_SOURCE));
        assert!(prompt.contains("\"Unit practice\""));
        assert!(prompt.contains("exactly 5 questions"));
    }

    #[test]
    fn payload_parsing_assigns_ids_and_drops_broken_questions() {
        let payload = r#"[
            {"text": "Good / अच्छा", "options": ["a","b","c","d"], "correctAnswerIndex": 2},
            {"text": "Too few options", "options": ["a","b"], "correctAnswerIndex": 0},
            {"text": "Bad index", "options": ["a","b","c","d"], "correctAnswerIndex": 7},
            {"text": "  ", "options": ["a","b","c","d"], "correctAnswerIndex": 0}
        ]"#;
        let questions = parse_payload(payload).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Good / अच्छा");
        assert_eq!(questions[0].correct_answer_index, 2);
        assert!(questions[0].id.starts_with("ai-q-"));
    }

    #[test]
    fn malformed_and_empty_payloads_fail_distinctly() {
        assert!(matches!(
            parse_payload("{\"not\": \"an array\"}"),
            Err(SynthError::Malformed(_))
        ));
        assert_eq!(parse_payload("[]").unwrap_err(), SynthError::Empty);
        // All entries broken is as useless as none at all.
        let all_broken = r#"[{"text": "x", "options": ["a"], "correctAnswerIndex": 0}]"#;
        assert_eq!(parse_payload(all_broken).unwrap_err(), SynthError::Empty);
    }

    #[test]
    fn envelope_text_extraction_matches_the_wire_shape() {
        let envelope = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "[{\"x\":1}]" } ] } }
            ]
        });
        assert_eq!(extract_text(&envelope).unwrap(), "[{\"x\":1}]");
        assert!(matches!(
            extract_text(&serde_json::json!({"candidates": []})),
            Err(SynthError::Malformed(_))
        ));
    }

    #[test]
    fn offline_generator_is_deterministic_and_well_formed() {
        let req = request(LONG_SOURCE);
        let first = synthesize_offline(&req);
        let second = synthesize_offline(&req);
        assert!(!first.is_empty());
        assert!(first.len() <= req.desired_count);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.options, b.options);
            assert_eq!(a.correct_answer_index, b.correct_answer_index);
        }
        for q in &first {
            assert_eq!(q.options.len(), 4);
            assert!(q.correct_answer_index < 4);
            assert!(q.text.contains("_____"));
        }
    }

    #[test]
    fn offline_provider_round_trips_through_the_interface() {
        let provider = SynthProvider::Offline;
        let questions = provider.synthesize(&request(LONG_SOURCE)).unwrap();
        assert!(!questions.is_empty());
        assert_eq!(
            provider.synthesize(&request("tiny")).unwrap_err(),
            SynthError::SourceTooShort
        );
    }
}
