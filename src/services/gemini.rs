use serde::{Deserialize, Serialize};

/// The unpersisted snippet skeleton the AI endpoint returns. The model is
/// asked for all seven fields; `framework` and `tags` default when it omits
/// them, the rest are required for a parse to count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetDraft {
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub framework: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("gemini request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("gemini returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("gemini response carried no candidate text")]
    Empty,
    #[error("no snippet object recoverable from model output")]
    Parse,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini `generateContent` REST API.
///
/// No request timeout is configured: a hung upstream call blocks its request
/// until the hosting environment cuts it off.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Turn a free-text prompt into a structured snippet draft.
    pub async fn generate(&self, prompt: &str) -> Result<SnippetDraft, GenerationError> {
        let url = format!("{}/v1beta/models/gemini-pro:generateContent", self.base_url);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(prompt) }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status));
        }

        let decoded: GenerateContentResponse = response.json().await?;
        let text = candidate_text(decoded).ok_or(GenerationError::Empty)?;

        let mut draft = recover_draft(&text)?;
        draft.code = unescape_code(&draft.code);
        Ok(draft)
    }
}

fn candidate_text(response: GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect();
    (!text.is_empty()).then_some(text)
}

/// Two-stage recovery: strict parse of the whole text, then a best-effort
/// fallback over the greedy `{...}` span (first `{` to last `}`). The span
/// is not balance-checked, so a response holding several JSON-like fragments
/// usually yields an unparsable slice and fails here.
fn recover_draft(text: &str) -> Result<SnippetDraft, GenerationError> {
    if let Ok(draft) = serde_json::from_str(text) {
        return Ok(draft);
    }

    let start = text.find('{').ok_or(GenerationError::Parse)?;
    let end = text.rfind('}').ok_or(GenerationError::Parse)?;
    if end < start {
        return Err(GenerationError::Parse);
    }

    serde_json::from_str(&text[start..=end]).map_err(|_| GenerationError::Parse)
}

/// Undo the escaping the instructions demand for the `code` field. The
/// backslash pair must be unescaped last: doing it first would turn
/// `\\n` into `\n` and then into a newline, corrupting the literal.
fn unescape_code(code: &str) -> String {
    code.replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}

fn build_prompt(user_prompt: &str) -> String {
    format!("{PROMPT_HEAD}\"{user_prompt}\"{PROMPT_TAIL}")
}

const PROMPT_HEAD: &str =
    "You are a code snippet generator. Generate a code snippet based on this request: ";

const PROMPT_TAIL: &str = r#"

Important: Your response must be a valid JSON object and nothing else. Use this exact format, and make sure to properly escape the code:
{
  "title": "A clear, concise title",
  "description": "A detailed description of what the code does and how to use it",
  "code": "// Your code here\n// Use double backslashes for newlines\n// Example:\nfunction example() {\n  console.log('hello');\n}",
  "language": "One of: JavaScript, TypeScript, Python, Java, C++, Ruby, Go, Rust, PHP, Swift",
  "framework": "One of: React, Vue, Angular, Next.js, Nuxt, Svelte, Express, Django, Spring, Laravel (or empty if none)",
  "category": "One of: Utility Functions, Components, Hooks, Algorithms, Data Structures, API, Database, Authentication, Testing, DevOps",
  "tags": ["relevant", "tags", "max 5"]
}

Rules:
1. Response must be ONLY the JSON object, no other text
2. Code must be properly escaped:
   - Use \n for newlines
   - Use \" for quotes
   - Use \\ for backslashes
3. Include error handling where appropriate
4. Language must match one from the list above
5. Framework should only be included if actually used
6. Maximum 5 relevant tags
7. Code should include comments and proper formatting"#;

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT_JSON: &str = r#"{
        "title": "Debounce",
        "description": "Delays a callback until input settles",
        "code": "function debounce() {}",
        "language": "JavaScript",
        "framework": "",
        "category": "Utility Functions",
        "tags": ["debounce"]
    }"#;

    #[test]
    fn pure_json_parses_on_the_primary_path() {
        let draft = recover_draft(DRAFT_JSON).unwrap();
        assert_eq!(draft.title, "Debounce");
        assert_eq!(draft.language, "JavaScript");
    }

    #[test]
    fn prose_wrapped_json_recovers_via_the_span_fallback() {
        let text = format!("Here is your snippet:\n{DRAFT_JSON}\nEnjoy!");
        let draft = recover_draft(&text).unwrap();
        assert_eq!(draft.title, "Debounce");
    }

    #[test]
    fn text_without_braces_fails() {
        let err = recover_draft("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, GenerationError::Parse));
    }

    #[test]
    fn missing_required_field_fails() {
        let err = recover_draft(r#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Parse));
    }

    #[test]
    fn omitted_framework_and_tags_default() {
        let draft = recover_draft(
            r#"{"title":"t","description":"d","code":"c","language":"Go","category":"API"}"#,
        )
        .unwrap();
        assert_eq!(draft.framework, "");
        assert!(draft.tags.is_empty());
    }

    // The greedy span has no balance check: two objects in one response
    // produce a slice spanning both, which does not parse.
    #[test]
    fn multiple_objects_defeat_the_greedy_span() {
        let text = format!("{DRAFT_JSON} or maybe {DRAFT_JSON}");
        let err = recover_draft(&text).unwrap_err();
        assert!(matches!(err, GenerationError::Parse));
    }

    #[test]
    fn unescapes_the_backslash_pair_last() {
        // a, backslash, backslash, n, b: the trailing `\n` becomes a newline
        // and the leading backslash survives as itself.
        assert_eq!(unescape_code(r"a\\nb"), "a\\\nb");
    }

    #[test]
    fn unescapes_all_three_kinds_in_fixed_order() {
        let source = r#"line1\nline2 say \"hi\" path C:\\dir"#;
        assert_eq!(unescape_code(source), "line1\nline2 say \"hi\" path C:\\dir");
    }

    #[test]
    fn code_without_escapes_passes_through() {
        assert_eq!(unescape_code("let x = 1;"), "let x = 1;");
    }

    #[test]
    fn prompt_embeds_the_request_and_the_escaping_rules() {
        let prompt = build_prompt("a debounce helper");
        assert!(prompt.contains("\"a debounce helper\""));
        assert!(prompt.contains("Use \\n for newlines"));
        assert!(prompt.contains("Maximum 5 relevant tags"));
    }
}
