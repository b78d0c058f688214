//! Prompt construction for the hosted model.

use samara_model::CellValue;
use serde::{Deserialize, Serialize};

use crate::matcher::AnalysisRequest;

const SYSTEM_PROMPT: &str = "You are a data analyst who matches columns between two \
spreadsheets so they can be merged. Reply with exactly one fenced ```json code block \
and no other text.";

const RESPONSE_SHAPE: &str = r#"{
  "mappings": [
    {"sourceColumn": "<left header>", "targetColumn": "<right header>", "confidence": 0.0, "reasoning": "<why>"}
  ],
  "unmatchedLeft": ["<left header>"],
  "unmatchedRight": ["<right header>"],
  "suggestions": ["<advice for the user>"],
  "mergeStrategy": "inner | left | right | outer"
}"#;

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Messages for one completion; the client adds model and sampling options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Builds the system/user prompt pair for an analysis.
pub fn build_chat_request(request: &AnalysisRequest<'_>, sample_rows: usize) -> ChatRequest {
    let mut user = String::new();
    user.push_str("Match the columns of the LEFT sheet to the columns of the RIGHT sheet.\n");
    user.push_str("Each right column may be used at most once. Only map columns that hold the same kind of data.\n\n");

    user.push_str("LEFT headers: ");
    user.push_str(&json_list(request.source_headers));
    user.push('\n');
    push_samples(&mut user, "LEFT", request.source_sample, sample_rows);

    user.push_str("\nRIGHT headers: ");
    user.push_str(&json_list(request.target_headers));
    user.push('\n');
    push_samples(&mut user, "RIGHT", request.target_sample, sample_rows);

    user.push_str("\nRespond with a ```json block of this shape:\n");
    user.push_str(RESPONSE_SHAPE);
    user.push('\n');

    ChatRequest {
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)],
    }
}

fn push_samples(out: &mut String, side: &str, rows: &[Vec<CellValue>], limit: usize) {
    let rows = &rows[..rows.len().min(limit)];
    if rows.is_empty() {
        return;
    }
    out.push_str(&format!("{side} sample rows:\n"));
    for row in rows {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        out.push_str(&json_list(&cells));
        out.push('\n');
    }
}

fn json_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| format!("{values:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn prompt_carries_headers_and_limited_samples() {
        let left = strings(&["Name", "Email"]);
        let right = strings(&["Full Name"]);
        let left_rows: Vec<Vec<CellValue>> = (0..5)
            .map(|i| vec![CellValue::text(format!("row{i}")), CellValue::Empty])
            .collect();
        let request = AnalysisRequest {
            source_headers: &left,
            target_headers: &right,
            source_sample: &left_rows,
            target_sample: &[],
        };
        let chat = build_chat_request(&request, 3);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        let user = &chat.messages[1].content;
        assert!(user.contains(r#"LEFT headers: ["Name","Email"]"#));
        assert!(user.contains(r#"RIGHT headers: ["Full Name"]"#));
        assert!(user.contains("row2"));
        assert!(!user.contains("row3"));
        assert!(!user.contains("RIGHT sample rows"));
        assert!(user.contains("mergeStrategy"));
    }
}
