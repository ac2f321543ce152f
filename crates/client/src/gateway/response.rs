//! Provider reply types and summary extraction.

use super::GatewayError;
use gist_core::config::Provider;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OpenAiReply {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeReply {
    #[serde(default)]
    content: Vec<ClaudeBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiReply {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

/// Pull the summary text out of a provider reply body.
pub fn extract_summary(provider: Provider, body: &[u8]) -> Result<String, GatewayError> {
    let parse_err = |e: serde_json::Error| GatewayError::MalformedResponse(e.to_string());

    let text = match provider {
        Provider::OpenAi => {
            let reply: OpenAiReply = serde_json::from_slice(body).map_err(parse_err)?;
            reply
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message)
                .and_then(|m| m.content)
        }
        Provider::Claude => {
            let reply: ClaudeReply = serde_json::from_slice(body).map_err(parse_err)?;
            reply.content.into_iter().find_map(|b| b.text)
        }
        Provider::Gemini => {
            let reply: GeminiReply = serde_json::from_slice(body).map_err(parse_err)?;
            reply
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        }
    };

    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GatewayError::MalformedResponse(format!("{provider} reply contained no summary text")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_reply() {
        let body = br#"{"choices":[{"message":{"role":"assistant","content":" A short summary. "}}]}"#;
        assert_eq!(extract_summary(Provider::OpenAi, body).unwrap(), "A short summary.");
    }

    #[test]
    fn test_claude_reply() {
        let body = br#"{"content":[{"type":"text","text":"Claude summary"}],"stop_reason":"end_turn"}"#;
        assert_eq!(extract_summary(Provider::Claude, body).unwrap(), "Claude summary");
    }

    #[test]
    fn test_gemini_reply() {
        let body = br#"{"candidates":[{"content":{"parts":[{"text":"Gemini summary"}],"role":"model"}}]}"#;
        assert_eq!(extract_summary(Provider::Gemini, body).unwrap(), "Gemini summary");
    }

    #[test]
    fn test_reply_without_text() {
        let result = extract_summary(Provider::OpenAi, br#"{"choices":[]}"#);
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));

        let result = extract_summary(Provider::Claude, br#"{"content":[{"type":"text","text":"   "}]}"#);
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    }

    #[test]
    fn test_reply_not_json() {
        let result = extract_summary(Provider::Gemini, b"<html>502</html>");
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    }
}
