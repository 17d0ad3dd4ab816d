use crate::error::{extract_error_message, QaError};
use crate::models::QuestionRequest;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub const EMPTY_ANSWER_FALLBACK: &str =
    "I received your question but got an empty response. Please try again.";

/// Shape of a question-answering response body. Field variants are probed
/// in order: `answer`, `response`, `message`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerBody {
    StringBody(String),
    ObjectWithAnswer(Value),
    ObjectWithResponse(Value),
    ObjectWithMessage(Value),
    /// An object with none of the known fields, or any other JSON value.
    ObjectOther(Value),
    Empty,
}

impl AnswerBody {
    pub fn parse(body: &str) -> Self {
        if body.trim().is_empty() {
            return AnswerBody::Empty;
        }

        // Bodies that are not JSON at all are plain text answers.
        let value = match serde_json::from_str::<Value>(body) {
            Ok(value) => value,
            Err(_) => return AnswerBody::StringBody(body.to_string()),
        };

        match value {
            Value::Null => AnswerBody::Empty,
            Value::String(text) => AnswerBody::StringBody(text),
            Value::Object(mut map) => {
                if let Some(v) = take_field(&mut map, "answer") {
                    AnswerBody::ObjectWithAnswer(v)
                } else if let Some(v) = take_field(&mut map, "response") {
                    AnswerBody::ObjectWithResponse(v)
                } else if let Some(v) = take_field(&mut map, "message") {
                    AnswerBody::ObjectWithMessage(v)
                } else {
                    AnswerBody::ObjectOther(Value::Object(map))
                }
            }
            other => AnswerBody::ObjectOther(other),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            AnswerBody::StringBody(text) => text,
            AnswerBody::ObjectWithAnswer(v)
            | AnswerBody::ObjectWithResponse(v)
            | AnswerBody::ObjectWithMessage(v) => match v {
                Value::String(text) => text,
                other => other.to_string(),
            },
            AnswerBody::ObjectOther(v) => v.to_string(),
            AnswerBody::Empty => EMPTY_ANSWER_FALLBACK.to_string(),
        }
    }
}

// falsy values (null, "", 0, false) count as absent
fn take_field(map: &mut serde_json::Map<String, Value>, key: &str) -> Option<Value> {
    let present = match map.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    };
    if present {
        map.remove(key)
    } else {
        None
    }
}

pub struct QaService {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl QaService {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub async fn ask(&self, question: &str) -> Result<AnswerBody, QaError> {
        log::info!("Sending question ({} chars) to question-answering endpoint", question.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&QuestionRequest { input: question })
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            log::warn!("Question-answering endpoint returned {}", status);
            return Err(QaError::Status {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        Ok(AnswerBody::parse(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn field_priority_is_answer_response_message() {
        let body = r#"{"message":"m","response":"r","answer":"a"}"#;
        assert_eq!(AnswerBody::parse(body), AnswerBody::ObjectWithAnswer(json!("a")));

        let body = r#"{"message":"m","response":"r"}"#;
        assert_eq!(AnswerBody::parse(body), AnswerBody::ObjectWithResponse(json!("r")));

        let body = r#"{"message":"m","other":1}"#;
        assert_eq!(AnswerBody::parse(body), AnswerBody::ObjectWithMessage(json!("m")));
    }

    #[test]
    fn blank_fields_fall_through() {
        let body = r#"{"answer":"","response":null,"message":"used"}"#;
        assert_eq!(AnswerBody::parse(body).into_text(), "used");
    }

    #[test]
    fn zero_and_false_fall_through() {
        assert_eq!(AnswerBody::parse(r#"{"answer":0,"response":"r"}"#).into_text(), "r");
        assert_eq!(AnswerBody::parse(r#"{"answer":false,"message":"m"}"#).into_text(), "m");
        assert_eq!(AnswerBody::parse(r#"{"answer":0}"#).into_text(), r#"{"answer":0}"#);
        assert_eq!(AnswerBody::parse(r#"{"answer":true}"#).into_text(), "true");
    }

    #[test]
    fn string_bodies_pass_through() {
        assert_eq!(AnswerBody::parse(r#""Paris""#).into_text(), "Paris");
        assert_eq!(AnswerBody::parse("Paris, obviously").into_text(), "Paris, obviously");
    }

    #[test]
    fn unknown_shapes_are_serialized() {
        assert_eq!(AnswerBody::parse("{}").into_text(), "{}");
        assert_eq!(AnswerBody::parse(r#"{"data":[1,2]}"#).into_text(), r#"{"data":[1,2]}"#);
        assert_eq!(AnswerBody::parse("[1,2]").into_text(), "[1,2]");
        assert_eq!(AnswerBody::parse(r#"{"answer":42}"#).into_text(), "42");
    }

    #[test]
    fn empty_and_null_use_fallback() {
        assert_eq!(AnswerBody::parse(""), AnswerBody::Empty);
        assert_eq!(AnswerBody::parse("null"), AnswerBody::Empty);
        assert_eq!(AnswerBody::parse("  ").into_text(), EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn posts_question_as_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"input": "capital?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Paris"})))
            .expect(1)
            .mount(&server)
            .await;

        let service = QaService::new(Client::new(), server.uri(), Duration::from_secs(5));
        let answer = service.ask("capital?").await.unwrap();

        assert_eq!(answer.into_text(), "Paris");
    }

    #[tokio::test]
    async fn non_200_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let service = QaService::new(Client::new(), server.uri(), Duration::from_secs(5));
        let err = service.ask("anything").await.unwrap_err();

        assert_eq!(err.to_string(), "Webhook returned status: 503");
    }
}
