//! Parsing a `/bfhl` body into exactly one operation, and running it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::ai::{self, AiError, RETRY_MESSAGE};
use crate::error::RequestError;
use crate::math;
use crate::AppState;

pub const ALLOWED_KEYS: [&str; 5] = ["fibonacci", "prime", "lcm", "hcf", "AI"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Fibonacci(u64),
    Prime(Vec<i64>),
    Lcm(Vec<i64>),
    Hcf(Vec<i64>),
    Ai(String),
}

/// The `data` field of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Sequence(Vec<u64>),
    Numbers(Vec<i64>),
    Number(i64),
    Text(String),
}

impl Operation {
    pub fn from_body(body: Map<String, Value>) -> Result<Self, RequestError> {
        if body.len() > 1 {
            let keys: Vec<&str> = body.keys().map(String::as_str).collect();
            return Err(RequestError::validation(format!(
                "Must have exactly ONE key. Found: {}",
                keys.join(", ")
            )));
        }

        let Some((key, value)) = body.into_iter().next() else {
            return Err(RequestError::validation("Request body is empty"));
        };

        match key.as_str() {
            "fibonacci" => parse_count(&value).map(Self::Fibonacci),
            "prime" => parse_array(&value)
                .map(integers)
                .map(Self::Prime)
                .ok_or_else(|| RequestError::validation("Prime input must be an array")),
            "lcm" => parse_non_empty_array(&value, "LCM").map(|values| Self::Lcm(integers(values))),
            "hcf" => parse_non_empty_array(&value, "HCF").map(|values| Self::Hcf(integers(values))),
            "AI" => parse_question(value).map(Self::Ai),
            _ => Err(RequestError::validation(format!(
                "Invalid key: \"{key}\". Must be one of: {}",
                ALLOWED_KEYS.join(", ")
            ))),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Fibonacci(_) => "fibonacci",
            Self::Prime(_) => "prime",
            Self::Lcm(_) => "lcm",
            Self::Hcf(_) => "hcf",
            Self::Ai(_) => "AI",
        }
    }

    pub async fn execute(self, state: &AppState) -> Result<OperationOutput, RequestError> {
        match self {
            Self::Fibonacci(n) => Ok(OperationOutput::Sequence(math::fibonacci(n)?)),
            // trial division on large elements can take seconds
            Self::Prime(values) => tokio::task::spawn_blocking(move || math::primes(&values))
                .await
                .map(OperationOutput::Numbers)
                .map_err(|err| {
                    tracing::error!(error = %err, "Prime filter task failed");
                    RequestError::Execution("Prime filter failed".to_string())
                }),
            Self::Lcm(values) => Ok(OperationOutput::Number(math::lcm(&values)?)),
            Self::Hcf(values) => Ok(OperationOutput::Number(math::hcf(&values)?)),
            Self::Ai(question) => {
                let client = state
                    .ai
                    .as_deref()
                    .ok_or_else(|| RequestError::Execution(AiError::NotConfigured.to_string()))?;

                match ai::ask(client, &question).await {
                    Ok(answer) => Ok(OperationOutput::Text(answer)),
                    Err(err) => {
                        tracing::error!(error = %err, "Gemini completion failed");
                        Err(RequestError::Execution(RETRY_MESSAGE.to_string()))
                    }
                }
            }
        }
    }
}

/// A JSON number with no fractional part that fits in an `i64`.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if value.is_u64() {
        return None;
    }
    let f = value.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn integers(values: &[Value]) -> Vec<i64> {
    values.iter().filter_map(as_integer).collect()
}

fn parse_count(value: &Value) -> Result<u64, RequestError> {
    as_integer(value)
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| RequestError::validation("Fibonacci input must be a non-negative integer"))
}

fn parse_array(value: &Value) -> Option<&[Value]> {
    value.as_array().map(Vec::as_slice)
}

fn parse_non_empty_array<'a>(
    value: &'a Value,
    label: &str,
) -> Result<&'a [Value], RequestError> {
    parse_array(value)
        .filter(|values| !values.is_empty())
        .ok_or_else(|| RequestError::validation(format!("{label} input must be a non-empty array")))
}

fn parse_question(value: Value) -> Result<String, RequestError> {
    match value {
        Value::String(question) if !question.trim().is_empty() => Ok(question),
        _ => Err(RequestError::validation("AI input must be a non-empty string")),
    }
}
