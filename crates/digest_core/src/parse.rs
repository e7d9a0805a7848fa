use digest_logging::digest_debug;
use serde_json::{Map, Value};

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_DATE: &str = "No Date";
pub const DEFAULT_SUMMARY: &str = "No Summary";
pub const DEFAULT_LINK: &str = "#";

/// One displayable unit of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub title: String,
    pub date: String,
    pub summary: String,
    pub link: String,
}

impl Default for ResultItem {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            date: DEFAULT_DATE.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            link: DEFAULT_LINK.to_string(),
        }
    }
}

impl ResultItem {
    fn from_value(value: &Value) -> Self {
        let fields = value.as_object();
        Self {
            title: display_field(fields, "Title", DEFAULT_TITLE),
            date: display_field(fields, "Date", DEFAULT_DATE),
            summary: display_field(fields, "Summary", DEFAULT_SUMMARY),
            link: display_field(fields, "Link", DEFAULT_LINK),
        }
    }
}

/// Classified webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// A non-empty array of items, in wire order.
    Items(Vec<ResultItem>),
    /// The remote system answered with an object carrying `error`.
    RemoteError(String),
    /// Valid JSON without anything to show.
    Empty,
    /// Not JSON; carries the original raw text for display.
    DecodeError(String),
}

impl ParseResult {
    pub fn label(&self) -> &'static str {
        match self {
            ParseResult::Items(_) => "items",
            ParseResult::RemoteError(_) => "remote-error",
            ParseResult::Empty => "empty",
            ParseResult::DecodeError(_) => "decode-error",
        }
    }
}

/// Decodes raw webhook text, unwrapping at most one level of JSON-in-a-string.
pub fn parse_response(raw: &str) -> ParseResult {
    let value = match decode(raw) {
        Ok(value) => value,
        Err(err) => {
            digest_debug!("Response is not valid JSON ({} bytes): {}", raw.len(), err);
            return ParseResult::DecodeError(raw.to_string());
        }
    };
    let result = classify(value);
    digest_debug!("Response classified as {}", result.label());
    result
}

fn decode(raw: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str::<Value>(raw)? {
        Value::String(inner) => serde_json::from_str(&inner),
        value => Ok(value),
    }
}

fn classify(value: Value) -> ParseResult {
    match value {
        Value::Array(elements) if !elements.is_empty() => {
            ParseResult::Items(elements.iter().map(ResultItem::from_value).collect())
        }
        Value::Object(fields) => match fields.get("error") {
            Some(Value::String(message)) => ParseResult::RemoteError(message.clone()),
            Some(other) => ParseResult::RemoteError(other.to_string()),
            None => ParseResult::Empty,
        },
        _ => ParseResult::Empty,
    }
}

// Non-string values are shown as their JSON text.
fn display_field(fields: Option<&Map<String, Value>>, key: &str, default: &str) -> String {
    match fields.and_then(|fields| fields.get(key)) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
