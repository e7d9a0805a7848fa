//! Digest engine: webhook and background asset IO.
mod background;
mod types;
mod webhook;

pub use background::fetch_background;
pub use types::{
    Background, ClientError, FailureKind, FetchError, FetchSettings, Severity,
};
pub use webhook::{TopicSource, WebhookClient};
