//! Digest core: pure state machine, response parsing and view-model helpers.
mod effect;
mod msg;
mod parse;
mod state;
mod store;
mod topics;
mod update;
mod view_model;

pub use effect::{Effect, FetchTarget};
pub use msg::Msg;
pub use parse::{
    parse_response, ParseResult, ResultItem, DEFAULT_DATE, DEFAULT_LINK, DEFAULT_SUMMARY,
    DEFAULT_TITLE,
};
pub use state::{DigestState, TopicPhase};
pub use store::TopicStore;
pub use topics::{default_topics, RawResponse, Topic, DEFAULT_TOPICS};
pub use update::update;
pub use view_model::{DigestViewModel, SearchView, TopicView};
