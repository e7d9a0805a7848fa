use crate::{ParseResult, Topic, TopicPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigestViewModel {
    /// One entry per predefined topic, in button order.
    pub topics: Vec<TopicView>,
    /// Present only when search is visible and has a non-empty response.
    pub search: Option<SearchView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicView {
    pub topic: Topic,
    pub phase: TopicPhase,
    /// Parsed results; only set while the topic is visible and loaded.
    pub results: Option<ParseResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub topic: String,
    pub results: ParseResult,
}
