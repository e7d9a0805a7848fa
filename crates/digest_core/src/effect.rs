use crate::{Msg, RawResponse, Topic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Resolve `topic` through the webhook and report back to `target`.
    FetchTopic { topic: Topic, target: FetchTarget },
}

/// Where a fetched response is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    /// A predefined topic button; the response is cached write-once.
    Topic,
    /// The ad-hoc search box; the response always replaces the previous one.
    Search,
}

impl FetchTarget {
    /// Builds the message that feeds a completed fetch back into `update`.
    pub fn completion(self, topic: Topic, raw: RawResponse) -> Msg {
        match self {
            FetchTarget::Topic => Msg::TopicFetched { topic, raw },
            FetchTarget::Search => Msg::SearchFetched { raw },
        }
    }
}
