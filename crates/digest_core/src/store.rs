use std::collections::BTreeMap;

use digest_logging::digest_debug;

use crate::{RawResponse, Topic};

/// Per-session cache of topic responses plus the topic visibility flags.
///
/// Cached responses are write-once: the first response stored for a topic
/// stays for the lifetime of the session, including synthesized error text
/// from a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicStore {
    responses: BTreeMap<Topic, RawResponse>,
    visibility: BTreeMap<Topic, bool>,
}

impl TopicStore {
    /// Creates a store where every topic in `topics` starts hidden.
    pub fn new(topics: &[Topic]) -> Self {
        Self {
            responses: BTreeMap::new(),
            visibility: topics.iter().map(|topic| (topic.clone(), false)).collect(),
        }
    }

    pub fn has_cached(&self, topic: &str) -> bool {
        self.responses.contains_key(topic)
    }

    pub fn cached(&self, topic: &str) -> Option<&str> {
        self.responses.get(topic).map(String::as_str)
    }

    /// Stores `raw` unless the topic already has a response. Returns whether it was written.
    pub fn set_cached(&mut self, topic: &str, raw: RawResponse) -> bool {
        if self.responses.contains_key(topic) {
            digest_debug!("Ignoring second response for cached topic '{}'", topic);
            return false;
        }
        self.responses.insert(topic.to_string(), raw);
        true
    }

    /// Flips visibility (absent counts as hidden) and returns the new value.
    pub fn toggle_visibility(&mut self, topic: &str) -> bool {
        let flag = self.visibility.entry(topic.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_visible(&self, topic: &str) -> bool {
        self.visibility.get(topic).copied().unwrap_or(false)
    }

    pub fn cached_count(&self) -> usize {
        self.responses.len()
    }
}
