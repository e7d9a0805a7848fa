use crate::view_model::{DigestViewModel, SearchView, TopicView};
use crate::{default_topics, parse_response, RawResponse, Topic, TopicStore};

/// Lifecycle of a predefined topic panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicPhase {
    #[default]
    Hidden,
    VisiblePending,
    VisibleLoaded,
}

/// Everything one user session knows: topic cache, visibility and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestState {
    topics: Vec<Topic>,
    store: TopicStore,
    search_topic: String,
    search_response: Option<RawResponse>,
    search_visible: bool,
    dirty: bool,
}

impl Default for DigestState {
    fn default() -> Self {
        Self::new(default_topics())
    }
}

impl DigestState {
    pub fn new(topics: Vec<Topic>) -> Self {
        let store = TopicStore::new(&topics);
        Self {
            topics,
            store,
            search_topic: String::new(),
            search_response: None,
            search_visible: false,
            dirty: false,
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn is_known_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|known| known == topic)
    }

    pub fn store(&self) -> &TopicStore {
        &self.store
    }

    pub fn topic_phase(&self, topic: &str) -> TopicPhase {
        match (self.store.is_visible(topic), self.store.has_cached(topic)) {
            (false, _) => TopicPhase::Hidden,
            (true, false) => TopicPhase::VisiblePending,
            (true, true) => TopicPhase::VisibleLoaded,
        }
    }

    pub fn search_topic(&self) -> &str {
        &self.search_topic
    }

    pub fn search_response(&self) -> Option<&str> {
        self.search_response.as_deref()
    }

    pub fn search_visible(&self) -> bool {
        self.search_visible
    }

    pub fn view(&self) -> DigestViewModel {
        let topics = self
            .topics
            .iter()
            .map(|topic| {
                let phase = self.topic_phase(topic);
                let results = match phase {
                    TopicPhase::VisibleLoaded => self.store.cached(topic).map(parse_response),
                    TopicPhase::Hidden | TopicPhase::VisiblePending => None,
                };
                TopicView {
                    topic: topic.clone(),
                    phase,
                    results,
                }
            })
            .collect();

        let search = match self.search_response.as_deref() {
            Some(raw) if self.search_visible && !raw.is_empty() => Some(SearchView {
                topic: self.search_topic.clone(),
                results: parse_response(raw),
            }),
            _ => None,
        };

        DigestViewModel {
            topics,
            search,
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn store_mut(&mut self) -> &mut TopicStore {
        &mut self.store
    }

    pub(crate) fn begin_search(&mut self, topic: String) {
        self.search_topic = topic;
        self.search_visible = true;
    }

    pub(crate) fn set_search_response(&mut self, raw: RawResponse) {
        self.search_response = Some(raw);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
