use digest_logging::{digest_debug, digest_warn};

use crate::{DigestState, Effect, FetchTarget, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DigestState, msg: Msg) -> (DigestState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicPressed(topic) => {
            if !state.is_known_topic(&topic) {
                digest_warn!("Ignoring press for unknown topic '{}'", topic);
                return (state, Vec::new());
            }

            let visible = state.store_mut().toggle_visibility(&topic);
            if !visible || state.store().has_cached(&topic) {
                // Collapse, or expand straight from cache.
                state.mark_dirty();
                Vec::new()
            } else {
                // Dirty is marked once the response arrives.
                vec![Effect::FetchTopic {
                    topic,
                    target: FetchTarget::Topic,
                }]
            }
        }
        Msg::TopicFetched { topic, raw } => {
            if !state.store_mut().set_cached(&topic, raw) {
                return (state, Vec::new());
            }
            if state.store().is_visible(&topic) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchSubmitted(input) => {
            if input.is_empty() {
                digest_debug!("Ignoring empty search submission");
                return (state, Vec::new());
            }
            state.begin_search(input.clone());
            vec![Effect::FetchTopic {
                topic: input,
                target: FetchTarget::Search,
            }]
        }
        Msg::SearchFetched { raw } => {
            state.set_search_response(raw);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}
