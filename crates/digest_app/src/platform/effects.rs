use std::collections::VecDeque;
use std::sync::Arc;

use digest_core::{update, DigestState, Effect, Msg};
use digest_engine::TopicSource;
use digest_logging::digest_debug;

/// Drives `update` and executes the effects it returns.
pub struct EffectRunner {
    source: Arc<dyn TopicSource>,
}

impl EffectRunner {
    pub fn new(source: Arc<dyn TopicSource>) -> Self {
        Self { source }
    }

    /// Applies `msg` and every follow-up message its effects produce.
    /// Fetches are awaited one at a time. Returns whether the view changed.
    pub async fn dispatch(&self, state: &mut DigestState, msg: Msg) -> bool {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(std::mem::take(state), msg);
            *state = next;
            for effect in effects {
                inbox.push_back(self.run(effect).await);
            }
        }
        let was_dirty = state.consume_dirty();
        digest_debug!(
            "Dispatch finished: dirty={} cached_topics={}",
            was_dirty,
            state.store().cached_count()
        );
        was_dirty
    }

    async fn run(&self, effect: Effect) -> Msg {
        match effect {
            Effect::FetchTopic { topic, target } => {
                let raw = self.source.fetch_topic(&topic).await;
                target.completion(topic, raw)
            }
        }
    }
}
