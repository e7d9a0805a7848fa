use crate::{RawResponse, Topic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed the toggle button of a predefined topic.
    TopicPressed(Topic),
    /// Webhook call for a predefined topic finished (successfully or not).
    TopicFetched { topic: Topic, raw: RawResponse },
    /// User pressed Search with the current contents of the input box.
    SearchSubmitted(String),
    /// Webhook call for the current search finished.
    SearchFetched { raw: RawResponse },
}
