use std::sync::Once;

use digest_core::{update, DigestState, Effect, FetchTarget, Msg, ParseResult, SearchView};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(digest_logging::initialize_for_tests);
}

fn search(state: DigestState, input: &str) -> (DigestState, Vec<Effect>) {
    update(state, Msg::SearchSubmitted(input.to_string()))
}

fn search_fetched(state: DigestState, raw: &str) -> DigestState {
    let (state, effects) = update(
        state,
        Msg::SearchFetched {
            raw: raw.to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

fn search_effect(input: &str) -> Effect {
    Effect::FetchTopic {
        topic: input.to_string(),
        target: FetchTarget::Search,
    }
}

#[test]
fn empty_search_is_a_noop() {
    init_logging();
    let state = DigestState::default();
    let (next, effects) = search(state.clone(), "");

    assert_eq!(next, state);
    assert!(!next.search_visible());
    assert!(effects.is_empty());
}

#[test]
fn empty_search_keeps_previous_results_visible() {
    init_logging();
    let (state, _) = search(DigestState::default(), "rugby");
    let state = search_fetched(state, "[]");
    let (next, effects) = search(state.clone(), "");

    assert_eq!(next, state);
    assert!(next.search_visible());
    assert!(effects.is_empty());
}

#[test]
fn search_sets_topic_and_requests_fetch() {
    init_logging();
    let (state, effects) = search(DigestState::default(), "AI in cricket");

    assert_eq!(effects, vec![search_effect("AI in cricket")]);
    assert_eq!(state.search_topic(), "AI in cricket");
    assert!(state.search_visible());
    assert_eq!(state.search_response(), None);
    assert!(state.view().search.is_none());
}

#[test]
fn repeated_search_fetches_again_and_overwrites() {
    init_logging();
    let mut fetches = 0;

    let (state, effects) = search(DigestState::default(), "tennis");
    fetches += effects.len();
    let state = search_fetched(state, r#"{"error":"first"}"#);

    let (state, effects) = search(state, "tennis");
    fetches += effects.len();
    let mut state = search_fetched(state, r#"{"error":"second"}"#);

    assert_eq!(fetches, 2);
    assert_eq!(state.search_response(), Some(r#"{"error":"second"}"#));
    assert!(state.consume_dirty());
    assert_eq!(
        state.view().search,
        Some(SearchView {
            topic: "tennis".to_string(),
            results: ParseResult::RemoteError("second".to_string()),
        })
    );
}

#[test]
fn empty_response_body_renders_nothing() {
    init_logging();
    let (state, _) = search(DigestState::default(), "golf");
    let state = search_fetched(state, "");

    assert!(state.search_visible());
    assert_eq!(state.search_response(), Some(""));
    assert!(state.view().search.is_none());
}

#[test]
fn search_does_not_touch_topic_cache() {
    init_logging();
    let topic = "GenAI in Sports";
    let (state, _) = search(DigestState::default(), topic);
    let state = search_fetched(state, "[]");
    let (state, effects) = update(state, Msg::TopicPressed(topic.to_string()));

    assert!(!state.store().has_cached(topic));
    assert_eq!(
        effects,
        vec![Effect::FetchTopic {
            topic: topic.to_string(),
            target: FetchTarget::Topic,
        }]
    );
}

#[test]
fn search_input_is_taken_verbatim() {
    init_logging();
    let (state, effects) = search(DigestState::default(), "  padded  ");
    assert_eq!(state.search_topic(), "  padded  ");
    assert_eq!(effects, vec![search_effect("  padded  ")]);
}
