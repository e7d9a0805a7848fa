/// Label identifying a subject to query results for.
pub type Topic = String;

/// Unparsed text body returned by the webhook call.
pub type RawResponse = String;

/// Predefined topics, in button order.
pub const DEFAULT_TOPICS: [&str; 8] = [
    "GenAI in Sports",
    "AI-Powered Technology in Sports",
    "Sports and Technology Innovation",
    "AI and Innovation in Major Sports",
    "AI in Sports Betting",
    "Automated Content Creation in Sports",
    "Computer Vision in Sports",
    "Use of AI in Sports Fan Engagement",
];

pub fn default_topics() -> Vec<Topic> {
    DEFAULT_TOPICS.iter().map(|topic| topic.to_string()).collect()
}
