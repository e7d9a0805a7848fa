use digest_core::{DigestViewModel, ParseResult, ResultItem, TopicPhase, DEFAULT_LINK};
use digest_engine::{Background, Severity};
use minijinja::{Environment, Value};
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page.html";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Everything the page needs besides the compiled template.
pub struct PageInput<'a> {
    pub title: &'a str,
    pub view: &'a DigestViewModel,
    pub background: &'a Background,
    /// Pre-fills the search box.
    pub search_input: &'a str,
}

/// Renders view models to HTML. Templates auto-escape all values.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("templates/page.html"))?;
        Ok(Self { env })
    }

    pub fn render_page(&self, input: &PageInput<'_>) -> Result<String, RenderError> {
        let context = PageContext::build(input);
        let template = self.env.get_template(PAGE_TEMPLATE)?;
        Ok(template.render(Value::from_serialize(&context))?)
    }
}

#[derive(Serialize)]
struct PageContext {
    title: String,
    background_uri: Option<String>,
    background_notice: Option<Notice>,
    topics: Vec<TopicPanel>,
    search: Option<SearchPanel>,
    search_input: String,
}

impl PageContext {
    fn build(input: &PageInput<'_>) -> Self {
        let (background_uri, background_notice) = match input.background {
            Background::Loaded { data_uri } => (Some(data_uri.clone()), None),
            Background::Unavailable { message, severity } => (
                None,
                Some(Notice {
                    severity: severity_class(*severity),
                    message: message.clone(),
                }),
            ),
        };

        let topics = input
            .view
            .topics
            .iter()
            .map(|topic| TopicPanel {
                topic: topic.topic.clone(),
                expanded: topic.phase != TopicPhase::Hidden,
                results: topic.results.as_ref().map(ResultsBlock::from),
            })
            .collect();

        let search = input.view.search.as_ref().map(|search| SearchPanel {
            topic: search.topic.clone(),
            results: ResultsBlock::from(&search.results),
        });

        Self {
            title: input.title.to_string(),
            background_uri,
            background_notice,
            topics,
            search,
            search_input: input.search_input.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Notice {
    severity: &'static str,
    message: String,
}

#[derive(Serialize)]
struct TopicPanel {
    topic: String,
    expanded: bool,
    results: Option<ResultsBlock>,
}

#[derive(Serialize)]
struct SearchPanel {
    topic: String,
    results: ResultsBlock,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ResultsBlock {
    Items { items: Vec<ItemRow> },
    RemoteError { message: String },
    DecodeError { raw: String },
    Empty,
}

impl From<&ParseResult> for ResultsBlock {
    fn from(result: &ParseResult) -> Self {
        match result {
            ParseResult::Items(items) => ResultsBlock::Items {
                items: items.iter().map(ItemRow::from).collect(),
            },
            ParseResult::RemoteError(message) => ResultsBlock::RemoteError {
                message: message.clone(),
            },
            ParseResult::DecodeError(raw) => ResultsBlock::DecodeError { raw: raw.clone() },
            ParseResult::Empty => ResultsBlock::Empty,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ItemRow {
    title: String,
    date: String,
    summary: String,
    link: String,
}

impl From<&ResultItem> for ItemRow {
    fn from(item: &ResultItem) -> Self {
        Self {
            title: item.title.clone(),
            date: item.date.clone(),
            summary: item.summary.clone(),
            link: safe_href(&item.link),
        }
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

// Scripted URLs from the webhook are dropped in favour of the placeholder link.
fn safe_href(link: &str) -> String {
    let scheme = link
        .split_once(':')
        .map(|(scheme, _)| scheme.trim().to_ascii_lowercase());
    match scheme.as_deref() {
        None | Some("http") | Some("https") | Some("mailto") => link.to_string(),
        Some(scheme) if scheme.contains('/') || scheme.contains('?') || scheme.contains('#') => {
            link.to_string()
        }
        Some(_) => DEFAULT_LINK.to_string(),
    }
}
