use digest_engine::{fetch_background, Background, FetchSettings, Severity};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn image_is_inlined_as_base64() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bg.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"PNG!".to_vec(), "image/png"))
        .mount(&server)
        .await;

    let url = format!("{}/bg.png", server.uri());
    let background = fetch_background(&url, &FetchSettings::default()).await;
    assert_eq!(
        background,
        Background::Loaded {
            data_uri: "data:image/png;base64,UE5HIQ==".to_string(),
        }
    );
}

#[tokio::test]
async fn non_image_content_type_falls_back_to_png() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"PNG!".to_vec(), "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let background = fetch_background(&server.uri(), &FetchSettings::default()).await;
    let Background::Loaded { data_uri } = background else {
        panic!("expected loaded background");
    };
    assert!(data_uri.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn bad_status_is_a_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let background = fetch_background(&server.uri(), &FetchSettings::default()).await;
    assert_eq!(
        background,
        Background::Unavailable {
            message: "Failed to fetch background template (status: 404)".to_string(),
            severity: Severity::Warning,
        }
    );
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let background = fetch_background("not a url", &FetchSettings::default()).await;
    let Background::Unavailable { message, severity } = background else {
        panic!("expected unavailable background");
    };
    assert_eq!(severity, Severity::Error);
    assert!(message.starts_with("Error fetching background: "));
}
