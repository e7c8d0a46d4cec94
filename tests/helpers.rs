#![allow(dead_code)]

use paged_news::config::{Config, mashable};
use paged_news::models::SourceSpec;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Listing page in the markup of the default source.
pub fn listing(items: &[(&str, &str, &str)], next: Option<u32>) -> String {
    let mut html = String::from("<!DOCTYPE html><html><body><ul>");
    for (headline, href, date) in items {
        html.push_str(&format!(
            r#"<li class="blogroll ARTICLE"><a href="{href}"><div class="caption">{headline}</div></a><time class="datepublished">{date}</time></li>"#
        ));
    }
    html.push_str("</ul>");
    if let Some(next) = next {
        html.push_str(&format!(r#"<div id="brollanchor" data-pagenum="{next}"></div>"#));
    }
    html.push_str("</body></html>");
    html
}

/// Serve `body` for `GET /?page=<page>` exactly once.
pub async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Default-source selectors pointed at a mock server.
pub fn source_for(server: &MockServer, name: &str) -> SourceSpec {
    SourceSpec {
        name: name.to_string(),
        base_url: Url::parse(&format!("{}/", server.uri())).unwrap(),
        ..mashable()
    }
}

pub fn config_for(sources: Vec<SourceSpec>) -> Config {
    Config {
        request_timeout_secs: 5,
        sources,
        ..Config::default()
    }
}
