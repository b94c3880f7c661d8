//! Test doubles: an in-memory page source and a profile page builder.

use crate::config::CrawlerConfig;
use crate::crawlers::source::PageSource;
use crate::error::FetchError;
use crate::profile::{portrait_url, profile_url};
use crate::results::{Events, ProfileRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Builds markup laid out like a real profile page
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub name: String,
    biography: String,
    related: Vec<String>,
    organizations: Option<Vec<String>>,
    subjects: Option<Vec<String>>,
    events: Vec<(String, Vec<String>)>,
}

impl ProfilePage {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            biography: format!("{name}，北京师范大学教授。"),
            related: Vec::new(),
            organizations: None,
            subjects: None,
            events: Vec::new(),
        }
    }

    pub fn related(mut self, names: &[&str]) -> Self {
        self.related = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn organizations(mut self, names: &[&str]) -> Self {
        self.organizations = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn subjects(mut self, names: &[&str]) -> Self {
        self.subjects = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn event(mut self, label: &str, details: &[&str]) -> Self {
        self.events.push((
            label.to_string(),
            details.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn to_html(&self) -> String {
        let related: String = self
            .related
            .iter()
            .map(|n| format!("\n<li><a href=\"/People/People_Detail?keyword={n}\">{n}</a></li>"))
            .collect();

        let mut tags = String::new();
        if let Some(orgs) = &self.organizations {
            tags.push_str(&format!("<h4>相关机构</h4>\n<p>{}</p>\n", orgs.join(" ")));
        }
        if let Some(subjects) = &self.subjects {
            tags.push_str(&format!("<h4>相关学科</h4>\n<p>\n{}\n</p>\n", subjects.join("\n")));
        }

        let events: String = self
            .events
            .iter()
            .map(|(label, details)| {
                let dds: String = details.iter().map(|d| format!("<dd>{d}</dd>")).collect();
                format!("<dt>{label}</dt>{dds}\n")
            })
            .collect();

        format!(
            "<!DOCTYPE html><html><head><title>{name}</title></head><body>\n\
             <section>\n\
             <div class=\"title\"><h2>{name}</h2></div>\n\
             <div class=\"meta\">人物</div>\n\
             <div class=\"intro\">\n  {bio}  \n</div>\n\
             <div class=\"related\"><ul>{related}\n</ul></div>\n\
             <div class=\"tags\">\n{tags}</div>\n\
             <div class=\"events\"><dl>\n{events}</dl></div>\n\
             </section></body></html>",
            name = self.name,
            bio = self.biography,
        )
    }
}

/// In-memory page source that records every request
#[derive(Debug)]
pub struct FakeSource {
    profile_base_url: String,
    image_base_url: String,
    pages: HashMap<String, String>,
    images: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            profile_base_url: config.profile_base_url.clone(),
            image_base_url: config.image_base_url.clone(),
            pages: HashMap::new(),
            images: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve a profile page and a portrait derived from its name
    pub fn with_profile(self, page: ProfilePage) -> Self {
        let html = page.to_html();
        let portrait = portrait_bytes(&page.name);
        self.with_raw_page(&page.name, &html, portrait)
    }

    pub fn with_raw_page(mut self, name: &str, html: &str, portrait: Vec<u8>) -> Self {
        let page_url = profile_url(&self.profile_base_url, name).unwrap();
        let image_url = portrait_url(&self.image_base_url, name).unwrap();
        self.pages.insert(page_url.to_string(), html.to_string());
        self.images.insert(image_url.to_string(), portrait);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    /// Names whose profile page was requested, in request order
    pub fn visited_names(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|u| Url::parse(u).ok())
            .filter_map(|u| {
                u.query_pairs()
                    .find(|(k, _)| k == "keyword")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }

    fn record(&self, url: &Url) {
        self.requests.lock().unwrap().push(url.to_string());
    }
}

impl PageSource for FakeSource {
    async fn fetch_markup(&self, url: &Url) -> Result<String, FetchError> {
        self.record(url);
        self.pages.get(url.as_str()).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.record(url);
        self.images.get(url.as_str()).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Fake JPEG bytes unique to a name
pub fn portrait_bytes(name: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(name.as_bytes());
    bytes.extend_from_slice(&[0x00, 0x80, 0xFF, 0xD9]);
    bytes
}

/// A record built directly, without fetching
pub fn record(name: &str, related: &[&str]) -> ProfileRecord {
    let events: Events = [("1980年".to_string(), vec!["任教授".to_string()])]
        .into_iter()
        .collect();
    ProfileRecord::new(
        name.to_string(),
        format!("http://example.com/?keyword={name}"),
        vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9],
        related.iter().map(|s| s.to_string()).collect(),
        format!("{name} 简介"),
        vec!["中文系".to_string()],
        Vec::new(),
        events,
    )
}

/// Source serving the example graph:
/// 启功 → [A, B], A → [启功, C], B → [], C → [A]
pub fn example_graph(config: &CrawlerConfig) -> FakeSource {
    FakeSource::new(config)
        .with_profile(ProfilePage::new("启功").related(&["A", "B"]))
        .with_profile(ProfilePage::new("A").related(&["启功", "C"]))
        .with_profile(ProfilePage::new("B"))
        .with_profile(ProfilePage::new("C").related(&["A"]))
}
