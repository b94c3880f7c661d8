//! View data and HTML rendering for the web frontend.

use crate::parsers::profile::{ORGANIZATIONS_HEADING, SUBJECTS_HEADING};
use crate::results::ProfileRecord;
use crate::utils::escape_html;
use serde_json::{Map, Value, json};

pub const BIOGRAPHY_KEY: &str = "简介";
pub const RELATED_KEY: &str = "相关人物";
pub const EVENTS_KEY: &str = "相关事件";

/// Link to a profile's detail page
pub fn person_link(name: &str) -> String {
    format!(
        "<a href=\"/person/{}\">{}</a>",
        urlencoding::encode(name),
        escape_html(name)
    )
}

/// Key/value view of a profile, in display order.
///
/// Organizations and subjects only appear when non-empty.
pub fn person_view(record: &ProfileRecord) -> Value {
    let mut view = Map::new();
    view.insert(BIOGRAPHY_KEY.to_string(), json!(record.biography()));
    view.insert(
        RELATED_KEY.to_string(),
        json!(record.related_names().iter().map(|n| person_link(n)).collect::<Vec<_>>()),
    );
    if !record.organizations().is_empty() {
        view.insert(ORGANIZATIONS_HEADING.to_string(), json!(record.organizations()));
    }
    if !record.subjects().is_empty() {
        view.insert(SUBJECTS_HEADING.to_string(), json!(record.subjects()));
    }
    view.insert(EVENTS_KEY.to_string(), json!(record.events()));
    Value::Object(view)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// Renders a value; strings are escaped unless `markup` is set
fn render_value(value: &Value, markup: bool, out: &mut String) {
    match value {
        Value::String(s) if markup => out.push_str(s),
        Value::String(s) => out.push_str(&escape_html(s)),
        Value::Array(items) => {
            out.push_str("<ul>\n");
            for item in items {
                out.push_str("<li>");
                render_value(item, markup, out);
                out.push_str("</li>\n");
            }
            out.push_str("</ul>\n");
        }
        Value::Object(map) => {
            out.push_str("<dl>\n");
            for (key, item) in map {
                out.push_str(&format!("<dt>{}</dt>\n<dd>", escape_html(key)));
                render_value(item, markup, out);
                out.push_str("</dd>\n");
            }
            out.push_str("</dl>\n");
        }
        other => out.push_str(&escape_html(&other.to_string())),
    }
}

/// Detail page for one profile
pub fn render_person(title: &str, view: &Value) -> String {
    let mut body = String::new();
    match view {
        Value::Object(map) => {
            for (key, value) in map {
                body.push_str(&format!("<h2>{}</h2>\n", escape_html(key)));
                render_value(value, key == RELATED_KEY, &mut body);
            }
        }
        other => render_value(other, false, &mut body),
    }
    page(title, &body)
}

/// Listing of all known profiles
pub fn render_index<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut body = String::from("<ul>\n");
    for name in names {
        body.push_str(&format!("<li>{}</li>\n", person_link(name)));
    }
    body.push_str("</ul>\n");
    page("人物", &body)
}
