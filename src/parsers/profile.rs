//! Field extraction for profile pages.
//!
//! Profile pages carry no stable ids or classes, so every field is located
//! by position or by a heading label inside the page's first `<section>`:
//!
//! * block 2 (third `<div>`): biography
//! * block 3 (fourth `<div>`): `<ul>` of related people, one link per `<li>`
//! * `<h4>` headings labelled [`ORGANIZATIONS_HEADING`] / [`SUBJECTS_HEADING`],
//!   whose next sibling holds a whitespace-separated list
//! * the last `<div>`: a `<dl>` of events, `<dt>` label followed by `<dd>` details
//!
//! Layout changes on the site only need to be reflected here.

use super::html;
use crate::error::ParseError;
use crate::results::Events;
use scraper::{ElementRef, Html};

pub const ORGANIZATIONS_HEADING: &str = "相关机构";
pub const SUBJECTS_HEADING: &str = "相关学科";

const BIOGRAPHY_BLOCK: usize = 2;
const RELATED_BLOCK: usize = 3;

fn section(doc: &Html) -> Result<ElementRef<'_>, ParseError> {
    doc.select(&html::selector("section")?)
        .next()
        .ok_or(ParseError::MissingSection)
}

fn block<'a>(section: &ElementRef<'a>, index: usize) -> Result<ElementRef<'a>, ParseError> {
    html::descendants(section, "div")?
        .into_iter()
        .nth(index)
        .ok_or_else(|| ParseError::MissingBlock(index.to_string()))
}

fn last_block<'a>(section: &ElementRef<'a>) -> Result<ElementRef<'a>, ParseError> {
    html::descendants(section, "div")?
        .pop()
        .ok_or_else(|| ParseError::MissingBlock("last".to_string()))
}

/// Names linked from the related-people list
pub fn related_names(doc: &Html) -> Result<Vec<String>, ParseError> {
    let section = section(doc)?;
    let block = block(&section, RELATED_BLOCK)?;
    let list = html::first_descendant(&block, "ul")?.ok_or_else(|| ParseError::MissingElement {
        block: RELATED_BLOCK.to_string(),
        element: "ul",
    })?;

    let mut names = Vec::new();
    for item in html::child_elements(&list).filter(|e| e.value().name() == "li") {
        let link = html::first_descendant(&item, "a")?.ok_or_else(|| ParseError::MissingElement {
            block: RELATED_BLOCK.to_string(),
            element: "a",
        })?;
        names.push(html::element_text(&link).trim().to_string());
    }
    Ok(names)
}

/// Trimmed biography text
pub fn biography(doc: &Html) -> Result<String, ParseError> {
    let section = section(doc)?;
    let block = block(&section, BIOGRAPHY_BLOCK)?;
    Ok(html::element_text(&block).trim().to_string())
}

/// Whitespace-separated entries listed after the `<h4>` whose text is exactly `label`.
///
/// Returns an empty list if no heading carries the label.
pub fn labelled_list(doc: &Html, label: &str) -> Result<Vec<String>, ParseError> {
    let section = section(doc)?;
    let heading = html::descendants(&section, "h4")?
        .into_iter()
        .find(|h4| html::element_text(h4) == label);

    let Some(heading) = heading else {
        return Ok(Vec::new());
    };

    Ok(html::next_sibling_element(&heading)
        .map(|sibling| {
            html::element_text(&sibling)
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

pub fn organizations(doc: &Html) -> Result<Vec<String>, ParseError> {
    labelled_list(doc, ORGANIZATIONS_HEADING)
}

pub fn subjects(doc: &Html) -> Result<Vec<String>, ParseError> {
    labelled_list(doc, SUBJECTS_HEADING)
}

/// Event list of the last content block.
///
/// A label seen twice keeps its first position and takes the later details.
pub fn events(doc: &Html) -> Result<Events, ParseError> {
    let section = section(doc)?;
    let block = last_block(&section)?;
    let list = html::first_descendant(&block, "dl")?.ok_or_else(|| ParseError::MissingElement {
        block: "last".to_string(),
        element: "dl",
    })?;

    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    for element in html::child_elements(&list) {
        match element.value().name() {
            "dt" => entries.push((html::element_text(&element), Vec::new())),
            "dd" => {
                let text = html::element_text(&element);
                match entries.last_mut() {
                    Some((_, details)) => details.push(text),
                    None => return Err(ParseError::OrphanDetail(text)),
                }
            }
            _ => {}
        }
    }

    Ok(entries.into_iter().collect())
}
