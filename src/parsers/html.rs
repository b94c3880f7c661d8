use crate::error::ParseError;
use scraper::{ElementRef, Html, Selector};

/// Parses an HTML document
pub fn parse(html: &str) -> Html {
    let doc = Html::parse_document(html);
    if !doc.errors.is_empty() {
        ::log::trace!("HTML parser reported {} recoverable errors", doc.errors.len());
    }
    doc
}

/// Compiles a CSS selector, surfacing failures as parse errors
pub fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(format!("{css}: {e}")))
}

/// Concatenated text of an element and all its descendants
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// First descendant of `element` matching `css`
pub fn first_descendant<'a>(
    element: &ElementRef<'a>,
    css: &str,
) -> Result<Option<ElementRef<'a>>, ParseError> {
    let selector = selector(css)?;
    Ok(element.select(&selector).next())
}

/// All descendants of `element` matching `css`, in document order
pub fn descendants<'a>(element: &ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, ParseError> {
    let selector = selector(css)?;
    Ok(element.select(&selector).collect())
}

/// Element children of `element`, skipping text and comment nodes
pub fn child_elements<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// The next sibling that is an element
pub fn next_sibling_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}
