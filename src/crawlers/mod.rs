pub mod engine;
pub mod source;

pub use engine::CrawlEngine;
pub use source::{HttpSource, PageSource, Source, WebDriverSource};
