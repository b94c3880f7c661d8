pub mod html;
pub mod profile;

#[cfg(test)]
mod tests;

pub use html::parse;
