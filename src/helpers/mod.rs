//! Helper functions shared by the page composers, templates and the feed

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
