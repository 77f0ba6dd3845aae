//! Configuration module

mod site;

pub use site::FeedConfig;
pub use site::HighlightConfig;
pub use site::HomeConfig;
pub use site::SiteConfig;
pub use site::SiteMetadata;
pub use site::SocialLinks;
