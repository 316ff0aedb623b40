//! Configuration module

mod site;

pub use site::FooterConfig;
pub use site::FooterSection;
pub use site::GhostConfig;
pub use site::MenuItem;
pub use site::SeriesConfig;
pub use site::SiteConfig;
pub use site::SocialLink;
pub use site::{GHOST_API_KEY_ENV, GHOST_URL_ENV};
