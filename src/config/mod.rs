//! Configuration module

mod site;

pub use site::CacheConfig;
pub use site::ImageConfig;
pub use site::SiteConfig;
