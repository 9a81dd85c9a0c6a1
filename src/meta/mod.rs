//! Page meta tags.

pub mod builder;
pub mod tag;

pub use builder::Meta;
pub use tag::MetaTag;
