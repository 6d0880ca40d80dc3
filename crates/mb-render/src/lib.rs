//! Mind Board rendering helpers: hit classification and connector geometry.

pub mod hit;
pub mod link;

pub use hit::{Hit, classify, closest};
pub use link::{LinkGeometry, floating_link, link_geometry};
