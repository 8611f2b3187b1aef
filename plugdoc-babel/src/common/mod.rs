//! Helpers shared by the renderers

pub mod dispatch;
pub mod text;
pub mod uri;

pub use dispatch::add_to_destination;
