mod gazetteer;
mod resolver;

pub use gazetteer::{Coordinates, Gazetteer, GazetteerEntry, GazetteerError};
pub use resolver::{LocationResolver, ResolvedPlace};
