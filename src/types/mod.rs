//! Value types shared by the geometry core, the DOM layer and the overlay.

mod config;
mod geometry;
mod table;

pub use config::*;
pub use geometry::*;
pub use table::*;
