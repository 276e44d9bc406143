//! Connected-region labeling module
//!
//! Paints every connected foreground region of a mask with its own label by
//! repeated seeded flood fill.

mod flood_fill;
pub mod types;

#[cfg(test)]
mod tests;

pub use flood_fill::label;
pub use types::LabelMap;
