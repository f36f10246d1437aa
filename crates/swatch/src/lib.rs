//! A memoizing color and brush resolution cache.
//!
//! [`BrushCache`] turns textual color specs (`"#00FF00"`, `"#FF00FFCC"`)
//! into [`Color`] values and frozen, shareable [`Brush`] resources, building
//! each distinct one exactly once and answering every later request from
//! memory.

pub mod brush;
pub mod cache;
pub mod color;

pub use brush::{Brush, SolidBrush};
pub use cache::{BrushCache, ResolveError};
pub use color::Color;
