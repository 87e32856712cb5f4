mod cell;
mod grid;
mod rules;
pub mod codec;
pub mod pattern;

pub use cell::Cell;
pub use codec::{ParseError, PatternFormat, decode, encode};
pub use grid::{Grid, GridError, WrapMode};
pub use pattern::{Pattern, Rotation, presets};
pub use rules::{Rule, RuleError};
