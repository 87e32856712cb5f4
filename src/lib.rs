// Domain layer - simulation engine and pattern interchange
pub mod domain;

// Application layer - use cases and coordination
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod input;
pub mod rendering;
pub mod ui;

// Re-exports for convenience
pub use application::{GameState, PatternLibrary, Screen, ScreenEvent, Settings, Viewport};
pub use domain::{Cell, Grid, Pattern, PatternFormat, Rotation, Rule, WrapMode, presets};
