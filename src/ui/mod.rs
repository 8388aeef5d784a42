//! Terminal user interface with component-based rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready types computed from application state
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: header, input bar, channel list, status and footer
//! - [`helpers`]: cursor positioning, width fitting, match highlighting
//! - [`theme`]: color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    ChannelRow, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, StatusLine, UIViewModel,
};
