#![warn(missing_docs)]

//! # candy-progress
//!
//! An animated "candy" progress bar for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: a rounded track filled by a shaded bar with diagonal stripes
//! sliding across it.
//!
//! ## Overview
//!
//! The bar follows the Elm Architecture like any bubbletea-rs component, with
//! `init()`, `update()` and `view()`. It has three behaviors:
//!
//! - **Static**: the bar shows whatever `progress` is set to.
//! - **Fill**: the bar climbs to 100% once and stays full.
//! - **Loop**: the bar climbs to 100%, empties and climbs again, forever.
//!
//! How fast the bar climbs is set by a speed dial from 1 (slow) to 100 (fast);
//! see [`speed`] for the exact mapping. The stripes animate on their own fixed
//! cycle no matter the speed or the mode.
//!
//! ## Quick Start
//!
//! ```rust
//! use candy_progress::prelude::*;
//!
//! let mut bar = progress_new(&[with_loop(), with_speed(80.0)]);
//! let _cmd = bar.init(); // hand to the bubbletea-rs runtime
//! println!("{}", bar.view());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use candy_progress::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     bar: CandyProgress,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut bar = progress_new(&[with_fill()]);
//!         let cmd = bar.init();
//!         (Self { bar }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.bar.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.bar.view()
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`progress`] | The widget |
//! | [`animator`] | Progress state and its tick policy |
//! | [`stripes`] | The decorative stripe loop |
//! | [`render`] | Pure rendering of a bar |
//! | [`theme`] | Colors and size |
//! | [`speed`] | Speed dial to tick interval |
//! | [`attributes`] | Configuration from attribute text |
//!
//! ## Logging
//!
//! Timer arming and cancellation are reported through [`tracing`] at debug
//! level. The crate never installs a subscriber.

pub mod animator;
pub mod attributes;
pub mod progress;
pub mod render;
pub mod speed;
pub mod stripes;
pub mod theme;

pub use animator::{
    AnimatorState, Config, ProgressAnimator, TickMsg as ProgressTickMsg,
};
pub use attributes::{parse as parse_attributes, Attributes, Error as AttributeError};
pub use progress::{
    new as progress_new, with_colors, with_fill, with_height, with_loop, with_progress,
    with_speed, with_theme, with_width, CandyOption, Model as CandyProgress,
};
pub use stripes::{FrameMsg as StripeFrameMsg, StripeAnimator};
pub use theme::Theme;

/// Everything needed to put a candy bar on screen.
pub mod prelude {
    pub use crate::animator::{
        AnimatorState, Config, ProgressAnimator, TickMsg as ProgressTickMsg,
    };
    pub use crate::progress::{
        new as progress_new, with_colors, with_fill, with_height, with_loop, with_progress,
        with_speed, with_theme, with_width, CandyOption, Model as CandyProgress,
    };
    pub use crate::stripes::FrameMsg as StripeFrameMsg;
    pub use crate::theme::Theme;
}
