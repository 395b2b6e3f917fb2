//! The candy progress bar widget.
//!
//! [`Model`] ties together the [`ProgressAnimator`], the always-on
//! [`StripeAnimator`], a [`Theme`] and the pure renderer into a bubbletea-rs
//! component.
//!
//! # Basic Usage
//!
//! ```rust
//! use candy_progress::progress::{new, with_fill, with_speed, with_width};
//!
//! // A bar that fills up once and stays full
//! let mut bar = new(&[with_fill(), with_speed(90.0), with_width(30)]);
//!
//! // Arm the progress timer and start the stripes; hand this to the runtime.
//! let _cmd = bar.init();
//! ```
//!
//! # Behaviors
//!
//! - `with_progress(p)` alone draws a static bar at `p` percent.
//! - `with_fill()` fills to 100 and holds.
//! - `with_loop()` fills to 100, empties and starts over.
//!
//! # From markup
//!
//! ```rust
//! use candy_progress::progress::Model;
//!
//! let bar = Model::from_attributes(r#"class="orange" loop"#).unwrap();
//! assert!(bar.looping());
//! ```

use crate::animator::{AnimatorState, Config, ProgressAnimator};
use crate::attributes;
use crate::render;
use crate::stripes::StripeAnimator;
use crate::theme::Theme;
use bubbletea_rs::{batch, Cmd, Model as BubbleTeaModel, Msg};

/// Construction options for a candy bar.
///
/// Options are applied in order, so later ones win.
pub enum CandyOption {
    /// Initial fill percentage.
    WithProgress(f64),
    /// Turn on loop mode.
    WithLoop,
    /// Turn on fill mode.
    WithFill,
    /// Speed dial value.
    WithSpeed(f64),
    /// Primary and secondary bar colors.
    WithColors(String, String),
    /// Width in cells.
    WithWidth(usize),
    /// Height in rows.
    WithHeight(usize),
    /// Replace the whole theme.
    WithTheme(Theme),
}

impl CandyOption {
    fn apply(&self, m: &mut Model) {
        match self {
            CandyOption::WithProgress(progress) => m.animator.set_progress(*progress),
            CandyOption::WithLoop => m.animator.set_looping(true),
            CandyOption::WithFill => m.animator.set_fill(true),
            CandyOption::WithSpeed(speed) => {
                let mut config = m.animator.config();
                config.speed = *speed;
                m.animator.configure(config);
            }
            CandyOption::WithColors(color, secondary) => {
                m.theme.color = color.clone();
                m.theme.secondary_color = secondary.clone();
            }
            CandyOption::WithWidth(width) => m.theme.width = *width,
            CandyOption::WithHeight(height) => m.theme.height = *height,
            CandyOption::WithTheme(theme) => m.theme = theme.clone(),
        }
    }
}

/// Sets the initial fill percentage.
pub fn with_progress(progress: f64) -> CandyOption {
    CandyOption::WithProgress(progress)
}

/// Makes the bar refill endlessly.
pub fn with_loop() -> CandyOption {
    CandyOption::WithLoop
}

/// Makes the bar fill once and stay full.
pub fn with_fill() -> CandyOption {
    CandyOption::WithFill
}

/// Sets the speed dial, 1 (slow) to 100 (fast).
pub fn with_speed(speed: f64) -> CandyOption {
    CandyOption::WithSpeed(speed)
}

/// Sets the primary and secondary bar colors.
pub fn with_colors(color: impl Into<String>, secondary: impl Into<String>) -> CandyOption {
    CandyOption::WithColors(color.into(), secondary.into())
}

/// Sets the width in cells, caps included.
pub fn with_width(width: usize) -> CandyOption {
    CandyOption::WithWidth(width)
}

/// Sets the height in rows.
pub fn with_height(height: usize) -> CandyOption {
    CandyOption::WithHeight(height)
}

/// Replaces the theme.
pub fn with_theme(theme: Theme) -> CandyOption {
    CandyOption::WithTheme(theme)
}

/// A candy-striped progress bar.
///
/// Clones are independent widgets: both loops of a copy get fresh ids and
/// start stopped, so call [`Model::init`] on the copy to animate it.
#[derive(Debug, Clone)]
pub struct Model {
    animator: ProgressAnimator,
    stripes: StripeAnimator,
    /// Colors and size of the bar.
    pub theme: Theme,
}

/// Creates a bar from options.
pub fn new(opts: &[CandyOption]) -> Model {
    let mut m = Model {
        animator: ProgressAnimator::default(),
        stripes: StripeAnimator::new(),
        theme: Theme::default(),
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

impl Model {
    /// Creates a bar from behavior settings and a theme.
    pub fn with_config(config: Config, theme: Theme) -> Self {
        Self {
            animator: ProgressAnimator::new(config),
            stripes: StripeAnimator::new(),
            theme,
        }
    }

    /// Creates a bar from element attribute text, e.g. `progress="40" fill`.
    pub fn from_attributes(text: &str) -> Result<Self, attributes::Error> {
        let attrs = attributes::parse(text)?;
        Ok(Self::with_config(attrs.config(), attrs.theme()?))
    }

    /// Starts both animation loops.
    ///
    /// Call once after the first render. The progress timer is armed even in
    /// static mode, where its ticks leave the value untouched.
    pub fn init(&mut self) -> Cmd {
        batch(vec![self.animator.start(), self.stripes.start()])
    }

    /// Tears the bar down: no further ticks or frames are honored.
    pub fn stop(&mut self) {
        self.animator.stop();
        self.stripes.stop();
    }

    /// Applies new behavior settings, re-arming the timer if the speed
    /// changed while it was running.
    pub fn configure(&mut self, config: Config) -> Option<Cmd> {
        let previous = self.animator.speed();
        self.animator.configure(Config {
            speed: previous,
            ..config
        });
        match self.animator.state() {
            AnimatorState::Running => self.animator.set_speed(config.speed),
            AnimatorState::Idle => {
                self.animator.configure(config);
                None
            }
        }
    }

    /// The progress animator.
    pub fn animator(&self) -> &ProgressAnimator {
        &self.animator
    }

    /// Current fill percentage, unclamped.
    pub fn progress(&self) -> f64 {
        self.animator.progress()
    }

    /// Assigns the fill percentage.
    pub fn set_progress(&mut self, progress: f64) {
        self.animator.set_progress(progress);
    }

    /// Whether loop mode is on.
    pub fn looping(&self) -> bool {
        self.animator.looping()
    }

    /// Turns loop mode on or off.
    pub fn set_looping(&mut self, looping: bool) {
        self.animator.set_looping(looping);
    }

    /// Whether fill mode is on.
    pub fn fill(&self) -> bool {
        self.animator.fill()
    }

    /// Turns fill mode on or off.
    pub fn set_fill(&mut self, fill: bool) {
        self.animator.set_fill(fill);
    }

    /// The speed dial value.
    pub fn speed(&self) -> f64 {
        self.animator.speed()
    }

    /// Changes the speed dial. A changed value re-arms the progress timer.
    pub fn set_speed(&mut self, speed: f64) -> Option<Cmd> {
        self.animator.set_speed(speed)
    }

    /// Current stripe offset.
    pub fn stripe_phase(&self) -> usize {
        self.stripes.phase()
    }

    /// Routes progress ticks and stripe frames to their loops.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.is::<crate::animator::TickMsg>() {
            return self.animator.update(msg);
        }
        self.stripes.update(msg)
    }

    /// Renders the bar.
    pub fn view(&self) -> String {
        self.view_as(self.animator.progress())
    }

    /// Renders the bar at an arbitrary progress value.
    pub fn view_as(&self, progress: f64) -> String {
        render::render(progress, &self.theme, self.stripes.phase())
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new(&[]);
        let cmd = model.init();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
