//! Decorative stripe animation.
//!
//! The candy stripes slide diagonally across the filled part of the bar on a
//! fixed two second cycle. This loop is purely visual: it runs from the moment
//! the widget starts until it is stopped, and knows nothing about the progress
//! value or the speed dial.
//!
//! The stripe pattern is [`PERIOD`] cells wide, half lit and half plain. Each
//! frame shifts the pattern one cell, so a full cycle is `PERIOD` frames.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for stripe instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Width, in cells, of one lit plus one plain stripe.
pub const PERIOD: usize = 4;

/// Duration of one full stripe cycle.
pub const CYCLE: Duration = Duration::from_secs(2);

/// Message advancing the stripe pattern by one cell.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    /// Stripe loop the frame belongs to.
    pub id: i64,
    tag: i64,
}

/// Returns whether the cell at `row`, `col` is lit for the given phase.
///
/// Stripes run on the -45 degree diagonal and move right as the phase grows.
pub fn is_lit(row: usize, col: usize, phase: usize) -> bool {
    (col + row + PERIOD - phase % PERIOD) % PERIOD < PERIOD / 2
}

/// Always-on loop producing the stripe phase.
///
/// A clone keeps the phase but gets its own id and starts stopped.
#[derive(Debug)]
pub struct StripeAnimator {
    phase: usize,
    id: i64,
    tag: i64,
    running: bool,
}

impl StripeAnimator {
    /// Creates a stopped stripe loop at phase 0.
    pub fn new() -> Self {
        Self {
            phase: 0,
            id: next_id(),
            tag: 0,
            running: false,
        }
    }

    /// Unique instance id used to route frame messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current offset of the pattern, in `0..PERIOD`.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Whether frames are being scheduled.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Time between two frames.
    pub fn frame_interval(&self) -> Duration {
        CYCLE / PERIOD as u32
    }

    /// Starts the loop. Starting twice restarts it with a single chain.
    pub fn start(&mut self) -> Cmd {
        self.running = true;
        self.tag += 1;
        self.next_frame()
    }

    /// Stops the loop; frames in flight are dropped on arrival.
    pub fn stop(&mut self) {
        self.running = false;
        self.tag += 1;
    }

    /// Returns the frame message the loop expects next.
    pub fn frame_msg(&self) -> FrameMsg {
        FrameMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Advances one frame on a matching [`FrameMsg`] and schedules the next.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame_msg) = msg.downcast_ref::<FrameMsg>() {
            if !self.running || frame_msg.id != self.id || frame_msg.tag != self.tag {
                return None;
            }

            self.phase = (self.phase + 1) % PERIOD;
            return Some(self.next_frame());
        }

        None
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(self.frame_interval(), move |_| {
            Box::new(FrameMsg { id, tag }) as Msg
        })
    }
}

impl Clone for StripeAnimator {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase,
            id: next_id(),
            tag: 0,
            running: false,
        }
    }
}

impl Default for StripeAnimator {
    fn default() -> Self {
        Self::new()
    }
}
