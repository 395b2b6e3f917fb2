//! Timer-driven progress animation.
//!
//! [`ProgressAnimator`] owns the progress value of one widget together with the
//! `loop`/`fill` flags and the speed dial, and advances the value on a recurring
//! tick. Three behaviors fall out of a single tick policy:
//!
//! - **Fill**: `fill` set, `loop` unset. Progress rises to 100 once and holds.
//! - **Loop**: `loop` set (whatever `fill` says). Progress rises to 100, resets
//!   to 0 and repeats.
//! - **Static**: neither flag. Ticks never touch progress; only
//!   [`ProgressAnimator::set_progress`] does.
//!
//! # Timer model
//!
//! The recurring callback is a chain of `bubbletea_rs::tick` commands, each
//! carrying the animator's id and the tag of the arming that produced it.
//! Arming bumps the tag, so ticks still in flight from an older arming are
//! rejected when they arrive. That makes re-arming a cancel-then-arm in one
//! step and guarantees at most one live chain per instance.
//!
//! ```rust
//! use candy_progress::animator::{Config, ProgressAnimator};
//!
//! let mut animator = ProgressAnimator::new(Config {
//!     fill: true,
//!     ..Config::default()
//! });
//!
//! // Arm the timer; hand the command to the bubbletea runtime.
//! let _cmd = animator.start();
//!
//! animator.tick();
//! assert_eq!(animator.progress(), 1.0);
//! ```

use crate::speed;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for animator instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Progress value at which the bar is full.
pub const COMPLETE: f64 = 100.0;

/// Behavior settings for a [`ProgressAnimator`].
///
/// Values are taken as given: progress is not clamped and any speed is
/// accepted (see [`speed::normalize`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Fill percentage, nominally 0-100.
    pub progress: f64,
    /// Refill from 0 every time the bar is full.
    pub looping: bool,
    /// Fill up to 100 and stay there.
    pub fill: bool,
    /// Speed dial, 1 (slow) to 100 (fast).
    pub speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress: 0.0,
            looping: false,
            fill: false,
            speed: speed::DEFAULT_SPEED,
        }
    }
}

/// Whether the animator currently has a recurring tick armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// No tick armed.
    Idle,
    /// A tick chain is armed.
    Running,
}

/// Message delivered each time an armed interval elapses.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Animator the tick belongs to.
    pub id: i64,
    tag: i64,
}

// The armed tick chain. Holding one means the chain tagged `tag` is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerHandle {
    tag: i64,
    interval: Duration,
}

/// Owns the progress state of one widget and its recurring tick.
///
/// Cloning copies the settings and progress into a new, idle instance with
/// its own id, so ticks addressed to the original never drive the copy.
#[derive(Debug)]
pub struct ProgressAnimator {
    id: i64,
    tag: i64,
    progress: f64,
    looping: bool,
    fill: bool,
    speed: f64,
    timer: Option<TimerHandle>,
}

impl ProgressAnimator {
    /// Creates an idle animator with the given settings.
    pub fn new(config: Config) -> Self {
        let mut animator = Self {
            id: next_id(),
            tag: 0,
            progress: 0.0,
            looping: false,
            fill: false,
            speed: speed::DEFAULT_SPEED,
            timer: None,
        };
        animator.configure(config);
        animator
    }

    /// Replaces all settings at once.
    ///
    /// This does not touch the timer. Use [`on_speed_changed`](Self::on_speed_changed)
    /// or [`set_speed`](Self::set_speed) when a new speed must take effect on
    /// a running animator.
    pub fn configure(&mut self, config: Config) {
        self.progress = config.progress;
        self.looping = config.looping;
        self.fill = config.fill;
        self.speed = config.speed;
    }

    /// Current settings.
    pub fn config(&self) -> Config {
        Config {
            progress: self.progress,
            looping: self.looping,
            fill: self.fill,
            speed: self.speed,
        }
    }

    /// Unique instance id used to route tick messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current fill percentage, unclamped.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Assigns the fill percentage directly.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    /// Whether loop mode is on.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Turns loop mode on or off.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Whether fill mode is on.
    pub fn fill(&self) -> bool {
        self.fill
    }

    /// Turns fill mode on or off.
    pub fn set_fill(&mut self, fill: bool) {
        self.fill = fill;
    }

    /// The speed dial value.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Assigns the speed dial, re-arming the timer when the value changed.
    ///
    /// Returns the command for the new tick chain, or `None` when the value
    /// is unchanged. NaN compares equal to NaN here.
    pub fn set_speed(&mut self, speed: f64) -> Option<Cmd> {
        let unchanged = speed == self.speed || (speed.is_nan() && self.speed.is_nan());
        if unchanged {
            return None;
        }
        Some(self.on_speed_changed(speed))
    }

    /// Interval between ticks for the current speed.
    pub fn interval(&self) -> Duration {
        speed::normalize(self.speed)
    }

    /// Whether a tick chain is armed.
    pub fn state(&self) -> AnimatorState {
        match self.timer {
            Some(_) => AnimatorState::Running,
            None => AnimatorState::Idle,
        }
    }

    /// Arms the recurring tick at the interval derived from the current speed.
    ///
    /// Calling this while running replaces the live chain.
    pub fn start(&mut self) -> Cmd {
        self.arm()
    }

    /// Stores a new speed and re-arms the tick at its interval.
    ///
    /// The previous chain, if any, is cancelled first.
    pub fn on_speed_changed(&mut self, speed: f64) -> Cmd {
        self.speed = speed;
        self.arm()
    }

    /// Cancels the outstanding tick. Ticks already in flight are ignored when
    /// they arrive.
    pub fn stop(&mut self) {
        if let Some(handle) = self.timer.take() {
            tracing::debug!(id = self.id, tag = handle.tag, "progress timer cancelled");
        }
        // Retire the generation so no in-flight tick matches even if the
        // animator is re-armed later.
        self.tag += 1;
    }

    /// Applies one step of the tick policy.
    ///
    /// 1. While looping or filling and below 100, advance by one.
    /// 2. Otherwise, when looping, wrap to 0.
    /// 3. Otherwise leave the value alone.
    pub fn tick(&mut self) {
        if (self.looping || self.fill) && self.progress < COMPLETE {
            self.progress += 1.0;
        } else if self.looping {
            tracing::trace!(id = self.id, "progress wrapped");
            self.progress = 0.0;
        }
    }

    /// Returns the tick message the current chain expects next.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Handles tick messages for this animator.
    ///
    /// A tick belonging to the live chain runs [`tick`](Self::tick) and
    /// schedules the next one. Ticks for other instances, from a replaced
    /// chain, or arriving after [`stop`](Self::stop) are dropped.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id {
                return None;
            }

            let handle = self.timer?;

            // Stale ticks come from a chain that has since been replaced.
            if tick_msg.tag != handle.tag {
                return None;
            }

            self.tick();
            return Some(self.schedule(handle));
        }

        None
    }

    fn arm(&mut self) -> Cmd {
        if let Some(old) = self.timer.take() {
            tracing::debug!(id = self.id, tag = old.tag, "replacing progress timer");
        }

        self.tag += 1;
        let handle = TimerHandle {
            tag: self.tag,
            interval: self.interval(),
        };
        self.timer = Some(handle);

        tracing::debug!(
            id = self.id,
            tag = handle.tag,
            interval_ms = handle.interval.as_millis() as u64,
            "progress timer armed"
        );

        self.schedule(handle)
    }

    fn schedule(&self, handle: TimerHandle) -> Cmd {
        let id = self.id;
        let tag = handle.tag;

        // A zero period would panic inside `tick`; fire on the next poll instead.
        if handle.interval.is_zero() {
            return Box::pin(async move {
                tokio::task::yield_now().await;
                Some(Box::new(TickMsg { id, tag }) as Msg)
            });
        }

        bubbletea_tick(handle.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }
}

impl Clone for ProgressAnimator {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            tag: 0,
            progress: self.progress,
            looping: self.looping,
            fill: self.fill,
            speed: self.speed,
            timer: None,
        }
    }
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator(progress: f64, looping: bool, fill: bool) -> ProgressAnimator {
        ProgressAnimator::new(Config {
            progress,
            looping,
            fill,
            ..Config::default()
        })
    }

    #[test]
    fn test_default_config() {
        let animator = ProgressAnimator::default();
        assert_eq!(animator.progress(), 0.0);
        assert!(!animator.looping());
        assert!(!animator.fill());
        assert_eq!(animator.speed(), 75.0);
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn test_unique_ids() {
        let a = ProgressAnimator::default();
        let b = ProgressAnimator::default();
        assert_ne!(a.id(), b.id());
        assert!(a.id() > 0);
    }

    #[test]
    fn test_configure_does_not_clamp() {
        let mut animator = ProgressAnimator::default();
        animator.configure(Config {
            progress: 130.0,
            looping: true,
            fill: false,
            speed: -20.0,
        });
        assert_eq!(animator.progress(), 130.0);
        assert_eq!(animator.speed(), -20.0);
        assert_eq!(animator.interval(), Duration::from_millis(120));
        assert_eq!(animator.config().progress, 130.0);
    }

    #[test]
    fn test_fill_rises_and_holds() {
        let mut animator = animator(0.0, false, true);
        for _ in 0..100 {
            animator.tick();
        }
        assert_eq!(animator.progress(), 100.0);

        for _ in 0..250 {
            animator.tick();
            assert_eq!(animator.progress(), 100.0);
        }
    }

    #[test]
    fn test_loop_wraps_after_full() {
        let mut animator = animator(95.0, true, false);
        for _ in 0..5 {
            animator.tick();
        }
        assert_eq!(animator.progress(), 100.0);

        animator.tick();
        assert_eq!(animator.progress(), 0.0);

        // Second cycle is identical: 100 ticks up, one to wrap.
        for _ in 0..100 {
            animator.tick();
        }
        assert_eq!(animator.progress(), 100.0);
        animator.tick();
        assert_eq!(animator.progress(), 0.0);
    }

    #[test]
    fn test_loop_wins_over_fill() {
        let mut animator = animator(99.0, true, true);
        animator.tick();
        assert_eq!(animator.progress(), 100.0);
        animator.tick();
        assert_eq!(animator.progress(), 0.0);
    }

    #[test]
    fn test_loop_resets_values_past_full() {
        let mut animator = animator(140.0, true, false);
        animator.tick();
        assert_eq!(animator.progress(), 0.0);
    }

    #[test]
    fn test_static_never_changes() {
        let mut animator = animator(42.0, false, false);
        for _ in 0..500 {
            animator.tick();
        }
        assert_eq!(animator.progress(), 42.0);

        animator.set_progress(7.5);
        animator.tick();
        assert_eq!(animator.progress(), 7.5);
    }

    #[test]
    fn test_fill_from_fractional_progress() {
        let mut animator = animator(99.5, false, true);
        animator.tick();
        assert_eq!(animator.progress(), 100.5);
        animator.tick();
        assert_eq!(animator.progress(), 100.5);
    }

    #[test]
    fn test_start_and_stop_state() {
        let mut animator = animator(0.0, false, true);
        assert_eq!(animator.state(), AnimatorState::Idle);

        let _cmd = animator.start();
        assert_eq!(animator.state(), AnimatorState::Running);

        animator.stop();
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn test_on_speed_changed_arms_from_idle() {
        let mut animator = ProgressAnimator::default();
        let _cmd = animator.on_speed_changed(90.0);
        assert_eq!(animator.state(), AnimatorState::Running);
        assert_eq!(animator.speed(), 90.0);
        assert_eq!(animator.interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_update_advances_live_chain_once() {
        let mut animator = animator(0.0, false, true);
        let _cmd = animator.start();

        let next = animator.update(Box::new(animator.tick_msg()));
        assert!(next.is_some());
        assert_eq!(animator.progress(), 1.0);
    }

    #[test]
    fn test_rearm_rejects_old_chain() {
        let mut animator = animator(0.0, true, false);
        let _cmd = animator.start();
        let old_tick = animator.tick_msg();

        let _cmd = animator.on_speed_changed(50.0);
        let new_tick = animator.tick_msg();

        // The replaced chain is dead: delivering its tick does nothing.
        assert!(animator.update(Box::new(old_tick)).is_none());
        assert_eq!(animator.progress(), 0.0);

        // The new chain advances exactly one step per elapse.
        assert!(animator.update(Box::new(new_tick)).is_some());
        assert_eq!(animator.progress(), 1.0);
    }

    #[test]
    fn test_set_speed_only_rearms_on_change() {
        let mut animator = ProgressAnimator::default();
        assert!(animator.set_speed(75.0).is_none());
        assert_eq!(animator.state(), AnimatorState::Idle);

        assert!(animator.set_speed(80.0).is_some());
        assert_eq!(animator.state(), AnimatorState::Running);

        assert!(animator.set_speed(f64::NAN).is_some());
        assert!(animator.set_speed(f64::NAN).is_none());
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let mut animator = animator(10.0, true, false);
        let _cmd = animator.start();
        let pending = animator.tick_msg();

        animator.stop();
        assert!(animator.update(Box::new(pending.clone())).is_none());
        assert_eq!(animator.progress(), 10.0);

        // Restarting does not revive the old chain either.
        let _cmd = animator.start();
        assert!(animator.update(Box::new(pending)).is_none());
        assert_eq!(animator.progress(), 10.0);
    }

    #[test]
    fn test_update_with_wrong_id() {
        let mut animator = animator(0.0, true, false);
        let _cmd = animator.start();

        let wrong = TickMsg {
            id: animator.id() + 999,
            tag: animator.tick_msg().tag,
        };
        assert!(animator.update(Box::new(wrong)).is_none());
        assert_eq!(animator.progress(), 0.0);
    }

    #[test]
    fn test_update_ignores_unrelated_messages() {
        let mut animator = animator(0.0, true, false);
        let _cmd = animator.start();
        assert!(animator.update(Box::new("not a tick")).is_none());
        assert_eq!(animator.progress(), 0.0);
    }

    #[test]
    fn test_idle_animator_ignores_ticks() {
        let mut animator = animator(0.0, true, false);
        assert!(animator.update(Box::new(animator.tick_msg())).is_none());
        assert_eq!(animator.progress(), 0.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut animator = animator(20.0, true, false);
        let _cmd = animator.start();

        let mut copy = animator.clone();
        assert_ne!(copy.id(), animator.id());
        assert_eq!(copy.progress(), 20.0);
        assert!(copy.looping());
        assert_eq!(copy.state(), AnimatorState::Idle);

        // The original's chain does not reach the copy.
        assert!(copy.update(Box::new(animator.tick_msg())).is_none());
        assert_eq!(copy.progress(), 20.0);
        assert!(animator.update(Box::new(animator.tick_msg())).is_some());
        assert_eq!(animator.progress(), 21.0);
    }

    #[test]
    fn test_near_hundred_speed_is_zero_interval() {
        let mut animator = animator(0.0, false, true);
        let _cmd = animator.on_speed_changed(100.0 - 1e-10);
        assert_eq!(animator.interval(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_zero_interval_chain_keeps_running() {
        let mut animator = animator(0.0, false, true);
        let mut cmd = animator.on_speed_changed(100.0);

        // Spawned like the runtime does; a zero period must not panic.
        for step in 1..=3 {
            let msg = tokio::spawn(cmd)
                .await
                .expect("tick task should not panic")
                .expect("tick command should produce a message");
            cmd = animator.update(msg).expect("live chain schedules the next tick");
            assert_eq!(animator.progress(), step as f64);
        }
    }

    #[tokio::test]
    async fn test_armed_command_delivers_tick() {
        let mut animator = animator(0.0, false, true);
        let cmd = animator.on_speed_changed(100.0);

        let msg = cmd.await.expect("tick command should produce a message");
        let next = animator.update(msg);
        assert!(next.is_some());
        assert_eq!(animator.progress(), 1.0);
    }

    #[tokio::test]
    async fn test_replaced_command_is_inert() {
        let mut animator = animator(0.0, true, false);
        let first = animator.on_speed_changed(100.0);
        let second = animator.on_speed_changed(99.0);

        let stale = first.await.expect("tick command should produce a message");
        assert!(animator.update(stale).is_none());

        let live = second.await.expect("tick command should produce a message");
        assert!(animator.update(live).is_some());
        assert_eq!(animator.progress(), 1.0);
    }
}
