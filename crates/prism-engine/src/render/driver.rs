use std::f32::consts::TAU;

use crate::time::FrameTime;

use super::{AnimationError, SceneCamera, TransformSet};

/// How far the rotation advances per drawn frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AnimationStep {
    /// Fixed radians per frame; speed follows the refresh rate.
    PerFrame(f32),
    /// Radians per second, scaled by the clock's clamped delta.
    PerSecond(f32),
}

impl AnimationStep {
    #[inline]
    fn value(self) -> f32 {
        match self {
            AnimationStep::PerFrame(step) => step,
            AnimationStep::PerSecond(rate) => rate,
        }
    }

    #[inline]
    fn delta(self, dt: f32) -> f32 {
        match self {
            AnimationStep::PerFrame(step) => step,
            AnimationStep::PerSecond(rate) => rate * dt,
        }
    }
}

/// Rotation angle owned by one frame driver. Kept in `[0, 2π)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Animation {
    angle: f32,
    step: AnimationStep,
}

impl Animation {
    /// Rejects non-finite steps, which would turn the angle into NaN.
    pub fn new(step: AnimationStep) -> Result<Self, AnimationError> {
        let value = step.value();
        if !value.is_finite() {
            return Err(AnimationError::NonFiniteStep(value));
        }
        Ok(Self { angle: 0.0, step })
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn step(&self) -> AnimationStep {
        self.step
    }

    pub fn advance(&mut self, dt: f32) {
        let next = (self.angle + self.step.delta(dt)).rem_euclid(TAU);
        // rem_euclid rounds up to TAU for tiny negative inputs.
        self.angle = if next.is_finite() && next < TAU { next } else { 0.0 };
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    /// Between frames.
    Idle,
    /// Inside `tick`.
    Rendering,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Drawn,
    /// No drawable this tick; nothing was drawn and the animation held still.
    Skipped,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub drawn: u64,
    pub skipped: u64,
}

/// Where a frame driver sends its work.
///
/// The GPU implementation acquires a surface texture and records a render
/// pass; tests substitute a recorder.
pub trait FrameSink {
    type Frame;

    /// Acquires a drawable and render target, or `None` to skip this tick.
    fn acquire(&mut self) -> Option<Self::Frame>;

    /// Width over height of the current target.
    fn aspect(&self) -> f32;

    /// Uploads `transforms` and issues the draw call.
    fn draw(&mut self, frame: &mut Self::Frame, transforms: &TransformSet);

    /// Presents the drawable and submits the frame's commands.
    fn present(&mut self, frame: Self::Frame);
}

/// Per-renderer frame state machine: Idle → Rendering → Idle, once per
/// display refresh, on a single thread.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    camera: SceneCamera,
    animation: Animation,
    state: DriverState,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(camera: SceneCamera, step: AnimationStep) -> Result<Self, AnimationError> {
        Ok(Self {
            camera,
            animation: Animation::new(step)?,
            state: DriverState::Idle,
            stats: FrameStats::default(),
        })
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.animation.angle()
    }

    #[inline]
    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    /// Runs one frame against `sink`.
    pub fn tick<S: FrameSink>(&mut self, sink: &mut S, time: FrameTime) -> FrameOutcome {
        self.state = DriverState::Rendering;

        let outcome = match sink.acquire() {
            None => {
                self.stats.skipped += 1;
                log::trace!("frame {} skipped: no drawable", time.frame_index);
                FrameOutcome::Skipped
            }
            Some(mut frame) => {
                let transforms = self.camera.transforms(self.animation.angle(), sink.aspect());
                sink.draw(&mut frame, &transforms);
                sink.present(frame);

                self.animation.advance(time.dt);
                self.stats.drawn += 1;
                FrameOutcome::Drawn
            }
        };

        self.state = DriverState::Idle;
        outcome
    }
}
