//! Overlay animation effects (microscope popup, celebration banner).

use std::time::Duration;

/// Where an animation currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    Running { progress: f32 },
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffectKind {
    PopScale,
    SlideUp,
}

/// An overlay animation driven by frame deltas.
#[derive(Debug, Clone)]
pub struct OverlayEffect {
    kind: OverlayEffectKind,
    elapsed: Duration,
    duration: Duration,
}

impl OverlayEffect {
    #[must_use]
    pub fn pop_scale(duration: Duration) -> Self {
        Self::new(OverlayEffectKind::PopScale, duration)
    }

    #[must_use]
    pub fn slide_up(duration: Duration) -> Self {
        Self::new(OverlayEffectKind::SlideUp, duration)
    }

    fn new(kind: OverlayEffectKind, duration: Duration) -> Self {
        Self {
            kind,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn kind(&self) -> OverlayEffectKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        if self.elapsed >= self.duration {
            return AnimPhase::Completed;
        }
        let progress = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        AnimPhase::Running { progress }
    }

    /// Progress in `0.0..=1.0`; completed effects report 1.0.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.phase() {
            AnimPhase::Running { progress } => progress,
            AnimPhase::Completed => 1.0,
        }
    }
}
