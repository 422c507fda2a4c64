/// Timed camera transitions
///
/// A [`TransitionController`] moves the live [`CameraPose`] towards a
/// requested pose over a fixed duration with a cubic ease-out. The host calls
/// [`TransitionController::advance`] once per frame with wall-clock
/// milliseconds, so playback speed does not depend on frame rate. Only one
/// transition runs at a time; a request made while another is in flight is
/// ignored.
use crate::projection::CameraPose;

/// Default transition length in milliseconds
pub const DEFAULT_TRANSITION_MS: f64 = 1000.0;

/// Cubic ease-out, `1 - (1 - t)^3`. Input is clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let omt = 1.0 - t.clamp(0.0, 1.0);
    1.0 - omt * omt * omt
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    Idle,
    Transitioning {
        start: CameraPose,
        end: CameraPose,
        start_time: f64,
        duration: f64,
    },
}

/// Result of one [`TransitionController::advance`] step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Linear progress in [0, 1]
    pub progress: f64,
    /// Eased interpolation weight
    pub eased: f64,
    /// True when this frame completed the transition
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct TransitionController {
    state: TransitionState,
    duration: f64,
}

impl TransitionController {
    /// Create an idle controller whose transitions last `duration_ms`
    pub fn new(duration_ms: f64) -> Self {
        Self {
            state: TransitionState::Idle,
            duration: duration_ms.max(0.0),
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning { .. })
    }

    /// End pose of the transition in flight, if any
    pub fn end_pose(&self) -> Option<CameraPose> {
        match self.state {
            TransitionState::Transitioning { end, .. } => Some(end),
            TransitionState::Idle => None,
        }
    }

    /// Start moving from `current` to `target`.
    ///
    /// Returns `false` without touching the running transition if one is
    /// already in flight.
    pub fn request_view(&mut self, current: &CameraPose, target: CameraPose, now: f64) -> bool {
        if self.is_transitioning() {
            log::debug!("transition already running, ignoring request");
            return false;
        }
        log::debug!(
            "transition from {:?} to {:?} over {} ms",
            current.position,
            target.position,
            self.duration
        );
        self.state = TransitionState::Transitioning {
            start: *current,
            end: target,
            start_time: now,
            duration: self.duration,
        };
        true
    }

    /// Write the interpolated pose for time `now` into `pose`.
    ///
    /// Returns `None` while idle. On the frame where progress reaches 1 the
    /// pose is set exactly to the end pose and the controller goes idle.
    pub fn advance(&mut self, now: f64, pose: &mut CameraPose) -> Option<TransitionFrame> {
        let TransitionState::Transitioning {
            start,
            end,
            start_time,
            duration,
        } = self.state
        else {
            return None;
        };

        // Completion is decided on absolute time; `now - start_time` can round
        // below `duration` even when `now == start_time + duration`.
        let finished = duration <= 0.0 || now >= start_time + duration;
        let progress = if finished {
            1.0
        } else {
            ((now - start_time) / duration).clamp(0.0, 1.0)
        };
        let eased = ease_out_cubic(progress);

        if finished {
            *pose = end;
            self.state = TransitionState::Idle;
            log::debug!("transition finished at {:?}", end.position);
        } else {
            *pose = start.lerp(&end, eased);
        }

        Some(TransitionFrame {
            progress,
            eased,
            finished,
        })
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn pose(x: f64, y: f64, z: f64) -> CameraPose {
        CameraPose::new(Point3::new(x, y, z), Point3::origin())
    }

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        // front-loaded
        assert!(ease_out_cubic(0.25) > 0.25);
    }

    #[test]
    fn test_starts_idle() {
        let mut controller = TransitionController::default();
        let mut live = pose(1.0, 2.0, 3.0);
        assert_eq!(*controller.state(), TransitionState::Idle);
        assert!(controller.advance(100.0, &mut live).is_none());
        assert_eq!(live, pose(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_midway_frame_is_eased() {
        let mut controller = TransitionController::default();
        let mut live = pose(0.0, 0.0, 10.0);
        assert!(controller.request_view(&live, pose(10.0, 0.0, 10.0), 1000.0));

        let frame = controller.advance(1500.0, &mut live).unwrap();
        assert!((frame.progress - 0.5).abs() < 1e-12);
        assert!((frame.eased - 0.875).abs() < 1e-12);
        assert!(!frame.finished);
        assert!((live.position.x - 8.75).abs() < 1e-9);
        assert!(controller.is_transitioning());
    }

    #[test]
    fn test_completes_exactly_at_end() {
        let mut controller = TransitionController::default();
        let mut live = pose(0.3, 0.1, 7.0);
        let end = CameraPose::new(Point3::new(-1.7, 4.2, 0.9), Point3::new(0.1, 0.2, 0.3));
        controller.request_view(&live, end, 250.0);
        controller.advance(600.0, &mut live);

        let frame = controller.advance(1250.0, &mut live).unwrap();
        assert_eq!(frame.progress, 1.0);
        assert_eq!(frame.eased, 1.0);
        assert!(frame.finished);
        assert_eq!(live, end);
        assert_eq!(*controller.state(), TransitionState::Idle);
    }

    #[test]
    fn test_completes_at_unrepresentable_end_times() {
        let end = CameraPose::new(Point3::new(-1.7, 4.2, 0.9), Point3::new(0.1, 0.2, 0.3));
        for k in 0..2000 {
            let start_time = 0.1 + k as f64 * 16.7;
            let mut controller = TransitionController::default();
            let mut live = pose(0.0, 0.0, 5.0);
            controller.request_view(&live, end, start_time);

            let frame = controller
                .advance(start_time + controller.duration(), &mut live)
                .unwrap();
            assert!(frame.finished, "start {start_time}: progress {}", frame.progress);
            assert_eq!(frame.progress, 1.0);
            assert_eq!(frame.eased, 1.0);
            assert_eq!(live, end);
            assert_eq!(*controller.state(), TransitionState::Idle);
        }
    }

    #[test]
    fn test_late_frame_clamps() {
        let mut controller = TransitionController::default();
        let mut live = pose(0.0, 0.0, 1.0);
        controller.request_view(&live, pose(0.0, 5.0, 0.0), 0.0);
        let frame = controller.advance(10_000.0, &mut live).unwrap();
        assert_eq!(frame.progress, 1.0);
        assert_eq!(live, pose(0.0, 5.0, 0.0));
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn test_early_frame_clamps_to_start() {
        let mut controller = TransitionController::default();
        let mut live = pose(0.0, 0.0, 1.0);
        controller.request_view(&live, pose(0.0, 5.0, 0.0), 500.0);
        let frame = controller.advance(400.0, &mut live).unwrap();
        assert_eq!(frame.progress, 0.0);
        assert_eq!(live, pose(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_request_while_transitioning_is_ignored() {
        let mut controller = TransitionController::default();
        let mut live = pose(0.0, 0.0, 5.0);
        let first = pose(5.0, 0.0, 0.0);
        let second = pose(0.0, -5.0, 0.0);

        assert!(controller.request_view(&live, first, 0.0));
        controller.advance(300.0, &mut live);
        assert!(!controller.request_view(&live, second, 300.0));
        assert_eq!(controller.end_pose(), Some(first));

        let mut now = 300.0;
        while controller.is_transitioning() {
            now += 16.0;
            controller.advance(now, &mut live);
        }
        assert_eq!(live, first);

        // idle again, so a new request is accepted
        assert!(controller.request_view(&live, second, now));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut controller = TransitionController::new(0.0);
        let mut live = pose(0.0, 0.0, 1.0);
        controller.request_view(&live, pose(1.0, 1.0, 1.0), 42.0);
        let frame = controller.advance(42.0, &mut live).unwrap();
        assert!(frame.finished);
        assert_eq!(live, pose(1.0, 1.0, 1.0));
    }
}
