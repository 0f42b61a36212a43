use std::time::{Duration, Instant};

/// Fixed-rate redraw scheduling for a winit loop.
///
/// The loop asks [`FramePacer::due`] before requesting a redraw and sleeps with
/// `ControlFlow::WaitUntil(deadline)` otherwise. A late frame pushes the schedule forward
/// instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Option<Duration>,
    next: Instant,
    last: Option<Instant>,
}

impl FramePacer {
    /// `target_fps == 0` disables pacing.
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let frame = (target_fps > 0).then(|| Duration::from_secs(1) / target_fps);
        Self {
            frame,
            next: now,
            last: None,
        }
    }

    pub fn due(&self, now: Instant) -> bool {
        self.frame.is_none() || now >= self.next
    }

    /// When the next frame is due; `None` when unpaced.
    pub fn deadline(&self) -> Option<Instant> {
        self.frame.map(|_| self.next)
    }

    /// Start a frame at `now`; returns seconds since the previous one.
    ///
    /// The first tick reports the nominal frame time (or 0 when unpaced).
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.frame.unwrap_or_default(),
        };
        self.last = Some(now);

        if let Some(frame) = self.frame {
            self.next += frame;
            if self.next <= now {
                self.next = now + frame;
            }
        }

        dt.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_nominal() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(50, t0);
        assert!(pacer.due(t0));
        let dt = pacer.tick(t0);
        assert!((dt - 0.02).abs() < 1e-6, "{dt}");
        assert_eq!(pacer.deadline(), Some(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn not_due_before_deadline() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(50, t0);
        pacer.tick(t0);
        assert!(!pacer.due(t0 + Duration::from_millis(10)));
        assert!(pacer.due(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn dt_is_real_elapsed_time() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(50, t0);
        pacer.tick(t0);
        let dt = pacer.tick(t0 + Duration::from_millis(33));
        assert!((dt - 0.033).abs() < 1e-4, "{dt}");
    }

    #[test]
    fn late_frame_does_not_burst() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(50, t0);
        pacer.tick(t0);
        let late = t0 + Duration::from_millis(200);
        pacer.tick(late);
        assert_eq!(pacer.deadline(), Some(late + Duration::from_millis(20)));
        assert!(!pacer.due(late + Duration::from_millis(1)));
    }

    #[test]
    fn zero_fps_is_unpaced() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(0, t0);
        assert_eq!(pacer.deadline(), None);
        assert!(pacer.due(t0));
        assert_eq!(pacer.tick(t0), 0.0);
    }
}
