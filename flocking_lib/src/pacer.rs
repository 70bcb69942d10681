use std::time::Duration;

/// Frame-rate governor working off the time elapsed since the app started.
///
/// The caller asks [`FramePacer::ready`] once per loop iteration and runs a
/// frame only when it says so.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Option<Duration>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        FramePacer {
            interval: Duration::from_secs_f64(1. / fps.max(1) as f64),
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a full interval has passed since the last accepted frame. A
    /// `true` answer starts the next frame at `since_start`.
    pub fn ready(&mut self, since_start: Duration) -> bool {
        let ready = match self.last_frame {
            None => true,
            Some(last) => since_start.saturating_sub(last) >= self.interval,
        };

        if ready {
            self.last_frame = Some(since_start);
        }
        ready
    }

    pub fn remaining(&self, since_start: Duration) -> Duration {
        match self.last_frame {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(since_start.saturating_sub(last)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::FramePacer;

    #[test]
    fn first_frame_is_always_ready() {
        let mut pacer = FramePacer::new(60);

        assert_eq!(pacer.remaining(Duration::ZERO), Duration::ZERO);
        assert!(pacer.ready(Duration::from_millis(3)));
    }

    #[test]
    fn waits_for_a_full_interval() {
        let mut pacer = FramePacer::new(50);
        assert_eq!(pacer.interval(), Duration::from_millis(20));

        assert!(pacer.ready(Duration::ZERO));
        assert!(!pacer.ready(Duration::from_millis(5)));
        assert_eq!(
            pacer.remaining(Duration::from_millis(5)),
            Duration::from_millis(15)
        );
        assert!(!pacer.ready(Duration::from_millis(19)));
        assert!(pacer.ready(Duration::from_millis(20)));
        assert!(!pacer.ready(Duration::from_millis(30)));
        assert!(pacer.ready(Duration::from_millis(45)));
    }

    #[test]
    fn late_frames_do_not_accumulate() {
        let mut pacer = FramePacer::new(50);

        assert!(pacer.ready(Duration::ZERO));
        assert!(pacer.ready(Duration::from_millis(100)));
        assert!(!pacer.ready(Duration::from_millis(110)));
        assert_eq!(pacer.remaining(Duration::from_millis(200)), Duration::ZERO);
    }
}
