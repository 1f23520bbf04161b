use crate::path::FrameClock;

/// Frame counter behind a demo's `requestAnimationFrame` loop.
///
/// The browser callback keeps re-scheduling itself while `active` is true;
/// clearing the flag is the only way to cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Whether the animation loop should keep running
    pub active: bool,
    /// Current frame number
    pub frame: u32,
    /// Frames in one pass
    pub frames: u32,
    /// Wrap back to frame 0 after the last frame instead of stopping
    pub looping: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            active: false,
            frame: 0,
            frames: 240,
            looping: true,
        }
    }
}

impl AnimationState {
    pub fn new(frames: u32, looping: bool) -> Self {
        Self {
            frames: frames.max(1),
            looping,
            ..Default::default()
        }
    }

    pub fn start(&mut self) {
        if !self.looping && self.frame >= self.frames {
            self.frame = 0;
        }
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance one frame and return the new frame number. A non-looping
    /// animation stops itself on its last frame.
    pub fn step(&mut self) -> u32 {
        if self.frame >= self.frames {
            if self.looping {
                self.frame = 0;
            }
        } else {
            self.frame += 1;
        }

        if !self.looping && self.frame >= self.frames {
            self.active = false;
        }
        self.frame
    }

    /// Progress through the current pass, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        self.clock().parameter(self.frame)
    }

    pub fn clock(&self) -> FrameClock {
        FrameClock::new(0, self.frames)
    }

    pub fn is_complete(&self) -> bool {
        !self.looping && self.frame >= self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop() {
        let mut anim = AnimationState::new(10, true);
        assert!(!anim.active);
        anim.start();
        assert!(anim.active);
        anim.stop();
        assert!(!anim.active);
    }

    #[test]
    fn test_progress() {
        let mut anim = AnimationState::new(4, false);
        assert_eq!(anim.progress(), 0.0);
        anim.step();
        anim.step();
        assert_eq!(anim.progress(), 0.5);
    }

    #[test]
    fn test_looping_wraps() {
        let mut anim = AnimationState::new(3, true);
        anim.start();
        let frames: Vec<u32> = (0..8).map(|_| anim.step()).collect();
        assert_eq!(frames, vec![1, 2, 3, 0, 1, 2, 3, 0]);
        assert!(anim.active);
    }

    #[test]
    fn test_one_shot_stops_itself() {
        let mut anim = AnimationState::new(2, false);
        anim.start();
        anim.step();
        assert!(anim.active);
        anim.step();
        assert!(!anim.active);
        assert!(anim.is_complete());
        assert_eq!(anim.progress(), 1.0);

        // Further steps hold on the last frame
        assert_eq!(anim.step(), 2);

        // Starting again replays from the beginning
        anim.start();
        assert!(anim.active);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn test_zero_frames_clamped() {
        let anim = AnimationState::new(0, false);
        assert_eq!(anim.frames, 1);
    }
}
