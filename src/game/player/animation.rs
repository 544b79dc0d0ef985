// Cyclic frame animation

use std::time::Duration;

use crate::game::config::ConfigError;

/// Plays a fixed set of frames in a loop, one step every `frame_rate`.
///
/// Generic over the frame handle so the simulation never holds textures;
/// the renderer resolves handles to sprite regions. The caller decides when
/// the animation is active: `update` is only meant to be called between
/// `enter` and `exit`.
#[derive(Debug, Clone)]
pub struct Animation<F> {
    frames: Vec<F>,
    /// Seconds each frame stays on screen
    frame_duration: f32,
    current_frame_index: usize,
    /// Time since the last frame advance (or since `enter`)
    elapsed: f32,
}

impl<F: Copy> Animation<F> {
    pub fn new(frames: Vec<F>, frame_rate: Duration) -> Result<Self, ConfigError> {
        if frames.is_empty() {
            return Err(ConfigError::NoFrames);
        }
        if frame_rate.is_zero() {
            return Err(ConfigError::ZeroFrameRate);
        }

        Ok(Self {
            frames,
            frame_duration: frame_rate.as_secs_f32(),
            current_frame_index: 0,
            elapsed: 0.0,
        })
    }

    /// Start playback from the first frame
    pub fn enter(&mut self) {
        self.current_frame_index = 0;
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds. Moves at most one frame per call.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.frame_duration {
            self.elapsed = 0.0;
            self.current_frame_index = (self.current_frame_index + 1) % self.frames.len();
        }
    }

    /// Stop on the first frame
    pub fn exit(&mut self) {
        self.current_frame_index = 0;
    }

    pub fn current_frame(&self) -> F {
        self.frames[self.current_frame_index]
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame_index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_frames() -> Animation<char> {
        Animation::new(vec!['a', 'b', 'c'], Duration::from_millis(250)).unwrap()
    }

    #[test]
    fn test_animation_creation() {
        let anim = three_frames();
        assert_eq!(anim.frame_count(), 3);
        assert_eq!(anim.current_frame_index(), 0);
        assert_eq!(anim.current_frame(), 'a');
        assert_eq!(anim.frame_duration(), 0.25);
    }

    #[test]
    fn test_invalid_animations_rejected() {
        let empty: Result<Animation<u8>, _> = Animation::new(Vec::new(), Duration::from_millis(100));
        assert!(matches!(empty, Err(ConfigError::NoFrames)));

        let frozen = Animation::new(vec![1u8], Duration::ZERO);
        assert!(matches!(frozen, Err(ConfigError::ZeroFrameRate)));
    }

    #[test]
    fn test_holds_frame_until_frame_rate_elapsed() {
        let mut anim = three_frames();
        anim.enter();
        anim.update(0.1);
        anim.update(0.1);
        assert_eq!(anim.current_frame_index(), 0);

        anim.update(0.05);
        assert_eq!(anim.current_frame_index(), 1);
    }

    #[test]
    fn test_timing_reference_restarts_on_advance() {
        let mut anim = three_frames();
        anim.enter();

        // A long gap advances once and does not carry the surplus over
        anim.update(1.0);
        assert_eq!(anim.current_frame_index(), 1);
        anim.update(0.1);
        assert_eq!(anim.current_frame_index(), 1);
    }

    #[test]
    fn test_cycles_and_wraps() {
        let mut anim = three_frames();
        anim.enter();

        let mut seen = vec![anim.current_frame()];
        for _ in 0..3 {
            anim.update(0.25);
            seen.push(anim.current_frame());
        }
        assert_eq!(seen, vec!['a', 'b', 'c', 'a']);
    }

    #[test]
    fn test_exit_resets_to_first_frame() {
        let mut anim = three_frames();
        anim.enter();
        anim.update(0.25);
        anim.update(0.25);
        assert_eq!(anim.current_frame_index(), 2);

        anim.exit();
        assert_eq!(anim.current_frame_index(), 0);

        // Idempotent
        anim.exit();
        assert_eq!(anim.current_frame(), 'a');
    }

    #[test]
    fn test_enter_restarts_timing() {
        let mut anim = three_frames();
        anim.update(0.2);
        anim.enter();
        anim.update(0.1);
        assert_eq!(anim.current_frame_index(), 0);
    }

    #[test]
    fn test_single_frame_animation() {
        let mut anim = Animation::new(vec![7u32], Duration::from_millis(10)).unwrap();
        anim.update(1.0);
        assert_eq!(anim.current_frame_index(), 0);
        assert_eq!(anim.current_frame(), 7);
    }
}
