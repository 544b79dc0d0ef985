/// Game loop timing
///
/// Fixed timestep updates with variable rendering: the simulation always
/// advances in steps of `FIXED_TIMESTEP`, however long a rendered frame
/// took, so per-tick constants such as gravity behave the same on every
/// machine.
use std::time::{Duration, Instant};

/// Target simulation rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of updates per frame to prevent spiral of death
const MAX_UPDATES_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Time not yet consumed by fixed updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,

    /// Current FPS (updated every 10 frames)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a game loop whose first frame is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: start,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        self.begin_frame_at(Instant::now())
    }

    /// Begin a frame observed at `now`
    pub fn begin_frame_at(&mut self, now: Instant) -> u32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATES_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop the backlog after a stall instead of replaying it later
        if updates == MAX_UPDATES_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::warn!(
                "Simulation fell behind by {:?}, skipping ahead",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.update_count += updates as u64;
        updates
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.update_count(), 0);
        assert_eq!(game_loop.fps(), 0.0);
    }

    #[test]
    fn test_fixed_timestep_matches_duration() {
        assert!((FIXED_TIMESTEP - 1.0 / 60.0).abs() < 0.0001);
        assert!(
            (FIXED_TIMESTEP_DURATION.as_secs_f32() - FIXED_TIMESTEP).abs() < 0.0001
        );
    }

    #[test]
    fn test_frame_counting() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        game_loop.begin_frame_at(start);
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.begin_frame_at(start + Duration::from_millis(1));
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_short_frame_runs_no_update() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        assert_eq!(game_loop.begin_frame_at(start + Duration::from_millis(5)), 0);
    }

    #[test]
    fn test_one_update_per_frame_at_60hz() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        let mut now = start;
        let mut total = 0;
        for _ in 0..60 {
            now += FIXED_TIMESTEP_DURATION;
            total += game_loop.begin_frame_at(now);
        }
        assert_eq!(total, 60);
        assert_eq!(game_loop.update_count(), 60);
    }

    #[test]
    fn test_remainder_carries_over() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        // 10ms + 10ms = one 16.667ms step
        assert_eq!(game_loop.begin_frame_at(start + Duration::from_millis(10)), 0);
        assert_eq!(game_loop.begin_frame_at(start + Duration::from_millis(20)), 1);
    }

    #[test]
    fn test_max_updates_limit() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        // 300ms would allow 18 updates
        let updates = game_loop.begin_frame_at(start + Duration::from_millis(300));
        assert_eq!(updates, MAX_UPDATES_PER_FRAME);

        // Backlog dropped
        let updates = game_loop.begin_frame_at(start + Duration::from_millis(301));
        assert_eq!(updates, 0);
    }

    #[test]
    fn test_fps_estimate() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);

        let mut now = start;
        for _ in 0..10 {
            now += Duration::from_millis(20);
            game_loop.begin_frame_at(now);
        }
        assert!((game_loop.fps() - 50.0).abs() < 0.5);
    }
}
