//! Frame timing for the demo loop

use std::collections::VecDeque;
use std::time::Instant;

/// Delta time per frame plus a rolling average for the FPS log line
pub struct FrameClock {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
    frames: u64,
}

impl FrameClock {
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
            frames: 0,
        }
    }

    /// Call once at the start of each frame; returns seconds since the last call
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f32) {
        self.frames += 1;
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    pub fn average_fps(&self) -> f32 {
        let avg_dt = self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    /// True once every `sample_count` frames
    pub fn window_elapsed(&self) -> bool {
        self.frames > 0 && self.frames % self.sample_count as u64 == 0
    }
}
