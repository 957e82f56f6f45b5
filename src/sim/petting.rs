//! The petting rhythm state machine
//!
//! While a session runs, pointer motion is sampled once per tick into a
//! bounded rolling window. The window's mean - the pet speed - is
//! classified against the tiger's speed band, and only the *integrated*
//! excess outside the band accumulates toward failure, so a brief
//! twitch never ends a session on its own. Running out of time is a win:
//! the tiger got petted acceptably for the whole countdown.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tigers::Tiger;
use crate::config::Config;
use crate::consts::PURR_SATURATION;

/// The tiger's reaction, both per-tick feedback and session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// In the band - the tiger is happy
    Purr,
    /// Too slow for too long - the tiger got bored
    Yawn,
    /// Too fast for too long - the tiger got angry
    Grrr,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Purr => "purr",
            Feedback::Yawn => "yawn",
            Feedback::Grrr => "grrr",
        }
    }
}

/// Per-tiger petting session state; created on entering PETTING mode and
/// dropped on leaving it, whatever the outcome
#[derive(Debug, Clone)]
pub struct PettingSession {
    /// Recent pointer-motion distances, newest first, at most
    /// `num_samples` entries. Empty means "no input yet" and reads as a
    /// pet speed of zero.
    samples: Vec<f32>,
    num_samples: usize,
    /// Pointer position at the previous down-sample; cleared on button-up
    /// so releasing and re-grabbing never produces a phantom huge stroke
    last_pointer: Option<Vec2>,
    pub purr_score: f32,
    pub yawn_score: f32,
    pub grrr_score: f32,
    pub remaining_ticks: u32,
    /// Feedback shown this tick
    pub feedback: Feedback,
    yawn_max: f32,
    grrr_max: f32,
}

impl PettingSession {
    pub fn new(config: &Config) -> Self {
        Self {
            samples: Vec::with_capacity(config.num_pet_samples),
            num_samples: config.num_pet_samples,
            last_pointer: None,
            purr_score: 0.0,
            yawn_score: 0.0,
            grrr_score: 0.0,
            remaining_ticks: config.petting_time_ticks,
            feedback: Feedback::Purr,
            yawn_max: config.yawn_max,
            grrr_max: config.grrr_max,
        }
    }

    /// Mean of the rolling window; zero before any sample arrives
    pub fn pet_speed(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    fn push_sample(&mut self, distance: f32) {
        self.samples.insert(0, distance);
        if self.samples.len() > self.num_samples {
            self.samples.pop();
        }
    }

    /// Record one tick of pointer state
    fn sample(&mut self, pointer: Vec2, button_down: bool) {
        if button_down {
            let distance = self
                .last_pointer
                .map(|prev| crate::distance(prev, pointer))
                .unwrap_or(0.0);
            self.push_sample(distance);
            self.last_pointer = Some(pointer);
        } else {
            self.push_sample(0.0);
            self.last_pointer = None;
        }
    }

    /// Advance the session one tick. Returns the outcome once the session
    /// is over; exactly one outcome ever fires.
    pub fn tick(&mut self, tiger: &Tiger, pointer: Vec2, button_down: bool) -> Option<Feedback> {
        self.sample(pointer, button_down);

        let speed = self.pet_speed();
        if speed >= tiger.too_fast {
            self.grrr_score += speed - tiger.too_fast;
            self.feedback = Feedback::Grrr;
        } else if speed <= tiger.too_slow {
            self.yawn_score += tiger.too_slow - speed;
            self.feedback = Feedback::Yawn;
        } else {
            let delta = (speed - tiger.desired_pet_speed).abs();
            // Exact match would divide by zero; saturate instead
            let gain = if delta > 0.0 {
                (1.0 / delta).min(PURR_SATURATION)
            } else {
                PURR_SATURATION
            };
            self.purr_score += gain;
            self.feedback = Feedback::Purr;
        }

        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);

        // Termination priority: timeout is a success, then boredom, then
        // anger
        if self.remaining_ticks == 0 {
            Some(Feedback::Purr)
        } else if self.yawn_score >= self.yawn_max {
            Some(Feedback::Yawn)
        } else if self.grrr_score >= self.grrr_max {
            Some(Feedback::Grrr)
        } else {
            None
        }
    }
}
