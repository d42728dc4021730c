//! Tuning parameters for one episode.
//!
//! Defaults come from [`crate::constants`]. A tuning is validated once, when
//! an episode is constructed; nothing is renegotiated while it runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Rejected tuning values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("tick_rate must be non-zero")]
    ZeroTickRate,
    #[error("animation_ticks must be non-zero")]
    ZeroAnimationTicks,
    #[error("gap center range {min}..{max} is empty")]
    EmptyGapRange { min: i32, max: i32 },
    #[error("ground_y {ground_y} lies outside the play area height {play_height}")]
    GroundOutsidePlayArea { ground_y: f64, play_height: f64 },
    #[error("min_tilt {min_tilt} must be below max_tilt {max_tilt}")]
    InvertedTilt { min_tilt: f64, max_tilt: f64 },
}

/// All episode tuning knobs, in screen pixels and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub tick_rate: u32,

    pub play_width: f64,
    pub play_height: f64,
    pub ground_y: f64,
    pub ground_tile_width: f64,
    pub ground_velocity: f64,

    pub agent_start_x: f64,
    pub agent_start_y: f64,
    pub gravity: f64,
    pub terminal_displacement: f64,
    pub apex_offset: f64,
    pub jump_velocity: f64,
    pub max_tilt: f64,
    pub tilt_step: f64,
    pub min_tilt: f64,
    pub animation_ticks: u32,
    pub dive_tilt: f64,

    pub gap_size: f64,
    pub obstacle_velocity: f64,
    pub gap_center_min: i32,
    pub gap_center_max: i32,
    pub initial_obstacle_x: f64,
    pub spawn_x: f64,

    pub lookahead: f64,
    pub jump_threshold: f64,

    pub survival_reward: f64,
    pub collision_penalty: f64,
    pub pass_bonus: f64,
    pub boundary_penalty: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            ground_y: GROUND_Y,
            ground_tile_width: GROUND_TILE_WIDTH,
            ground_velocity: GROUND_VELOCITY,
            agent_start_x: AGENT_START_X,
            agent_start_y: AGENT_START_Y,
            gravity: GRAVITY,
            terminal_displacement: TERMINAL_DISPLACEMENT,
            apex_offset: APEX_OFFSET,
            jump_velocity: JUMP_VELOCITY,
            max_tilt: MAX_TILT,
            tilt_step: TILT_STEP,
            min_tilt: MIN_TILT,
            animation_ticks: ANIMATION_TICKS,
            dive_tilt: DIVE_TILT,
            gap_size: GAP_SIZE,
            obstacle_velocity: OBSTACLE_VELOCITY,
            gap_center_min: GAP_CENTER_MIN,
            gap_center_max: GAP_CENTER_MAX,
            initial_obstacle_x: INITIAL_OBSTACLE_X,
            spawn_x: SPAWN_X,
            lookahead: LOOKAHEAD,
            jump_threshold: JUMP_THRESHOLD,
            survival_reward: SURVIVAL_REWARD,
            collision_penalty: COLLISION_PENALTY,
            pass_bonus: PASS_BONUS,
            boundary_penalty: BOUNDARY_PENALTY,
        }
    }
}

impl Tuning {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    /// Check every value; the first violation is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.animation_ticks == 0 {
            return Err(ConfigError::ZeroAnimationTicks);
        }

        let finite = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("ground_y", self.ground_y),
            ("ground_tile_width", self.ground_tile_width),
            ("ground_velocity", self.ground_velocity),
            ("agent_start_x", self.agent_start_x),
            ("agent_start_y", self.agent_start_y),
            ("gravity", self.gravity),
            ("terminal_displacement", self.terminal_displacement),
            ("apex_offset", self.apex_offset),
            ("jump_velocity", self.jump_velocity),
            ("max_tilt", self.max_tilt),
            ("tilt_step", self.tilt_step),
            ("min_tilt", self.min_tilt),
            ("dive_tilt", self.dive_tilt),
            ("gap_size", self.gap_size),
            ("obstacle_velocity", self.obstacle_velocity),
            ("initial_obstacle_x", self.initial_obstacle_x),
            ("spawn_x", self.spawn_x),
            ("lookahead", self.lookahead),
            ("jump_threshold", self.jump_threshold),
            ("survival_reward", self.survival_reward),
            ("collision_penalty", self.collision_penalty),
            ("pass_bonus", self.pass_bonus),
            ("boundary_penalty", self.boundary_penalty),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let positive = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("ground_y", self.ground_y),
            ("ground_tile_width", self.ground_tile_width),
            ("terminal_displacement", self.terminal_displacement),
            ("gap_size", self.gap_size),
            ("obstacle_velocity", self.obstacle_velocity),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("apex_offset", self.apex_offset),
            ("tilt_step", self.tilt_step),
            ("ground_velocity", self.ground_velocity),
            ("survival_reward", self.survival_reward),
            ("collision_penalty", self.collision_penalty),
            ("pass_bonus", self.pass_bonus),
            ("boundary_penalty", self.boundary_penalty),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.gap_center_min >= self.gap_center_max {
            return Err(ConfigError::EmptyGapRange {
                min: self.gap_center_min,
                max: self.gap_center_max,
            });
        }
        if self.ground_y > self.play_height {
            return Err(ConfigError::GroundOutsidePlayArea {
                ground_y: self.ground_y,
                play_height: self.play_height,
            });
        }
        if self.min_tilt >= self.max_tilt {
            return Err(ConfigError::InvertedTilt {
                min_tilt: self.min_tilt,
                max_tilt: self.max_tilt,
            });
        }
        Ok(())
    }
}
