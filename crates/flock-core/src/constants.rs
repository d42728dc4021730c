//! Simulation constants and tuning defaults.
//!
//! Units are screen pixels and ticks. `Tuning::default()` is built from these.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

// --- Play area ---

/// Visible play area width.
pub const PLAY_WIDTH: f64 = 500.0;

/// Visible play area height.
pub const PLAY_HEIGHT: f64 = 600.0;

/// Top edge of the ground strip. Agents touching it die.
pub const GROUND_Y: f64 = 540.0;

/// Width of one ground tile (two tiles scroll side by side).
pub const GROUND_TILE_WIDTH: f64 = 672.0;

/// Ground scroll speed per tick.
pub const GROUND_VELOCITY: f64 = 5.0;

// --- Agent kinematics ---

/// Fixed horizontal position of every agent.
pub const AGENT_START_X: f64 = 150.0;

/// Vertical spawn position of every agent.
pub const AGENT_START_Y: f64 = 310.0;

/// Acceleration in px/tick². Displacement uses `0.5 * GRAVITY * t²`.
pub const GRAVITY: f64 = 3.0;

/// Maximum downward displacement per tick.
pub const TERMINAL_DISPLACEMENT: f64 = 16.0;

/// Extra lift applied while rising, smooths the apex of the jump arc.
pub const APEX_OFFSET: f64 = 2.0;

/// Velocity set by a jump impulse (negative is up).
pub const JUMP_VELOCITY: f64 = -10.5;

/// Upward tilt while climbing (degrees).
pub const MAX_TILT: f64 = 25.0;

/// Tilt lost per tick while falling (degrees).
pub const TILT_STEP: f64 = 20.0;

/// Nose-down tilt floor (degrees).
pub const MIN_TILT: f64 = -90.0;

/// Ticks each wing frame is held.
pub const ANIMATION_TICKS: u32 = 3;

/// Tilt at or below which the wings freeze on the glide frame.
pub const DIVE_TILT: f64 = -80.0;

// --- Obstacles ---

/// Vertical gap between the top and bottom barrier.
pub const GAP_SIZE: f64 = 200.0;

/// Obstacle scroll speed per tick.
pub const OBSTACLE_VELOCITY: f64 = 5.0;

/// Lowest gap center (inclusive).
pub const GAP_CENTER_MIN: i32 = 50;

/// Highest gap center (exclusive).
pub const GAP_CENTER_MAX: i32 = 350;

/// X of the first obstacle of an episode.
pub const INITIAL_OBSTACLE_X: f64 = 600.0;

/// X at which replacement obstacles appear.
pub const SPAWN_X: f64 = 495.0;

// --- Decision policy ---

/// Horizontal lookahead fed to every policy as the third observation.
pub const LOOKAHEAD: f64 = 200.0;

/// A policy output above this jumps.
pub const JUMP_THRESHOLD: f64 = 0.5;

// --- Fitness ---

/// Credited to every live agent each tick.
pub const SURVIVAL_REWARD: f64 = 0.1;

/// Debited when an agent hits a barrier (also used for policy faults).
pub const COLLISION_PENALTY: f64 = 1.0;

/// Credited to every live agent when an obstacle is passed.
pub const PASS_BONUS: f64 = 5.0;

/// Debited when an agent leaves the vertical play bounds.
pub const BOUNDARY_PENALTY: f64 = 100.0;

// --- Sprites ---

/// Agent sprite width.
pub const AGENT_SPRITE_WIDTH: u32 = 68;

/// Agent sprite height, also the agent's height for the ground test.
pub const AGENT_SPRITE_HEIGHT: u32 = 48;

/// Barrier sprite width.
pub const BARRIER_SPRITE_WIDTH: u32 = 104;

/// Barrier sprite height.
pub const BARRIER_SPRITE_HEIGHT: u32 = 640;

/// Height of the lip at the open end of a barrier.
pub const BARRIER_CAP_HEIGHT: u32 = 48;

/// Inset of the barrier shaft relative to its lip, per side.
pub const BARRIER_SHAFT_INSET: u32 = 4;

/// Number of wing frames in the agent animation.
pub const AGENT_FRAME_COUNT: usize = 3;
