use std::time::Duration;

// ============================================
// Game of Life
// ============================================

/// Edge length of one automaton cell in logical pixels
pub const CELL_SIZE: u32 = 10;

/// Minimum time between two automaton generations (~6.7 generations per second)
pub const STEP_INTERVAL: Duration = Duration::from_millis(150);

/// Fraction of the grid seeded alive by Randomize
pub const DEFAULT_DENSITY: f64 = 0.2;

/// Initial automaton window size (logical pixels)
pub const LIFE_WINDOW_WIDTH: u32 = 600;
pub const LIFE_WINDOW_HEIGHT: u32 = 400;

/// Background, grid line and live cell colours (linear RGBA)
pub const LIFE_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const LIFE_GRID_LINE: [f32; 4] = [0.133, 0.133, 0.133, 1.0];
pub const LIFE_CELL: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

// ============================================
// Perimeter bounce
// ============================================

/// Particle body radius in pixels
pub const PARTICLE_RADIUS: f32 = 8.0;

/// Glow radius as a multiple of the body radius
pub const GLOW_SCALE: f32 = 4.0;

/// Distance travelled per animation tick
pub const PARTICLE_SPEED: f32 = 2.0;

/// Extra spacing added to the summed radii before two particles collide
pub const COLLISION_PADDING: f32 = 10.0;

/// Distance of the perimeter rails from the surface edges
pub const CORNER_MARGIN: f32 = 20.0;

/// Initial bounce window size (logical pixels)
pub const BOUNCE_WINDOW_WIDTH: u32 = 400;
pub const BOUNCE_WINDOW_HEIGHT: u32 = 240;

pub const PARTICLE_A_COLOR: [f32; 4] = [0.2, 0.8, 1.0, 1.0];
pub const PARTICLE_B_COLOR: [f32; 4] = [1.0, 0.3, 0.7, 1.0];
pub const RAIL_COLOR: [f32; 4] = [0.133, 0.133, 0.133, 1.0];
