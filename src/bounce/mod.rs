//! Two glowing particles running around the border of a rectangle.
//!
//! Each particle moves along one axis at a time. Reaching the end of a rail
//! turns it 90° onto the perpendicular rail, always towards the inside of
//! the rectangle, which keeps its clockwise or counter-clockwise sense. When
//! the particles come close while approaching each other both reverse.

use crate::config::{
    COLLISION_PADDING, CORNER_MARGIN, GLOW_SCALE, PARTICLE_A_COLOR, PARTICLE_B_COLOR,
    PARTICLE_RADIUS, PARTICLE_SPEED,
};

/// The four rails particles travel on, in surface pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perimeter {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Perimeter {
    /// Rails inset by `CORNER_MARGIN` from the surface edges.
    /// Surfaces too small for the margin collapse to a line or point.
    pub fn for_surface(width: f32, height: f32) -> Self {
        let left = CORNER_MARGIN.min(width / 2.0);
        let top = CORNER_MARGIN.min(height / 2.0);
        Self {
            left,
            top,
            right: (width - CORNER_MARGIN).max(left),
            bottom: (height - CORNER_MARGIN).max(top),
        }
    }

    fn nearer_horizontal_rail(&self, y: f32) -> f32 {
        if (y - self.top).abs() <= (y - self.bottom).abs() {
            self.top
        } else {
            self.bottom
        }
    }

    fn nearer_vertical_rail(&self, x: f32) -> f32 {
        if (x - self.left).abs() <= (x - self.right).abs() {
            self.left
        } else {
            self.right
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub color: [f32; 4],
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, color: [f32; 4]) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            radius: PARTICLE_RADIUS,
            color,
        }
    }

    pub fn glow_radius(&self) -> f32 {
        self.radius * GLOW_SCALE
    }

    pub fn moving_horizontally(&self) -> bool {
        self.vx != 0.0
    }

    /// Put the off-axis coordinate on the nearer rail
    fn snap_to_rail(&mut self, perimeter: &Perimeter) {
        if self.moving_horizontally() {
            self.y = perimeter.nearer_horizontal_rail(self.y);
            self.x = self.x.clamp(perimeter.left, perimeter.right);
        } else {
            self.x = perimeter.nearer_vertical_rail(self.x);
            self.y = self.y.clamp(perimeter.top, perimeter.bottom);
        }
    }

    /// Move one tick, turning if a corner is reached
    fn advance(&mut self, perimeter: &Perimeter) {
        self.x += self.vx;
        self.y += self.vy;

        if self.moving_horizontally() {
            let at_end = (self.vx > 0.0 && self.x >= perimeter.right)
                || (self.vx < 0.0 && self.x <= perimeter.left);
            if at_end {
                let speed = self.vx.abs();
                self.x = self.x.clamp(perimeter.left, perimeter.right);
                self.vx = 0.0;
                self.vy = if self.y == perimeter.top { speed } else { -speed };
                self.snap_to_rail(perimeter);
            }
        } else {
            let at_end = (self.vy > 0.0 && self.y >= perimeter.bottom)
                || (self.vy < 0.0 && self.y <= perimeter.top);
            if at_end {
                let speed = self.vy.abs();
                self.y = self.y.clamp(perimeter.top, perimeter.bottom);
                self.vy = 0.0;
                self.vx = if self.x == perimeter.left { speed } else { -speed };
                self.snap_to_rail(perimeter);
            }
        }
    }

    fn distance_to(&self, other: &Particle) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn approaching(&self, other: &Particle) -> bool {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        let (dvx, dvy) = (other.vx - self.vx, other.vy - self.vy);
        dx * dvx + dy * dvy < 0.0
    }

    /// Reverse and take one step along the new heading
    fn bounce(&mut self, perimeter: &Perimeter) {
        self.vx = -self.vx;
        self.vy = -self.vy;
        self.x += self.vx;
        self.y += self.vy;
        self.snap_to_rail(perimeter);
    }
}

/// The complete animation state
pub struct Bounce {
    perimeter: Perimeter,
    particles: [Particle; 2],
    frames: u64,
}

impl Bounce {
    /// Particle A starts top-left heading clockwise, particle B starts
    /// bottom-left heading counter-clockwise.
    pub fn new(width: f32, height: f32) -> Self {
        let perimeter = Perimeter::for_surface(width, height);
        let a = Particle::new(perimeter.left, perimeter.top, PARTICLE_SPEED, 0.0, PARTICLE_A_COLOR);
        let b = Particle::new(perimeter.left, perimeter.bottom, PARTICLE_SPEED, 0.0, PARTICLE_B_COLOR);
        Self {
            perimeter,
            particles: [a, b],
            frames: 0,
        }
    }

    pub fn perimeter(&self) -> &Perimeter {
        &self.perimeter
    }

    pub fn particles(&self) -> &[Particle; 2] {
        &self.particles
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fit the rails to a new surface and put both particles back on them
    pub fn resize(&mut self, width: f32, height: f32) {
        self.perimeter = Perimeter::for_surface(width, height);
        for particle in &mut self.particles {
            particle.snap_to_rail(&self.perimeter);
        }
    }

    /// Distance below which the pair collides
    pub fn collision_distance(&self) -> f32 {
        self.particles[0].radius + self.particles[1].radius + COLLISION_PADDING
    }

    /// Advance one animation frame
    pub fn tick(&mut self) {
        for particle in &mut self.particles {
            particle.advance(&self.perimeter);
        }

        let threshold = self.collision_distance();
        let [a, b] = &mut self.particles;
        if a.distance_to(b) < threshold && a.approaching(b) {
            a.bounce(&self.perimeter);
            b.bounce(&self.perimeter);
            log::debug!("Particles collided at frame {}", self.frames);
        }

        self.frames += 1;
    }
}
