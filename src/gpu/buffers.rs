use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::bounce::Bounce;
use crate::config::{CELL_SIZE, LIFE_BACKGROUND, LIFE_CELL, LIFE_GRID_LINE, RAIL_COLOR};
use crate::simulation::{Cell, Engine};

/// Grid parameters passed to the life shader (64 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LifeParams {
    pub cols: u32,
    pub rows: u32,
    /// Cell edge in logical pixels
    pub cell_size: f32,
    /// Physical pixels per logical pixel
    pub scale_factor: f32,

    pub background: [f32; 4],
    pub grid_line: [f32; 4],
    pub live_cell: [f32; 4],
}

impl LifeParams {
    pub fn for_engine(engine: &Engine, scale_factor: f64) -> Self {
        Self {
            cols: engine.cols() as u32,
            rows: engine.rows() as u32,
            cell_size: CELL_SIZE as f32,
            scale_factor: scale_factor as f32,
            background: LIFE_BACKGROUND,
            grid_line: LIFE_GRID_LINE,
            live_cell: LIFE_CELL,
        }
    }
}

/// Cell storage and parameters for drawing the automaton.
///
/// The storage buffer only ever grows; a smaller grid reuses the prefix.
pub struct LifeBuffers {
    pub cells_buffer: Buffer,
    pub params_buffer: Buffer,
    capacity: usize,
}

impl LifeBuffers {
    pub fn new(device: &Device, queue: &Queue, engine: &Engine, scale_factor: f64) -> Self {
        let capacity = engine.cells().len().max(1);
        let cells_buffer = create_cells_buffer(device, capacity);

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("life-params-buffer"),
            size: std::mem::size_of::<LifeParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let buffers = Self {
            cells_buffer,
            params_buffer,
            capacity,
        };
        buffers.write(queue, engine, scale_factor);
        buffers
    }

    /// Upload the engine's current generation, growing storage if needed
    pub fn upload(&mut self, device: &Device, queue: &Queue, engine: &Engine, scale_factor: f64) {
        let needed = engine.cells().len();
        if needed > self.capacity {
            log::debug!("Growing cell buffer from {} to {} cells", self.capacity, needed);
            self.cells_buffer = create_cells_buffer(device, needed);
            self.capacity = needed;
        }
        self.write(queue, engine, scale_factor);
    }

    fn write(&self, queue: &Queue, engine: &Engine, scale_factor: f64) {
        let cells = engine.cells();
        if !cells.is_empty() {
            queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(cells));
        }
        let params = LifeParams::for_engine(engine, scale_factor);
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

fn create_cells_buffer(device: &Device, cells: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("life-cells-buffer"),
        size: (cells * std::mem::size_of::<Cell>()) as u64,
        usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Particle and rail parameters passed to the bounce shader (96 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BounceParams {
    /// left, top, right, bottom
    pub rails: [f32; 4],
    pub rail_color: [f32; 4],
    /// x, y, radius, glow radius
    pub particle_a: [f32; 4],
    pub color_a: [f32; 4],
    pub particle_b: [f32; 4],
    pub color_b: [f32; 4],
}

impl BounceParams {
    pub fn for_bounce(bounce: &Bounce) -> Self {
        let rails = bounce.perimeter();
        let [a, b] = bounce.particles();
        Self {
            rails: [rails.left, rails.top, rails.right, rails.bottom],
            rail_color: RAIL_COLOR,
            particle_a: [a.x, a.y, a.radius, a.glow_radius()],
            color_a: a.color,
            particle_b: [b.x, b.y, b.radius, b.glow_radius()],
            color_b: b.color,
        }
    }
}

pub struct BounceBuffers {
    pub params_buffer: Buffer,
}

impl BounceBuffers {
    pub fn new(device: &Device) -> Self {
        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bounce-params-buffer"),
            size: std::mem::size_of::<BounceParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { params_buffer }
    }

    pub fn upload(&self, queue: &Queue, bounce: &Bounce) {
        let params = BounceParams::for_bounce(bounce);
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<LifeParams>(), 64);
        assert_eq!(std::mem::size_of::<BounceParams>(), 96);
    }

    #[test]
    fn test_life_params_follow_engine() {
        let engine = Engine::new(60, 40);
        let params = LifeParams::for_engine(&engine, 2.0);
        assert_eq!((params.cols, params.rows), (60, 40));
        assert_eq!(params.cell_size, CELL_SIZE as f32);
        assert_eq!(params.scale_factor, 2.0);
    }

    #[test]
    fn test_bounce_params_pack_particles() {
        let bounce = Bounce::new(400.0, 240.0);
        let params = BounceParams::for_bounce(&bounce);
        assert_eq!(params.rails, [20.0, 20.0, 380.0, 220.0]);
        assert_eq!(params.particle_a, [20.0, 20.0, 8.0, 32.0]);
        assert_eq!(params.particle_b, [20.0, 220.0, 8.0, 32.0]);
    }
}
