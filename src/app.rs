use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorIcon, Window, WindowId};

use crate::bounce::Bounce;
use crate::config::{
    BOUNCE_WINDOW_HEIGHT, BOUNCE_WINDOW_WIDTH, DEFAULT_DENSITY, LIFE_WINDOW_HEIGHT,
    LIFE_WINDOW_WIDTH,
};
use crate::error::SetupError;
use crate::gpu::{BounceBuffers, GpuContext, LifeBuffers, RenderPipeline};
use crate::simulation::{Controller, Engine, Tick};

/// Encode the frame's single render pass and present it
fn present(gpu: &GpuContext, pipeline: &RenderPipeline, bind_group: &wgpu::BindGroup) {
    let Some(output) = gpu.acquire_frame() else {
        return;
    };

    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });

    pipeline.draw(&mut encoder, &view, bind_group);

    gpu.queue.submit(std::iter::once(encoder.finish()));
    output.present();
}

/// Logical size of a physical surface, truncated to whole pixels
fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let logical = size.to_logical::<f64>(scale_factor);
    (logical.width as u32, logical.height as u32)
}

/// The Game of Life window: owns the controller and its GPU resources
struct LifeView {
    window: Arc<Window>,
    gpu: GpuContext,
    buffers: LifeBuffers,
    pipeline: RenderPipeline,
    controller: Controller,
    cursor: Option<PhysicalPosition<f64>>,
    /// The engine changed since the last upload
    dirty: bool,
}

impl LifeView {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self, SetupError> {
        let window_attrs = Window::default_attributes()
            .with_title("Game of Life")
            .with_inner_size(LogicalSize::new(LIFE_WINDOW_WIDTH, LIFE_WINDOW_HEIGHT))
            .with_cursor(CursorIcon::Pointer);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = pollster::block_on(GpuContext::new(window.clone(), "life-device"))?;

        let scale_factor = window.scale_factor();
        let (width, height) = logical_size(window.inner_size(), scale_factor);
        let engine = Engine::for_surface(width, height);
        log::info!(
            "Game of Life grid: {}x{} cells (scale factor {})",
            engine.cols(),
            engine.rows(),
            scale_factor
        );

        let buffers = LifeBuffers::new(&gpu.device, &gpu.queue, &engine, scale_factor);
        let pipeline = RenderPipeline::life(&gpu.device, gpu.format());

        let view = Self {
            window,
            gpu,
            buffers,
            pipeline,
            controller: Controller::new(engine),
            cursor: None,
            dirty: false,
        };
        view.refresh_title();
        view.window.request_redraw();
        Ok(view)
    }

    fn refresh_title(&self) {
        self.window.set_title(&self.controller.status());
    }

    /// Something changed outside the frame loop: re-upload and paint
    fn changed(&mut self) {
        self.dirty = true;
        self.refresh_title();
        self.window.request_redraw();
    }

    fn render(&mut self) {
        if self.dirty {
            self.buffers.upload(
                &self.gpu.device,
                &self.gpu.queue,
                self.controller.engine(),
                self.window.scale_factor(),
            );
            self.dirty = false;
        }

        let bind_group = self.pipeline.create_bind_group(
            &self.gpu.device,
            &[&self.buffers.cells_buffer, &self.buffers.params_buffer],
        );
        present(&self.gpu, &self.pipeline, &bind_group);
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            // Start/Stop
            KeyCode::Space => {
                self.controller.toggle_running(Instant::now());
            }
            KeyCode::KeyC => self.controller.clear(),
            KeyCode::KeyR => self.controller.randomize(DEFAULT_DENSITY),
            _ => return,
        }
        self.changed();
    }

    fn window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        self.handle_key(key_code);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(position) = self.cursor {
                    let position = position.to_logical::<f64>(self.window.scale_factor());
                    if self.controller.click(position.x, position.y) {
                        self.changed();
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Life window resized to {}x{}", new_size.width, new_size.height);
                self.gpu.resize(new_size);
                let (width, height) = logical_size(new_size, self.window.scale_factor());
                self.controller.resize_surface(width, height);
                self.changed();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::info!("Life window scale factor changed to {}", scale_factor);
                let (width, height) = logical_size(self.window.inner_size(), scale_factor);
                self.controller.resize_surface(width, height);
                self.changed();
            }
            WindowEvent::RedrawRequested => {
                let tick = self.controller.tick(Instant::now());
                if tick == Tick::Stepped {
                    self.dirty = true;
                    self.refresh_title();
                }
                self.render();
                // Re-arm the frame loop only while running
                if tick != Tick::Idle {
                    self.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// The perimeter bounce window; animates for as long as the app runs
struct BounceView {
    window: Arc<Window>,
    gpu: GpuContext,
    buffers: BounceBuffers,
    pipeline: RenderPipeline,
    bounce: Bounce,
    fps_counter: FpsCounter,
}

impl BounceView {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self, SetupError> {
        let window_attrs = Window::default_attributes()
            .with_title("Perimeter Bounce")
            .with_inner_size(LogicalSize::new(BOUNCE_WINDOW_WIDTH, BOUNCE_WINDOW_HEIGHT));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = pollster::block_on(GpuContext::new(window.clone(), "bounce-device"))?;

        let size = window.inner_size();
        let bounce = Bounce::new(size.width as f32, size.height as f32);
        let buffers = BounceBuffers::new(&gpu.device);
        let pipeline = RenderPipeline::bounce(&gpu.device, gpu.format());

        window.request_redraw();
        Ok(Self {
            window,
            gpu,
            buffers,
            pipeline,
            bounce,
            fps_counter: FpsCounter::new(Instant::now()),
        })
    }

    fn render(&mut self) {
        self.bounce.tick();
        self.buffers.upload(&self.gpu.queue, &self.bounce);

        let bind_group = self
            .pipeline
            .create_bind_group(&self.gpu.device, &[&self.buffers.params_buffer]);
        present(&self.gpu, &self.pipeline, &bind_group);

        if let Some(fps) = self.fps_counter.tick(Instant::now()) {
            self.window.set_title(&format!(
                "Perimeter Bounce - {:.0} FPS - frame {}",
                fps,
                self.bounce.frames()
            ));
        }
    }

    fn window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Resized(new_size) => {
                log::info!("Bounce window resized to {}x{}", new_size.width, new_size.height);
                self.gpu.resize(new_size);
                self.bounce
                    .resize(new_size.width as f32, new_size.height as f32);
            }
            WindowEvent::RedrawRequested => {
                self.render();
                self.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Application state: two independent views, either of which may be absent
/// when its window or GPU setup failed
#[derive(Default)]
pub struct App {
    initialized: bool,
    life: Option<LifeView>,
    bounce: Option<BounceView>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        log::info!("Initializing Game of Life view...");
        self.life = LifeView::new(event_loop)
            .inspect_err(|e| log::error!("Game of Life view not started: {}", e))
            .ok();

        log::info!("Initializing perimeter bounce view...");
        self.bounce = BounceView::new(event_loop)
            .inspect_err(|e| log::error!("Perimeter bounce view not started: {}", e))
            .ok();

        if self.life.is_none() && self.bounce.is_none() {
            log::error!("No view could be started, exiting");
            event_loop.exit();
            return;
        }

        log::info!("Controls (Game of Life window):");
        log::info!("  Space: Start/Stop");
        log::info!("  C: Clear");
        log::info!("  R: Randomize");
        log::info!("  Left click: Toggle cell (while stopped)");
        log::info!("  Escape: Quit");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
                return;
            }
            WindowEvent::KeyboardInput { event: key, .. }
                if key.state.is_pressed()
                    && key.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::info!("Escape pressed, exiting...");
                event_loop.exit();
                return;
            }
            _ => {}
        }

        if let Some(life) = self.life.as_mut().filter(|v| v.window.id() == window_id) {
            life.window_event(event);
        } else if let Some(bounce) = self.bounce.as_mut().filter(|v| v.window.id() == window_id) {
            bounce.window_event(event);
        }
    }
}

/// Frames-per-second counter for the bounce window title
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new(now: Instant) -> Self {
        Self {
            last_update: now,
            frame_count: 0,
        }
    }

    /// Count a frame; returns Some(fps) at most once per second
    fn tick(&mut self, now: Instant) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = now.saturating_duration_since(self.last_update);

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = now;
            Some(fps)
        } else {
            None
        }
    }
}
