mod loader;

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Instant;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use glam::Vec2;
use tree_core::{CardArtwork, FrameDriver, InputEvent, SceneConfig, TimedInput};
use tree_render::SceneRenderer;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
    driver: FrameDriver<CardArtwork>,
    last_frame: Instant,
    start: Instant,
}

impl<'w> GpuState<'w> {
    async fn new(
        window: &'w winit::window::Window,
        driver: FrameDriver<CardArtwork>,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface has no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = SceneRenderer::new(
            &device,
            format,
            driver.blend().interleaved(),
            driver.cloud().colors(),
        );
        let now = Instant::now();

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            driver,
            last_frame: now,
            start: now,
        })
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let report = self.driver.tick(dt, self.now());
        for (id, art) in &report.created {
            self.renderer.add_card(&self.device, &self.queue, *id, art);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.renderer.render(
            &self.queue,
            &mut encoder,
            &view,
            &self.driver.view(),
            CLEAR_COLOR,
        );
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Forwards window events to the frame driver in logical pixels.
struct InputForwarder {
    tx: Sender<TimedInput>,
    start: Instant,
    scale_factor: f64,
    cursor: Vec2,
}

impl InputForwarder {
    fn send(&self, event: InputEvent) {
        let at = self.start.elapsed().as_secs_f64();
        // The driver outlives the event loop; a closed channel only happens on exit.
        let _ = self.tx.send(TimedInput { at, event });
    }

    fn logical(&self, pos: PhysicalPosition<f64>) -> Vec2 {
        let p = pos.to_logical::<f32>(self.scale_factor);
        Vec2::new(p.x, p.y)
    }

    fn resized(&self, size: PhysicalSize<u32>) {
        let s = size.to_logical::<f32>(self.scale_factor);
        self.send(InputEvent::Resize {
            width: s.width,
            height: s.height,
        });
    }

    fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let pos = self.logical(*position);
                self.cursor = pos;
                self.send(InputEvent::PointerMove { pos });
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                // winit reports presses without a position
                ElementState::Pressed => self.send(InputEvent::PointerDown { pos: self.cursor }),
                ElementState::Released => {
                    self.send(InputEvent::PointerUp);
                    self.send(InputEvent::Click);
                }
            },
            WindowEvent::Touch(touch) => {
                let pos = self.logical(touch.location);
                match touch.phase {
                    TouchPhase::Started => self.send(InputEvent::PointerDown { pos }),
                    TouchPhase::Moved => self.send(InputEvent::PointerMove { pos }),
                    TouchPhase::Ended => {
                        self.send(InputEvent::PointerMove { pos });
                        self.send(InputEvent::PointerUp);
                        self.send(InputEvent::Click);
                    }
                    TouchPhase::Cancelled => self.send(InputEvent::PointerUp),
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let image_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("images"));

    let driver: FrameDriver<CardArtwork> = FrameDriver::new(SceneConfig::default());
    loader::spawn(image_dir, driver.load_sender())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Photo Tree (native)")
        .build(&event_loop)?;

    let mut input = InputForwarder {
        tx: driver.input_sender(),
        start: Instant::now(),
        scale_factor: window.scale_factor(),
        cursor: Vec2::ZERO,
    };
    input.resized(window.inner_size());

    let mut state = pollster::block_on(GpuState::new(&window, driver))?;
    // Align the driver clock with input timestamps.
    state.start = input.start;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            input.window_event(&event);
            match event {
                WindowEvent::Resized(size) => {
                    state.resize(size);
                    input.resized(size);
                }
                WindowEvent::CloseRequested => elwt.exit(),
                _ => {}
            }
        }
        Event::AboutToWait => match state.render() {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory");
                elwt.exit();
            }
            Err(e) => log::warn!("[gpu] surface error: {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}
