use anyhow::{anyhow, Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, error, info, warn};
use raw_window_handle::HasRawWindowHandle;
use std::{
    ffi::CString,
    num::NonZeroU32,
    time::{Duration, Instant},
};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::config::WindowConfig;
use crate::render::{GlDevice, GraphicsDevice};
use crate::scene::Scene;

/// Frame counter reported once per interval.
struct FrameStats {
    interval_start: Instant,
    frames: u32,
    total_frames: u64,
}

impl FrameStats {
    const INTERVAL: Duration = Duration::from_secs(1);

    fn new() -> Self {
        Self {
            interval_start: Instant::now(),
            frames: 0,
            total_frames: 0,
        }
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        self.total_frames += 1;

        let elapsed = self.interval_start.elapsed();
        if elapsed >= Self::INTERVAL {
            debug!(
                "{:.1} fps ({} frames total)",
                self.frames as f32 / elapsed.as_secs_f32(),
                self.total_frames
            );
            self.interval_start = Instant::now();
            self.frames = 0;
        }
    }
}

/// A window with a current OpenGL 3.3 core context.
pub struct GlHost {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    device: GlDevice,
}

impl GlHost {
    pub fn new(config: &WindowConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // glutin only calls the picker with at least one config.
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|err| anyhow!("Failed to create window: {}", err))?;

        let window = window.ok_or_else(|| anyhow!("Display builder returned no window"))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("Failed to create OpenGL context")?;

        let attrs = window.build_surface_attributes(Default::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("Failed to create GL surface")?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = gl_surface.set_swap_interval(&gl_context, interval) {
            warn!("Failed to set swap interval: {}", err);
        }

        // Load OpenGL functions
        let mut device = unsafe {
            GlDevice::load_with(|symbol| match CString::new(symbol) {
                Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
                Err(_) => std::ptr::null(),
            })
        };

        let size = window.inner_size();
        device.set_viewport(size.width as i32, size.height as i32);
        device.set_clear_color(config.clear_color);

        info!(
            "Created {}x{} window with an OpenGL 3.3 core context",
            size.width, size.height
        );

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                device,
            },
            event_loop,
        ))
    }

    pub fn device(&mut self) -> &mut GlDevice {
        &mut self.device
    }

    /// Runs the frame loop until it exits, then releases the scene.
    pub fn run<S: Scene + 'static>(self, event_loop: EventLoop<()>, scene: S) -> Result<()> {
        let GlHost {
            window,
            gl_context,
            gl_surface,
            mut device,
        } = self;
        let mut scene = Some(scene);
        let mut stats = FrameStats::new();

        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => {
                    if let (Some(width), Some(height)) =
                        (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                    {
                        gl_surface.resize(&gl_context, width, height);
                        device.set_viewport(size.width as i32, size.height as i32);
                    }
                }
                WindowEvent::RedrawRequested => {
                    let Some(scene) = scene.as_mut() else {
                        return;
                    };
                    device.clear_color_buffer();
                    scene.render(&mut device);

                    if let Err(err) = gl_surface.swap_buffers(&gl_context) {
                        error!("Failed to swap buffers: {}", err);
                    }
                    stats.end_frame();
                }
                _ => (),
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            // Every exit path passes through here while the context is
            // still current.
            Event::LoopExiting => release_scene(&mut scene, &mut device),
            _ => (),
        })?;

        Ok(())
    }
}

fn release_scene<S: Scene, D: GraphicsDevice + ?Sized>(scene: &mut Option<S>, device: &mut D) {
    if let Some(scene) = scene.take() {
        scene.release(device);
        info!("Scene released, closing window");
    }
}
