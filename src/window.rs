// ============================================================================
// PREVIEW WINDOW
// ============================================================================
//
// Shows one dial in a desktop window. Every frame drains pending commands,
// steps the animations by the elapsed wall time and re-rasterizes the scene
// when something changed.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bon::Builder;
use log::{debug, error};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::raster::Rasterizer;
use crate::{Dial, WidgetCommand};

#[derive(Debug, Clone, Builder)]
pub struct Viewer {
    #[builder(default = "dial".to_string(), into)]
    pub title: String,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    /// Applied on every left click inside the window.
    pub click: Option<WidgetCommand>,
}

impl Viewer {
    pub fn show<D: Dial>(&self, dial: &mut D) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(dial, None)
    }

    pub fn show_with_commands<D: Dial>(
        &self,
        dial: &mut D,
        receiver: Receiver<WidgetCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(dial, Some(receiver))
    }

    /// Minimum time between redraws; errors unless the frame rate is a
    /// positive finite number.
    pub fn frame_duration(&self) -> Result<Duration, String> {
        if !(self.max_framerate.is_finite() && self.max_framerate > 0.0) {
            return Err(format!(
                "frame rate must be a positive number, got {}",
                self.max_framerate
            ));
        }
        Duration::try_from_secs_f64(1.0 / self.max_framerate).map_err(|e| e.to_string())
    }

    fn run_window<D: Dial>(
        &self,
        dial: &mut D,
        receiver: Option<Receiver<WidgetCommand>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let frame_duration = self.frame_duration()?;
        let mut shown_size = dial.scene().display_size();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(shown_size, shown_size))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        let mut raster = Rasterizer::new(size.width, size.height)?;

        let mut last_frame = Instant::now();
        let mut last_step = Instant::now();
        let mut dirty = true;
        let click = self.click.clone();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                        match Rasterizer::new(new_size.width, new_size.height) {
                            Ok(resized) => raster = resized,
                            Err(e) => error!("cannot resize rasterizer: {e}"),
                        }
                        dirty = true;
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        if let Some(command) = &click {
                            dial.apply(command.clone());
                            dirty = true;
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            while let Ok(command) = receiver.try_recv() {
                                dial.apply(command);
                                dirty = true;
                            }
                        }

                        let now = Instant::now();
                        if dial.is_animating() {
                            dial.advance(now - last_step);
                            dirty = true;
                        }
                        last_step = now;

                        let display = dial.scene().display_size();
                        if (display - shown_size).abs() >= 0.5 {
                            shown_size = display;
                            debug!("resizing window to {display}");
                            let _ = window_clone.request_inner_size(LogicalSize::new(display, display));
                        }

                        if dirty {
                            match raster.render_into(dial.scene(), pixels.frame_mut()) {
                                Ok(()) => dirty = false,
                                Err(e) => error!("cannot rasterize dial: {e}"),
                            }
                            if let Err(e) = pixels.render() {
                                error!("cannot present frame: {e}");
                                window_target.exit();
                            }
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
