//! Interactive viewer: owns the window, the renderer and the flock.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

use crate::error::SimulationError;
use crate::flock::Flock;
use crate::gpu::Renderer;
use crate::input::Input;
use crate::shader::BoidInstance;
use crate::time::FramePacer;

pub(crate) struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    flock: Flock,
    input: Input,
    pacer: FramePacer,
    instances: Vec<BoidInstance>,
    error: Option<SimulationError>,
}

impl App {
    pub(crate) fn new(flock: Flock) -> Self {
        let pacer = FramePacer::new(flock.config().target_fps);
        let instances = Vec::with_capacity(flock.len());
        Self {
            window: None,
            renderer: None,
            flock,
            input: Input::new(),
            pacer,
            instances,
            error: None,
        }
    }

    /// Error that stopped the event loop, if any.
    pub(crate) fn take_error(&mut self) -> Option<SimulationError> {
        self.error.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let bounds = self.flock.bounds();
        let window_attrs = Window::default_attributes()
            .with_title("Boids")
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(bounds.width),
                f64::from(bounds.height),
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let renderer = pollster::block_on(Renderer::new(window.clone(), bounds, self.flock.len()))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Step the flock if a frame is due and nobody asked to quit.
    fn tick(&mut self, now: Instant) -> bool {
        if self.input.quit_requested().is_some() || !self.pacer.frame_due(now) {
            return false;
        }
        self.pacer.begin_frame(now);
        self.flock.step();
        self.log_stats();
        true
    }

    fn log_stats(&self) {
        let frame = self.pacer.frame();
        let report_every = (self.flock.config().target_fps.round() as u64).max(1);
        if frame % report_every == 0 {
            let stats = self.flock.stats();
            log::debug!(
                "step {}: fps {:.1}, mean speed {:.2}, order {:.2}, center ({:.1}, {:.1})",
                self.flock.steps(),
                self.pacer.fps(),
                stats.mean_speed,
                stats.order,
                stats.center_of_mass.x,
                stats.center_of_mass.y
            );
        }
    }

    /// Advance if due, then draw the current snapshot. Early redraws
    /// (expose, resize) repaint without stepping.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.tick(Instant::now());

        let Some(renderer) = &mut self.renderer else {
            return;
        };

        self.instances.clear();
        self.instances
            .extend(self.flock.views().map(BoidInstance::from));
        renderer.upload(&self.instances);

        match renderer.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, stopping");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Quit requests are honoured here, between steps.
        if let Some(reason) = self.input.quit_requested() {
            log::info!("stopping after {} steps: {}", self.flock.steps(), reason);
            event_loop.exit();
            return;
        }

        if self.pacer.frame_due(Instant::now()) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_frame()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlockConfig;

    fn app() -> App {
        let flock = Flock::new(FlockConfig {
            population_size: 10,
            seed: Some(4),
            target_fps: 10.0,
            ..Default::default()
        })
        .unwrap();
        App::new(flock)
    }

    #[test]
    fn test_tick_steps_once_per_frame() {
        let mut app = app();
        let start = Instant::now();

        assert!(app.tick(start));
        assert_eq!(app.flock.steps(), 1);

        // An early redraw does not advance the flock.
        assert!(!app.tick(start));
        assert_eq!(app.flock.steps(), 1);

        assert!(app.tick(start + app.pacer.interval()));
        assert_eq!(app.flock.steps(), 2);
    }

    #[test]
    fn test_tick_stops_after_quit() {
        let mut app = app();
        app.input.handle_event(&WindowEvent::CloseRequested);
        assert!(!app.tick(Instant::now()));
        assert_eq!(app.flock.steps(), 0);
    }
}
