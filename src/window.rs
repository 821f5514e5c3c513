//! On-screen presenter (winit + pixels)
//!
//! Owns the window and the UI event loop on the main thread. The app runs on
//! a worker thread and only talks to the window through the shared
//! [`Bench`]; draw calls wake this loop through an event-loop proxy and the
//! loop repaints the window from the pixel mirror.

use crate::app::{self, App};
use crate::bench::{Bench, RedrawNotifier};
use crate::canvas::Color;
use crate::config::BenchConfig;
use crate::input::{BenchAction, InputEvent, InputManager, MouseButton};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use pixels::{wgpu, PixelsBuilder, SurfaceTexture};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use winit::keyboard::Key;
use winit::window::WindowBuilder;

/// How long the worker gets to wind down once the window is gone
const WORKER_GRACE: Duration = Duration::from_millis(500);

/// Events sent from the worker thread into the UI loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchEvent {
    /// The mirror changed
    Redraw,
    /// The app returned and its linger elapsed
    AppFinished,
}

/// Why the event loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    AppFinished,
    UserQuit,
    WindowClosed,
}

impl ExitReason {
    /// Process exit status: 0 for a completed app, 1 when the user bailed out
    pub fn exit_code(self) -> u8 {
        match self {
            ExitReason::AppFinished => 0,
            ExitReason::UserQuit | ExitReason::WindowClosed => 1,
        }
    }
}

/// Forwards repaint requests to the event loop, one in flight at a time
struct ProxyNotifier {
    proxy: Mutex<EventLoopProxy<BenchEvent>>,
    pending: AtomicBool,
}

impl ProxyNotifier {
    fn new(proxy: EventLoopProxy<BenchEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
            pending: AtomicBool::new(false),
        }
    }

    /// Called by the UI loop once it has picked up a request
    fn acknowledge(&self) {
        self.pending.store(false, Ordering::SeqCst);
    }
}

impl RedrawNotifier for ProxyNotifier {
    fn request_redraw(&self) {
        if !self.pending.swap(true, Ordering::SeqCst) {
            // The loop may already be gone during shutdown
            let _ = self.proxy.lock().send_event(BenchEvent::Redraw);
        }
    }
}

fn to_clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64 / 255.0,
        g: color.g as f64 / 255.0,
        b: color.b as f64 / 255.0,
        a: color.a as f64 / 255.0,
    }
}

fn map_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(8),
        WinitMouseButton::Forward => MouseButton::Other(9),
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

/// Open the bench window, run `app` against it and pump events until the
/// app finishes or the user leaves.
pub fn run(config: &BenchConfig, app: Box<dyn App>) -> Result<ExitReason> {
    let win_cfg = &config.window;
    let foreground = config.colors.foreground()?;
    let background = config.colors.background()?;
    let (phys_w, phys_h) = win_cfg.physical_size();

    let event_loop = EventLoopBuilder::<BenchEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    let window = WindowBuilder::new()
        .with_title(&win_cfg.title)
        .with_inner_size(PhysicalSize::new(phys_w, phys_h))
        .with_resizable(false)
        .build(&event_loop)
        .context("Failed to create window")?;

    info!(
        "✅ Window created: '{}' {}x{} (x{} = {}x{})",
        win_cfg.title, win_cfg.width, win_cfg.height, win_cfg.multiplier, phys_w, phys_h
    );

    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = PixelsBuilder::new(win_cfg.width, win_cfg.height, surface_texture)
        .clear_color(to_clear_color(background))
        .build()
        .context("Failed to create pixel surface")?;

    let notifier = Arc::new(ProxyNotifier::new(event_loop.create_proxy()));
    let bench = Bench::new(win_cfg.width, win_cfg.height, notifier.clone());
    let mut input = InputManager::new(bench.clone(), win_cfg.multiplier);

    let finish_proxy = Mutex::new(event_loop.create_proxy());
    let worker = app::spawn(app, bench.clone(), config.app.linger(), move || {
        let _ = finish_proxy.lock().send_event(BenchEvent::AppFinished);
    })?;

    let exit_reason = Rc::new(Cell::new(ExitReason::WindowClosed));
    let render_error: Rc<RefCell<Option<anyhow::Error>>> = Rc::new(RefCell::new(None));

    let clear_on_expose = win_cfg.clear_on_expose;
    let mut exposed_once = false;
    let mut repaint_requested = false;

    event_loop.set_control_flow(ControlFlow::Wait);

    let loop_reason = exit_reason.clone();
    let loop_error = render_error.clone();
    let loop_bench = bench.clone();
    event_loop
        .run(move |event, elwt| match event {
            Event::UserEvent(BenchEvent::Redraw) => {
                notifier.acknowledge();
                repaint_requested = true;
                window.request_redraw();
            }
            Event::UserEvent(BenchEvent::AppFinished) => {
                info!("🏁 App finished, closing window");
                loop_reason.set(ExitReason::AppFinished);
                elwt.exit();
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Window close requested");
                    loop_reason.set(ExitReason::WindowClosed);
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => {
                    // A repaint nobody on our side asked for is a window-system expose
                    if !exposed_once || !repaint_requested {
                        if loop_bench.expose(clear_on_expose) {
                            info!("🪟 Window exposed, releasing app");
                        }
                        exposed_once = true;
                    }
                    repaint_requested = false;

                    loop_bench.with_mirror(|m| {
                        m.render_rgba(pixels.frame_mut(), foreground, background)
                    });
                    if let Err(e) = pixels.render() {
                        error!("❌ Render failed: {}", e);
                        *loop_error.borrow_mut() = Some(anyhow::anyhow!("render failed: {}", e));
                        elwt.exit();
                    }
                }
                WindowEvent::Occluded(false) => {
                    window.request_redraw();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width > 0 && new_size.height > 0 {
                        if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!("Failed to resize surface: {}", e);
                        }
                        window.request_redraw();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state != ElementState::Pressed {
                        return;
                    }
                    if let Key::Character(text) = &event.logical_key {
                        for ch in text.chars() {
                            let action = input.process_input_event(InputEvent::Key { ch });
                            if action == Some(BenchAction::Quit) {
                                loop_reason.set(ExitReason::UserQuit);
                                elwt.exit();
                                return;
                            }
                        }
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.process_input_event(InputEvent::MouseMove {
                        x: position.x,
                        y: position.y,
                    });
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let action = input.process_input_event(InputEvent::MouseButton {
                        button: map_button(button),
                        pressed: state == ElementState::Pressed,
                    });
                    if let Some(action) = action {
                        debug!("{:?}", action);
                    }
                }
                _ => {}
            },
            _ => {}
        })
        .context("Event loop failed")?;

    bench.close();
    let app_name = worker.name().to_string();
    let app_result = worker.finish(WORKER_GRACE);

    if let Some(e) = render_error.borrow_mut().take() {
        return Err(e);
    }

    let reason = exit_reason.get();
    match app_result {
        Some(Err(e)) if reason == ExitReason::AppFinished => {
            return Err(e.context(format!("App '{}' failed", app_name)));
        }
        Some(Err(e)) => warn!("App '{}' stopped: {:#}", app_name, e),
        Some(Ok(())) => debug!("app worker joined"),
        None => {}
    }

    info!("👋 Bench window closed ({:?})", reason);
    Ok(reason)
}
