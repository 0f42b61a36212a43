// Opens a window and clears it every frame until it is closed (close button or Escape).

use std::time::Instant;

use anyhow::Context;
use glow::HasContext;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use dust_core::{init_logging, LoggingConfig, WindowConfig};
use dust_host_winit::{FramePacer, GlHost, InputState};
use dust_runtime_glow as rt;

fn main() {
    init_logging(LoggingConfig::default());
    if let Err(e) = run() {
        tracing::error!("[blank_window] {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new();
    let cfg = WindowConfig::default().with_title("dust: basic window");
    let host = GlHost::new(&event_loop, &cfg).context("creating GL window")?;

    let mut input = InputState::new();
    let mut pacer = FramePacer::new(cfg.target_fps, Instant::now());

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent { event, .. } => {
                if let WindowEvent::Resized(size) = &event {
                    host.resize(size.width, size.height);
                }
                input.handle_window_event(&event);
                if input.wants_close() {
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::MainEventsCleared => {
                let now = Instant::now();
                if pacer.due(now) {
                    host.window.request_redraw();
                }
                if !matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
                    *control_flow = match pacer.deadline() {
                        Some(deadline) => ControlFlow::WaitUntil(deadline),
                        None => ControlFlow::Poll,
                    };
                }
            }

            Event::RedrawRequested(_) => {
                pacer.tick(Instant::now());
                let (w, h) = host.size();
                unsafe {
                    host.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                    host.gl.viewport(0, 0, w as i32, h as i32);
                    rt::clear_color(&host.gl, rt::RAYWHITE);
                }
                if let Err(e) = host.swap() {
                    tracing::error!("[blank_window] {e}");
                    *control_flow = ControlFlow::ExitWithCode(1);
                }
                input.end_frame();
            }

            _ => {}
        }
    });
}
