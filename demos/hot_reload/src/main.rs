// Entities encoded into a small texture, drawn by a fragment shader that is reloaded
// from disk when the file changes.
//
// Controls:
//   left click  check the shader file now (MANUAL mode)
//   A           toggle AUTO / MANUAL reloading
//   Escape      quit

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use dust_core::{init_logging, AssetsRoot, HotReloadConfig, LoggingConfig};
use dust_host_winit::{FramePacer, GlHost, InputState};

mod app;
mod scene;

use app::HotReloadApp;

#[derive(Parser, Debug)]
#[command(name = "hot_reload")]
#[command(about = "Entity dataset texture feeding a hot-reloaded fragment shader", long_about = None)]
struct Cli {
    /// JSON config file; every key is optional
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fragment shader to watch (overrides the config)
    #[arg(short, long)]
    shader: Option<PathBuf>,

    /// Start in AUTO reload mode
    #[arg(short, long)]
    auto: bool,

    /// Log filter directives (defaults to RUST_LOG, then "info")
    #[arg(long)]
    log: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });
    if let Err(e) = run(cli) {
        tracing::error!("[hot_reload] {e:#}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<HotReloadConfig> {
    let mut cfg = match &cli.config {
        Some(path) => HotReloadConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HotReloadConfig::default(),
    };
    if let Some(shader) = &cli.shader {
        cfg.shader_path = shader.clone();
    }
    if cli.auto {
        cfg.auto_reload = true;
    }
    Ok(cfg)
}

fn resolve_shader_path(cfg: &HotReloadConfig) -> PathBuf {
    if cfg.shader_path.is_absolute() {
        return cfg.shader_path.clone();
    }
    match AssetsRoot::discover_from_env("res") {
        Ok(root) => root.resolve(&cfg.shader_path),
        Err(e) => {
            tracing::debug!("{e}; using {} relative to cwd", cfg.shader_path.display());
            cfg.shader_path.clone()
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = load_config(&cli)?;
    let shader_path = resolve_shader_path(&cfg);

    let event_loop = EventLoop::new();
    let mut host = GlHost::new(&event_loop, &cfg.window).context("creating GL window")?;

    let mut app = unsafe { HotReloadApp::new(&host.gl, &cfg, shader_path, host.size()) }
        .context("setting up renderer")?;
    host.set_title_if_changed(&app.status_line());

    let mut input = InputState::new();
    let mut pacer = FramePacer::new(cfg.window.target_fps, Instant::now());

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent { event, .. } => {
                if let WindowEvent::Resized(size) = &event {
                    host.resize(size.width, size.height);
                    app.resize(size.width, size.height);
                }
                input.handle_window_event(&event);
                if input.wants_close() {
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::MainEventsCleared => {
                if pacer.due(Instant::now()) {
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
                let dt = pacer.tick(Instant::now());
                let frame = unsafe { app.frame(&host.gl, &input, dt) }.and_then(|()| host.swap());
                input.end_frame();

                match frame {
                    Ok(()) => host.set_title_if_changed(&app.status_line()),
                    Err(e) => {
                        tracing::error!("[hot_reload] frame failed: {e}");
                        *control_flow = ControlFlow::ExitWithCode(1);
                    }
                }
            }

            Event::LoopDestroyed => unsafe {
                app.destroy(&host.gl);
            },

            _ => {}
        }
    });
}
