use std::process::ExitCode;

use shadowcast::config::DemoConfig;
use shadowcast::engine::Engine;
use shadowcast::error::DemoError;
use shadowcast::input::{DragState, Intent, HELP_TEXT};
use shadowcast::logging::{init_logging, LoggingConfig};
use shadowcast::render::SoftwareBackend;
use shadowcast::state::{DemoState, Outcome};
use shadowcast::window::{self, Window, WindowEvent};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            window::show_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config_path = std::env::args().nth(1);
    let config = match DemoConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_logging(LoggingConfig::default());
            return Err(err.into());
        }
    };
    init_logging(LoggingConfig {
        env_filter: config.logging.filter.clone(),
        ..LoggingConfig::default()
    });

    let (width, height) = (config.window.width, config.window.height);
    let backend = SoftwareBackend::new();
    let mut engine = Engine::new(&backend, &config.shadow, width, height)?;
    let mut window = Window::new(&config.window.title, width, height)?;
    let mut state = DemoState::new(width, height, &config.limits);
    let mut drag = DragState::new();
    let mut snapshots = 0u32;

    redraw(&mut engine, &mut window, &state)?;

    loop {
        let event = window.wait_event();
        let mut needs_redraw = event == WindowEvent::Exposed;

        for intent in intents(event, &mut drag) {
            match state.apply(intent) {
                Outcome::Redraw => {
                    if let Intent::Resize { width, height } = intent {
                        window.resize(width, height)?;
                    }
                    needs_redraw = true;
                }
                Outcome::Unchanged => {}
                Outcome::Quit => {
                    log::info!("quit");
                    return Ok(());
                }
                Outcome::SaveSnapshot => {
                    let path = format!("depth-{:03}.png", snapshots);
                    match engine.save_depth_snapshot(&path) {
                        Ok(()) => snapshots += 1,
                        Err(err) => log::error!("{}", DemoError::from(err)),
                    }
                }
                Outcome::ShowHelp => {
                    log::info!("{}", HELP_TEXT);
                    window.show_message("Keys", HELP_TEXT);
                }
            }
        }

        if needs_redraw {
            redraw(&mut engine, &mut window, &state)?;
        }
    }
}

fn intents(event: WindowEvent, drag: &mut DragState) -> Vec<Intent> {
    match event {
        WindowEvent::Quit => vec![Intent::Quit],
        WindowEvent::Key(key) => vec![Intent::from_key(key)],
        WindowEvent::MouseDown { button, x, y } => {
            drag.press(button, x, y);
            Vec::new()
        }
        WindowEvent::MouseUp { button } => {
            drag.release(button);
            Vec::new()
        }
        WindowEvent::MouseMotion { x, y } => drag.motion(x, y).collect(),
        WindowEvent::Wheel(delta) => vec![Intent::from_wheel(delta)],
        WindowEvent::Resize(width, height) => vec![Intent::Resize { width, height }],
        WindowEvent::Exposed | WindowEvent::Other => Vec::new(),
    }
}

fn redraw(engine: &mut Engine, window: &mut Window, state: &DemoState) -> Result<(), DemoError> {
    engine.render_frame(&state.frame());
    window.present(engine.frame_buffer())
}
