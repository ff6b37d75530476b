use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use previewer_core::{update, AppState, Msg};
use previewer_engine::EngineHandle;
use previewer_logging::{log_debug, log_info};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command};
use super::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load().context("loading configuration")?;
    logging::initialize(&config);
    log_info!("previewer starting against {}", config.api_base_url);

    let engine = EngineHandle::new(config.api_settings()).context("building HTTP client")?;
    let state = AppState::new().with_page_limit(config.page_limit);
    let mut app = App::new(state, EffectRunner::new(engine));

    // Stdin is read on its own thread; the loop below is the only owner of
    // the state, so every mutation happens on this thread in arrival order.
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if cmd_tx.send(commands::parse_line(&line)).is_err() {
                break;
            }
        }
    });

    println!("{}", commands::HELP);
    app.dispatch(Msg::Mounted);

    loop {
        match cmd_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Command::Submit(raw)) => {
                app.dispatch(Msg::InputChanged(raw));
                app.dispatch(Msg::SubmitClicked);
            }
            Ok(Command::LoadMore) => app.dispatch(Msg::LoadMoreClicked),
            Ok(Command::Help) => println!("{}", commands::HELP),
            Ok(Command::Quit) | Err(RecvTimeoutError::Disconnected) => {
                app.dispatch(Msg::Unmounted);
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
        app.pump_engine();
    }

    log_info!("previewer shutting down");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn pump_engine(&mut self) {
        while let Some(msg) = self.runner.poll() {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        log_debug!("dispatch {:?}", msg);
        let (mut state, effects) = update(state, msg);

        // Notifications go out before the view that clears the busy flag.
        self.runner.run(effects, &mut io::stderr());

        if state.consume_dirty() {
            let view = state.view();
            let mut out = io::stdout().lock();
            for line in render::render(&view) {
                let _ = writeln!(out, "{line}");
            }
            let _ = out.flush();
        }
        self.state = state;
    }
}
