use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use newshub_core::{update, AppState, Millis, Msg};
use newshub_engine::ReqwestNewsSource;
use newshub_logging::{news_info, news_warn};

use super::cli::Cli;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command};
use super::ui::render;

/// Monotonic milliseconds since the view was mounted.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}

/// Everything the main loop reacts to.
pub enum AppInput {
    Msg(Msg),
    LoadMore,
    Read(usize),
    Redraw,
    Help,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log.into());

    let source = ReqwestNewsSource::new(cli.source_settings()).context("building http client")?;
    let clock = Clock::start();
    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::start(Arc::new(source), input_tx.clone(), clock)
        .context("starting engine")?;
    spawn_input_reader(input_tx, clock).context("starting input reader")?;

    println!("{}", commands::HELP);
    let mut state = dispatch(AppState::with_category(cli.category), Msg::Mounted, &runner);

    for input in input_rx.iter() {
        match input {
            AppInput::Msg(msg) => state = dispatch(state, msg, &runner),
            AppInput::LoadMore => match state.cursor().cloned() {
                Some(cursor) => state = dispatch(state, Msg::LoadMore { cursor }, &runner),
                None => println!("No more stories."),
            },
            AppInput::Read(n) => match state.articles().get(n - 1) {
                Some(article) => println!("{}\n  {}", article.title, article.link),
                None => println!("No story {n}."),
            },
            AppInput::Redraw => print_view(&state),
            AppInput::Help => println!("{}", commands::HELP),
            AppInput::Quit => break,
        }
    }

    let (_state, effects) = update(state, Msg::Unmounted);
    runner.run(effects);
    news_info!("NewsHub closed");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.run(effects);
    if state.consume_dirty() {
        print_view(&state);
    }
    state
}

fn print_view(state: &AppState) {
    let updated_at = Local::now().format("%H:%M:%S").to_string();
    let mut out = io::stdout().lock();
    for line in render::render(&state.view(), &updated_at) {
        let _ = writeln!(out, "{line}");
    }
    let _ = write!(out, "> ");
    let _ = out.flush();
}

fn spawn_input_reader(input_tx: mpsc::Sender<AppInput>, clock: Clock) -> io::Result<()> {
    thread::Builder::new()
        .name("newshub-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let Some(command) = commands::parse(&line) else {
                    continue;
                };
                let input = match command {
                    Command::Category(id) => AppInput::Msg(Msg::CategoryRequested(id)),
                    Command::Search(text) => AppInput::Msg(Msg::SearchEdited {
                        text,
                        now: clock.now(),
                    }),
                    Command::More => AppInput::LoadMore,
                    Command::Refresh => AppInput::Msg(Msg::Refresh),
                    Command::Read(n) => AppInput::Read(n),
                    Command::List => AppInput::Redraw,
                    Command::Help => AppInput::Help,
                    Command::Quit => AppInput::Quit,
                    Command::Unknown(raw) => {
                        news_warn!("Unknown command {:?}", raw);
                        AppInput::Help
                    }
                };
                if input_tx.send(input).is_err() {
                    return;
                }
            }
            // End of input behaves like closing the window.
            let _ = input_tx.send(AppInput::Quit);
        })?;
    Ok(())
}
