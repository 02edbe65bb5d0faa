mod action;
mod app;
mod batch;
mod config;
mod error;
mod event;
mod fs;
mod line_editor;
mod nav;
mod opener;
mod ui;
mod view;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
  EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::event::{Event, EventLoop, map_key};
use crate::fs::last_dir;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
  let (config, config_errors) = Config::load();
  init_logging(&config);

  let start_dir = std::env::current_dir()?;
  let last_dir_file = last_dir::last_dir_file(&config.last_dir_file);
  let previous = last_dir_file.as_deref().and_then(last_dir::read_last_dir);
  match &previous {
    Some(dir) => tracing::info!("last directory: {}", dir.display()),
    None => tracing::debug!("no last directory recorded"),
  }

  let original_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let _ = restore_terminal();
    original_hook(info);
  }));

  let mut app = App::new(start_dir.clone(), &config)?;
  if !config_errors.is_empty() {
    for e in &config_errors {
      tracing::warn!("config: {e}");
    }
    app.show_message(config_errors);
  }

  setup_terminal()?;
  let result = Terminal::new(CrosstermBackend::new(io::stdout()))
    .map_err(anyhow::Error::from)
    .and_then(|mut terminal| run(&mut terminal, &mut app, &config));
  restore_terminal()?;
  result?;

  let end_dir = app.nav.cwd.clone();
  tracing::info!("exiting in {}", end_dir.display());
  if let Some(file) = last_dir_file {
    match last_dir::persist_last_dir(&file, &start_dir, &end_dir, previous.as_deref()) {
      Ok(true) => tracing::debug!("wrote {}", file.display()),
      Ok(false) => {}
      Err(e) => tracing::warn!("could not write {}: {e}", file.display()),
    }
  }
  Ok(())
}

fn run(terminal: &mut Tui, app: &mut App, config: &Config) -> Result<()> {
  let (w, h) = crossterm::terminal::size()?;
  app.update(Action::Resize(w, h))?;

  let events = EventLoop::new();
  while !app.should_quit {
    let request = view::build(app, config);
    terminal.draw(|frame| ui::draw(frame, &request))?;

    let action = match events.next()? {
      Event::Key(key) => map_key(key, app.input_mode(), config),
      Event::Resize(w, h) => Action::Resize(w, h),
    };
    app.update(action)?;
  }
  Ok(())
}

/// Log to `<data_local_dir>/gfd/gfd.log`. Without a writable log file the
/// subscriber is simply never installed.
fn init_logging(config: &Config) {
  let Some(dir) = dirs::data_local_dir().map(|d| d.join("gfd")) else {
    return;
  };
  if std::fs::create_dir_all(&dir).is_err() {
    return;
  }
  let path: PathBuf = dir.join("gfd.log");
  let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) else {
    return;
  };
  let level = config
    .log_level
    .parse::<tracing::Level>()
    .unwrap_or(tracing::Level::INFO);
  let _ = tracing_subscriber::fmt()
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_max_level(level)
    .try_init();
}

fn setup_terminal() -> Result<()> {
  enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen)?;
  Ok(())
}

fn restore_terminal() -> Result<()> {
  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen)?;
  Ok(())
}
