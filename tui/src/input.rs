//! Input handling for the Matter Lab TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::debug;

use matter_engine::{
    ActiveStation, App, Category, Container, Gas, Liquid, Location, SolidTab, Station,
};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256;
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(&stop2, &tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        self.rx.close();
        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input into `app`. Returns `true` when the app should exit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };
        if let Event::Key(key) = ev
            && apply_key(app, key, Instant::now())
        {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one key event. Returns `true` when the app should exit.
pub fn apply_key(app: &mut App, key: KeyEvent, now: Instant) -> bool {
    if matches!(key.kind, KeyEventKind::Release) {
        return app.should_quit();
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Tab => app.next_station(),
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(station) = Station::from_hotkey(c) {
                app.navigate(station);
            }
        }
        KeyCode::Char('m') => app.toggle_microscope(),
        KeyCode::Char('t') => app.toggle_tab(),
        KeyCode::Left | KeyCode::Up => app.cursor_prev(),
        KeyCode::Right | KeyCode::Down => app.cursor_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.pick_up(),
        KeyCode::Char('r') => app.reset(now),
        _ => match app.station() {
            Station::Intro => handle_intro(app, key, now),
            Station::Solid => handle_solid(app, key, now),
            Station::Liquid => handle_liquid(app, key, now),
            Station::Gas => handle_gas(app, key, now),
        },
    }
    app.should_quit()
}

fn handle_intro(app: &mut App, key: KeyEvent, now: Instant) {
    let basket = match key.code {
        KeyCode::Char('n') => Category::Natural,
        KeyCode::Char('h') => Category::ManMade,
        _ => return,
    };
    let outcome = app.drop_into(basket, now);
    debug!(?basket, ?outcome, "Basket key");
}

fn handle_solid(app: &mut App, key: KeyEvent, now: Instant) {
    let tab = match app.active() {
        ActiveStation::Solid(station) => station.tab(),
        _ => return,
    };
    match (tab, key.code) {
        (SolidTab::Shape, KeyCode::Char('s')) => {
            app.place_solid(Location::Shelf);
        }
        (SolidTab::Shape, KeyCode::Char('c')) => {
            app.place_solid(Location::RoundCup);
        }
        (SolidTab::Shape, KeyCode::Char('b')) => {
            app.place_solid(Location::SquareBox);
        }
        (SolidTab::Stack, KeyCode::Char('a')) => {
            if let Err(err) = app.add_block(now) {
                debug!(%err, "Tower block rejected");
            }
        }
        _ => {}
    }
}

fn handle_liquid(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('w') => app.select_liquid(Liquid::Water),
        KeyCode::Char('o') => app.select_liquid(Liquid::Oil),
        KeyCode::Char('k') => app.select_liquid(Liquid::Milk),
        KeyCode::Char('g') => {
            app.pour(Container::TallGlass, now);
        }
        KeyCode::Char('p') => {
            app.pour(Container::WideBowl, now);
        }
        KeyCode::Char('f') => {
            if let Err(err) = app.start_flow(now) {
                debug!(%err, "Flow rejected");
            }
        }
        _ => {}
    }
}

fn handle_gas(app: &mut App, key: KeyEvent, now: Instant) {
    let gas = match key.code {
        KeyCode::Char('a') => Some(Gas::Air),
        KeyCode::Char('e') => Some(Gas::Helium),
        KeyCode::Char('x') => Some(Gas::Steam),
        _ => None,
    };
    if let Some(gas) = gas {
        app.select_gas(gas);
        return;
    }
    // Rejections surface as a notice on the status line.
    let result = match key.code {
        KeyCode::Char('u') => {
            app.pump();
            Ok(())
        }
        KeyCode::Char('l') => app.release_gas(now),
        KeyCode::Char('+' | '=') => app.warmer(now),
        KeyCode::Char('-') => app.cooler(now),
        KeyCode::Char(']') => app.more_particles(now),
        KeyCode::Char('[') => app.fewer_particles(now),
        _ => Ok(()),
    };
    if let Err(err) = result {
        debug!(%err, "Gas key rejected");
    }
}
