mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use thunder::assets::{Assets, SpriteSheet};
use thunder::canvas::Canvas;
use thunder::config;
use thunder::game::Game;
use thunder::input::{FrameInput, InputEvent, Key, KeyState};
use thunder::scheduler::{self, Frontend, Pacing};

/// Frames a key stays down after its last press or repeat.  Terminals
/// without release events only repeat at the OS rate, so the window has to
/// bridge the gap between two repeats.
const HOLD_WINDOW: u64 = 4;

/// What a terminal key means to the game.
enum Action {
    Quit,
    Key(Key),
}

fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    let action = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Action::Key(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Action::Key(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Key(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Action::Key(Key::Right),
        KeyCode::Char(' ') => Action::Key(Key::Fire),
        _ => return None,
    };
    Some(action)
}

fn is_quit(ev: &Event) -> bool {
    matches!(
        ev,
        Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. })
            if matches!(action_for(*code, *modifiers), Some(Action::Quit))
    )
}

// ── Terminal frontend ─────────────────────────────────────────────────────────

/// Feeds the game from crossterm events read on a separate thread.
///
/// Each `poll` turns raw events into a `KeyState`: a key counts as held
/// while its last press or repeat is at most `HOLD_WINDOW` frames old, or
/// until a release event arrives on terminals that report them.  Changes
/// against the previous poll become `KeyDown`/`KeyUp` edges.
struct TerminalFrontend<'a, W: Write> {
    out: &'a mut W,
    rx: mpsc::Receiver<Event>,
    /// Events that arrived during pacing, handled on the next poll.
    pending: Vec<Event>,
    key_frame: HashMap<Key, u64>,
    held: KeyState,
    frame: u64,
}

impl<'a, W: Write> TerminalFrontend<'a, W> {
    fn new(out: &'a mut W, rx: mpsc::Receiver<Event>) -> Self {
        TerminalFrontend {
            out,
            rx,
            pending: Vec::new(),
            key_frame: HashMap::new(),
            held: KeyState::default(),
            frame: 0,
        }
    }

    fn is_held(&self, key: Key) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

impl<W: Write> Frontend for TerminalFrontend<'_, W> {
    fn poll(&mut self) -> FrameInput {
        self.frame += 1;
        let mut events = Vec::new();

        let mut incoming = std::mem::take(&mut self.pending);
        incoming.extend(self.rx.try_iter());

        for ev in incoming {
            let Event::Key(KeyEvent { code, modifiers, kind, .. }) = ev else {
                continue;
            };
            match (action_for(code, modifiers), kind) {
                (Some(Action::Quit), KeyEventKind::Press) => events.push(InputEvent::Quit),
                (Some(Action::Key(key)), KeyEventKind::Press | KeyEventKind::Repeat) => {
                    self.key_frame.insert(key, self.frame);
                }
                (Some(Action::Key(key)), KeyEventKind::Release) => {
                    self.key_frame.remove(&key);
                }
                _ => {}
            }
        }

        let mut keys = KeyState::default();
        for key in Key::ALL {
            let now_held = self.is_held(key);
            keys.set(key, now_held);
            match (self.held.is_pressed(key), now_held) {
                (false, true) => events.push(InputEvent::KeyDown(key)),
                (true, false) => events.push(InputEvent::KeyUp(key)),
                _ => {}
            }
        }
        self.held = keys;

        FrameInput::new(keys, events)
    }

    fn present(&mut self, canvas: &Canvas) -> std::io::Result<()> {
        display::render(&mut *self.out, canvas)
    }

    fn pace(&mut self, delay: Duration) -> Pacing {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Pacing::Elapsed;
            }
            match self.rx.recv_timeout(remaining) {
                Ok(ev) if is_quit(&ev) => return Pacing::Cancelled,
                Ok(ev) => self.pending.push(ev),
                Err(RecvTimeoutError::Timeout) => return Pacing::Elapsed,
                Err(RecvTimeoutError::Disconnected) => {
                    thread::sleep(remaining);
                    return Pacing::Elapsed;
                }
            }
        }
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), thunder::Error> {
    env_logger::Builder::from_default_env().init();

    // Everything that can fail at startup does so before the terminal is
    // switched into game mode.
    let config = config::load()?;
    let sprites = SpriteSheet::load(&Assets::new(Assets::default_root()))?;
    let mut game = Game::new(config.clone(), sprites);

    let (cols, rows) = terminal::size()?;
    let need = (
        config.screen.width.saturating_add(2),
        config.screen.height.saturating_add(3),
    );
    if cols < need.0 || rows < need.1 {
        log::warn!(
            "terminal is {}x{}, the game needs {}x{}; the field will be clipped",
            cols,
            rows,
            need.0,
            need.1
        );
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events make key holds exact; unsupported terminals ignore this.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the loop drains the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = display::prepare(&mut out, &game.new_canvas()).and_then(|()| {
        let mut frontend = TerminalFrontend::new(&mut out, rx);
        scheduler::run(&mut game, &mut frontend, &mut thread_rng())
    });

    // Restore the terminal whether or not the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let exit = result?;
    log::info!("exiting: {:?}", exit);
    Ok(())
}
