//! The frame loop.
//!
//! `run` drives a `Game` through a `Frontend`: poll, tick, present, pace.
//! Pacing is the only place the loop waits, and therefore the only place a
//! quit request can arrive between ticks.

use std::io;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::canvas::Canvas;
use crate::game::{Game, Tick};
use crate::input::FrameInput;

/// How a pacing wait ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    Elapsed,
    /// A quit request arrived while waiting.
    Cancelled,
}

/// Why the loop stopped.  Both are normal terminations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    GameOver,
}

/// The outside world as the loop sees it.
pub trait Frontend {
    /// Collect the input for the coming tick.
    fn poll(&mut self) -> FrameInput;

    /// Show a finished frame.
    fn present(&mut self, canvas: &Canvas) -> io::Result<()>;

    /// Wait out the frame delay, unless a quit request cuts it short.
    fn pace(&mut self, delay: Duration) -> Pacing;

    fn now(&self) -> Instant;
}

/// Run the session until the player quits or the game-over delay expires.
/// The loop returns exactly once; restoring the display is up to the
/// caller.
pub fn run<F: Frontend>(game: &mut Game, frontend: &mut F, rng: &mut impl Rng) -> io::Result<Exit> {
    let delay = game.config().frame_delay();
    let mut canvas = game.new_canvas();

    let exit = loop {
        let input = frontend.poll();
        if game.tick(&input, frontend.now(), rng, &mut canvas) == Tick::Shutdown {
            break Exit::Quit;
        }
        frontend.present(&canvas)?;

        if frontend.pace(delay) == Pacing::Cancelled {
            break Exit::Quit;
        }
        if game.shutdown_due(frontend.now()) {
            break Exit::GameOver;
        }
    };

    log::info!("loop finished after {} frames: {:?}", game.frame(), exit);
    Ok(exit)
}
