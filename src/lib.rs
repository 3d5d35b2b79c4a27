//! Thunder: a terminal arcade shooter.
//!
//! The library holds the whole simulation; the `thunder` binary only adds
//! the crossterm frontend.

pub mod assets;
pub mod canvas;
pub mod combat;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod scene;
pub mod scheduler;
pub mod sprite;

pub use error::Error;
