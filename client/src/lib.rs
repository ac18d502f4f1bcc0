//! # Grid Arena Client Library
//!
//! Client-side implementation for the grid arena survival game. The server owns
//! every rule of the game (movement legality, collisions, deaths, walls); the
//! client only mirrors its state and forwards player commands.
//!
//! ## Architecture Overview
//!
//! ### State Synchronization
//! The client never predicts. Each resynchronization cycle pulls a full board
//! snapshot from the server and renders it from scratch. Cycles are produced by
//! a one second timer and, additionally, right after every successful command
//! so the player sees its consequence without waiting for the next tick.
//!
//! ### Coordinate Spaces
//! The server reports positions in game-space with `(0, 0)` at the bottom-left
//! corner. The board is laid out in screen-space, top row first, so game row
//! `y` is drawn on screen row `size - 1 - y`.
//!
//! ### Last Writer Wins
//! Timer and command driven cycles are independent tasks. Two cycles can be in
//! flight at once and finish out of order; the board shows whichever render ran
//! last. Setting `discard_stale_renders` drops renders from overtaken cycles.
//!
//! ## Module Organization
//!
//! - `network`: HTTP transport, the [`network::GameApi`] seam
//! - `board`: the renderable board and the game-space to screen-space mapping
//! - `dispatcher`: walk/attack commands and the reaction to their results
//! - `sync`: the session context and the fetch+render loop
//! - `app`: name entry, alerts and the active session as seen by the UI
//! - `input`: keyboard sampling with press detection
//! - `rendering`: drawing the board and HUD with macroquad
//!
//! ## Usage Example
//!
//! ```no_run
//! use client::app::activate;
//! use client::config::ClientConfig;
//! use client::sync::Session;
//!
//! # fn main() -> Result<(), client::error::ClientError> {
//! let mut active = activate(Session::new("alice"), &ClientConfig::default())?;
//!
//! // Once per frame
//! active.poll_notices();
//! if let Some(alert) = active.hud().current_alert() {
//!     println!("{}", alert);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod board;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod input;
pub mod network;
pub mod rendering;
pub mod sync;
