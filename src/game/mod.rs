//! The battle mini-game: player progression, option generation, and the
//! per-encounter state machine.
//!
//! Everything in this module is plain data in, plain data out. Functions that
//! roll dice take `&mut impl Rng` so tests can seed a [`rand::rngs::StdRng`]
//! and replay exact outcomes; the shell passes `rand::thread_rng()`.
//!
//! - [`player`] - `PlayerState` and progression math (HP/XP/level)
//! - [`options`] - multiple-choice option generation from a prompt
//! - [`battle`] - one-encounter state machine (answer scoring, win/loss)
//! - [`world`] - overworld bookkeeping (enemy roster, outcome merge)

pub mod battle;
pub mod options;
pub mod player;
pub mod world;

pub use battle::{AnswerResult, BattleOutcome, BattleSession, EnemyRef};
pub use options::{generate_options, AnswerOption};
pub use player::PlayerState;
pub use world::World;
