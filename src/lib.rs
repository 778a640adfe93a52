//! # Questify - study notes as a tiny RPG
//!
//! Questify turns free-form study notes into quiz prompts and spends them in
//! a turn-based battle mini-game: answer correctly to damage the enemy, earn
//! XP, and level up; answer wrong and take the hit yourself.
//!
//! ## Features
//!
//! - **Question Extraction**: Notes split into prompts on sentence/line
//!   terminators; pure, deterministic, order-preserving.
//! - **Multiple Choice**: One correct option per prompt plus up to three
//!   decoys from a stock pool, shuffled so the answer position is uniform.
//! - **Battle Engine**: One prompt per encounter, fixed enemy HP, damage
//!   rolls, XP awards, and an exponential level curve with multi-level
//!   overflow.
//! - **Persistence**: A single JSON save slot written atomically, validated
//!   on load, and never resumed in a dead state.
//! - **Injectable Randomness**: Every dice roll takes a caller-supplied
//!   `Rng`, so tests replay exact outcomes from a seed.
//!
//! ## Quick Start
//!
//! ```rust
//! use questify::extract::extract_prompts;
//! use questify::game::{BattleSession, EnemyRef, PlayerState};
//!
//! let prompts = extract_prompts("Water is H2O. The Earth orbits the sun.");
//! let mut rng = rand::thread_rng();
//! let mut session = BattleSession::start(
//!     prompts[0].clone(),
//!     EnemyRef::new("Slime"),
//!     PlayerState::fresh(),
//!     &mut rng,
//! );
//! let correct = session
//!     .options()
//!     .iter()
//!     .position(|o| o.is_correct)
//!     .unwrap();
//! let _ = session.submit_answer(correct, &mut rng);
//! let outcome = session.resolve().unwrap();
//! assert!(outcome.player_won);
//! ```
//!
//! ## Module Organization
//!
//! - [`extract`] - question extraction from raw notes
//! - [`game`] - player progression, option generation, battle state machine
//! - [`storage`] - save-slot persistence adapter
//! - [`config`] - configuration management and validation
//!
//! The interactive shell lives in `src/main.rs`; the library contains no
//! terminal or filesystem I/O outside [`storage`].

pub mod config;
pub mod extract;
pub mod game;
pub mod storage;
