//! One-encounter battle state machine.
//!
//! A session owns exactly one prompt against one enemy: the player answers
//! once, damage is applied, and the encounter resolves. State moves strictly
//! `InProgress -> Answered -> Resolved`; a new session is required for the
//! next prompt. The session works on a private copy of the player record and
//! hands the updated copy back in the outcome; it never touches storage.

use rand::Rng;

use super::options::{generate_options, AnswerOption};
use super::player::PlayerState;

/// Every enemy enters battle with the same HP.
pub const ENEMY_START_HP: i32 = 50;
/// Damage dealt to the enemy on a correct answer.
pub const CORRECT_DAMAGE: (i32, i32) = (20, 35);
/// Damage taken by the player on a wrong answer.
pub const WRONG_DAMAGE: (i32, i32) = (10, 20);
/// XP awarded per correct answer.
pub const XP_PER_CORRECT: i32 = 15;

/// Opaque enemy label supplied by the caller. The engine never inspects it
/// beyond echoing it back for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyRef {
    pub name: String,
}

impl EnemyRef {
    pub fn new(name: impl Into<String>) -> Self {
        EnemyRef { name: name.into() }
    }
}

/// Immediate feedback after an answer, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResult {
    pub correct: bool,
    pub damage: i32,
    pub enemy_hp: i32,
    pub player_hp: i32,
}

/// Terminal result of one encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    pub player_won: bool,
    pub updated_player: PlayerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    InProgress,
    Answered,
    Resolved,
}

/// A single encounter in flight.
#[derive(Debug, Clone)]
pub struct BattleSession {
    prompt: String,
    enemy: EnemyRef,
    options: Vec<AnswerOption>,
    player: PlayerState,
    enemy_hp: i32,
    phase: Phase,
}

impl BattleSession {
    /// Start an encounter: fixed enemy HP, a working copy of the player
    /// record, and a freshly generated option set for the prompt.
    pub fn start<R: Rng>(
        prompt: impl Into<String>,
        enemy: EnemyRef,
        player: PlayerState,
        rng: &mut R,
    ) -> Self {
        let prompt = prompt.into();
        let options = generate_options(&prompt, rng);
        BattleSession {
            prompt,
            enemy,
            options,
            player,
            enemy_hp: ENEMY_START_HP,
            phase: Phase::InProgress,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn enemy(&self) -> &EnemyRef {
        &self.enemy
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn enemy_hp(&self) -> i32 {
        self.enemy_hp
    }

    pub fn player_hp(&self) -> i32 {
        self.player.hp
    }

    /// Score the chosen option and apply damage/XP to the working copies.
    ///
    /// Only the first submission counts; answering again (or after
    /// resolution) is input-already-consumed and returns `None` without
    /// changing anything. An out-of-range index is likewise a no-op.
    pub fn submit_answer<R: Rng>(&mut self, choice: usize, rng: &mut R) -> Option<AnswerResult> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let correct = self.options.get(choice)?.is_correct;

        let damage;
        if correct {
            damage = rng.gen_range(CORRECT_DAMAGE.0..=CORRECT_DAMAGE.1);
            self.enemy_hp = (self.enemy_hp - damage).max(0);
            self.player.xp = self.player.xp.saturating_add(XP_PER_CORRECT);
        } else {
            damage = rng.gen_range(WRONG_DAMAGE.0..=WRONG_DAMAGE.1);
            self.player.hp = (self.player.hp - damage).max(0);
        }

        self.phase = Phase::Answered;
        Some(AnswerResult {
            correct,
            damage,
            enemy_hp: self.enemy_hp,
            player_hp: self.player.hp,
        })
    }

    /// Resolve the encounter after the answer has been scored.
    ///
    /// Win/loss rule, in order: enemy at 0 HP wins; otherwise player at 0 HP
    /// loses; otherwise the player wins. Surviving the single exchange counts
    /// as victory - an intentional one-question MVP rule, not a bug.
    ///
    /// Winning runs the level-up loop (XP may cross several thresholds at
    /// once); losing forces HP to exactly 0. Returns `None` before an answer
    /// has been submitted or if already resolved.
    pub fn resolve(&mut self) -> Option<BattleOutcome> {
        if self.phase != Phase::Answered {
            return None;
        }
        self.phase = Phase::Resolved;

        let player_won = if self.enemy_hp <= 0 {
            true
        } else {
            self.player.hp > 0
        };

        if player_won {
            self.player.apply_level_ups();
        } else {
            self.player.hp = 0;
        }

        Some(BattleOutcome {
            player_won,
            updated_player: self.player.clone(),
        })
    }
}
