//! Overworld bookkeeping around encounters: the enemy roster, prompt
//! selection, and merging battle outcomes back into the canonical player
//! record.
//!
//! The world owns the canonical [`PlayerState`]; each encounter gets a copy
//! and the returned copy is adopted only after a sanity check. Rejected
//! updates keep the prior state and are logged for diagnostics.

use log::{error, info};
use rand::seq::SliceRandom;
use rand::Rng;

use super::battle::BattleOutcome;
use super::player::PlayerState;

/// An enemy on the map. Defeated enemies stay in the roster so victory can
/// be detected when none remain alive.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub defeated: bool,
}

/// Canonical game state between encounters.
#[derive(Debug, Clone)]
pub struct World {
    pub player: PlayerState,
    pub prompts: Vec<String>,
    pub enemies: Vec<Enemy>,
}

impl World {
    pub fn new(prompts: Vec<String>, player: PlayerState, enemy_names: &[String]) -> Self {
        let enemies = enemy_names
            .iter()
            .map(|name| Enemy {
                name: name.clone(),
                defeated: false,
            })
            .collect();
        World {
            player,
            prompts,
            enemies,
        }
    }

    /// Pick a prompt at random for the next encounter. `None` when no
    /// prompts were extracted; the caller must not start a battle then.
    pub fn random_prompt<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        self.prompts.choose(rng).map(String::as_str)
    }

    /// Next enemy still standing.
    pub fn next_enemy(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| !e.defeated)
    }

    /// Adopt a battle outcome: merge the updated player record (if sane) and
    /// retire the enemy on a win.
    ///
    /// An update with an impossible level or negative XP is rejected - the
    /// prior state is kept and the rejection logged. Accepted updates get
    /// `max_hp` recomputed from the (possibly new) level and `hp` clamped,
    /// so the stored invariants hold no matter what the encounter did.
    pub fn adopt_outcome(&mut self, enemy_name: &str, outcome: &BattleOutcome) {
        if !Self::update_is_sane(&outcome.updated_player) {
            error!(
                "rejecting invalid player update from battle: {:?}",
                outcome.updated_player
            );
            return;
        }
        self.player = outcome.updated_player.clone();
        self.player.recompute_max_hp();

        if outcome.player_won {
            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| e.name == enemy_name && !e.defeated)
            {
                enemy.defeated = true;
                info!("enemy defeated: {}", enemy.name);
            }
        }
    }

    fn update_is_sane(update: &PlayerState) -> bool {
        (1..=super::player::LEVEL_CAP).contains(&update.level)
            && (0..=super::player::XP_CAP).contains(&update.xp)
    }

    /// All enemies defeated.
    pub fn victory(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| e.defeated)
    }

    /// Player at 0 HP: the shell should enter its game-over mode.
    pub fn game_over(&self) -> bool {
        self.player.hp <= 0
    }
}
