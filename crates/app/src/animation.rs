//! Frame-counted playback for battle animations.
//!
//! The simulation names an animation and waits; the app owns the clock. When
//! the counter runs out the app reports completion back through
//! `Game::battle_animation_finished`.

use crawl_core::AnimationId;

/// Fixed playback lengths in frames at the 60 fps render loop.
pub fn duration_frames(id: AnimationId) -> u32 {
    match id {
        AnimationId::PlayerMelee => 36,
        AnimationId::PlayerCritMelee => 48,
        AnimationId::PlayerRanged => 30,
        // The stored ranged crit replays the shot three times.
        AnimationId::PlayerCritRanged => 90,
        AnimationId::PlayerDeath => 60,
        AnimationId::EnemyMelee => 36,
        AnimationId::EnemyCritMelee => 48,
        AnimationId::EnemyDeath => 60,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationPlayer {
    id: AnimationId,
    remaining: u32,
}

impl AnimationPlayer {
    pub fn new(id: AnimationId) -> Self {
        Self { id, remaining: duration_frames(id) }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Fraction of the playback already elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        let total = duration_frames(self.id) as f32;
        1.0 - self.remaining as f32 / total
    }

    /// Counts down one frame; returns true once playback has finished.
    pub fn advance(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_runs_for_the_declared_duration() {
        let mut player = AnimationPlayer::new(AnimationId::PlayerMelee);
        for _ in 0..duration_frames(AnimationId::PlayerMelee) - 1 {
            assert!(!player.advance());
        }
        assert!(player.advance());
    }

    #[test]
    fn ranged_crit_plays_three_times_as_long_as_the_plain_shot() {
        assert_eq!(
            duration_frames(AnimationId::PlayerCritRanged),
            3 * duration_frames(AnimationId::PlayerRanged),
        );
    }

    #[test]
    fn progress_moves_from_zero_to_one() {
        let mut player = AnimationPlayer::new(AnimationId::EnemyDeath);
        assert_eq!(player.progress(), 0.0);
        while !player.advance() {}
        assert_eq!(player.progress(), 1.0);
    }
}
