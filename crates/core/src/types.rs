use slotmap::new_key_type;

new_key_type! {
    pub struct TileId;
}

/// Axis-aligned rectangle in dungeon pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileCategory {
    Blocks,
    Enemies,
    Potions,
    Ammo,
    Gates,
}

impl TileCategory {
    pub const INTERACTABLE: [TileCategory; 4] =
        [TileCategory::Enemies, TileCategory::Potions, TileCategory::Ammo, TileCategory::Gates];

    pub fn is_interactable(self) -> bool {
        self != TileCategory::Blocks
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Melee,
    Ranged,
}

/// Result of one resolved attack roll. A miss is a distinct outcome from a
/// non-critical hit and is surfaced as such in captions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i32,
    pub critical: bool,
    pub missed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleAction {
    ToggleQuickmode,
    Melee,
    Ranged,
    CritMelee,
    CritRanged,
    Inspect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    GetInput,
    ConfirmAction,
    ResolveAction,
    Downtime,
    ResolveResponse,
    Final,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleInput {
    Select(BattleAction),
    Accept,
    Deny,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    Won,
    Lost,
}

/// Animation playback is owned by the presentation layer; the engine only
/// names the clip and waits for the completion callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationId {
    PlayerMelee,
    PlayerCritMelee,
    PlayerRanged,
    PlayerCritRanged,
    PlayerDeath,
    EnemyMelee,
    EnemyCritMelee,
    EnemyDeath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleError {
    /// The chosen action's requirements are not met (no ammo, meter not full).
    ActionUnavailable,
    /// The battle is not in a phase that accepts this input.
    InputNotAccepted,
    /// No battle session is active.
    NoActiveBattle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    AmmoPickedUp,
    PotionConsumed { healed: i32 },
    GateReached,
    BattleStarted { enemy: String },
    BattleWon { enemy: String },
    BattleLost { enemy: String },
}

/// Held movement keys for one tick of dungeon exploration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_intersection_is_exclusive_of_touching_edges() {
        let a = Rect::new(0, 0, 50, 50);
        assert!(a.intersects(&Rect::new(49, 49, 10, 10)));
        assert!(!a.intersects(&Rect::new(50, 0, 50, 50)));
        assert!(!a.intersects(&Rect::new(0, 50, 50, 50)));
    }

    #[test]
    fn blocks_are_not_interactable() {
        assert!(!TileCategory::Blocks.is_interactable());
        for category in TileCategory::INTERACTABLE {
            assert!(category.is_interactable());
        }
    }
}
