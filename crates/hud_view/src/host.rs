use glam::Vec2;

/// Opaque handle to a boss owned by the host. Only compared, never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BossId(pub u64);

/// Snapshot of the player as far as the HUD cares.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerProbe {
    pub position: Vec2,
    /// Offset from the player origin to the centre of its hit region.
    pub body_offset: Vec2,
    pub alive: bool,
}

/// State the HUD reads from the owning scene every frame.
pub trait HudHost {
    fn is_day(&self) -> bool;
    fn player(&self) -> PlayerProbe;
    /// Health fraction in `[0, 1]`, or `None` when the boss no longer exists.
    fn boss_health(&self, boss: BossId) -> Option<f32>;
}

/// Plain-value host for tools and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub is_day: bool,
    pub player: PlayerProbe,
    pub boss: Option<(BossId, f32)>,
}

impl HudHost for StaticHost {
    fn is_day(&self) -> bool {
        self.is_day
    }

    fn player(&self) -> PlayerProbe {
        self.player
    }

    fn boss_health(&self, boss: BossId) -> Option<f32> {
        self.boss
            .filter(|(id, _)| *id == boss)
            .map(|(_, health)| health)
    }
}
