/// Observable moments the UI and audio layers subscribe to. The simulation
/// stays silent otherwise; per the game's error model a refused action is
/// only ever an `Alert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An action was refused for lack of ammunition.
    Alert,
    QueenWounded { life: i16 },
    /// A walker reached the player's edge and wiped the ammunition reserve.
    Touchdown,
    /// Hardcore-mode horde spawned (walkers and zombies each).
    HordeInbound { count: u32 },
    Victory,
    Defeat,
}
