use serde::{Deserialize, Serialize};

/// Stable identifier for a spawned actor, unique within one level run.
///
/// Factory-assigned ids are deterministic ("bird-0", "coin-3"), so the
/// same level data always produces the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Category of a spawned actor, used for rendering selection and
/// collision dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorKind {
    Player,
    Bird,
    Shark,
    Frog,
    Boss,
    Projectile,
    Coin,
    Checkpoint,
    PowerUp,
}

/// Horizontal facing, stored as the sign of movement along X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right. Matches the sign convention used
    /// by patrol and projectile math.
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 { Facing::Left } else { Facing::Right }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_sign_roundtrip() {
        assert_eq!(Facing::from_sign(Facing::Left.sign()), Facing::Left);
        assert_eq!(Facing::from_sign(Facing::Right.sign()), Facing::Right);
        assert_eq!(Facing::from_sign(0.0), Facing::Right, "zero maps right");
    }

    #[test]
    fn actor_id_serializes_as_plain_string() {
        let id = ActorId::new("bird-0");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bird-0\"");
    }
}
