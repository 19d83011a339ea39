use std::str::FromStr;

use thiserror::Error;

/// How VF reports sprite collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// VF = 1 if any pixel of the sprite was erased
    Accumulate,
    /// VF is recomputed for every set sprite pixel and the last one wins
    LastPixel,
}

/// # Quirks
/// Chip-8 interpreters disagree on a handful of instructions.
/// Each switch picks one of the behaviours found in the wild.
///
/// - `shift_uses_vy` 8xy6/8xyE shift Vy into Vx instead of shifting Vx in place
/// - `load_store_increment_i` Fx55/Fx65 leave I pointing past the last register
/// - `jump_with_vx` Bnnn adds Vx (x being the high nibble of nnn) rather than V0
/// - `draw_wrap` sprite pixels past the edge wrap around instead of being dropped
/// - `collision` how VF is computed by Dxyn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    pub shift_uses_vy: bool,
    pub load_store_increment_i: bool,
    pub jump_with_vx: bool,
    pub draw_wrap: bool,
    pub collision: CollisionPolicy,
}

/// Shifts in place, increments I on block loads/stores, jumps off V0, clips sprites
pub const DEFAULT_QUIRKS: Quirks = Quirks {
    shift_uses_vy: false,
    load_store_increment_i: true,
    jump_with_vx: false,
    draw_wrap: false,
    collision: CollisionPolicy::Accumulate,
};

/// The COSMAC VIP interpreter
pub const ORIGINAL_QUIRKS: Quirks = Quirks {
    shift_uses_vy: true,
    load_store_increment_i: true,
    jump_with_vx: false,
    draw_wrap: false,
    collision: CollisionPolicy::Accumulate,
};

/// What most interpreters written since the 90s do
pub const MODERN_QUIRKS: Quirks = Quirks {
    shift_uses_vy: false,
    load_store_increment_i: false,
    jump_with_vx: true,
    draw_wrap: true,
    collision: CollisionPolicy::Accumulate,
};

impl Default for Quirks {
    fn default() -> Self {
        DEFAULT_QUIRKS
    }
}

/// Returned when a quirks profile name isn't recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid quirks profile '{0}', expected one of: default, original, modern")]
pub struct UnknownProfile(pub String);

impl FromStr for Quirks {
    type Err = UnknownProfile;

    fn from_str(profile: &str) -> Result<Self, Self::Err> {
        match profile.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(DEFAULT_QUIRKS),
            "original" => Ok(ORIGINAL_QUIRKS),
            "modern" => Ok(MODERN_QUIRKS),
            other => Err(UnknownProfile(other.to_owned())),
        }
    }
}
