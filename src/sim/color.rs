//! Color categories shared by balls, walls and holes

/// Integer color category id
pub type ColorId = u8;

pub const GREY: ColorId = 0;
pub const BLUE: ColorId = 1;
pub const GREEN: ColorId = 2;
pub const ORANGE: ColorId = 3;
pub const YELLOW: ColorId = 4;

/// Number of color categories
pub const COLOR_COUNT: usize = 5;

/// Wildcard category: captures, and is captured by, anything
pub const WILDCARD: ColorId = GREY;

const NAMES: [&str; COLOR_COUNT] = ["grey", "blue", "green", "orange", "yellow"];

/// Look up a color id by name (case-insensitive)
pub fn from_name(name: &str) -> Option<ColorId> {
    let name = name.to_lowercase();
    NAMES
        .iter()
        .position(|n| *n == name)
        .map(|i| i as ColorId)
}

/// Name of a color id, if it is one of the known categories
pub fn name(color: ColorId) -> Option<&'static str> {
    NAMES.get(color as usize).copied()
}

/// Whether a ball of `ball` color is accepted by a hole of `hole` color
#[inline]
pub fn accepts(hole: ColorId, ball: ColorId) -> bool {
    hole == ball || hole == WILDCARD || ball == WILDCARD
}
