mod parse;

pub use parse::{ColorParseError, HexParser, SpecParser};

/// An 8-bit-per-channel ARGB color.
///
/// This is the cache key for brush resolution, so unlike a float-based
/// render color it is `Eq + Hash`: two colors are the same entry iff all
/// four channels match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// A fully opaque color from the three visible channels.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_argb(255, red, green, blue)
    }

    pub const fn is_transparent(self) -> bool {
        self.alpha == 0
    }

    /// Blends this color onto `back`, keeping `percent` of this color per
    /// visible channel. The result keeps the background's alpha.
    pub fn blend(self, back: Color, percent: f64) -> Color {
        Color::from_argb(
            back.alpha,
            blend_channel(self.red, back.red, percent),
            blend_channel(self.green, back.green, percent),
            blend_channel(self.blue, back.blue, percent),
        )
    }
}

fn blend_channel(fore: u8, back: u8, percent: f64) -> u8 {
    (f64::from(fore) * percent + f64::from(back) * (1.0 - percent)) as u8
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        peniko::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Color::from_argb(rgba.a, rgba.r, rgba.g, rgba.b)
    }
}
