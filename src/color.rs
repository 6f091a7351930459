//! Color type, CSS formatting and the sequential palette used by the heatmap.
//!
//! Brightening follows the usual display convention: each channel is multiplied by
//! `(1 / 0.7)^k` and clamped, so a brightened color keeps its hue and relative intensity.

/// Darkening/brightening base (a step of `k = 1` scales channels by `1 / 0.7`).
const BRIGHTER_BASE: f32 = 1.0 / 0.7;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Light grey used for cell strokes (`#ccc`).
    pub const LIGHT_GREY: Self = Self::new(204, 204, 204, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
            3 => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let expand = |n: u32| ((n & 0xf) * 17) as u8;
                Some(Self::rgb(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            _ => None,
        }
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Create a color with alpha given as an opacity in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        self.with_alpha((opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// A brighter variant of this color; `k = 0` is the identity.
    ///
    /// Channels saturate at 255, alpha is preserved.
    #[must_use]
    pub fn brighter(self, k: f32) -> Self {
        let factor = BRIGHTER_BASE.powf(k);
        let scale = |c: u8| (f32::from(c) * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// Format as a CSS color (`#rrggbb`, or `rgba(...)` when translucent).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// Stops of the YlGnBu sequential palette (light yellow to dark blue).
pub const YL_GN_BU: [Rgba; 9] = [
    Rgba::from_hex(0x00ff_ffd9),
    Rgba::from_hex(0x00ed_f8b1),
    Rgba::from_hex(0x00c7_e9b4),
    Rgba::from_hex(0x007f_cdbb),
    Rgba::from_hex(0x0041_b6c4),
    Rgba::from_hex(0x001d_91c0),
    Rgba::from_hex(0x0022_5ea8),
    Rgba::from_hex(0x0025_3494),
    Rgba::from_hex(0x0008_1d58),
];

/// Piecewise-linear interpolation through evenly spaced color stops.
///
/// `t` is clamped to `[0, 1]`. An empty stop list yields black.
#[must_use]
pub fn interpolate_stops(stops: &[Rgba], t: f32) -> Rgba {
    match stops {
        [] => Rgba::BLACK,
        [only] => *only,
        _ => {
            let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
            let segments = stops.len() - 1;
            let scaled = t * segments as f32;
            let segment = (scaled.floor() as usize).min(segments - 1);
            stops[segment].lerp(stops[segment + 1], scaled - segment as f32)
        }
    }
}
