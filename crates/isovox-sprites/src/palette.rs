use isovox_world::GroundType;

/// Palette index of the cursor outline.
pub const CURSOR_INDEX: u8 = 1;
/// First palette index used by ground shades.
pub const GROUND_BASE: u8 = 16;
/// Shades per ground type, lightest first.
pub const SHADES: u8 = 4;

const SHADE_SCALE: [f32; SHADES as usize] = [1.15, 1.0, 0.85, 0.7];

/// What a palette index stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelClass {
    Transparent,
    Cursor,
    Ground { ground: GroundType, shade: u8 },
    Unused,
}

/// 256-entry palette of packed `0xAARRGGBB` colors. Entry 0 is transparent.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: [u32; 256],
}

#[inline]
pub fn pack_rgb(rgb: [u8; 3]) -> u32 {
    0xFF00_0000 | (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32
}

fn shade(rgb: [u8; 3], k: f32) -> [u8; 3] {
    rgb.map(|c| ((c as f32) * k).round().clamp(0.0, 255.0) as u8)
}

fn ground_slot(ground: GroundType) -> Option<u8> {
    GroundType::VALID
        .iter()
        .position(|g| *g == ground)
        .map(|i| i as u8)
}

impl Palette {
    /// Palette with the given cursor color and a base color per ground type.
    pub fn new(cursor: [u8; 3], ground_color: impl Fn(GroundType) -> [u8; 3]) -> Self {
        let mut colors = [0u32; 256];
        colors[CURSOR_INDEX as usize] = pack_rgb(cursor);
        for ground in GroundType::VALID {
            let base = ground_color(ground);
            for s in 0..SHADES {
                if let Some(idx) = Self::ground_index(ground, s) {
                    colors[idx as usize] = pack_rgb(shade(base, SHADE_SCALE[s as usize]));
                }
            }
        }
        Self { colors }
    }

    /// Index of `shade` (0 lightest) of `ground`; `None` for the invalid ground.
    #[inline]
    pub fn ground_index(ground: GroundType, shade: u8) -> Option<u8> {
        let slot = ground_slot(ground)?;
        Some(GROUND_BASE + slot * SHADES + shade.min(SHADES - 1))
    }

    #[inline]
    pub fn color(&self, index: u8) -> u32 {
        self.colors[index as usize]
    }

    pub fn classify(&self, index: u8) -> PixelClass {
        match index {
            0 => PixelClass::Transparent,
            CURSOR_INDEX => PixelClass::Cursor,
            i if i >= GROUND_BASE => {
                let rel = i - GROUND_BASE;
                match GroundType::VALID.get((rel / SHADES) as usize) {
                    Some(ground) => PixelClass::Ground {
                        ground: *ground,
                        shade: rel % SHADES,
                    },
                    None => PixelClass::Unused,
                }
            }
            _ => PixelClass::Unused,
        }
    }
}
