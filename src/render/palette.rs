use image::Rgba;

/// 10 色调色板，下标即单元格取值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([Rgba<u8>; 10]);

/// ARC 官方配色
pub const ARC_PALETTE: Palette = Palette([
    Rgba([0, 0, 0, 255]),
    Rgba([30, 147, 255, 255]),
    Rgba([249, 60, 49, 255]),
    Rgba([79, 204, 48, 255]),
    Rgba([255, 220, 0, 255]),
    Rgba([153, 153, 153, 255]),
    Rgba([229, 58, 163, 255]),
    Rgba([255, 133, 27, 255]),
    Rgba([135, 216, 241, 255]),
    Rgba([146, 18, 49, 255]),
]);

impl Palette {
    pub const fn new(colors: [Rgba<u8>; 10]) -> Self {
        Self(colors)
    }

    /// 取值对应的颜色
    pub fn color(&self, value: u8) -> Option<Rgba<u8>> {
        self.0.get(usize::from(value)).copied()
    }

    /// 颜色对应的取值（反查）
    pub fn value_of(&self, color: Rgba<u8>) -> Option<u8> {
        self.0
            .iter()
            .position(|c| *c == color)
            .and_then(|i| u8::try_from(i).ok())
    }

    pub fn contains(&self, color: Rgba<u8>) -> bool {
        self.0.contains(&color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        ARC_PALETTE
    }
}
