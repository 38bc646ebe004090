use palette::Srgba;

/// Straight-alpha RGBA8, the only color currency of this crate.
pub type Color = Srgba<u8>;

pub fn opaque(red: u8, green: u8, blue: u8) -> Color {
    Srgba::new(red, green, blue, 255)
}

pub fn transparent() -> Color {
    Srgba::new(0, 0, 0, 0)
}

/// Source-over for straight alpha, all-integer so output is reproducible
/// across platforms. Fully opaque or fully transparent sources pass through
/// exactly.
pub(crate) fn source_over(src: Color, dst: Color) -> Color {
    let (sr, sg, sb, sa) = src.into_components();
    let (dr, dg, db, da) = dst.into_components();
    let (sa, da) = (sa as u32, da as u32);

    // alpha scaled by 255: a_out * 255^2 = sa*255 + da*(255 - sa)
    let scaled_a = sa * 255 + da * (255 - sa);
    if scaled_a == 0 {
        return transparent();
    }

    let channel = |s: u8, d: u8| -> u8 {
        let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
        ((num + scaled_a / 2) / scaled_a) as u8
    };

    Srgba::new(
        channel(sr, dr),
        channel(sg, dg),
        channel(sb, db),
        ((scaled_a + 127) / 255) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_wins() {
        let red = opaque(255, 0, 0);
        assert_eq!(source_over(red, opaque(0, 255, 0)), red);
        assert_eq!(source_over(red, transparent()), red);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        let blue = opaque(0, 0, 255);
        assert_eq!(source_over(transparent(), blue), blue);
    }

    #[test]
    fn half_alpha_over_transparent_keeps_color() {
        let half = Srgba::new(10u8, 20, 30, 128);
        assert_eq!(source_over(half, transparent()), half);
    }

    #[test]
    fn half_alpha_blend_is_weighted() {
        let src = Srgba::new(255u8, 0, 0, 128);
        let out = source_over(src, opaque(0, 0, 255));
        // dst is opaque, so out stays opaque and red sits near 50%
        assert_eq!(out.alpha, 255);
        assert!(out.red > 120 && out.red < 136, "red was {}", out.red);
        assert!(out.blue > 120 && out.blue < 136, "blue was {}", out.blue);
    }
}
