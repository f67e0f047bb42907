pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Composite one premultiplied channel over an opaque background channel.
pub(crate) fn premul_over_opaque(src: u8, src_a: u8, bg: u8) -> u8 {
    let inv = 255u16 - u16::from(src_a);
    (u16::from(src) + mul_div255_u16(u16::from(bg), inv)).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
