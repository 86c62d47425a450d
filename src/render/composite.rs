use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{SlidesError, SlidesResult};
use crate::foundation::math::scale_u8;

/// Source-over for one premultiplied pixel.
pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255 - sa;
            let mut out = [0u8; 4];
            for i in 0..4 {
                let dc = scale_u8(dst[i], inv);
                out[i] = src[i].saturating_add(dc);
            }
            out
        }
    }
}

/// Composite `src` over `dst`, both premultiplied RGBA8 of equal length.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> SlidesResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SlidesError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Fill a buffer with one premultiplied colour.
pub(crate) fn fill(dst: &mut [u8], color: Rgba8Premul) {
    let px = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
