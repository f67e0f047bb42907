use crate::foundation::core::Canvas;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::foundation::math::premul_over_opaque;

/// A rendered frame as tightly packed RGB8 pixels (row-major, no alpha).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, `width * height * 3` long.
    pub data: Vec<u8>,
}

impl FrameRgb {
    /// Bytes per pixel in [`FrameRgb::data`].
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Build a frame from premultiplied RGBA8 bytes, flattening any remaining alpha over `bg`.
    pub fn from_premul_rgba8(
        canvas: Canvas,
        src_premul: &[u8],
        bg: [u8; 3],
    ) -> CountdownResult<Self> {
        if src_premul.len() != canvas.pixel_count() * 4 {
            return Err(CountdownError::render(format!(
                "rgba buffer size mismatch: got {} bytes, expected {}x{}x4",
                src_premul.len(),
                canvas.width,
                canvas.height
            )));
        }

        let mut data = Vec::with_capacity(canvas.pixel_count() * Self::BYTES_PER_PIXEL);
        for px in src_premul.chunks_exact(4) {
            let a = px[3];
            if a == 255 {
                data.extend_from_slice(&px[..3]);
            } else {
                data.push(premul_over_opaque(px[0], a, bg[0]));
                data.push(premul_over_opaque(px[1], a, bg[1]));
                data.push(premul_over_opaque(px[2], a, bg[2]));
            }
        }

        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * Self::BYTES_PER_PIXEL;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Swap the frame into an `image` buffer (for PNG export and inspection).
    pub fn into_image(self) -> CountdownResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| CountdownError::render("frame buffer does not match its dimensions"))
    }
}
