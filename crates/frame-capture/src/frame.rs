//! RGBA frame buffer type

use crate::CameraError;

/// Decoded RGBA video frame
///
/// Pixels are stored row-major, 4 bytes per pixel (R, G, B, A), no
/// premultiplied alpha. The detection pipeline borrows frames read-only.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    /// RGBA pixel data (width * height * 4)
    data: Vec<u8>,
    /// Frame width
    width: u32,
    /// Frame height
    height: u32,
    /// Capture timestamp (milliseconds since epoch)
    pub timestamp_ms: i64,
    /// Frame sequence number
    pub sequence: u32,
}

impl FrameBuffer {
    /// Create a frame from raw RGBA data
    ///
    /// The data length must be exactly `width * height * 4`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CameraError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CameraError::Format(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            timestamp_ms: 0,
            sequence: 0,
        })
    }

    /// Create a frame filled with a single RGBA color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
            timestamp_ms: 0,
            sequence: 0,
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) into an RGBA frame
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self, CameraError> {
        let img = image::load_from_memory(bytes).map_err(|e| CameraError::Decode(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
            timestamp_ms: 0,
            sequence: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count (width * height)
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes, row-major
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get pixel at (x, y) as [r, g, b, a]
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Iterate pixels as [r, g, b, a] chunks, row-major
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(4)
    }
}
