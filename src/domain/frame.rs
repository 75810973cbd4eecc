use image::RgbImage;

use super::errors::FrameError;

/// A frame that decoded successfully. Width and height are always positive.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    image: RgbImage,
}

impl DecodedFrame {
    pub fn new(image: RgbImage) -> Result<Self, FrameError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyImage { width, height });
        }
        Ok(Self { image })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
