use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use lumen_core::PixelBuffer;

/// Decode a JPEG/PNG/TIFF file into RGBA8.
pub fn load_rgba(path: &Path) -> Result<PixelBuffer> {
    info!(?path, "loading image file");
    let t0 = Instant::now();
    let img =
        image::open(path).with_context(|| format!("failed to open image: {}", path.display()))?;
    let buffer = PixelBuffer::from_rgba_image(img.into_rgba8());
    debug!(
        elapsed_ms = t0.elapsed().as_millis(),
        width = buffer.width(),
        height = buffer.height(),
        "image decode"
    );
    Ok(buffer)
}

pub fn save_rgba(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    let img = buffer
        .to_rgba_image()
        .context("rendered buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("failed to write image: {}", path.display()))?;
    info!(?path, "image written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_round_trip_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let buffer = PixelBuffer::filled(3, 2, [128, 64, 32, 200]);
        save_rgba(&path, &buffer).unwrap();
        assert_eq!(load_rgba(&path).unwrap(), buffer);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rgba(&dir.path().join("absent.jpg")).unwrap_err();
        assert!(format!("{err:#}").contains("absent.jpg"));
    }
}
