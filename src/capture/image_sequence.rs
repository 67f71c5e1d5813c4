use std::path::{Path, PathBuf};

use image::{imageops::FilterType, DynamicImage};
use tracing::{debug, info};

use crate::capture::CaptureDevice;
use crate::error::{CaptureError, Result};
use crate::snapshot::GridSize;

/// Replays a directory of still images as if they were camera frames
///
/// Images are sorted by file name, downscaled to the grid, and advanced one
/// per `frame_period` ms, looping at the end.
pub struct ImageSequenceCamera {
    images: Vec<DynamicImage>,
    scaled: Vec<Vec<u8>>,
    grid: GridSize,
    frame_period: f64,
}

impl ImageSequenceCamera {
    /// Load every supported image in `dir`
    pub fn from_directory<P: AsRef<Path>>(dir: P, grid: GridSize, frame_period: f64) -> Result<Self> {
        let dir = dir.as_ref();
        let paths = Self::discover(dir)?;
        if paths.is_empty() {
            return Err(CaptureError::NoImagesFound { path: dir.display().to_string() }.into());
        }

        let images = paths
            .iter()
            .map(|path| {
                debug!("Loading capture image {:?}", path);
                image::open(path).map_err(|_| CaptureError::LoadFailed {
                    path: path.display().to_string(),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!("Loaded {} capture images from {:?}", images.len(), dir);
        Ok(Self::from_images(images, grid, frame_period))
    }

    /// Build from already-decoded images
    pub fn from_images(images: Vec<DynamicImage>, grid: GridSize, frame_period: f64) -> Self {
        let mut camera = Self {
            images,
            scaled: Vec::new(),
            grid,
            frame_period,
        };
        camera.rescale();
        camera
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && Self::is_image_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn is_image_file(path: &Path) -> bool {
        matches!(
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .as_deref(),
            Some("png") | Some("jpg") | Some("jpeg") | Some("bmp")
        )
    }

    fn rescale(&mut self) {
        if self.grid.is_empty() {
            self.scaled.clear();
            return;
        }
        self.scaled = self
            .images
            .iter()
            .map(|img| {
                img.resize_exact(self.grid.width, self.grid.height, FilterType::Triangle)
                    .to_rgba8()
                    .into_raw()
            })
            .collect();
    }

    fn index_at(&self, now_ms: f64) -> usize {
        if self.frame_period <= 0.0 {
            return 0;
        }
        (now_ms.max(0.0) / self.frame_period) as usize % self.scaled.len()
    }
}

impl CaptureDevice for ImageSequenceCamera {
    fn name(&self) -> &str {
        "image-sequence"
    }

    fn configure(&mut self, grid: GridSize) {
        debug!("Rescaling {} images to {}x{}", self.images.len(), grid.width, grid.height);
        self.grid = grid;
        self.rescale();
    }

    fn grid(&self) -> GridSize {
        self.grid
    }

    fn poll_frame(&mut self, now_ms: f64) -> Option<Vec<u8>> {
        if self.scaled.is_empty() {
            return None;
        }
        let index = self.index_at(now_ms);
        self.scaled.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn solid(color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 24, Rgb(color)))
    }

    #[test]
    fn test_cycles_images_by_period() {
        let mut camera = ImageSequenceCamera::from_images(
            vec![solid([255, 0, 0]), solid([0, 0, 255])],
            GridSize::new(4, 3),
            1000.0,
        );

        let first = camera.poll_frame(10.0).unwrap();
        assert_eq!(first.len(), 4 * 3 * 4);
        assert_eq!(&first[..4], &[255, 0, 0, 255]);

        let second = camera.poll_frame(1500.0).unwrap();
        assert_eq!(&second[..4], &[0, 0, 255, 255]);

        let looped = camera.poll_frame(2100.0).unwrap();
        assert_eq!(looped, first);
    }

    #[test]
    fn test_configure_rescales() {
        let mut camera = ImageSequenceCamera::from_images(vec![solid([9, 9, 9])], GridSize::new(4, 3), 1000.0);
        camera.configure(GridSize::new(8, 6));
        assert_eq!(camera.poll_frame(0.0).unwrap().len(), 8 * 6 * 4);
    }

    #[test]
    fn test_loads_sorted_directory() {
        let dir = tempdir().unwrap();
        RgbImage::from_pixel(8, 8, Rgb([0, 255, 0])).save(dir.path().join("b.png")).unwrap();
        RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])).save(dir.path().join("a.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let mut camera = ImageSequenceCamera::from_directory(dir.path(), GridSize::new(2, 2), 500.0).unwrap();
        assert_eq!(camera.len(), 2);
        assert_eq!(&camera.poll_frame(0.0).unwrap()[..3], &[255, 0, 0]);
        assert_eq!(&camera.poll_frame(600.0).unwrap()[..3], &[0, 255, 0]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let result = ImageSequenceCamera::from_directory(dir.path(), GridSize::new(2, 2), 500.0);
        assert!(result.is_err());
    }
}
