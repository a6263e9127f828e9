//! PNG loading into normalized sample arrays and rendering of generated grids

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{TiledGrid, UnitCatalog};
use image::{ImageBuffer, Rgba};
use ndarray::Array3;
use std::path::Path;

/// Load a PNG into a normalized (height, width, 4) RGBA sample array
///
/// Sample values are scaled into [0, 1], the form the generators consume.
///
/// # Errors
///
/// Returns [`AlgorithmError::ImageLoad`] if the file cannot be opened or is
/// not a decodable image.
pub fn load_image_array<P: AsRef<Path>>(path: P) -> Result<Array3<f64>> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgba_img = img.to_rgba8();

    let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
    let mut image_data = Array3::zeros((height, width, 4));

    for (x, y, pixel) in rgba_img.enumerate_pixels() {
        let channels = pixel.0;
        for c in 0..4 {
            let val = channels.get(c).copied().unwrap_or(0);
            if let Some(sample) = image_data.get_mut((y as usize, x as usize, c)) {
                *sample = f64::from(val) / 255.0;
            }
        }
    }

    Ok(image_data)
}

/// Export a generated grid as a PNG by blitting each id's unit block
///
/// Each cell renders as the full sample block of its unit, so the output
/// measures (rows × unit height) by (cols × unit width) pixels. Channels
/// beyond the first four are ignored; single-channel units render as gray.
///
/// # Errors
///
/// Returns an error if:
/// - A grid id has no unit in the catalog
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &TiledGrid,
    catalog: &UnitCatalog,
    output_path: &str,
) -> Result<()> {
    let (unit_rows, unit_cols, channels) = catalog
        .get(grid.blank())
        .map(crate::spatial::Unit::shape)
        .ok_or(AlgorithmError::InvalidUnitId {
            id: grid.blank(),
            unit_count: catalog.len(),
        })?;

    let width = (grid.cols() * unit_cols) as u32;
    let height = (grid.rows() * unit_rows) as u32;
    let mut img = ImageBuffer::new(width, height);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let id = grid.id_at(row, col).unwrap_or(grid.blank());
            let unit = catalog.get(id).ok_or(AlgorithmError::InvalidUnitId {
                id,
                unit_count: catalog.len(),
            })?;
            let samples = unit.samples();
            for ur in 0..unit_rows {
                for uc in 0..unit_cols {
                    let sample_at = |c: usize| {
                        samples
                            .get((ur, uc, c.min(channels.saturating_sub(1))))
                            .copied()
                            .unwrap_or(0.0)
                    };
                    let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0) as u8;
                    let alpha = if channels >= 4 { sample_at(3) } else { 1.0 };
                    let pixel = Rgba([
                        to_byte(sample_at(0)),
                        to_byte(sample_at(1)),
                        to_byte(sample_at(2)),
                        to_byte(alpha),
                    ]);
                    let x = (col * unit_cols + uc) as u32;
                    let y = (row * unit_rows + ur) as u32;
                    img.put_pixel(x, y, pixel);
                }
            }
        }
    }

    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
