//! Download SRTM elevation tiles covering the California bounding box.
//!
//! The CGIAR SRTM archive is published as 5°×5° tiles on a fixed grid, so a
//! bounding box maps directly onto a set of tile archives to fetch. A failed
//! tile is reported and skipped.

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::{cli::create_progress_bar, download};

use super::data_dir;

const TILE_URL: &str = "https://srtm.csi.cgiar.org/wp-content/uploads/files/srtm_5x5/TIFF";

// west, south, east, north
pub const CALIFORNIA_BOUNDS: Bounds = Bounds {
    west: -124.5,
    south: 32.5,
    east: -114.0,
    north: 42.0,
};

const DOWNLOAD_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

pub async fn elevation() -> Result<String> {
    let out_dir = data_dir("raw/topography")?;

    println!("DOWNLOADING CALIFORNIA ELEVATION DATA (SRTM)");
    println!(
        "Bounding box: ({}, {}, {}, {})",
        CALIFORNIA_BOUNDS.west, CALIFORNIA_BOUNDS.south, CALIFORNIA_BOUNDS.east, CALIFORNIA_BOUNDS.north
    );

    let tiles = srtm_tiles(&CALIFORNIA_BOUNDS);
    let bar = create_progress_bar(tiles.len() as u64, "Downloading SRTM tiles...".to_string());

    let mut successful = 0usize;
    for (x, y) in &tiles {
        let filename = tile_file_name(*x, *y);
        let url = format!("{TILE_URL}/{filename}");

        match download::download_file(&url, &out_dir.join(&filename)).await {
            Ok(bytes) => {
                successful += 1;
                println!("✅ {} ({:.2} MB)", filename, bytes as f64 / 1024.0 / 1024.0);
            }
            Err(e) => println!("❌ {filename}: {e}"),
        }

        bar.inc(1);
        tokio::time::sleep(DOWNLOAD_DELAY).await;
    }
    bar.finish_with_message("SRTM tiles downloaded");

    if successful == 0 {
        return Err(anyhow!(
            "no SRTM tiles were downloaded - try manual download from the USGS National Map"
        ));
    }

    println!("✅ Downloaded {successful} of {} tiles", tiles.len());

    Ok(out_dir.to_string_lossy().to_string())
}

/// The (column, row) indices of the 5°×5° SRTM tiles intersecting `bounds`.
/// Columns count east from 180°W, rows count south from 60°N, both 1-based.
pub fn srtm_tiles(bounds: &Bounds) -> Vec<(u32, u32)> {
    let first_x = ((bounds.west + 180.0) / 5.0).floor() as u32 + 1;
    let last_x = ((bounds.east + 180.0) / 5.0).floor() as u32 + 1;
    let first_y = ((60.0 - bounds.north) / 5.0).floor() as u32 + 1;
    let last_y = ((60.0 - bounds.south) / 5.0).floor() as u32 + 1;

    let mut tiles = Vec::new();
    for x in first_x..=last_x {
        for y in first_y..=last_y {
            tiles.push((x, y));
        }
    }

    tiles
}

fn tile_file_name(x: u32, y: u32) -> String {
    format!("srtm_{x:02}_{y:02}.zip")
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_enumerate_california_tiles() {
        let tiles = srtm_tiles(&CALIFORNIA_BOUNDS);

        // three columns (12-14) by three rows (4-6)
        assert_eq!(tiles.len(), 9);
        assert!(tiles.contains(&(12, 4)));
        assert!(tiles.contains(&(13, 5)));
        assert!(tiles.contains(&(14, 6)));
        assert!(!tiles.contains(&(11, 4)));
        assert!(!tiles.contains(&(14, 7)));
    }

    #[test]
    fn should_enumerate_single_tile_for_point_box() {
        let bounds = Bounds {
            west: -122.0,
            south: 37.0,
            east: -122.0,
            north: 37.0,
        };

        assert_eq!(srtm_tiles(&bounds), vec![(12, 5)]);
    }

    #[test]
    fn should_make_tile_file_name() {
        assert_eq!(tile_file_name(12, 4), "srtm_12_04.zip");
    }
}
