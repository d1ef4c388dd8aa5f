//! Print manual-download guidance for California topography data.
//!
//! The high-resolution 3DEP tiles have no scriptable bulk endpoint, so this
//! command only explains where to get them and where to put them.

pub fn topography() {
    println!("CALIFORNIA TOPOGRAPHY DATA DOWNLOAD");
    println!("Data source: USGS 3D Elevation Program (3DEP)");
    println!(
        r#"
California DEM data can be downloaded from:

1. USGS National Map Viewer (recommended)
   URL: https://apps.nationalmap.gov/downloader/

   Steps:
   - Click "Find Products"
   - Extent: draw a box around California, or enter coordinates:
       North: 42.0, South: 32.5, West: -124.5, East: -114.0
   - Datasets: check "Elevation Products (3DEP)"
   - Select "1/3 arc-second DEM" (10-meter resolution)
   - Download the tiles covering California
   - Save them to data/raw/topography/

2. OpenTopography (research quality, higher resolutions)
   URL: https://opentopography.org/ (free account required)

3. SRTM (global, 30-meter resolution)
   Run `cafire elevation` to fetch the SRTM tiles automatically, or use
   USGS EarthExplorer.

After downloading, the DEM is processed into slope and aspect downstream;
fires spread faster uphill and south-facing slopes carry drier vegetation.
"#
    );
}
