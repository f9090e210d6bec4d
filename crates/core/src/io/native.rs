//! Float32 GeoTIFF reading/writing for elevation grids
//!
//! Uses the `tiff` crate. Only the pixel scale and GDAL no-data tags are
//! interpreted; the grid has no notion of origin or projection.

use crate::error::{Error, Result};
use crate::raster::ElevationGrid;
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

/// ModelPixelScaleTag
const PIXEL_SCALE_TAG: u16 = 33550;
/// ModelTiepointTag
const TIEPOINT_TAG: u16 = 33922;
/// GeoKeyDirectoryTag
const GEOKEY_DIRECTORY_TAG: u16 = 34735;
/// GDAL_NODATA, an ASCII-encoded number
const GDAL_NODATA_TAG: u16 = 42113;

/// Options for writing GeoTIFF files
#[derive(Debug, Clone, Default)]
pub struct GeoTiffOptions {
    /// Value written for no-data cells and recorded in the GDAL_NODATA tag.
    /// Falls back to the grid's own no-data value, then to NaN.
    pub nodata: Option<f32>,
}

/// Read a single-band GeoTIFF into an elevation grid
pub fn read_geotiff<P: AsRef<Path>>(path: P) -> Result<ElevationGrid> {
    let file = File::open(path.as_ref())?;
    decode_geotiff(file)
}

/// Read a GeoTIFF from an in-memory buffer
pub fn read_geotiff_from_buffer(data: &[u8]) -> Result<ElevationGrid> {
    decode_geotiff(Cursor::new(data))
}

fn decode_geotiff<R: Read + Seek>(reader: R) -> Result<ElevationGrid> {
    let mut decoder = Decoder::new(reader)?;
    let (width, height) = decoder.dimensions()?;
    let rows = height as usize;
    let cols = width as usize;

    let data: Vec<f64> = match decoder.read_image()? {
        DecodingResult::F32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::F64(buf) => buf,
        DecodingResult::I16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(f64::from).collect(),
        _ => return Err(Error::Other("Unsupported TIFF pixel format for elevation".into())),
    };

    let cell_size = read_cell_size(&mut decoder).unwrap_or(1.0);
    let nodata = read_nodata(&mut decoder);
    let mut grid = ElevationGrid::from_vec(data, rows, cols, cell_size)?;
    grid.set_nodata(nodata);
    Ok(grid)
}

/// No-data value from the GDAL_NODATA tag, if present and numeric.
fn read_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    let text = decoder
        .get_tag_ascii_string(Tag::Unknown(GDAL_NODATA_TAG))
        .ok()?;
    let value: f64 = text
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .parse()
        .ok()?;
    (!value.is_nan()).then_some(value)
}

/// Cell size from ModelPixelScaleTag, if present and square-ish.
fn read_cell_size<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    let scale = decoder.get_tag_f64_vec(Tag::Unknown(PIXEL_SCALE_TAG)).ok()?;
    match scale.first() {
        Some(&sx) if sx.is_finite() && sx > 0.0 => Some(sx),
        _ => None,
    }
}

/// Write an elevation grid as a Float32 GeoTIFF file
pub fn write_geotiff<P: AsRef<Path>>(
    grid: &ElevationGrid,
    path: P,
    options: Option<GeoTiffOptions>,
) -> Result<()> {
    let file = BufWriter::new(File::create(path.as_ref())?);
    encode_geotiff(grid, file, options.unwrap_or_default())
}

/// Write an elevation grid to an in-memory GeoTIFF buffer
pub fn write_geotiff_to_buffer(
    grid: &ElevationGrid,
    options: Option<GeoTiffOptions>,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_geotiff(grid, Cursor::new(&mut buf), options.unwrap_or_default())?;
    Ok(buf)
}

fn encode_geotiff<W: Write + Seek>(
    grid: &ElevationGrid,
    writer: W,
    options: GeoTiffOptions,
) -> Result<()> {
    let (rows, cols) = grid.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let sentinel = options.nodata.or(grid.nodata().map(|v| v as f32));
    let data: Vec<f32> = grid
        .data()
        .iter()
        .map(|&v| {
            if grid.is_nodata(v) {
                sentinel.unwrap_or(f32::NAN)
            } else {
                v as f32
            }
        })
        .collect();

    let mut encoder = TiffEncoder::new(writer)?;
    let mut image = encoder.new_image::<Gray32Float>(cols as u32, rows as u32)?;

    let cell = grid.cell_size();
    let scale = [cell, cell, 0.0];
    image
        .encoder()
        .write_tag(Tag::Unknown(PIXEL_SCALE_TAG), &scale[..])?;

    let tiepoint = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    image
        .encoder()
        .write_tag(Tag::Unknown(TIEPOINT_TAG), &tiepoint[..])?;

    // Version 1.1.0 with GTModelTypeGeoKey=Projected, GTRasterTypeGeoKey=PixelIsArea
    let geokeys: [u16; 12] = [1, 1, 0, 2, 1024, 0, 1, 1, 1025, 0, 1, 1];
    image
        .encoder()
        .write_tag(Tag::Unknown(GEOKEY_DIRECTORY_TAG), &geokeys[..])?;

    if let Some(nodata) = sentinel {
        let text = nodata.to_string();
        image
            .encoder()
            .write_tag(Tag::Unknown(GDAL_NODATA_TAG), text.as_str())?;
    }

    image.write_data(&data)?;
    Ok(())
}
