//! Conversion of flat shapefile coordinate buffers into vector geometry and
//! its GeoJSON encoding.
//!
//! Coordinate buffers are interleaved `[x0, y0, x1, y1, ...]`, the layout
//! geometry records use on disk.

use serde_json::{Value, json};

use crate::shapefile::ShapefileError;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapePoint {
    pub x: f64,
    pub y: f64,
}

impl ShapePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VectorGeometry {
    Point(ShapePoint),
    MultiPoint(Vec<ShapePoint>),
    LineString(Vec<ShapePoint>),
    /// Outer ring first, holes after.
    Polygon(Vec<Vec<ShapePoint>>),
    MultiPolygon(Vec<Vec<Vec<ShapePoint>>>),
}

/// Computes `[min_x, min_y, max_x, max_y]` over an interleaved buffer.
///
/// An empty buffer yields all zeros rather than infinities.
pub fn bounds_of(coordinates: &[f64]) -> Result<[f64; 4], ShapefileError> {
    check_even(coordinates)?;

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for pair in coordinates.chunks(2) {
        min_x = min_x.min(pair[0]);
        min_y = min_y.min(pair[1]);
        max_x = max_x.max(pair[0]);
        max_y = max_y.max(pair[1]);
    }

    if !min_x.is_finite() {
        return Ok([0.0, 0.0, 0.0, 0.0]);
    }
    Ok([min_x, min_y, max_x, max_y])
}

/// Ring winding test over an interleaved, closed ring buffer.
///
/// Positive shoelace sum under the `(x2 - x1) * (y2 + y1)` form means
/// clockwise, which marks an outer ring in shapefile polygons.
pub fn is_clockwise(coordinates: &[f64]) -> Result<bool, ShapefileError> {
    check_even(coordinates)?;
    let points = coordinates.len() / 2;
    if points < 3 {
        return Err(ShapefileError::RingTooShort { points });
    }

    let mut sum = 0.0;
    for pair in coordinates.windows(4).step_by(2) {
        let (x1, y1, x2, y2) = (pair[0], pair[1], pair[2], pair[3]);
        sum += (x2 - x1) * (y2 + y1);
    }
    Ok(sum > 0.0)
}

pub fn convert_point(x: f64, y: f64) -> VectorGeometry {
    VectorGeometry::Point(ShapePoint::new(x, y))
}

pub fn convert_multi_point(coordinates: &[f64]) -> Result<VectorGeometry, ShapefileError> {
    Ok(VectorGeometry::MultiPoint(collect_points(coordinates)?))
}

pub fn convert_polyline(coordinates: &[f64]) -> Result<VectorGeometry, ShapefileError> {
    Ok(VectorGeometry::LineString(collect_points(coordinates)?))
}

/// Groups polygon rings by winding: a clockwise ring opens a new polygon,
/// counter-clockwise rings are holes of the polygon opened before them.
/// One group converts to `Polygon`, several to `MultiPolygon`.
pub fn convert_polygon(
    coordinates: &[f64],
    ring_sizes: &[usize],
) -> Result<VectorGeometry, ShapefileError> {
    check_even(coordinates)?;
    let described: usize = ring_sizes.iter().map(|s| s * 2).sum();
    if described != coordinates.len() {
        return Err(ShapefileError::RingSizesMismatch {
            expected: described,
            got: coordinates.len(),
        });
    }

    let mut rings: Vec<(Vec<ShapePoint>, bool)> = Vec::with_capacity(ring_sizes.len());
    let mut offset = 0;
    for &size in ring_sizes {
        let ring = &coordinates[offset..offset + size * 2];
        let clockwise = is_clockwise(ring)?;
        rings.push((collect_points(ring)?, clockwise));
        offset += size * 2;
    }

    let mut polygons: Vec<Vec<Vec<ShapePoint>>> = Vec::new();
    let mut current: Vec<Vec<ShapePoint>> = Vec::new();
    for (ring, clockwise) in rings {
        if clockwise && !current.is_empty() {
            polygons.push(std::mem::take(&mut current));
        }
        current.push(ring);
    }
    if !current.is_empty() {
        polygons.push(current);
    }

    if polygons.len() == 1 {
        let only = polygons.into_iter().next().unwrap_or_default();
        Ok(VectorGeometry::Polygon(only))
    } else {
        Ok(VectorGeometry::MultiPolygon(polygons))
    }
}

/// Encodes the geometry as a GeoJSON geometry object.
pub fn to_geojson_value(geometry: &VectorGeometry) -> Value {
    match geometry {
        VectorGeometry::Point(p) => json!({
            "type": "Point",
            "coordinates": position(p),
        }),
        VectorGeometry::MultiPoint(points) => json!({
            "type": "MultiPoint",
            "coordinates": positions(points),
        }),
        VectorGeometry::LineString(points) => json!({
            "type": "LineString",
            "coordinates": positions(points),
        }),
        VectorGeometry::Polygon(rings) => json!({
            "type": "Polygon",
            "coordinates": rings.iter().map(|r| positions(r)).collect::<Vec<_>>(),
        }),
        VectorGeometry::MultiPolygon(polygons) => json!({
            "type": "MultiPolygon",
            "coordinates": polygons
                .iter()
                .map(|rings| rings.iter().map(|r| positions(r)).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
        }),
    }
}

fn position(p: &ShapePoint) -> Value {
    json!([p.x, p.y])
}

fn positions(points: &[ShapePoint]) -> Vec<Value> {
    points.iter().map(position).collect()
}

fn collect_points(coordinates: &[f64]) -> Result<Vec<ShapePoint>, ShapefileError> {
    check_even(coordinates)?;
    Ok(coordinates
        .chunks(2)
        .map(|pair| ShapePoint::new(pair[0], pair[1]))
        .collect())
}

fn check_even(coordinates: &[f64]) -> Result<(), ShapefileError> {
    if coordinates.len() % 2 != 0 {
        return Err(ShapefileError::OddCoordinateCount {
            len: coordinates.len(),
        });
    }
    Ok(())
}
