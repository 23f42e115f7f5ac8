//! Shapefile header and record validation.
//!
//! The checks mirror the main-file layout of the ESRI shapefile
//! specification: a 100-byte header carrying a magic file code and version,
//! followed by length-prefixed geometry records.

/// Main-file header length in bytes.
pub const HEADER_LENGTH: usize = 100;
/// Magic file code at header offset 0.
pub const FILE_CODE: i32 = 9994;
/// The only published format version.
pub const VERSION: i32 = 1000;

/// Sanity cap on record content length (16-bit words) and on part/point
/// counts. Values past this are treated as corruption, not data.
const MAX_REASONABLE: i32 = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub enum ShapefileError {
    TruncatedHeader { got: usize },
    BadFileCode { got: i32 },
    BadFileLength { got: usize, buffer: usize },
    BadVersion { got: i32 },
    NonFiniteBounds { bounds: [f64; 4] },
    UnreasonableContentLength { record: i32, length: i32 },
    TruncatedRecord { record: i32, need: usize, have: usize },
    NonFiniteCoordinate { part: i32, point: i32 },
    UnreasonableCounts { shape: String, parts: i32, points: i32 },
    PartIndexOutOfBounds { part: i32, points: i32 },
    EmptyPartRange { part: i32, start: i32, end: i32 },
    UnknownShapeType { code: u32 },
    OddCoordinateCount { len: usize },
    RingTooShort { points: usize },
    RingSizesMismatch { expected: usize, got: usize },
}

impl std::fmt::Display for ShapefileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapefileError::TruncatedHeader { got } => {
                write!(f, "buffer too small for header (got {got}, need {HEADER_LENGTH})")
            }
            ShapefileError::BadFileCode { got } => {
                write!(f, "incorrect file code (got {got}, expected {FILE_CODE})")
            }
            ShapefileError::BadFileLength { got, buffer } => {
                write!(f, "incorrect file length (got {got}, buffer size {buffer})")
            }
            ShapefileError::BadVersion { got } => {
                write!(f, "unsupported version (got {got}, expected {VERSION})")
            }
            ShapefileError::NonFiniteBounds { bounds } => {
                write!(
                    f,
                    "invalid bounding box coordinates ({}, {}, {}, {})",
                    bounds[0], bounds[1], bounds[2], bounds[3]
                )
            }
            ShapefileError::UnreasonableContentLength { record, length } => {
                write!(f, "unreasonable content length {length} for record {record}")
            }
            ShapefileError::TruncatedRecord { record, need, have } => {
                write!(
                    f,
                    "truncated content for record {record} (need {need} bytes, have {have})"
                )
            }
            ShapefileError::NonFiniteCoordinate { part, point } => {
                write!(f, "non-finite coordinates at part {part}, point {point}")
            }
            ShapefileError::UnreasonableCounts { shape, parts, points } => {
                write!(
                    f,
                    "invalid {shape}: unreasonable number of parts ({parts}) or points ({points})"
                )
            }
            ShapefileError::PartIndexOutOfBounds { part, points } => {
                write!(f, "part index {part} out of bounds (num points: {points})")
            }
            ShapefileError::EmptyPartRange { part, start, end } => {
                write!(f, "part {part} has invalid range ({start} >= {end})")
            }
            ShapefileError::UnknownShapeType { code } => {
                write!(f, "invalid shape type: {code}")
            }
            ShapefileError::OddCoordinateCount { len } => {
                write!(f, "coordinate array must have even length (got {len})")
            }
            ShapefileError::RingTooShort { points } => {
                write!(f, "ring must have at least 3 points (got {points})")
            }
            ShapefileError::RingSizesMismatch { expected, got } => {
                write!(
                    f,
                    "ring sizes describe {expected} coordinates but buffer holds {got}"
                )
            }
        }
    }
}

impl std::error::Error for ShapefileError {}

/// Geometry record types from the shapefile specification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShapeType {
    Null,
    Point,
    PolyLine,
    Polygon,
    MultiPoint,
    PointZ,
    PolyLineZ,
    PolygonZ,
    MultiPointZ,
    PointM,
    PolyLineM,
    PolygonM,
    MultiPointM,
    MultiPatch,
}

impl ShapeType {
    pub fn from_code(code: u32) -> Result<Self, ShapefileError> {
        match code {
            0 => Ok(ShapeType::Null),
            1 => Ok(ShapeType::Point),
            3 => Ok(ShapeType::PolyLine),
            5 => Ok(ShapeType::Polygon),
            8 => Ok(ShapeType::MultiPoint),
            11 => Ok(ShapeType::PointZ),
            13 => Ok(ShapeType::PolyLineZ),
            15 => Ok(ShapeType::PolygonZ),
            18 => Ok(ShapeType::MultiPointZ),
            21 => Ok(ShapeType::PointM),
            23 => Ok(ShapeType::PolyLineM),
            25 => Ok(ShapeType::PolygonM),
            28 => Ok(ShapeType::MultiPointM),
            31 => Ok(ShapeType::MultiPatch),
            _ => Err(ShapefileError::UnknownShapeType { code }),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            ShapeType::Null => 0,
            ShapeType::Point => 1,
            ShapeType::PolyLine => 3,
            ShapeType::Polygon => 5,
            ShapeType::MultiPoint => 8,
            ShapeType::PointZ => 11,
            ShapeType::PolyLineZ => 13,
            ShapeType::PolygonZ => 15,
            ShapeType::MultiPointZ => 18,
            ShapeType::PointM => 21,
            ShapeType::PolyLineM => 23,
            ShapeType::PolygonM => 25,
            ShapeType::MultiPointM => 28,
            ShapeType::MultiPatch => 31,
        }
    }

    /// Null shapes are recognized placeholders with no geometry to convert.
    pub fn has_geometry(self) -> bool {
        self != ShapeType::Null
    }
}

pub fn check_header_buffer(buffer_length: usize) -> Result<(), ShapefileError> {
    if buffer_length < HEADER_LENGTH {
        return Err(ShapefileError::TruncatedHeader { got: buffer_length });
    }
    Ok(())
}

pub fn check_file_code(file_code: i32) -> Result<(), ShapefileError> {
    if file_code != FILE_CODE {
        return Err(ShapefileError::BadFileCode { got: file_code });
    }
    Ok(())
}

pub fn check_file_length(file_length: usize, buffer_length: usize) -> Result<(), ShapefileError> {
    if file_length < HEADER_LENGTH || file_length > buffer_length {
        return Err(ShapefileError::BadFileLength {
            got: file_length,
            buffer: buffer_length,
        });
    }
    Ok(())
}

pub fn check_version(version: i32) -> Result<(), ShapefileError> {
    if version != VERSION {
        return Err(ShapefileError::BadVersion { got: version });
    }
    Ok(())
}

pub fn check_bounding_box(
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
) -> Result<(), ShapefileError> {
    if !x_min.is_finite() || !y_min.is_finite() || !x_max.is_finite() || !y_max.is_finite() {
        return Err(ShapefileError::NonFiniteBounds {
            bounds: [x_min, y_min, x_max, y_max],
        });
    }
    Ok(())
}

pub fn check_record_content_length(
    content_length: i32,
    record_number: i32,
) -> Result<(), ShapefileError> {
    if content_length < 0 || content_length > MAX_REASONABLE {
        return Err(ShapefileError::UnreasonableContentLength {
            record: record_number,
            length: content_length,
        });
    }
    Ok(())
}

pub fn check_record_buffer_space(
    offset: usize,
    record_size: usize,
    buffer_length: usize,
    record_number: i32,
) -> Result<(), ShapefileError> {
    if offset + record_size > buffer_length {
        return Err(ShapefileError::TruncatedRecord {
            record: record_number,
            need: record_size,
            have: buffer_length.saturating_sub(offset),
        });
    }
    Ok(())
}

pub fn check_point_coordinates(
    x: f64,
    y: f64,
    part_index: i32,
    point_index: i32,
) -> Result<(), ShapefileError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ShapefileError::NonFiniteCoordinate {
            part: part_index,
            point: point_index,
        });
    }
    Ok(())
}

pub fn check_parts_and_points(
    num_parts: i32,
    num_points: i32,
    shape: &str,
) -> Result<(), ShapefileError> {
    if num_parts <= 0 || num_parts > MAX_REASONABLE || num_points <= 0 || num_points > MAX_REASONABLE
    {
        return Err(ShapefileError::UnreasonableCounts {
            shape: shape.to_string(),
            parts: num_parts,
            points: num_points,
        });
    }
    Ok(())
}

pub fn check_part_index(part_index: i32, num_points: i32) -> Result<(), ShapefileError> {
    if part_index < 0 || part_index >= num_points {
        return Err(ShapefileError::PartIndexOutOfBounds {
            part: part_index,
            points: num_points,
        });
    }
    Ok(())
}

pub fn check_part_range(start: i32, end: i32, part_index: i32) -> Result<(), ShapefileError> {
    if start >= end {
        return Err(ShapefileError::EmptyPartRange {
            part: part_index,
            start,
            end,
        });
    }
    Ok(())
}
