/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Minimum camera distance from globe center (meters).
pub const MIN_CAMERA_DISTANCE: f64 = WGS84_A * 1.001;
/// Maximum camera distance from globe center (meters).
pub const MAX_CAMERA_DISTANCE: f64 = WGS84_A * 200.0;

/// Reference distance for the zoom/distance relation: zoom 1 places the
/// camera three semi-major axes from the globe center (whole-world view).
const ZOOM_REFERENCE_DISTANCE: f64 = 3.0 * WGS84_A;

/// Maps a flat-map zoom level to an orbit camera distance from globe center.
///
/// Zoom values at or below zero are treated as a minimal zoom so the result
/// stays within the camera distance clamp range.
pub fn zoom_to_camera_distance(zoom: f64) -> f64 {
    let dist = ZOOM_REFERENCE_DISTANCE / zoom.max(1e-6);
    dist.clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE)
}

/// Inverse of [`zoom_to_camera_distance`].
pub fn camera_distance_to_zoom(distance: f64) -> f64 {
    let dist = distance.clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
    ZOOM_REFERENCE_DISTANCE / dist
}
