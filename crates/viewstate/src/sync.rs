use foundation::{
    WGS84_A, camera_distance_to_zoom, clamp_latitude_deg, wrap_longitude_deg,
    zoom_to_camera_distance,
};

use crate::view::{ViewState2D, ViewState3D};

/// Maps the flat-map camera onto the globe camera, for 2D → 3D mode
/// switches. Free function on purpose: mode switching is the caller's
/// concern, the store only ever sees the resulting record through its
/// setters.
pub fn globe_view_for_map(map: &ViewState2D) -> ViewState3D {
    let distance = zoom_to_camera_distance(map.zoom);
    ViewState3D {
        latitude: clamp_latitude_deg(map.latitude),
        longitude: wrap_longitude_deg(map.longitude),
        height: distance - WGS84_A,
        heading: Some(map.bearing),
        pitch: Some(map.pitch),
    }
}

/// Inverse of [`globe_view_for_map`]: maps the globe camera back onto the
/// flat map. Absent orientation reads as north-up, top-down.
pub fn map_view_for_globe(globe: &ViewState3D) -> ViewState2D {
    ViewState2D {
        longitude: wrap_longitude_deg(globe.longitude),
        latitude: clamp_latitude_deg(globe.latitude),
        zoom: camera_distance_to_zoom(globe.height + WGS84_A),
        pitch: globe.pitch.unwrap_or(0.0),
        bearing: globe.heading.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::{globe_view_for_map, map_view_for_globe};
    use crate::view::{ViewState2D, ViewState3D};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn map_to_globe_carries_position_and_orientation() {
        let map = ViewState2D {
            longitude: 190.0,
            latitude: 95.0,
            zoom: 2.0,
            pitch: 15.0,
            bearing: 45.0,
        };
        let globe = globe_view_for_map(&map);

        assert_close(globe.longitude, -170.0, 1e-9);
        assert_close(globe.latitude, 90.0, 1e-9);
        assert!(globe.height > 0.0);
        assert_eq!(globe.heading, Some(45.0));
        assert_eq!(globe.pitch, Some(15.0));
    }

    #[test]
    fn round_trip_preserves_zoom_within_clamp_range() {
        // Zooms whose camera distance stays inside the clamp range; past
        // roughly 3 the globe camera bottoms out at the minimum distance.
        for zoom in [0.05, 0.5, 1.0, 2.5] {
            let map = ViewState2D {
                zoom,
                ..ViewState2D::default()
            };
            let back = map_view_for_globe(&globe_view_for_map(&map));
            assert_close(back.zoom, zoom, 1e-9);
        }
    }

    #[test]
    fn absent_orientation_reads_as_north_up() {
        let globe = ViewState3D {
            latitude: 10.0,
            longitude: 20.0,
            height: 1_000_000.0,
            heading: None,
            pitch: None,
        };
        let map = map_view_for_globe(&globe);
        assert_eq!(map.bearing, 0.0);
        assert_eq!(map.pitch, 0.0);
        assert_close(map.longitude, 20.0, 1e-9);
        assert_close(map.latitude, 10.0, 1e-9);
    }
}
