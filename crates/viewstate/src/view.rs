use serde::{Deserialize, Serialize};

/// Camera height of the default whole-globe view (meters above the surface).
pub const DEFAULT_VIEW_HEIGHT_M: f64 = 10_000_000.0;

/// Camera parameters for the flat map projection.
///
/// The store applies no range validation; zoom/pitch/bearing limits belong to
/// the consuming renderer. Unknown and missing fields in persisted payloads
/// decode as defaults rather than erroring.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState2D {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for ViewState2D {
    fn default() -> Self {
        // Whole-world view centered on the prime meridian.
        Self {
            longitude: 0.0,
            latitude: 0.0,
            zoom: 1.0,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}

/// Globe camera position; `height` is meters above the reference surface.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState3D {
    pub latitude: f64,
    pub longitude: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl Default for ViewState3D {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            height: DEFAULT_VIEW_HEIGHT_M,
            heading: None,
            pitch: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_VIEW_HEIGHT_M, ViewState2D, ViewState3D};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_the_whole_world_view() {
        let v2 = ViewState2D::default();
        assert_eq!(v2.longitude, 0.0);
        assert_eq!(v2.latitude, 0.0);
        assert_eq!(v2.zoom, 1.0);
        assert_eq!(v2.pitch, 0.0);
        assert_eq!(v2.bearing, 0.0);

        let v3 = ViewState3D::default();
        assert_eq!(v3.latitude, 0.0);
        assert_eq!(v3.longitude, 0.0);
        assert_eq!(v3.height, DEFAULT_VIEW_HEIGHT_M);
        assert_eq!(v3.heading, None);
        assert_eq!(v3.pitch, None);
    }

    #[test]
    fn missing_fields_decode_as_defaults() {
        let v2: ViewState2D = serde_json::from_str(r#"{"longitude": 12.5}"#).unwrap();
        assert_eq!(v2.longitude, 12.5);
        assert_eq!(v2.zoom, 1.0);

        let v3: ViewState3D = serde_json::from_str(r#"{"height": 500.0}"#).unwrap();
        assert_eq!(v3.height, 500.0);
        assert_eq!(v3.latitude, 0.0);
        assert_eq!(v3.heading, None);
    }

    #[test]
    fn absent_orientation_is_not_serialized() {
        let json = serde_json::to_string(&ViewState3D::default()).unwrap();
        assert!(!json.contains("heading"));
        assert!(!json.contains("pitch"));

        let oriented = ViewState3D {
            heading: Some(90.0),
            ..ViewState3D::default()
        };
        let json = serde_json::to_string(&oriented).unwrap();
        assert!(json.contains("\"heading\":90.0"));
    }
}
