//! Data model shared by the footprint editor: structured primitive tags,
//! polygons, extruded solids and vertex markers.

mod shapes;

pub use shapes::{planar_delta, ExtrudedSolid, Polygon, SolidStyle, VertexMarker};

use serde::{Deserialize, Serialize};

/// Index of a polygon in the shape store. Stable for the whole session.
pub type ShapeIndex = usize;

/// Address of one vertex marker: (shape index, vertex index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerKey {
    pub shape: ShapeIndex,
    pub vertex: usize,
}

impl MarkerKey {
    pub fn new(shape: ShapeIndex, vertex: usize) -> Self {
        Self { shape, vertex }
    }
}

/// Identity carried alongside every scene primitive.
///
/// Picking reports the tag of whatever was hit, so callers never have to
/// recover indices from display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveTag {
    /// The ground plane everything is drawn on
    Ground,
    /// Vertex marker of a polygon (or of the polygon being drawn)
    Marker { shape: ShapeIndex, vertex: usize },
    /// Closed line loop outlining a polygon
    Line { shape: ShapeIndex },
    /// Prism extruded from a polygon
    Solid { shape: ShapeIndex },
}

impl PrimitiveTag {
    pub fn marker(key: MarkerKey) -> Self {
        Self::Marker {
            shape: key.shape,
            vertex: key.vertex,
        }
    }

    /// Owning shape, if the primitive belongs to one
    pub fn shape(&self) -> Option<ShapeIndex> {
        match *self {
            Self::Ground => None,
            Self::Marker { shape, .. } | Self::Line { shape } | Self::Solid { shape } => Some(shape),
        }
    }

    pub fn marker_key(&self) -> Option<MarkerKey> {
        match *self {
            Self::Marker { shape, vertex } => Some(MarkerKey { shape, vertex }),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker { .. })
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Solid { .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Marker { .. } => "marker",
            Self::Line { .. } => "line",
            Self::Solid { .. } => "solid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_shape() {
        assert_eq!(PrimitiveTag::Ground.shape(), None);
        assert_eq!(PrimitiveTag::Line { shape: 2 }.shape(), Some(2));
        assert_eq!(PrimitiveTag::Solid { shape: 1 }.shape(), Some(1));
        assert_eq!(PrimitiveTag::Marker { shape: 3, vertex: 0 }.shape(), Some(3));
    }

    #[test]
    fn test_marker_key_only_for_markers() {
        let tag = PrimitiveTag::marker(MarkerKey::new(4, 2));
        assert_eq!(tag.marker_key(), Some(MarkerKey::new(4, 2)));
        assert!(tag.is_marker());
        assert_eq!(PrimitiveTag::Solid { shape: 4 }.marker_key(), None);
    }

    #[test]
    fn test_tag_serde_shape() {
        let json = serde_json::to_string(&PrimitiveTag::Marker { shape: 1, vertex: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"marker","shape":1,"vertex":2}"#);

        let tag: PrimitiveTag = serde_json::from_str(r#"{"kind": "solid", "shape": 0}"#).unwrap();
        assert_eq!(tag, PrimitiveTag::Solid { shape: 0 });
    }

    #[test]
    fn test_tags_order_by_kind_then_index() {
        let mut tags = vec![
            PrimitiveTag::Solid { shape: 0 },
            PrimitiveTag::Marker { shape: 1, vertex: 0 },
            PrimitiveTag::Ground,
            PrimitiveTag::Marker { shape: 0, vertex: 1 },
        ];
        tags.sort();
        assert_eq!(tags[0], PrimitiveTag::Ground);
        assert_eq!(tags[1], PrimitiveTag::Marker { shape: 0, vertex: 1 });
        assert_eq!(tags[3], PrimitiveTag::Solid { shape: 0 });
    }
}
