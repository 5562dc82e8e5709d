//! Editor settings

use serde::{Deserialize, Serialize};
use shared::SolidStyle;

/// Ground plane dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSettings {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    /// Wireframe subdivisions per side
    pub subdivisions: u32,
}

impl Default for GroundSettings {
    fn default() -> Self {
        Self {
            width: 2.0,
            depth: 2.0,
            subdivisions: 50,
        }
    }
}

/// Colours used by the viewport (RGB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub background: [u8; 3],
    pub ground: [u8; 3],
    pub marker: [u8; 3],
    pub line: [u8; 3],
    pub solid: [u8; 3],
    /// Fill of a solid while it is being moved
    pub solid_highlight: [u8; 3],
    /// Solid edge outline (RGBA)
    pub edge: [u8; 4],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: [30, 30, 35],
            ground: [90, 90, 100],
            marker: [255, 255, 0],
            line: [0, 255, 0],
            solid: [0, 128, 128],
            solid_highlight: [0, 200, 0],
            edge: [0, 0, 0, 255],
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Fixed height of every extruded solid
    pub extrusion_depth: f32,
    /// Diameter of vertex marker spheres
    pub marker_diameter: f32,
    /// Solid edge outline width in pixels
    pub edge_width: f32,
    /// Length of the downward probe ray used to find markers under a solid
    pub vertex_probe_length: f32,
    pub ground: GroundSettings,
    pub colors: ColorSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            extrusion_depth: 0.3,
            marker_diameter: 0.04,
            edge_width: 1.0,
            vertex_probe_length: 5.0,
            ground: GroundSettings::default(),
            colors: ColorSettings::default(),
        }
    }
}

impl EditorSettings {
    /// Style applied to freshly extruded solids
    pub fn solid_style(&self) -> SolidStyle {
        let c = &self.colors;
        SolidStyle {
            fill: rgb_to_unit(c.solid),
            highlight: rgb_to_unit(c.solid_highlight),
            edge_color: [
                c.edge[0] as f32 / 255.0,
                c.edge[1] as f32 / 255.0,
                c.edge[2] as f32 / 255.0,
                c.edge[3] as f32 / 255.0,
            ],
            edge_width: self.edge_width,
            highlighted: false,
        }
    }

    /// Load settings from the config dir. A missing file is created with
    /// defaults; an unreadable one falls back to defaults.
    pub fn load() -> Self {
        let Some(dirs) = directories::ProjectDirs::from("com", "footprint", "footprint") else {
            return Self::default();
        };
        let config_path = dirs.config_dir().join("settings.json");
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Ignoring malformed {}: {e}", config_path.display());
                    Self::default()
                }
            },
            Err(_) => {
                let settings = Self::default();
                settings.save();
                settings
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "footprint", "footprint") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::warn!("Could not write {}: {e}", config_path.display());
                    }
                }
            }
        }
    }
}

fn rgb_to_unit(c: [u8; 3]) -> [f32; 3] {
    [c[0] as f32 / 255.0, c[1] as f32 / 255.0, c[2] as f32 / 255.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_constants() {
        let s = EditorSettings::default();
        assert_eq!(s.extrusion_depth, 0.3);
        assert_eq!(s.marker_diameter, 0.04);
        assert_eq!(s.ground.width, 2.0);
        assert_eq!(s.ground.subdivisions, 50);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let s: EditorSettings =
            serde_json::from_str(r#"{"extrusion_depth": 0.5, "ground": {"width": 4.0}}"#).unwrap();
        assert_eq!(s.extrusion_depth, 0.5);
        assert_eq!(s.ground.width, 4.0);
        assert_eq!(s.ground.depth, 2.0);
        assert_eq!(s.marker_diameter, 0.04);
        assert_eq!(s.colors, ColorSettings::default());
    }

    #[test]
    fn test_solid_style_from_colors() {
        let mut s = EditorSettings::default();
        s.colors.solid = [255, 0, 51];
        s.edge_width = 2.0;
        let style = s.solid_style();
        assert_eq!(style.fill, [1.0, 0.0, 0.2]);
        assert_eq!(style.edge_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(style.edge_width, 2.0);
        assert!(!style.highlighted);
    }
}
