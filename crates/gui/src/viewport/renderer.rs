//! Scene painting with egui's painter
//!
//! Solids are drawn as flat, depth-sorted triangles with their outline edges
//! on top; no lighting is applied.

use egui::{Color32, Pos2, Rect, Stroke, Ui};
use glam::Vec3;
use shared::SolidStyle;

use super::camera::ArcBallCamera;
use crate::editor::Editor;
use crate::geometry::SolidGeometry;
use crate::scene::PrimitiveShape;
use crate::state::settings::ColorSettings;

/// Paint every scene primitive plus the polygon being drawn
pub fn paint_viewport(ui: &Ui, rect: Rect, camera: &ArcBallCamera, editor: &Editor) {
    let painter = ui.painter_at(rect);
    let colors = &editor.settings().colors;

    let bg = colors.background;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    let mut solids = Vec::new();
    let mut lines = Vec::new();
    let mut markers = Vec::new();
    for (_, primitive) in editor.scene().iter() {
        match &primitive.shape {
            PrimitiveShape::Ground {
                width,
                depth,
                subdivisions,
            } => draw_ground(&painter, rect, camera, *width, *depth, *subdivisions, colors),
            PrimitiveShape::Solid {
                geometry,
                position,
                style,
            } => solids.push((geometry, *position, *style)),
            PrimitiveShape::LineLoop { points } => lines.push(points),
            PrimitiveShape::Marker { position, radius } => markers.push((*position, *radius)),
        }
    }

    draw_solids(&painter, rect, camera, &solids);

    let line_stroke = Stroke::new(2.0, rgb(colors.line));
    for points in lines {
        draw_polyline(&painter, rect, camera, points, line_stroke);
    }

    // Preview of the polygon being drawn, or of one left open
    let buffer = match editor.mode().draw_buffer() {
        [] => editor.draft(),
        buffer => buffer,
    };
    let preview = Stroke::new(1.0, rgb(colors.line).gamma_multiply(0.5));
    draw_polyline(&painter, rect, camera, buffer, preview);

    let marker_color = rgb(colors.marker);
    for (position, radius) in markers {
        if let Some(center) = camera.project(position, rect) {
            let screen_radius = camera
                .project(position + Vec3::X * radius, rect)
                .map_or(3.0, |edge| edge.distance(center))
                .max(3.0);
            painter.circle_filled(center, screen_radius, marker_color);
        }
    }
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

fn unit_rgb(c: [f32; 3]) -> Color32 {
    Color32::from_rgb(
        (c[0] * 255.0) as u8,
        (c[1] * 255.0) as u8,
        (c[2] * 255.0) as u8,
    )
}

fn draw_ground(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    width: f32,
    depth: f32,
    subdivisions: u32,
    colors: &ColorSettings,
) {
    let stroke = Stroke::new(0.5, rgb(colors.ground));
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let steps = subdivisions.max(1);

    for i in 0..=steps {
        let f = i as f32 / steps as f32;
        let x = -hw + f * width;
        let z = -hd + f * depth;
        draw_line_3d(painter, rect, camera, Vec3::new(x, 0.0, -hd), Vec3::new(x, 0.0, hd), stroke);
        draw_line_3d(painter, rect, camera, Vec3::new(-hw, 0.0, z), Vec3::new(hw, 0.0, z), stroke);
    }
}

/// Painter's algorithm over the triangles of all solids
fn draw_solids(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    solids: &[(&SolidGeometry, Vec3, SolidStyle)],
) {
    let mut triangles: Vec<(f32, [Pos2; 3], Color32)> = Vec::new();
    for (geometry, position, style) in solids {
        let fill = unit_rgb(style.current_fill());
        for t in 0..geometry.mesh.triangle_count() {
            let world = geometry.mesh.triangle(t).map(|p| p + *position);
            let projected = [
                camera.project(world[0], rect),
                camera.project(world[1], rect),
                camera.project(world[2], rect),
            ];
            if let [Some(a), Some(b), Some(c)] = projected {
                let centroid = (world[0] + world[1] + world[2]) / 3.0;
                triangles.push((camera.depth_of(centroid), [a, b, c], fill));
            }
        }
    }
    // Farthest first
    triangles.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut mesh = egui::Mesh::default();
    for (_, corners, color) in &triangles {
        let base = mesh.vertices.len() as u32;
        for corner in corners {
            mesh.colored_vertex(*corner, *color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));

    for (geometry, position, style) in solids {
        let [r, g, b, a] = style.edge_color.map(|c| (c * 255.0) as u8);
        let stroke = Stroke::new(style.edge_width, Color32::from_rgba_unmultiplied(r, g, b, a));
        for [start, end] in &geometry.edges {
            draw_line_3d(painter, rect, camera, *start + *position, *end + *position, stroke);
        }
    }
}

fn draw_line_3d(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera, a: Vec3, b: Vec3, stroke: Stroke) {
    if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
        painter.line_segment([pa, pb], stroke);
    }
}

fn draw_polyline(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera, points: &[Vec3], stroke: Stroke) {
    for pair in points.windows(2) {
        draw_line_3d(painter, rect, camera, pair[0], pair[1], stroke);
    }
}
