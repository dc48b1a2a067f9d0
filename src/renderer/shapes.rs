//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::Rect;

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t) = (rect.pos.x, rect.pos.y);
    let (r, b) = (rect.right(), rect.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Rectangle outline `thickness` pixels wide, drawn inside `rect`
pub fn rect_outline(rect: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(rect.size.x / 2.0).min(rect.size.y / 2.0);
    let inner_h = rect.size.y - 2.0 * t;
    let sides = [
        Rect::new(rect.pos.x, rect.pos.y, rect.size.x, t),
        Rect::new(rect.pos.x, rect.bottom() - t, rect.size.x, t),
        Rect::new(rect.pos.x, rect.pos.y + t, t, inner_h),
        Rect::new(rect.right() - t, rect.pos.y + t, t, inner_h),
    ];
    sides.iter().flat_map(|side| self::rect(side, color)).collect()
}

/// Filled ellipse arc from `theta_start` to `theta_end` (radians, y down)
pub fn ellipse_sector(
    center: Vec2,
    radii: Vec2,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = theta_end - theta_start;
    let point = |theta: f32| center + Vec2::new(radii.x * theta.cos(), radii.y * theta.sin());

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let p1 = point(theta_start + span * i as f32 / segments as f32);
        let p2 = point(theta_start + span * (i + 1) as f32 / segments as f32);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse_sector(center, Vec2::splat(radius), 0.0, 2.0 * PI, color, segments)
}

/// Flying saucer filling `bounds`: dome on top, colored saucer below, cockpit
pub fn saucer(bounds: &Rect, hull: [f32; 4], dome: [f32; 4], cockpit: [f32; 4]) -> Vec<Vertex> {
    let c = bounds.center();
    let (w, h) = (bounds.size.x, bounds.size.y);

    let mut vertices = ellipse_sector(
        c - Vec2::new(0.0, 2.0),
        Vec2::new(w / 2.0, h / 3.0),
        PI,
        2.0 * PI,
        dome,
        12,
    );
    vertices.extend(ellipse_sector(
        c + Vec2::new(0.0, 1.0),
        Vec2::new(w / 1.5, h / 4.0),
        0.0,
        PI,
        hull,
        12,
    ));
    vertices.extend(ellipse_sector(
        c - Vec2::new(0.0, 2.0),
        Vec2::new(w / 4.0, h / 6.0),
        0.0,
        2.0 * PI,
        cockpit,
        10,
    ));
    vertices
}
