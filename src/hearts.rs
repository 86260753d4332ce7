//! Hearts: flat heart-shaped meshes scattered around the origin.
//!
//! Hearts have no physics. They sit where they were placed until the reveal
//! tween lifts and fades them.

use crate::config::HeartsConfig;
use crate::group::Group;
use crate::palette;
use crate::spawn::Spawner;
use crate::tween::Tweenable;
use glam::{Vec2, Vec3};

/// Control points of the heart outline: a start point followed by six cubic
/// Bezier segments `(control 1, control 2, end)`. The last segment ends on
/// the start point.
const HEART_START: Vec2 = Vec2::new(0.25, 0.25);
const HEART_CURVES: [[Vec2; 3]; 6] = [
    [Vec2::new(0.25, 0.25), Vec2::new(0.2, 0.0), Vec2::new(0.0, 0.0)],
    [Vec2::new(-0.3, 0.0), Vec2::new(-0.3, 0.35), Vec2::new(-0.3, 0.35)],
    [Vec2::new(-0.3, 0.55), Vec2::new(-0.1, 0.77), Vec2::new(0.25, 0.95)],
    [Vec2::new(0.6, 0.77), Vec2::new(0.8, 0.55), Vec2::new(0.8, 0.35)],
    [Vec2::new(0.8, 0.35), Vec2::new(0.8, 0.0), Vec2::new(0.5, 0.0)],
    [Vec2::new(0.35, 0.0), Vec2::new(0.25, 0.25), Vec2::new(0.25, 0.25)],
];

/// One heart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heart {
    pub position: Vec3,
    /// Uniform scale applied to [`HeartShape`].
    pub scale: f32,
    /// Linear RGB.
    pub color: Vec3,
    pub opacity: f32,
}

impl Tweenable for Heart {
    fn lift(&mut self, dy: f32) {
        self.position.y += dy;
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }
}

/// Triangulated heart outline in the XY plane, shared by every heart.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartShape {
    outline: Vec<Vec2>,
    triangles: Vec<[u32; 3]>,
}

impl HeartShape {
    /// Sample the outline with `segments` points per curve and triangulate it.
    ///
    /// The outline is flipped so the point faces down and centred on its
    /// bounding box, so a heart's position is its visual centre.
    pub fn new(segments: usize) -> Self {
        let raw = sample_outline(segments.max(1));

        let (min, max) = raw.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        let centre = (min + max) * 0.5;
        let outline: Vec<Vec2> = raw
            .iter()
            .map(|&p| Vec2::new(p.x - centre.x, centre.y - p.y))
            .collect();

        let triangles = triangulate(&outline);
        Self { outline, triangles }
    }

    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    /// Counter-clockwise index triples into [`outline`](Self::outline).
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Outline points lifted into 3D at `z = 0`.
    pub fn vertices(&self) -> Vec<[f32; 3]> {
        self.outline.iter().map(|p| [p.x, p.y, 0.0]).collect()
    }

    /// Flattened triangle indices.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Outline points without the closing duplicate of the start point.
fn sample_outline(segments: usize) -> Vec<Vec2> {
    let mut points = vec![HEART_START];
    let mut from = HEART_START;
    for [c1, c2, to] in HEART_CURVES {
        for k in 1..=segments {
            let t = k as f32 / segments as f32;
            points.push(cubic(from, c1, c2, to, t));
        }
        from = to;
    }
    points.pop();
    points
}

/// Twice the signed area; positive for counter-clockwise polygons.
fn signed_area2(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum()
}

/// Area of a simple polygon.
pub fn polygon_area(points: &[Vec2]) -> f32 {
    signed_area2(points).abs() * 0.5
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns `points.len() - 2` counter-clockwise triangles regardless of the
/// input winding. If no proper ear can be found (degenerate or collinear
/// runs) the current vertex is clipped anyway so the loop always terminates.
pub fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..points.len()).collect();
    if signed_area2(points) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(points.len() - 2);
    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n)
            .find(|&i| {
                let (ia, ib, ic) = (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
                let (a, b, c) = (points[ia], points[ib], points[ic]);
                if (b - a).perp_dot(c - b) <= f32::EPSILON {
                    return false;
                }
                remaining
                    .iter()
                    .filter(|&&j| j != ia && j != ib && j != ic)
                    .all(|&j| !point_in_triangle(points[j], a, b, c))
            })
            .unwrap_or(0);

        let (ia, ib, ic) = (
            remaining[(ear + n - 1) % n],
            remaining[ear],
            remaining[(ear + 1) % n],
        );
        triangles.push([ia as u32, ib as u32, ic as u32]);
        remaining.remove(ear);
    }
    triangles.push([
        remaining[0] as u32,
        remaining[1] as u32,
        remaining[2] as u32,
    ]);

    triangles
}

/// The heart group and the mesh every member shares.
#[derive(Debug, Clone)]
pub struct HeartCluster {
    group: Group<Heart>,
    shape: HeartShape,
}

impl HeartCluster {
    /// Scatter `config.count` hidden hearts inside the spread band.
    pub fn new(config: &HeartsConfig, spawner: &mut Spawner) -> Self {
        let group = Group::from_fn(config.count, |_| {
            let color = spawner
                .pick(&config.palette)
                .copied()
                .map(palette::hex_to_linear)
                .unwrap_or(Vec3::ONE);
            Heart {
                position: spawner.point_in_band(&config.spread),
                scale: config.scale,
                color,
                opacity: 1.0,
            }
        });

        Self {
            group,
            shape: HeartShape::new(config.curve_segments),
        }
    }

    pub fn group(&self) -> &Group<Heart> {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut Group<Heart> {
        &mut self.group
    }

    pub fn shape(&self) -> &HeartShape {
        &self.shape
    }
}
