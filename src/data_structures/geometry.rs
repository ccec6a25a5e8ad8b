//! CPU-side generation of the basic shape meshes.
//!
//! All meshes are unit sized and meant to be scaled by the object transform:
//!
//! - plane: 2 x 2 in the XZ plane, facing +Y
//! - box: -0.5..0.5 on every axis
//! - cylinder and cone: radius 1, base at y = 0, top at y = 1
//! - sphere: radius 1 around the origin
//! - torus: ring radius 1 in the XY plane, tube radius = thickness
//! - prism: triangular cross-section in XY, extruded -0.5..0.5 along Z
//!
//! Texture coordinates follow the GL convention of v = 0 at the bottom of the
//! image, matching the flip applied when images are decoded.

use std::{f32::consts::PI, ops::Range};

use crate::data_structures::{
    shape::{BoxSide, MeshLoad, MeshPart, Shape},
    vertex::ModelVertex,
};

const ROUND_SEGMENTS: u32 = 36;
const SPHERE_LATITUDES: u32 = 18;
const TORUS_RING_SEGMENTS: u32 = 48;
const TORUS_TUBE_SEGMENTS: u32 = 24;

/// Vertices and indices of one mesh, with the index range of each named part.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    parts: Vec<(MeshPart, Range<u32>)>,
}

impl Geometry {
    pub fn generate(mesh: MeshLoad) -> Self {
        match mesh {
            MeshLoad::Plane => plane(),
            MeshLoad::Box => cube(),
            MeshLoad::Cylinder => cylinder(ROUND_SEGMENTS),
            MeshLoad::Cone => cone(ROUND_SEGMENTS),
            MeshLoad::Sphere => sphere(ROUND_SEGMENTS, SPHERE_LATITUDES),
            MeshLoad::Torus { thickness } => torus(thickness, TORUS_RING_SEGMENTS, TORUS_TUBE_SEGMENTS),
            MeshLoad::Prism => prism(),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Index range of `part`; [`MeshPart::Whole`] is always available.
    pub fn range(&self, part: MeshPart) -> Option<Range<u32>> {
        if part == MeshPart::Whole {
            return Some(0..self.index_count());
        }
        self.parts
            .iter()
            .find(|(candidate, _)| *candidate == part)
            .map(|(_, range)| range.clone())
    }

    /// Index ranges to draw for `shape`, skipping parts this mesh doesn't have.
    pub fn ranges(&self, shape: &Shape) -> Vec<Range<u32>> {
        shape
            .parts()
            .into_iter()
            .filter_map(|part| self.range(part))
            .collect()
    }

    fn vertex(&mut self, position: [f32; 3], tex_coords: [f32; 2], normal: [f32; 3]) -> u32 {
        self.vertices.push(ModelVertex::new(position, tex_coords, normal));
        self.vertices.len() as u32 - 1
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Flat quad from four corners given counter-clockwise around `normal`.
    fn quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let first = self.vertex(corners[0], uvs[0], normal);
        for (corner, uv) in corners.iter().zip(uvs).skip(1) {
            self.vertex(*corner, uv, normal);
        }
        self.triangle(first, first + 1, first + 2);
        self.triangle(first + 2, first + 3, first);
    }

    /// Records everything indexed since `start` as `part`.
    fn mark(&mut self, part: MeshPart, start: u32) {
        let end = self.index_count();
        self.parts.push((part, start..end));
    }
}

fn plane() -> Geometry {
    let mut geometry = Geometry::default();
    geometry.quad(
        [[-1.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 0.0, -1.0], [-1.0, 0.0, -1.0]],
        [0.0, 1.0, 0.0],
    );
    geometry
}

fn cube() -> Geometry {
    let mut geometry = Geometry::default();
    let faces = [
        (
            BoxSide::Front,
            [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
            [0.0, 0.0, 1.0],
        ),
        (
            BoxSide::Back,
            [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
            [0.0, 0.0, -1.0],
        ),
        (
            BoxSide::Left,
            [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
            [-1.0, 0.0, 0.0],
        ),
        (
            BoxSide::Right,
            [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
            [1.0, 0.0, 0.0],
        ),
        (
            BoxSide::Top,
            [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
            [0.0, 1.0, 0.0],
        ),
        (
            BoxSide::Bottom,
            [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
            [0.0, -1.0, 0.0],
        ),
    ];
    for (side, corners, normal) in faces {
        let start = geometry.index_count();
        geometry.quad(corners, normal);
        geometry.mark(MeshPart::Face(side), start);
    }
    geometry
}

/// Triangle fan closing a circle of radius 1 at height `y`.
fn cap(geometry: &mut Geometry, y: f32, facing_up: bool, segments: u32) {
    let normal = if facing_up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = geometry.vertex([0.0, y, 0.0], [0.5, 0.5], normal);
    let first = center + 1;
    for i in 0..=segments {
        let angle = 2.0 * PI * i as f32 / segments as f32;
        let (sin, cos) = angle.sin_cos();
        geometry.vertex([cos, y, sin], [0.5 + 0.5 * cos, 0.5 + 0.5 * sin], normal);
    }
    for i in 0..segments {
        if facing_up {
            geometry.triangle(center, first + i + 1, first + i);
        } else {
            geometry.triangle(center, first + i, first + i + 1);
        }
    }
}

fn cylinder(segments: u32) -> Geometry {
    let mut geometry = Geometry::default();

    let start = geometry.index_count();
    cap(&mut geometry, 1.0, true, segments);
    geometry.mark(MeshPart::Top, start);

    let start = geometry.index_count();
    cap(&mut geometry, 0.0, false, segments);
    geometry.mark(MeshPart::Bottom, start);

    let start = geometry.index_count();
    let first = geometry.vertices.len() as u32;
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (2.0 * PI * u).sin_cos();
        geometry.vertex([cos, 0.0, sin], [u, 0.0], [cos, 0.0, sin]);
        geometry.vertex([cos, 1.0, sin], [u, 1.0], [cos, 0.0, sin]);
    }
    for i in 0..segments {
        let bottom = first + 2 * i;
        let top = bottom + 1;
        geometry.triangle(bottom, top, bottom + 2);
        geometry.triangle(bottom + 2, top, top + 2);
    }
    geometry.mark(MeshPart::Sides, start);

    geometry
}

fn cone(segments: u32) -> Geometry {
    let mut geometry = Geometry::default();

    let start = geometry.index_count();
    cap(&mut geometry, 0.0, false, segments);
    geometry.mark(MeshPart::Bottom, start);

    // Slant normal of a cone with equal radius and height.
    let slant = |angle: f32| {
        let (sin, cos) = angle.sin_cos();
        let scale = std::f32::consts::FRAC_1_SQRT_2;
        [cos * scale, scale, sin * scale]
    };
    let start = geometry.index_count();
    for i in 0..segments {
        let u0 = i as f32 / segments as f32;
        let u1 = (i + 1) as f32 / segments as f32;
        let (a0, a1) = (2.0 * PI * u0, 2.0 * PI * u1);
        let base0 = geometry.vertex([a0.cos(), 0.0, a0.sin()], [u0, 0.0], slant(a0));
        let base1 = geometry.vertex([a1.cos(), 0.0, a1.sin()], [u1, 0.0], slant(a1));
        let apex = geometry.vertex([0.0, 1.0, 0.0], [(u0 + u1) * 0.5, 1.0], slant((a0 + a1) * 0.5));
        geometry.triangle(base0, apex, base1);
    }
    geometry.mark(MeshPart::Sides, start);

    geometry
}

/// UV sphere built from the north pole down, so the first half of the
/// latitude rows is the upper hemisphere.
fn sphere(longitude_segments: u32, latitude_segments: u32) -> Geometry {
    let mut geometry = Geometry::default();
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2) & !1;

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let point = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            let uv = [long as f32 / long_segs as f32, 1.0 - lat as f32 / lat_segs as f32];
            geometry.vertex(point, uv, point);
        }
    }

    for lat in 0..lat_segs {
        if lat == lat_segs / 2 {
            geometry.mark(MeshPart::UpperHalf, 0);
        }
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;
            geometry.triangle(first, first + 1, second);
            geometry.triangle(second, first + 1, second + 1);
        }
    }
    geometry
}

/// Torus in the XY plane; the first half of the rings covers `y >= 0`.
fn torus(thickness: f32, ring_segments: u32, tube_segments: u32) -> Geometry {
    let mut geometry = Geometry::default();
    let ring_segs = ring_segments.max(4) & !1;
    let tube_segs = tube_segments.max(3);
    let tube_radius = thickness.abs();

    for ring in 0..=ring_segs {
        let u = ring as f32 / ring_segs as f32;
        let (sin_u, cos_u) = (2.0 * PI * u).sin_cos();
        for tube in 0..=tube_segs {
            let v = tube as f32 / tube_segs as f32;
            let (sin_v, cos_v) = (2.0 * PI * v).sin_cos();
            let distance = 1.0 + tube_radius * cos_v;
            geometry.vertex(
                [distance * cos_u, distance * sin_u, tube_radius * sin_v],
                [u, v],
                [cos_v * cos_u, cos_v * sin_u, sin_v],
            );
        }
    }

    for ring in 0..ring_segs {
        if ring == ring_segs / 2 {
            geometry.mark(MeshPart::UpperHalf, 0);
        }
        for tube in 0..tube_segs {
            let a = ring * (tube_segs + 1) + tube;
            let b = a + tube_segs + 1;
            geometry.triangle(a, b, a + 1);
            geometry.triangle(b, b + 1, a + 1);
        }
    }
    geometry
}

fn prism() -> Geometry {
    let mut geometry = Geometry::default();
    let outline = [[-0.5, -0.5], [0.5, -0.5], [0.0, 0.5]];

    let front = [0.0, 0.0, 1.0];
    let a = geometry.vertex([outline[0][0], outline[0][1], 0.5], [0.0, 0.0], front);
    let b = geometry.vertex([outline[1][0], outline[1][1], 0.5], [1.0, 0.0], front);
    let c = geometry.vertex([outline[2][0], outline[2][1], 0.5], [0.5, 1.0], front);
    geometry.triangle(a, b, c);

    let back = [0.0, 0.0, -1.0];
    let a = geometry.vertex([outline[0][0], outline[0][1], -0.5], [1.0, 0.0], back);
    let b = geometry.vertex([outline[1][0], outline[1][1], -0.5], [0.0, 0.0], back);
    let c = geometry.vertex([outline[2][0], outline[2][1], -0.5], [0.5, 1.0], back);
    geometry.triangle(a, c, b);

    for edge in 0..outline.len() {
        let [sx, sy] = outline[edge];
        let [ex, ey] = outline[(edge + 1) % outline.len()];
        let (dx, dy) = (ex - sx, ey - sy);
        let length = (dx * dx + dy * dy).sqrt();
        let normal = [dy / length, -dx / length, 0.0];
        geometry.quad(
            [[sx, sy, 0.5], [sx, sy, -0.5], [ex, ey, -0.5], [ex, ey, 0.5]],
            normal,
        );
    }
    geometry
}
