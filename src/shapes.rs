//! Builders for the standard scene shapes.
//!
//! Every builder returns a [`Mesh`] in model space with counter-clockwise
//! (outward-facing) windings and outward vertex normals, so the renderer's
//! backface test keeps the sides that face the camera.

use std::collections::HashMap;
use std::f32::consts::PI;

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::mesh::{Mesh, VertexId};

/// A 2x2x2 box centred at the origin with one normal per side.
pub fn cube(color: Color) -> Mesh {
    const CORNERS: [Vec3; 8] = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
    ];

    // Two triangles per side, paired with the side normal below
    const TRIANGLES: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [2, 3, 4],
        [2, 4, 5],
        [1, 2, 5],
        [1, 5, 6],
        [0, 7, 4],
        [0, 4, 3],
        [5, 4, 7],
        [5, 7, 6],
        [0, 6, 7],
        [0, 1, 6],
    ];

    const NORMALS: [Vec3; 6] = [
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, -1.0, 0.0),
    ];

    let mut mesh = Mesh::new(color);
    for (i, tri) in TRIANGLES.iter().enumerate() {
        mesh.add_flat_triangle(tri.map(|c| CORNERS[c]), NORMALS[i / 2]);
    }
    mesh
}

/// A 2x2 quad on the XZ plane facing `+Y`.
pub fn floor(color: Color) -> Mesh {
    let mut mesh = Mesh::new(color);
    let ids = [
        Vec3::new(-1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(-1.0, 0.0, -1.0),
    ]
    .map(|p| mesh.add_vertex(p, Vec3::UP));

    mesh.add_face([ids[0], ids[1], ids[3]]);
    mesh.add_face([ids[3], ids[1], ids[2]]);
    mesh
}

/// A closed cylinder along the Z axis, centred at the origin.
///
/// Faces of the `+Z` cap are marked `change_color`, which lets scripting
/// light it up like a flashlight lens.
pub fn cylinder(segments: u32, length: f32, radius: f32, color: Color) -> Mesh {
    let mut mesh = Mesh::new(color);
    let segments = segments.max(3);
    let step = 2.0 * PI / segments as f32;
    let back = -length / 2.0;
    let front = length / 2.0;

    for i in 0..segments {
        let a0 = step * i as f32 - PI;
        let a1 = step * (i + 1) as f32 - PI;
        let (x0, y0) = (radius * a0.sin(), radius * a0.cos());
        let (x1, y1) = (radius * a1.sin(), radius * a1.cos());
        let n0 = Vec3::new(x0, y0, 0.0).normalize();
        let n1 = Vec3::new(x1, y1, 0.0).normalize();

        mesh.add_flat_triangle(
            [
                Vec3::new(0.0, 0.0, front),
                Vec3::new(x1, y1, front),
                Vec3::new(x0, y0, front),
            ],
            Vec3::BACK,
        )
        .change_color = true;

        mesh.add_flat_triangle(
            [
                Vec3::new(0.0, 0.0, back),
                Vec3::new(x0, y0, back),
                Vec3::new(x1, y1, back),
            ],
            Vec3::new(0.0, 0.0, -1.0),
        );

        let back0 = mesh.add_vertex(Vec3::new(x0, y0, back), n0);
        let back1 = mesh.add_vertex(Vec3::new(x1, y1, back), n1);
        let front0 = mesh.add_vertex(Vec3::new(x0, y0, front), n0);
        let front1 = mesh.add_vertex(Vec3::new(x1, y1, front), n1);
        mesh.add_face([back0, front0, back1]);
        mesh.add_face([back1, front0, front1]);
    }
    mesh
}

/// A unit icosphere refined `subdivisions` times.
///
/// Vertices are shared between adjacent faces; each normal equals its
/// position on the unit sphere.
pub fn icosphere(subdivisions: u32, color: Color) -> Mesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut points: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let mut midpoint = |a: u32, b: u32, points: &mut Vec<Vec3>| -> u32 {
        let key = (a.min(b), a.max(b));
        *midpoints.entry(key).or_insert_with(|| {
            let mid = ((points[a as usize] + points[b as usize]) / 2.0).normalize();
            points.push(mid);
            (points.len() - 1) as u32
        })
    };

    for _ in 0..subdivisions {
        let mut refined = Vec::with_capacity(faces.len() * 4);
        for [v1, v2, v3] in faces {
            let a = midpoint(v1, v2, &mut points);
            let b = midpoint(v2, v3, &mut points);
            let c = midpoint(v3, v1, &mut points);
            refined.push([v1, a, c]);
            refined.push([v2, b, a]);
            refined.push([v3, c, b]);
            refined.push([a, b, c]);
        }
        faces = refined;
    }

    let mut mesh = Mesh::new(color);
    let ids: Vec<VertexId> = points.iter().map(|&p| mesh.add_vertex(p, p)).collect();
    for [a, b, c] in faces {
        mesh.add_face([ids[a as usize], ids[b as usize], ids[c as usize]]);
    }
    mesh
}
