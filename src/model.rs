use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;
use nalgebra as na;
use na::{vector, Vector3};
use obj::{load_obj, Obj, TexturedVertex};

use crate::error::Result;
use crate::scene::mesh::Vertex;

/// Geometry read from a Wavefront obj file, converted to the left-handed convention.
pub struct Model {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Model {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Model> {
        let model = Model::from_reader(BufReader::new(File::open(path.as_ref())?))?;
        info!(
            "Loaded {}: {} vertices, {} indices",
            path.as_ref().display(),
            model.vertices.len(),
            model.indices.len()
        );
        return Ok(model);
    }

    /// Parses obj data with positions, uvs and normals.
    /// Z is negated, v is flipped and the winding is reversed to go from the right-handed
    /// obj convention to a left-handed one. Tangents are generated from the uv layout.
    pub fn from_reader<R: BufRead>(input: R) -> Result<Model> {
        let obj: Obj<TexturedVertex, u32> = load_obj(input)?;

        let mut vertices: Vec<Vertex> = obj
            .vertices
            .iter()
            .map(|v| Vertex {
                position: vector![v.position[0], v.position[1], -v.position[2]],
                uv: vector![v.texture[0], 1.0 - v.texture[1]],
                normal: vector![v.normal[0], v.normal[1], -v.normal[2]],
                tangent: Vector3::zeros(),
            })
            .collect();

        let mut indices = obj.indices;
        for triangle in indices.chunks_exact_mut(3) {
            triangle.swap(1, 2);
        }

        generate_tangents(&mut vertices, &indices);

        return Ok(Model { vertices, indices });
    }
}

/// Accumulates per-triangle tangents from uv derivatives, then orthogonalizes each one
/// against its vertex normal.
pub fn generate_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::<f32>::zeros(); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let duv0 = v1.uv - v0.uv;
        let duv1 = v2.uv - v0.uv;

        let determinant = duv0.x * duv1.y - duv1.x * duv0.y;
        if determinant.abs() <= f32::EPSILON {
            continue;
        }
        let tangent = (edge0 * duv1.y - edge1 * duv0.y) / determinant;

        for i in [i0, i1, i2] {
            accumulated[i] += tangent;
        }
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let orthogonal = tangent - n * n.dot(&tangent);
        vertex.tangent = match orthogonal.try_normalize(f32::EPSILON) {
            Some(t) => t,
            None => any_perpendicular(n),
        };
    }
}

/// Fallback tangent for vertices whose uvs give no usable direction.
fn any_perpendicular(normal: Vector3<f32>) -> Vector3<f32> {
    let axis = match normal.x.abs() < 0.9 {
        true => Vector3::x(),
        false => Vector3::y(),
    };
    let perpendicular = axis - normal * normal.dot(&axis);
    return perpendicular.try_normalize(f32::EPSILON).unwrap_or(axis);
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

    #[test]
    fn loads_and_converts_handedness() {
        let model = Model::from_reader(QUAD.as_bytes()).unwrap();
        assert_eq!(model.vertices.len(), 4);
        assert_eq!(model.indices.len(), 6);

        // Winding reversed within each triangle.
        assert_eq!(model.indices[0], 0);
        let first = &model.vertices[model.indices[1] as usize];
        assert_eq!(first.position, vector![1.0, 1.0, 0.0]);

        for vertex in &model.vertices {
            assert_eq!(vertex.normal, vector![0.0, 0.0, -1.0]);
        }
        let origin = model.vertices.iter().find(|v| v.position == Vector3::zeros()).unwrap();
        assert_eq!(origin.uv, vector![0.0, 1.0]);
    }

    #[test]
    fn tangents_follow_u_and_are_orthonormal() {
        let model = Model::from_reader(QUAD.as_bytes()).unwrap();
        for vertex in &model.vertices {
            assert!((vertex.tangent - vector![1.0, 0.0, 0.0]).norm() < 1e-5, "{:?}", vertex.tangent);
            assert!(vertex.tangent.dot(&vertex.normal).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_uvs_still_get_a_tangent() {
        let mut vertices = vec![
            Vertex {
                position: vector![0.0, 0.0, 0.0],
                uv: vector![0.0, 0.0],
                normal: vector![0.0, 1.0, 0.0],
                tangent: Vector3::zeros(),
            };
            3
        ];
        vertices[1].position = vector![1.0, 0.0, 0.0];
        vertices[2].position = vector![0.0, 0.0, 1.0];
        generate_tangents(&mut vertices, &[0, 1, 2]);
        for vertex in &vertices {
            assert!((vertex.tangent.norm() - 1.0).abs() < 1e-5);
            assert!(vertex.tangent.dot(&vertex.normal).abs() < 1e-5);
        }
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(Model::from_reader("v 1.0 abc 0.0\n".as_bytes()).is_err());
    }
}
