use nalgebra as na;
use na::{vector, Matrix4, Rotation3, Vector2, Vector3, Vector4};

use super::shader::Material;
use super::util::to_hom_point;
use crate::error::{Error, Result};

/// Model-space vertex as supplied at mesh construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
}

/// Vertex after the transform stage. `position` holds ndc x, y, z and the untouched clip w.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    pub position: Vector4<f32>,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

impl Default for VertexOut {
    fn default() -> Self {
        return Self {
            position: Vector4::zeros(),
            uv: Vector2::zeros(),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            view_direction: Vector3::zeros(),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Index triples for every triangle of an index list with this topology.
    /// Odd strip triangles get their last two indices swapped to keep the winding consistent.
    pub fn triangles(self, indices: &[u32]) -> Vec<[u32; 3]> {
        return match self {
            PrimitiveTopology::TriangleList => indices
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            PrimitiveTopology::TriangleStrip => indices
                .windows(3)
                .enumerate()
                .map(|(i, t)| match i % 2 {
                    0 => [t[0], t[1], t[2]],
                    _ => [t[0], t[2], t[1]],
                })
                .collect(),
        };
    }
}

/// Maps ndc x, y into pixel coordinates with (0, 0) in the top left corner.
pub fn ndc_to_screen(ndc: Vector4<f32>, width: u32, height: u32) -> Vector2<f32> {
    return vector![
        (ndc.x + 1.0) / 2.0 * width as f32,
        (1.0 - ndc.y) / 2.0 * height as f32
    ];
}

/// Mesh with immutable geometry and per-frame scratch arrays, which are rebuilt in full by
/// `transform_vertices` and stay parallel to `vertices`.
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    topology: PrimitiveTopology,
    material: Material,
    translation: Matrix4<f32>,
    rotation: Matrix4<f32>,
    scale: Matrix4<f32>,
    vertices_out: Vec<VertexOut>,
    screen_positions: Vec<Vector2<f32>>,
}

impl Mesh {
    /// Fails if any index points past the end of the vertex array.
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        topology: PrimitiveTopology,
        material: Material,
    ) -> Result<Self> {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(Error::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let vertex_count = vertices.len();
        return Ok(Self {
            vertices,
            indices,
            topology,
            material,
            translation: Matrix4::identity(),
            rotation: Matrix4::identity(),
            scale: Matrix4::identity(),
            vertices_out: vec![VertexOut::default(); vertex_count],
            screen_positions: vec![Vector2::zeros(); vertex_count],
        });
    }

    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.translation = Matrix4::new_translation(&translation);
    }

    /// Euler angles in radians around x, y and z.
    pub fn set_rotation(&mut self, rotation: Vector3<f32>) {
        self.rotation = Rotation3::from_euler_angles(rotation.x, rotation.y, rotation.z).to_homogeneous();
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = Matrix4::new_nonuniform_scaling(&scale);
    }

    /// Adds a rotation around the y axis on top of the current rotation.
    pub fn rotate_y(&mut self, degrees: f32) {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.to_radians());
        self.rotation = self.rotation * rotation.to_homogeneous();
    }

    /// Scale first, then rotation, then translation.
    pub fn world_matrix(&self) -> Matrix4<f32> {
        return self.translation * self.rotation * self.scale;
    }

    /// Vertex transform stage. Fills the transformed vertex and screen position arrays for the
    /// current frame from the world matrix and the camera supplied view/projection.
    pub fn transform_vertices(
        &mut self,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
        camera_position: Vector3<f32>,
        width: u32,
        height: u32,
    ) {
        let world = self.world_matrix();
        let world_view_projection = projection * view * world;

        for (i, vertex) in self.vertices.iter().enumerate() {
            let world_position = (world * to_hom_point(vertex.position)).xyz();
            let clip = world_view_projection * to_hom_point(vertex.position);
            // Perspective divide on x, y, z. w is kept for perspective correct interpolation.
            let position = vector![clip.x / clip.w, clip.y / clip.w, clip.z / clip.w, clip.w];

            self.vertices_out[i] = VertexOut {
                position,
                uv: vertex.uv,
                normal: world.transform_vector(&vertex.normal).normalize(),
                tangent: world.transform_vector(&vertex.tangent).normalize(),
                view_direction: (world_position - camera_position).normalize(),
            };
            self.screen_positions[i] = ndc_to_screen(position, width, height);
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        return &self.vertices;
    }

    pub fn indices(&self) -> &[u32] {
        return &self.indices;
    }

    pub fn topology(&self) -> PrimitiveTopology {
        return self.topology;
    }

    pub fn material(&self) -> &Material {
        return &self.material;
    }

    pub fn vertices_out(&self) -> &[VertexOut] {
        return &self.vertices_out;
    }

    pub fn screen_positions(&self) -> &[Vector2<f32>] {
        return &self.screen_positions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::shader::{Material, TransparentMaterial};
    use crate::texture::Texture;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        return Vertex {
            position: vector![x, y, z],
            uv: vector![0.0, 0.0],
            normal: vector![0.0, 0.0, -1.0],
            tangent: vector![1.0, 0.0, 0.0],
        };
    }

    fn material() -> Material {
        return Material::Transparent(TransparentMaterial {
            diffuse: Texture::solid(vector![1.0, 1.0, 1.0]),
        });
    }

    #[test]
    fn rejects_out_of_range_index() {
        let result = Mesh::new(
            vec![vertex(0.0, 0.0, 0.0); 3],
            vec![0, 1, 3],
            PrimitiveTopology::TriangleList,
            material(),
        );
        match result {
            Err(Error::IndexOutOfRange { index, vertex_count }) => {
                assert_eq!(index, 3);
                assert_eq!(vertex_count, 3);
            }
            _ => panic!("expected IndexOutOfRange"),
        }
    }

    #[test]
    fn list_topology_takes_consecutive_triples() {
        let triangles = PrimitiveTopology::TriangleList.triangles(&[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(triangles, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn strip_topology_alternates_winding() {
        let triangles = PrimitiveTopology::TriangleStrip.triangles(&[0, 1, 2, 3, 4]);
        assert_eq!(triangles, vec![[0, 1, 2], [1, 3, 2], [2, 3, 4]]);
    }

    #[test]
    fn screen_mapping_puts_origin_top_left() {
        let top_left = ndc_to_screen(vector![-1.0, 1.0, 0.5, 1.0], 100, 50);
        let bottom_right = ndc_to_screen(vector![1.0, -1.0, 0.5, 1.0], 100, 50);
        assert_eq!(top_left, vector![0.0, 0.0]);
        assert_eq!(bottom_right, vector![100.0, 50.0]);
    }

    #[test]
    fn identity_transform_keeps_positions() {
        let mut mesh = Mesh::new(
            vec![vertex(0.5, -0.5, 0.25), vertex(0.0, 0.0, 0.0), vertex(1.0, 1.0, 1.0)],
            vec![0, 1, 2],
            PrimitiveTopology::TriangleList,
            material(),
        )
        .unwrap();
        let identity = Matrix4::identity();
        mesh.transform_vertices(&identity, &identity, vector![0.0, 0.0, -1.0], 100, 100);

        let out = mesh.vertices_out()[0];
        assert_eq!(out.position, vector![0.5, -0.5, 0.25, 1.0]);
        assert_eq!(mesh.screen_positions()[0], vector![75.0, 75.0]);
        assert!((out.view_direction - vector![0.5, -0.5, 1.25].normalize()).norm() < 1e-6);
        assert_eq!(mesh.vertices_out().len(), mesh.vertices().len());
    }

    #[test]
    fn perspective_divide_keeps_w() {
        let mut mesh = Mesh::new(
            vec![vertex(2.0, 4.0, 8.0); 3],
            vec![0, 1, 2],
            PrimitiveTopology::TriangleList,
            material(),
        )
        .unwrap();
        // Projection that copies z into w.
        let projection = na::matrix![1.0, 0.0, 0.0, 0.0;
                                     0.0, 1.0, 0.0, 0.0;
                                     0.0, 0.0, 1.0, 0.0;
                                     0.0, 0.0, 1.0, 0.0];
        mesh.transform_vertices(&Matrix4::identity(), &projection, Vector3::zeros(), 10, 10);
        let position = mesh.vertices_out()[0].position;
        assert!((position - vector![0.25, 0.5, 1.0, 8.0]).norm() < 1e-6);
    }

    #[test]
    fn world_matrix_scales_then_rotates_then_translates() {
        let mut mesh = Mesh::new(
            vec![vertex(1.0, 0.0, 0.0); 3],
            vec![0, 1, 2],
            PrimitiveTopology::TriangleList,
            material(),
        )
        .unwrap();
        mesh.set_scale(vector![2.0, 2.0, 2.0]);
        mesh.rotate_y(90.0);
        mesh.set_translation(vector![0.0, 1.0, 0.0]);
        let p = (mesh.world_matrix() * to_hom_point(vector![1.0, 0.0, 0.0])).xyz();
        // (1, 0, 0) -> scaled (2, 0, 0) -> rotated around y (0, 0, -2) -> translated.
        assert!((p - vector![0.0, 1.0, -2.0]).norm() < 1e-5);
    }

    #[test]
    fn normals_ignore_translation() {
        let mut mesh = Mesh::new(
            vec![vertex(0.0, 0.0, 0.0); 3],
            vec![0, 1, 2],
            PrimitiveTopology::TriangleList,
            material(),
        )
        .unwrap();
        mesh.set_translation(vector![5.0, 5.0, 5.0]);
        mesh.set_scale(vector![3.0, 3.0, 3.0]);
        let identity = Matrix4::identity();
        mesh.transform_vertices(&identity, &identity, Vector3::zeros(), 10, 10);
        let out = mesh.vertices_out()[0];
        assert!((out.normal - vector![0.0, 0.0, -1.0]).norm() < 1e-6);
        assert!((out.tangent - vector![1.0, 0.0, 0.0]).norm() < 1e-6);
    }
}
