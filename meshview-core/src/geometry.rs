/// Mesh buffer and bounding-box primitives
use nalgebra::{Point3, Vector3};

use crate::error::{MeshViewError, Result};

/// A triangle resolved to its three corner positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unnormalized face normal, `(v1 - v0) x (v2 - v0)`
    pub fn cross(&self) -> Vector3<f64> {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Unit face normal, or zero for a degenerate triangle
    pub fn normal(&self) -> Vector3<f64> {
        self.cross().try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros)
    }

    pub fn area(&self) -> f64 {
        0.5 * self.cross().norm()
    }

    /// Volume of the tetrahedron spanned by the triangle and the origin,
    /// positive when the triangle faces away from the origin.
    pub fn signed_volume(&self) -> f64 {
        let [v0, v1, v2] = self.vertices;
        v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// A zero-size box at the origin, reported for empty meshes
    pub fn empty() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }

    /// Component-wise min/max over a set of points. `None` when empty.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut bbox = Self::new(first, first);
        for p in points {
            bbox.min = bbox.min.inf(p);
            bbox.max = bbox.max.sup(p);
        }
        Some(bbox)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest of the three axis sizes
    pub fn max_dimension(&self) -> f64 {
        self.size().max()
    }
}

/// Normalized vertex/index representation of a triangle mesh.
///
/// When `indices` is `None`, consecutive runs of three vertices form a
/// triangle. The `name` only labels the mesh in error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    pub name: String,
    pub vertices: Vec<Point3<f64>>,
    pub indices: Option<Vec<u32>>,
}

impl MeshBuffer {
    /// Unindexed mesh (triangle soup)
    pub fn new(name: impl Into<String>, vertices: Vec<Point3<f64>>) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices: None,
        }
    }

    pub fn indexed(name: impl Into<String>, vertices: Vec<Point3<f64>>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices: Some(indices),
        }
    }

    /// Build from a flat `[x0, y0, z0, x1, ...]` coordinate array
    pub fn from_flat(
        name: impl Into<String>,
        coords: &[f64],
        indices: Option<Vec<u32>>,
    ) -> Result<Self> {
        let name = name.into();
        if coords.len() % 3 != 0 {
            return Err(MeshViewError::FlatBufferLength {
                mesh: name,
                len: coords.len(),
            });
        }
        let vertices = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            name,
            vertices,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of triangles without validating the buffers. Use
    /// [`MeshBuffer::validate`] when a remainder must be rejected.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Check the triangulation invariants and return the triangle count.
    ///
    /// Rejects a buffer length that is not a multiple of 3 and any index that
    /// does not reference an existing vertex.
    pub fn validate(&self) -> Result<usize> {
        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(MeshViewError::IndexCountNotTriangular {
                        mesh: self.name.clone(),
                        count: indices.len(),
                    });
                }
                let vertex_count = self.vertices.len();
                if let Some(pos) = indices.iter().position(|&i| i as usize >= vertex_count) {
                    return Err(MeshViewError::IndexOutOfRange {
                        mesh: self.name.clone(),
                        triangle: pos / 3,
                        index: indices[pos],
                        vertex_count,
                    });
                }
                Ok(indices.len() / 3)
            }
            None => {
                if self.vertices.len() % 3 != 0 {
                    return Err(MeshViewError::VertexCountNotTriangular {
                        mesh: self.name.clone(),
                        count: self.vertices.len(),
                    });
                }
                Ok(self.vertices.len() / 3)
            }
        }
    }

    /// Iterate over triangles after validating the buffers
    pub fn triangles(&self) -> Result<Triangles<'_>> {
        let count = self.validate()?;
        Ok(Triangles {
            mesh: self,
            next: 0,
            count,
        })
    }

    /// Copy of this mesh with every vertex moved by `offset`
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            name: self.name.clone(),
            vertices: self.vertices.iter().map(|v| v + offset).collect(),
            indices: self.indices.clone(),
        }
    }

    /// Create an indexed cube centered at the origin, wound outward
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        let indices = vec![
            4, 5, 6, 4, 6, 7, // front
            0, 2, 1, 0, 3, 2, // back
            3, 7, 6, 3, 6, 2, // top
            0, 1, 5, 0, 5, 4, // bottom
            1, 2, 6, 1, 6, 5, // right
            0, 4, 7, 0, 7, 3, // left
        ];
        Self::indexed("cube", vertices, indices)
    }
}

/// Iterator over the triangles of a validated [`MeshBuffer`]
pub struct Triangles<'a> {
    mesh: &'a MeshBuffer,
    next: usize,
    count: usize,
}

impl Iterator for Triangles<'_> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        if self.next >= self.count {
            return None;
        }
        let base = self.next * 3;
        self.next += 1;

        let vertices = &self.mesh.vertices;
        let tri = match &self.mesh.indices {
            Some(indices) => Triangle::new(
                vertices[indices[base] as usize],
                vertices[indices[base + 1] as usize],
                vertices[indices[base + 2] as usize],
            ),
            None => Triangle::new(vertices[base], vertices[base + 1], vertices[base + 2]),
        };
        Some(tri)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Triangles<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = MeshBuffer::cube(1.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.validate().unwrap(), 12);
        assert_eq!(cube.triangles().unwrap().len(), 12);
    }

    #[test]
    fn test_cube_faces_point_outward() {
        let cube = MeshBuffer::cube(2.0);
        for tri in cube.triangles().unwrap() {
            let centroid = (tri.vertices[0].coords + tri.vertices[1].coords + tri.vertices[2].coords) / 3.0;
            assert!(tri.normal().dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_unindexed_triangles_use_consecutive_vertices() {
        let mesh = MeshBuffer::new(
            "soup",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(0.0, 1.0, 1.0),
            ],
        );
        let tris: Vec<_> = mesh.triangles().unwrap().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1].vertices[0], Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rejects_partial_triangles() {
        let mesh = MeshBuffer::new("partial", vec![Point3::origin(); 4]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshViewError::VertexCountNotTriangular { count: 4, .. })
        ));

        let mesh = MeshBuffer::indexed("partial", vec![Point3::origin(); 3], vec![0, 1, 2, 0]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshViewError::IndexCountNotTriangular { count: 4, .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let mesh = MeshBuffer::indexed("bad", vec![Point3::origin(); 3], vec![0, 1, 2, 2, 1, 3]);
        match mesh.triangles() {
            Err(MeshViewError::IndexOutOfRange {
                mesh,
                triangle,
                index,
                vertex_count,
            }) => {
                assert_eq!(mesh, "bad");
                assert_eq!(triangle, 1);
                assert_eq!(index, 3);
                assert_eq!(vertex_count, 3);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_from_flat() {
        let mesh = MeshBuffer::from_flat("flat", &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0], None).unwrap();
        assert_eq!(mesh.vertices[1], Point3::new(1.0, 2.0, 3.0));

        let err = MeshBuffer::from_flat("flat", &[0.0, 1.0], None).unwrap_err();
        assert!(err.is_malformed_mesh());
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::from_points(&[
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-1.0, 4.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, Point3::new(1.0, 4.0, 3.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 1.0, 1.5));
        assert!((bbox.max_dimension() - 6.0).abs() < 1e-12);
        assert!(BoundingBox::from_points(&Vec::<Point3<f64>>::new()).is_none());
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(tri.area(), 0.0);
        assert_eq!(tri.signed_volume(), 0.0);
        assert_eq!(tri.normal(), Vector3::zeros());
    }
}
