//! Triangle meshes loaded from STL files.

use crate::geometry::Point3;

/// A triangle with vertices in file order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle([Point3; 3]);

impl Triangle {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self([a, b, c])
    }

    pub fn vertices(&self) -> &[Point3; 3] {
        &self.0
    }

    /// Mean of the three vertices.
    pub fn centroid(&self) -> Point3 {
        let [a, b, c] = self.0;
        a.add_point(b).add_point(c).scale(1.0 / 3.0)
    }

    /// Copy of the triangle with every Z coordinate negated.
    pub fn flip_z(&self) -> Self {
        let [a, b, c] = self.0;
        Self([a.with_z(-a.z()), b.with_z(-b.z()), c.with_z(-c.z())])
    }
}

/// An unindexed triangle soup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterates over every vertex of every triangle.
    pub fn vertices(&self) -> impl Iterator<Item = Point3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices().iter().copied())
    }
}
