//! Bounding volume hierarchy over a posed mesh.
//!
//! The tree is built from raw vertex/face data alone and serves a single
//! query: does any triangle of one tree intersect any triangle of another.
//! No scene state is involved in either building or querying.

use crate::geometry::PosedMesh;
use nalgebra::Point3;

/// Triangles per leaf before a node stops splitting.
const LEAF_SIZE: usize = 4;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates an empty (inverted) AABB.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Expands the AABB to include a point.
    pub fn expand_point(&mut self, point: &Point3<f64>) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Expands the AABB to include another AABB.
    pub fn expand_aabb(&mut self, other: &Aabb) {
        self.expand_point(&other.min);
        self.expand_point(&other.max);
    }

    /// Returns the center of the AABB.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the longest axis (0 = X, 1 = Y, 2 = Z).
    pub fn longest_axis(&self) -> usize {
        let dx = self.max.x - self.min.x;
        let dy = self.max.y - self.min.y;
        let dz = self.max.z - self.min.z;
        if dx > dy && dx > dz {
            0
        } else if dy > dz {
            1
        } else {
            2
        }
    }

    /// Checks whether two AABBs overlap. Touching boxes count as
    /// overlapping so that pruning stays conservative; the triangle test
    /// makes the final call.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// A world-space triangle with its bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3<f64>,
    /// Second vertex.
    pub b: Point3<f64>,
    /// Third vertex.
    pub c: Point3<f64>,
    /// Bounding box of the three vertices.
    pub aabb: Aabb,
}

impl Triangle {
    /// Creates a triangle from three vertices.
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        let mut aabb = Aabb::empty();
        aabb.expand_point(&a);
        aabb.expand_point(&b);
        aabb.expand_point(&c);
        Self { a, b, c, aabb }
    }
}

/// A node of the hierarchy.
#[derive(Debug)]
pub(crate) enum BvhNode {
    /// Leaf node holding triangle indices.
    Leaf { aabb: Aabb, triangles: Vec<usize> },
    /// Internal node with two children.
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    pub(crate) fn aabb(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { aabb, .. } => aabb,
            BvhNode::Internal { aabb, .. } => aabb,
        }
    }
}

/// The overlap structure for one posed mesh instance.
///
/// Built once per candidate pose and retained for the lifetime of an
/// accepted instance; a pose change requires a rebuild.
#[derive(Debug)]
pub struct BvhTree {
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) root: Option<BvhNode>,
}

impl BvhTree {
    /// Builds the hierarchy from a posed mesh.
    ///
    /// Polygon faces are fan-triangulated: a face of n indices yields n - 2
    /// triangles. An empty mesh yields an empty tree that overlaps nothing.
    pub fn build(posed: &PosedMesh<'_>) -> Self {
        let mut triangles = Vec::with_capacity(posed.triangle_count());
        for face in posed.faces {
            for i in 1..face.len().saturating_sub(1) {
                triangles.push(Triangle::new(
                    posed.vertices[face[0] as usize],
                    posed.vertices[face[i] as usize],
                    posed.vertices[face[i + 1] as usize],
                ));
            }
        }

        if triangles.is_empty() {
            return Self {
                triangles,
                root: None,
            };
        }

        let indices: Vec<usize> = (0..triangles.len()).collect();
        let root = Self::build_node(&triangles, indices);

        Self {
            triangles,
            root: Some(root),
        }
    }

    /// Recursively builds nodes by median split along the longest axis.
    fn build_node(triangles: &[Triangle], indices: Vec<usize>) -> BvhNode {
        let mut aabb = Aabb::empty();
        for &idx in &indices {
            aabb.expand_aabb(&triangles[idx].aabb);
        }

        if indices.len() <= LEAF_SIZE {
            return BvhNode::Leaf {
                aabb,
                triangles: indices,
            };
        }

        let axis = aabb.longest_axis();
        let mut sorted = indices;
        sorted.sort_by(|&a, &b| {
            let ca = triangles[a].aabb.center()[axis];
            let cb = triangles[b].aabb.center()[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = sorted.len() / 2;
        let right_indices = sorted.split_off(mid);
        let left = Self::build_node(triangles, sorted);
        let right = Self::build_node(triangles, right_indices);

        BvhNode::Internal {
            aabb,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Tests whether any triangle of this tree intersects any triangle of
    /// the other. Symmetric.
    pub fn overlaps(&self, other: &BvhTree) -> bool {
        crate::overlap::overlaps(self, other)
    }

    /// Returns the number of triangles in the tree.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the bounds of the whole tree, if non-empty.
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|r| *r.aabb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshGeometry;
    use approx::assert_relative_eq;
    use mesh_scatter_core::pose::Pose;

    fn unit_cube() -> MeshGeometry {
        let vertices = vec![
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(0.5, -0.5, -0.5),
            Point3::new(0.5, 0.5, -0.5),
            Point3::new(-0.5, 0.5, -0.5),
            Point3::new(-0.5, -0.5, 0.5),
            Point3::new(0.5, -0.5, 0.5),
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(-0.5, 0.5, 0.5),
        ];
        let faces = vec![
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        MeshGeometry::new("cube", vertices, faces)
    }

    #[test]
    fn test_aabb_expand_and_center() {
        let mut aabb = Aabb::empty();
        aabb.expand_point(&Point3::new(0.0, 0.0, 0.0));
        aabb.expand_point(&Point3::new(2.0, 4.0, 6.0));

        let center = aabb.center();
        assert_relative_eq!(center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(center.z, 3.0, epsilon = 1e-12);
        assert_eq!(aabb.longest_axis(), 2);
    }

    #[test]
    fn test_aabb_intersects() {
        let mut a = Aabb::empty();
        a.expand_point(&Point3::new(0.0, 0.0, 0.0));
        a.expand_point(&Point3::new(1.0, 1.0, 1.0));

        let mut b = Aabb::empty();
        b.expand_point(&Point3::new(0.5, 0.5, 0.5));
        b.expand_point(&Point3::new(2.0, 2.0, 2.0));

        let mut c = Aabb::empty();
        c.expand_point(&Point3::new(3.0, 3.0, 3.0));
        c.expand_point(&Point3::new(4.0, 4.0, 4.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_build_cube_tree() {
        let cube = unit_cube();
        let posed = cube.posed(&Pose::identity());
        let tree = BvhTree::build(&posed);

        // 6 quads fan into 12 triangles.
        assert_eq!(tree.triangle_count(), 12);

        let bounds = tree.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, -0.5, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.z, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_build_empty_tree() {
        let mesh = MeshGeometry::new("point", vec![Point3::origin()], vec![]);
        let posed = mesh.posed(&Pose::identity());
        let tree = BvhTree::build(&posed);

        assert_eq!(tree.triangle_count(), 0);
        assert!(tree.bounds().is_none());
    }

    #[test]
    fn test_tree_splits_past_leaf_size() {
        // A strip of many triangles must produce internal nodes, not one leaf.
        let n = 64;
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for i in 0..n {
            let x = i as f64;
            let base = vertices.len() as u32;
            vertices.push(Point3::new(x, 0.0, 0.0));
            vertices.push(Point3::new(x + 1.0, 0.0, 0.0));
            vertices.push(Point3::new(x + 0.5, 1.0, 0.0));
            faces.push(vec![base, base + 1, base + 2]);
        }
        let mesh = MeshGeometry::new("strip", vertices, faces);
        let posed = mesh.posed(&Pose::identity());
        let tree = BvhTree::build(&posed);

        assert_eq!(tree.triangle_count(), n);
        assert!(matches!(tree.root, Some(BvhNode::Internal { .. })));
    }
}
