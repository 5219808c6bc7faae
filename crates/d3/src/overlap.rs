//! Pairwise overlap detection between two overlap structures.
//!
//! Triangle pairs are tested with the separating axis theorem. The axis set
//! covers both face normals, the nine edge-edge cross products, and the
//! in-plane edge normals of each triangle; the last group decides coplanar
//! pairs, where the edge-edge cross products degenerate.

use crate::bvh::{BvhNode, BvhTree, Triangle};
use nalgebra::Vector3;

/// Axes shorter than this are treated as degenerate and skipped.
const AXIS_EPS: f64 = 1e-12;

/// Tests whether any triangle of `a` intersects any triangle of `b` in
/// world space. Symmetric in its arguments. Empty trees overlap nothing.
pub fn overlaps(a: &BvhTree, b: &BvhTree) -> bool {
    match (&a.root, &b.root) {
        (Some(root_a), Some(root_b)) => nodes_overlap(a, root_a, b, root_b),
        _ => false,
    }
}

/// Simultaneous descent of both trees, pruned by AABB intersection.
fn nodes_overlap(tree_a: &BvhTree, node_a: &BvhNode, tree_b: &BvhTree, node_b: &BvhNode) -> bool {
    if !node_a.aabb().intersects(node_b.aabb()) {
        return false;
    }

    match (node_a, node_b) {
        (BvhNode::Leaf { triangles: la, .. }, BvhNode::Leaf { triangles: lb, .. }) => {
            for &i in la {
                let tri_a = &tree_a.triangles[i];
                for &j in lb {
                    let tri_b = &tree_b.triangles[j];
                    if tri_a.aabb.intersects(&tri_b.aabb) && tri_tri_overlap(tri_a, tri_b) {
                        return true;
                    }
                }
            }
            false
        }
        (BvhNode::Internal { left, right, .. }, _) => {
            nodes_overlap(tree_a, left, tree_b, node_b)
                || nodes_overlap(tree_a, right, tree_b, node_b)
        }
        (BvhNode::Leaf { .. }, BvhNode::Internal { left, right, .. }) => {
            nodes_overlap(tree_a, node_a, tree_b, left)
                || nodes_overlap(tree_a, node_a, tree_b, right)
        }
    }
}

/// Separating-axis intersection test for a pair of triangles.
///
/// Exactly-touching pairs fall inside the numeric tolerance and may
/// classify either way.
pub fn tri_tri_overlap(a: &Triangle, b: &Triangle) -> bool {
    let pa = [a.a.coords, a.b.coords, a.c.coords];
    let pb = [b.a.coords, b.b.coords, b.c.coords];

    let edges_a = [pa[1] - pa[0], pa[2] - pa[1], pa[0] - pa[2]];
    let edges_b = [pb[1] - pb[0], pb[2] - pb[1], pb[0] - pb[2]];

    let normal_a = edges_a[0].cross(&edges_a[1]);
    let normal_b = edges_b[0].cross(&edges_b[1]);

    if separated(&pa, &pb, &normal_a) || separated(&pa, &pb, &normal_b) {
        return false;
    }

    for ea in &edges_a {
        for eb in &edges_b {
            if separated(&pa, &pb, &ea.cross(eb)) {
                return false;
            }
        }
    }

    // In-plane edge normals, needed when the triangles are coplanar.
    for ea in &edges_a {
        if separated(&pa, &pb, &normal_a.cross(ea)) {
            return false;
        }
    }
    for eb in &edges_b {
        if separated(&pa, &pb, &normal_b.cross(eb)) {
            return false;
        }
    }

    true
}

/// Returns true if `axis` separates the projections of the two vertex sets.
/// Degenerate axes carry no information and never separate.
fn separated(pa: &[Vector3<f64>; 3], pb: &[Vector3<f64>; 3], axis: &Vector3<f64>) -> bool {
    if axis.norm_squared() < AXIS_EPS {
        return false;
    }

    let (min_a, max_a) = project(pa, axis);
    let (min_b, max_b) = project(pb, axis);
    max_a < min_b || max_b < min_a
}

fn project(points: &[Vector3<f64>; 3], axis: &Vector3<f64>) -> (f64, f64) {
    let d0 = points[0].dot(axis);
    let d1 = points[1].dot(axis);
    let d2 = points[2].dot(axis);
    (d0.min(d1).min(d2), d0.max(d1).max(d2))
}
