//! Integration tests for the 3D scatter engine.

use mesh_scatter_core::solver::{Config, PlacementSink, Solver};
use mesh_scatter_core::{Error, Placement};
use mesh_scatter_d3::{BvhTree, MeshGeometry, PlacementBounds, Scatterer};
use nalgebra::Point3;
use std::sync::{Arc, Mutex};

fn unit_cube(id: &str) -> MeshGeometry {
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
    MeshGeometry::new(id, vertices, faces)
}

/// Rebuilds the overlap structures from the returned poses and asserts the
/// pairwise non-overlap invariant.
fn assert_non_overlapping(geometry: &MeshGeometry, placements: &[Placement<f64>]) {
    let trees: Vec<BvhTree> = placements
        .iter()
        .map(|p| BvhTree::build(&geometry.posed(&p.pose)))
        .collect();

    for i in 0..trees.len() {
        for j in (i + 1)..trees.len() {
            assert!(
                !trees[i].overlaps(&trees[j]),
                "instances {} and {} overlap",
                i,
                j
            );
        }
    }
}

#[test]
fn scenario_single_copy_places_trivially() {
    // The first candidate is always accepted: the placement set is empty.
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(2.0, 2.0, 0.0, 2.0);
    let scatterer = Scatterer::new(Config::new().with_seed(11));

    let result = scatterer.place_all(&cube, 1, &bounds).unwrap();
    assert_eq!(result.placed_count(), 1);
    assert_eq!(result.abandoned_count(), 0);
    assert_eq!(result.attempts, 1);
    assert!(bounds.contains(result.placements[0].location()));
}

#[test]
fn scenario_cramped_bounds_abandon_second_copy() {
    // Bounds far smaller than the mesh: any two placements must overlap, so
    // the second copy exhausts its budget and is abandoned.
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(0.1, 0.1, 0.0, 0.1);
    let scatterer = Scatterer::new(Config::new().with_max_trials(5).with_seed(3));

    let result = scatterer.place_all(&cube, 2, &bounds).unwrap();
    assert_eq!(result.placed_count(), 1);
    assert_eq!(result.abandoned, vec![1]);
    // 1 accepted sample plus 5 exhausted trials.
    assert_eq!(result.attempts, 6);
}

#[test]
fn scenario_roomy_bounds_place_many() {
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(30.0, 30.0, 0.0, 30.0);
    let scatterer = Scatterer::new(Config::new().with_max_trials(10).with_seed(7));

    let result = scatterer.place_all(&cube, 20, &bounds).unwrap();

    // Cardinality and retry bounds hold whatever the final count.
    assert!(result.placed_count() <= 20);
    assert!(result.attempts <= 20 * 10);
    // With bounds this roomy, a large majority places.
    assert!(result.placed_count() >= 15, "placed {}", result.placed_count());

    assert_non_overlapping(&cube, &result.placements);
}

#[test]
fn scenario_inverted_z_bounds_fail_up_front() {
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(5.0, 5.0, 10.0, 2.0);
    let scatterer = Scatterer::default_config();

    let result = scatterer.place_all(&cube, 2, &bounds);
    match result {
        Err(Error::InvalidBounds(_)) => {}
        other => panic!("expected InvalidBounds, got {:?}", other),
    }
}

#[test]
fn determinism_same_seed_same_placements() {
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(8.0, 8.0, 0.0, 8.0);

    let a = Scatterer::new(Config::new().with_seed(1234))
        .place_all(&cube, 10, &bounds)
        .unwrap();
    let b = Scatterer::new(Config::new().with_seed(1234))
        .place_all(&cube, 10, &bounds)
        .unwrap();

    assert_eq!(a.placed_count(), b.placed_count());
    assert_eq!(a.abandoned, b.abandoned);
    assert_eq!(a.attempts, b.attempts);
    for (pa, pb) in a.placements.iter().zip(&b.placements) {
        assert_eq!(pa.pose.location, pb.pose.location);
        assert_eq!(pa.pose.rotation, pb.pose.rotation);
    }
}

#[test]
fn placements_respect_location_bounds() {
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(4.0, 3.0, 1.0, 6.0);
    let scatterer = Scatterer::new(Config::new().with_seed(21));

    let result = scatterer.place_all(&cube, 8, &bounds).unwrap();
    for placement in &result.placements {
        assert!(bounds.contains(placement.location()));
    }
}

#[test]
fn rotation_disabled_yields_identity_rotations() {
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(10.0, 10.0, 0.0, 10.0);
    let scatterer = Scatterer::new(Config::new().with_seed(2).with_rotation(false));

    let result = scatterer.place_all(&cube, 5, &bounds).unwrap();
    assert!(result.is_successful());
    for placement in &result.placements {
        assert_eq!(placement.rotation().norm(), 0.0);
    }
}

#[derive(Default)]
struct RecordingSink {
    placed: Vec<String>,
    abandoned: Vec<usize>,
}

impl PlacementSink<f64> for RecordingSink {
    fn on_placed(&mut self, placement: &Placement<f64>) {
        self.placed
            .push(format!("{}:{}", placement.geometry_id, placement.instance));
    }

    fn on_abandoned(&mut self, instance: usize) {
        self.abandoned.push(instance);
    }
}

#[test]
fn sink_sees_each_outcome_once() {
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(0.1, 0.1, 0.0, 0.1);
    let scatterer = Scatterer::new(Config::new().with_max_trials(5).with_seed(3));

    let geometries = vec![cube.with_quantity(2)];
    let mut sink = RecordingSink::default();
    let result = scatterer
        .solve_with_sink(&geometries, &bounds, &mut sink)
        .unwrap();

    assert_eq!(sink.placed, vec!["cube:0".to_string()]);
    assert_eq!(sink.abandoned, vec![1]);
    assert_eq!(result.placed_count(), 1);
}

#[test]
fn progress_callback_reports_each_instance() {
    let cube = unit_cube("cube");
    let bounds = PlacementBounds::new(10.0, 10.0, 0.0, 10.0);
    let scatterer = Scatterer::new(Config::new().with_seed(8));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let geometries = vec![cube.with_quantity(4)];

    let result = scatterer
        .solve_with_progress(
            &geometries,
            &bounds,
            Box::new(move |info| sink.lock().unwrap().push(info)),
        )
        .unwrap();

    let seen = seen.lock().unwrap();
    // One report per instance plus the final finished report.
    assert_eq!(seen.len(), 5);
    assert!(seen[..4].iter().all(|info| info.running));
    assert!(!seen[4].running);
    assert_eq!(seen[4].placed, result.placed_count());
}

#[test]
fn mixed_geometries_share_one_placement_set() {
    // Two different descriptors scatter into the same set; the invariant
    // holds across descriptors, not just within one.
    let bounds = PlacementBounds::new(15.0, 15.0, 0.0, 15.0);
    let geometries = vec![
        unit_cube("a").with_quantity(4),
        unit_cube("b").with_quantity(4),
    ];
    let scatterer = Scatterer::new(Config::new().with_seed(17));

    let result = scatterer.solve(&geometries, &bounds).unwrap();

    let cube = unit_cube("any");
    assert_non_overlapping(&cube, &result.placements);
}
