use rod_anchor::error::PhysicsError;
use rod_anchor::math::{Quaternion, Rotation};
use rod_anchor::rod::{RodOrientationElement, RodPositionElement};
use rod_anchor::{PhysicsWorld, RigidBody, RodModel, RodNodeIndex, RodSegmentIndex, Vector3};
use approx::{assert_abs_diff_eq, assert_relative_eq};

#[test]
fn test_straight_rod_layout() {
    let rod = RodModel::new_straight(Vector3::zero(), Vector3::new(4.0, 0.0, 0.0), 5, 10.0).unwrap();

    assert_eq!(rod.node_count(), 5);
    assert_eq!(rod.segment_count(), 4);
    assert_relative_eq!(rod.total_mass(), 10.0);

    for (index, node) in rod.nodes() {
        assert_abs_diff_eq!(node.position, Vector3::new(index.0 as f32, 0.0, 0.0), epsilon = 1e-6);
        assert_eq!(node.predicted_position, node.position);
        assert_eq!(node.velocity, Vector3::zero());
        assert_relative_eq!(node.mass, 2.0);
        assert!(!node.is_anchor());
    }

    // Segments carry the rod direction on their local z axis
    let segment = rod.segment(RodSegmentIndex(3)).unwrap();
    assert_abs_diff_eq!(
        segment.orientation.rotate_vector(Vector3::unit_z()),
        Vector3::unit_x(),
        epsilon = 1e-5
    );
}

#[test]
fn test_straight_rod_pointing_down() {
    let rod = RodModel::new_straight(Vector3::zero(), Vector3::new(0.0, 0.0, -2.0), 3, 1.5).unwrap();
    let segment = rod.segment(RodSegmentIndex(0)).unwrap();

    assert_abs_diff_eq!(
        segment.orientation.rotate_vector(Vector3::unit_z()),
        -Vector3::unit_z(),
        epsilon = 1e-5
    );
}

#[test]
fn test_rod_validation() {
    let too_short = RodModel::new_straight(Vector3::zero(), Vector3::unit_x(), 1, 1.0);
    assert!(matches!(too_short, Err(PhysicsError::InvalidParameter(_))));

    let massless = RodModel::new_straight(Vector3::zero(), Vector3::unit_x(), 3, 0.0);
    assert!(matches!(massless, Err(PhysicsError::InvalidParameter(_))));

    let nodes = vec![
        RodPositionElement::new(Vector3::zero(), 1.0),
        RodPositionElement::new(Vector3::unit_x(), 1.0),
    ];
    let wrong_segments = RodModel::from_elements(nodes.clone(), vec![]);
    assert!(matches!(wrong_segments, Err(PhysicsError::InvalidParameter(_))));

    let mut bad_mass = nodes.clone();
    bad_mass[1].mass = -1.0;
    let bad_mass = RodModel::from_elements(bad_mass, vec![RodOrientationElement::default()]);
    assert!(matches!(bad_mass, Err(PhysicsError::InvalidParameter(_))));

    let ok = RodModel::from_elements(nodes, vec![RodOrientationElement::new(Quaternion::identity())]);
    assert!(ok.is_ok());
}

#[test]
fn test_out_of_range_lookups() {
    let mut rod = RodModel::new_straight(Vector3::zero(), Vector3::unit_x(), 2, 1.0).unwrap();

    assert!(matches!(rod.node(RodNodeIndex(2)), Err(PhysicsError::ResourceNotFound(_))));
    assert!(matches!(rod.node_mut(RodNodeIndex(7)), Err(PhysicsError::ResourceNotFound(_))));
    assert!(matches!(rod.segment(RodSegmentIndex(1)), Err(PhysicsError::ResourceNotFound(_))));
    assert!(matches!(rod.segment_mut(RodSegmentIndex(1)), Err(PhysicsError::ResourceNotFound(_))));
}

#[test]
fn test_force_accumulation() {
    let mut rod = RodModel::new_straight(Vector3::zero(), Vector3::unit_x(), 2, 1.0).unwrap();

    {
        let node = rod.node_mut(RodNodeIndex(1)).unwrap();
        node.apply_force(Vector3::new(1.0, 0.0, 0.0));
        node.apply_force(Vector3::new(0.0, 2.0, 0.0));
    }
    rod.segment_mut(RodSegmentIndex(0)).unwrap().torque = Vector3::unit_z();

    assert_eq!(rod.node(RodNodeIndex(1)).unwrap().force(), Vector3::new(1.0, 2.0, 0.0));

    rod.clear_forces();
    assert!(rod.nodes().all(|(_, node)| node.force() == Vector3::zero()));
    assert_eq!(rod.segment(RodSegmentIndex(0)).unwrap().torque, Vector3::zero());
}

#[test]
fn test_free_and_anchored_nodes() {
    let mut world = PhysicsWorld::new();
    let body = world.add_body(RigidBody::new_dynamic(1.0, Vector3::zero()));
    let rod = world.add_rod(RodModel::new_straight(Vector3::zero(), Vector3::unit_x(), 4, 4.0).unwrap());

    world.bind_anchor(body, rod, RodNodeIndex(0), RodSegmentIndex(0), Vector3::zero()).unwrap();
    world.bind_anchor(body, rod, RodNodeIndex(3), RodSegmentIndex(2), Vector3::unit_x()).unwrap();

    let model = world.get_rod(rod).unwrap();
    let free: Vec<usize> = model.free_nodes().map(|(i, _)| i.0).collect();
    let anchored: Vec<usize> = model.anchored_nodes().map(|(i, _)| i.0).collect();

    assert_eq!(free, vec![1, 2]);
    assert_eq!(anchored, vec![0, 3]);
}
