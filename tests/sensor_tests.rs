use rod_anchor::core::Handle;
use rod_anchor::error::PhysicsError;
use rod_anchor::sensors::{AnchorSensorInfo, RigidBodySensorInfo, Senseable, SensorInfo};
use rod_anchor::{BodyHandle, DataManager, PhysicsWorld, RigidBody, RodModel, RodNodeIndex, RodSegmentIndex, Vector3};
use approx::assert_relative_eq;

const DT: f32 = 0.01;

/// One body anchored to one rod, grouped the way a model would expose itself
fn model_world() -> (PhysicsWorld, Senseable) {
    let mut world = PhysicsWorld::new();
    let body = world.add_body(RigidBody::new_dynamic(1.0, Vector3::new(0.0, 0.0, 1.0)));
    let rod = world.add_rod(
        RodModel::new_straight(Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 2.0), 2, 2.0).unwrap(),
    );
    let anchor = world
        .bind_anchor(body, rod, RodNodeIndex(0), RodSegmentIndex(0), Vector3::new(0.0, 0.0, 1.0))
        .unwrap();

    let group = Senseable::Group {
        name: "tensegrity".to_string(),
        members: vec![
            Senseable::Body(body),
            Senseable::Group {
                name: "joints".to_string(),
                members: vec![Senseable::Anchor(anchor)],
            },
        ],
    };

    (world, group)
}

fn manager_for(group: Senseable) -> DataManager {
    let mut manager = DataManager::new();
    manager.add_senseable(group);
    manager.add_sensor_info(Box::new(RigidBodySensorInfo));
    manager.add_sensor_info(Box::new(AnchorSensorInfo));
    manager
}

#[test]
fn test_descendants_are_depth_first() {
    let (_, group) = model_world();
    let descendants = group.descendants();

    assert_eq!(descendants.len(), 3);
    assert!(matches!(descendants[0], Senseable::Body(_)));
    assert!(matches!(descendants[1], Senseable::Group { .. }));
    assert!(matches!(descendants[2], Senseable::Anchor(_)));

    assert!(Senseable::Body(BodyHandle::from_raw(1)).descendants().is_empty());
}

#[test]
fn test_setup_creates_sensors_for_descendants() {
    let (_, group) = model_world();
    let mut manager = manager_for(group);

    assert_eq!(manager.sensor_count(), 0);
    manager.setup().unwrap();
    assert_eq!(manager.sensor_count(), 2);

    assert_eq!(
        manager.heading(),
        vec![
            "time", "body1.X", "body1.Y", "body1.Z", "body1.VX", "body1.VY", "body1.VZ",
            "anchor1.X", "anchor1.Y", "anchor1.Z",
        ]
    );
}

#[test]
fn test_step_records_rows() {
    let (mut world, group) = model_world();
    let mut manager = manager_for(group);
    manager.setup().unwrap();

    manager.step(DT, &world).unwrap();
    world.step(DT).unwrap();
    manager.step(DT, &world).unwrap();

    let samples = manager.samples();
    assert_eq!(samples.len(), 2);
    assert_relative_eq!(samples[0].time, DT);
    assert_relative_eq!(samples[1].time, 2.0 * DT);

    // Row width matches the heading minus the time column
    assert_eq!(samples[0].values.len(), manager.heading().len() - 1);
    assert_eq!(samples[0].values, vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_step_rejects_non_positive_dt() {
    let (world, group) = model_world();
    let mut manager = manager_for(group);
    manager.setup().unwrap();

    assert!(matches!(manager.step(0.0, &world), Err(PhysicsError::InvalidParameter(_))));
    assert!(matches!(manager.step(-1.0, &world), Err(PhysicsError::InvalidParameter(_))));
    assert!(manager.samples().is_empty());
}

#[test]
fn test_step_fails_for_removed_body() {
    let (mut world, group) = model_world();
    let body = match &group {
        Senseable::Group { members, .. } => match members[0] {
            Senseable::Body(body) => body,
            _ => unreachable!(),
        },
        _ => unreachable!(),
    };
    let mut manager = manager_for(group);
    manager.setup().unwrap();

    world.remove_body(body).unwrap();
    assert!(matches!(manager.step(DT, &world), Err(PhysicsError::ResourceNotFound(_))));
}

#[test]
fn test_teardown_keeps_registrations() {
    let (world, group) = model_world();
    let mut manager = manager_for(group);
    manager.setup().unwrap();
    manager.step(DT, &world).unwrap();

    manager.teardown();
    assert_eq!(manager.sensor_count(), 0);
    assert_eq!(manager.senseable_count(), 1);
    assert_eq!(manager.sensor_info_count(), 2);

    // A reset starts a fresh recording
    manager.setup().unwrap();
    assert_eq!(manager.sensor_count(), 2);
    assert!(manager.samples().is_empty());
}

#[test]
fn test_repeated_setup_replaces_sensors() {
    let (_, group) = model_world();
    let mut manager = manager_for(group);

    manager.setup().unwrap();
    manager.setup().unwrap();
    assert_eq!(manager.sensor_count(), 2);
}

#[test]
fn test_sensor_info_rejects_foreign_senseables() {
    let info = AnchorSensorInfo;
    let body = Senseable::Body(BodyHandle::from_raw(1));

    assert!(!info.is_this_my_senseable(&body));
    assert!(matches!(info.create_sensor(&body), Err(PhysicsError::InvalidParameter(_))));
}

#[test]
fn test_display_reports_counts() {
    let (_, group) = model_world();
    let mut manager = manager_for(group);
    assert_eq!(
        manager.to_string(),
        "DataManager with 0 sensors, 2 sensor infos, and 1 senseables"
    );

    manager.setup().unwrap();
    assert_eq!(
        format!("{}", manager),
        "DataManager with 2 sensors, 2 sensor infos, and 1 senseables"
    );
}
