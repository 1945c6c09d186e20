use camera_lab::camera::{Camera, CameraMode, Movement, Orientation, FOV_MAX, FOV_MIN};
use camera_lab::math::{angle_delta, EulerAngles};
use camera_lab::{CameraError, CameraView};
use glam::{Quat, Vec3};

const LENGTH_TOLERANCE: f32 = 1e-5;
const DOT_TOLERANCE: f32 = 1e-4;

fn euler_camera(yaw: f32, pitch: f32) -> Camera {
    Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, yaw, pitch, CameraMode::Euler).unwrap()
}

fn quaternion_camera(yaw: f32, pitch: f32) -> Camera {
    Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, yaw, pitch, CameraMode::Quaternion).unwrap()
}

fn assert_orthonormal(camera: &Camera) {
    assert!(
        camera.basis().is_orthonormal(LENGTH_TOLERANCE, DOT_TOLERANCE),
        "basis not orthonormal: {:?}",
        camera.basis()
    );
}

fn assert_unit_quaternion(camera: &Camera) {
    let q = camera.quaternion().expect("camera should be in quaternion mode");
    assert!((q.length() - 1.0).abs() < LENGTH_TOLERANCE, "|q| = {}", q.length());
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    a.cross(b).length().atan2(a.dot(b)).to_degrees()
}

#[cfg(test)]
mod mode_switch_tests {
    use super::*;

    #[test]
    fn test_euler_round_trip_recovers_yaw_and_pitch() {
        let mut yaw = -180.0;
        while yaw <= 180.0 {
            for pitch in [-89.0, -60.0, -30.0, -1.0, 0.0, 12.5, 45.0, 75.0, 89.0] {
                let mut camera = euler_camera(0.0, 0.0);
                camera.set_euler_angles(yaw, pitch, 0.0, false).unwrap();

                camera.set_mode(CameraMode::Quaternion);
                let switch = camera.set_mode(CameraMode::Euler);
                assert!(!switch.lost_roll(), "no roll to lose at yaw {} pitch {}", yaw, pitch);

                let angles = camera.euler_angles().unwrap();
                assert!(
                    angle_delta(yaw, angles.yaw).abs() < 1e-3,
                    "yaw {} came back as {} (pitch {})",
                    yaw,
                    angles.yaw,
                    pitch
                );
                assert!(
                    (angles.pitch - pitch).abs() < 1e-3,
                    "pitch {} came back as {} (yaw {})",
                    pitch,
                    angles.pitch,
                    yaw
                );
            }
            yaw += 15.0;
        }
    }

    #[test]
    fn test_switch_to_quaternion_keeps_the_view() {
        let mut camera = euler_camera(-45.0, 30.0);
        camera.set_euler_angles(-45.0, 30.0, 20.0, true).unwrap();
        let before = *camera.basis();

        let switch = camera.set_mode(CameraMode::Quaternion);

        assert!(switch.changed());
        assert_eq!(switch.discarded_roll, None);
        assert!(before.max_angle_to(camera.basis()) < 1e-3);
        assert_unit_quaternion(&camera);
    }

    #[test]
    fn test_switch_past_vertical_pitch_keeps_the_view() {
        for pitch in [120.0, -135.0, 170.0] {
            for yaw in [-90.0, 0.0, 45.0, 150.0] {
                for roll in [0.0, 30.0] {
                    let mut camera = euler_camera(0.0, 0.0);
                    camera.set_euler_angles(yaw, pitch, roll, false).unwrap();
                    let before = *camera.basis();

                    camera.set_mode(CameraMode::Quaternion);
                    let angle = before.max_angle_to(camera.basis());
                    assert!(
                        angle < 1e-3,
                        "yaw {} pitch {} roll {} moved by {} degrees on switch",
                        yaw,
                        pitch,
                        roll,
                        angle
                    );
                    assert_orthonormal(&camera);

                    let switch = camera.set_mode(CameraMode::Euler);
                    assert_eq!(switch.lost_roll(), roll != 0.0);
                    if roll == 0.0 {
                        let angle = before.max_angle_to(camera.basis());
                        assert!(angle < 1e-2, "round trip moved by {} degrees", angle);
                        assert!(camera.euler_angles().unwrap().pitch.abs() <= 90.0);
                    } else {
                        assert!((camera.front() - before.front).length() < 1e-4);
                    }
                }
            }
        }
    }

    #[test]
    fn test_switch_to_euler_reports_discarded_roll() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        camera.apply_incremental_rotation(camera.front(), 25.0).unwrap();

        let switch = camera.set_mode(CameraMode::Euler);

        let roll = switch.discarded_roll.expect("roll should be reported");
        assert!((roll.abs() - 25.0).abs() < 1e-2, "discarded roll {}", roll);
        let angles = camera.euler_angles().unwrap();
        assert_eq!(angles.roll, 0.0);
        assert!(angle_delta(-90.0, angles.yaw).abs() < 1e-2);
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_switch_to_same_mode_is_a_no_op() {
        let mut camera = euler_camera(10.0, 20.0);
        let before = camera.clone();

        let switch = camera.set_mode(CameraMode::Euler);

        assert!(!switch.changed());
        assert_eq!(camera, before);
    }

    #[test]
    fn test_quaternion_construction_matches_euler_construction() {
        let euler = euler_camera(60.0, -20.0);
        let quaternion = quaternion_camera(60.0, -20.0);
        assert!(euler.basis().max_angle_to(quaternion.basis()) < 1e-3);
    }
}

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn test_basis_orthonormal_across_euler_range() {
        let mut camera = euler_camera(0.0, 0.0);
        for yaw in (-180..=180).step_by(20) {
            for pitch in (-89..=89).step_by(8) {
                for roll in [0.0, 33.0, -170.0] {
                    camera
                        .set_euler_angles(yaw as f32, pitch as f32, roll, false)
                        .unwrap();
                    assert_orthonormal(&camera);
                    assert!(camera.basis().is_right_handed(1e-4));
                }
            }
        }
    }

    #[test]
    fn test_quaternion_stays_normalized_after_every_mutation() {
        let mut camera = quaternion_camera(-90.0, 0.0);

        for step in 0..500 {
            let k = step as f32;
            camera.process_look_delta(k.sin() * 40.0, k.cos() * 25.0, false);
            assert_unit_quaternion(&camera);
            assert_orthonormal(&camera);

            camera.apply_local_increments(1.5, -0.7, 0.9).unwrap();
            assert_unit_quaternion(&camera);

            let axis = Vec3::new(k.cos(), 1.0, k.sin());
            camera.apply_incremental_rotation(axis, 3.0).unwrap();
            assert_unit_quaternion(&camera);
            assert_orthonormal(&camera);
        }

        camera.set_from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 70.0).unwrap();
        assert_unit_quaternion(&camera);
        camera.set_quaternion_from_euler(30.0, 40.0, 50.0).unwrap();
        assert_unit_quaternion(&camera);
        camera.look_at(Vec3::new(4.0, -2.0, 1.0)).unwrap();
        assert_unit_quaternion(&camera);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_failed_operation_leaves_camera_untouched() {
        let mut camera = quaternion_camera(15.0, 5.0);
        let before = camera.clone();

        assert!(camera.apply_incremental_rotation(Vec3::ZERO, 10.0).is_err());
        assert!(camera.set_from_axis_angle(Vec3::X, f32::NAN).is_err());
        assert!(camera.look_at(camera.position).is_err());
        assert!(camera.set_euler_angles(0.0, 0.0, 0.0, true).is_err());

        assert_eq!(camera, before);
    }
}

#[cfg(test)]
mod rotation_tests {
    use super::*;

    #[test]
    fn test_two_small_rotations_equal_one_large() {
        let axis = Vec3::new(0.3, 1.0, -0.2).normalize();

        let mut stepped = quaternion_camera(-70.0, 10.0);
        stepped.apply_incremental_rotation(axis, 5.0).unwrap();
        stepped.apply_incremental_rotation(axis, 5.0).unwrap();

        let mut single = quaternion_camera(-70.0, 10.0);
        single.apply_incremental_rotation(axis, 10.0).unwrap();

        assert!(
            (stepped.front() - single.front()).length() < 1e-5,
            "{} vs {}",
            stepped.front(),
            single.front()
        );
    }

    #[test]
    fn test_euler_mode_locks_at_vertical_pitch() {
        let mut camera = euler_camera(-90.0, 0.0);
        camera.set_euler_angles(-90.0, 90.0, 0.0, false).unwrap();
        let before = camera.front();

        camera.process_look_delta(200.0, 0.0, false);

        assert!(camera.euler_angles().unwrap().yaw > -90.0, "yaw should still change");
        let change = (horizontal(camera.front()) - horizontal(before)).length();
        assert!(
            change.asin().to_degrees() < 0.5,
            "front moved horizontally by {}",
            change
        );
    }

    #[test]
    fn test_quaternion_mode_turns_freely_at_vertical_pitch() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        camera.set_quaternion_from_euler(0.0, 90.0, 0.0).unwrap();
        assert!((camera.front() - Vec3::Y).length() < 1e-5);
        let before = camera.front();

        // local up is horizontal here; turning about it tips Front off vertical
        camera.apply_incremental_rotation(camera.up(), 10.0).unwrap();

        assert!(
            angle_degrees(before, camera.front()) > 9.0,
            "front should turn by the increment"
        );
        assert!(horizontal(camera.front()).length() > 0.1);
    }

    #[test]
    fn test_quaternion_look_delta_pitches_about_right() {
        let mut camera = quaternion_camera(-90.0, 0.0).with_mouse_sensitivity(1.0);
        camera.process_look_delta(0.0, 30.0, true);

        assert!((camera.front().y - 30f32.to_radians().sin()).abs() < 1e-4);
        assert!((camera.right() - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_look_delta_turns_right_for_positive_dx() {
        for mut camera in [euler_camera(-90.0, 0.0), quaternion_camera(-90.0, 0.0)] {
            camera.process_look_delta(100.0, 0.0, true);
            assert!(camera.front().x > 0.0, "{} mode turned the wrong way", camera.mode());
        }
    }

    #[test]
    fn test_euler_look_delta_constrains_pitch() {
        let mut camera = euler_camera(-90.0, 80.0).with_mouse_sensitivity(1.0);
        camera.process_look_delta(0.0, 50.0, true);
        assert_eq!(camera.euler_angles().unwrap().pitch, 89.0);

        camera.process_look_delta(0.0, 50.0, false);
        assert_eq!(camera.euler_angles().unwrap().pitch, 139.0);
    }

    #[test]
    fn test_non_finite_look_delta_is_ignored() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        let before = camera.clone();
        camera.process_look_delta(f32::NAN, 1.0, true);
        camera.process_look_delta(1.0, f32::INFINITY, true);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_local_increments_roll_about_front() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        camera.apply_local_increments(0.0, 0.0, 90.0).unwrap();

        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-5);
        assert!((camera.right() - Vec3::NEG_Y).length() < 1e-5);
        assert!((camera.up() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_axis_angle_sets_absolute_orientation() {
        let mut camera = quaternion_camera(10.0, 20.0);
        camera.set_from_axis_angle(Vec3::Y * 4.0, 90.0).unwrap();

        let expected = Quat::from_axis_angle(Vec3::Y, 90f32.to_radians());
        assert!(camera.quaternion().unwrap().abs_diff_eq(expected, 1e-6));
        assert!((camera.front() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_world_axes_setter_is_distinct_from_mode_switch() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        camera.set_quaternion_from_euler(0.0, 0.0, 0.0).unwrap();
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-5);

        // yaw 0 through the mode switch faces +X instead
        let switched = quaternion_camera(0.0, 0.0);
        assert!((switched.front() - Vec3::X).length() < 1e-5);
        assert_eq!(
            Orientation::from_world_axes(0.0, 0.0, 0.0),
            Orientation::Quaternion(Quat::IDENTITY)
        );
    }
}

#[cfg(test)]
mod look_at_tests {
    use super::*;

    #[test]
    fn test_look_at_straight_ahead() {
        for mut camera in [euler_camera(30.0, 40.0), quaternion_camera(30.0, 40.0)] {
            let target = camera.position + Vec3::NEG_Z;
            camera.look_at(target).unwrap();

            assert!((camera.front() - Vec3::NEG_Z).length() < 1e-5);
            let view_front = -camera.view_matrix().row(2).truncate();
            assert!((view_front - Vec3::NEG_Z).length() < 1e-5);

            camera.set_mode(CameraMode::Euler);
            let angles = camera.euler_angles().unwrap();
            assert!(angle_delta(-90.0, angles.yaw).abs() < 1e-3, "yaw {}", angles.yaw);
            assert!(angles.pitch.abs() < 1e-3);
        }
    }

    #[test]
    fn test_look_at_clamps_pitch_in_euler_mode() {
        let mut camera = euler_camera(-90.0, 0.0);
        camera.look_at(camera.position + Vec3::new(0.0, 10.0, -0.01)).unwrap();
        assert_eq!(camera.euler_angles().unwrap().pitch, 89.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_look_at_keeps_roll_in_euler_mode() {
        let mut camera = euler_camera(-90.0, 0.0);
        camera.set_euler_angles(-90.0, 0.0, 15.0, true).unwrap();
        camera.look_at(Vec3::new(5.0, 3.0, 3.0)).unwrap();

        let angles = camera.euler_angles().unwrap();
        assert_eq!(angles.roll, 15.0);
        assert!(angle_delta(0.0, angles.yaw).abs() < 1e-3);
    }

    #[test]
    fn test_look_at_own_position_is_rejected() {
        let mut camera = euler_camera(-90.0, 0.0);
        let err = camera.look_at(camera.position).unwrap_err();
        assert!(matches!(err, CameraError::DegenerateTarget(_)));
    }

    #[test]
    fn test_look_at_along_world_up_is_rejected_in_quaternion_mode() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        let err = camera.look_at(camera.position + Vec3::Y * 2.0).unwrap_err();
        assert!(matches!(err, CameraError::DegenerateBasis(_)));
    }

    #[test]
    fn test_look_at_non_finite_target_is_rejected() {
        let mut camera = euler_camera(-90.0, 0.0);
        let err = camera.look_at(Vec3::new(f32::NAN, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, CameraError::NonFinite(_)));
    }
}

#[cfg(test)]
mod zoom_and_movement_tests {
    use super::*;

    #[test]
    fn test_zoom_clamps_to_fov_range() {
        let mut camera = euler_camera(-90.0, 0.0);
        assert_eq!(camera.fov(), 45.0);

        camera.process_zoom(1000.0);
        assert_eq!(camera.fov(), FOV_MIN);

        camera.process_zoom(-1000.0);
        assert_eq!(camera.fov(), FOV_MAX);
    }

    #[test]
    fn test_zoom_changes_by_scroll_amount() {
        let mut camera = euler_camera(-90.0, 0.0);
        camera.process_zoom(2.0);
        assert_eq!(camera.fov(), 43.0);
        camera.process_zoom(f32::NAN);
        assert_eq!(camera.fov(), 43.0);
    }

    #[test]
    fn test_movement_follows_camera_axes() {
        let mut camera = euler_camera(-90.0, 0.0).with_movement_speed(2.0);
        let start = camera.position;

        camera.process_movement(Movement::Forward, 0.5);
        assert!((camera.position - (start + Vec3::NEG_Z)).length() < 1e-5);

        camera.process_movement(Movement::Right, 0.5);
        camera.process_movement(Movement::Up, 0.5);
        assert!((camera.position - (start + Vec3::new(1.0, 1.0, -1.0))).length() < 1e-5);

        camera.process_movement(Movement::Backward, 0.5);
        camera.process_movement(Movement::Left, 0.5);
        camera.process_movement(Movement::Down, 0.5);
        assert!((camera.position - start).length() < 1e-5);
    }

    #[test]
    fn test_movement_does_not_rotate() {
        let mut camera = quaternion_camera(20.0, -10.0);
        let q = camera.quaternion();
        camera.process_movement(Movement::Forward, 1.0);
        assert_eq!(camera.quaternion(), q);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_euler_setter_rejected_in_quaternion_mode() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        let err = camera.set_euler_angles(0.0, 0.0, 0.0, true).unwrap_err();
        assert_eq!(
            err,
            CameraError::ModeMismatch {
                operation: "set_euler_angles",
                required: CameraMode::Euler,
                current: CameraMode::Quaternion,
            }
        );
    }

    #[test]
    fn test_quaternion_operations_rejected_in_euler_mode() {
        let mut camera = euler_camera(-90.0, 0.0);
        assert!(matches!(
            camera.set_quaternion_from_euler(0.0, 0.0, 0.0),
            Err(CameraError::ModeMismatch { .. })
        ));
        assert!(matches!(
            camera.set_from_axis_angle(Vec3::Y, 10.0),
            Err(CameraError::ModeMismatch { .. })
        ));
        assert!(matches!(
            camera.apply_incremental_rotation(Vec3::Y, 10.0),
            Err(CameraError::ModeMismatch { .. })
        ));
        assert!(matches!(
            camera.apply_local_increments(1.0, 0.0, 0.0),
            Err(CameraError::ModeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_axis_rejected() {
        let mut camera = quaternion_camera(-90.0, 0.0);
        let err = camera.apply_incremental_rotation(Vec3::ZERO, 5.0).unwrap_err();
        assert_eq!(err, CameraError::InvalidAxis(Vec3::ZERO));
        assert!(err.to_string().contains("axis"));
    }

    #[test]
    fn test_invalid_construction_rejected() {
        assert!(matches!(
            Camera::new(Vec3::ZERO, Vec3::ZERO, 0.0, 0.0, CameraMode::Euler),
            Err(CameraError::InvalidWorldUp(_))
        ));
        assert!(matches!(
            Camera::new(Vec3::ZERO, Vec3::Y, f32::INFINITY, 0.0, CameraMode::Euler),
            Err(CameraError::NonFinite(_))
        ));
    }

    #[test]
    fn test_world_up_off_the_y_axis_rejected() {
        for world_up in [Vec3::Z, Vec3::NEG_Y, Vec3::new(0.0, 1.0, 0.2)] {
            let err = Camera::new(Vec3::ZERO, world_up, 30.0, 20.0, CameraMode::Euler).unwrap_err();
            assert_eq!(err, CameraError::InvalidWorldUp(world_up));
            assert!(err.to_string().contains("+Y"));
        }

        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), 30.0, 20.0, CameraMode::Euler)
            .expect("scaled +Y is a valid world up");
        assert_eq!(camera.world_up(), Vec3::Y, "world up should be normalized");
    }

    #[test]
    fn test_non_finite_euler_angles_rejected() {
        let mut camera = euler_camera(-90.0, 0.0);
        assert!(matches!(
            camera.set_euler_angles(f32::NAN, 0.0, 0.0, false),
            Err(CameraError::NonFinite(_))
        ));
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;

    #[test]
    fn test_view_matrix_maps_front_to_negative_z() {
        let camera = quaternion_camera(35.0, 25.0);
        let view = camera.view_matrix();

        let ahead = view.transform_point3(camera.position + camera.front());
        assert!((ahead - Vec3::NEG_Z).length() < 1e-5);
        let origin = view.transform_point3(camera.position);
        assert!(origin.length() < 1e-5);
    }

    #[test]
    fn test_camera_view_trait_matches_camera() {
        let camera = euler_camera(-60.0, 10.0);
        let view: &dyn CameraView = &camera;

        assert_eq!(view.view_matrix(), camera.view_matrix());
        assert_eq!(view.forward(), camera.front());
        assert_eq!(view.fov_degrees(), camera.fov());
        assert_eq!(view.projection_matrix(1.5), camera.projection_matrix(1.5));
        assert_eq!(
            view.view_projection(1.5),
            camera.projection_matrix(1.5) * camera.view_matrix()
        );
    }

    #[test]
    fn test_default_camera_matches_config_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.euler_angles(), Some(EulerAngles::yaw_pitch(-90.0, 0.0)));
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-6);
    }
}
