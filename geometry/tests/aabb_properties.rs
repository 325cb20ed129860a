use geometry::{AABB, ApproxEq};
use glam::Vec3;
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f32> {
    -100.0_f32..100.0
}

fn vec3() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(coordinate()).prop_map(Vec3::from_array)
}

fn positive_size() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(1.0_f32..50.0).prop_map(Vec3::from_array)
}

/// Boxes with any sign convention, including zero and inverted extents.
fn any_box() -> impl Strategy<Value = AABB> {
    (vec3(), vec3()).prop_map(|(position, size)| AABB::new(position, size))
}

fn positive_box() -> impl Strategy<Value = AABB> {
    (vec3(), positive_size()).prop_map(|(position, size)| AABB::new(position, size))
}

proptest! {
    #[test]
    fn merge_with_self_is_normalized_self(a in any_box()) {
        prop_assert!(a.merge(&a).is_equal_approx(&a.abs()));
        prop_assert!(a.encloses(&a));
    }

    #[test]
    fn intersects_is_symmetric(a in any_box(), b in any_box()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn enclosure_implies_intersection(a in any_box(), b in any_box()) {
        if a.encloses(&b) {
            prop_assert!(a.intersects(&b));
            prop_assert!(a.intersection(&b).is_equal_approx(&b.abs()));
        }
    }

    #[test]
    fn merge_encloses_both(a in any_box(), b in any_box()) {
        // Recomputing the end corner can round one ulp inward
        let merged = a.merge(&b);
        prop_assert!(merged.grow(1e-3).encloses(&a));
        prop_assert!(merged.grow(1e-3).encloses(&b));
        prop_assert!(merged.size.cmpge(Vec3::ZERO).all());
    }

    #[test]
    fn disjoint_intersection_is_empty(a in positive_box(), gap in 0.1_f32..10.0) {
        let b = AABB::new(a.end() + Vec3::new(gap, 0.0, 0.0), a.size);
        prop_assert!(!a.intersects(&b));
        prop_assert_eq!(a.intersection(&b), AABB::default());
    }

    #[test]
    fn every_endpoint_is_contained(a in any_box()) {
        for index in 0..8 {
            prop_assert!(a.has_point(a.endpoint(index)), "endpoint {} outside {}", index, a);
        }
    }

    #[test]
    fn volume_sign_follows_negative_components(
        position in vec3(),
        magnitudes in prop::array::uniform3(0.5_f32..20.0),
        negative in prop::array::uniform3(any::<bool>()),
    ) {
        let size = Vec3::from_array([0usize, 1, 2].map(|i| {
            if negative[i] { -magnitudes[i] } else { magnitudes[i] }
        }));
        let negative_count = negative.iter().filter(|n| **n).count();

        let volume = AABB::new(position, size).volume();
        prop_assert_eq!(volume < 0.0, negative_count % 2 == 1);
    }

    #[test]
    fn grow_then_shrink_round_trips(a in positive_box(), g in -0.4_f32..0.4) {
        let back = a.grow(g).grow(-g);
        prop_assert!((back.position - a.position).abs().max_element() < 1e-4);
        prop_assert!((back.size - a.size).abs().max_element() < 1e-4);
    }

    #[test]
    fn expand_contains_point(a in any_box(), point in vec3()) {
        let expanded = a.expand(point).grow(1e-3);
        prop_assert!(expanded.has_point(point));
        prop_assert!(expanded.encloses(&a));
    }

    #[test]
    fn support_is_extremal(a in any_box(), dir in vec3()) {
        let support = a.support(dir);
        let best = support.dot(dir);
        for index in 0..8 {
            let corner = a.endpoint(index);
            prop_assert!(corner.dot(dir) <= best + 1e-2 * (1.0 + best.abs()));
        }
    }

    #[test]
    fn ray_towards_center_hits(a in positive_box(), origin in vec3()) {
        let dir = a.center() - origin;
        prop_assume!(dir.length() > 1e-3);
        prop_assert!(a.intersects_ray(origin, dir));
        prop_assert!(a.intersects_segment(origin, a.center()));
    }
}

#[test]
fn literal_box() {
    let aabb = AABB::new(Vec3::new(-1.5, 2.0, -2.5), Vec3::new(4.0, 5.0, 6.0));
    assert!(aabb.end().is_equal_approx(&Vec3::new(2.5, 7.0, 3.5)));
    assert!(aabb.center().is_equal_approx(&Vec3::new(0.5, 4.5, 0.5)));
    assert!(aabb.volume().is_equal_approx(&120.0));
    assert_eq!(aabb.longest_axis_index(), geometry::Axis::Z);
    assert_eq!(aabb.to_string(), "[P: (-1.5, 2.0, -2.5), S: (4.0, 5.0, 6.0)]");

    let far = AABB::new(Vec3::new(10.0, -10.0, -10.0), Vec3::ONE);
    assert!(!aabb.encloses(&far));
    assert_eq!(aabb.intersection(&far), AABB::default());
}

#[test]
fn ray_from_inside_unit_box() {
    let unit = AABB::new(Vec3::ZERO, Vec3::ONE);
    let hit = unit
        .find_intersects_ray(Vec3::new(0.5, 0.1, 0.5), Vec3::Y)
        .expect("ray starting inside must hit");
    assert!(hit.inside);
    assert!(hit.point.is_equal_approx(&Vec3::new(0.5, 0.0, 0.5)));
    assert!(hit.normal.is_equal_approx(&Vec3::new(0.0, -1.0, 0.0)));
}
