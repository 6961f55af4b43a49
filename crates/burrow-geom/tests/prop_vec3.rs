use burrow_geom::{Vec3, rotate_yaw, rotate_yaw_inv};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e4)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // a + b == b + a (element-wise)
    #[test]
    fn add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-3));
    }

    // Yaw rotation preserves Y and vector length
    #[test]
    fn rotate_yaw_preserves_y_and_length(v in arb_vec3(), yaw in -720.0f32..720.0) {
        let r = rotate_yaw(v, yaw);
        prop_assert!(approx(r.y, v.y, 1e-3));
        let scale = v.length().max(1.0);
        prop_assert!(approx(r.length(), v.length(), 1e-3 * scale));
    }

    // rotate_yaw_inv undoes rotate_yaw
    #[test]
    fn rotate_roundtrip(v in arb_vec3(), yaw in -720.0f32..720.0) {
        let back = rotate_yaw_inv(rotate_yaw(v, yaw), yaw);
        let scale = v.length().max(1.0);
        prop_assert!(vapprox(back, v, 1e-3 * scale));
    }

    // normalized() yields unit length for non-zero vectors
    #[test]
    fn normalized_unit_length(v in arb_vec3()) {
        prop_assume!(v.length() > 1e-3);
        prop_assert!(approx(v.normalized().length(), 1.0, 1e-3));
    }
}
