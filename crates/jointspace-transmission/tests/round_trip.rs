//! Property tests for the transmission mechanisms.
//!
//! Every joint → actuator conversion must undo the matching actuator → joint
//! conversion, converting in place must match converting into separate
//! slots, and the simple and differential mechanisms must conserve power.

use std::cell::Cell;

use jointspace_transmission::{
    DifferentialTransmission, Direction, FourBarLinkageTransmission, SimpleTransmission,
    Transmission, convert,
};
use jointspace_types::Quantity;
use proptest::prelude::*;

const QUANTITIES: [Quantity; 3] = [Quantity::Position, Quantity::Velocity, Quantity::Effort];

fn ratio() -> impl Strategy<Value = f64> + Clone {
    prop_oneof![-100.0..-0.1f64, 0.1..100.0f64]
}

fn value() -> impl Strategy<Value = f64> + Clone {
    -100.0..100.0f64
}

fn pair<S: Strategy<Value = f64> + Clone>(s: S) -> impl Strategy<Value = [f64; 2]> {
    (s.clone(), s).prop_map(|(a, b)| [a, b])
}

fn close(a: &[f64], b: &[f64]) -> bool {
    a.iter()
        .zip(b)
        .all(|(x, y)| (x - y).abs() <= 1e-7 * (1.0 + x.abs().max(y.abs())))
}

/// Convert `input` one way and back, returning the intermediate and final
/// values.
fn there_and_back(
    t: &dyn Transmission,
    quantity: Quantity,
    input: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let actuator: Vec<Cell<f64>> = input.iter().copied().map(Cell::new).collect();
    let joint: Vec<Cell<f64>> = (0..t.num_joints()).map(|_| Cell::new(0.0)).collect();
    let a: Vec<&Cell<f64>> = actuator.iter().collect();
    let j: Vec<&Cell<f64>> = joint.iter().collect();

    convert(t, Direction::ActuatorToJoint, quantity, &a, &j);
    let mid = joint.iter().map(Cell::get).collect();

    for slot in &actuator {
        slot.set(f64::NAN);
    }
    convert(t, Direction::JointToActuator, quantity, &a, &j);
    (mid, actuator.iter().map(Cell::get).collect())
}

fn power(t: &dyn Transmission, effort: &[f64], velocity: &[f64]) -> (f64, f64) {
    let (joint_eff, _) = there_and_back(t, Quantity::Effort, effort);
    let (joint_vel, _) = there_and_back(t, Quantity::Velocity, velocity);
    let dot = |x: &[f64], y: &[f64]| x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>();
    (dot(effort, velocity), dot(&joint_eff, &joint_vel))
}

proptest! {
    #[test]
    fn simple_inverts(n in ratio(), off in value(), x in value()) {
        let t = SimpleTransmission::new(n, off).unwrap();
        for q in QUANTITIES {
            let (_, back) = there_and_back(&t, q, &[x]);
            prop_assert!(close(&back, &[x]), "{q}: {back:?} != {x}");
        }
    }

    #[test]
    fn differential_inverts(
        ar in pair(ratio()),
        jr in pair(ratio()),
        off in pair(value()),
        x in pair(value()),
    ) {
        let t = DifferentialTransmission::new(&ar, &jr, &off).unwrap();
        for q in QUANTITIES {
            let (_, back) = there_and_back(&t, q, &x);
            prop_assert!(close(&back, &x), "{q}: {back:?} != {x:?}");
        }
    }

    #[test]
    fn four_bar_inverts(
        ar in pair(ratio()),
        jr in pair(ratio()),
        off in pair(value()),
        x in pair(value()),
    ) {
        let t = FourBarLinkageTransmission::new(&ar, &jr, &off).unwrap();
        for q in QUANTITIES {
            let (_, back) = there_and_back(&t, q, &x);
            prop_assert!(close(&back, &x), "{q}: {back:?} != {x:?}");
        }
    }

    #[test]
    fn in_place_matches_out_of_place(
        ar in pair(ratio()),
        jr in pair(ratio()),
        off in pair(value()),
        x in pair(value()),
    ) {
        let transmissions: [Box<dyn Transmission>; 2] = [
            Box::new(DifferentialTransmission::new(&ar, &jr, &off).unwrap()),
            Box::new(FourBarLinkageTransmission::new(&ar, &jr, &off).unwrap()),
        ];
        for t in &transmissions {
            for q in QUANTITIES {
                let (expected, _) = there_and_back(t.as_ref(), q, &x);

                let slots = x.map(Cell::new);
                let refs = [&slots[0], &slots[1]];
                convert(t.as_ref(), Direction::ActuatorToJoint, q, &refs, &refs);
                let got = [slots[0].get(), slots[1].get()];
                prop_assert!(close(&got, &expected), "{t:?} {q}: {got:?} != {expected:?}");
            }
        }
    }

    #[test]
    fn simple_conserves_power(n in ratio(), tau in value(), v in value()) {
        let t = SimpleTransmission::new(n, 0.0).unwrap();
        let (actuator, joint) = power(&t, &[tau], &[v]);
        prop_assert!(close(&[actuator], &[joint]));
    }

    #[test]
    fn differential_conserves_power(
        ar in pair(ratio()),
        jr in pair(ratio()),
        tau in pair(value()),
        v in pair(value()),
    ) {
        let t = DifferentialTransmission::new(&ar, &jr, &[0.0, 0.0]).unwrap();
        let (actuator, joint) = power(&t, &tau, &v);
        prop_assert!((actuator - joint).abs() <= 1e-6 * (1.0 + actuator.abs()));
    }
}
