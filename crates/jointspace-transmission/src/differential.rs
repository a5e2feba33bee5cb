//! [`DifferentialTransmission`] – two actuators coupled to two joints through
//! a differential.
//!
//! # Mapping
//!
//! Actuator to joint:
//!
//! ```text
//! τj1 = nj1 · (na1 · τa1 + na2 · τa2)
//! τj2 = nj2 · (na1 · τa1 − na2 · τa2)
//!
//! ẋj1 = (ẋa1 / na1 + ẋa2 / na2) / (2 · nj1)
//! ẋj2 = (ẋa1 / na1 − ẋa2 / na2) / (2 · nj2)
//!
//! xj1 = (xa1 / na1 + xa2 / na2) / (2 · nj1) + x_off1
//! xj2 = (xa1 / na1 − xa2 / na2) / (2 · nj2) + x_off2
//! ```
//!
//! Joint to actuator, the exact inverse of each line above:
//!
//! ```text
//! τa1 = (τj1 / nj1 + τj2 / nj2) / (2 · na1)
//! τa2 = (τj1 / nj1 − τj2 / nj2) / (2 · na2)
//!
//! ẋa1 = na1 · (nj1 · ẋj1 + nj2 · ẋj2)
//! ẋa2 = na2 · (nj1 · ẋj1 − nj2 · ẋj2)
//!
//! xa1 = na1 · (nj1 · (xj1 − x_off1) + nj2 · (xj2 − x_off2))
//! xa2 = na2 · (nj1 · (xj1 − x_off1) − nj2 · (xj2 − x_off2))
//! ```
//!
//! `na` are actuator-side and `nj` joint-side reduction ratios; none may be
//! zero.  Signs select which actuator/joint directions count as positive, and
//! generally have to be chosen to match the mechanical design.

use std::cell::Cell;

use jointspace_types::ControlError;

use crate::transmission::{Transmission, assert_arity, read, two_by_two, write};

const NAME: &str = "DifferentialTransmission";

/// Two-actuator, two-joint differential coupling.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use jointspace_transmission::{DifferentialTransmission, Transmission};
///
/// let t = DifferentialTransmission::new(&[2.0, 2.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap();
/// let a = [Cell::new(3.0), Cell::new(1.0)];
/// let j = [Cell::new(0.0), Cell::new(0.0)];
///
/// t.actuator_to_joint_effort(&[&a[0], &a[1]], &[&j[0], &j[1]]);
/// assert_eq!([j[0].get(), j[1].get()], [8.0, 4.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialTransmission {
    actuator_reduction: [f64; 2],
    joint_reduction: [f64; 2],
    joint_offset: [f64; 2],
}

impl DifferentialTransmission {
    /// # Errors
    ///
    /// Returns [`ControlError::TransmissionConfig`] when any slice does not
    /// have exactly two entries or any reduction ratio is zero.
    pub fn new(
        actuator_reduction: &[f64],
        joint_reduction: &[f64],
        joint_offset: &[f64],
    ) -> Result<Self, ControlError> {
        let (actuator_reduction, joint_reduction, joint_offset) =
            two_by_two("differential", actuator_reduction, joint_reduction, joint_offset)?;
        Ok(Self {
            actuator_reduction,
            joint_reduction,
            joint_offset,
        })
    }

    pub fn actuator_reduction(&self) -> [f64; 2] {
        self.actuator_reduction
    }

    pub fn joint_reduction(&self) -> [f64; 2] {
        self.joint_reduction
    }

    pub fn joint_offset(&self) -> [f64; 2] {
        self.joint_offset
    }

    fn flow_to_joint(&self, [a1, a2]: [f64; 2]) -> [f64; 2] {
        let [ar1, ar2] = self.actuator_reduction;
        let [jr1, jr2] = self.joint_reduction;
        [
            (a1 / ar1 + a2 / ar2) / (2.0 * jr1),
            (a1 / ar1 - a2 / ar2) / (2.0 * jr2),
        ]
    }

    fn flow_to_actuator(&self, [j1, j2]: [f64; 2]) -> [f64; 2] {
        let [ar1, ar2] = self.actuator_reduction;
        let [jr1, jr2] = self.joint_reduction;
        [(j1 * jr1 + j2 * jr2) * ar1, (j1 * jr1 - j2 * jr2) * ar2]
    }
}

impl Transmission for DifferentialTransmission {
    fn num_actuators(&self) -> usize {
        2
    }

    fn num_joints(&self) -> usize {
        2
    }

    fn actuator_to_joint_effort(&self, actuator_eff: &[&Cell<f64>], joint_eff: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "actuator_to_joint_effort",
            (2, actuator_eff.len()),
            (2, joint_eff.len()),
        );
        let [a1, a2] = read(actuator_eff);
        let [ar1, ar2] = self.actuator_reduction;
        let [jr1, jr2] = self.joint_reduction;
        write(
            joint_eff,
            [jr1 * (a1 * ar1 + a2 * ar2), jr2 * (a1 * ar1 - a2 * ar2)],
        );
    }

    fn actuator_to_joint_velocity(&self, actuator_vel: &[&Cell<f64>], joint_vel: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "actuator_to_joint_velocity",
            (2, actuator_vel.len()),
            (2, joint_vel.len()),
        );
        write(joint_vel, self.flow_to_joint(read(actuator_vel)));
    }

    fn actuator_to_joint_position(&self, actuator_pos: &[&Cell<f64>], joint_pos: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "actuator_to_joint_position",
            (2, actuator_pos.len()),
            (2, joint_pos.len()),
        );
        let [j1, j2] = self.flow_to_joint(read(actuator_pos));
        let [off1, off2] = self.joint_offset;
        write(joint_pos, [j1 + off1, j2 + off2]);
    }

    fn joint_to_actuator_effort(&self, joint_eff: &[&Cell<f64>], actuator_eff: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "joint_to_actuator_effort",
            (2, actuator_eff.len()),
            (2, joint_eff.len()),
        );
        let [j1, j2] = read(joint_eff);
        let [ar1, ar2] = self.actuator_reduction;
        let [jr1, jr2] = self.joint_reduction;
        write(
            actuator_eff,
            [
                (j1 / jr1 + j2 / jr2) / (2.0 * ar1),
                (j1 / jr1 - j2 / jr2) / (2.0 * ar2),
            ],
        );
    }

    fn joint_to_actuator_velocity(&self, joint_vel: &[&Cell<f64>], actuator_vel: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "joint_to_actuator_velocity",
            (2, actuator_vel.len()),
            (2, joint_vel.len()),
        );
        write(actuator_vel, self.flow_to_actuator(read(joint_vel)));
    }

    fn joint_to_actuator_position(&self, joint_pos: &[&Cell<f64>], actuator_pos: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "joint_to_actuator_position",
            (2, actuator_pos.len()),
            (2, joint_pos.len()),
        );
        let [j1, j2] = read(joint_pos);
        let [off1, off2] = self.joint_offset;
        write(actuator_pos, self.flow_to_actuator([j1 - off1, j2 - off2]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn cells(values: [f64; 2]) -> [Cell<f64>; 2] {
        values.map(Cell::new)
    }

    fn get(c: &[Cell<f64>; 2]) -> [f64; 2] {
        [c[0].get(), c[1].get()]
    }

    fn refs(c: &[Cell<f64>; 2]) -> [&Cell<f64>; 2] {
        [&c[0], &c[1]]
    }

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < EPS && (a[1] - b[1]).abs() < EPS
    }

    #[test]
    fn zero_ratios_are_rejected() {
        let bad = [
            ([0.0, 1.0], [1.0, 1.0]),
            ([1.0, 0.0], [1.0, 1.0]),
            ([1.0, 1.0], [0.0, 1.0]),
            ([1.0, 1.0], [1.0, 0.0]),
        ];
        for (ar, jr) in bad {
            assert!(matches!(
                DifferentialTransmission::new(&ar, &jr, &[0.0, 0.0]),
                Err(ControlError::TransmissionConfig(_))
            ));
        }
    }

    #[test]
    fn wrong_parameter_sizes_are_rejected() {
        assert!(DifferentialTransmission::new(&[1.0], &[1.0, 1.0], &[0.0, 0.0]).is_err());
        assert!(DifferentialTransmission::new(&[1.0, 1.0], &[1.0, 1.0, 1.0], &[0.0, 0.0]).is_err());
        assert!(DifferentialTransmission::new(&[1.0, 1.0], &[1.0, 1.0], &[]).is_err());
    }

    #[test]
    fn effort_and_velocity_scenario() {
        let t = DifferentialTransmission::new(&[2.0, 2.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap();
        let j = cells([0.0, 0.0]);

        let a = cells([3.0, 1.0]);
        t.actuator_to_joint_effort(&refs(&a), &refs(&j));
        assert!(close(get(&j), [8.0, 4.0]));

        let a = cells([4.0, 2.0]);
        t.actuator_to_joint_velocity(&refs(&a), &refs(&j));
        assert!(close(get(&j), [1.5, 0.5]));
    }

    #[test]
    fn position_applies_offsets() {
        let t = DifferentialTransmission::new(&[2.0, 2.0], &[1.0, 1.0], &[0.5, -0.5]).unwrap();
        let a = cells([4.0, 2.0]);
        let j = cells([0.0, 0.0]);
        t.actuator_to_joint_position(&refs(&a), &refs(&j));
        assert!(close(get(&j), [2.0, 0.0]));

        let back = cells([0.0, 0.0]);
        t.joint_to_actuator_position(&refs(&j), &refs(&back));
        assert!(close(get(&back), [4.0, 2.0]));
    }

    #[test]
    fn joint_to_actuator_inverts_each_quantity() {
        let t = DifferentialTransmission::new(&[10.0, -5.0], &[2.0, 0.5], &[0.1, 0.2]).unwrap();
        let a = cells([1.25, -3.0]);
        let j = cells([0.0, 0.0]);
        let back = cells([0.0, 0.0]);

        t.actuator_to_joint_effort(&refs(&a), &refs(&j));
        t.joint_to_actuator_effort(&refs(&j), &refs(&back));
        assert!(close(get(&back), get(&a)));

        t.actuator_to_joint_velocity(&refs(&a), &refs(&j));
        t.joint_to_actuator_velocity(&refs(&j), &refs(&back));
        assert!(close(get(&back), get(&a)));

        t.actuator_to_joint_position(&refs(&a), &refs(&j));
        t.joint_to_actuator_position(&refs(&j), &refs(&back));
        assert!(close(get(&back), get(&a)));
    }

    #[test]
    fn outputs_may_alias_inputs() {
        let t = DifferentialTransmission::new(&[2.0, 2.0], &[1.0, 1.0], &[0.3, 0.0]).unwrap();
        let x = cells([4.0, 2.0]);

        t.actuator_to_joint_velocity(&refs(&x), &refs(&x));
        assert!(close(get(&x), [1.5, 0.5]));

        let x = cells([4.0, 2.0]);
        t.actuator_to_joint_position(&refs(&x), &refs(&x));
        t.joint_to_actuator_position(&refs(&x), &refs(&x));
        assert!(close(get(&x), [4.0, 2.0]));
    }

    #[test]
    #[should_panic(expected = "DifferentialTransmission::actuator_to_joint_effort")]
    fn three_actuator_slots_panic() {
        let t = DifferentialTransmission::new(&[1.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap();
        let a = [Cell::new(0.0), Cell::new(0.0), Cell::new(0.0)];
        let j = cells([0.0, 0.0]);
        t.actuator_to_joint_effort(&[&a[0], &a[1], &a[2]], &refs(&j));
    }

    #[test]
    #[should_panic(expected = "expected 2 actuator and 2 joint slots, got 2 and 1")]
    fn missing_joint_slot_panics() {
        let t = DifferentialTransmission::new(&[1.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap();
        let a = cells([0.0, 0.0]);
        let j = Cell::new(0.0);
        t.joint_to_actuator_position(&[&j], &refs(&a));
    }
}
