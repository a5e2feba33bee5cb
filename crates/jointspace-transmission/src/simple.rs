//! [`SimpleTransmission`] – one actuator geared to one joint.
//!
//! | | Effort | Velocity | Position |
//! |---|---|---|---|
//! | actuator → joint | `τj = n · τa` | `ẋj = ẋa / n` | `xj = xa / n + x_off` |
//! | joint → actuator | `τa = τj / n` | `ẋa = ẋj · n` | `xa = (xj − x_off) · n` |
//!
//! `n` is the reduction ratio.  `|n| > 1` is a velocity reducer / effort
//! amplifier, a negative `n` flips direction.  `x_off` is the joint position
//! at which the actuator reads zero.

use std::cell::Cell;

use jointspace_types::ControlError;

use crate::transmission::{Transmission, assert_arity, read, write};

const NAME: &str = "SimpleTransmission";

/// Single-actuator, single-joint gear reduction.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use jointspace_transmission::{SimpleTransmission, Transmission};
///
/// let t = SimpleTransmission::new(10.0, 0.5).unwrap();
/// let (a, j) = (Cell::new(20.0), Cell::new(0.0));
///
/// t.actuator_to_joint_position(&[&a], &[&j]);
/// assert_eq!(j.get(), 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleTransmission {
    reduction: f64,
    joint_offset: f64,
}

impl SimpleTransmission {
    /// # Errors
    ///
    /// Returns [`ControlError::TransmissionConfig`] when `reduction` is zero.
    pub fn new(reduction: f64, joint_offset: f64) -> Result<Self, ControlError> {
        if reduction == 0.0 {
            return Err(ControlError::TransmissionConfig(
                "transmission reduction ratio cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            reduction,
            joint_offset,
        })
    }

    pub fn reduction(&self) -> f64 {
        self.reduction
    }

    pub fn joint_offset(&self) -> f64 {
        self.joint_offset
    }
}

impl Transmission for SimpleTransmission {
    fn num_actuators(&self) -> usize {
        1
    }

    fn num_joints(&self) -> usize {
        1
    }

    fn actuator_to_joint_effort(&self, actuator_eff: &[&Cell<f64>], joint_eff: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "actuator_to_joint_effort",
            (1, actuator_eff.len()),
            (1, joint_eff.len()),
        );
        let [a] = read(actuator_eff);
        write(joint_eff, [a * self.reduction]);
    }

    fn actuator_to_joint_velocity(&self, actuator_vel: &[&Cell<f64>], joint_vel: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "actuator_to_joint_velocity",
            (1, actuator_vel.len()),
            (1, joint_vel.len()),
        );
        let [a] = read(actuator_vel);
        write(joint_vel, [a / self.reduction]);
    }

    fn actuator_to_joint_position(&self, actuator_pos: &[&Cell<f64>], joint_pos: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "actuator_to_joint_position",
            (1, actuator_pos.len()),
            (1, joint_pos.len()),
        );
        let [a] = read(actuator_pos);
        write(joint_pos, [a / self.reduction + self.joint_offset]);
    }

    fn joint_to_actuator_effort(&self, joint_eff: &[&Cell<f64>], actuator_eff: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "joint_to_actuator_effort",
            (1, actuator_eff.len()),
            (1, joint_eff.len()),
        );
        let [j] = read(joint_eff);
        write(actuator_eff, [j / self.reduction]);
    }

    fn joint_to_actuator_velocity(&self, joint_vel: &[&Cell<f64>], actuator_vel: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "joint_to_actuator_velocity",
            (1, actuator_vel.len()),
            (1, joint_vel.len()),
        );
        let [j] = read(joint_vel);
        write(actuator_vel, [j * self.reduction]);
    }

    fn joint_to_actuator_position(&self, joint_pos: &[&Cell<f64>], actuator_pos: &[&Cell<f64>]) {
        assert_arity(
            NAME,
            "joint_to_actuator_position",
            (1, actuator_pos.len()),
            (1, joint_pos.len()),
        );
        let [j] = read(joint_pos);
        write(actuator_pos, [(j - self.joint_offset) * self.reduction]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn zero_reduction_is_rejected() {
        assert!(matches!(
            SimpleTransmission::new(0.0, 0.0),
            Err(ControlError::TransmissionConfig(_))
        ));
        assert!(SimpleTransmission::new(-0.0, 1.0).is_err());
    }

    #[test]
    fn dimensions() {
        let t = SimpleTransmission::new(2.0, 0.0).unwrap();
        assert_eq!(t.num_actuators(), 1);
        assert_eq!(t.num_joints(), 1);
    }

    #[test]
    fn actuator_to_joint() {
        let t = SimpleTransmission::new(10.0, 1.0).unwrap();
        let (a, j) = (Cell::new(1.0), Cell::new(0.0));

        t.actuator_to_joint_effort(&[&a], &[&j]);
        assert!((j.get() - 10.0).abs() < EPS);

        t.actuator_to_joint_velocity(&[&a], &[&j]);
        assert!((j.get() - 0.1).abs() < EPS);

        t.actuator_to_joint_position(&[&a], &[&j]);
        assert!((j.get() - 1.1).abs() < EPS);
    }

    #[test]
    fn joint_to_actuator() {
        let t = SimpleTransmission::new(-10.0, 1.0).unwrap();
        let (j, a) = (Cell::new(2.0), Cell::new(0.0));

        t.joint_to_actuator_effort(&[&j], &[&a]);
        assert!((a.get() + 0.2).abs() < EPS);

        t.joint_to_actuator_velocity(&[&j], &[&a]);
        assert!((a.get() + 20.0).abs() < EPS);

        t.joint_to_actuator_position(&[&j], &[&a]);
        assert!((a.get() + 10.0).abs() < EPS);
    }

    #[test]
    fn in_place_position_conversion() {
        let t = SimpleTransmission::new(4.0, -0.5).unwrap();
        let x = Cell::new(8.0);
        t.actuator_to_joint_position(&[&x], &[&x]);
        assert!((x.get() - 1.5).abs() < EPS);
        t.joint_to_actuator_position(&[&x], &[&x]);
        assert!((x.get() - 8.0).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "SimpleTransmission::joint_to_actuator_velocity")]
    fn wrong_arity_panics() {
        let t = SimpleTransmission::new(1.0, 0.0).unwrap();
        let (a, b) = (Cell::new(0.0), Cell::new(0.0));
        t.joint_to_actuator_velocity(&[&a, &b], &[&a]);
    }
}
