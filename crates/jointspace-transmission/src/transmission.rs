//! The [`Transmission`] contract shared by every mechanism.
//!
//! A transmission converts effort, velocity and position between actuator
//! space and joint space.  Each conversion reads from one slice of raw
//! storage slots and writes to another.  Slot counts are fixed per variant;
//! passing slices of any other length is a wiring bug, and the conversion
//! panics instead of truncating.
//!
//! All variants read every input before writing any output, so an output
//! slot may alias an input slot.

use std::cell::Cell;

use jointspace_types::ControlError;

/// Kinematic mapping between actuator space and joint space.
///
/// Implementations are immutable after construction and perform no unit
/// conversion, clamping or filtering.
pub trait Transmission: std::fmt::Debug + Send + Sync {
    /// Number of actuator slots every conversion expects.
    fn num_actuators(&self) -> usize;

    /// Number of joint slots every conversion expects.
    fn num_joints(&self) -> usize;

    /// # Panics
    ///
    /// When `actuator_eff.len() != num_actuators()` or
    /// `joint_eff.len() != num_joints()`.
    fn actuator_to_joint_effort(&self, actuator_eff: &[&Cell<f64>], joint_eff: &[&Cell<f64>]);

    /// # Panics
    ///
    /// On slot count mismatch, as for
    /// [`actuator_to_joint_effort`][Transmission::actuator_to_joint_effort].
    fn actuator_to_joint_velocity(&self, actuator_vel: &[&Cell<f64>], joint_vel: &[&Cell<f64>]);

    /// # Panics
    ///
    /// On slot count mismatch.
    fn actuator_to_joint_position(&self, actuator_pos: &[&Cell<f64>], joint_pos: &[&Cell<f64>]);

    /// # Panics
    ///
    /// On slot count mismatch.
    fn joint_to_actuator_effort(&self, joint_eff: &[&Cell<f64>], actuator_eff: &[&Cell<f64>]);

    /// # Panics
    ///
    /// On slot count mismatch.
    fn joint_to_actuator_velocity(&self, joint_vel: &[&Cell<f64>], actuator_vel: &[&Cell<f64>]);

    /// # Panics
    ///
    /// On slot count mismatch.
    fn joint_to_actuator_position(&self, joint_pos: &[&Cell<f64>], actuator_pos: &[&Cell<f64>]);
}

/// Abort the offending call when slot counts do not match the variant.
#[track_caller]
pub(crate) fn assert_arity(
    variant: &str,
    operation: &str,
    (expected_actuators, actuators): (usize, usize),
    (expected_joints, joints): (usize, usize),
) {
    assert!(
        actuators == expected_actuators && joints == expected_joints,
        "{variant}::{operation}: expected {expected_actuators} actuator and \
         {expected_joints} joint slots, got {actuators} and {joints}"
    );
}

pub(crate) fn read<const N: usize>(slots: &[&Cell<f64>]) -> [f64; N] {
    std::array::from_fn(|i| slots[i].get())
}

pub(crate) fn write<const N: usize>(slots: &[&Cell<f64>], values: [f64; N]) {
    for (slot, value) in slots.iter().zip(values) {
        slot.set(value);
    }
}

/// Validate the parameters shared by the two-actuator, two-joint variants.
pub(crate) fn two_by_two(
    variant: &str,
    actuator_reduction: &[f64],
    joint_reduction: &[f64],
    joint_offset: &[f64],
) -> Result<([f64; 2], [f64; 2], [f64; 2]), ControlError> {
    let sized = |v: &[f64]| <[f64; 2]>::try_from(v).ok();
    let (Some(ar), Some(jr), Some(off)) = (
        sized(actuator_reduction),
        sized(joint_reduction),
        sized(joint_offset),
    ) else {
        return Err(ControlError::TransmissionConfig(format!(
            "reduction and offset vectors of a {variant} transmission must have size 2"
        )));
    };
    if ar.contains(&0.0) || jr.contains(&0.0) {
        return Err(ControlError::TransmissionConfig(
            "transmission reduction ratios cannot be zero".to_string(),
        ));
    }
    Ok((ar, jr, off))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_accepts_valid_parameters() {
        let (ar, jr, off) = two_by_two("test", &[1.0, -2.0], &[3.0, 4.0], &[0.5, 0.0]).unwrap();
        assert_eq!(ar, [1.0, -2.0]);
        assert_eq!(jr, [3.0, 4.0]);
        assert_eq!(off, [0.5, 0.0]);
    }

    #[test]
    fn two_by_two_rejects_wrong_sizes() {
        let err = two_by_two("test", &[1.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, ControlError::TransmissionConfig(_)));
        assert!(two_by_two("test", &[1.0, 1.0], &[1.0, 1.0], &[0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn two_by_two_rejects_zero_and_negative_zero() {
        assert!(two_by_two("test", &[0.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]).is_err());
        assert!(two_by_two("test", &[1.0, 1.0], &[1.0, -0.0], &[0.0, 0.0]).is_err());
    }

    #[test]
    fn read_then_write_roundtrips_slots() {
        let (a, b) = (Cell::new(1.0), Cell::new(2.0));
        let values: [f64; 2] = read(&[&a, &b]);
        write(&[&b, &a], values);
        assert_eq!((a.get(), b.get()), (2.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "expected 2 actuator and 2 joint slots, got 3 and 2")]
    fn arity_mismatch_panics_loudly() {
        assert_arity("Test", "op", (2, 3), (2, 2));
    }
}
