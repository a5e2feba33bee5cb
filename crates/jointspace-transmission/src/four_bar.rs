//! [`FourBarLinkageTransmission`] – two actuators driving two serially
//! coupled joints through a four-bar linkage.
//!
//! The first actuator drives the first joint directly.  The second actuator
//! drives the second joint through a linkage anchored on the first joint's
//! output, so motion of joint 1 is seen by joint 2 and has to be compensated.
//!
//! ```text
//! actuator → joint                              joint → actuator
//! τj1 = nj1 · na1 · τa1                         τa1 = τj1 / (nj1 · na1)
//! τj2 = nj2 · (na2 · τa2 − nj1 · na1 · τa1)     τa2 = (τj1 + τj2 / nj2) / na2
//!
//! ẋj1 = ẋa1 / (nj1 · na1)                       ẋa1 = ẋj1 · nj1 · na1
//! ẋj2 = (ẋa2 / na2 − ẋa1 / (nj1 · na1)) / nj2   ẋa2 = (ẋj1 + ẋj2 · nj2) · na2
//! ```
//!
//! Positions follow the velocity map, with `x_off` added on the way to joint
//! space and removed on the way back.  No reduction ratio may be zero.

use std::cell::Cell;

use jointspace_types::ControlError;

use crate::transmission::{Transmission, assert_arity, read, two_by_two, write};

const NAME: &str = "FourBarLinkageTransmission";

/// Two-actuator, two-joint four-bar-linkage coupling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourBarLinkageTransmission {
    actuator_reduction: [f64; 2],
    joint_reduction: [f64; 2],
    joint_offset: [f64; 2],
}

impl FourBarLinkageTransmission {
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
            two_by_two("four-bar linkage", actuator_reduction, joint_reduction, joint_offset)?;
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
        let j1 = a1 / (jr1 * ar1);
        [j1, (a2 / ar2 - j1) / jr2]
    }

    fn flow_to_actuator(&self, [j1, j2]: [f64; 2]) -> [f64; 2] {
        let [ar1, ar2] = self.actuator_reduction;
        let [jr1, jr2] = self.joint_reduction;
        [j1 * jr1 * ar1, (j1 + j2 * jr2) * ar2]
    }
}

impl Transmission for FourBarLinkageTransmission {
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
        let j1 = jr1 * ar1 * a1;
        write(joint_eff, [j1, jr2 * (ar2 * a2 - j1)]);
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
        write(actuator_eff, [j1 / (jr1 * ar1), (j1 + j2 / jr2) / ar2]);
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
