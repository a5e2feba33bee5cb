//! Concrete interface kinds and their registry aliases.
//!
//! | Interface | Handle | Claims |
//! |---|---|---|
//! | [`ActuatorStateInterface`] | [`ActuatorStateHandle`] | no |
//! | [`EffortActuatorInterface`] | [`ActuatorHandle`] | yes |
//! | [`VelocityActuatorInterface`] | [`ActuatorHandle`] | yes |
//! | [`PositionActuatorInterface`] | [`ActuatorHandle`] | yes |
//! | [`JointStateInterface`] | [`JointStateHandle`] | no |
//! | [`EffortJointInterface`] | [`JointHandle`] | yes |
//! | [`VelocityJointInterface`] | [`JointHandle`] | yes |
//! | [`PositionJointInterface`] | [`JointHandle`] | yes |

use crate::handle::{ActuatorHandle, ActuatorStateHandle, JointHandle, JointStateHandle};
use crate::interface::{CommandKind, HardwareInterface, InterfaceKind};

/// Zero-sized kind markers, one per concrete interface.
pub mod kind {
    use super::{CommandKind, InterfaceKind};

    pub struct ActuatorState;
    pub struct EffortActuator;
    pub struct VelocityActuator;
    pub struct PositionActuator;
    pub struct JointState;
    pub struct EffortJoint;
    pub struct VelocityJoint;
    pub struct PositionJoint;

    impl InterfaceKind for ActuatorState {
        const NAME: &'static str = "ActuatorStateInterface";
    }
    impl InterfaceKind for EffortActuator {
        const NAME: &'static str = "EffortActuatorInterface";
    }
    impl InterfaceKind for VelocityActuator {
        const NAME: &'static str = "VelocityActuatorInterface";
    }
    impl InterfaceKind for PositionActuator {
        const NAME: &'static str = "PositionActuatorInterface";
    }
    impl InterfaceKind for JointState {
        const NAME: &'static str = "JointStateInterface";
    }
    impl InterfaceKind for EffortJoint {
        const NAME: &'static str = "EffortJointInterface";
    }
    impl InterfaceKind for VelocityJoint {
        const NAME: &'static str = "VelocityJointInterface";
    }
    impl InterfaceKind for PositionJoint {
        const NAME: &'static str = "PositionJointInterface";
    }

    impl CommandKind for EffortActuator {}
    impl CommandKind for VelocityActuator {}
    impl CommandKind for PositionActuator {}
    impl CommandKind for EffortJoint {}
    impl CommandKind for VelocityJoint {}
    impl CommandKind for PositionJoint {}
}

pub type ActuatorStateInterface<'a> =
    HardwareInterface<ActuatorStateHandle<'a>, kind::ActuatorState>;
pub type EffortActuatorInterface<'a> = HardwareInterface<ActuatorHandle<'a>, kind::EffortActuator>;
pub type VelocityActuatorInterface<'a> =
    HardwareInterface<ActuatorHandle<'a>, kind::VelocityActuator>;
pub type PositionActuatorInterface<'a> =
    HardwareInterface<ActuatorHandle<'a>, kind::PositionActuator>;
pub type JointStateInterface<'a> = HardwareInterface<JointStateHandle<'a>, kind::JointState>;
pub type EffortJointInterface<'a> = HardwareInterface<JointHandle<'a>, kind::EffortJoint>;
pub type VelocityJointInterface<'a> = HardwareInterface<JointHandle<'a>, kind::VelocityJoint>;
pub type PositionJointInterface<'a> = HardwareInterface<JointHandle<'a>, kind::PositionJoint>;
