//! `jointspace-transmission` – Actuator ↔ Joint Space Transmissions
//!
//! Converts effort, velocity and position between the actuators a robot
//! drives and the joints a controller reasons about.
//!
//! # Modules
//!
//! - [`transmission`] – the [`Transmission`] trait every mechanism
//!   implements.
//! - [`simple`], [`differential`], [`four_bar`] – the concrete mechanisms.
//! - [`handle`] – [`TransmissionHandle`]: a transmission wired to raw
//!   storage slots, with a compile-time [`Mapping`][handle::Mapping] choosing
//!   direction and quantity.
//! - [`interface`] – [`TransmissionInterface`] registries, propagated once
//!   per control cycle.
//! - [`config`] – `[[transmission]]` TOML files.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use jointspace_transmission::{DifferentialTransmission, Transmission};
//!
//! let t = DifferentialTransmission::new(&[1.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap();
//! let a = [Cell::new(1.0), Cell::new(-1.0)];
//! let j = [Cell::new(0.0), Cell::new(0.0)];
//!
//! t.actuator_to_joint_position(&[&a[0], &a[1]], &[&j[0], &j[1]]);
//! assert_eq!((j[0].get(), j[1].get()), (0.0, 1.0));
//! ```

pub mod config;
pub mod differential;
pub mod four_bar;
pub mod handle;
pub mod interface;
pub mod simple;
pub mod transmission;

pub use config::{TransmissionConfig, TransmissionFile, TransmissionKind};
pub use differential::DifferentialTransmission;
pub use four_bar::FourBarLinkageTransmission;
pub use handle::{ActuatorData, Direction, JointData, Mapping, RawData, TransmissionHandle, convert};
pub use interface::{
    ActuatorToJointEffortInterface, ActuatorToJointPositionInterface,
    ActuatorToJointStateInterface, ActuatorToJointVelocityInterface,
    JointToActuatorEffortInterface, JointToActuatorPositionInterface,
    JointToActuatorStateInterface, JointToActuatorVelocityInterface, TransmissionInterface,
};
pub use simple::SimpleTransmission;
pub use transmission::Transmission;
