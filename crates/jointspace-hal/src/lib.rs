//! `jointspace-hal` – Handles and Interfaces
//!
//! Exposes raw actuator and joint memory to control algorithms through named
//! handles, grouped into typed interfaces, with exclusive claims over command
//! resources.
//!
//! # Modules
//!
//! - [`handle`] – [`StateHandle`][handle::StateHandle] and
//!   [`CommandHandle`][handle::CommandHandle]: non-owning, lifetime-checked
//!   views over `Cell<f64>` storage, in actuator or joint space.
//! - [`interface`] – [`HardwareInterface`][interface::HardwareInterface]:
//!   the name-keyed registry.  Whether resources can be claimed is decided by
//!   the interface kind at compile time.
//! - [`interfaces`] – the concrete state and command interface aliases
//!   ([`ActuatorStateInterface`][interfaces::ActuatorStateInterface],
//!   [`EffortJointInterface`][interfaces::EffortJointInterface], ...).
//! - [`claim`] – [`ResourceClaim`][claim::ResourceClaim]: scope-bound
//!   exclusive ownership of one command resource.
//! - [`sim`] – [`SimActuatorBank`][sim::SimActuatorBank]: an in-process
//!   driver that owns the storage arena and loops commands back into sensors.
//!
//! Everything here is single-threaded by construction: handles hold
//! `&Cell<f64>` and interfaces hold a `RefCell`, so neither is `Sync`.

pub mod claim;
pub mod handle;
pub mod interface;
pub mod interfaces;
pub mod sim;

pub use claim::ResourceClaim;
pub use handle::{
    ActuatorHandle, ActuatorSpace, ActuatorStateHandle, CommandHandle, JointHandle, JointSpace,
    JointStateHandle, ResourceHandle, Space, StateHandle,
};
pub use interface::{CommandKind, HardwareInterface, InterfaceKind};
pub use interfaces::{
    ActuatorStateInterface, EffortActuatorInterface, EffortJointInterface, JointStateInterface,
    PositionActuatorInterface, PositionJointInterface, VelocityActuatorInterface,
    VelocityJointInterface,
};
pub use sim::{CommandMode, SimActuatorBank};
