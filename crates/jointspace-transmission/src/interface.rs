//! [`TransmissionInterface`] – registry of transmission handles sharing one
//! mapping, propagated together once per control cycle.

use jointspace_hal::HardwareInterface;
use jointspace_types::ControlError;
use tracing::trace;

use crate::handle::{Mapping, TransmissionHandle, mapping};

/// Name-keyed set of [`TransmissionHandle`]s for mapping `M`.
///
/// Transmission resources are never claimed; the interface only groups
/// handles so that one [`propagate`](TransmissionInterface::propagate) call
/// runs every registered conversion.
pub struct TransmissionInterface<'a, 't, M: Mapping> {
    inner: HardwareInterface<TransmissionHandle<'a, 't, M>, M>,
}

impl<M: Mapping> Default for TransmissionInterface<'_, '_, M> {
    fn default() -> Self {
        Self {
            inner: HardwareInterface::new(),
        }
    }
}

impl<'a, 't, M: Mapping> TransmissionInterface<'a, 't, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete interface type name, e.g. `"ActuatorToJointStateInterface"`.
    pub fn interface_name(&self) -> &'static str {
        M::NAME
    }

    /// # Errors
    ///
    /// Returns [`ControlError::DuplicateResource`] when a different handle is
    /// already registered under the same name.
    pub fn register_handle(
        &mut self,
        handle: TransmissionHandle<'a, 't, M>,
    ) -> Result<(), ControlError> {
        self.inner.register_handle(handle)
    }

    /// # Errors
    ///
    /// Returns [`ControlError::ResourceNotFound`] when `name` is not
    /// registered.
    pub fn get_handle(&self, name: &str) -> Result<TransmissionHandle<'a, 't, M>, ControlError> {
        self.inner.get_handle(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    pub fn handles(&self) -> impl Iterator<Item = &TransmissionHandle<'a, 't, M>> {
        self.inner.handles()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Propagate every registered handle.  Order across handles is
    /// unspecified; handles must not share output slots.
    pub fn propagate(&self) {
        for handle in self.inner.handles() {
            trace!(interface = M::NAME, transmission = handle.name(), "propagate");
            handle.propagate();
        }
    }
}

pub type ActuatorToJointStateInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::ActuatorToJointState>;
pub type ActuatorToJointPositionInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::ActuatorToJointPosition>;
pub type ActuatorToJointVelocityInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::ActuatorToJointVelocity>;
pub type ActuatorToJointEffortInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::ActuatorToJointEffort>;
pub type JointToActuatorStateInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::JointToActuatorState>;
pub type JointToActuatorPositionInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::JointToActuatorPosition>;
pub type JointToActuatorVelocityInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::JointToActuatorVelocity>;
pub type JointToActuatorEffortInterface<'a, 't> =
    TransmissionInterface<'a, 't, mapping::JointToActuatorEffort>;
