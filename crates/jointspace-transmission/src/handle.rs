//! Transmission handles: a transmission bound to the raw slots it converts.
//!
//! A [`TransmissionHandle`] pairs one [`Transmission`] with an
//! [`ActuatorData`] and a [`JointData`] set of slots, and a [`Mapping`] that
//! fixes which conversions [`TransmissionHandle::propagate`] runs.  All slot
//! counts are validated once at construction, so propagation in the control
//! loop never trips the transmission's arity check.

use std::cell::Cell;
use std::marker::PhantomData;

use jointspace_hal::{CommandHandle, InterfaceKind, ResourceHandle, Space, StateHandle};
use jointspace_types::{ControlError, Quantity};

use crate::transmission::Transmission;

/// Raw position, velocity and effort slots on one side of a transmission.
///
/// Each vector is either empty (quantity not mapped) or holds one slot per
/// actuator or joint.
#[derive(Debug, Clone, Default)]
pub struct RawData<'a> {
    pub position: Vec<&'a Cell<f64>>,
    pub velocity: Vec<&'a Cell<f64>>,
    pub effort: Vec<&'a Cell<f64>>,
}

/// Actuator-side slots.
pub type ActuatorData<'a> = RawData<'a>;
/// Joint-side slots.
pub type JointData<'a> = RawData<'a>;

impl<'a> RawData<'a> {
    /// Sensor slots of `handles`, in order.  Effort is mapped only when every
    /// handle has it bound.
    pub fn from_states<S: Space>(handles: &[StateHandle<'a, S>]) -> Self {
        let effort = handles
            .iter()
            .map(StateHandle::effort_slot)
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default();
        Self {
            position: handles.iter().map(StateHandle::position_slot).collect(),
            velocity: handles.iter().map(StateHandle::velocity_slot).collect(),
            effort,
        }
    }

    /// Command slots of `handles`, in order, mapped as `quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::TransmissionConfig`] when `quantity` is
    /// [`Quantity::Command`], which is not a transmitted quantity.
    pub fn from_commands<S: Space>(
        handles: &[CommandHandle<'a, S>],
        quantity: Quantity,
    ) -> Result<Self, ControlError> {
        let slots: Vec<_> = handles.iter().map(CommandHandle::command_slot).collect();
        let mut data = Self::default();
        *data.slots_mut(quantity)? = slots;
        Ok(data)
    }

    /// Slots mapped for `quantity`.  Empty for [`Quantity::Command`].
    pub fn slots(&self, quantity: Quantity) -> &[&'a Cell<f64>] {
        match quantity {
            Quantity::Position => &self.position,
            Quantity::Velocity => &self.velocity,
            Quantity::Effort => &self.effort,
            Quantity::Command => &[],
        }
    }

    fn slots_mut(&mut self, quantity: Quantity) -> Result<&mut Vec<&'a Cell<f64>>, ControlError> {
        match quantity {
            Quantity::Position => Ok(&mut self.position),
            Quantity::Velocity => Ok(&mut self.velocity),
            Quantity::Effort => Ok(&mut self.effort),
            Quantity::Command => Err(ControlError::TransmissionConfig(
                "command is not a transmitted quantity".to_string(),
            )),
        }
    }

    fn is_empty(&self) -> bool {
        self.position.is_empty() && self.velocity.is_empty() && self.effort.is_empty()
    }

    fn same_slots(&self, other: &Self) -> bool {
        fn eq(a: &[&Cell<f64>], b: &[&Cell<f64>]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| std::ptr::eq(*x, *y))
        }
        eq(&self.position, &other.position)
            && eq(&self.velocity, &other.velocity)
            && eq(&self.effort, &other.effort)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mappings
// ─────────────────────────────────────────────────────────────────────────────

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ActuatorToJoint,
    JointToActuator,
}

const TRANSMITTED: [Quantity; 3] = [Quantity::Position, Quantity::Velocity, Quantity::Effort];

/// Selects the conversions a [`TransmissionHandle`] runs, and names the
/// interface such handles are registered with.
pub trait Mapping: InterfaceKind {
    const DIRECTION: Direction;
    /// The single quantity carried, or `None` for every mapped quantity.
    const QUANTITY: Option<Quantity>;
}

/// Zero-sized mapping markers.
pub mod mapping {
    use jointspace_hal::InterfaceKind;
    use jointspace_types::Quantity;

    use super::{Direction, Mapping};

    pub struct ActuatorToJointState;
    pub struct ActuatorToJointPosition;
    pub struct ActuatorToJointVelocity;
    pub struct ActuatorToJointEffort;
    pub struct JointToActuatorState;
    pub struct JointToActuatorPosition;
    pub struct JointToActuatorVelocity;
    pub struct JointToActuatorEffort;

    impl InterfaceKind for ActuatorToJointState {
        const NAME: &'static str = "ActuatorToJointStateInterface";
    }
    impl Mapping for ActuatorToJointState {
        const DIRECTION: Direction = Direction::ActuatorToJoint;
        const QUANTITY: Option<Quantity> = None;
    }

    impl InterfaceKind for ActuatorToJointPosition {
        const NAME: &'static str = "ActuatorToJointPositionInterface";
    }
    impl Mapping for ActuatorToJointPosition {
        const DIRECTION: Direction = Direction::ActuatorToJoint;
        const QUANTITY: Option<Quantity> = Some(Quantity::Position);
    }

    impl InterfaceKind for ActuatorToJointVelocity {
        const NAME: &'static str = "ActuatorToJointVelocityInterface";
    }
    impl Mapping for ActuatorToJointVelocity {
        const DIRECTION: Direction = Direction::ActuatorToJoint;
        const QUANTITY: Option<Quantity> = Some(Quantity::Velocity);
    }

    impl InterfaceKind for ActuatorToJointEffort {
        const NAME: &'static str = "ActuatorToJointEffortInterface";
    }
    impl Mapping for ActuatorToJointEffort {
        const DIRECTION: Direction = Direction::ActuatorToJoint;
        const QUANTITY: Option<Quantity> = Some(Quantity::Effort);
    }

    impl InterfaceKind for JointToActuatorState {
        const NAME: &'static str = "JointToActuatorStateInterface";
    }
    impl Mapping for JointToActuatorState {
        const DIRECTION: Direction = Direction::JointToActuator;
        const QUANTITY: Option<Quantity> = None;
    }

    impl InterfaceKind for JointToActuatorPosition {
        const NAME: &'static str = "JointToActuatorPositionInterface";
    }
    impl Mapping for JointToActuatorPosition {
        const DIRECTION: Direction = Direction::JointToActuator;
        const QUANTITY: Option<Quantity> = Some(Quantity::Position);
    }

    impl InterfaceKind for JointToActuatorVelocity {
        const NAME: &'static str = "JointToActuatorVelocityInterface";
    }
    impl Mapping for JointToActuatorVelocity {
        const DIRECTION: Direction = Direction::JointToActuator;
        const QUANTITY: Option<Quantity> = Some(Quantity::Velocity);
    }

    impl InterfaceKind for JointToActuatorEffort {
        const NAME: &'static str = "JointToActuatorEffortInterface";
    }
    impl Mapping for JointToActuatorEffort {
        const DIRECTION: Direction = Direction::JointToActuator;
        const QUANTITY: Option<Quantity> = Some(Quantity::Effort);
    }
}

/// Run one conversion of `quantity` in `direction`.
///
/// # Panics
///
/// When `quantity` is [`Quantity::Command`], or on slot count mismatch.
#[track_caller]
pub fn convert(
    transmission: &dyn Transmission,
    direction: Direction,
    quantity: Quantity,
    actuator: &[&Cell<f64>],
    joint: &[&Cell<f64>],
) {
    use Direction::*;
    match (direction, quantity) {
        (ActuatorToJoint, Quantity::Position) => {
            transmission.actuator_to_joint_position(actuator, joint)
        }
        (ActuatorToJoint, Quantity::Velocity) => {
            transmission.actuator_to_joint_velocity(actuator, joint)
        }
        (ActuatorToJoint, Quantity::Effort) => {
            transmission.actuator_to_joint_effort(actuator, joint)
        }
        (JointToActuator, Quantity::Position) => {
            transmission.joint_to_actuator_position(joint, actuator)
        }
        (JointToActuator, Quantity::Velocity) => {
            transmission.joint_to_actuator_velocity(joint, actuator)
        }
        (JointToActuator, Quantity::Effort) => {
            transmission.joint_to_actuator_effort(joint, actuator)
        }
        (_, Quantity::Command) => panic!("convert: {quantity} is not a transmitted quantity"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TransmissionHandle
// ─────────────────────────────────────────────────────────────────────────────

/// A named transmission wired to the slots it converts.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use jointspace_transmission::handle::{RawData, TransmissionHandle, mapping};
/// use jointspace_transmission::SimpleTransmission;
///
/// let t = SimpleTransmission::new(10.0, 0.0).unwrap();
/// let (a_pos, j_pos) = (Cell::new(5.0), Cell::new(0.0));
///
/// let h = TransmissionHandle::<mapping::ActuatorToJointState>::new(
///     "wrist",
///     &t,
///     RawData { position: vec![&a_pos], ..Default::default() },
///     RawData { position: vec![&j_pos], ..Default::default() },
/// )
/// .unwrap();
///
/// h.propagate();
/// assert_eq!(j_pos.get(), 0.5);
/// ```
pub struct TransmissionHandle<'a, 't, M> {
    name: String,
    transmission: &'t dyn Transmission,
    actuator: ActuatorData<'a>,
    joint: JointData<'a>,
    _mapping: PhantomData<M>,
}

impl<'a, 't, M: Mapping> TransmissionHandle<'a, 't, M> {
    /// # Errors
    ///
    /// Returns [`ControlError::TransmissionConfig`] when:
    /// - `name` is empty,
    /// - no quantity is mapped, or the mapping's single quantity is missing,
    /// - a quantity is mapped on one side only,
    /// - any slot vector does not match the transmission's actuator or joint
    ///   count.
    pub fn new(
        name: impl Into<String>,
        transmission: &'t dyn Transmission,
        actuator: ActuatorData<'a>,
        joint: JointData<'a>,
    ) -> Result<Self, ControlError> {
        let name = name.into();
        let fail = |reason: String| {
            Err(ControlError::TransmissionConfig(format!(
                "{} handle '{name}': {reason}",
                M::NAME
            )))
        };

        if name.is_empty() {
            return fail("name cannot be empty".to_string());
        }
        if actuator.is_empty() || joint.is_empty() {
            return fail("no data vectors were specified".to_string());
        }
        if let Some(q) = M::QUANTITY {
            if actuator.slots(q).is_empty() || joint.slots(q).is_empty() {
                return fail(format!("{q} data is required on both sides"));
            }
        }
        for q in TRANSMITTED {
            let (a, j) = (actuator.slots(q).len(), joint.slots(q).len());
            if (a == 0) != (j == 0) {
                return fail(format!("{q} data is mapped on one side only"));
            }
            if a != 0 && a != transmission.num_actuators() {
                return fail(format!(
                    "{q} actuator data has {a} entries, transmission expects {}",
                    transmission.num_actuators()
                ));
            }
            if j != 0 && j != transmission.num_joints() {
                return fail(format!(
                    "{q} joint data has {j} entries, transmission expects {}",
                    transmission.num_joints()
                ));
            }
        }

        Ok(Self {
            name,
            transmission,
            actuator,
            joint,
            _mapping: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transmission(&self) -> &'t dyn Transmission {
        self.transmission
    }

    pub fn actuator_data(&self) -> &ActuatorData<'a> {
        &self.actuator
    }

    pub fn joint_data(&self) -> &JointData<'a> {
        &self.joint
    }

    /// Run this handle's conversions.  Position is converted before velocity
    /// and effort.
    pub fn propagate(&self) {
        let single = M::QUANTITY;
        let quantities: &[Quantity] = match &single {
            Some(q) => std::slice::from_ref(q),
            None => &TRANSMITTED,
        };
        for &q in quantities {
            let (a, j) = (self.actuator.slots(q), self.joint.slots(q));
            if !a.is_empty() {
                convert(self.transmission, M::DIRECTION, q, a, j);
            }
        }
    }
}

impl<M> Clone for TransmissionHandle<'_, '_, M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transmission: self.transmission,
            actuator: self.actuator.clone(),
            joint: self.joint.clone(),
            _mapping: PhantomData,
        }
    }
}

impl<M> std::fmt::Debug for TransmissionHandle<'_, '_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransmissionHandle")
            .field("name", &self.name)
            .field("transmission", &self.transmission)
            .field("actuator", &self.actuator)
            .field("joint", &self.joint)
            .finish()
    }
}

impl<M> PartialEq for TransmissionHandle<'_, '_, M> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && std::ptr::addr_eq(self.transmission, other.transmission)
            && self.actuator.same_slots(&other.actuator)
            && self.joint.same_slots(&other.joint)
    }
}

impl<M> ResourceHandle for TransmissionHandle<'_, '_, M> {
    fn name(&self) -> &str {
        &self.name
    }
}
