//! Named, non-owning views over raw actuator and joint memory.
//!
//! A handle binds a resource name to storage owned by a driver (see
//! [`SimActuatorBank`][crate::sim::SimActuatorBank]).  Storage is borrowed as
//! `&'a Cell<f64>`, so the borrow checker guarantees the backing memory
//! outlives every handle built over it, and handles stay confined to the one
//! real-time thread that owns the storage.
//!
//! Position and velocity are required bindings.  Effort is optional: a handle
//! built without it is valid, but [`StateHandle::effort`] fails with
//! [`ControlError::InvalidHandle`] instead of returning a stale or zero value.

use std::cell::Cell;
use std::marker::PhantomData;

use jointspace_types::{ControlError, Quantity};

/// Anything that can be stored in a
/// [`HardwareInterface`][crate::interface::HardwareInterface].
pub trait ResourceHandle {
    /// Resource name, unique within its owning interface.
    fn name(&self) -> &str;
}

/// Which side of a transmission a handle describes.
pub trait Space {
    /// Lower-case label used in diagnostics.
    const LABEL: &'static str;
}

/// Motor-side quantities, before any gear reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorSpace;

/// Degree-of-freedom quantities, after transmission effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointSpace;

impl Space for ActuatorSpace {
    const LABEL: &'static str = "actuator";
}

impl Space for JointSpace {
    const LABEL: &'static str = "joint";
}

/// Read-only actuator sensor handle.
pub type ActuatorStateHandle<'a> = StateHandle<'a, ActuatorSpace>;
/// Read-write actuator handle (state plus command).
pub type ActuatorHandle<'a> = CommandHandle<'a, ActuatorSpace>;
/// Read-only joint state handle.
pub type JointStateHandle<'a> = StateHandle<'a, JointSpace>;
/// Read-write joint handle (state plus command).
pub type JointHandle<'a> = CommandHandle<'a, JointSpace>;

fn require<'a, S: Space>(
    name: &str,
    quantity: Quantity,
    slot: Option<&'a Cell<f64>>,
) -> Result<&'a Cell<f64>, ControlError> {
    slot.ok_or_else(|| ControlError::InvalidHandle {
        name: name.to_string(),
        reason: format!("{} {quantity} storage is not bound", S::LABEL),
    })
}

fn same_slot(a: Option<&Cell<f64>>, b: Option<&Cell<f64>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// StateHandle
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only view of one named resource's position, velocity and (optionally)
/// effort.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use jointspace_hal::handle::ActuatorStateHandle;
///
/// let (pos, vel, eff) = (Cell::new(1.0), Cell::new(2.0), Cell::new(3.0));
/// let h = ActuatorStateHandle::new("motor_1", Some(&pos), Some(&vel), Some(&eff)).unwrap();
///
/// pos.set(1.5);
/// assert_eq!(h.position(), 1.5);
/// assert_eq!(h.effort().unwrap(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct StateHandle<'a, S> {
    name: String,
    position: &'a Cell<f64>,
    velocity: &'a Cell<f64>,
    effort: Option<&'a Cell<f64>>,
    _space: PhantomData<S>,
}

impl<'a, S: Space> StateHandle<'a, S> {
    /// Bind `name` to the given storage.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidHandle`] when `position` or `velocity`
    /// is `None`.
    pub fn new(
        name: impl Into<String>,
        position: Option<&'a Cell<f64>>,
        velocity: Option<&'a Cell<f64>>,
        effort: Option<&'a Cell<f64>>,
    ) -> Result<Self, ControlError> {
        let name = name.into();
        let position = require::<S>(&name, Quantity::Position, position)?;
        let velocity = require::<S>(&name, Quantity::Velocity, velocity)?;
        Ok(Self {
            name,
            position,
            velocity,
            effort,
            _space: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> f64 {
        self.position.get()
    }

    pub fn velocity(&self) -> f64 {
        self.velocity.get()
    }

    /// Current effort.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidHandle`] when the handle was built
    /// without effort storage.
    pub fn effort(&self) -> Result<f64, ControlError> {
        self.effort_slot()
            .map(Cell::get)
            .ok_or_else(|| ControlError::InvalidHandle {
                name: self.name.clone(),
                reason: format!("{} effort storage is not bound", S::LABEL),
            })
    }

    pub fn has_effort(&self) -> bool {
        self.effort.is_some()
    }

    /// Raw position storage, for wiring into a transmission.
    pub fn position_slot(&self) -> &'a Cell<f64> {
        self.position
    }

    /// Raw velocity storage, for wiring into a transmission.
    pub fn velocity_slot(&self) -> &'a Cell<f64> {
        self.velocity
    }

    /// Raw effort storage, if bound.
    pub fn effort_slot(&self) -> Option<&'a Cell<f64>> {
        self.effort
    }
}

impl<S> PartialEq for StateHandle<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && std::ptr::eq(self.position, other.position)
            && std::ptr::eq(self.velocity, other.velocity)
            && same_slot(self.effort, other.effort)
    }
}

impl<S> ResourceHandle for StateHandle<'_, S> {
    fn name(&self) -> &str {
        &self.name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CommandHandle
// ─────────────────────────────────────────────────────────────────────────────

/// A [`StateHandle`] plus one write-through command slot.
#[derive(Debug, Clone)]
pub struct CommandHandle<'a, S> {
    state: StateHandle<'a, S>,
    command: &'a Cell<f64>,
}

impl<'a, S: Space> CommandHandle<'a, S> {
    /// Extend `state` with command storage.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidHandle`] when `command` is `None`.
    pub fn new(
        state: StateHandle<'a, S>,
        command: Option<&'a Cell<f64>>,
    ) -> Result<Self, ControlError> {
        let command = require::<S>(state.name(), Quantity::Command, command)?;
        Ok(Self { state, command })
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// The read-only part of this handle.
    pub fn state(&self) -> &StateHandle<'a, S> {
        &self.state
    }

    pub fn position(&self) -> f64 {
        self.state.position()
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity()
    }

    /// See [`StateHandle::effort`].
    pub fn effort(&self) -> Result<f64, ControlError> {
        self.state.effort()
    }

    /// Write `value` through to the bound command storage.
    pub fn set_command(&self, value: f64) {
        self.command.set(value);
    }

    /// Last value written to the command storage.
    pub fn command(&self) -> f64 {
        self.command.get()
    }

    /// Raw command storage, for wiring into a transmission.
    pub fn command_slot(&self) -> &'a Cell<f64> {
        self.command
    }
}

impl<S> PartialEq for CommandHandle<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && std::ptr::eq(self.command, other.command)
    }
}

impl<S> ResourceHandle for CommandHandle<'_, S> {
    fn name(&self) -> &str {
        self.state.name()
    }
}
