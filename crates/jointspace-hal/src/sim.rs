//! [`SimActuatorBank`] – in-process driver that owns raw actuator memory.
//!
//! The bank is the storage arena every actuator handle points into.  Handles
//! borrow the bank, so it must outlive every interface they are registered
//! with.  [`SimActuatorBank::step`] stands in for hardware I/O: it consumes the
//! command slots and updates the sensor slots with a trivial loopback model,
//! which is enough to run full read → transform → compute → transform → write
//! cycles in tests without physical hardware.
//!
//! # Loopback model
//!
//! | [`CommandMode`] | Effect of `step(dt)` |
//! |---|---|
//! | `Position` | `position = command`, `velocity = Δposition / dt` |
//! | `Velocity` | `velocity = command`, `position += command · dt` |
//! | `Effort`   | `effort = command` |
//!
//! # Example
//!
//! ```rust
//! use jointspace_hal::interfaces::{ActuatorStateInterface, PositionActuatorInterface};
//! use jointspace_hal::sim::{CommandMode, SimActuatorBank};
//!
//! let bank = SimActuatorBank::builder()
//!     .with_actuator("motor_1")
//!     .with_mode(CommandMode::Position)
//!     .build();
//!
//! let mut state = ActuatorStateInterface::new();
//! let mut command = PositionActuatorInterface::new();
//! bank.register_state(&mut state).unwrap();
//! bank.register_commands(&mut command).unwrap();
//!
//! let (handle, _claim) = command.claim_handle("motor_1").unwrap();
//! handle.set_command(0.25);
//! bank.step(0.01);
//! assert_eq!(state.get_handle("motor_1").unwrap().position(), 0.25);
//! ```

use std::cell::Cell;

use jointspace_types::ControlError;
use tracing::debug;

use crate::handle::{ActuatorHandle, ActuatorStateHandle};
use crate::interface::{CommandKind, HardwareInterface};
use crate::interfaces::ActuatorStateInterface;

/// How the simulated hardware interprets the command slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandMode {
    #[default]
    Position,
    Velocity,
    Effort,
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw slots
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct SimActuator {
    name: String,
    position: Cell<f64>,
    velocity: Cell<f64>,
    effort: Cell<f64>,
    command: Cell<f64>,
}

impl SimActuator {
    fn new(name: String) -> Self {
        Self {
            name,
            position: Cell::new(0.0),
            velocity: Cell::new(0.0),
            effort: Cell::new(0.0),
            command: Cell::new(0.0),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for [`SimActuatorBank`].
#[derive(Default)]
pub struct SimActuatorBankBuilder {
    names: Vec<String>,
    mode: CommandMode,
}

impl SimActuatorBankBuilder {
    /// Add a simulated actuator.  Duplicate names are collapsed.
    pub fn with_actuator(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        self
    }

    pub fn with_mode(mut self, mode: CommandMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> SimActuatorBank {
        SimActuatorBank {
            actuators: self.names.into_iter().map(SimActuator::new).collect(),
            mode: self.mode,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SimActuatorBank
// ─────────────────────────────────────────────────────────────────────────────

/// Owns position, velocity, effort and command storage for a set of named
/// actuators.
#[derive(Debug)]
pub struct SimActuatorBank {
    actuators: Vec<SimActuator>,
    mode: CommandMode,
}

impl SimActuatorBank {
    pub fn builder() -> SimActuatorBankBuilder {
        SimActuatorBankBuilder::default()
    }

    pub fn mode(&self) -> CommandMode {
        self.mode
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actuators.iter().map(|a| a.name.as_str())
    }

    fn find(&self, name: &str) -> Result<&SimActuator, ControlError> {
        self.actuators
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| ControlError::ResourceNotFound {
                interface: "SimActuatorBank".to_string(),
                name: name.to_string(),
            })
    }

    /// Read-only handle over `name`'s sensor slots.
    pub fn state_handle(&self, name: &str) -> Result<ActuatorStateHandle<'_>, ControlError> {
        let a = self.find(name)?;
        ActuatorStateHandle::new(
            a.name.clone(),
            Some(&a.position),
            Some(&a.velocity),
            Some(&a.effort),
        )
    }

    /// Read-write handle over `name`'s sensor and command slots.
    pub fn command_handle(&self, name: &str) -> Result<ActuatorHandle<'_>, ControlError> {
        let a = self.find(name)?;
        ActuatorHandle::new(self.state_handle(name)?, Some(&a.command))
    }

    /// Register a state handle for every actuator.
    pub fn register_state<'a>(
        &'a self,
        iface: &mut ActuatorStateInterface<'a>,
    ) -> Result<(), ControlError> {
        for name in self.names() {
            iface.register_handle(self.state_handle(name)?)?;
        }
        debug!(
            interface = iface.interface_name(),
            count = self.actuators.len(),
            "registered sim actuators"
        );
        Ok(())
    }

    /// Register a command handle for every actuator with any actuator command
    /// interface.
    pub fn register_commands<'a, K: CommandKind>(
        &'a self,
        iface: &mut HardwareInterface<ActuatorHandle<'a>, K>,
    ) -> Result<(), ControlError> {
        for name in self.names() {
            iface.register_handle(self.command_handle(name)?)?;
        }
        debug!(
            interface = iface.interface_name(),
            count = self.actuators.len(),
            "registered sim actuators"
        );
        Ok(())
    }

    /// Overwrite the sensor slots of `name`, as a hardware read would.
    pub fn write_state(
        &self,
        name: &str,
        position: f64,
        velocity: f64,
        effort: f64,
    ) -> Result<(), ControlError> {
        let a = self.find(name)?;
        a.position.set(position);
        a.velocity.set(velocity);
        a.effort.set(effort);
        Ok(())
    }

    /// Last command written to `name`, as a hardware write would read it.
    pub fn command(&self, name: &str) -> Result<f64, ControlError> {
        Ok(self.find(name)?.command.get())
    }

    /// Apply every pending command to the simulated sensors.
    ///
    /// Non-positive `dt` leaves position-derived velocity and velocity
    /// integration untouched.
    pub fn step(&self, dt: f64) {
        for a in &self.actuators {
            let cmd = a.command.get();
            match self.mode {
                CommandMode::Position => {
                    if dt > 0.0 {
                        a.velocity.set((cmd - a.position.get()) / dt);
                    }
                    a.position.set(cmd);
                }
                CommandMode::Velocity => {
                    a.velocity.set(cmd);
                    if dt > 0.0 {
                        a.position.set(a.position.get() + cmd * dt);
                    }
                }
                CommandMode::Effort => a.effort.set(cmd),
            }
        }
    }
}
