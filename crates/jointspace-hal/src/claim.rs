//! [`ResourceClaim`] – exclusive ownership token over one command resource.
//!
//! Claims are created only by
//! [`HardwareInterface::claim`][crate::interface::HardwareInterface::claim].
//! A claim borrows its interface's claim set, so an interface cannot be
//! dropped while one of its claims is alive.  The name is removed from the
//! set on [`ResourceClaim::release`] or when the claim goes out of scope,
//! whichever happens first.

use std::cell::RefCell;
use std::collections::BTreeSet;

use jointspace_types::ControlError;
use tracing::{debug, warn};

/// Scope-bound exclusive claim on a named command resource.
#[derive(Debug)]
pub struct ResourceClaim<'r> {
    interface: &'static str,
    name: String,
    claims: &'r RefCell<BTreeSet<String>>,
    released: bool,
}

impl<'r> ResourceClaim<'r> {
    pub(crate) fn acquire(
        interface: &'static str,
        name: &str,
        claims: &'r RefCell<BTreeSet<String>>,
    ) -> Result<Self, ControlError> {
        if !claims.borrow_mut().insert(name.to_string()) {
            warn!(interface, resource = name, "resource is already claimed");
            return Err(ControlError::ResourceAlreadyClaimed {
                interface: interface.to_string(),
                name: name.to_string(),
            });
        }
        debug!(interface, resource = name, "claimed resource");
        Ok(Self {
            interface,
            name: name.to_string(),
            claims,
            released: false,
        })
    }

    /// Name of the claimed resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concrete name of the interface that issued this claim.
    pub fn interface(&self) -> &'static str {
        self.interface
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Give the resource back.  Calling this more than once is a no-op.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.claims.borrow_mut().remove(&self.name);
        self.released = true;
        debug!(
            interface = self.interface,
            resource = %self.name,
            "released resource"
        );
    }
}

impl Drop for ResourceClaim<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
