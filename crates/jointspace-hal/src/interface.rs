//! [`HardwareInterface`] – typed, name-keyed registry of handles.
//!
//! One interface exists per kind of resource (actuator state, joint effort
//! command, ...).  The kind parameter `K` carries the concrete interface name
//! used in every diagnostic, and decides at the type level whether resources
//! can be claimed: [`HardwareInterface::claim`] only exists when
//! `K: CommandKind`.  State interfaces therefore never populate their claim
//! set.
//!
//! # Registration policy
//!
//! Registering a handle equal to the one already stored under its name is a
//! no-op.  Registering a *different* handle under a taken name is rejected
//! with [`ControlError::DuplicateResource`].

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;

use jointspace_types::ControlError;
use tracing::{debug, error, warn};

use crate::claim::ResourceClaim;
use crate::handle::ResourceHandle;

/// Compile-time description of one interface kind.
pub trait InterfaceKind {
    /// Concrete interface type name, e.g. `"EffortJointInterface"`.
    const NAME: &'static str;
}

/// Marker for interfaces whose resources are exclusively claimed by a single
/// controller at a time.
pub trait CommandKind: InterfaceKind {}

/// Name-keyed handle registry for one interface kind.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use jointspace_hal::handle::ActuatorStateHandle;
/// use jointspace_hal::interfaces::ActuatorStateInterface;
///
/// let (pos, vel) = (Cell::new(0.5), Cell::new(0.0));
/// let mut iface = ActuatorStateInterface::new();
/// iface
///     .register_handle(ActuatorStateHandle::new("motor", Some(&pos), Some(&vel), None).unwrap())
///     .unwrap();
///
/// assert_eq!(iface.get_handle("motor").unwrap().position(), 0.5);
/// assert!(iface.get_handle("absent").is_err());
/// assert!(iface.claims().is_empty());
/// ```
pub struct HardwareInterface<H, K: InterfaceKind> {
    resources: HashMap<String, H>,
    claims: RefCell<BTreeSet<String>>,
    _kind: PhantomData<K>,
}

impl<H, K: InterfaceKind> Default for HardwareInterface<H, K> {
    fn default() -> Self {
        Self {
            resources: HashMap::new(),
            claims: RefCell::new(BTreeSet::new()),
            _kind: PhantomData,
        }
    }
}

impl<H, K: InterfaceKind> HardwareInterface<H, K> {
    /// Create an empty interface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete interface type name.
    pub fn interface_name(&self) -> &'static str {
        K::NAME
    }

    /// Names of all registered resources.  Order is unspecified.
    pub fn names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    /// Iterate over the registered handles.  Order is unspecified.
    pub fn handles(&self) -> impl Iterator<Item = &H> {
        self.resources.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Names currently claimed.  Always empty for state interfaces.
    pub fn claims(&self) -> BTreeSet<String> {
        self.claims.borrow().clone()
    }

    fn not_found(&self, name: &str) -> ControlError {
        ControlError::ResourceNotFound {
            interface: K::NAME.to_string(),
            name: name.to_string(),
        }
    }
}

impl<H: ResourceHandle + PartialEq, K: InterfaceKind> HardwareInterface<H, K> {
    /// Register `handle` under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::DuplicateResource`] when a different handle is
    /// already registered under the same name.
    pub fn register_handle(&mut self, handle: H) -> Result<(), ControlError> {
        if let Some(existing) = self.resources.get(handle.name()) {
            if *existing == handle {
                return Ok(());
            }
            warn!(
                interface = K::NAME,
                resource = handle.name(),
                "rejected conflicting registration"
            );
            return Err(ControlError::DuplicateResource {
                interface: K::NAME.to_string(),
                name: handle.name().to_string(),
            });
        }
        debug!(interface = K::NAME, resource = handle.name(), "registered handle");
        self.resources.insert(handle.name().to_string(), handle);
        Ok(())
    }
}

impl<H: Clone, K: InterfaceKind> HardwareInterface<H, K> {
    /// Resolve `name` to a copy of its handle.  Does not claim the resource.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::ResourceNotFound`] naming this interface's
    /// concrete type when `name` is not registered.
    pub fn get_handle(&self, name: &str) -> Result<H, ControlError> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| self.not_found(name))
    }
}

impl<H, K: CommandKind> HardwareInterface<H, K> {
    /// Claim exclusive use of the command resource `name`.
    ///
    /// The claim is released when the returned [`ResourceClaim`] is dropped
    /// or explicitly released.
    ///
    /// # Errors
    ///
    /// - [`ControlError::ResourceNotFound`] when `name` is not registered.
    /// - [`ControlError::ResourceAlreadyClaimed`] while another claim on
    ///   `name` is live.
    pub fn claim(&self, name: &str) -> Result<ResourceClaim<'_>, ControlError> {
        if !self.resources.contains_key(name) {
            return Err(self.not_found(name));
        }
        ResourceClaim::acquire(K::NAME, name, &self.claims)
    }
}

impl<H: Clone, K: CommandKind> HardwareInterface<H, K> {
    /// Look up `name` and claim it in one step.
    ///
    /// # Errors
    ///
    /// Same as [`HardwareInterface::claim`].
    pub fn claim_handle(&self, name: &str) -> Result<(H, ResourceClaim<'_>), ControlError> {
        let claim = self.claim(name)?;
        let handle = self.get_handle(name)?;
        Ok((handle, claim))
    }
}

impl<H, K: InterfaceKind> Drop for HardwareInterface<H, K> {
    fn drop(&mut self) {
        let leaked = self.claims.get_mut();
        if !leaked.is_empty() {
            error!(
                interface = K::NAME,
                resources = ?leaked,
                "interface dropped while resource claims were still recorded"
            );
        }
    }
}
