//! Transmission description files.
//!
//! A file holds any number of `[[transmission]]` tables:
//!
//! ```toml
//! [[transmission]]
//! name = "wrist"
//! type = "differential"
//! actuator_reduction = [10.0, 10.0]
//! joint_reduction = [2.0, 2.0]
//! joint_offset = [0.0, 0.5]      # optional, zeros by default
//! actuators = ["wrist_left_motor", "wrist_right_motor"]
//! joints = ["wrist_pitch", "wrist_roll"]
//!
//! [[transmission]]
//! name = "gripper"
//! type = "simple"
//! reduction = -50.0
//! offset = 0.0                   # optional
//! ```
//!
//! `type` is one of `simple`, `differential` or `four_bar`.  The `actuators`
//! and `joints` lists are optional; when present their lengths must match
//! the transmission's slot counts.

use std::fs;
use std::path::Path;

use jointspace_types::ControlError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::differential::DifferentialTransmission;
use crate::four_bar::FourBarLinkageTransmission;
use crate::simple::SimpleTransmission;
use crate::transmission::Transmission;

/// Mechanism and parameters of one configured transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransmissionKind {
    Simple {
        reduction: f64,
        #[serde(default)]
        offset: f64,
    },
    Differential {
        actuator_reduction: Vec<f64>,
        joint_reduction: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        joint_offset: Option<Vec<f64>>,
    },
    FourBar {
        actuator_reduction: Vec<f64>,
        joint_reduction: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        joint_offset: Option<Vec<f64>>,
    },
}

impl TransmissionKind {
    /// The `type` tag used in configuration files.
    pub fn type_name(&self) -> &'static str {
        match self {
            TransmissionKind::Simple { .. } => "simple",
            TransmissionKind::Differential { .. } => "differential",
            TransmissionKind::FourBar { .. } => "four_bar",
        }
    }
}

/// One `[[transmission]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionConfig {
    pub name: String,

    #[serde(flatten)]
    pub kind: TransmissionKind,

    /// Actuator names, in slot order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actuators: Vec<String>,

    /// Joint names, in slot order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joints: Vec<String>,
}

impl TransmissionConfig {
    /// Construct the configured transmission.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::TransmissionConfig`] when the name is empty,
    /// the parameters are rejected by the variant's constructor, or a name
    /// list does not match the variant's slot count.
    pub fn build(&self) -> Result<Box<dyn Transmission>, ControlError> {
        if self.name.is_empty() {
            return Err(ControlError::TransmissionConfig(
                "transmission name cannot be empty".to_string(),
            ));
        }

        let zeros = [0.0, 0.0];
        let built: Result<Box<dyn Transmission>, ControlError> = match &self.kind {
            TransmissionKind::Simple { reduction, offset } => {
                SimpleTransmission::new(*reduction, *offset)
                    .map(|t| Box::new(t) as Box<dyn Transmission>)
            }
            TransmissionKind::Differential {
                actuator_reduction,
                joint_reduction,
                joint_offset,
            } => DifferentialTransmission::new(
                actuator_reduction,
                joint_reduction,
                joint_offset.as_deref().unwrap_or(&zeros),
            )
            .map(|t| Box::new(t) as Box<dyn Transmission>),
            TransmissionKind::FourBar {
                actuator_reduction,
                joint_reduction,
                joint_offset,
            } => FourBarLinkageTransmission::new(
                actuator_reduction,
                joint_reduction,
                joint_offset.as_deref().unwrap_or(&zeros),
            )
            .map(|t| Box::new(t) as Box<dyn Transmission>),
        };
        let transmission = built.map_err(|e| self.context(e))?;

        self.check_names("actuator", &self.actuators, transmission.num_actuators())?;
        self.check_names("joint", &self.joints, transmission.num_joints())?;
        Ok(transmission)
    }

    fn check_names(
        &self,
        side: &str,
        names: &[String],
        expected: usize,
    ) -> Result<(), ControlError> {
        if names.is_empty() || names.len() == expected {
            return Ok(());
        }
        Err(ControlError::TransmissionConfig(format!(
            "transmission '{}': {} lists {} {side} names, expected {expected}",
            self.name,
            self.kind.type_name(),
            names.len()
        )))
    }

    fn context(&self, err: ControlError) -> ControlError {
        match err {
            ControlError::TransmissionConfig(msg) => {
                ControlError::TransmissionConfig(format!("transmission '{}': {msg}", self.name))
            }
            other => other,
        }
    }
}

/// A parsed transmissions file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransmissionFile {
    #[serde(default, rename = "transmission")]
    pub transmissions: Vec<TransmissionConfig>,
}

impl TransmissionFile {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Config`] on malformed TOML, unknown `type`
    /// tags, missing parameters, or two tables sharing a name.
    pub fn from_toml_str(raw: &str) -> Result<Self, ControlError> {
        let file: TransmissionFile = toml::from_str(raw)
            .map_err(|e| ControlError::Config(format!("failed to parse transmissions: {e}")))?;

        let mut seen = std::collections::HashSet::new();
        for t in &file.transmissions {
            if !seen.insert(t.name.as_str()) {
                return Err(ControlError::Config(format!(
                    "transmission '{}' is defined more than once",
                    t.name
                )));
            }
        }
        Ok(file)
    }

    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Config`] when the file cannot be read or
    /// fails [`from_toml_str`](Self::from_toml_str).
    pub fn load_from(path: &Path) -> Result<Self, ControlError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ControlError::Config(format!("failed to read {}: {e}", path.display())))?;
        let file = Self::from_toml_str(&raw)?;
        debug!(
            path = %path.display(),
            transmissions = file.transmissions.len(),
            "loaded transmissions"
        );
        Ok(file)
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ControlError> {
        toml::to_string_pretty(self)
            .map_err(|e| ControlError::Config(format!("failed to serialize transmissions: {e}")))
    }

    pub fn get(&self, name: &str) -> Option<&TransmissionConfig> {
        self.transmissions.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transmissions.iter().map(|t| t.name.as_str())
    }

    /// Build every transmission, in file order.
    ///
    /// # Errors
    ///
    /// Fails on the first entry whose [`TransmissionConfig::build`] fails.
    pub fn build_all(&self) -> Result<Vec<(String, Box<dyn Transmission>)>, ControlError> {
        self.transmissions
            .iter()
            .map(|t| Ok((t.name.clone(), t.build()?)))
            .collect()
    }
}
