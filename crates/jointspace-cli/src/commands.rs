//! Subcommand implementations.  Each returns the text to print so the
//! commands can be exercised without a terminal.

use std::cell::Cell;
use std::path::Path;

use jointspace_transmission::{Direction, TransmissionFile, convert};
use jointspace_types::{ControlError, Quantity};
use tracing::{debug, info};

/// Load `path` and build every transmission in it.
pub fn check(path: &Path) -> Result<String, ControlError> {
    let file = TransmissionFile::load_from(path)?;
    let mut lines = Vec::new();
    for cfg in &file.transmissions {
        let t = cfg.build()?;
        lines.push(format!(
            "{:<20} {:<14} {} actuator(s) -> {} joint(s)",
            cfg.name,
            cfg.kind.type_name(),
            t.num_actuators(),
            t.num_joints()
        ));
        if !cfg.actuators.is_empty() || !cfg.joints.is_empty() {
            lines.push(format!(
                "{:<20} [{}] -> [{}]",
                "",
                cfg.actuators.join(", "),
                cfg.joints.join(", ")
            ));
        }
    }
    info!(path = %path.display(), transmissions = file.transmissions.len(), "configuration ok");
    lines.push(format!("{} transmission(s) OK", file.transmissions.len()));
    Ok(lines.join("\n"))
}

/// Push `values` through the transmission `name` and return the converted
/// values.
pub fn run_convert(
    path: &Path,
    name: &str,
    direction: Direction,
    quantity: Quantity,
    values: &[f64],
) -> Result<Vec<f64>, ControlError> {
    let file = TransmissionFile::load_from(path)?;
    let cfg = file.get(name).ok_or_else(|| {
        ControlError::Config(format!("no transmission '{name}' in {}", path.display()))
    })?;
    let transmission = cfg.build()?;

    let (inputs, outputs) = match direction {
        Direction::ActuatorToJoint => (transmission.num_actuators(), transmission.num_joints()),
        Direction::JointToActuator => (transmission.num_joints(), transmission.num_actuators()),
    };
    if values.len() != inputs {
        return Err(ControlError::TransmissionConfig(format!(
            "transmission '{name}' takes {inputs} input value(s), got {}",
            values.len()
        )));
    }

    let input: Vec<Cell<f64>> = values.iter().copied().map(Cell::new).collect();
    let output: Vec<Cell<f64>> = (0..outputs).map(|_| Cell::new(0.0)).collect();
    let input_slots: Vec<&Cell<f64>> = input.iter().collect();
    let output_slots: Vec<&Cell<f64>> = output.iter().collect();

    debug!(transmission = name, ?direction, %quantity, "convert");
    match direction {
        Direction::ActuatorToJoint => {
            convert(transmission.as_ref(), direction, quantity, &input_slots, &output_slots)
        }
        Direction::JointToActuator => {
            convert(transmission.as_ref(), direction, quantity, &output_slots, &input_slots)
        }
    }
    Ok(output.iter().map(Cell::get).collect())
}
