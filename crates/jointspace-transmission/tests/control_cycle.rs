//! A full read → control → write cycle through a differential wrist driven
//! by two simulated actuators.

use std::cell::Cell;

use jointspace_hal::{
    ActuatorStateHandle, ActuatorStateInterface, CommandMode, JointHandle, JointStateHandle,
    JointStateInterface, PositionActuatorInterface, PositionJointInterface, SimActuatorBank,
};
use jointspace_transmission::handle::mapping::ActuatorToJointState;
use jointspace_transmission::{
    ActuatorToJointStateInterface, DifferentialTransmission, JointToActuatorPositionInterface,
    RawData, TransmissionHandle,
};
use jointspace_types::{ControlError, Quantity};

const EPS: f64 = 1e-9;

struct JointStorage {
    position: [Cell<f64>; 2],
    velocity: [Cell<f64>; 2],
    effort: [Cell<f64>; 2],
    command: [Cell<f64>; 2],
}

impl JointStorage {
    fn new() -> Self {
        let zeros = || [Cell::new(0.0), Cell::new(0.0)];
        Self {
            position: zeros(),
            velocity: zeros(),
            effort: zeros(),
            command: zeros(),
        }
    }

    fn state(&self) -> RawData<'_> {
        RawData {
            position: self.position.iter().collect(),
            velocity: self.velocity.iter().collect(),
            effort: self.effort.iter().collect(),
        }
    }

    fn commands(&self) -> RawData<'_> {
        RawData {
            position: self.command.iter().collect(),
            ..Default::default()
        }
    }

    fn handle(&self, name: &str, i: usize) -> JointHandle<'_> {
        let state = JointStateHandle::new(
            name,
            Some(&self.position[i]),
            Some(&self.velocity[i]),
            Some(&self.effort[i]),
        )
        .unwrap();
        JointHandle::new(state, Some(&self.command[i])).unwrap()
    }
}

#[test]
fn differential_wrist_cycle() {
    // Storage and mechanisms outlive every interface and claim below.
    let bank = SimActuatorBank::builder()
        .with_actuator("left_motor")
        .with_actuator("right_motor")
        .with_mode(CommandMode::Position)
        .build();
    let joints = JointStorage::new();
    let wrist = DifferentialTransmission::new(&[10.0, 10.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap();

    // Hardware side.
    let mut actuator_state = ActuatorStateInterface::new();
    let mut actuator_position = PositionActuatorInterface::new();
    bank.register_state(&mut actuator_state).unwrap();
    bank.register_commands(&mut actuator_position).unwrap();

    // Transmissions.
    let motors = ["left_motor", "right_motor"];
    let motor_states: Vec<_> =
        motors.iter().map(|m| actuator_state.get_handle(m).unwrap()).collect();
    let motor_commands: Vec<_> =
        motors.iter().map(|m| actuator_position.get_handle(m).unwrap()).collect();

    let mut to_joint = ActuatorToJointStateInterface::new();
    let motor_data = RawData::from_states(&motor_states);
    let wrist_state = TransmissionHandle::new("wrist", &wrist, motor_data, joints.state());
    to_joint.register_handle(wrist_state.unwrap()).unwrap();
    let mut to_actuator = JointToActuatorPositionInterface::new();
    to_actuator
        .register_handle(
            TransmissionHandle::new(
                "wrist",
                &wrist,
                RawData::from_commands(&motor_commands, Quantity::Position).unwrap(),
                joints.commands(),
            )
            .unwrap(),
        )
        .unwrap();

    // Controller side.
    let mut joint_state = JointStateInterface::new();
    let mut joint_position = PositionJointInterface::new();
    for (i, name) in ["pitch", "roll"].into_iter().enumerate() {
        let handle = joints.handle(name, i);
        joint_state.register_handle(handle.state().clone()).unwrap();
        joint_position.register_handle(handle).unwrap();
    }

    // Read.
    bank.write_state("left_motor", 10.0, 0.0, 1.0).unwrap();
    bank.write_state("right_motor", -10.0, 0.0, 2.0).unwrap();
    to_joint.propagate();

    let pitch = joint_state.get_handle("pitch").unwrap();
    let roll = joint_state.get_handle("roll").unwrap();
    assert!(pitch.position().abs() < EPS);
    assert!((roll.position() - 1.0).abs() < EPS);
    assert!((pitch.effort().unwrap() - 30.0).abs() < EPS);
    assert!((roll.effort().unwrap() + 10.0).abs() < EPS);

    // Control.
    let (pitch_cmd, pitch_claim) = joint_position.claim_handle("pitch").unwrap();
    let (roll_cmd, mut roll_claim) = joint_position.claim_handle("roll").unwrap();
    assert_eq!(
        joint_position.claims().into_iter().collect::<Vec<_>>(),
        ["pitch", "roll"]
    );
    assert!(matches!(
        joint_position.claim("pitch"),
        Err(ControlError::ResourceAlreadyClaimed { .. })
    ));
    assert!(joint_state.claims().is_empty());

    pitch_cmd.set_command(0.5);
    roll_cmd.set_command(0.2);

    // Write.
    to_actuator.propagate();
    assert!((bank.command("left_motor").unwrap() - 7.0).abs() < EPS);
    assert!((bank.command("right_motor").unwrap() - 3.0).abs() < EPS);

    bank.step(0.1);
    to_joint.propagate();
    assert!((pitch.position() - 0.5).abs() < EPS);
    assert!((roll.position() - 0.2).abs() < EPS);
    // Motor velocities −30 and 130 seen through the differential.
    assert!((pitch.velocity() - 5.0).abs() < EPS);
    assert!((roll.velocity() + 8.0).abs() < EPS);

    drop(pitch_claim);
    assert_eq!(joint_position.claims().len(), 1);
    roll_claim.release();
    assert!(joint_position.claims().is_empty());
    assert!(joint_position.claim("pitch").is_ok());
}

#[test]
fn state_only_effort_is_dropped_when_any_sensor_lacks_it() {
    let wrist = DifferentialTransmission::new(&[1.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]).unwrap();
    let slots: [Cell<f64>; 5] = std::array::from_fn(|_| Cell::new(1.0));
    let joints = JointStorage::new();

    let motors = [
        ActuatorStateHandle::new("a", Some(&slots[0]), Some(&slots[1]), Some(&slots[2])).unwrap(),
        ActuatorStateHandle::new("b", Some(&slots[3]), Some(&slots[4]), None).unwrap(),
    ];
    let actuator = RawData::from_states(&motors);
    assert!(actuator.effort.is_empty());

    // The joint side maps effort, the actuator side does not.
    let err = TransmissionHandle::<ActuatorToJointState>::new(
        "wrist",
        &wrist,
        actuator.clone(),
        joints.state(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("effort"));

    let joint = RawData {
        effort: Vec::new(),
        ..joints.state()
    };
    let handle =
        TransmissionHandle::<ActuatorToJointState>::new("wrist", &wrist, actuator, joint).unwrap();
    handle.propagate();
    assert!((joints.position[0].get() - 1.0).abs() < EPS);
    assert!(joints.position[1].get().abs() < EPS);
}
