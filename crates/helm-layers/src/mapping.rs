//! Input-to-drive mapping layers.

use std::collections::HashSet;

use helm_core::{Task, TaskKind, TaskPayload};

use crate::function_map::FunctionMap;

/// Maps a gamepad or keyboard snapshot straight to tank-drive power: each
/// stick's (or key pair's) vertical axis drives the corresponding side.
#[derive(Default)]
pub struct TankDriveMapping;

impl TankDriveMapping {
    /// Creates the mapping. Stateless — no setup is required.
    pub fn new() -> Self {
        Self
    }
}

impl FunctionMap for TankDriveMapping {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::GamepadInput, TaskKind::KeyboardInput])
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::TankDrive])
    }

    fn map(&mut self, task: &Task) -> Task {
        let (left, right) = match task.payload() {
            TaskPayload::GamepadInput(gamepad) => {
                (gamepad.joysticks.left.y, gamepad.joysticks.right.y)
            }
            TaskPayload::KeyboardInput(keyboard) => (
                keyboard.axis("w") - keyboard.axis("s"),
                keyboard.axis("i") - keyboard.axis("k"),
            ),
            other => panic!("TankDriveMapping cannot map {:?}", other.kind()),
        };
        Task::new(TaskPayload::TankDrive { left, right })
    }
}
