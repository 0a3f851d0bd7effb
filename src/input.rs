use crate::world::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Start a new game, or replay a finished one.
    Start,
}

/// Maps a `KeyboardEvent.code` to a command.
pub fn command_for_code(code: &str) -> Option<Command> {
    let cmd = match code {
        "ArrowUp" | "KeyW" => Command::Turn(Direction::Up),
        "ArrowDown" | "KeyS" => Command::Turn(Direction::Down),
        "ArrowLeft" | "KeyA" => Command::Turn(Direction::Left),
        "ArrowRight" | "KeyD" => Command::Turn(Direction::Right),
        "Enter" | "NumpadEnter" | "Space" => Command::Start,
        _ => return None,
    };
    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(command_for_code("ArrowLeft"), Some(Command::Turn(Direction::Left)));
        assert_eq!(command_for_code("ArrowRight"), Some(Command::Turn(Direction::Right)));
        assert_eq!(command_for_code("ArrowUp"), Some(Command::Turn(Direction::Up)));
        assert_eq!(command_for_code("ArrowDown"), Some(Command::Turn(Direction::Down)));
        assert_eq!(command_for_code("KeyW"), Some(Command::Turn(Direction::Up)));
        assert_eq!(command_for_code("KeyA"), Some(Command::Turn(Direction::Left)));
    }

    #[test]
    fn enter_and_space_start() {
        assert_eq!(command_for_code("Enter"), Some(Command::Start));
        assert_eq!(command_for_code("Space"), Some(Command::Start));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(command_for_code("KeyQ"), None);
        assert_eq!(command_for_code(""), None);
    }
}
