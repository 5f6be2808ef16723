/// Raw key identifier → movement direction.
///
/// Backends report keys either as numeric codes (DOM-style 37..=40) or
/// as names ("ArrowLeft", "a", ...). Both resolve through one table;
/// anything not in it is dropped before it reaches the input queue.

use crossterm::event::KeyCode;

use crate::domain::entity::MoveDir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyId<'a> {
    Code(u32),
    Name(&'a str),
}

pub const LEFT_KEY: u32 = 37;
pub const UP_KEY: u32 = 38;
pub const RIGHT_KEY: u32 = 39;
pub const DOWN_KEY: u32 = 40;

const CODE_TABLE: [(u32, MoveDir); 4] = [
    (LEFT_KEY, MoveDir::Left),
    (UP_KEY, MoveDir::Up),
    (RIGHT_KEY, MoveDir::Right),
    (DOWN_KEY, MoveDir::Down),
];

const NAME_TABLE: [(&str, MoveDir); 8] = [
    ("a", MoveDir::Left),
    ("ArrowLeft", MoveDir::Left),
    ("w", MoveDir::Up),
    ("ArrowUp", MoveDir::Up),
    ("d", MoveDir::Right),
    ("ArrowRight", MoveDir::Right),
    ("s", MoveDir::Down),
    ("ArrowDown", MoveDir::Down),
];

pub fn map_key(key: KeyId) -> Option<MoveDir> {
    match key {
        KeyId::Code(code) => CODE_TABLE.iter().find(|(c, _)| *c == code).map(|(_, d)| *d),
        KeyId::Name(name) => NAME_TABLE.iter().find(|(n, _)| *n == name).map(|(_, d)| *d),
    }
}

/// Direction for a crossterm key: arrows by code, letters by name.
/// Uppercase WASD is accepted so Shift or Caps Lock do not swallow input.
pub fn map_crossterm(code: KeyCode) -> Option<MoveDir> {
    match code {
        KeyCode::Left => map_key(KeyId::Code(LEFT_KEY)),
        KeyCode::Right => map_key(KeyId::Code(RIGHT_KEY)),
        KeyCode::Up => map_key(KeyId::Code(UP_KEY)),
        KeyCode::Down => map_key(KeyId::Code(DOWN_KEY)),
        KeyCode::Char(c) => {
            let lower = c.to_ascii_lowercase();
            let mut buf = [0u8; 4];
            map_key(KeyId::Name(lower.encode_utf8(&mut buf)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes() {
        assert_eq!(map_key(KeyId::Code(37)), Some(MoveDir::Left));
        assert_eq!(map_key(KeyId::Code(38)), Some(MoveDir::Up));
        assert_eq!(map_key(KeyId::Code(39)), Some(MoveDir::Right));
        assert_eq!(map_key(KeyId::Code(40)), Some(MoveDir::Down));
        assert_eq!(map_key(KeyId::Code(41)), None);
    }

    #[test]
    fn named_keys() {
        assert_eq!(map_key(KeyId::Name("ArrowUp")), Some(MoveDir::Up));
        assert_eq!(map_key(KeyId::Name("s")), Some(MoveDir::Down));
        assert_eq!(map_key(KeyId::Name("Enter")), None);
        assert_eq!(map_key(KeyId::Name("A")), None);
    }

    #[test]
    fn every_direction_reachable_both_ways() {
        for dir in [MoveDir::Up, MoveDir::Down, MoveDir::Left, MoveDir::Right] {
            assert!(CODE_TABLE.iter().any(|(_, d)| *d == dir));
            assert_eq!(NAME_TABLE.iter().filter(|(_, d)| *d == dir).count(), 2);
        }
    }

    #[test]
    fn crossterm_keys() {
        assert_eq!(map_crossterm(KeyCode::Left), Some(MoveDir::Left));
        assert_eq!(map_crossterm(KeyCode::Char('w')), Some(MoveDir::Up));
        assert_eq!(map_crossterm(KeyCode::Char('D')), Some(MoveDir::Right));
        assert_eq!(map_crossterm(KeyCode::Char('r')), None);
        assert_eq!(map_crossterm(KeyCode::Esc), None);
    }
}
