/// Gamepad input using gilrs.
///
/// Default mapping:
///   D-pad / Left Stick    →  Movement (one queued step per press)
///   Start                 →  Restart
///   Select                →  Quit
///
/// Restart / quit buttons are configurable in `[gamepad]` of config.toml.
/// Without the `gamepad` feature this compiles to an inert stub.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::sim::input_queue::InputQueue;
use super::input::MetaInput;

#[cfg(feature = "gamepad")]
use crate::domain::entity::MoveDir;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers for the configurable actions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South        => Some(Btn::A),
            Button::East         => Some(Btn::B),
            Button::West         => Some(Btn::X),
            Button::North        => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start        => Some(Btn::Start),
            Button::Select       => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
#[derive(Clone, Debug, PartialEq, Eq)]
struct ActionMap {
    restart: Vec<Btn>,
    quit: Vec<Btn>,
}

impl ActionMap {
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String], fallback: Btn) -> Vec<Btn> {
            let list: Vec<Btn> = names.iter().filter_map(|s| Btn::from_name(s)).collect();
            if list.is_empty() { vec![fallback] } else { list }
        }
        ActionMap {
            restart: parse_list(&cfg.restart, Btn::Start),
            quit: parse_list(&cfg.quit, Btn::Select),
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn meta_for(&self, btn: Btn) -> MetaInput {
        MetaInput {
            quit: self.quit.contains(&btn),
            restart: self.restart.contains(&btn),
        }
    }
}

/// Digital view of the left stick, so a tilt queues one step per push.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
struct StickDirs {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_x: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_y: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick: StickDirs,

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    action_map: ActionMap,

    pub connected: bool,
}

impl GamepadState {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                tracing::warn!(error = %e, "gamepad support unavailable");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            stick_x: 0.0,
            stick_y: 0.0,
            stick: StickDirs::default(),
            action_map: ActionMap::from_config(cfg),
            connected,
        }
    }

    /// Drain pending gamepad events. Directions go into `queue`.
    pub fn update(&mut self, queue: &mut InputQueue) -> MetaInput {
        #[cfg(feature = "gamepad")]
        {
            self.poll_gilrs(queue)
        }
        #[cfg(not(feature = "gamepad"))]
        {
            let _ = queue;
            MetaInput::default()
        }
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self, queue: &mut InputQueue) -> MetaInput {
        let mut meta = MetaInput::default();
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return meta,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    if let Some(dir) = dpad_dir(btn) {
                        queue.push(dir);
                    } else if let Some(b) = Btn::from_gilrs(btn) {
                        meta.merge(self.action_map.meta_for(b));
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                }
                EventType::Connected => {
                    self.connected = true;
                    tracing::info!("gamepad connected");
                }
                EventType::Disconnected => {
                    self.connected = false;
                    self.stick_x = 0.0;
                    self.stick_y = 0.0;
                    tracing::info!("gamepad disconnected");
                }
                _ => {}
            }
        }

        let now = StickDirs {
            left: self.stick_x < -STICK_DEADZONE,
            right: self.stick_x > STICK_DEADZONE,
            up: self.stick_y > STICK_DEADZONE,
            down: self.stick_y < -STICK_DEADZONE,
        };
        // Edge-triggered: a held tilt is one step, like a key press.
        if now.up && !self.stick.up { queue.push(MoveDir::Up); }
        if now.down && !self.stick.down { queue.push(MoveDir::Down); }
        if now.left && !self.stick.left { queue.push(MoveDir::Left); }
        if now.right && !self.stick.right { queue.push(MoveDir::Right); }
        self.stick = now;

        meta
    }
}

#[cfg(feature = "gamepad")]
fn dpad_dir(btn: Button) -> Option<MoveDir> {
    match btn {
        Button::DPadUp    => Some(MoveDir::Up),
        Button::DPadDown  => Some(MoveDir::Down),
        Button::DPadLeft  => Some(MoveDir::Left),
        Button::DPadRight => Some(MoveDir::Right),
        _ => None,
    }
}
