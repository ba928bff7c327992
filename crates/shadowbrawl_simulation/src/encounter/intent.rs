//! Намерения игрока на один тик
//!
//! Движение — непрерывные флаги (зажатая клавиша), остальное — дискретные
//! события, доставляемые не чаще раза за тик (`clear_discrete` после тика).

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntents {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub punch: bool,
    pub kick: bool,
    pub throw: bool,
    pub pause: bool,
}

impl PlayerIntents {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn left() -> Self {
        Self {
            move_left: true,
            ..Self::default()
        }
    }

    pub fn right() -> Self {
        Self {
            move_right: true,
            ..Self::default()
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_punch(mut self) -> Self {
        self.punch = true;
        self
    }

    pub fn with_kick(mut self) -> Self {
        self.kick = true;
        self
    }

    pub fn with_throw(mut self) -> Self {
        self.throw = true;
        self
    }

    pub fn with_pause(mut self) -> Self {
        self.pause = true;
        self
    }

    /// Сбросить дискретные намерения (движение остаётся)
    pub fn clear_discrete(&mut self) {
        self.jump = false;
        self.punch = false;
        self.kick = false;
        self.throw = false;
        self.pause = false;
    }
}
