//! Игрок: боец + прыжки, комбо, очки, жизни, точка респауна.

use bevy::math::{Rect, Vec2};

use super::actor::{Actor, CombatState, Facing};
use super::opponent::OpponentId;
use crate::combat::damage::{apply_hit, DamageOutcome, HitResponse};
use crate::combat::hitbox::melee_rect;
use crate::combat::{AttackKind, ComboTracker, Projectile};
use crate::config::{PlayerTuning, WorldConfig};
use crate::encounter::PlayerIntents;

/// Высота вылета бэтаранга: height / 3 от верха тела
const THROW_HEIGHT_DIVISOR: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerActor {
    pub actor: Actor,
    pub jumps_remaining: u32,
    pub combo: ComboTracker,
    pub score: u64,
    /// None — вариант без жизней
    pub lives: Option<u32>,
    /// Последняя позиция на земле (живым)
    pub last_safe_position: Vec2,
    /// Кого уже задел текущий удар (один удар — одно попадание по цели)
    swing_hits: Vec<OpponentId>,
    tuning: PlayerTuning,
}

impl PlayerActor {
    pub fn new(tuning: PlayerTuning, world: &WorldConfig) -> Self {
        let position = Vec2::new(tuning.spawn_x, world.ground_level - tuning.spawn_height);
        Self::at(position, tuning)
    }

    pub fn at(position: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            actor: Actor::new(position, tuning.width, tuning.height, tuning.max_health),
            jumps_remaining: tuning.max_jumps,
            combo: ComboTracker::default(),
            score: 0,
            lives: tuning.lives,
            last_safe_position: position,
            swing_hits: Vec::new(),
            tuning,
        }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_alive()
    }

    /// Ввод одного тика. Возвращает брошенный снаряд, если бросок состоялся.
    ///
    /// Left имеет приоритет над Right. Дискретные действия — в порядке
    /// jump, punch, kick, throw; все, кроме jump, взаимно исключают друг друга
    /// через "одна активная атака".
    pub fn apply_intents(&mut self, intents: &PlayerIntents) -> Option<Projectile> {
        if self.actor.is_dead() {
            return None;
        }

        self.steer(intents.move_left, intents.move_right);

        if intents.jump {
            self.jump();
        }
        if intents.punch {
            self.punch();
        }
        if intents.kick {
            self.kick();
        }
        if intents.throw {
            return self.throw_batarang();
        }
        None
    }

    pub fn steer(&mut self, left: bool, right: bool) {
        let velocity = &mut self.actor.body.velocity;
        if left {
            velocity.x = -self.tuning.move_speed;
            self.actor.facing = Facing::Left;
        } else if right {
            velocity.x = self.tuning.move_speed;
            self.actor.facing = Facing::Right;
        } else {
            velocity.x *= self.tuning.friction;
            if velocity.x.abs() < self.tuning.stop_threshold {
                velocity.x = 0.0;
            }
        }
    }

    /// Прыжок / двойной прыжок
    pub fn jump(&mut self) -> bool {
        if self.actor.is_dead() || self.jumps_remaining == 0 {
            return false;
        }

        self.actor.body.velocity.y = if self.jumps_remaining == self.tuning.max_jumps {
            self.tuning.jump_impulse
        } else {
            self.tuning.double_jump_impulse
        };
        self.jumps_remaining -= 1;
        true
    }

    pub fn punch(&mut self) -> bool {
        let tuning = self.tuning.punch;
        self.start_melee(AttackKind::Punch, tuning.duration, tuning.cooldown)
    }

    pub fn kick(&mut self) -> bool {
        let tuning = self.tuning.kick;
        self.start_melee(AttackKind::Kick, tuning.duration, tuning.cooldown)
    }

    fn start_melee(&mut self, kind: AttackKind, duration: u32, cooldown: u32) -> bool {
        if !self.actor.start_attack(kind, duration, cooldown) {
            return false;
        }
        self.swing_hits.clear();
        true
    }

    pub fn throw_batarang(&mut self) -> Option<Projectile> {
        let tuning = self.tuning.batarang;
        if !self
            .actor
            .start_attack(AttackKind::Ranged, tuning.duration, tuning.cooldown)
        {
            return None;
        }

        Some(Projectile::launched_from(
            &self.actor.body,
            self.actor.facing,
            THROW_HEIGHT_DIVISOR,
            tuning.speed,
            tuning.damage,
            tuning.max_distance,
            true,
        ))
    }

    /// Таймеры + интеграция + точка респауна + Idle/Running
    pub fn update(&mut self, world: &WorldConfig) {
        if self.actor.is_alive() {
            self.actor.tick_timers();
            self.combo.tick();
        }

        let grounded = self.actor.integrate(world, self.tuning.falling_speed);
        if grounded {
            self.jumps_remaining = self.tuning.max_jumps;
            if self.actor.is_alive() {
                self.last_safe_position = self.actor.body.position;
            }
        }

        self.actor.refresh_locomotion(self.tuning.stop_threshold);
    }

    /// Прямоугольник удара (только в активной части punch/kick)
    pub fn attack_rect(&self) -> Option<Rect> {
        if !self.actor.attacks.hitbox_live(&self.tuning.melee_window) {
            return None;
        }

        let reach = match self.actor.attacks.active()? {
            AttackKind::Punch => self.tuning.punch.reach,
            AttackKind::Kick => self.tuning.kick.reach,
            AttackKind::Ranged | AttackKind::Special => return None,
        };

        Some(melee_rect(
            &self.actor.body,
            self.actor.facing,
            reach,
            self.tuning.hitbox_inset,
        ))
    }

    /// Урон текущего удара с комбо-множителем
    pub fn attack_damage(&self) -> u32 {
        let base = match self.actor.attacks.active() {
            Some(AttackKind::Punch) => self.tuning.punch.damage,
            Some(AttackKind::Kick) => self.tuning.kick.damage,
            Some(AttackKind::Ranged) => return self.tuning.batarang.damage,
            Some(AttackKind::Special) | None => return 0,
        };
        self.combo.scale(base, &self.tuning.combo)
    }

    pub fn register_hit(&mut self) {
        self.combo.register_hit(&self.tuning.combo);
    }

    pub fn swing_already_hit(&self, target: OpponentId) -> bool {
        self.swing_hits.contains(&target)
    }

    pub fn mark_swing_hit(&mut self, target: OpponentId) {
        self.swing_hits.push(target);
    }

    /// Урон по игроку: длинная неуязвимость, сброс комбо
    pub fn take_damage(
        &mut self,
        amount: u32,
        knockback_dir: f32,
        world: &WorldConfig,
    ) -> DamageOutcome {
        let response = HitResponse {
            knockback_speed: world.knockback_speed,
            invincibility: self.tuning.hit_invincibility,
            block_divisor: None,
        };

        let outcome = apply_hit(&mut self.actor, amount, knockback_dir, &response);
        if outcome.is_applied() {
            self.combo.reset();
        }
        outcome
    }

    /// Лечение (clamp к max). Возвращает фактически восстановленное здоровье.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.actor.health.current;
        self.actor.health.heal(amount);
        self.actor.health.current - before
    }

    /// Если есть запасная жизнь — тратит её и восстанавливает игрока
    /// в последней безопасной точке. lives == 0 или None — смерть окончательная.
    pub fn try_respawn(&mut self) -> bool {
        let Some(lives) = self.lives.as_mut() else {
            return false;
        };
        if *lives == 0 {
            return false;
        }
        *lives -= 1;

        let actor = &mut self.actor;
        actor.health.restore();
        actor.body.position = self.last_safe_position;
        actor.body.velocity = Vec2::ZERO;
        actor.attacks.cancel();
        actor.invincibility = self.tuning.respawn_invincibility;
        actor.state = CombatState::Idle;
        self.combo.reset();
        self.swing_hits.clear();
        self.jumps_remaining = self.tuning.max_jumps;
        true
    }
}
