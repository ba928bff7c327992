//! Combat system module
//!
//! Ответственность:
//! - attacker: активная атака, таймер анимации, cooldown'ы по видам
//! - damage: правила применения урона (неуязвимость, блок, отброс, смерть)
//! - hitbox: прямоугольники ударов и строгая проверка пересечения
//! - projectile: полёт снарядов
//! - combo: комбо-множитель игрока
//! - systems: порядок разрешения попаданий за тик

pub mod attacker;
pub mod combo;
pub mod damage;
pub mod hitbox;
pub mod projectile;
pub mod systems;

// Re-export основных типов
pub use attacker::{ActiveWindow, AttackKind, AttackSlots};
pub use combo::{combo_multiplier, scale_damage, ComboTracker, ComboTuning};
pub use damage::{apply_hit, DamageOutcome, HitResponse};
pub use hitbox::{melee_rect, overlaps};
pub use projectile::{Projectile, PROJECTILE_HEIGHT, PROJECTILE_WIDTH};
pub use systems::resolve_collisions;
