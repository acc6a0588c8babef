//! Enemy and formation definitions.

use bevy::math::Vec2;
use bevy::platform::collections::HashMap;
use bevy::prelude::Resource;

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    /// Sprite asset path. `None` (or an unloadable path) falls back to a plain quad.
    pub sprite: Option<String>,
    pub hp: i32,
    pub score: i32,
    pub move_pattern_id: Option<String>,
    pub bullet_pattern_id: Option<String>,
    pub item_drop_id: Option<String>,
    pub item_drop_rate: f32,
}

impl EnemyDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sprite: None,
            hp: 1,
            score: 100,
            move_pattern_id: None,
            bullet_pattern_id: None,
            item_drop_id: None,
            item_drop_rate: 0.1,
        }
    }

    pub fn with_stats(mut self, hp: i32, score: i32) -> Self {
        self.hp = hp;
        self.score = score;
        self
    }

    pub fn with_patterns(mut self, move_id: Option<&str>, bullet_id: Option<&str>) -> Self {
        self.move_pattern_id = move_id.map(str::to_owned);
        self.bullet_pattern_id = bullet_id.map(str::to_owned);
        self
    }

    pub fn with_item_drop(mut self, item_id: impl Into<String>, rate: f32) -> Self {
        self.item_drop_id = Some(item_id.into());
        self.item_drop_rate = rate;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormationMember {
    pub enemy_id: String,
    pub local_position: Vec2,
    /// Seconds after the formation's trigger time. Not required to be ascending.
    pub spawn_delay: f32,
}

impl FormationMember {
    pub fn new(enemy_id: impl Into<String>, local_position: Vec2, spawn_delay: f32) -> Self {
        Self {
            enemy_id: enemy_id.into(),
            local_position,
            spawn_delay: spawn_delay.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyFormation {
    pub id: String,
    pub name: String,
    pub members: Vec<FormationMember>,
}

impl EnemyFormation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: FormationMember) -> Self {
        self.members.push(member);
        self
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EnemyDatabase {
    pub enemies: HashMap<String, EnemyDef>,
    pub formations: HashMap<String, EnemyFormation>,
}

impl EnemyDatabase {
    pub fn with_enemy(mut self, def: EnemyDef) -> Self {
        self.enemies.insert(def.id.clone(), def);
        self
    }

    pub fn with_formation(mut self, formation: EnemyFormation) -> Self {
        self.formations.insert(formation.id.clone(), formation);
        self
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyDef> {
        self.enemies.get(id)
    }

    pub fn formation(&self, id: &str) -> Option<&EnemyFormation> {
        self.formations.get(id)
    }
}
