//! Core plugin: shared resources and global settings.
//!
//! `Tunables` is only inserted when missing, so an app (or test) can configure it before
//! the plugins are registered.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)));
}
