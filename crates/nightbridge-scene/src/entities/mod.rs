//! Self-contained decorative entities.
//!
//! Every entity except firework bursts recycles itself in place when it runs
//! out of screen or life, so the collections never grow after a re-seed.

pub mod building;
pub mod car;
pub mod firework;
pub mod heart;
pub mod sky;

pub use building::{Building, Window, init_skyline};
pub use car::{Car, init_traffic};
pub use firework::{Burst, FireworkLauncher, Spark, show_origin};
pub use heart::{Heart, heart_outline, init_hearts};
pub use sky::{Moon, ShootingStar, Star, init_shooting_stars, init_stars, moon_phase};
