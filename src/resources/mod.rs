//! ECS resources made available to systems.
//!
//! Overview
//! - `battle` – battle phase and trigger signals, and the [`battle::BattleView`] over them
//! - `director` – the portrait state machine
//! - `gameconfig` – INI configuration
//! - `party` – party actors, HP and status conditions
//! - `picturerules` – picture rule lists and the victory actor policy
//! - `picturestore` – picture size manifest and the loader thread bridge
//! - `settings` – process-wide enabled flag
//! - `switches` – global game switches
//! - `systemsstore` – scene hooks addressable by name
//! - `timeline` – scripted battle cues
pub mod battle;
pub mod director;
pub mod gameconfig;
pub mod party;
pub mod picturerules;
pub mod picturestore;
pub mod settings;
pub mod switches;
pub mod systemsstore;
pub mod timeline;
