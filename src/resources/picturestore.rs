//! Picture manifest and the bridge to the picture loader thread.
//!
//! The [`PictureManifest`] maps picture names to their pixel size; it stands
//! in for the image files a renderer would decode. Use
//! [`setup_picture_loader`] once during initialization to spawn the loader
//! thread and insert the [`PictureBridge`] plus the message queues, and
//! [`shutdown_picture_loader`] during teardown to stop and join it.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::info;
use rustc_hash::FxHashMap;

use crate::error::PortraitError;
use crate::events::picture::{PictureCmd, PictureMessage};
use crate::systems::picture::picture_thread;

/// Known pictures and their `(width, height)` in pixels.
#[derive(Debug, Clone, Default)]
pub struct PictureManifest {
    sizes: FxHashMap<String, (u32, u32)>,
}

impl PictureManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, width: u32, height: u32) {
        self.sizes.insert(name.into(), (width, height));
    }

    pub fn size(&self, name: &str) -> Option<(u32, u32)> {
        self.sizes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Parse a manifest of the form `{"reid": [320, 640], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, PortraitError> {
        let sizes: FxHashMap<String, (u32, u32)> = serde_json::from_str(json)?;
        Ok(Self { sizes })
    }

    pub fn load_from_file(path: &str) -> Result<Self, PortraitError> {
        let json = std::fs::read_to_string(path).map_err(|source| PortraitError::Io {
            path: path.to_string(),
            source,
        })?;
        let manifest = Self::from_json_str(&json)?;
        info!("Loaded {} picture sizes from {}", manifest.len(), path);
        Ok(manifest)
    }
}

/// Shared bridge between the ECS world and the picture loader thread.
#[derive(Resource)]
pub struct PictureBridge {
    /// Sender for [`PictureCmd`] messages (ECS -> loader thread).
    pub tx_cmd: Sender<PictureCmd>,
    /// Receiver for [`PictureMessage`] messages (loader thread -> ECS).
    pub rx_msg: Receiver<PictureMessage>,
    /// Join handle for the loader thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the loader thread and register bridge resources.
pub fn setup_picture_loader(world: &mut World, manifest: PictureManifest) {
    let (tx_cmd, rx_cmd) = unbounded::<PictureCmd>();
    let (tx_msg, rx_msg) = unbounded::<PictureMessage>();

    let handle = std::thread::spawn(move || picture_thread(manifest, rx_cmd, tx_msg));

    world.insert_resource(PictureBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<PictureMessage>::default());
    world.insert_resource(Messages::<PictureCmd>::default());
}

/// Request shutdown of the loader thread and join it.
pub fn shutdown_picture_loader(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<PictureBridge>() {
        let _ = bridge.tx_cmd.send(PictureCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
