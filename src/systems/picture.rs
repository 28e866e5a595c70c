//! Picture loader thread and the systems that bridge it with the ECS world.
//!
//! - [`picture_thread`] runs on its own OS thread and answers
//!   [`PictureCmd::Load`] with [`PictureMessage::Loaded`] or
//!   [`PictureMessage::LoadFailed`].
//! - [`forward_picture_cmds`] sends the commands written this frame to the
//!   thread; [`poll_picture_messages`] drains its answers into the ECS
//!   message queue without blocking.
//! - [`update_picture_cmds`] and [`update_picture_messages`] advance the
//!   queues once per frame.
//!
//! Answers arrive on a later frame than the request, which is exactly the
//! window in which a newer show may supersede the load.

use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};

use crate::events::picture::{PictureCmd, PictureMessage};
use crate::resources::picturestore::{PictureBridge, PictureManifest};

pub fn poll_picture_messages(
    bridge: Res<PictureBridge>,
    mut writer: MessageWriter<PictureMessage>,
) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

pub fn update_picture_messages(mut msgs: ResMut<Messages<PictureMessage>>) {
    msgs.update();
}

/// Forward ECS [`PictureCmd`] messages to the loader thread.
pub fn forward_picture_cmds(bridge: Res<PictureBridge>, mut reader: MessageReader<PictureCmd>) {
    for cmd in reader.read() {
        // thread may already be gone during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

pub fn update_picture_cmds(mut msgs: ResMut<Messages<PictureCmd>>) {
    msgs.update();
}

/// Entry point of the loader thread. Blocks until [`PictureCmd::Shutdown`]
/// or until every sender is dropped.
pub fn picture_thread(
    manifest: PictureManifest,
    rx_cmd: Receiver<PictureCmd>,
    tx_msg: Sender<PictureMessage>,
) {
    info!(
        "Picture loader starting ({} pictures, thread {:?})",
        manifest.len(),
        std::thread::current().id()
    );

    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            PictureCmd::Load { ticket, name } => {
                let answer = match manifest.size(&name) {
                    Some((width, height)) => {
                        debug!("Loaded picture '{}' ({}x{})", name, width, height);
                        PictureMessage::Loaded {
                            ticket,
                            name,
                            width,
                            height,
                        }
                    }
                    None => {
                        debug!("Picture '{}' not found", name);
                        PictureMessage::LoadFailed {
                            ticket,
                            name,
                            error: "not found".to_string(),
                        }
                    }
                };
                if tx_msg.send(answer).is_err() {
                    break;
                }
            }
            PictureCmd::Shutdown => {
                debug!("Picture loader shutdown requested");
                break;
            }
        }
    }

    info!("Picture loader exiting");
}
