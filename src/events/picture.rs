//! Messages exchanged with the picture loader thread.
//!
//! [`PictureCmd`] goes *to* the loader, [`PictureMessage`] comes *back*.
//! Every load carries the ticket issued by the
//! [`PortraitDirector`](crate::resources::director::PortraitDirector) so the
//! answer can be matched against the show that asked for it.

use bevy_ecs::message::Message;

use crate::resources::director::LoadTicket;

/// Commands sent to the picture loader thread.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum PictureCmd {
    Load { ticket: LoadTicket, name: String },
    Shutdown,
}

/// Results sent back from the picture loader thread.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum PictureMessage {
    Loaded {
        ticket: LoadTicket,
        name: String,
        width: u32,
        height: u32,
    },
    LoadFailed {
        ticket: LoadTicket,
        name: String,
        error: String,
    },
}
