//! Envelope record and the multi-frame wire layout.
//!
//! ```text
//! frame 0   label(remote)    destination host, matched by subscription prefix
//! frame 1   label(sender)    host that published the message
//! frame 2   label(session)
//! frame 3   label(command)
//! frame 4.. payload          opaque, application defined
//! ```

use crate::{error::Rejection, label};

/// One discrete unit of a multi-frame message.
pub type Frame = Vec<u8>;

/// Number of label frames that precede the payload.
pub const ENVELOPE_FRAMES: usize = 4;

/// Routing and intent of a message: who it is for, which session it belongs
/// to and what kind of message it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Envelope {
    pub remote: String,
    pub session: String,
    pub command: String,
}

impl Envelope {
    pub fn new(
        remote: impl Into<String>,
        session: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            remote: remote.into(),
            session: session.into(),
            command: command.into(),
        }
    }
}

/// A validated inbound message, as handed to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub envelope: Envelope,
    /// Host that published the message.
    pub sender: String,
    pub parts: Vec<Frame>,
}

/// Lays out `envelope` and `parts` as the frames of one message.
pub fn to_frames<I>(envelope: &Envelope, sender: &str, parts: I) -> Vec<Frame>
where
    I: IntoIterator<Item = Frame>,
{
    let mut frames = vec![
        label::encode(&envelope.remote),
        label::encode(sender),
        label::encode(&envelope.session),
        label::encode(&envelope.command),
    ];
    frames.extend(parts);
    frames
}

/// Splits an inbound message back into its envelope, sender and payload.
///
/// Does not check who the message is addressed to.
pub fn from_frames(frames: Vec<Frame>) -> Result<Delivery, Rejection> {
    if frames.len() < ENVELOPE_FRAMES {
        return Err(Rejection::InsufficientFrames {
            count: frames.len(),
        });
    }

    let mut frames = frames.into_iter();
    let mut next_label = || frames.next().as_deref().and_then(label::decode);
    let remote = next_label();
    let sender = next_label();
    let session = next_label();
    let command = next_label();

    let (Some(remote), Some(sender), Some(session), Some(command)) =
        (remote, sender, session, command)
    else {
        return Err(Rejection::InvalidEnvelope);
    };

    Ok(Delivery {
        envelope: Envelope {
            remote,
            session,
            command,
        },
        sender,
        parts: frames.collect(),
    })
}
