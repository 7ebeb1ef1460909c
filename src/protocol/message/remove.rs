use crate::common::Result;
use crate::protocol::message::{MessageFrames, MessageType, Parse};

// Remove is a message in which client requests deletion of the route with
// the given id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Remove {
    token: String,
    id: u64,
}

impl Remove {
    pub(crate) fn new(token: impl Into<String>, id: u64) -> Self {
        Self {
            token: token.into(),
            id,
        }
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Self> {
        let token = parse.next_string()?;
        let id = parse.next_uint()?;

        parse.expect_consumed()?;

        Ok(Remove { token, id })
    }
}

impl From<Remove> for MessageFrames {
    fn from(remove: Remove) -> Self {
        let mut frames = MessageFrames::with_capacity(MessageType::Remove, 2);

        frames.push_string(remove.token);
        frames.push_uint(remove.id);

        frames
    }
}
