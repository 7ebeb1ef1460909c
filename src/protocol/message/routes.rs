use chrono::NaiveDate;

use crate::common::{ErrorKind, Result};
use crate::protocol::message::{MessageFrames, MessageType, Parse, DATE_FORMAT};

// Routes is a message in which client requests the delivery routes
// scheduled for the given date (the server's current date when absent).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Routes {
    token: String,
    date: Option<NaiveDate>,
}

impl Routes {
    pub(crate) fn new(token: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            token: token.into(),
            date,
        }
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Self> {
        let token = parse.next_string()?;
        let date = match parse.next_string_or_null()? {
            Some(s) => Some(NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|err| {
                ErrorKind::NetworkFraming(format!("invalid date frame. {}", err))
            })?),
            None => None,
        };

        parse.expect_consumed()?;

        Ok(Routes { token, date })
    }
}

impl From<Routes> for MessageFrames {
    fn from(routes: Routes) -> Self {
        let mut frames = MessageFrames::with_capacity(MessageType::Routes, 2);

        frames.push_string(routes.token);
        frames.push_string_or_null(routes.date.map(|date| date.format(DATE_FORMAT).to_string()));

        frames
    }
}
