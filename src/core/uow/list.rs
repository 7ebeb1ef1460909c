use std::fmt;

use chrono::NaiveDate;

pub(crate) struct ListRoutes {
    // None means the current date on the server.
    pub(crate) date: Option<NaiveDate>,
}

impl fmt::Display for ListRoutes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.date {
            Some(date) => write!(f, "ListRoutes {}", date),
            None => write!(f, "ListRoutes today"),
        }
    }
}
