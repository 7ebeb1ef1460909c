use std::fmt;

pub(crate) struct RemoveRoute {
    pub(crate) id: u64,
}

impl fmt::Display for RemoveRoute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RemoveRoute {}", self.id)
    }
}
