pub(crate) mod tcp;

pub(crate) const DEFAULT_PORT: &str = "7539";
