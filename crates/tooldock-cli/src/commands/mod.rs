pub(crate) mod forward;
pub(crate) mod plugin;
