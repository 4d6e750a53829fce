pub(crate) mod install;
pub(crate) mod list;
pub(crate) mod remove;
pub(crate) mod search;
pub(crate) mod update;

pub(crate) use install::install_plugin;
pub(crate) use list::list_plugins;
pub(crate) use remove::remove_plugin;
pub(crate) use search::search_plugins;
pub(crate) use update::update_plugin;
