pub(crate) mod browse;
pub(crate) mod categories;
pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod show;
