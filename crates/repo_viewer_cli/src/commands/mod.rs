pub(crate) mod browse;
pub(crate) mod favorites;
pub(crate) mod migrate;
pub(crate) mod output;
pub(crate) mod shared;
pub(crate) mod show;
