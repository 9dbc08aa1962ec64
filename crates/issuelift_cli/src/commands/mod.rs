pub(crate) mod import;
pub(crate) mod limits;
pub(crate) mod meta;
pub(crate) mod post;
pub(crate) mod shared;
pub(crate) mod show;
pub(crate) mod summary;
pub(crate) mod users;
