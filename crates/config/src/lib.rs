//! Settings for mirroring a note vault into a Hugo site.
//!
//! [`Settings`] holds what the user entered.  [`resolve`] turns it into the
//! directories, exclusions and keep patterns a sync consumes, and
//! [`is_syncable`] gates the destructive part of a sync.

mod settings;
mod validate;

pub mod resolve;

pub use self::resolve::KeepList;
pub use self::settings::*;
pub use self::validate::*;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
