/// Walked chunk listing command.
pub mod chunks;
/// Image-level statistics command.
pub mod info;
/// Frame marker listing command.
pub mod markers;
/// Animation path enumeration command.
pub mod paths;
/// Single record inspection command.
pub mod record;
/// Shared CLI parsing and rendering helpers.
pub mod util;
/// Serializable views over decoded records.
pub(crate) mod view;
