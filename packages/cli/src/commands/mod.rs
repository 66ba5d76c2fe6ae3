pub mod init;
pub mod migrate;
pub mod resolve;
pub mod themes;

pub use init::{init, InitArgs};
pub use migrate::{migrate, MigrateArgs};
pub use resolve::{resolve, ResolveArgs};
pub use themes::{themes, ThemesArgs};
