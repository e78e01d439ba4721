mod cli;
mod execute;
mod init;

pub use cli::{Command, CrosswindCli, StartArgs, DEFAULT_CONFIG_PATH};
pub use execute::execute;
pub use init::init;
