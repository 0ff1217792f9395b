pub mod at;
pub mod sender;
pub mod settings;

pub use at::{AtCommand, AtParam, COMMAND_PAYLOAD};
pub use sender::{send_command, send_datagram, CommandError, CMD_PORT, DRONE_ADDR};
pub use settings::{config_filez, load_settings};
