mod activate;
mod deactivate;
mod status;

pub use activate::cmd_activate;
pub use deactivate::cmd_deactivate;
pub use status::cmd_status;
