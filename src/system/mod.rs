// System Layer
pub mod accounts;
pub mod command;
pub mod network;
pub mod proftpd_config;
pub mod service;

pub use accounts::{AccountManager, FtpUserRequest};
pub use command::{CommandRunner, SystemRunner};
pub use proftpd_config::PortDiscovery;
pub use service::{ServiceAction, ServiceManager, ServiceState};
