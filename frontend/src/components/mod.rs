pub mod attendance;
pub mod toast;
pub mod zone_config;
