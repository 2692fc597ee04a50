pub mod settings;

pub use settings::{
    config_path, load_settings, load_settings_from, save_settings, save_settings_to,
    ConnectionConfig, Credentials, Settings,
};
