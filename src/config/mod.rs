mod settings;

pub use settings::{
    DEFAULT_USERNAME, HandlerConfig, HandlerOptions, load_options, normalize_channel, select_icon,
};
