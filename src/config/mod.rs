mod settings;

pub use settings::{
    expand_tilde, Config, SelectorSettings, Settings, TmuxSettings, HOME_ENV, PARENT_DIR_ENV,
};
