pub const DEFAULT_ISLAND_PATH_PREFIX: &str = "/__island";

pub const SERVER_ONLY_PLUGIN_NAME: &str = "server-only-plugin";
pub const CUSTOM_HEAD_HEADER: &str = "custom-head";
pub const CUSTOM_HEAD_VALUE: &str = "hello";

pub const CONFIG_FILE_STEM: &str = "config";
