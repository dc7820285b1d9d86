use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub root: PathBuf,
    pub fetch_enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let root = std::env::var_os("FONTPACK_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".fontpack/manifests"));
        let offline = env_flag_set("FONTPACK_NO_FETCH") || env_flag_set("FONTPACK_OFFLINE");
        Self {
            root,
            fetch_enabled: !offline,
        }
    }
}

fn env_flag_set(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}
