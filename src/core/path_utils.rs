/*
 * Locates the per-user directory where the style sheet configuration is kept.
 * `directories::ProjectDirs` picks the platform convention (XDG config dir on
 * Linux, AppData/Local on Windows, Application Support on macOS).
 */
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/*
 * Returns the application's local configuration directory, creating it if it
 * does not exist yet. `None` means the platform offered no suitable location
 * or the directory could not be created.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", app_name)?;
    let config_path = proj_dirs.config_local_dir();
    if !config_path.exists() {
        if let Err(e) = fs::create_dir_all(config_path) {
            log::error!("PathUtils: Failed to create config directory {config_path:?}: {e}");
            return None;
        }
        log::debug!("PathUtils: Created config directory {config_path:?}");
    }
    Some(config_path.to_path_buf())
}

#[cfg(test)]
pub(crate) fn remove_app_config_dir(app_name: &str) {
    if let Some(proj_dirs) = ProjectDirs::from("", "", app_name) {
        let dir = proj_dirs.config_local_dir();
        if dir.exists() {
            if let Err(e) = fs::remove_dir_all(dir) {
                eprintln!("Test cleanup failed for {}: {e}", dir.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_created_and_named_after_app() {
        let unique_app_name = format!("TestApp_StylePaths_{}", rand::random::<u128>());
        remove_app_config_dir(&unique_app_name);

        let path = get_base_app_config_local_dir(&unique_app_name)
            .expect("Should return a path for a new app name");

        assert!(path.is_dir(), "Directory should exist at {path:?}");
        assert!(
            path.to_string_lossy()
                .to_lowercase()
                .contains(&unique_app_name.to_lowercase())
        );
        remove_app_config_dir(&unique_app_name);
    }

    #[test]
    fn test_config_dir_is_stable_across_calls() {
        let unique_app_name = format!("TestApp_StylePaths_Again_{}", rand::random::<u128>());

        let first = get_base_app_config_local_dir(&unique_app_name).unwrap();
        let second = get_base_app_config_local_dir(&unique_app_name).unwrap();

        assert_eq!(first, second);
        remove_app_config_dir(&unique_app_name);
    }
}
