//! Path utilities: expand `~/` in user-supplied directories and files.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::expand_tilde;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("sqlite/database").to_str(), Some("sqlite/database"));
    }

    #[test]
    fn tilde_is_expanded_when_home_is_known() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/surveydb"), home.join("surveydb"));
        }
    }
}
