//! Property tests for configuration precedence and the browse parser

use gst_console::browse::BrowseCommand;
use gst_console::config::{FileConfig, Overrides, Settings, ENV_API_URL, ENV_EXPORT_DIR};
use proptest::prelude::*;
use std::path::PathBuf;

fn url() -> impl Strategy<Value = String> {
    "http://[a-z]{1,8}\\.test"
}

// ============================================================
// Configuration precedence
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The most specific source that gives a value wins: flag, env, file, default
    #[test]
    fn prop_api_url_precedence(
        flag in proptest::option::of(url()),
        env in proptest::option::of(url()),
        file in proptest::option::of(url()),
    ) {
        let file_config = FileConfig {
            api_url: file.clone(),
            ..FileConfig::default()
        };
        let env_value = env.clone();
        let settings = Settings::resolve(
            file_config,
            |key| if key == ENV_API_URL { env_value.clone() } else { None },
            Overrides { api_url: flag.clone(), ..Overrides::default() },
        );

        let expected = flag
            .or(env)
            .or(file)
            .unwrap_or_else(|| gst_console::config::DEFAULT_API_URL.to_string());
        prop_assert_eq!(settings.api_url, expected);
    }

    /// A blank environment value never hides the file value
    #[test]
    fn prop_blank_env_is_ignored(blank in "[ \t]{0,4}", dir in "[a-z]{1,8}") {
        let settings = Settings::resolve(
            FileConfig {
                export_dir: Some(PathBuf::from(&dir)),
                ..FileConfig::default()
            },
            |key| if key == ENV_EXPORT_DIR { Some(blank.clone()) } else { None },
            Overrides::default(),
        );
        prop_assert_eq!(settings.export_dir, PathBuf::from(dir));
    }
}

// ============================================================
// Browse parser
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_parse_never_panics(line in "\\PC{0,40}") {
        let _ = BrowseCommand::parse(&line);
    }

    #[test]
    fn prop_page_numbers_parse(page in 1usize..10_000, pad in " {0,3}") {
        let line = format!("{}page {}{}", pad, page, pad);
        prop_assert_eq!(BrowseCommand::parse(&line), Ok(Some(BrowseCommand::Page(page))));
    }

    /// Search text is kept as typed apart from surrounding whitespace
    #[test]
    fn prop_search_keeps_text(text in "[A-Za-z0-9][A-Za-z0-9 ]{0,14}[A-Za-z0-9]") {
        let line = format!("search {}", text);
        prop_assert_eq!(BrowseCommand::parse(&line), Ok(Some(BrowseCommand::Search(text))));
    }
}
