use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::activity::github::DEFAULT_API_URL;
use crate::cli::{ActivityCli, TaskCli};
use crate::error::{Error, Result};
use crate::tasks::store::DEFAULT_STORE_FILE;

pub const DEFAULT_CONFIG_FILE: &str = "devtrack.toml";
pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_PER_PAGE: u32 = 30;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub tasks: TasksSection,
    #[serde(default)]
    pub activity: ActivitySection,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TasksSection {
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ActivitySection {
    pub username: Option<String>,
    pub window_days: Option<u32>,
    pub per_page: Option<u32>,
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskConfig {
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityConfig {
    pub username: String,
    pub window_days: u32,
    pub per_page: u32,
    pub api_url: String,
}

impl TaskConfig {
    pub fn load(cli: &TaskCli) -> Result<Self> {
        let file = read_config_file(cli.config.as_deref())?;
        merge_tasks(file, cli)
    }
}

impl ActivityConfig {
    pub fn load(cli: &ActivityCli) -> Result<Self> {
        let file = read_config_file(cli.config.as_deref())?;
        merge_activity(file, cli)
    }
}

/// Read the config file. An explicit path must exist; the default one is optional.
pub fn read_config_file(explicit: Option<&str>) -> Result<ConfigFile> {
    let (path, required) = match explicit {
        Some(p) => (Path::new(p), true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if required {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse the file's structure only. Values are checked in `merge_tasks` and
/// `merge_activity`, so each binary rejects only the section it reads.
pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    Ok(config)
}

fn validate_store_file(file: &str) -> Result<()> {
    if file.trim().is_empty() {
        return Err(Error::ConfigValidation(
            "tasks.file must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// GitHub logins are ASCII alphanumerics and hyphens, never leading with a hyphen.
fn validate_username(username: &str) -> Result<()> {
    let valid = !username.is_empty()
        && !username.starts_with('-')
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(Error::ConfigValidation(format!(
            "invalid GitHub username: '{username}'"
        )));
    }
    Ok(())
}

fn validate_window_days(days: u32) -> Result<()> {
    if days == 0 {
        return Err(Error::ConfigValidation(
            "window_days must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn validate_per_page(per_page: u32) -> Result<()> {
    if !(1..=100).contains(&per_page) {
        return Err(Error::ConfigValidation(format!(
            "per_page must be between 1 and 100 (got {per_page})"
        )));
    }
    Ok(())
}

fn validate_api_url(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::ConfigValidation(format!(
            "api_url must start with http:// or https:// (got {url})"
        )));
    }
    Ok(())
}

pub fn merge_tasks(file: ConfigFile, cli: &TaskCli) -> Result<TaskConfig> {
    let path = cli
        .file
        .clone()
        .or(file.tasks.file)
        .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());
    validate_store_file(&path)?;
    Ok(TaskConfig {
        file: PathBuf::from(path),
    })
}

/// CLI values win over the file, the file over built-in defaults. CLI values
/// go through the same checks as file values.
pub fn merge_activity(file: ConfigFile, cli: &ActivityCli) -> Result<ActivityConfig> {
    let activity = file.activity;

    let username = cli.username.clone().or(activity.username).ok_or_else(|| {
        Error::Usage(
            "no username given (pass USERNAME or set activity.username in the config file)"
                .to_string(),
        )
    })?;
    let window_days = cli
        .days
        .or(activity.window_days)
        .unwrap_or(DEFAULT_WINDOW_DAYS);
    let per_page = cli
        .per_page
        .or(activity.per_page)
        .unwrap_or(DEFAULT_PER_PAGE);
    let api_url = cli
        .api_url
        .clone()
        .or(activity.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    validate_username(&username)?;
    validate_window_days(window_days)?;
    validate_per_page(per_page)?;
    validate_api_url(&api_url)?;

    Ok(ActivityConfig {
        username,
        window_days,
        per_page,
        api_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
[tasks]
file = "/tmp/tasks.json"

[activity]
username = "octocat"
window_days = 7
per_page = 100
api_url = "http://localhost:9000"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.tasks.file.as_deref(), Some("/tmp/tasks.json"));
        assert_eq!(config.activity.username.as_deref(), Some("octocat"));
        assert_eq!(config.activity.window_days, Some(7));
        assert_eq!(config.activity.per_page, Some(100));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_parse_unknown_field() {
        let err = parse_config(r#"bogus = "value""#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_parse_unknown_section_field() {
        let err = parse_config("[activity]\ntoken = \"x\"").unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    fn activity_from(toml: &str, args: &[&str]) -> Result<ActivityConfig> {
        let cli = ActivityCli::parse_from(args);
        merge_activity(parse_config(toml)?, &cli)
    }

    fn tasks_from(toml: &str) -> Result<TaskConfig> {
        let cli = TaskCli::parse_from(["task-cli", "list"]);
        merge_tasks(parse_config(toml)?, &cli)
    }

    #[test]
    fn test_zero_window_days_in_file() {
        let err = activity_from("[activity]\nwindow_days = 0", &["github-activity", "octocat"])
            .unwrap_err();
        assert!(err.to_string().contains("window_days must be > 0"));
    }

    #[test]
    fn test_per_page_out_of_range_in_file() {
        let err = activity_from("[activity]\nper_page = 101", &["github-activity", "octocat"])
            .unwrap_err();
        assert!(err.to_string().contains("per_page must be between 1 and 100"));
    }

    #[test]
    fn test_bad_api_url_in_file() {
        let err = activity_from(
            "[activity]\napi_url = \"ftp://example.com\"",
            &["github-activity", "octocat"],
        )
        .unwrap_err();
        assert!(err.to_string().contains("api_url must start with"));
    }

    #[test]
    fn test_bad_username_in_file() {
        let err = activity_from("[activity]\nusername = \"../etc\"", &["github-activity"])
            .unwrap_err();
        assert!(err.to_string().contains("invalid GitHub username"));
    }

    #[test]
    fn test_empty_store_file_in_file() {
        let err = tasks_from("[tasks]\nfile = \"\"").unwrap_err();
        assert!(err.to_string().contains("tasks.file must not be empty"));
    }

    #[test]
    fn test_bad_activity_section_does_not_affect_tasks() {
        let toml = "[tasks]\nfile = \"mine.json\"\n\n[activity]\nper_page = 500";
        let config = tasks_from(toml).unwrap();
        assert_eq!(config.file, PathBuf::from("mine.json"));
    }

    #[test]
    fn test_bad_tasks_section_does_not_affect_activity() {
        let config =
            activity_from("[tasks]\nfile = \"\"", &["github-activity", "octocat"]).unwrap();
        assert_eq!(config.username, "octocat");
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let err = read_config_file(Some("/nonexistent/devtrack.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_tasks_defaults_applied() {
        let cli = TaskCli::parse_from(["task-cli", "list"]);
        let config = merge_tasks(ConfigFile::default(), &cli).unwrap();
        assert_eq!(config.file, PathBuf::from("tasks.json"));
    }

    #[test]
    fn test_tasks_cli_overrides_file() {
        let file = ConfigFile {
            tasks: TasksSection {
                file: Some("from-file.json".to_string()),
            },
            ..Default::default()
        };
        let cli = TaskCli::parse_from(["task-cli", "--file", "from-cli.json", "list"]);
        let config = merge_tasks(file.clone(), &cli).unwrap();
        assert_eq!(config.file, PathBuf::from("from-cli.json"));

        let cli = TaskCli::parse_from(["task-cli", "list"]);
        let config = merge_tasks(file, &cli).unwrap();
        assert_eq!(config.file, PathBuf::from("from-file.json"));
    }

    #[test]
    fn test_activity_defaults_applied() {
        let cli = ActivityCli::parse_from(["github-activity", "octocat"]);
        let config = merge_activity(ConfigFile::default(), &cli).unwrap();
        assert_eq!(config.username, "octocat");
        assert_eq!(config.window_days, 30);
        assert_eq!(config.per_page, 30);
        assert_eq!(config.api_url, "https://api.github.com");
    }

    #[test]
    fn test_activity_cli_overrides_config() {
        let file = ConfigFile {
            activity: ActivitySection {
                username: Some("file-user".to_string()),
                window_days: Some(14),
                per_page: Some(50),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = ActivityCli::parse_from(["github-activity", "cli-user", "--days", "3"]);
        let config = merge_activity(file, &cli).unwrap();
        assert_eq!(config.username, "cli-user"); // CLI wins
        assert_eq!(config.window_days, 3); // CLI wins
        assert_eq!(config.per_page, 50); // file value kept
    }

    #[test]
    fn test_activity_username_from_file() {
        let file = ConfigFile {
            activity: ActivitySection {
                username: Some("file-user".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = ActivityCli::parse_from(["github-activity"]);
        let config = merge_activity(file, &cli).unwrap();
        assert_eq!(config.username, "file-user");
    }

    #[test]
    fn test_activity_missing_username() {
        let cli = ActivityCli::parse_from(["github-activity"]);
        let err = merge_activity(ConfigFile::default(), &cli).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn test_activity_cli_values_validated() {
        let cli = ActivityCli::parse_from(["github-activity", "octocat", "--days", "0"]);
        let err = merge_activity(ConfigFile::default(), &cli).unwrap_err();
        assert!(err.to_string().contains("window_days must be > 0"));
    }
}
