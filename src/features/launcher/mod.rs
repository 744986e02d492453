//! # Feature: App & Search Launcher
//!
//! Opens desktop applications by friendly name and runs a Google search in
//! the default browser. Process spawning sits behind [`Launcher`] so the
//! handlers can be exercised without touching the desktop.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use log::{debug, info, warn};
use std::io;
use std::process::Stdio;
use tokio::process::Command;
use tokio::runtime::Handle;

/// Friendly name -> candidate commands, tried in order
pub const APP_COMMANDS: &[(&str, &[&str])] = &[
    ("notepad", &["notepad.exe", "notepad", "gedit", "kate"]),
    ("chrome", &["chrome.exe", "google-chrome", "chromium"]),
    ("firefox", &["firefox.exe", "firefox"]),
    ("calculator", &["calc.exe", "gnome-calculator", "kcalc"]),
    ("spotify", &["spotify.exe", "spotify"]),
    ("vlc", &["vlc.exe", "vlc"]),
    ("paint", &["mspaint.exe", "pinta", "gimp"]),
    ("terminal", &["cmd.exe", "powershell.exe", "gnome-terminal", "xterm"]),
    ("explorer", &["explorer.exe", "nautilus", "dolphin"]),
    ("word", &["winword.exe", "libreoffice --writer"]),
    ("excel", &["excel.exe", "libreoffice --calc"]),
];

const APP_TRIGGERS: &[&str] = &["open", "launch", "start", "run"];
const SEARCH_TRIGGERS: &[&str] = &[
    "search for",
    "google",
    "look up",
    "find information about",
    "search",
    "find",
];

const SEARCH_URL: &str = "https://www.google.com/search?q=";

pub trait Launcher: Send + Sync {
    /// Start `program` detached from the assistant
    fn spawn(&self, program: &str, args: &[&str]) -> io::Result<()>;

    /// Open `url` in the default browser
    fn open_url(&self, url: &str) -> io::Result<()>;
}

/// Spawns real processes. Each child is awaited on the runtime so it is
/// reaped when it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn spawn(&self, program: &str, args: &[&str]) -> io::Result<()> {
        let runtime = Handle::try_current().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        debug!("Spawned {program} (pid {:?})", child.id());

        let program = program.to_string();
        runtime.spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("{program} exited with {status}"),
                Err(e) => warn!("Failed to wait on {program}: {e}"),
            }
        });
        Ok(())
    }

    fn open_url(&self, url: &str) -> io::Result<()> {
        if cfg!(target_os = "windows") {
            self.spawn("cmd", &["/C", "start", "", url])
        } else if cfg!(target_os = "macos") {
            self.spawn("open", &[url])
        } else {
            self.spawn("xdg-open", &[url])
        }
    }
}

/// Remembers what it was asked to launch; `available` lists the programs
/// that "exist"
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    available: Vec<String>,
    launched: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingLauncher {
    pub fn with_programs(available: &[&str]) -> Self {
        Self {
            available: available.iter().map(|p| p.to_string()).collect(),
            launched: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Every successful spawn or url, as "program arg arg" or the url itself
    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn record(&self, entry: String) {
        if let Ok(mut launched) = self.launched.lock() {
            launched.push(entry);
        }
    }
}

#[cfg(test)]
impl Launcher for RecordingLauncher {
    fn spawn(&self, program: &str, args: &[&str]) -> io::Result<()> {
        if !self.available.iter().any(|p| p == program) {
            return Err(io::Error::new(io::ErrorKind::NotFound, program.to_string()));
        }
        let mut entry = program.to_string();
        for arg in args {
            entry.push(' ');
            entry.push_str(arg);
        }
        self.record(entry);
        Ok(())
    }

    fn open_url(&self, url: &str) -> io::Result<()> {
        self.record(url.to_string());
        Ok(())
    }
}

/// Text after the first trigger word, or the whole text
fn after_first_trigger(text: &str, triggers: &[&str]) -> String {
    let text = text.to_lowercase();
    triggers
        .iter()
        .find_map(|trigger| text.split_once(trigger).map(|(_, rest)| rest.trim().to_string()))
        .unwrap_or_else(|| text.trim().to_string())
}

/// "open chrome" -> "chrome"
pub fn extract_app_name(text: &str) -> String {
    after_first_trigger(text, APP_TRIGGERS)
}

/// "search for rust tutorials" -> "rust tutorials"
pub fn extract_query(text: &str) -> String {
    after_first_trigger(text, SEARCH_TRIGGERS)
}

/// Candidate commands for an app name; unknown names are tried verbatim
pub fn candidate_commands(app_name: &str) -> Vec<String> {
    APP_COMMANDS
        .iter()
        .find(|(key, _)| key.contains(app_name) || app_name.contains(key))
        .map(|(_, commands)| commands.iter().map(|c| c.to_string()).collect())
        .unwrap_or_else(|| vec![app_name.to_string()])
}

pub fn search_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{SEARCH_URL}{encoded}")
}

/// Try each candidate for `app_name`; returns the command that started
pub fn open_app(launcher: &dyn Launcher, app_name: &str) -> Option<String> {
    for command in candidate_commands(app_name) {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();
        match launcher.spawn(program, &args) {
            Ok(()) => {
                info!("Opened {app_name} via `{command}`");
                return Some(command);
            }
            Err(e) => debug!("Could not start `{command}`: {e}"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_app_name() {
        assert_eq!(extract_app_name("open notepad"), "notepad");
        assert_eq!(extract_app_name("please Launch Spotify"), "spotify");
        assert_eq!(extract_app_name("calculator"), "calculator");
    }

    #[test]
    fn test_extract_query() {
        assert_eq!(extract_query("search for python tutorials"), "python tutorials");
        assert_eq!(extract_query("google how to cook pasta"), "how to cook pasta");
        assert_eq!(extract_query("look up weather today"), "weather today");
        assert_eq!(extract_query("search"), "");
    }

    #[test]
    fn test_candidate_commands() {
        assert_eq!(
            candidate_commands("chrome"),
            vec!["chrome.exe", "google-chrome", "chromium"]
        );
        // partial match in either direction
        assert_eq!(candidate_commands("calc")[0], "calc.exe");
        assert_eq!(candidate_commands("the vlc player")[0], "vlc.exe");
        assert_eq!(candidate_commands("blender"), vec!["blender"]);
    }

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            search_url("rust & c++"),
            "https://www.google.com/search?q=rust+%26+c%2B%2B"
        );
    }

    #[test]
    fn test_open_app_falls_through_candidates() {
        let launcher = RecordingLauncher::with_programs(&["libreoffice"]);
        assert_eq!(
            open_app(&launcher, "word").as_deref(),
            Some("libreoffice --writer")
        );
        assert_eq!(launcher.launched(), vec!["libreoffice --writer"]);

        assert_eq!(open_app(&launcher, "firefox"), None);
    }

    /// Children of `parent` that have exited but not been waited on
    #[cfg(target_os = "linux")]
    fn zombie_children(parent: u32) -> usize {
        let Ok(entries) = std::fs::read_dir("/proc") else {
            return 0;
        };
        entries
            .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path().join("stat")).ok())
            .filter(|stat| {
                // "pid (comm) state ppid ..."; comm may contain spaces
                let Some((_, rest)) = stat.rsplit_once(')') else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                let state = fields.next();
                let ppid = fields.next().and_then(|p| p.parse::<u32>().ok());
                state == Some("Z") && ppid == Some(parent)
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_system_launcher_reaps_children() {
        for _ in 0..3 {
            SystemLauncher.spawn("true", &[]).unwrap();
        }
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert_eq!(zombie_children(std::process::id()), 0);
    }

    #[test]
    fn test_system_launcher_needs_a_runtime() {
        let err = SystemLauncher.spawn("true", &[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
