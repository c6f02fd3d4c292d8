use std::env;

use chrono::Local;
use colored::*;

mod apod;
mod config;
mod dirs;
mod download;
mod error;
mod extract;
mod logging;
mod pipeline;
mod progress;
mod sanitize;
mod wallpaper;

#[cfg(test)]
mod test_server;

use config::{Config, API_KEY_ENV};
use error::Result;
use logging::{Logger, LOG_FILE};
use pipeline::{Pipeline, RunOutcome};
use wallpaper::{Disabled, WallpaperSetter};

// Windows-specific imports for ANSI colors in the classic console
#[cfg(target_os = "windows")]
use windows::Win32::System::Console::*;

// ============================================================================
// Windows Terminal ANSI Fix
// ============================================================================
#[cfg(target_os = "windows")]
fn enable_ansi_support() {
    unsafe {
        if let Ok(handle) = GetStdHandle(STD_OUTPUT_HANDLE) {
            let mut mode: CONSOLE_MODE = CONSOLE_MODE(0);
            if GetConsoleMode(handle, &mut mode).is_ok() {
                let new_mode = mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING;
                SetConsoleMode(handle, new_mode).ok();
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn enable_ansi_support() {}

// ============================================================================
// Command Line
// ============================================================================
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Run { set_wallpaper: bool },
    ShowConfig,
    InitConfig,
    Help,
}

fn parse_args(args: &[String]) -> std::result::Result<Command, String> {
    // The command together with the word that selected it
    let mut command: Option<(Command, &str)> = None;
    let mut set_wallpaper = true;

    for arg in args {
        // Case-insensitive command matching
        match arg.to_lowercase().as_str() {
            "--no-wallpaper" => set_wallpaper = false,
            "run" | "r" if command.is_none() => command = Some((Command::Run { set_wallpaper: true }, arg.as_str())),
            "config" | "cfg" if command.is_none() => command = Some((Command::ShowConfig, arg.as_str())),
            "init-config" if command.is_none() => command = Some((Command::InitConfig, arg.as_str())),
            "help" | "--help" | "-h" | "h" | "?" => return Ok(Command::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    match command {
        None | Some((Command::Run { .. }, _)) => Ok(Command::Run { set_wallpaper }),
        Some((_, word)) if !set_wallpaper => Err(format!("--no-wallpaper does not apply to '{}'", word)),
        Some((other, _)) => Ok(other),
    }
}

fn show_help() {
    println!("{}", "+----------------------------------------------------------------+".cyan());
    println!("{}", "| NASA APOD ~ Astronomy Picture of the Day as your wallpaper     |".cyan().bold());
    println!("{}", "+----------------------------------------------------------------+".cyan());
    println!();
    println!("{}", "+-------------------------+--------------------------------------+".cyan());
    println!("{}", "| Command                 | Description                          |".cyan().bold());
    println!("{}", "+-------------------------+--------------------------------------+".cyan());
    println!("{}", "| run, r (default)        | Download today's picture & set it    |".cyan());
    println!("{}", "| run --no-wallpaper      | Download only                        |".cyan());
    println!("{}", "| config, cfg             | Show effective configuration         |".cyan());
    println!("{}", "| init-config             | Write default config.json            |".cyan());
    println!("{}", "| help, h, ?              | Show this help                       |".cyan());
    println!("{}", "+-------------------------+--------------------------------------+".cyan());
    println!();
    println!("{}", format!("  {} overrides the API key from config.json", API_KEY_ENV).dimmed());
}

// ============================================================================
// Commands
// ============================================================================
fn run(config: &Config, set_wallpaper: bool, logger: &Logger) -> Result<RunOutcome> {
    let home = dirs::home_dir()?;

    let setter: Box<dyn WallpaperSetter> = if set_wallpaper && config.set_wallpaper {
        wallpaper::detect(env::consts::OS)
    } else {
        Box::new(Disabled)
    };

    let pipeline = Pipeline {
        client: apod::build_client()?,
        metadata_url: apod::metadata_url(&config.api_url, &config.api_key),
        target_dir: dirs::target_dir(&home),
        today: Local::now().date_naive(),
        setter: setter.as_ref(),
        fail_on_wallpaper_error: config.fail_on_wallpaper_error,
        show_progress: config.show_progress,
        logger,
    };
    pipeline.run()
}

fn show_config(config: &Config, config_path: &std::path::Path) {
    println!("{}", format!("Config file: {}", config_path.display()).cyan());
    println!("{}", config.display_json());
}

fn init_config(config_path: &std::path::Path, logger: &Logger) -> Result<()> {
    if config_path.exists() {
        logger.info(&format!("Config already exists: {}", config_path.display()));
        return Ok(());
    }
    Config::default().save(config_path)?;
    logger.success(&format!("Default config written to {}", config_path.display()));
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================
fn main() {
    enable_ansi_support();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", format!("[ ERROR ] {}", message).red());
            println!("{}", "  Run 'apod help' for usage".cyan());
            return;
        }
    };

    if command == Command::Help {
        show_help();
        return;
    }

    // Without a home directory there is no config or log file, the run reports it
    let config_dir = dirs::home_dir().ok().map(|home| dirs::app_config_dir(&home));
    let config_path = config_dir.as_ref().map(|dir| Config::path_in(dir));
    let config = config_path
        .as_deref()
        .map(Config::load)
        .unwrap_or_default()
        .with_env_key(env::var(API_KEY_ENV).ok());

    let log_path = config_dir
        .as_ref()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .map(|dir| dir.join(LOG_FILE));
    let logger = Logger::new(log_path);

    let result = match (&command, config_path.as_deref()) {
        (Command::ShowConfig, Some(path)) => {
            show_config(&config, path);
            Ok(())
        }
        (Command::InitConfig, Some(path)) => init_config(path, &logger),
        (Command::ShowConfig | Command::InitConfig, None) => Err(error::ApodError::HomeDirUnavailable),
        (Command::Run { set_wallpaper }, _) => {
            println!();
            logger.banner("NASA APOD Downloader");
            run(&config, *set_wallpaper, &logger).map(|outcome| match outcome {
                RunOutcome::Saved { path, .. } => {
                    logger.success(&format!("Done: {}", path.display()));
                }
                RunOutcome::NotAnImage { .. } => {
                    logger.info("Nothing to download today");
                }
            })
        }
        (Command::Help, _) => Ok(()),
    };

    // Errors end the run like any other outcome; the exit status stays 0
    if let Err(e) = result {
        logger.error(&e);
    }
}
