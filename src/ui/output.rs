use crossterm::style::Stylize;

use funcstack::config::ConfigWarning;
use funcstack::domain::services::BindWarning;

use crate::ui::json::{emit_event, events::WarningEvent};
use crate::ui::theme::{colors, icons};
use crate::ui::UiContext;

fn warning_prefix(color: bool) -> String {
    if color {
        icons::WARNING.with(colors::WARNING).to_string()
    } else {
        icons::WARNING.to_string()
    }
}

pub fn print_config_warnings(ui: &UiContext, command: &str, warnings: &[ConfigWarning]) -> std::io::Result<()> {
    for w in warnings {
        if ui.json {
            emit_event(&WarningEvent::unknown_config_key(
                command,
                &w.key,
                w.suggestion.as_deref(),
            ))?;
            continue;
        }

        let prefix = warning_prefix(ui.color);
        match w.line {
            Some(line) => eprintln!("{prefix} Unknown config key '{}' in {}:{}", w.key, w.file.display(), line),
            None => eprintln!("{prefix} Unknown config key '{}' in {}", w.key, w.file.display()),
        }
        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
    Ok(())
}

pub fn print_input_warnings(ui: &UiContext, command: &str, warnings: &[BindWarning]) -> std::io::Result<()> {
    for w in warnings {
        if ui.json {
            emit_event(&WarningEvent::unknown_input(
                command,
                &w.name,
                w.suggestion.as_deref(),
            ))?;
            continue;
        }

        eprintln!(
            "{} Input '{}' does not match any parameter",
            warning_prefix(ui.color),
            w.name
        );
        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
    Ok(())
}

pub fn success_line(ui: &UiContext, message: &str) -> String {
    if ui.color {
        format!("{} {}", icons::SUCCESS.with(colors::SUCCESS), message)
    } else {
        format!("{} {}", icons::SUCCESS, message)
    }
}

pub fn error_line(color: bool, message: &str) -> String {
    if color {
        format!("{} {}", icons::ERROR.with(colors::ERROR), message)
    } else {
        format!("{} {}", icons::ERROR, message)
    }
}
