//! Line-driven stand-in for the page: each input line is one user action.

use chemsketch::{
    application::{error::AppError, render::ViewState},
    domain::{
        molecule::RenderRequest,
        presets::{PRESETS, find_preset},
    },
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Session;

const HELP: &str = "\
render <smiles> [| name]  draw a SMILES string
preset <key>              draw a preset molecule
search <name>             look a compound up on PubChem
png | svg                 download the drawing
copy-svg | copy-embed | copy-url
status                    show what the page shows
help | quit";

const EXPORTS_DISABLED: &str = "Exports are disabled until a molecule renders.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Render(RenderRequest),
    Preset(String),
    Search(String),
    Png,
    Svg,
    CopySvg,
    CopyEmbed,
    CopyUrl,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Blank,
    Unknown(String),
}

fn parse_line(line: &str) -> Result<ShellCommand, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Err(ParseError::Blank),
        "render" => {
            let request = match rest.split_once('|') {
                Some((smiles, name)) => RenderRequest::new(smiles.trim()).with_name(name.trim()),
                None => RenderRequest::new(rest),
            };
            ShellCommand::Render(request)
        }
        "preset" => ShellCommand::Preset(rest.to_string()),
        "search" => ShellCommand::Search(rest.to_string()),
        "png" => ShellCommand::Png,
        "svg" => ShellCommand::Svg,
        "copy-svg" => ShellCommand::CopySvg,
        "copy-embed" => ShellCommand::CopyEmbed,
        "copy-url" => ShellCommand::CopyUrl,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

pub(crate) async fn run(session: &Session) -> Result<(), AppError> {
    session.controller.load_initial().await;
    print_view(&session.controller.view().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|err| AppError::unexpected(format!("failed to read input: {err}")))?
    {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(ParseError::Blank) => continue,
            Err(ParseError::Unknown(word)) => {
                println!("Unknown command `{word}`; type `help`.");
                continue;
            }
        };

        if !dispatch(session, command).await {
            break;
        }
    }
    Ok(())
}

/// Returns `false` when the session should end.
async fn dispatch(session: &Session, command: ShellCommand) -> bool {
    let controller = &session.controller;
    match command {
        ShellCommand::Render(request) => {
            controller.render(request).await;
            print_view(&controller.view().await);
        }
        ShellCommand::Preset(key) => match find_preset(&key) {
            Some(preset) => {
                controller.render(preset.request()).await;
                print_view(&controller.view().await);
            }
            None => {
                let keys: Vec<&str> = PRESETS.iter().map(|preset| preset.key).collect();
                println!("Unknown preset `{key}`; choose one of {}.", keys.join(", "));
            }
        },
        ShellCommand::Search(name) => {
            controller.search(&name).await;
            print_view(&controller.view().await);
        }
        ShellCommand::Png
        | ShellCommand::Svg
        | ShellCommand::CopySvg
        | ShellCommand::CopyEmbed
        | ShellCommand::CopyUrl => {
            let Some(snapshot) = controller.exportable_snapshot().await else {
                println!("{EXPORTS_DISABLED}");
                return true;
            };
            let exports = &session.exports;
            match command {
                ShellCommand::Png => exports.download_png(&snapshot).await,
                ShellCommand::Svg => exports.download_svg(&snapshot).await,
                ShellCommand::CopySvg => exports.copy_svg_text(&snapshot).await,
                ShellCommand::CopyEmbed => exports.copy_embed_snippet(&snapshot).await,
                _ => exports.copy_share_url(&snapshot).await,
            };
        }
        ShellCommand::Status => {
            print_view(&controller.view().await);
            println!("url: {}", controller.url_sync().location());
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return false,
    }
    true
}

fn print_view(view: &ViewState) {
    for line in describe_view(view) {
        println!("{line}");
    }
}

fn describe_view(view: &ViewState) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(status) = view.search_status.as_ref() {
        lines.push(format!("search [{}]: {}", status.kind.as_str(), status.message));
    }
    if let Some(error) = view.error.as_ref() {
        lines.push(format!("error: {error}"));
    }
    match view.surface.content() {
        Some(drawing) => lines.push(format!(
            "{} ({} {}x{})",
            view.label.as_deref().unwrap_or_default(),
            drawing.kind(),
            drawing.width(),
            drawing.height()
        )),
        None => lines.push("(nothing drawn)".to_string()),
    }
    lines.push(format!(
        "exports: {}",
        if view.exports_enabled {
            "enabled"
        } else {
            "disabled"
        }
    ));
    lines
}
