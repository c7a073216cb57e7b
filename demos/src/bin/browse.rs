//! Line-driven directory browser.
//!
//! Usage: `browse [DIRECTORY] [PATTERN]`, then type commands on stdin:
//! `cd PATH`, `go`, `open LABEL`, `back`, `forward`, `up`, `select LABEL...`,
//! `hidden on|off`, `pattern GLOB`, `reload`, `quit`.

use std::io::{self, BufRead, Write};

use file_selector::{Backend, Navigator, NavigatorEvent, SelectorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    file_selector_demos::init_tracing();

    let mut args = std::env::args().skip(1);
    let mut config = SelectorConfig::new();
    if let Some(dir) = args.next() {
        config = config.directory(dir);
    }
    if let Some(pattern) = args.next() {
        config = config.file_pattern(pattern);
    }

    let mut nav = Navigator::new(config, Backend::Local)?;
    print_view(&nav)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let (cmd, arg) = match line.trim().split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line.trim(), ""),
        };
        let event = match cmd {
            "" => continue,
            "quit" | "q" => break,
            "cd" => NavigatorEvent::DirectoryInput(arg.to_string()),
            "go" => NavigatorEvent::Go,
            "open" => NavigatorEvent::DoubleClick(arg.to_string()),
            "back" => NavigatorEvent::Back,
            "forward" => NavigatorEvent::Forward,
            "up" => NavigatorEvent::Up,
            "reload" => NavigatorEvent::Reload,
            "hidden" => NavigatorEvent::SetShowHidden(arg == "on"),
            "pattern" => NavigatorEvent::SetFilePattern(arg.to_string()),
            "select" => {
                let mut paths = nav.value().to_vec();
                for label in arg.split_whitespace() {
                    if let Some(path) = nav.view().path_for_label(label) {
                        paths.push(path.to_string());
                    }
                }
                NavigatorEvent::ValueChanged(paths)
            }
            other => {
                tracing::warn!(command = other, "unknown command");
                continue;
            }
        };
        if let Err(err) = nav.handle_event(event) {
            tracing::error!(%err, "command failed");
        }
        print_view(&nav)?;
    }
    Ok(())
}

fn print_view(nav: &Navigator) -> io::Result<()> {
    let view = nav.view();
    let mut out = io::stdout().lock();
    writeln!(out, "== {}", view.directory_input)?;
    for label in view.options.keys() {
        let mark = if view.denylist.contains(label) { ' ' } else { '*' };
        writeln!(out, " {mark} {label}")?;
    }
    let c = view.controls;
    writeln!(
        out,
        "[back:{} forward:{} up:{} go:{}] selected: {:?}",
        c.back, c.forward, c.up, c.go, view.value
    )?;
    out.flush()
}
