//! Output formatting for route and map rendering.

use std::io::{self, Write};
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use cityroute_lib::{RouteRenderMode, RouteSummary};

use crate::terminal::{supports_unicode, ColorPalette};

/// Output format accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered steps with coordinates and per-leg distances.
    #[default]
    Text,
    /// Bare `+`/`|`/`-` path listing.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Whether banners and footers may be printed around the result.
    ///
    /// JSON output stays machine readable, so it gets neither.
    pub fn is_decorated(self) -> bool {
        !matches!(self, OutputFormat::Json)
    }

    /// Render a found route to stdout.
    pub fn render_route_result(self, summary: &RouteSummary) -> io::Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Basic => print!("{}", summary.render(RouteRenderMode::Basic)),
            OutputFormat::Json => render_json(summary)?,
        }
        Ok(())
    }
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Print the CLI logo banner.
///
/// Uses box-drawing characters when the locale advertises UTF-8 and plain
/// ASCII otherwise.
pub fn print_logo() {
    let p = ColorPalette::detect();
    if supports_unicode() {
        println!(
            "{cyan}╭──────────────────────────────╮{reset}
{cyan}│{orange}  C I T Y R O U T E           {cyan}│{reset}
{cyan}│{orange}  >> A* route planner         {cyan}│{reset}
{cyan}╰──────────────────────────────╯{reset}",
            cyan = p.cyan,
            orange = p.orange,
            reset = p.reset
        );
    } else {
        println!(
            "{color}+------------------------------+
|  CITYROUTE                   |
|  >> A* ROUTE PLANNER         |
+------------------------------+{reset}",
            color = p.orange,
            reset = p.reset
        );
    }
}

/// Format an elapsed duration as `Nms` below one second, `N.NNs` above.
pub fn format_elapsed(elapsed: Duration) -> String {
    let elapsed_ms = elapsed.as_millis();
    if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: Duration) {
    let p = ColorPalette::detect();
    println!("\n{}Completed in {}{}", p.gray, format_elapsed(elapsed), p.reset);
}
