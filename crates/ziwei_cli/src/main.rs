use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ziwei_board::{
    BoardBinding, BoardSession, CellBinding, CellRenderer, ChartSnapshot, DateDescriptor,
    DateSelection, DestinyChart, GridSlot, LogSink, RuntimeContext, SnapshotEngine, index_at,
};
use ziwei_calendar::{LunarCalendar, LunarDate, SolarDate, TableCalendar};

#[derive(Parser)]
#[command(name = "ziwei", about = "ZiWei destiny board CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a solar date to the lunar calendar
    Lunar {
        /// Solar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Convert a lunar date to the solar calendar
    Solar {
        /// Lunar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// The month is the leap month
        #[arg(long)]
        leap: bool,
    },
    /// Print which cell index sits in each square of the board
    Layout,
    /// Render a chart snapshot as a text board
    Board {
        /// Chart snapshot (JSON)
        #[arg(long)]
        chart: PathBuf,
        /// Observation date in the solar calendar (YYYY-MM-DD)
        #[arg(long, conflicts_with = "lunar")]
        solar: Option<String>,
        /// Observation date in the lunar calendar (YYYY-MM-DD)
        #[arg(long)]
        lunar: Option<String>,
        /// The lunar observation month is a leap month
        #[arg(long, requires = "lunar")]
        leap: bool,
        /// Display detail level (0 = major stars only)
        #[arg(long)]
        scope: Option<u32>,
        /// Log runtime resolution to stderr
        #[arg(long)]
        trace: bool,
    },
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Route `tracing` events and `log` records from the board crate to stderr.
///
/// Returns false when a global subscriber is already installed.
fn init_trace() -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .try_init()
        .is_ok()
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Display columns per cell.
const CELL_WIDTH: usize = 18;
/// Text lines per cell.
const CELL_LINES: usize = 4;
/// Marker for the cell on the transiting year branch.
const YEAR_MARKER: &str = "流年";

/// CJK ideographs take two terminal columns.
fn char_width(ch: char) -> usize {
    if u32::from(ch) >= 0x1100 { 2 } else { 1 }
}

/// Truncate or pad `text` to exactly `width` columns.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(" ")
    }
}

struct TextCell;

impl<B: DestinyChart + ?Sized> CellRenderer<B> for TextCell {
    type Output = Vec<String>;

    fn render(&self, binding: &CellBinding<'_, B>) -> Vec<String> {
        let cell = binding.cell;
        let mut lines = vec![
            format!(
                "{} {}{}",
                cell.palace,
                cell.sky.display_name(),
                cell.ground.display_name()
            ),
            join_or_dash(&cell.major_stars),
        ];
        if binding.scope > 0 {
            lines.push(join_or_dash(&cell.minor_stars));
        }
        if binding.runtime.is_some_and(|rt| rt.year_ground == cell.ground) {
            lines.push(YEAR_MARKER.to_string());
        }
        lines
    }
}

fn overlay_lines(runtime: Option<&RuntimeContext>) -> Vec<String> {
    match runtime {
        Some(rt) => {
            let mut lines = vec![format!(
                "{YEAR_MARKER} {} {}{}",
                rt.lunar,
                rt.year_sky.display_name(),
                rt.year_ground.display_name()
            )];
            lines.extend(rt.extras.iter().map(|(k, v)| format!("{k}: {v}")));
            lines
        }
        None => vec!["本命盤".to_string()],
    }
}

fn border(row: usize) -> String {
    let dash = "-".repeat(CELL_WIDTH);
    if row == 2 {
        let gap = " ".repeat(2 * CELL_WIDTH + 1);
        format!("+{dash}+{gap}+{dash}+")
    } else {
        format!("+{dash}+{dash}+{dash}+{dash}+")
    }
}

fn draw_board<B: DestinyChart + ?Sized>(board: &BoardBinding<'_, B>) -> String {
    let rendered: Vec<(GridSlot, Vec<String>)> = board.render_with(&TextCell);
    let mut blocks: [[Option<&[String]>; 4]; 4] = [[None; 4]; 4];
    for (slot, lines) in &rendered {
        let (row, col) = slot.coordinates();
        blocks[usize::from(row)][usize::from(col)] = Some(lines.as_slice());
    }

    let runtime = board.cells().next().and_then(|b| b.runtime);
    let mut centre: Vec<String> = board.center().lines().to_vec();
    centre.push(String::new());
    centre.extend(overlay_lines(runtime));

    let mut out = String::new();
    for (row, row_blocks) in blocks.iter().enumerate() {
        out.push_str(&border(row));
        out.push('\n');
        for line in 0..CELL_LINES {
            out.push('|');
            for (col, block) in row_blocks.iter().enumerate() {
                let in_centre = (1..=2).contains(&row) && (1..=2).contains(&col);
                if in_centre {
                    if col == 1 {
                        let text = centre
                            .get((row - 1) * CELL_LINES + line)
                            .map_or("", String::as_str);
                        out.push_str(&fit(text, 2 * CELL_WIDTH + 1));
                        out.push('|');
                    }
                    continue;
                }
                let text = block.and_then(|lines| lines.get(line)).map_or("", String::as_str);
                out.push_str(&fit(text, CELL_WIDTH));
                out.push('|');
            }
            out.push('\n');
        }
    }
    out.push_str(&border(0));
    out.push('\n');
    out
}

fn draw_layout() -> String {
    let mut out = String::new();
    for row in 0..4u8 {
        for col in 0..4u8 {
            match index_at(row, col) {
                Some(index) => out.push_str(&format!("[{index:>2}]")),
                None if col == 1 => out.push_str("[      ]"),
                None => {}
            }
        }
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// `YYYY-MM-DD` without calendar validation; the lunar path reuses it.
fn parse_date(s: &str) -> SolarDate {
    s.parse::<SolarDate>().unwrap_or_else(|e| {
        eprintln!("Invalid date '{s}': {e}");
        std::process::exit(1);
    })
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lunar { date } => {
            let d = parse_date(&date);
            match TableCalendar::new().solar_to_lunar(d.year, d.month, d.day) {
                Ok(lunar) => {
                    let (sky, ground) = lunar.year_pair();
                    println!(
                        "{d} -> {lunar} ({}{}年)",
                        sky.display_name(),
                        ground.display_name()
                    );
                }
                Err(e) => {
                    eprintln!("Conversion failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Solar { date, leap } => {
            let d = parse_date(&date);
            let lunar = LunarDate::new(d.year, d.month, d.day, leap);
            match TableCalendar::new().lunar_to_solar(&lunar) {
                Ok(solar) => println!("{lunar} -> {solar}"),
                Err(e) => {
                    eprintln!("Conversion failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Layout => print!("{}", draw_layout()),
        Commands::Board {
            chart,
            solar,
            lunar,
            leap,
            scope,
            trace,
        } => {
            if trace {
                init_trace();
            }
            let snapshot = ChartSnapshot::load(&chart).unwrap_or_else(|e| {
                eprintln!("Failed to load chart: {e}");
                std::process::exit(1);
            });
            let date = match (solar, lunar) {
                (Some(s), _) => {
                    let d = parse_date(&s);
                    DateDescriptor::solar(d.year, d.month, d.day)
                }
                (None, Some(s)) => {
                    let d = parse_date(&s);
                    DateDescriptor::lunar(d.year, d.month, d.day, leap)
                }
                (None, None) => DateDescriptor::default(),
            };
            let requested = date != DateDescriptor::default();

            tracing::debug!(
                cells = snapshot.cells.len(),
                path = %chart.display(),
                "chart loaded"
            );
            let config = snapshot.config.clone();
            let mut session =
                BoardSession::new(SnapshotEngine::new(snapshot), TableCalendar::new(), LogSink);
            let selection = DateSelection { date, scope };
            let view = session.board(&config, &selection).unwrap_or_else(|e| {
                eprintln!("Failed to bind board: {e}");
                std::process::exit(1);
            });
            if requested {
                if let Some(u) = &view.unavailable {
                    eprintln!("Overlay unavailable: {u}");
                }
            }
            print!("{}", draw_board(&view.binding));
        }
    }
}
