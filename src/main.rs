use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use placement_stats::data::compare::compare;
use placement_stats::data::loader::load_file;
use placement_stats::data::model::{
    na_count, na_text, Degree, Institution, SortDirection, SortKey, YearOffset,
};
use placement_stats::data::query::QueryRow;
use placement_stats::data::trend::trend;
use placement_stats::recent::{FileStore, RecentSearches, DEFAULT_CAPACITY};
use placement_stats::state::ViewState;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "placement-stats",
    version,
    about = "Browse, search, sort and compare college placement statistics"
)]
struct Cli {
    /// Path to the colleges JSON dataset
    #[arg(short, long, global = true, default_value = "colleges.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List branch rows, optionally searched and sorted
    Query {
        #[arg(long, value_enum, default_value_t = DegreeArg::Ug)]
        degree: DegreeArg,
        #[arg(long, value_enum, default_value_t = YearArg::Current)]
        year: YearArg,
        /// Case-insensitive substring match on the institution name
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Emit rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Side-by-side comparison of every institution's branches
    Compare {
        #[arg(long, value_enum, default_value_t = DegreeArg::Ug)]
        degree: DegreeArg,
        #[arg(long, value_enum, default_value_t = YearArg::Current)]
        year: YearArg,
        /// Emit rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Placement trend for one branch of one institution
    Trend {
        /// Institution key (e.g. iit_bombay)
        key: String,
        /// Branch identifier, matched exactly (e.g. CSE)
        branch: String,
        #[arg(long, value_enum, default_value_t = DegreeArg::Ug)]
        degree: DegreeArg,
    },
    /// Full stats for one institution; records it as a recent search
    Stats {
        /// Institution key (e.g. iit_bombay)
        key: String,
        #[arg(long, value_enum, default_value_t = DegreeArg::Ug)]
        degree: DegreeArg,
        /// Where the recent-search list is kept
        #[arg(long, default_value = "recent_searches.json")]
        recent_file: PathBuf,
    },
    /// Show the recent-search list, most recent first
    Recent {
        #[arg(long, default_value = "recent_searches.json")]
        recent_file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DegreeArg {
    Ug,
    Pg,
}

impl From<DegreeArg> for Degree {
    fn from(arg: DegreeArg) -> Self {
        match arg {
            DegreeArg::Ug => Degree::Ug,
            DegreeArg::Pg => Degree::Pg,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum YearArg {
    Current,
    OneBack,
    TwoBack,
}

impl From<YearArg> for YearOffset {
    fn from(arg: YearArg) -> Self {
        match arg {
            YearArg::Current => YearOffset::Current,
            YearArg::OneBack => YearOffset::OneBack,
            YearArg::TwoBack => YearOffset::TwoBack,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Median,
    Average,
    Placement,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Median => SortKey::MedianPackage,
            SortArg::Average => SortKey::AveragePackage,
            SortArg::Placement => SortKey::PlacementPercentage,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Query {
            degree,
            year,
            search,
            sort,
            desc,
            json,
        } => {
            let dataset = load_file(&cli.data)?;
            let mut state = ViewState::default();
            state.set_dataset(dataset);
            state.set_degree(degree.into());
            state.set_year_offset(year.into());
            if let Some(search) = search {
                state.set_search(search);
            }
            if let Some(sort) = sort {
                state.sort_key = Some(sort.into());
                state.sort_direction = if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                state.requery();
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&state.rows)?);
                return Ok(());
            }
            print_query_rows(&state.rows);
        }
        Command::Compare { degree, year, json } => {
            let dataset = load_file(&cli.data)?;
            let rows = compare(&dataset, degree.into(), year.into());
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            if rows.is_empty() {
                println!("No data available.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                "College",
                "Branch",
                "Median (LPA)",
                "Average (LPA)",
                "Placement %",
            ]);
            for row in &rows {
                table.push(vec![
                    row.institution_name.clone(),
                    row.branch.clone(),
                    na_text(row.median_package),
                    na_text(row.average_package),
                    percent_text(row.placement_percentage),
                ]);
            }
            table.print();
        }
        Command::Trend {
            key,
            branch,
            degree,
        } => {
            let dataset = load_file(&cli.data)?;
            let Some(institution) = dataset.get(&key) else {
                println!("Institution {key:?} not found.");
                return Ok(());
            };
            let points = trend(institution, degree.into(), &branch);
            if points.is_empty() {
                println!("No trend data for branch {branch:?}.");
                return Ok(());
            }
            println!(
                "{} – {} – {branch} placement trend (LPA)",
                institution.name,
                Degree::from(degree)
            );
            let mut table = Table::new(vec!["Year", "Highest", "Median", "Lowest"]);
            for point in &points {
                table.push(vec![
                    point.label.to_string(),
                    format!("{:.2}", point.highest),
                    format!("{:.2}", point.median),
                    format!("{:.2}", point.lowest),
                ]);
            }
            table.print();
        }
        Command::Stats {
            key,
            degree,
            recent_file,
        } => {
            let dataset = load_file(&cli.data)?;
            let Some(institution) = dataset.get(&key) else {
                println!("Institution {key:?} not found.");
                return Ok(());
            };
            print_institution(institution, degree.into());

            let mut recent =
                RecentSearches::open(FileStore::new(recent_file), DEFAULT_CAPACITY);
            recent.insert(&key)?;
        }
        Command::Recent { recent_file } => {
            let dataset = load_file(&cli.data)?;
            let recent = RecentSearches::open(FileStore::new(recent_file), DEFAULT_CAPACITY);
            if recent.is_empty() {
                println!("No recent searches.");
                return Ok(());
            }
            for key in recent.keys() {
                match dataset.get(key) {
                    Some(inst) => println!("{key}  ({})", inst.name),
                    None => println!("{key}  (not in dataset)"),
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

fn print_query_rows(rows: &[QueryRow]) {
    if rows.is_empty() {
        println!("No data available.");
        return;
    }
    let mut table = Table::new(vec![
        "College",
        "Branch",
        "Highest",
        "Lowest",
        "Median",
        "Average",
        "Placement %",
        "Registered",
        "Placed",
    ]);
    for row in rows {
        let s = &row.stat;
        table.push(vec![
            row.institution_name.clone(),
            s.branch.clone(),
            na_text(s.highest_package),
            na_text(s.lowest_package),
            na_text(s.median_package),
            na_text(s.average_package),
            percent_text(s.placement_percentage),
            na_count(s.registered_students),
            na_count(s.placed_students),
        ]);
    }
    table.print();
}

fn print_institution(institution: &Institution, degree: Degree) {
    let ranks = format!(
        "NIRF Rank: {} | QS Rank: {}",
        na_count(institution.nirf_rank),
        na_count(institution.qs_world_ranking)
    );
    println!("{}\n{ranks}\n", institution.name);

    // Newest first, matching the year selector order of the listing view.
    for offset in YearOffset::CHRONOLOGICAL.iter().rev() {
        let Some(year_stats) = institution.year_stats(*offset) else {
            continue;
        };
        println!("{degree} – {offset}");
        let stats = year_stats.degree(degree);
        if stats.is_empty() {
            println!("  No data available.\n");
            continue;
        }
        let mut table = Table::new(vec![
            "Branch",
            "Highest",
            "Lowest",
            "Median",
            "Average",
            "Placement %",
            "Registered",
            "Placed",
        ]);
        for s in stats {
            table.push(vec![
                s.branch.clone(),
                na_text(s.highest_package),
                na_text(s.lowest_package),
                na_text(s.median_package),
                na_text(s.average_package),
                percent_text(s.placement_percentage),
                na_count(s.registered_students),
                na_count(s.placed_students),
            ]);
        }
        table.print();
        println!();
    }
}

fn percent_text(value: Option<f64>) -> String {
    match value {
        None => "NA".to_string(),
        Some(_) => format!("{}%", na_text(value)),
    }
}

/// Minimal aligned-column text table.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: Vec<&str>) -> Self {
        Table {
            headers: headers.into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    fn print(&self) {
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(widths.iter().copied())
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
        };
        println!("{}", line(&self.headers));
        println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
        for row in &self.rows {
            println!("{}", line(row));
        }
    }
}
