mod app;
mod commands;
mod render;

use clap::{Parser, Subcommand};
use swot_lib::library::ItemKind;
use swot_lib::quiz::QuestionMix;
use swot_lib::tasks::Priority;

#[derive(Parser)]
#[command(name = "swot", about = "Study planner with spaced repetition and self-test generation", version)]
struct Cli {
    /// Work in a specific unit (default: first unit)
    #[arg(long, global = true)]
    unit: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum KindArg {
    Note,
    Lecture,
    Case,
    Tutorial,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Note => ItemKind::Note,
            KindArg::Lecture => ItemKind::Lecture,
            KindArg::Case => ItemKind::Case,
            KindArg::Tutorial => ItemKind::Tutorial,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum MixArg {
    Balanced,
    Mcq,
    Short,
    Cloze,
}

impl From<MixArg> for QuestionMix {
    fn from(mix: MixArg) -> Self {
        match mix {
            MixArg::Balanced => QuestionMix::Balanced,
            MixArg::Mcq => QuestionMix::Mcq,
            MixArg::Short => QuestionMix::Short,
            MixArg::Cloze => QuestionMix::Cloze,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum PriorityArg {
    Low,
    Med,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(priority: PriorityArg) -> Self {
        match priority {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Med => Priority::Med,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Dashboard of every unit
    Overview,

    /// Create a new unit
    AddUnit {
        /// Unit name
        name: String,
    },

    /// Library items
    #[command(subcommand)]
    Item(ItemCommand),

    /// Flashcard decks
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Review flashcards interactively
    Review {
        /// Deck name (default: first deck of the unit)
        deck: Option<String>,
        /// Only cards due today
        #[arg(long)]
        due: bool,
    },

    /// Run a generated self-test
    Quiz {
        /// Restrict sources to one tag
        #[arg(long)]
        tag: Option<String>,
        /// Use only items toggled with `item select`
        #[arg(long)]
        selected: bool,
        /// Number of questions
        #[arg(long, default_value = "12")]
        count: usize,
        /// Question mix profile
        #[arg(long, default_value = "balanced")]
        mix: MixArg,
    },

    /// Tasks and study plans
    #[command(subcommand)]
    Todo(TodoCommand),

    /// Study timetable
    #[command(subcommand)]
    Timetable(TimetableCommand),

    /// Exam checklist and revision pack
    #[command(subcommand)]
    Pack(PackCommand),

    /// Search all library items
    Search {
        /// Search query
        query: String,
    },

    /// Unit statistics, skills and streak
    Stats,

    /// Export, import or wipe all data
    #[command(subcommand)]
    Data(DataCommand),
}

#[derive(Subcommand)]
enum ItemCommand {
    /// Add an item; content is read from stdin when piped
    Add {
        /// Item title
        title: String,
        /// Item kind
        #[arg(long, default_value = "note")]
        kind: KindArg,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Content text (use "-" to read from stdin)
        #[arg(long)]
        content: Option<String>,
    },

    /// List items in the unit
    Ls {
        /// Filter by kind
        #[arg(long)]
        kind: Option<KindArg>,
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show an item's content
    Show {
        /// Item title (case-insensitive prefix match)
        title: String,
    },

    /// Delete an item
    Rm {
        /// Item title
        title: String,
    },

    /// Pin or unpin an item for the exam pack
    Pin {
        /// Item title
        title: String,
    },

    /// Toggle an item's membership in the quiz selection
    Select {
        /// Item title
        title: String,
    },

    /// Frequency-based summary of an item
    Summary {
        /// Item title
        title: String,
    },

    /// Extracted key concepts of an item
    Concepts {
        /// Item title
        title: String,
    },

    /// List tags used in the unit
    Tags,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// List decks in the unit
    Ls,

    /// Create an empty deck
    New {
        /// Deck name
        name: String,
    },

    /// Delete a deck and its cards
    Rm {
        /// Deck name
        name: String,
    },

    /// Add a card to a deck
    AddCard {
        /// Deck name
        deck: String,
        /// Card front
        front: String,
        /// Card back
        back: String,
    },

    /// Generate a cloze deck from a library item
    FromItem {
        /// Item title
        title: String,
        /// Deck name (default: "<item> — deck")
        #[arg(long)]
        name: Option<String>,
    },

    /// Add "Define:" cards for an item's concepts to a deck
    ConceptCards {
        /// Deck name
        deck: String,
        /// Item title
        title: String,
    },
}

#[derive(Subcommand)]
enum TodoCommand {
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Priority
        #[arg(long, default_value = "med")]
        priority: PriorityArg,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks
    Ls,

    /// Toggle a task done by list position
    Done {
        /// 1-based position from `todo ls`
        position: usize,
    },

    /// Remove a task by list position
    Rm {
        /// 1-based position from `todo ls`
        position: usize,
    },

    /// Generate a rotating study plan from pending tasks
    Plan {
        /// Days to plan
        #[arg(long, default_value = "7")]
        days: usize,
    },
}

#[derive(Subcommand)]
enum TimetableCommand {
    /// Add a session
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Time (HH:MM)
        time: String,
        /// Activity description
        activity: String,
    },

    /// Upcoming sessions in order
    Ls,

    /// Sessions in one month
    Month {
        /// Year
        year: i32,
        /// Month (1-12)
        month: u32,
    },
}

#[derive(Subcommand)]
enum PackCommand {
    /// Show the exam checklist
    Ls,

    /// Add a checklist entry
    Add {
        /// Entry text
        text: String,
    },

    /// Toggle a checklist entry by list position
    Done {
        /// 1-based position from `pack ls`
        position: usize,
    },

    /// Remove a checklist entry by list position
    Rm {
        /// 1-based position from `pack ls`
        position: usize,
    },

    /// Insert a built-in checklist template
    Template {
        /// Template name (omit to list available templates)
        name: Option<String>,
    },

    /// Write the pinned-item revision pack to a file
    Export {
        /// Output path (default: exam-pack-<unit>.txt)
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Subcommand)]
enum DataCommand {
    /// Export all data to a JSON file
    Export {
        /// Output path
        path: String,
    },

    /// Replace all data from a JSON export
    Import {
        /// Input path
        path: String,
    },

    /// Delete every stored collection
    Wipe,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color;

    match cli.command {
        Command::Overview => {
            let app = app::App::new(cli.unit.as_deref())?;
            commands::units::run_overview(&app, &cli.format, use_color)?;
        }
        Command::AddUnit { name } => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            commands::units::run_add(&mut app, &name)?;
        }
        Command::Item(subcmd) => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            match subcmd {
                ItemCommand::Add { title, kind, tags, content } => {
                    commands::items::run_add(&mut app, &title, kind.into(), tags.as_deref(), content)?;
                }
                ItemCommand::Ls { kind, tag } => {
                    commands::items::run_ls(&app, kind.map(Into::into), tag.as_deref(), &cli.format)?;
                }
                ItemCommand::Show { title } => commands::items::run_show(&app, &title, use_color)?,
                ItemCommand::Rm { title } => commands::items::run_rm(&mut app, &title)?,
                ItemCommand::Pin { title } => commands::items::run_pin(&mut app, &title)?,
                ItemCommand::Select { title } => commands::items::run_select(&mut app, &title)?,
                ItemCommand::Summary { title } => commands::items::run_summary(&app, &title)?,
                ItemCommand::Concepts { title } => commands::items::run_concepts(&app, &title)?,
                ItemCommand::Tags => commands::items::run_tags(&app)?,
            }
        }
        Command::Deck(subcmd) => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            match subcmd {
                DeckCommand::Ls => commands::decks::run_ls(&app, use_color)?,
                DeckCommand::New { name } => commands::decks::run_new(&mut app, &name)?,
                DeckCommand::Rm { name } => commands::decks::run_rm(&mut app, &name)?,
                DeckCommand::AddCard { deck, front, back } => {
                    commands::decks::run_add_card(&mut app, &deck, &front, &back)?;
                }
                DeckCommand::FromItem { title, name } => {
                    commands::decks::run_from_item(&mut app, &title, name.as_deref())?;
                }
                DeckCommand::ConceptCards { deck, title } => {
                    commands::decks::run_concept_cards(&mut app, &deck, &title)?;
                }
            }
        }
        Command::Review { deck, due } => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            commands::review::run(&mut app, deck.as_deref(), due, use_color)?;
        }
        Command::Quiz { tag, selected, count, mix } => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            commands::quiz::run(&mut app, tag.as_deref(), selected, count, mix.into(), use_color)?;
        }
        Command::Todo(subcmd) => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            match subcmd {
                TodoCommand::Add { text, priority, due } => {
                    commands::todos::run_add(&mut app, &text, priority.into(), due.as_deref())?;
                }
                TodoCommand::Ls => commands::todos::run_ls(&app, use_color)?,
                TodoCommand::Done { position } => commands::todos::run_done(&mut app, position)?,
                TodoCommand::Rm { position } => commands::todos::run_rm(&mut app, position)?,
                TodoCommand::Plan { days } => commands::todos::run_plan(&app, days)?,
            }
        }
        Command::Timetable(subcmd) => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            match subcmd {
                TimetableCommand::Add { date, time, activity } => {
                    commands::timetable::run_add(&mut app, &date, &time, &activity)?;
                }
                TimetableCommand::Ls => commands::timetable::run_ls(&app)?,
                TimetableCommand::Month { year, month } => {
                    commands::timetable::run_month(&app, year, month)?;
                }
            }
        }
        Command::Pack(subcmd) => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            match subcmd {
                PackCommand::Ls => commands::pack::run_ls(&app, use_color)?,
                PackCommand::Add { text } => commands::pack::run_add(&mut app, &text)?,
                PackCommand::Done { position } => commands::pack::run_done(&mut app, position)?,
                PackCommand::Rm { position } => commands::pack::run_rm(&mut app, position)?,
                PackCommand::Template { name } => {
                    commands::pack::run_template(&mut app, name.as_deref())?;
                }
                PackCommand::Export { out } => commands::pack::run_export(&app, out.as_deref())?,
            }
        }
        Command::Search { query } => {
            let app = app::App::new(cli.unit.as_deref())?;
            commands::search::run(&app, &query, use_color)?;
        }
        Command::Stats => {
            let app = app::App::new(cli.unit.as_deref())?;
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Data(subcmd) => {
            let mut app = app::App::new(cli.unit.as_deref())?;
            match subcmd {
                DataCommand::Export { path } => commands::data::run_export(&app, &path)?,
                DataCommand::Import { path } => commands::data::run_import(&mut app, &path)?,
                DataCommand::Wipe => commands::data::run_wipe(&mut app)?,
            }
        }
    }

    Ok(())
}
