use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;
use workout_core::*;

#[derive(Parser)]
#[command(name = "wkout")]
#[command(about = "Workout structure editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workout document to edit (defaults to <data-dir>/workout.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Do not record edits in the journal
    #[arg(long, global = true)]
    no_journal: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new workout document
    New {
        /// Title [default: "Untitled Workout", or the template's title]
        #[arg(long)]
        title: Option<String>,

        /// Source tag [default: "manual", or the template's source]
        #[arg(long)]
        source: Option<String>,

        /// Start from a built-in template instead of a blank document
        #[arg(long)]
        template: Option<String>,

        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },

    /// Print the workout tree with drag ids
    Show,

    /// List built-in templates
    Templates,

    /// Append an empty block
    AddBlock { label: String },

    /// Delete a block and everything in it
    DeleteBlock {
        #[arg(long)]
        block: usize,
    },

    /// Change a block's label and timing
    UpdateBlock {
        #[arg(long)]
        block: usize,

        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        rounds: Option<u32>,
        /// Time cap in seconds
        #[arg(long)]
        time_cap: Option<u32>,
        /// Work interval in seconds
        #[arg(long)]
        work: Option<u32>,
        /// Rest between rounds in seconds
        #[arg(long)]
        rest: Option<u32>,

        /// Fields to clear
        #[arg(long, value_enum)]
        clear: Vec<BlockField>,
    },

    /// Append an empty superset to a block
    AddSuperset {
        #[arg(long)]
        block: usize,
    },

    /// Delete a superset and its exercises
    DeleteSuperset {
        #[arg(long)]
        block: usize,
        #[arg(long)]
        superset: usize,
    },

    /// Append an exercise to a block's loose list or to a superset
    AddExercise {
        #[arg(long)]
        block: usize,
        #[arg(long)]
        superset: Option<usize>,
        name: String,
    },

    /// Delete one exercise
    DeleteExercise {
        #[arg(long)]
        block: usize,
        #[arg(long)]
        superset: Option<usize>,
        #[arg(long)]
        index: usize,
    },

    /// Change fields of one exercise
    UpdateExercise {
        #[arg(long)]
        block: usize,
        #[arg(long)]
        superset: Option<usize>,
        #[arg(long)]
        index: usize,

        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sets: Option<u32>,
        #[arg(long)]
        reps: Option<u32>,
        #[arg(long)]
        reps_range: Option<String>,
        /// Distance in meters
        #[arg(long)]
        distance: Option<u32>,
        #[arg(long)]
        distance_range: Option<String>,
        /// Duration in seconds
        #[arg(long)]
        duration: Option<u32>,
        /// Rest in seconds
        #[arg(long)]
        rest: Option<u32>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        url: Option<String>,

        /// Fields to clear
        #[arg(long, value_enum)]
        clear: Vec<Field>,
    },

    /// Drag an exercise onto another exercise or a container
    Move {
        /// Exercise id, e.g. 0-block-1 or 0-2-0
        source: String,
        /// Exercise or container id, e.g. superset-0-1 or block-0-exercises
        target: String,
    },

    /// Set a block's structure type (superset, amrap, emom, for-time, tabata, circuit, none)
    Structure {
        #[arg(long)]
        block: usize,
        structure: String,
    },

    /// Set a superset's rest in seconds ("none" clears it)
    SupersetRest {
        #[arg(long)]
        block: usize,
        #[arg(long)]
        superset: usize,
        seconds: String,
    },

    /// Write the workout as CSV to stdout
    Export,

    /// List journaled edits
    Journal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Field {
    Sets,
    Reps,
    RepsRange,
    Distance,
    DistanceRange,
    Duration,
    Rest,
    Type,
    Notes,
    Url,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BlockField {
    Rounds,
    TimeCap,
    Work,
    Rest,
}

struct Context {
    config: Config,
    file: PathBuf,
    journal: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let log = workout_core::logging::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(log) = &log {
        log.set_level(&config.logging.level)?;
    }

    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    let ctx = Context {
        file: cli.file.unwrap_or_else(|| config.workout_path()),
        journal: config.journal.enabled && !cli.no_journal,
        config,
    };

    match cli.command {
        Commands::New {
            title,
            source,
            template,
            force,
        } => cmd_new(&ctx, title, source, template, force),
        Commands::Show => cmd_show(&ctx),
        Commands::Templates => {
            for name in template_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::AddBlock { label } => run_edit(&ctx, Command::AddBlock { label }),
        Commands::DeleteBlock { block } => run_edit(&ctx, Command::DeleteBlock { block }),
        Commands::UpdateBlock {
            block,
            label,
            rounds,
            time_cap,
            work,
            rest,
            clear,
        } => {
            let cleared = |f: BlockField| clear.contains(&f);
            let patch = BlockPatch {
                label,
                rounds: patch_field(rounds, cleared(BlockField::Rounds), "rounds")?,
                time_cap_sec: patch_field(time_cap, cleared(BlockField::TimeCap), "time-cap")?,
                time_work_sec: patch_field(work, cleared(BlockField::Work), "work")?,
                rest_between_sec: patch_field(rest, cleared(BlockField::Rest), "rest")?,
            };
            if patch == BlockPatch::default() {
                return Err(Error::InvalidArgument("nothing to update".into()));
            }
            run_edit(&ctx, Command::UpdateBlock { block, patch })
        }
        Commands::AddSuperset { block } => run_edit(&ctx, Command::AddSuperset { block }),
        Commands::DeleteSuperset { block, superset } => {
            run_edit(&ctx, Command::DeleteSuperset { block, superset })
        }
        Commands::AddExercise {
            block,
            superset,
            name,
        } => run_edit(
            &ctx,
            Command::AddExercise {
                block,
                superset,
                name,
            },
        ),
        Commands::DeleteExercise {
            block,
            superset,
            index,
        } => run_edit(
            &ctx,
            Command::DeleteExercise {
                block,
                superset,
                index,
            },
        ),
        Commands::UpdateExercise {
            block,
            superset,
            index,
            name,
            sets,
            reps,
            reps_range,
            distance,
            distance_range,
            duration,
            rest,
            kind,
            notes,
            url,
            clear,
        } => {
            let cleared = |f: Field| clear.contains(&f);
            let patch = ExercisePatch {
                name,
                sets: patch_field(sets, cleared(Field::Sets), "sets")?,
                reps: patch_field(reps, cleared(Field::Reps), "reps")?,
                reps_range: patch_field(reps_range, cleared(Field::RepsRange), "reps-range")?,
                distance_m: patch_field(distance, cleared(Field::Distance), "distance")?,
                distance_range: patch_field(
                    distance_range,
                    cleared(Field::DistanceRange),
                    "distance-range",
                )?,
                duration_sec: patch_field(duration, cleared(Field::Duration), "duration")?,
                rest_sec: patch_field(rest, cleared(Field::Rest), "rest")?,
                kind: patch_field(kind, cleared(Field::Type), "type")?,
                notes: patch_field(notes, cleared(Field::Notes), "notes")?,
                follow_along_url: patch_field(url, cleared(Field::Url), "url")?,
            };
            if patch.is_empty() {
                return Err(Error::InvalidArgument("nothing to update".into()));
            }
            run_edit(
                &ctx,
                Command::UpdateExercise {
                    block,
                    superset,
                    index,
                    patch,
                },
            )
        }
        Commands::Move { source, target } => run_edit(
            &ctx,
            Command::Move {
                source,
                target: Some(target),
            },
        ),
        Commands::Structure { block, structure } => {
            let structure = parse_structure(&structure)?;
            run_edit(&ctx, Command::SetStructure { block, structure })
        }
        Commands::SupersetRest {
            block,
            superset,
            seconds,
        } => {
            let seconds = parse_seconds(&seconds)?;
            run_edit(
                &ctx,
                Command::SetSupersetRest {
                    block,
                    superset,
                    seconds,
                },
            )
        }
        Commands::Export => {
            let workout = Workout::load(&ctx.file)?;
            let stdout = std::io::stdout();
            export_csv(&workout, stdout.lock())?;
            Ok(())
        }
        Commands::Journal => cmd_journal(&ctx),
    }
}

fn cmd_new(
    ctx: &Context,
    title: Option<String>,
    source: Option<String>,
    template_name: Option<String>,
    force: bool,
) -> Result<()> {
    if ctx.file.exists() && !force {
        return Err(Error::InvalidArgument(format!(
            "{:?} already exists (use --force to overwrite)",
            ctx.file
        )));
    }

    let workout = match template_name {
        Some(name) => {
            let mut workout = template(&name).ok_or_else(|| {
                Error::NotFound(format!(
                    "template {:?} (available: {})",
                    name,
                    template_names().join(", ")
                ))
            })?;
            if let Some(title) = title {
                workout.title = title;
            }
            if let Some(source) = source {
                workout.source = source;
            }
            workout
        }
        None => Workout::new(
            title.unwrap_or_else(|| "Untitled Workout".to_string()),
            source.unwrap_or_else(|| "manual".to_string()),
        ),
    };

    workout.save(&ctx.file)?;
    tracing::info!("Created workout {:?} at {:?}", workout.title, ctx.file);
    println!("✓ Created {:?} at {}", workout.title, ctx.file.display());
    Ok(())
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let workout = Workout::load(&ctx.file)?;
    print!("{}", render(&workout));
    Ok(())
}

fn cmd_journal(ctx: &Context) -> Result<()> {
    let entries = read_entries(&ctx.config.journal_path())?;
    if entries.is_empty() {
        println!("No journaled edits");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{}  {}  {}",
            entry.applied_at.format("%Y-%m-%d %H:%M:%S"),
            entry.workout_title,
            entry.command
        );
    }
    Ok(())
}

/// Load, apply one command, save, and journal it
fn run_edit(ctx: &Context, command: Command) -> Result<()> {
    let next = Workout::update(&ctx.file, |w| {
        apply_with(w, &command, &ctx.config.exercise_defaults)
    })?;

    // The edit is already saved, so a failed append only warns
    if ctx.journal {
        let mut journal = JsonlJournal::new(ctx.config.journal_path());
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            applied_at: chrono::Utc::now(),
            workout_title: next.title.clone(),
            command: command.clone(),
        };
        if let Err(e) = journal.append(&entry) {
            tracing::warn!("Edit saved but not journaled at {:?}: {}", journal.path(), e);
        }
    }

    println!("✓ {}", command);
    Ok(())
}

fn patch_field<T>(value: Option<T>, clear: bool, name: &str) -> Result<Option<Option<T>>> {
    match (value, clear) {
        (Some(_), true) => Err(Error::InvalidArgument(format!(
            "--{} and --clear {} conflict",
            name, name
        ))),
        (Some(v), false) => Ok(Some(Some(v))),
        (None, true) => Ok(Some(None)),
        (None, false) => Ok(None),
    }
}

fn parse_structure(s: &str) -> Result<Option<StructureType>> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    StructureType::parse(s).map(Some).ok_or_else(|| {
        let names: Vec<&str> = StructureType::ALL.iter().map(|t| t.as_str()).collect();
        Error::InvalidArgument(format!(
            "unknown structure {:?} (expected none, {})",
            s,
            names.join(", ")
        ))
    })
}

fn parse_seconds(s: &str) -> Result<Option<u32>> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| Error::InvalidArgument(format!("invalid seconds {:?}", s)))
}

fn render(workout: &Workout) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  ({})\n", workout.title, workout.source));

    if workout.blocks.is_empty() {
        out.push_str("  (no blocks)\n");
    }

    for (b, block) in workout.blocks.iter().enumerate() {
        out.push_str(&format!("\n[{}] {}{}\n", b, block.label, render_timing(block)));
        out.push_str(&format!("  {}\n", DropTarget::BlockExercises { block: b }));
        for (i, ex) in block.exercises.iter().enumerate() {
            let coord = Coordinate::BlockLevel { block: b, index: i };
            out.push_str(&format!("    {:<12} {}\n", coord.to_string(), describe(ex)));
        }

        for (s, superset) in block.supersets.iter().enumerate() {
            let rest = match superset.rest_between_sec {
                Some(r) => format!("rest {}s", r),
                None => "no rest".to_string(),
            };
            out.push_str(&format!(
                "  {}  {}\n",
                DropTarget::Superset {
                    block: b,
                    superset: s
                },
                rest
            ));
            if superset.exercises.is_empty() {
                out.push_str("    (empty)\n");
            }
            for (i, ex) in superset.exercises.iter().enumerate() {
                let coord = Coordinate::InSuperset {
                    block: b,
                    superset: s,
                    index: i,
                };
                out.push_str(&format!("    {:<12} {}\n", coord.to_string(), describe(ex)));
            }
        }
    }
    out
}

fn render_timing(block: &Block) -> String {
    let mut parts = Vec::new();
    if let Some(s) = block.structure {
        parts.push(s.to_string());
    }
    if let Some(t) = block.time_work_sec {
        parts.push(format!("work {}s", t));
    }
    if let Some(r) = block.rest_between_sec {
        parts.push(format!("rest {}s", r));
    }
    if let Some(n) = block.rounds {
        parts.push(format!("{} rounds", n));
    }
    if let Some(c) = block.time_cap_sec {
        parts.push(format!("cap {}s", c));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("  ({})", parts.join(", "))
    }
}

fn describe(ex: &Exercise) -> String {
    let mut parts = vec![ex.name.clone()];

    match (ex.sets, ex.reps, ex.reps_range.as_deref()) {
        (Some(s), Some(r), _) => parts.push(format!("{}x{}", s, r)),
        (Some(s), None, Some(range)) => parts.push(format!("{}x{}", s, range)),
        (None, Some(r), _) => parts.push(format!("{} reps", r)),
        (None, None, Some(range)) => parts.push(format!("{} reps", range)),
        (Some(s), None, None) => parts.push(format!("{} sets", s)),
        (None, None, None) => {}
    }
    if let Some(d) = ex.distance_m {
        parts.push(format!("{}m", d));
    } else if let Some(range) = ex.distance_range.as_deref() {
        parts.push(format!("{}m", range));
    }
    if let Some(d) = ex.duration_sec {
        parts.push(format!("{}s", d));
    }
    if let Some(r) = ex.rest_sec {
        parts.push(format!("rest {}s", r));
    }
    if let Some(kind) = ex.kind.as_deref() {
        parts.push(format!("[{}]", kind));
    }

    parts.join("  ")
}
