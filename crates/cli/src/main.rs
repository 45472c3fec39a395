//! BuildMate CLI - talk to running plan editors and run cost estimates.
//!
//! Editor commands go over the debug socket as JSON. The estimate
//! subcommands are computed locally and need no running editor.

use anyhow::{Context, Result};
use api::{socket_path_for, Command, Query, Target, SOCKET_PREFIX};
use clap::{Parser, Subcommand};
use estimate::{format_rupees, BudgetInput, CityTier, MaterialCatalog, Quality};
use plan::{CanvasPoint, RoomType};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// BuildMate CLI - interact with running plan editors
#[derive(Parser)]
#[command(name = "buildmate-cli")]
#[command(about = "Command-line interface for the BuildMate plan editor")]
struct Cli {
    /// Socket path to connect to (default: auto-detect)
    #[arg(short, long)]
    socket: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List running editor instances
    List,

    /// Connect to an editor instance and start interactive mode
    Connect {
        /// Process ID of the editor instance
        #[arg(short, long)]
        pid: Option<u32>,
    },

    /// Send a single command
    Command {
        /// JSON command to execute
        json: String,
    },

    /// Send a query
    Query {
        /// JSON query to execute
        json: String,
    },

    /// Get all rooms
    Rooms,

    /// Get the selected room id
    Selection,

    /// Get room count
    Count,

    /// Draw a room by dragging between two points
    Draw {
        #[arg(allow_hyphen_values = true)]
        x1: i32,
        #[arg(allow_hyphen_values = true)]
        y1: i32,
        #[arg(allow_hyphen_values = true)]
        x2: i32,
        #[arg(allow_hyphen_values = true)]
        y2: i32,
        /// Room type for the new room (e.g. bedroom, living_room)
        #[arg(short = 't', long = "type", value_parser = parse_room_type)]
        room_type: Option<RoomType>,
        /// Name for the new room
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Save the plan in the running editor
    Save,

    /// Estimate a construction budget (runs locally)
    Budget {
        /// Built-up area in square feet
        #[arg(long, default_value_t = 1200.0)]
        area: f64,
        #[arg(long, default_value_t = 1)]
        floors: u32,
        /// economy, standard or premium
        #[arg(long, default_value = "standard", value_parser = parse_quality)]
        quality: Quality,
        /// metro, tier1 or tier2
        #[arg(long, default_value = "tier2", value_parser = parse_city)]
        city: CityTier,
    },

    /// Price a bill of materials (runs locally)
    Materials {
        /// Quantities as id=amount, e.g. cement=120 steel=450
        #[arg(value_parser = parse_quantity)]
        quantities: Vec<(String, f64)>,
    },
}

fn parse_room_type(s: &str) -> Result<RoomType, String> {
    RoomType::from_str(s).map_err(|_| format!("unknown room type '{}'", s))
}

fn parse_quality(s: &str) -> Result<Quality, String> {
    Quality::from_str(s).map_err(|_| format!("unknown quality '{}'", s))
}

fn parse_city(s: &str) -> Result<CityTier, String> {
    CityTier::from_str(s).map_err(|_| format!("unknown city tier '{}'", s))
}

fn parse_quantity(s: &str) -> Result<(String, f64), String> {
    let (id, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected id=amount, got '{}'", s))?;
    let amount = amount
        .parse::<f64>()
        .map_err(|e| format!("bad amount for '{}': {}", id, e))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("amount for '{}' must be a finite, non-negative number", id));
    }
    Ok((id.to_string(), amount))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => list_instances(),
        Commands::Connect { pid } => connect_interactive(cli.socket, pid),
        Commands::Command { json } => send_command(cli.socket, &json),
        Commands::Query { json } => send_query(cli.socket, &json),
        Commands::Rooms => send_typed_query(cli.socket, Query::GetRooms),
        Commands::Selection => send_typed_query(cli.socket, Query::GetSelection),
        Commands::Count => send_typed_query(cli.socket, Query::GetRoomCount),
        Commands::Draw {
            x1,
            y1,
            x2,
            y2,
            room_type,
            name,
        } => {
            let mut commands = Vec::new();
            if room_type.is_some() || name.is_some() {
                commands.push(Command::SetDraft { room_type, name });
            }
            commands.push(Command::DrawRoom {
                from: CanvasPoint::new(x1, y1),
                to: CanvasPoint::new(x2, y2),
            });
            let json = serde_json::to_string(&Command::Batch { commands })?;
            send_command(cli.socket, &json)
        }
        Commands::Save => {
            let json = serde_json::to_string(&Command::Save)?;
            send_command(cli.socket, &json)
        }
        Commands::Budget {
            area,
            floors,
            quality,
            city,
        } => print_budget(BudgetInput {
            area_sqft: area,
            floors,
            quality,
            city,
        }),
        Commands::Materials { quantities } => print_materials(quantities),
    }
}

fn print_budget(input: BudgetInput) -> Result<()> {
    let breakdown = input.estimate().context("Invalid budget input")?;
    println!(
        "{} sq ft x {} floor(s), {} quality, {}",
        input.area_sqft,
        input.floors,
        input.quality.key(),
        input.city.key()
    );
    println!("Estimated total: {}", format_rupees(breakdown.total));
    println!("  Materials (60%): {}", format_rupees(breakdown.materials));
    println!("  Labour (30%):    {}", format_rupees(breakdown.labour));
    println!("  Services (10%):  {}", format_rupees(breakdown.services));
    Ok(())
}

fn print_materials(quantities: Vec<(String, f64)>) -> Result<()> {
    let catalog = MaterialCatalog::default();
    let quantities: BTreeMap<String, f64> = if quantities.is_empty() {
        catalog.default_quantities()
    } else {
        quantities.into_iter().collect()
    };

    let estimate = catalog
        .estimate(&quantities)
        .context("Invalid material quantities")?;

    for line in &estimate.lines {
        println!(
            "  {:<16} {:>8} {:<6} x {:>7} = {}",
            line.name,
            line.quantity,
            line.unit,
            line.price,
            format_rupees(line.total)
        );
    }
    println!("Total: {}", format_rupees(estimate.grand_total));
    Ok(())
}

/// List all running editor instances by checking socket files.
fn list_instances() -> Result<()> {
    let sockets = find_sockets()?;
    if sockets.is_empty() {
        println!("No running BuildMate instances found.");
        println!("\nNote: the editor must be running with the debug server enabled.");
        println!("Start it with: BUILDMATE_DEBUG=1 buildmate");
    } else {
        println!("Running BuildMate instances:");
        for socket in sockets {
            match extract_pid_from_socket(&socket) {
                Some(pid) => println!("  PID {}: {}", pid, socket.display()),
                None => println!("  {}", socket.display()),
            }
        }
    }
    Ok(())
}

/// Find all editor socket files in /tmp.
fn find_sockets() -> Result<Vec<PathBuf>> {
    let mut sockets = Vec::new();

    if let Ok(entries) = std::fs::read_dir("/tmp") {
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if extract_pid_from_socket(&path).is_some() {
                // Verify socket is connectable
                if UnixStream::connect(&path).is_ok() {
                    sockets.push(path);
                }
            }
        }
    }

    Ok(sockets)
}

/// Extract PID from socket filename like "buildmate-12345.sock".
fn extract_pid_from_socket(path: &Path) -> Option<u32> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|name| {
            let name = name.strip_prefix(SOCKET_PREFIX)?;
            let name = name.strip_suffix(".sock")?;
            name.parse().ok()
        })
}

/// Connect to an editor and start an interactive REPL.
fn connect_interactive(socket: Option<PathBuf>, pid: Option<u32>) -> Result<()> {
    let socket_path = resolve_socket(socket, pid)?;
    println!("Connecting to BuildMate at {}...", socket_path.display());

    let stream = UnixStream::connect(&socket_path)
        .with_context(|| format!("Failed to connect to {}", socket_path.display()))?;

    println!("Connected! Enter commands (JSON) or 'help' for usage. Ctrl+C to exit.\n");

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    let stdin = std::io::stdin();

    loop {
        print!("buildmate> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let shortcut = match input {
            "help" | "?" => {
                print_help();
                continue;
            }
            "quit" | "exit" => break,
            "rooms" => Some(serde_json::to_string(&Query::GetRooms)?),
            "selection" => Some(serde_json::to_string(&Query::GetSelection)?),
            "count" => Some(serde_json::to_string(&Query::GetRoomCount)?),
            "state" => Some(serde_json::to_string(&Query::GetState)?),
            "delete" => Some(serde_json::to_string(&Command::Delete {
                target: Target::Selection,
            })?),
            "save" => Some(serde_json::to_string(&Command::Save)?),
            _ => None,
        };

        // Anything else goes through as raw JSON
        let json = shortcut.as_deref().unwrap_or(input);
        send_to_stream(&mut writer, &mut reader, json)?;
    }

    Ok(())
}

fn print_help() {
    println!("BuildMate CLI Interactive Mode");
    println!("==============================");
    println!();
    println!("Built-in commands:");
    println!("  rooms       - Get all rooms");
    println!("  selection   - Get selected room");
    println!("  count       - Get room count");
    println!("  state       - Get pointer state and draft");
    println!("  delete      - Delete the selected room");
    println!("  save        - Save the plan");
    println!("  help, ?     - Show this help");
    println!("  quit, exit  - Exit interactive mode");
    println!();
    println!("JSON Commands (examples):");
    println!("  {{\"type\": \"draw_room\", \"from\": [100, 100], \"to\": [260, 320]}}");
    println!("  {{\"type\": \"select\", \"target\": {{\"query\": {{\"at_point\": [150, 150]}}}}}}");
    println!("  {{\"type\": \"set_type\", \"target\": \"selection\", \"room_type\": \"kitchen\"}}");
    println!("  {{\"type\": \"set_name\", \"target\": \"selection\", \"name\": \"Master\"}}");
    println!("  {{\"type\": \"clear_all\"}}");
    println!();
    println!("JSON Queries:");
    println!("  {{\"type\": \"get_rooms\"}}");
    println!("  {{\"type\": \"get_plan\"}}");
    println!("  {{\"type\": \"render\"}}");
}

fn send_to_stream(writer: &mut UnixStream, reader: &mut BufReader<UnixStream>, json: &str) -> Result<()> {
    writeln!(writer, "{}", json)?;
    writer.flush()?;

    let mut response = String::new();
    reader.read_line(&mut response)?;

    // Pretty print the response
    match serde_json::from_str::<serde_json::Value>(&response) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{}", response.trim()),
    }

    Ok(())
}

fn open_stream(socket: Option<PathBuf>) -> Result<(UnixStream, BufReader<UnixStream>)> {
    let socket_path = resolve_socket(socket, None)?;
    let stream = UnixStream::connect(&socket_path)
        .with_context(|| format!("Failed to connect to {}", socket_path.display()))?;
    let reader = BufReader::new(stream.try_clone()?);
    Ok((stream, reader))
}

/// Send a single command and exit.
fn send_command(socket: Option<PathBuf>, json: &str) -> Result<()> {
    // Parse to validate
    let _: Command = serde_json::from_str(json).context("Invalid command JSON")?;

    let (mut writer, mut reader) = open_stream(socket)?;
    send_to_stream(&mut writer, &mut reader, json)
}

/// Send a single query and exit.
fn send_query(socket: Option<PathBuf>, json: &str) -> Result<()> {
    // Parse to validate
    let _: Query = serde_json::from_str(json).context("Invalid query JSON")?;

    let (mut writer, mut reader) = open_stream(socket)?;
    send_to_stream(&mut writer, &mut reader, json)
}

fn send_typed_query(socket: Option<PathBuf>, query: Query) -> Result<()> {
    let json = serde_json::to_string(&query)?;
    send_query(socket, &json)
}

/// Resolve which socket to connect to.
fn resolve_socket(explicit: Option<PathBuf>, pid: Option<u32>) -> Result<PathBuf> {
    if let Some(socket) = explicit {
        return Ok(socket);
    }

    if let Some(pid) = pid {
        return Ok(socket_path_for(pid));
    }

    // Auto-detect: first available socket
    find_sockets()?.into_iter().next().ok_or_else(|| {
        anyhow::anyhow!("No BuildMate instances found. Start the editor with BUILDMATE_DEBUG=1 or specify --socket")
    })
}
