use anyhow::{bail, Context, Result};
use rtwt::{
    format_size_kb, Attribute, CurveTraceParams, GradientState, HttpRenderApi, PanelConfig, RecordingRenderApi,
    RenderApi, RenderCommand, SliceAxis, SliceParams, UploadApi, UploadClient, UploadKind, VariantChange,
    ViewButton, ViewState, VolumeTraceParams, WindSpeed,
};
use std::env;
use std::path::PathBuf;
use std::time::Instant;

const USAGE: &str = "\
usage: rtwt-ctl [--config PATH] [--dry-run] <command> [args]

render commands:
  click <button>                 View, Curve Trace, Volume Trace, Volume, Slice, Reset
  reset
  speed <0..100>
  attribute <velocity|pressure>
  gradient <min> <max> [velocity|pressure]
  variant <kind=value>           rim=aero, mirrors=off, spoiler=on, ride_height=high, ...
  streamlines-pos <x> <y> <z>
  streamlines-radius <r>
  smokeprobes-pos <x> <y> <z>
  slice <x|y|z> [position]
  load [--stl NAME] [--streamlines NAME]

upload service:
  files
  upload <stl|streamlines> <path>
  delete <stl|streamlines> <name>";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    Render(Vec<RenderCommand>),
    Service(ServiceCommand),
}

/// Requests to the upload service.
#[derive(Debug, Clone, PartialEq)]
enum ServiceCommand {
    ListFiles,
    Upload { kind: UploadKind, path: PathBuf },
    Delete { kind: UploadKind, name: String },
}

#[derive(Debug)]
struct Options {
    config_path: Option<PathBuf>,
    dry_run: bool,
    command: Command,
}

fn parse_f64(s: &str, what: &str) -> Result<f64> {
    let value: f64 = s.parse().with_context(|| format!("{} must be a number, got {:?}", what, s))?;
    if !value.is_finite() {
        bail!("{} must be a finite number, got {:?}", what, s);
    }
    Ok(value)
}

fn parse_position(args: &[String]) -> Result<[f64; 3]> {
    if args.len() != 3 {
        bail!("expected three coordinates, got {}", args.len());
    }
    Ok([
        parse_f64(&args[0], "x")?,
        parse_f64(&args[1], "y")?,
        parse_f64(&args[2], "z")?,
    ])
}

fn parse_attribute(s: &str) -> Result<Attribute> {
    match s.to_ascii_lowercase().as_str() {
        "velocity" | "velocity_magnitude" => Ok(Attribute::VelocityMagnitude),
        "pressure" => Ok(Attribute::Pressure),
        other => bail!("unknown attribute {:?}", other),
    }
}

fn parse_kind(s: &str) -> Result<UploadKind> {
    UploadKind::parse(s).with_context(|| format!("unknown file kind {:?} (expected stl or streamlines)", s))
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut config_path = None;
    let mut dry_run = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() {
                    bail!("--config requires an argument");
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            "--dry-run" => dry_run = true,
            "-h" | "--help" => {
                return Ok(Options { config_path, dry_run, command: Command::Help });
            }
            _ => break,
        }
        i += 1;
    }

    let Some(name) = args.get(i) else {
        bail!("missing command\n\n{}", USAGE);
    };
    let rest = &args[i + 1..];
    let command = parse_command(name, rest)?;

    Ok(Options { config_path, dry_run, command })
}

fn required<'a>(rest: &'a [String], n: usize, command: &str, what: &str) -> Result<&'a String> {
    rest.get(n).with_context(|| format!("{} requires {}", command, what))
}

fn parse_command(name: &str, rest: &[String]) -> Result<Command> {
    let command = match name {
        "click" => {
            let label = rest.join(" ");
            let button = ViewButton::from_label(&label).with_context(|| format!("unknown view button {:?}", label))?;
            Command::Render(ViewState::new().click(button, Instant::now()))
        }
        "reset" => Command::Render(vec![RenderCommand::Reset]),
        "speed" => {
            let speed = parse_f64(required(rest, 0, name, "a speed")?, "speed")?;
            Command::Render(vec![WindSpeed::default().commit(speed)])
        }
        "attribute" => {
            let attribute = parse_attribute(required(rest, 0, name, "an attribute")?)?;
            Command::Render(vec![RenderCommand::SetVisualizationAttribute(attribute)])
        }
        "gradient" => {
            let min = parse_f64(required(rest, 0, name, "min and max")?, "min")?;
            let max = parse_f64(required(rest, 1, name, "min and max")?, "max")?;
            let mut gradient = GradientState::new();
            if let Some(attribute) = rest.get(2) {
                gradient.select(parse_attribute(attribute)?);
            }
            Command::Render(vec![gradient.commit(min, max)])
        }
        "variant" => {
            let assignment = required(rest, 0, name, "kind=value")?;
            let change = VariantChange::parse(assignment).with_context(|| format!("unknown variant {:?}", assignment))?;
            Command::Render(vec![RenderCommand::SetVariant(change)])
        }
        "streamlines-pos" => {
            Command::Render(vec![CurveTraceParams::default().set_position(parse_position(rest)?)])
        }
        "streamlines-radius" => {
            let radius = parse_f64(required(rest, 0, name, "a radius")?, "radius")?;
            Command::Render(vec![CurveTraceParams::default().set_radius(radius)])
        }
        "smokeprobes-pos" => {
            Command::Render(vec![VolumeTraceParams::default().set_position(parse_position(rest)?)])
        }
        "slice" => {
            let axis_arg = required(rest, 0, name, "an axis")?;
            let axis = SliceAxis::parse(axis_arg).with_context(|| format!("unknown axis {:?}", axis_arg))?;
            let mut commands = vec![RenderCommand::SetSliceState(axis)];
            if let Some(position) = rest.get(1) {
                commands.push(SliceParams::default().set_position(parse_f64(position, "position")?));
            }
            Command::Render(commands)
        }
        "load" => {
            let mut stl_filename = None;
            let mut streamlines_filename = None;
            let mut j = 0;
            while j < rest.len() {
                let value = rest.get(j + 1).with_context(|| format!("{} requires a file name", rest[j]))?;
                match rest[j].as_str() {
                    "--stl" => stl_filename = Some(value.clone()),
                    "--streamlines" => streamlines_filename = Some(value.clone()),
                    other => bail!("unknown load option {:?}", other),
                }
                j += 2;
            }
            if stl_filename.is_none() && streamlines_filename.is_none() {
                bail!("load requires --stl and/or --streamlines");
            }
            Command::Render(vec![RenderCommand::LoadUploadedFiles { stl_filename, streamlines_filename }])
        }
        "files" => Command::Service(ServiceCommand::ListFiles),
        "upload" => Command::Service(ServiceCommand::Upload {
            kind: parse_kind(required(rest, 0, name, "a kind and a path")?)?,
            path: PathBuf::from(required(rest, 1, name, "a kind and a path")?),
        }),
        "delete" => Command::Service(ServiceCommand::Delete {
            kind: parse_kind(required(rest, 0, name, "a kind and a name")?)?,
            name: required(rest, 1, name, "a kind and a name")?.clone(),
        }),
        "help" => Command::Help,
        other => bail!("unknown command {:?}\n\n{}", other, USAGE),
    };

    Ok(command)
}

fn send_all(api: &dyn RenderApi, commands: &[RenderCommand]) -> Result<()> {
    if commands.is_empty() {
        println!("nothing to send");
    }
    for command in commands {
        api.request(command).with_context(|| format!("{} failed", command.name()))?;
        println!("sent {}", command.envelope());
    }
    Ok(())
}

fn run_service_command(api: &dyn UploadApi, command: ServiceCommand) -> Result<()> {
    match command {
        ServiceCommand::ListFiles => {
            let listing = api.list_files()?;
            println!("STL files:");
            for file in &listing.stl_files {
                println!("  {:<40} {}", file.name, format_size_kb(file.size));
            }
            println!("Streamline files:");
            for file in &listing.streamline_files {
                println!("  {:<40} {} streamlines", file.name, file.num_streamlines);
            }
        }
        ServiceCommand::Upload { kind, path } => {
            if !kind.accepts(&path) {
                bail!("{} does not end with {}", path.display(), kind.extension());
            }
            let response = api.upload(kind, &path)?;
            match response.num_streamlines {
                Some(n) => println!("✓ uploaded {} ({} streamlines)", response.filename, n),
                None => println!("✓ uploaded {}", response.filename),
            }
        }
        ServiceCommand::Delete { kind, name } => {
            api.delete(kind, &name)?;
            println!("✓ deleted {}", name);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;
    let config = PanelConfig::load(options.config_path.as_deref())?;

    match options.command {
        Command::Help => println!("{}", USAGE),
        Command::Render(commands) => {
            if options.dry_run {
                let recorder = RecordingRenderApi::new();
                send_all(&recorder, &commands)?;
            } else {
                let api = HttpRenderApi::new(config.render_api_url.clone(), config.request_timeout())?;
                send_all(&api, &commands)?;
            }
        }
        Command::Service(command) => {
            if options.dry_run {
                println!("dry run: would contact {}", config.upload_base_url);
                return Ok(());
            }
            let client = UploadClient::new(&config.upload_base_url, config.request_timeout())?;
            run_service_command(&client, command)?;
        }
    }

    Ok(())
}
