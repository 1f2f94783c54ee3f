use arch::cli::{init_logging, LogLevel, HELP_TEMPLATE};
use hackvm::{Error, Translator};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// A .vm file, or a directory whose .vm files form one program
    #[clap(required_unless_present = "stdin", conflicts_with = "stdin")]
    input: Option<String>,

    /// Output file [default: <file>.asm, <dir>/<dir>.asm or out.asm]
    #[clap(short, long)]
    output: Option<String>,

    /// Read a single module from stdin
    #[clap(long)]
    stdin: bool,

    /// Write the assembly to stdout
    #[clap(long, conflicts_with = "output")]
    stdout: bool,

    /// Skip the bootstrap code emitted for directories
    #[clap(long)]
    no_bootstrap: bool,

    /// Function called by the bootstrap code
    #[clap(long, default_value = "Sys.init")]
    entry: String,

    /// Module name used with --stdin
    #[clap(long, default_value = "Stdin")]
    name: String,

    /// Set verbosity for logging
    #[clap(short, long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    init_logging(args.log_level);

    // Module name and the file it was read from
    let mut sources = Vec::new();
    if let Err(err) = run(&args, &mut sources) {
        let file = err
            .module()
            .and_then(|module| sources.iter().find(|(name, _)| name == module))
            .map(|(_, path): &(String, PathBuf)| path.display().to_string());
        err.print_diag(file.as_deref());
        std::process::exit(1);
    }
}

fn run(args: &Args, sources: &mut Vec<(String, PathBuf)>) -> Result<(), Error> {
    let mut translator = Translator::new();

    let (program, default_output) = match &args.input {
        Some(input) if !args.stdin => {
            let path = Path::new(input);
            if path.is_dir() {
                for file in vm_files(path)? {
                    let src = read(&file)?;
                    let name = module_name(&file);
                    sources.push((name.clone(), file));
                    translator.add_module(&name, &src)?;
                }
                let output = path.join(format!("{}.asm", program_name(path)));
                (true, output)
            } else {
                let src = read(path)?;
                let name = module_name(path);
                sources.push((name.clone(), path.to_path_buf()));
                translator.add_module(&name, &src)?;
                (false, path.with_extension("asm"))
            }
        }
        _ => {
            let mut src = String::new();
            std::io::stdin()
                .read_to_string(&mut src)
                .map_err(|e| Error::FileRead("<stdin>".to_string(), e))?;
            translator.add_module(&args.name, &src)?;
            (false, PathBuf::from("out.asm"))
        }
    };

    // Single modules are libraries and never get the bootstrap code
    if program && !args.no_bootstrap {
        info!("Bootstrap calls {}", args.entry);
        translator.bootstrap(&args.entry);
    }

    let mut text = translator.translate()?.join("\n");
    text.push('\n');

    if args.stdout {
        print!("{}", text);
    } else {
        let output = args
            .output
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or(default_output);
        info!("Writing to file: {}", output.display());
        std::fs::write(&output, text)
            .map_err(|e| Error::FileWrite(output.display().to_string(), e))?;
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, Error> {
    info!("Reading file: {}", path.display());
    std::fs::read_to_string(path).map_err(|e| Error::FileRead(path.display().to_string(), e))
}

/// `.vm` files directly inside `dir`, sorted by name.
fn vm_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| Error::FileRead(dir.display().to_string(), e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| Error::FileRead(dir.display().to_string(), e))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "vm") {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(Error::NoModules(dir.display().to_string()));
    }
    files.sort();
    Ok(files)
}

fn module_name(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The directory's own name, resolving `.` and `..`.
fn program_name(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .and_then(|dir| dir.file_name().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "out".to_string())
}
