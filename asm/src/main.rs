use arch::cli::{init_logging, LogLevel, HELP_TEMPLATE};
use hackasm::{util::print_dump, Error, Format};
use std::path::Path;
use tracing::info;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file [default: input with the format's extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Dump listing and symbol table
    #[clap(short, long)]
    dump: bool,

    /// Set verbosity for logging
    #[clap(short, long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    init_logging(args.log_level);

    if let Err(err) = run(&args) {
        err.print_diag(&args.input);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    info!("Reading file: {}", args.input);
    let source = std::fs::read_to_string(&args.input)
        .map_err(|e| Error::FileOpen(args.input.clone(), e))?;

    let program = hackasm::assemble(&source)?;

    let output = match &args.output {
        Some(output) => output.clone(),
        None => Path::new(&args.input)
            .with_extension(args.format.extension())
            .to_string_lossy()
            .into_owned(),
    };
    info!("Writing to file: {}", output);
    std::fs::write(&output, args.format.serialize(&program.words))
        .map_err(|e| Error::FileWrite(output.clone(), e))?;

    if args.dump {
        print_dump(&args.input, &program);
    }
    Ok(())
}
