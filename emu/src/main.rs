use arch::cli::{init_logging, LogLevel, HELP_TEMPLATE};
use clap::Parser;
use color_print::ceprintln;
use hackemu::{
    hooks::{dump::Dump, Hook},
    preset::Preset,
    Error, State,
};
use tracing::info;

#[derive(Parser, Debug)]
#[clap(
    name = "Hack Emulator",
    version = "v1.0.0",
    about = "Emulator for the Hack architecture",
    help_template = HELP_TEMPLATE
)]
struct Args {
    /// Stop after this many instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// YAML file choosing what to dump at which ROM address
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Dump registers after every instruction
    #[arg(short = 'a', long)]
    dump_all: bool,

    /// YAML map of RAM address to initial value
    #[arg(short, long)]
    ram: Option<String>,

    /// RAM addresses to print on exit
    #[arg(short, long, value_delimiter = ',')]
    watch: Vec<u16>,

    #[arg(short, long, value_enum, default_value_t)]
    log_level: LogLevel,

    #[arg(default_value = "main.hack")]
    input_file: String,
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level);

    if let Err(err) = run(args) {
        ceprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    println!("+-----------------------------------------------+");
    println!("| {:<45} |", args.input_file);
    println!("+-----------------------------------------------+");

    let mut state = State::new();
    state.load_rom_file(&args.input_file)?;
    if let Some(fname) = &args.ram {
        Preset::load(fname)?.apply(&mut state);
    }

    println!("[INIT]");
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(Dump::arg(
        args.dump_cfg,
        args.dump_all,
        args.watch,
    )?)];
    state = hooks.iter_mut().fold(state, |state, hook| hook.init(state));

    let mut time = 0;
    while args.tmax.map_or(true, |tmax| time < tmax) && !state.is_terminated() {
        let (addr, inst) = state.exec(time);
        state = hooks
            .iter_mut()
            .fold(state, |state, hook| hook.exec(time, addr, inst, state));
        time += 1;
    }
    info!("Stopped after {} instructions", time);

    for hook in hooks.iter_mut() {
        hook.exit(&state);
    }
    println!("=================================================");
    Ok(())
}
