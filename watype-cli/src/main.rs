use clap::Parser;
use patharg::InputArg;
use std::error::Error;
use std::process::exit;
use tracing::Level;
use watype::free::{free_sem, transitive};
use watype::load::module_type_from_reader;
use watype::sem_module_type;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON description of the module type. If not provided or is '-', read
    /// from standard input.
    #[arg(default_value_t)]
    pub input: InputArg,

    /// Also print the definition of every type the resolved imports and
    /// exports depend on.
    #[arg(long, default_value_t = false)]
    pub closure: bool,

    /// Enable debug logging, including a debug representation of errors.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let input = cli.input.open().unwrap_or_else(|e| abort(&cli, e));
    let module = module_type_from_reader(input).unwrap_or_else(|e| abort(&cli, e));
    print!("{module}");

    let resolved = sem_module_type(&module);
    println!("---");
    print!("{resolved}");

    if cli.closure {
        println!("---");
        for x in transitive(free_sem(&resolved).into_vec()) {
            println!("{x} = {}", x.ctx_type());
        }
    }
}

fn abort<T>(cli: &Cli, err: impl Error) -> T {
    eprintln!("ERROR: {err}");

    let mut sources = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        sources.push(cause);
        current = cause.source();
    }
    if !sources.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in sources.iter().enumerate() {
            eprintln!("    {i}: {cause}");
        }
    }

    if cli.verbose {
        eprintln!("\nDEBUG OUTPUT:\n{err:#?}");
    }

    exit(1)
}
