use clap::Parser;
use nfa_min_lib::{
    automaton::{description::UnknownStatePolicy, dfa::minimization::MinimizationAlgorithm},
    config::{Config, OutputFormat},
    display::{TransitionTable, describe, transition_list},
    logger::init_logging,
    parser::parse_description_file,
    pipeline::run,
};

#[derive(Parser, Debug)]
#[command(name = "NFA Minimization Tool")]
#[command(version = "0.1")]
#[command(about = "Determinize an NFA and minimize the resulting DFA", long_about = None)]
struct Args {
    /// The NFA description file.
    file: String,

    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the output format of the config file.
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Use Hopcroft's algorithm instead of table filling.
    #[arg(long)]
    hopcroft: bool,

    /// Treat undeclared state labels as ordinary states.
    #[arg(long)]
    permissive: bool,

    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(format) = self.format {
            config = config.with_output(format);
        }
        if self.hopcroft {
            config = config.with_algorithm(MinimizationAlgorithm::Hopcroft);
        }
        if self.permissive {
            config = config.with_unknown_states(UnknownStatePolicy::Permissive);
        }
        if self.no_color {
            config = config.with_color(false);
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = args.apply(Config::from_optional_file(args.config.as_ref())?);
    init_logging(config.get_logger())?;

    let description = parse_description_file(&args.file)?;
    tracing::debug!(
        states = description.states.len(),
        symbols = description.alphabet.len(),
        "parsed description"
    );

    let output = run(&description, *config.get_unknown_states(), *config.get_algorithm())?;

    match config.get_output() {
        OutputFormat::Table => {
            let dfa = output.dfa.to_table()?;
            let minimal = output.minimal.to_table()?;
            let color = *config.get_color();

            println!("DFA ({})", describe(&dfa));
            println!("{}", TransitionTable::new(&dfa).with_color(color));
            println!(
                "Minimal DFA ({}, {})",
                describe(&minimal),
                config.get_algorithm()
            );
            println!("{}", TransitionTable::new(&minimal).with_color(color));
            for line in transition_list(&minimal) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", output.report()?.to_json()?);
        }
        OutputFormat::Dot => {
            println!("{}", output.dfa.to_graphviz());
            println!("{}", output.minimal.to_graphviz());
        }
    }

    Ok(())
}
