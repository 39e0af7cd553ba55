use clap::Parser;
use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use turing_increment::{
    incrementer, Config, ConfigLoader, Halt, PresetManager, StepEvent, TuringMachine,
    TuringMachineError, MAX_EXECUTION_STEPS,
};

/// Generates a Turing machine that increments a numeral in the given alphabet and runs it
/// on every input.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  turing-increment-cli tapes.txt
  turing-increment-cli --alphabet decimal --input 199 --input 9
  cat tapes.txt | turing-increment-cli --debug")]
struct Cli {
    /// Configuration file: the alphabet on the first line, one input per following line.
    /// Read from stdin when omitted and stdin is piped.
    config: Option<PathBuf>,

    /// Configuration file, same as the positional argument
    #[clap(long = "config", value_name = "PATH", conflicts_with = "config")]
    config_file: Option<PathBuf>,

    /// Alphabet (digits, lowest value first) or preset name. Overrides the config alphabet.
    #[clap(short, long)]
    alphabet: Option<String>,

    /// An additional input to run
    #[clap(short, long)]
    input: Vec<String>,

    /// Maximum number of steps per run
    #[clap(long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the generated machine description as JSON and exit
    #[clap(long)]
    dump: bool,

    /// List the preset alphabets and exit
    #[clap(long)]
    list_presets: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.list_presets {
        for name in PresetManager::list_preset_names() {
            println!("{:<8} {}", name, PresetManager::resolve(name));
        }
        return Ok(());
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let alphabet = PresetManager::resolve(&config.alphabet);
    let description = match incrementer(alphabet) {
        Ok(description) => description,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&description)?);
        return Ok(());
    }

    println!("Alphabet: {}", alphabet);
    println!("Inputs: {}", config.inputs.len());

    let mut machine = TuringMachine::new(description).with_step_limit(cli.max_steps);

    for (i, input) in config.inputs.iter().enumerate() {
        println!("\n=== Test {}: input '{}'", i + 1, input);

        let halt = if cli.debug {
            let mut print_step = |e: &StepEvent| {
                println!(
                    "Step {}: {}, {} -> {}, {}, {}",
                    e.step, e.state_before, e.read, e.state_after, e.write, e.direction
                );
            };
            machine.execute_with(input, &mut print_step)
        } else {
            machine.execute(input)
        };

        println!("Result: {}", halt);
        println!(
            "Final state: {} after {} steps",
            machine.state(),
            machine.step_count()
        );

        // An invalid input never reaches the tape.
        if !matches!(halt, Halt::Err(TuringMachineError::InvalidSymbol(_))) {
            println!("Tape: {}", machine.tape());
            println!("Numeral: {}", machine.tape().contents());
        }
    }

    Ok(())
}

impl Cli {
    /// The config file, given either positionally or with `--config`.
    fn config_path(&self) -> Option<&PathBuf> {
        self.config_file.as_ref().or(self.config.as_ref())
    }
}

/// Logs go to stderr so they never mix with the results. `RUST_LOG` takes precedence.
fn init_logging(debug: bool) {
    let default_level = if debug { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the configuration from the CLI arguments.
///
/// The config file wins, then piped stdin. Without either, `--alphabet` alone is enough.
/// `--alphabet` replaces the loaded alphabet and `--input` values are appended.
fn load_config(cli: &Cli) -> Result<Config, TuringMachineError> {
    let mut config = if let Some(path) = cli.config_path() {
        ConfigLoader::load_config(path)?
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| TuringMachineError::FileError(format!("Failed to read stdin: {}", e)))?;
        ConfigLoader::load_config_from_string(&buffer)?
    } else if cli.alphabet.is_some() {
        Config::default()
    } else {
        return Err(TuringMachineError::ValidationError(
            "No configuration given: pass a config file, pipe one on stdin, or use --alphabet"
                .to_string(),
        ));
    };

    if let Some(alphabet) = &cli.alphabet {
        config.alphabet = alphabet.clone();
    }
    config.inputs.extend(cli.input.iter().cloned());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag_and_positional() {
        let cli = Cli::try_parse_from(["turing-increment-cli", "--config", "tapes.txt"]).unwrap();
        assert_eq!(cli.config_path(), Some(&PathBuf::from("tapes.txt")));

        let cli = Cli::try_parse_from(["turing-increment-cli", "tapes.txt"]).unwrap();
        assert_eq!(cli.config_path(), Some(&PathBuf::from("tapes.txt")));

        let cli = Cli::try_parse_from(["turing-increment-cli", "-a", "binary"]).unwrap();
        assert_eq!(cli.config_path(), None);
    }

    #[test]
    fn test_config_given_twice_is_rejected() {
        let result =
            Cli::try_parse_from(["turing-increment-cli", "a.txt", "--config", "b.txt"]);
        assert!(result.is_err());
    }
}
