/*!
ggpick Command Line Interface

Lists the dataset columns, shows the selector state for a partial selection, and
renders a complete selection to Vega-Lite JSON.
*/

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ggpick::reader::{BuiltinReader, Reader};
use ggpick::{available_for, render, set_slot, Aesthetic, Assignment, Column, VERSION};

#[cfg(feature = "vegalite")]
use ggpick::writer::{VegaLiteWriter, Writer};

#[derive(Parser)]
#[command(name = "ggpick")]
#[command(about = "Bind dataset columns to scatter plot aesthetics")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// One optional column per aesthetic slot, applied in selection order
#[derive(Args, Debug, Clone)]
pub struct Selection {
    /// Column for the x-axis
    #[arg(long)]
    x: Option<Column>,

    /// Column for the y-axis
    #[arg(long)]
    y: Option<Column>,

    /// Column for point color
    #[arg(long, alias = "colour")]
    color: Option<Column>,

    /// Column for point size
    #[arg(long)]
    size: Option<Column>,

    /// Column for point shape (treated as categorical)
    #[arg(long)]
    shape: Option<Column>,
}

impl Selection {
    /// Feed the given columns through the cascade, first slot first
    fn to_assignment(&self) -> ggpick::Result<Assignment> {
        let values = [self.x, self.y, self.color, self.size, self.shape];
        let mut assignment = Assignment::new();
        for (slot, column) in Aesthetic::ALL.into_iter().zip(values) {
            if column.is_some() {
                assignment = set_slot(slot, column, &assignment)?;
            }
        }
        Ok(assignment)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the dataset columns and their labels
    Columns,

    /// Show every selector for a (possibly partial) selection
    Options {
        #[command(flatten)]
        selection: Selection,
    },

    /// Render a complete selection
    Render {
        #[command(flatten)]
        selection: Selection,

        /// Output format
        #[arg(long, default_value = "vegalite")]
        writer: String,

        /// Output file path
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn describe(choice: &Option<Column>) -> &'static str {
    match choice {
        Some(column) => column.name(),
        None => "(unset)",
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Columns => {
            for column in Column::ALL {
                println!("{:<6} {}", column.name(), column.label());
            }
        }

        Commands::Options { selection } => {
            let assignment = selection.to_assignment()?;
            for slot in Aesthetic::ALL {
                match available_for(slot, &assignment) {
                    Some(choices) => {
                        let choices: Vec<&str> = choices.iter().map(describe).collect();
                        println!(
                            "{:<7} = {:<8} [{}]",
                            slot.title(),
                            describe(&assignment.get(slot)),
                            choices.join(", ")
                        );
                    }
                    None => println!("{:<7} (hidden)", slot.title()),
                }
            }
        }

        Commands::Render {
            selection,
            writer,
            output,
        } => {
            let assignment = selection.to_assignment()?;
            let data = BuiltinReader::new().read()?;

            let Some(outcome) = render(&assignment, &data) else {
                anyhow::bail!(
                    "All five aesthetics must be selected before rendering, got {}",
                    assignment
                );
            };

            if let Some(warning) = &outcome.warning {
                eprintln!("Warning: {}", warning);
            }
            if let Some(error) = &outcome.error {
                eprintln!("Error: {}", error);
                std::process::exit(1);
            }
            let Some(plot) = outcome.plot else {
                anyhow::bail!("Render produced no plot for {}", assignment);
            };

            #[cfg(feature = "vegalite")]
            if writer == "vegalite" {
                let json_output = VegaLiteWriter::new().write(&plot, &data)?;
                if let Some(output_path) = &output {
                    std::fs::write(output_path, &json_output)?;
                    eprintln!("Vega-Lite JSON written to: {}", output_path.display());
                } else {
                    println!("{}", json_output);
                }
                return Ok(());
            }

            #[cfg(not(feature = "vegalite"))]
            {
                if writer == "vegalite" {
                    eprintln!("VegaLite writer not compiled in. Rebuild with --features vegalite");
                    std::process::exit(1);
                }
            }

            eprintln!("Unsupported writer: {}", writer);
            eprintln!("Available writers: vegalite");
            std::process::exit(1);
        }
    }

    Ok(())
}
