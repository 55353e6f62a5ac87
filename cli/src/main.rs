use clap::{Args, Parser, Subcommand};
use prost::Message;
use std::fs;
use std::path::PathBuf;

use firment_cli::init_logging;
use firment_compiler::{
    codec::{decode_descriptor_set, decode_response, model_to_json, request_from_descriptor_set},
    descriptor::build_request_model,
    CanGenerator, FirmentError, Generator, WidgetGenerator,
};

#[derive(Parser)]
#[command(name = "fgen")]
#[command(about = "Run the firment generators outside of protoc", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate React widgets (`widgets.pb.tsx`)
    Widgets(GenerateArgs),

    /// Generate C pack/unpack routines (`can.pb.h`, `can.pb.c`)
    Can(GenerateArgs),

    /// Print the schema model of a descriptor set as JSON
    Inspect {
        /// Input descriptor set (`protoc --include_imports --descriptor_set_out`)
        #[arg(short, long)]
        descriptor_set: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Input descriptor set (`protoc --include_imports --descriptor_set_out`)
    #[arg(short, long)]
    descriptor_set: PathBuf,

    /// Files to generate (defaults to every file in the set)
    #[arg(short, long = "file")]
    files: Vec<String>,

    /// Generator parameter, as passed with `--<plugin>_opt`
    #[arg(short, long)]
    param: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

fn main() -> Result<(), FirmentError> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Widgets(args) => generate(&WidgetGenerator, args),
        Commands::Can(args) => generate(&CanGenerator, args),
        Commands::Inspect { descriptor_set } => {
            let data = fs::read(&descriptor_set)?;
            let set = decode_descriptor_set(&data)?;
            let request = request_from_descriptor_set(set, &[], None);
            let model = build_request_model(&request);
            println!("{}", model_to_json(&model)?);
            Ok(())
        }
    }
}

fn generate(generator: &dyn Generator, args: GenerateArgs) -> Result<(), FirmentError> {
    let data = fs::read(&args.descriptor_set)?;
    let set = decode_descriptor_set(&data)?;
    let request = request_from_descriptor_set(set, &args.files, args.param);

    // Same bytes-in, bytes-out path protoc drives.
    let response = firment_compiler::run(&request.encode_to_vec(), generator)?;

    fs::create_dir_all(&args.out)?;
    for file in decode_response(&response)? {
        let path = args.out.join(&file.name);
        fs::write(&path, &file.content)?;
        println!("Generated {}", path.display());
    }
    Ok(())
}
