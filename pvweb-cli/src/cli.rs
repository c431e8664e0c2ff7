use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "pvdump",
    about = "Inspect ParaView WebGL scene exports",
    version
)]
pub struct Cli {
    /// Reader options file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a scene description and report layers, actors and legends
    Inspect {
        /// Scene description JSON file
        scene: PathBuf,
        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,
        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
        /// Skip unknown base64 symbols instead of rejecting the payload
        #[arg(long)]
        lenient: bool,
        /// Report format
        #[arg(short, long, default_value = "text", value_enum)]
        format: ReportFormat,
    },
    /// Decode a single base64 object payload
    Decode {
        /// Payload text, or @path to read it from a file
        payload: String,
        /// Skip unknown base64 symbols instead of rejecting the payload
        #[arg(long)]
        lenient: bool,
        /// Treat the payload as concatenated records
        #[arg(long)]
        stream: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from([
            "pvdump", "--config", "reader.toml", "inspect", "scene.json", "--width", "1024", "--lenient", "-f", "json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("reader.toml")));
        match cli.command {
            Command::Inspect {
                scene,
                width,
                height,
                lenient,
                format,
            } => {
                assert_eq!(scene, PathBuf::from("scene.json"));
                assert_eq!(width, Some(1024));
                assert_eq!(height, None);
                assert!(lenient);
                assert_eq!(format, ReportFormat::Json);
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn test_parse_decode() {
        let cli = Cli::try_parse_from(["pvdump", "decode", "@obj.b64", "--stream"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Decode { ref payload, stream: true, lenient: false } if payload == "@obj.b64"
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["pvdump"]).is_err());
    }
}
