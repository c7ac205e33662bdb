//! Calico operator - Installation defaulting tool

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use kube::CustomResourceExt;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use calico_operator::crd::{Installation, ProductVariant};
use calico_operator::defaults::fill_defaults;
use calico_operator::yaml::parse_installation;
use calico_operator::DEFAULT_INSTALLATION_NAME;

/// Calico operator - Installation resource tooling
#[derive(Parser, Debug)]
#[command(name = "calico-operator", version, about, long_about = None)]
struct Cli {
    /// Generate the Installation CRD manifest and exit
    #[arg(long)]
    crd: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an Installation with every unset field defaulted
    ///
    /// Reads the manifest, applies the same defaulting the operator applies
    /// before rendering, and prints the result.
    Defaults(DefaultsArgs),
}

/// Defaults mode arguments
#[derive(Parser, Debug)]
struct DefaultsArgs {
    /// Path to the Installation YAML manifest ("-" reads stdin)
    #[arg(short = 'f', long = "file", env = "CALICO_INSTALLATION_MANIFEST")]
    file: PathBuf,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// Override spec.variant before defaulting (Calico or TigeraSecureEnterprise)
    #[arg(long, env = "CALICO_VARIANT")]
    variant: Option<ProductVariant>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.crd {
        let crd = serde_yaml::to_string(&Installation::crd())
            .map_err(|e| anyhow::anyhow!("Failed to serialize CRD: {}", e))?;
        println!("{crd}");
        return Ok(());
    }

    match cli.command {
        Some(Commands::Defaults(args)) => run_defaults(args),
        None => {
            anyhow::bail!("no command given; run with --help for usage")
        }
    }
}

/// Read a manifest, default it and print the result
fn run_defaults(args: DefaultsArgs) -> anyhow::Result<()> {
    let content = read_manifest(&args.file)?;

    let mut installation = parse_installation(&content)
        .with_context(|| format!("Failed to parse Installation from {:?}", args.file))?;

    apply_overrides(&mut installation, args.variant);
    fill_defaults(&mut installation);
    info!(
        installation = installation.metadata.name.as_deref().unwrap_or_default(),
        "Installation defaulted"
    );

    let exported = installation.for_export();
    let rendered = match args.output {
        OutputFormat::Yaml => serde_yaml::to_string(&exported)
            .context("Failed to serialize Installation as YAML")?,
        OutputFormat::Json => serde_json::to_string_pretty(&exported)
            .context("Failed to serialize Installation as JSON")?,
    };
    println!("{rendered}");
    Ok(())
}

/// Apply command-line overrides that take precedence over the manifest
fn apply_overrides(installation: &mut Installation, variant: Option<ProductVariant>) {
    if installation.metadata.name.is_none() {
        warn!(
            name = DEFAULT_INSTALLATION_NAME,
            "Installation has no metadata.name, using the default"
        );
        installation.metadata.name = Some(DEFAULT_INSTALLATION_NAME.to_string());
    }
    if let Some(variant) = variant {
        info!(%variant, "Overriding spec.variant");
        installation.spec.variant = Some(variant);
    }
}

fn read_manifest(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read manifest from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read manifest {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calico_operator::crd::InstallationSpec;

    fn parse_args(args: &[&str]) -> Result<DefaultsArgs, clap::Error> {
        let cli = Cli::try_parse_from(args)?;
        match cli.command {
            Some(Commands::Defaults(args)) => Ok(args),
            None => panic!("expected defaults subcommand"),
        }
    }

    #[test]
    fn variant_flag_parses_wire_name() {
        let args = parse_args(&[
            "calico-operator",
            "defaults",
            "-f",
            "installation.yaml",
            "--variant",
            "TigeraSecureEnterprise",
        ])
        .expect("arguments should parse");
        assert_eq!(args.variant, Some(ProductVariant::TigeraSecureEnterprise));
    }

    #[test]
    fn unknown_variant_flag_is_rejected() {
        let result = parse_args(&[
            "calico-operator",
            "defaults",
            "-f",
            "installation.yaml",
            "--variant",
            "Enterprise",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn variant_override_wins_over_manifest() {
        let mut installation = Installation::new(
            "default",
            InstallationSpec {
                variant: Some(ProductVariant::Calico),
                ..Default::default()
            },
        );
        apply_overrides(&mut installation, Some(ProductVariant::TigeraSecureEnterprise));
        fill_defaults(&mut installation);

        assert_eq!(
            installation.spec.variant,
            Some(ProductVariant::TigeraSecureEnterprise)
        );
        assert_eq!(
            installation.spec.components.node.image,
            "docker.io/tigera/cnx-node:v2.5.0"
        );
    }

    #[test]
    fn unnamed_installation_gets_default_name() {
        let mut installation = Installation::new("ignored", InstallationSpec::default());
        installation.metadata.name = None;
        apply_overrides(&mut installation, None);

        assert_eq!(
            installation.metadata.name.as_deref(),
            Some(DEFAULT_INSTALLATION_NAME)
        );
        assert_eq!(installation.spec.variant, None);
    }
}
