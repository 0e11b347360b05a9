use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use spatial_anchors::{
    AnchorRegistry, AnchorSystemConfig, CallbackObserver, ConfigurationManager, GeographicPosition,
    Metadata, ReferenceLocation, Rotation,
};

#[derive(Parser)]
#[command(name = "spatial-anchors", about = "Place and inspect spatial anchors")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a scene file and print the resulting anchors as JSON
    Scene { path: PathBuf },
    /// Convert a geographic position to a local offset
    ToLocal {
        #[arg(long, allow_negative_numbers = true, num_args = 3, value_names = ["LAT", "LNG", "ALT"])]
        reference: Vec<f64>,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
        #[arg(allow_negative_numbers = true, default_value_t = 0.0)]
        alt: f64,
    },
    /// Run a built-in placement scenario
    Demo,
}

/// Scene file: an optional reference location plus anchor placements
#[derive(Debug, Deserialize)]
struct SceneFile {
    reference: Option<ReferenceLocation>,
    #[serde(default)]
    anchors: Vec<ScenePlacement>,
}

/// One anchor placement. Exactly one of `position` (local meters) or
/// `geographic` must be given.
#[derive(Debug, Deserialize)]
struct ScenePlacement {
    position: Option<[f64; 3]>,
    geographic: Option<GeographicPosition>,
    #[serde(default)]
    rotation: Rotation,
    metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PlacementLocation {
    Local(Vector3<f64>),
    Geographic(GeographicPosition),
}

impl ScenePlacement {
    fn location(&self) -> Result<PlacementLocation> {
        match (self.position, self.geographic) {
            (Some(position), None) => Ok(PlacementLocation::Local(Vector3::from(position))),
            (None, Some(geographic)) => Ok(PlacementLocation::Geographic(geographic)),
            (Some(_), Some(_)) => bail!("placement has both `position` and `geographic`"),
            (None, None) => bail!("placement needs `position` or `geographic`"),
        }
    }
}

impl SceneFile {
    fn parse(json: &str) -> Result<Self> {
        let scene: SceneFile = serde_json::from_str(json).context("parsing scene JSON")?;
        for (index, placement) in scene.anchors.iter().enumerate() {
            placement.location().with_context(|| format!("anchor #{index}"))?;
        }
        Ok(scene)
    }

    /// Place every anchor in a fresh registry built from `config`
    fn build_registry(self, config: &AnchorSystemConfig) -> Result<AnchorRegistry> {
        let mut registry = AnchorRegistry::from_config(config)?;
        if let Some(reference) = self.reference {
            registry.transform_mut().set_reference(reference)?;
        }

        for placement in self.anchors {
            match placement.location()? {
                PlacementLocation::Local(position) => {
                    registry.create_anchor(position, placement.rotation, placement.metadata)?;
                }
                PlacementLocation::Geographic(geographic) => {
                    registry.create_geo_anchor(geographic, placement.rotation, placement.metadata)?;
                }
            }
        }
        Ok(registry)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigurationManager::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?
            .config()
            .clone(),
        None => AnchorSystemConfig::default(),
    };

    match cli.command {
        Command::Scene { path } => run_scene(&config, &path),
        Command::ToLocal { reference, lat, lng, alt } => run_to_local(&config, &reference, lat, lng, alt),
        Command::Demo => run_demo(&config),
    }
}

fn run_scene(config: &AnchorSystemConfig, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading scene {}", path.display()))?;
    let registry = SceneFile::parse(&json)?.build_registry(config)?;

    tracing::info!(anchors = registry.len(), "scene loaded");
    println!("{}", serde_json::to_string_pretty(&registry.get_anchors())?);
    Ok(())
}

fn run_to_local(config: &AnchorSystemConfig, reference: &[f64], lat: f64, lng: f64, alt: f64) -> Result<()> {
    let mut registry = AnchorRegistry::from_config(config)?;
    match reference {
        [r_lat, r_lng, r_alt] => registry.set_reference_location(*r_lat, *r_lng, *r_alt)?,
        [] => {}
        _ => bail!("--reference takes LAT LNG ALT"),
    }

    let local = registry.transform().to_local(lat, lng, alt)?;
    println!("x={:.3} m east, y={:.3} m up, z={:.3} m north", local.x, local.y, local.z);
    Ok(())
}

fn run_demo(config: &AnchorSystemConfig) -> Result<()> {
    let mut registry = AnchorRegistry::from_config(config)?;
    registry.set_observer(
        CallbackObserver::new()
            .on_placed(|anchor| {
                println!(
                    "placed {} at ({:.2}, {:.2}, {:.2})",
                    anchor.id(),
                    anchor.position().x,
                    anchor.position().y,
                    anchor.position().z
                )
            })
            .on_removed(|id| println!("removed {}", id)),
    );

    println!("AR enabled: {}", registry.is_ar_enabled());
    registry.set_reference_location(37.7749, -122.4194, 0.0)?;

    let entrance = registry.create_anchor(Vector3::new(0.0, 0.0, 0.0), Rotation::default(), None)?;
    registry.create_anchor(Vector3::new(1.0, 2.0, 3.0), Rotation::default(), None)?;
    let survey = registry.create_geo_anchor(
        GeographicPosition::new(37.7759, -122.4194).with_altitude(2.0),
        Rotation::default(),
        None,
    )?;

    if let Some(anchor) = registry.resolve_anchor(survey.as_str()) {
        println!(
            "{} is {:.2} m north of the reference",
            anchor.id(),
            anchor.position().z
        );
    }

    let nearby = registry.find_nearby_anchors(&Vector3::zeros(), 5.0);
    println!("{} anchors within 5 m of the origin", nearby.len());

    registry.delete_anchor(entrance.as_str());
    println!("remaining: {:?}", registry.get_all_anchors());
    Ok(())
}
