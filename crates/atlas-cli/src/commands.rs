//! Command implementations: thin argument translation over the library
//! pipelines.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use atlas_clean::{CleanOptions, CleanResult, run_clean};
use atlas_render::{Extent, MapStyle, RenderOptions, RenderResult, run_render};
use atlas_topo::{SimplifyOptions, SimplifyResult, Tier, run_simplify};

use crate::cli::{CleanArgs, RenderArgs, SimplifyArgs, TierArg};

pub fn run_clean_command(args: &CleanArgs) -> Result<CleanResult> {
    let output_dir = resolve_output_dir(args.output_dir.clone(), &args.boundaries);
    let options = CleanOptions {
        positional_parts: args.positional_parts,
    };
    run_clean(&args.boundaries, &args.disputed, &output_dir, &options)
}

pub fn run_simplify_command(args: &SimplifyArgs) -> Result<SimplifyResult> {
    let output_dir = resolve_output_dir(args.output_dir.clone(), &args.input);
    let options = SimplifyOptions {
        tiers: args.tiers.iter().map(|&tier| tier_of(tier)).collect(),
    };
    run_simplify(&args.input, &output_dir, &options)
}

pub fn run_render_command(args: &RenderArgs) -> Result<RenderResult> {
    let extent = match (&args.region, &args.bbox) {
        (Some(region), _) => Extent::region(region)?,
        (None, Some(bbox)) => parse_bbox(bbox)?,
        (None, None) => Extent::World,
    };
    let options = RenderOptions {
        extent,
        breaks: args.colors.clone(),
        style: MapStyle {
            width: args.width,
            height: args.height,
            edge_width: args.border_width,
        },
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("choropleth_map.svg"));
    run_render(
        &args.boundaries,
        &args.scores,
        &args.variable,
        args.year,
        &output,
        &options,
    )
}

fn resolve_output_dir(explicit: Option<PathBuf>, input: &std::path::Path) -> PathBuf {
    explicit.unwrap_or_else(|| {
        input
            .parent()
            .map(|parent| parent.join("output"))
            .unwrap_or_else(|| PathBuf::from("output"))
    })
}

fn tier_of(arg: TierArg) -> Tier {
    match arg {
        TierArg::M10 => Tier::M10,
        TierArg::M30 => Tier::M30,
        TierArg::M50 => Tier::M50,
        TierArg::M100 => Tier::M100,
    }
}

/// Parse `min_lon,min_lat,max_lon,max_lat`.
fn parse_bbox(text: &str) -> Result<Extent> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid bbox component {:?}", part.trim()))
        })
        .collect::<Result<_>>()?;
    if parts.len() != 4 {
        bail!("bbox needs 4 comma-separated numbers, got {}", parts.len());
    }
    Extent::bbox(parts[0], parts[1], parts[2], parts[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_parses_four_components() {
        let extent = parse_bbox("-5.5, 41.0, 10.0, 51.5").unwrap();
        assert!(matches!(extent, Extent::Bbox(_)));
    }

    #[test]
    fn short_bbox_is_rejected() {
        assert!(parse_bbox("1,2,3").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
    }
}
