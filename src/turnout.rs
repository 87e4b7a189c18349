use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use turnout_engine::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::turnout::config_reader::*;

pub mod config_reader;
pub mod io_csv;
pub mod io_geojson;

#[derive(Debug, Snafu)]
pub enum TurnoutError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading the header of the CSV file"))]
    CsvHeaderParse { source: csv::Error },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error formatting the summary"))]
    FormattingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No turnout table: pass --input or a configuration file with a turnoutSource"))]
    MissingInput {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TurnoutResult<T> = Result<T, TurnoutError>;

const DEFAULT_MAP_NAME: &str = "County turnout";

/// Where to read from and write to, once the configuration file and the
/// command line have been merged.
#[derive(Debug, Clone)]
struct MapSources {
    map_name: String,
    input: PathBuf,
    geometry: Option<(PathBuf, String)>,
    output: Option<String>,
}

// Paths of the configuration file are relative to it, paths of the command
// line are taken as given.
fn resolve_sources(config: &MapConfig, root: &Path, args: &Args) -> TurnoutResult<MapSources> {
    let input = match (&args.input, &config.turnout_source) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(ts)) => root.join(&ts.file_path),
        (None, None) => return MissingInputSnafu {}.fail(),
    };
    let geometry = match (&args.geometry, &config.geometry_source) {
        (Some(p), gs) => Some((
            PathBuf::from(p),
            gs.as_ref().and_then(|g| g.county_property.clone()),
        )),
        (None, Some(gs)) => Some((root.join(&gs.file_path), gs.county_property.clone())),
        (None, None) => None,
    }
    .map(|(p, prop)| {
        (
            p,
            prop.unwrap_or_else(|| io_geojson::DEFAULT_COUNTY_PROPERTY.to_string()),
        )
    });
    let output = match (&args.out, &config.output_settings) {
        (Some(o), _) => Some(o.clone()),
        (None, Some(os)) => os.output_path.as_ref().map(|o| {
            if o == "stdout" {
                o.clone()
            } else {
                root.join(o).display().to_string()
            }
        }),
        (None, None) => None,
    };
    let map_name = config
        .output_settings
        .as_ref()
        .map(|os| os.map_name.clone())
        .unwrap_or_else(|| DEFAULT_MAP_NAME.to_string());
    Ok(MapSources {
        map_name,
        input,
        geometry,
        output,
    })
}

fn build_selection(filter: &FilterSettings, dataset: &Dataset) -> FilterSelection {
    let election = match filter.election.as_deref().map(|e| e.trim()) {
        Some(e) if !e.is_empty() => e.to_string(),
        _ => match dataset.latest_election() {
            Some(e) => {
                info!("No election selected, using the most recent one: {}", e);
                e
            }
            None => {
                warn!("The turnout table has no election");
                String::new()
            }
        },
    };
    let mut selection = FilterSelection::for_election(&election);
    for facet in Facet::ALL_FACETS.iter() {
        selection = selection.with(*facet, filter.value(*facet));
    }
    if !dataset.elections().contains(&election) {
        warn!("Election {:?} is not in the turnout table", election);
    }
    selection
}

fn aggregate_fields(agg: &CountyAggregate) -> JSMap<String, JSValue> {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    m.insert("registered".to_string(), json!(agg.registered));
    m.insert("voted".to_string(), json!(agg.voted));
    m.insert("turnout".to_string(), json!(agg.turnout));
    m.insert("turnoutText".to_string(), json!(format_turnout(agg.turnout)));
    m
}

fn counties_to_json(view: &ChoroplethView, county_keys: &[String]) -> JSMap<String, JSValue> {
    let mut counties: JSMap<String, JSValue> = JSMap::new();
    for county in county_keys.iter() {
        let agg = view.county(county).copied().unwrap_or_default();
        let mut m = aggregate_fields(&agg);
        m.insert("color".to_string(), json!(view.color_for(agg.turnout)));
        m.insert("tooltip".to_string(), json!(view.tooltip(county)));
        counties.insert(county.clone(), JSValue::Object(m));
    }
    counties
}

fn build_summary_js(
    map_name: &str,
    selection: &FilterSelection,
    view: &ChoroplethView,
    county_keys: &[String],
) -> JSValue {
    let c = OutputConfig {
        map_name: map_name.to_string(),
        election: selection.election.clone(),
        party: selection.party.to_string(),
        race: selection.race.to_string(),
        ethnicity: selection.ethnicity.to_string(),
        sex: selection.sex.to_string(),
        age_group: selection.age_group.to_string(),
    };
    let legend = view.legend();
    json!({
        "config": c,
        "statewide": aggregate_fields(view.statewide()),
        "legend": {
            "lowBound": view.scale().low_bound,
            "highBound": view.scale().high_bound,
            "low": legend.low_label,
            "high": legend.high_label,
            "lowColor": legend.low_color.to_string(),
            "highColor": legend.high_color.to_string(),
            "noDataColor": legend.no_data_color.to_string(),
        },
        "counties": counties_to_json(view, county_keys),
    })
}

fn build_facets_js(dataset: &Dataset, election: &str) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    m.insert("election".to_string(), json!(election));
    m.insert("elections".to_string(), json!(dataset.elections()));
    for facet in Facet::ALL_FACETS.iter() {
        let options: Vec<String> = dataset
            .facet_options(election, *facet)
            .iter()
            .map(|v| v.to_string())
            .collect();
        m.insert(facet.label().to_string(), json!(options));
    }
    JSValue::Object(m)
}

fn write_output(output: &Option<String>, contents: &str) -> TurnoutResult<()> {
    match output.as_deref() {
        None | Some("stdout") => {
            println!("{}", contents);
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, contents).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

// The county keys of the map: the geometry when there is one, otherwise the
// counties found in the data.
fn map_counties(view: &ChoroplethView, sources: &MapSources) -> TurnoutResult<Vec<String>> {
    let (path, property) = match &sources.geometry {
        Some(g) => g,
        None => return Ok(view.counties().keys().cloned().collect()),
    };
    let keys = io_geojson::read_county_keys(path, property)?;
    for county in view.counties().keys() {
        if !keys.contains(county) {
            warn!(
                "County {} has data but no geometry, it will not be shown",
                county
            );
        }
    }
    Ok(keys)
}

/// Runs the program: reads the inputs, computes the map for the selection
/// and writes the summary. If a reference summary is given, the run fails
/// when the computed summary differs from it.
pub fn run_map(args: &Args) -> TurnoutResult<()> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        None => (MapConfig::default(), PathBuf::new()),
    };
    info!("config: {:?}", config);

    let sources = resolve_sources(&config, &root, args)?;
    let rules = validate_scale(&config.color_scale)?;
    let filter = config.filter.clone().unwrap_or_default().merged_with(args);
    debug!("run_map: sources {:?} filter {:?}", sources, filter);

    let rows = io_csv::read_turnout_csv(&sources.input)?;
    let dataset = Dataset::from_rows(&rows);
    if dataset.is_empty() {
        warn!("The turnout table {:?} has no rows", sources.input);
    }
    let selection = build_selection(&filter, &dataset);

    let result_js = if args.list_facets {
        build_facets_js(&dataset, &selection.election)
    } else {
        let view = dataset.render(&selection, &rules);
        let county_keys = map_counties(&view, &sources)?;
        build_summary_js(&sources.map_name, &selection, &view, &county_keys)
    };

    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(FormattingJsonSnafu {})?;
    write_output(&sources.output, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(FormattingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed summary and reference summary")
        }
    }

    Ok(())
}

fn run_map_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> TurnoutResult<()> {
    let test_dir = option_env!("TURNOUT_TEST_DIR")
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}/tests/data", env!("CARGO_MANIFEST_DIR")));
    info!("Running test {}", test_name);
    let args = Args {
        config: Some(format!("{}/{}/{}", test_dir, test_name, config_lpath)),
        reference: Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        out: Some("stdout".to_string()),
        ..Args::default()
    };
    run_map(&args)
}

pub fn test_wrapper(test_name: &str) {
    let res = run_map_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    );
    if let Err(e) = &res {
        eprintln!("An error occured {}", e);
    }
    assert!(res.is_ok(), "test {} failed: {:?}", test_name, res);
}
