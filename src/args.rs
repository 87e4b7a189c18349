use clap::Parser;

/// This is a program that computes county turnout maps from demographic turnout tables.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the map to compute.
    /// For more information about the file format, read the manual of the turnout_engine crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided,
    /// turnoutmap will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The CSV turnout table. Setting this option overrides the file that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, optional) A GeoJSON file with the county boundaries. Only the county names are read.
    #[clap(short, long, value_parser)]
    pub geometry: Option<String>,

    /// (date, default: the most recent election of the table) The election to show.
    #[clap(short, long, value_parser)]
    pub election: Option<String>,

    /// (code or 'All') Party filter.
    #[clap(long, value_parser)]
    pub party: Option<String>,

    /// (code or 'All') Race filter.
    #[clap(long, value_parser)]
    pub race: Option<String>,

    /// (code or 'All') Ethnicity filter.
    #[clap(long, value_parser)]
    pub ethnicity: Option<String>,

    /// (code or 'All') Sex filter.
    #[clap(long, value_parser)]
    pub sex: Option<String>,

    /// (age band or 'All') Age band filter.
    #[clap(long, value_parser)]
    pub age_group: Option<String>,

    /// If passed as an argument, prints the elections and the options of each filter instead of the map.
    #[clap(long, takes_value = false)]
    pub list_facets: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
