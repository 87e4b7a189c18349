/*!

This is the long-form manual for `turnout_engine` and `turnoutmap`.

## Input table

The input is a CSV file with a header row and one row per election, county
and combination of demographic codes:

| column             | content                                              |
|--------------------|------------------------------------------------------|
| `election_date`    | election key, for example `2025-11-04`               |
| `county_desc`      | county name, compared without regard to case         |
| `party_cd`         | party code (`DEM`, `REP`, `UNA`, ...)                 |
| `race_code`        | race code                                            |
| `ethnic_code`      | ethnicity code                                       |
| `sex_code`         | sex code                                             |
| `age_group`        | age band, for example `Age 18 - 25`                  |
| `registered_count` | number of registered voters in the bucket            |
| `voted_count`      | number of voters of the bucket who voted             |

Other columns (such as a precomputed `turnout_rate`) are ignored.

Reading is permissive: blanks around values are removed, an empty code means
"unspecified" and is a value of its own, and a count that is not a plain
non-negative integer counts as 0. The number of voters may be larger than the
number of registered voters; the turnout is then shown as 100% while the
tooltip keeps the counts of the table.

## Filtering

A selection is made of one election and, for each of the party, race,
ethnicity, sex and age band, either `All` or one exact code. The counts of the
matching rows are summed per county. The options offered for a facet are the
codes found in the selected election, whatever is selected for the other
facets.

## Colors

The turnout of the counties is mapped to [0, 1] between its 5th and 95th
percentiles (when at least 5 counties have data; otherwise between 0% and
100%), then colored with a sequential red ramp:

| position | color     |
|----------|-----------|
| 0.0      | `#fee5d9` |
| 0.5      | `#fcae91` |
| 0.6      | `#fb6a4a` |
| 0.7      | `#de2d26` |
| 1.0      | `#a50f15` |

Counties without registered voters are drawn in gray (`#cccccc`) and labeled
"No data".

## Command line

```bash
turnoutmap -i county_demographic_turnout_20251104.csv --party DEM --age-group "Age 18 - 25"
```

or, with a configuration file:

```bash
turnoutmap --config nc_turnout_config.json --out summary.json
```

The configuration file is a JSON document:

```json
{
  "outputSettings": { "mapName": "NC turnout", "outputPath": "summary.json" },
  "turnoutSource": { "filePath": "county_demographic_turnout_20251104.csv" },
  "geometrySource": { "filePath": "nc_counties.geojson", "countyProperty": "County" },
  "filter": { "election": "2025-11-04", "party": "DEM" },
  "colorScale": { "lowPercentile": 0.05, "highPercentile": 0.95, "minSamples": 5 }
}
```

Paths are relative to the configuration file. Options on the command line
take precedence over the file. Without an election, the most recent one of
the table is used. `--list-facets` prints the elections and the options of
every facet instead of the map summary.

*/
