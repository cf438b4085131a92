use clap::*;
use enzdist::libs::distance;
use enzdist::libs::site::SiteIndex;

// Create subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("calc-distances")
        .about("Calculate distances from enzyme cut sites to integration sites")
        .after_help(
            r###"Input files are unheadered CSVs:

* --enzyme-file      (enzyme, chromosome, position) per row
* --integration-file (site id, chromosome, position) per row

Rows with a field count other than 3 are skipped with a warning. The output
table has one row per integration site and two distance columns per enzyme;
a side with no flanking cut site is written as "not available". With no
valid integration sites no output file is created.

"###,
        )
        .arg(
            Arg::new("enzyme-file")
                .long("enzyme-file")
                .required(true)
                .num_args(1)
                .help("CSV file containing enzyme cut-site positions"),
        )
        .arg(
            Arg::new("integration-file")
                .long("integration-file")
                .required(true)
                .num_args(1)
                .help("CSV file containing integration sites"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .default_value("closest_enzyme_distances_new.csv")
                .help("Output CSV file for distance results"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let enzyme_file = args.get_one::<String>("enzyme-file").unwrap();
    let integration_file = args.get_one::<String>("integration-file").unwrap();
    let output = args.get_one::<String>("output").unwrap();

    let index = SiteIndex::from_csv(enzdist::reader(enzyme_file)?)?;
    let results = distance::calc_distances(&index, enzdist::reader(integration_file)?)?;
    distance::write_distances(&results, output)?;

    Ok(())
}
