use clap::*;
use enzdist::libs::distance;
use enzdist::libs::fragment::{self, Directions, FragmentLengths};

// Create subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("finalize-distances")
        .about("Apply fragment-length offsets and directions to a distance table")
        .after_help(
            r###"Input files are headered CSVs:

* --lengths-file    Name,L,H with integer offsets per enzyme
* --directions-file IntegrationSite# plus one <enzyme>_<offset> column per
                    pair, cells "up", "down" or blank
* --distances-file  the table written by `enzdist calc-distances`

Only enzymes listed in the lengths file are carried into the output. Output
columns are the three identity columns followed by <enzyme>_<offset> in
lengths-file order, L before H. A pair with no direction assignment, or
whose selected distance is unavailable, is written as "not available".

"###,
        )
        .arg(
            Arg::new("lengths-file")
                .long("lengths-file")
                .required(true)
                .num_args(1)
                .help("CSV file containing fragment lengths (Name, L, H)"),
        )
        .arg(
            Arg::new("directions-file")
                .long("directions-file")
                .required(true)
                .num_args(1)
                .help("CSV file containing per-site direction assignments"),
        )
        .arg(
            Arg::new("distances-file")
                .long("distances-file")
                .required(true)
                .num_args(1)
                .help("CSV file containing the calculated distance table"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .default_value("final_distances_with_lengths.csv")
                .help("Output CSV file for final distances"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let lengths_file = args.get_one::<String>("lengths-file").unwrap();
    let directions_file = args.get_one::<String>("directions-file").unwrap();
    let distances_file = args.get_one::<String>("distances-file").unwrap();
    let output = args.get_one::<String>("output").unwrap();

    let lengths = FragmentLengths::from_csv(enzdist::reader(lengths_file)?)?;
    let directions = Directions::from_csv(enzdist::reader(directions_file)?)?;

    let enzymes = lengths.enzymes();
    let rows = distance::read_distances(enzdist::reader(distances_file)?, &enzymes)?;

    let finals = fragment::finalize(&lengths, &directions, &rows);
    fragment::write_final(&lengths, &finals, output)?;

    Ok(())
}
