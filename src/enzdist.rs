extern crate clap;
use clap::*;

mod cmd_enzdist;

fn main() -> anyhow::Result<()> {
    let app = Command::new("enzdist")
        .version(crate_version!())
        .about("`enzdist` - flanking restriction-enzyme distances for integration sites")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_enzdist::calc_distances::make_subcommand())
        .subcommand(cmd_enzdist::finalize_distances::make_subcommand())
        .after_help(
            r###"Pipeline stages:

* calc-distances     - nearest flanking cut sites for each integration site
* finalize-distances - fold fragment-length offsets and directions into the
                       distance table written by calc-distances

The stages share no state beyond the intermediate CSV file.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("calc-distances", sub_matches)) => cmd_enzdist::calc_distances::execute(sub_matches),
        Some(("finalize-distances", sub_matches)) => {
            cmd_enzdist::finalize_distances::execute(sub_matches)
        }
        _ => unreachable!(),
    }?;

    Ok(())
}
