use crate::CLAP_STYLING;
use carto::handlers::{LAYER_TABLE_FILE, URL_LIST_FILE};
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("carto")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("carto")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("extract")
                .about("Extract the URL list from an XML sitemap or sitemap index")
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The sitemap URL")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"direct")
                        .required(false)
                        .help("Treat the URL as a leaf sitemap, never as a sitemap index")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the URL list")
                        .default_value(URL_LIST_FILE),
                ),
        )
        .subcommand(
            command!("categorize")
                .about("Categorize a URL list into a layer table by path depth")
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Number of layers deep to categorize")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("The URL list to categorize")
                        .default_value(URL_LIST_FILE),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the layer table")
                        .default_value(LAYER_TABLE_FILE),
                ),
        )
        .subcommand(
            command!("visualize")
                .about("Build a graph description from a categorized layer table")
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Number of layers deep to plot")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(-l --"limit" <NUM>)
                        .required(false)
                        .help("Maximum number of child nodes for a branch; the rest collapse into one overflow node")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"title" <TITLE>)
                        .required(false)
                        .help("Graph title")
                        .default_value(""),
                )
                .arg(
                    arg!(--"style" <STYLE>)
                        .required(false)
                        .help("Graph style")
                        .value_parser(["light", "dark"])
                        .default_value("light"),
                )
                .arg(
                    arg!(--"size" <SIZE>)
                        .required(false)
                        .help("Size hint passed through to the layout engine")
                        .default_value("8,5"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format")
                        .value_parser(["dot", "json"])
                        .default_value("dot"),
                )
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("The layer table to plot")
                        .default_value(LAYER_TABLE_FILE),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the graph description")
                        .default_value("sitemap_graph.dot"),
                ),
        )
        .subcommand(
            command!("run")
                .about("Run extract, categorize and visualize in one pass")
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The sitemap URL")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"direct")
                        .required(false)
                        .help("Treat the URL as a leaf sitemap, never as a sitemap index")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Number of layers deep to categorize and plot")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(-l --"limit" <NUM>)
                        .required(false)
                        .help("Maximum number of child nodes for a branch")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"title" <TITLE>)
                        .required(false)
                        .help("Graph title")
                        .default_value(""),
                )
                .arg(
                    arg!(--"style" <STYLE>)
                        .required(false)
                        .help("Graph style")
                        .value_parser(["light", "dark"])
                        .default_value("light"),
                )
                .arg(
                    arg!(--"size" <SIZE>)
                        .required(false)
                        .help("Size hint passed through to the layout engine")
                        .default_value("8,5"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format")
                        .value_parser(["dot", "json"])
                        .default_value("dot"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the graph description")
                        .default_value("sitemap_graph.dot"),
                ),
        )
}
