use anyhow::Result;
use clap::Parser;
use get_papers::query;

#[derive(Parser)]
#[command(name = "get-papers-list")]
#[command(about = "Fetch PubMed papers with non-academic authors using a search query")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: query::QueryArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.args.debug {
        std::env::set_var("RUST_LOG", "get_papers=debug");
    }

    query::run(cli.args)
}
