use std::error::Error;

use clap::Args;
use hgr_graph::canonical_hash;
use serde_json::json;

use super::GraphInput;

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub graph: GraphInput,
    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
    /// Attach value histograms to every distribution.
    #[arg(long)]
    pub histogram: bool,
}

pub fn run(args: &InfoArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.graph.load()?;
    let summary = graph.summary(args.histogram)?;
    let hash = canonical_hash(&graph);
    if args.json {
        let report = json!({ "summary": summary, "canonical_hash": hash });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{summary}");
        println!("canonical hash: {hash}");
    }
    Ok(())
}
