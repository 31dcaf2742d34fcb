use clap::Parser;

use declc::cli::Args;
use declc::emit::write_schema;
use declc::graph::load_graph;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (graph, requested) = load_graph(&args.files, &args.search_dirs)?;
    let dialect = args.dialect.profile();

    // Render fully before touching the sink: any error discards the run
    // without leaving a partial file behind.
    let mut buf = Vec::new();
    write_schema(&mut buf, &graph, &requested, &dialect)?;

    match &args.outfile {
        Some(path) => std::fs::write(path, &buf)?,
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&buf)?;
        }
    }
    Ok(())
}
