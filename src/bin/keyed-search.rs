//! Build every selected structure over each CSV file and time one key lookup.
//!
//! ```text
//! keyed-search [--key KEY] [--structure NAME]... [--capacity-factor N] [--prime] FILE...
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use keyed_search::{build_hash_table, dataset, Config, SearchIndex, Structure};

const HELP: &str = "\
Usage: keyed-search [OPTIONS] FILE...

Options:
  --key KEY              Key to search for [default: Russia]
  --structure NAME       linear, bst, rbtree, hash or multimap; repeatable [default: all]
  --capacity-factor N    Hash table slots per record [default: 2]
  --prime                Round the hash table capacity up to a prime
  -h, --help             Print this help
";

struct Args {
    key: String,
    structures: Vec<Structure>,
    config: Config,
    files: Vec<PathBuf>,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let key = args
        .opt_value_from_str("--key")?
        .unwrap_or_else(|| "Russia".to_owned());
    let mut structures: Vec<Structure> = args.values_from_str("--structure")?;
    if structures.is_empty() {
        structures = Structure::ALL.to_vec();
    }

    let mut config = Config::default();
    if let Some(factor) = args.opt_value_from_str("--capacity-factor")? {
        config.hash_capacity_factor = factor;
    }
    config.prime_hash_capacity = args.contains("--prime");

    let files: Vec<PathBuf> = args.finish().into_iter().map(PathBuf::from).collect();
    if files.is_empty() {
        bail!("no input files\n\n{HELP}");
    }

    Ok(Some(Args {
        key,
        structures,
        config,
        files,
    }))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(args) = parse_args()? else {
        print!("{HELP}");
        return Ok(());
    };

    println!("file\tstructure\trecords\tmatches\tbuild_us\tquery_us\tcollisions");
    for path in &args.files {
        let records =
            dataset::load(path).with_context(|| format!("loading {}", path.display()))?;
        log::info!("{}: {} records", path.display(), records.len());

        for &structure in &args.structures {
            let start = Instant::now();
            let built = if structure == Structure::Hash {
                // Keep the concrete table for its collision counter.
                build_hash_table(&records, &args.config)
                    .map(|t| (t.collisions().to_string(), Box::new(t) as Box<dyn SearchIndex>))
            } else {
                structure
                    .build(&records, &args.config)
                    .map(|index| ("-".to_owned(), index))
            };
            let (collisions, index) =
                built.with_context(|| format!("building {structure} over {}", path.display()))?;
            let build_time = start.elapsed();

            let start = Instant::now();
            let matches = index.find_all(&args.key);
            let query_time = start.elapsed();

            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                path.display(),
                structure,
                records.len(),
                matches.len(),
                build_time.as_micros(),
                query_time.as_micros(),
                collisions,
            );
        }
    }

    Ok(())
}
