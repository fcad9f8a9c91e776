//! # vrtcorpus
//!
//! Turns a dump of recipe records (JSON, one per file) into a linguistically annotated
//! VRT corpus: one recipe file and one comments file per record.
//!
//! ## Getting started
//!
//! ```sh
//! vrtcorpus 1.0.0
//! recipe corpus generation tool.
//!
//! USAGE:
//!     vrtcorpus <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     annotate    Annotate a recipe dump into VRT files
//!     help        Prints this message or the help of the given subcommand(s)
//!     merge       Merge VRT files into a single corpus file
//! ```
//!
use std::fs::File;
use std::time::Duration;

use structopt::StructOpt;

use vrtcorpus::annotators::{LexiconModels, LexiconModelsBuilder, OverrideTags};
use vrtcorpus::error::Error;
use vrtcorpus::pipelines::vrt::types::DatePolicy;
use vrtcorpus::pipelines::vrt::{write_failures, PoolConfig, RunReport};
use vrtcorpus::pipelines::{Pipeline, VrtPipeline};
use vrtcorpus::processing::{merge, MergeOptions};

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Vrtcorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Vrtcorpus::Annotate(a) => {
            let mut builder = LexiconModelsBuilder::default();
            builder.primary(&a.primary_model).fallback(&a.fallback_model);
            if !a.override_tags.is_empty() {
                let overrides: OverrideTags = a.override_tags.iter().map(String::as_str).collect();
                builder.overrides(overrides);
            }
            let models = builder.build()?;

            let mut pool = PoolConfig {
                stagger: Duration::from_millis(a.stagger_ms),
                ..Default::default()
            };
            if let Some(workers) = a.workers {
                pool.workers = workers;
            }

            let date_policy = if a.lenient_dates {
                DatePolicy::Lenient
            } else {
                DatePolicy::Strict
            };

            info!(
                "vrtcorpus {}",
                <VrtPipeline<LexiconModels> as Pipeline<RunReport>>::version()
            );
            let p = VrtPipeline::new(a.src, a.dst, models)
                .with_pool(pool)
                .with_date_policy(date_policy)
                .with_id_start(a.sentence_id_start, a.comment_id_start);
            let report = p.run()?;

            let mut error_file = File::create(&a.errors)?;
            let failed = write_failures(&report, &mut error_file)?;
            if failed > 0 {
                warn!("{} documents failed, see {:?}", failed, a.errors);
            }
        }

        cli::Vrtcorpus::Merge(m) => {
            let options = MergeOptions {
                extension: m.extension,
                trim: m.trim,
                compress: m.gzip,
            };
            let n = merge(&m.src, &m.dst, &options)?;
            info!("merged {} files into {:?}", n, m.dst);
        }
    };

    Ok(())
}
