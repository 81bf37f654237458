//! # Lacuna
//!
//! Training data generation from ancient text editions.
//! See the library documentation for the processing steps.
use structopt::StructOpt;

use lacuna::error::Error;
use lacuna::pipelines::{Batch, Labels, Pipeline, Restoration, Sample};

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Lacuna::from_args();
    debug!("cli args\n{:#?}", opt);

    let written = match opt {
        cli::Lacuna::Text(t) => {
            let config = t.config()?;
            debug!("configuration: {}", serde_json::to_string(&config)?);
            let c = t.common;
            Batch::new(Restoration::new(config)?, c.src, c.dst)
                .rounds(c.rounds)
                .seed(c.seed)
                .format(c.format)
                .run()?
        }

        cli::Lacuna::Labels(l) => {
            let config = l.config()?;
            debug!("configuration: {}", serde_json::to_string(&config)?);
            let c = l.common;
            Batch::new(Labels::new(config)?, c.src, c.dst)
                .rounds(c.rounds)
                .seed(c.seed)
                .format(c.format)
                .run()?
        }

        cli::Lacuna::Sample(s) => {
            let stratifier = s.stratifier()?;
            Sample::new(stratifier, s.src, s.dst, &s.name)
                .seed(s.seed)
                .format(s.format)
                .run()?
        }
    };

    info!("done, {} examples written", written);
    Ok(())
}
