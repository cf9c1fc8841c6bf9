//! The interactive session: collect filters, load, view raw rows, report,
//! and repeat while the user asks to restart.

use std::io::Write;

use tracing::info;

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::loader::{load_trips, TripTable};
use crate::prompt::{LineSource, Prompter};
use crate::report::report;
use crate::stats;
use crate::viewer::RawDataViewer;

const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";
pub const NO_MATCHING_TRIPS: &str = "No trips match the selected filters.";

pub struct Session<'c, R, W> {
    config: &'c ExplorerConfig,
    prompter: Prompter<R, W>,
}

impl<'c, R: LineSource, W: Write> Session<'c, R, W> {
    pub fn new(config: &'c ExplorerConfig, input: R, output: W) -> Self {
        Self {
            config,
            prompter: Prompter::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run passes until the user declines to restart.
    pub fn run(&mut self) -> Result<()> {
        let mut pass = 1;
        loop {
            info!(pass, "session pass started");
            self.run_once()?;
            if !self.prompter.confirm(RESTART_QUESTION)? {
                info!(passes = pass, "session finished");
                return Ok(());
            }
            pass += 1;
        }
    }

    /// One pass: filters, load, raw data, then the four reports.
    pub fn run_once(&mut self) -> Result<()> {
        let selection = self.prompter.get_filters()?;
        let table = load_trips(self.config, &selection)?;

        RawDataViewer::new(table.frame(), self.config.page_size()).run(&mut self.prompter)?;

        self.report_all(&table)
    }

    fn report_all(&mut self, table: &TripTable) -> Result<()> {
        let out = self.prompter.output();
        if table.is_empty() {
            writeln!(out, "\n{NO_MATCHING_TRIPS}")?;
            return Ok(());
        }

        report(out, table, stats::time_stats)?;
        report(out, table, stats::station_stats)?;
        report(out, table, stats::duration_stats)?;
        report(out, table, stats::user_stats)?;
        out.flush()?;
        Ok(())
    }
}
