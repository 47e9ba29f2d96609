//! Diagnostic sink and report formatting.
//!
//! A [`Reporter`] owns the writer that pass/fail and timing records go to.
//! Every call is independent: the reporter holds no state besides the
//! writer and its [`Config`].

pub mod json;
pub mod terminal;

use std::io::{self, Stderr, Stdout, Write};

use crate::compare::{compare, Comparison};
use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::measurement::{counter_name, ClockSample, CycleSample};
use crate::probe::{self, CheckFailure};
use crate::result::Outcome;
use crate::throughput::Throughput;

use self::json::Record;

/// Writes report records to a diagnostic sink.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    sink: W,
    config: Config,
}

impl Reporter<Stdout> {
    /// Reporter on stdout, configured from the environment.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Config::default().from_env())
    }
}

impl Reporter<Stderr> {
    /// Reporter on stderr, configured from the environment.
    pub fn stderr() -> Self {
        Self::new(io::stderr(), Config::default().from_env())
    }
}

impl<W: Write> Reporter<W> {
    /// Reporter on an arbitrary writer.
    pub fn new(sink: W, config: Config) -> Self {
        Self { sink, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Compare `len` bytes of `reference` and `actual` and report the result.
    ///
    /// A mismatch is reported and returned as a failed [`Comparison`], not
    /// as an error.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthOutOfBounds`] if `len` exceeds either buffer
    /// - [`Error::Io`] if the sink cannot be written
    pub fn compare_and_report(
        &mut self,
        label: &str,
        reference: &[u8],
        actual: &[u8],
        len: usize,
    ) -> Result<Comparison> {
        let cmp = match compare(reference, actual, len) {
            Ok(cmp) => cmp,
            Err(err) => {
                tracing::warn!(label, len, error = %err, "rejected comparison");
                let reason = err.to_string();
                match self.config.format {
                    OutputFormat::Terminal => {
                        let text =
                            terminal::format_invalid_comparison(label, &reason, self.config.color);
                        self.write_text(&text)?;
                    }
                    OutputFormat::Json => {
                        self.write_record(&Record::InvalidComparison { label, reason })?;
                    }
                }
                return Err(err);
            }
        };

        match cmp.first_divergence {
            None => tracing::debug!(label, len, "buffers match"),
            Some(div) => tracing::warn!(
                label,
                offset = div.offset,
                expected = div.expected,
                actual = div.actual,
                mismatches = cmp.mismatches,
                "buffers differ"
            ),
        }

        match self.config.format {
            OutputFormat::Terminal => {
                let text =
                    terminal::format_comparison(label, reference, actual, &cmp, &self.config);
                self.write_text(&text)?;
            }
            OutputFormat::Json => {
                let record =
                    Record::comparison(label, reference, actual, &cmp, self.config.show_buffers);
                self.write_record(&record)?;
            }
        }

        Ok(cmp)
    }

    /// Compare a computed output against a whole reference vector.
    ///
    /// Bytes are compared over the common prefix and reported first. If the
    /// lengths differ, a length line follows, so the hex diagnostic is
    /// written even when the caller goes on to fail on the length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink cannot be written.
    pub fn compare_vector(
        &mut self,
        label: &str,
        expected: &[u8],
        computed: &[u8],
    ) -> Result<Comparison> {
        let len = expected.len().min(computed.len());
        let cmp = self.compare_and_report(label, expected, computed, len)?;

        if expected.len() != computed.len() {
            tracing::warn!(
                label,
                expected_len = expected.len(),
                actual_len = computed.len(),
                "output length differs"
            );
            match self.config.format {
                OutputFormat::Terminal => {
                    let text = terminal::format_length_mismatch(
                        label,
                        expected.len(),
                        computed.len(),
                        self.config.color,
                    );
                    self.write_text(&text)?;
                }
                OutputFormat::Json => self.write_record(&Record::LengthMismatch {
                    label,
                    expected_len: expected.len(),
                    actual_len: computed.len(),
                })?,
            }
        }

        Ok(cmp)
    }

    /// Report the average cycles per round between two samples.
    ///
    /// Invalid measurements are written to the sink before the error is
    /// returned, so they never pass silently.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroRounds`] if `rounds == 0`
    /// - [`Error::NonMonotonic`] if `end` precedes `start`
    /// - [`Error::Io`] if the sink cannot be written
    pub fn print_cycles_per_round(
        &mut self,
        start: CycleSample,
        end: CycleSample,
        rounds: u32,
    ) -> Result<Throughput> {
        let throughput = match Throughput::from_samples(start, end, rounds) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(%start, %end, rounds, error = %err, "rejected cycle measurement");
                let reason = err.to_string();
                match self.config.format {
                    OutputFormat::Terminal => {
                        let text = terminal::format_invalid_measurement(&reason, self.config.color);
                        self.write_text(&text)?;
                    }
                    OutputFormat::Json => {
                        self.write_record(&Record::InvalidMeasurement { reason })?;
                    }
                }
                return Err(err);
            }
        };

        tracing::debug!(
            rounds,
            total_cycles = throughput.total_cycles,
            mean_cycles_per_round = throughput.mean_cycles_per_round,
            "cycles per round"
        );

        match self.config.format {
            OutputFormat::Terminal => self.write_text(&terminal::format_throughput(&throughput))?,
            OutputFormat::Json => self.write_record(&Record::Throughput {
                counter: counter_name(),
                throughput,
            })?,
        }

        Ok(throughput)
    }

    /// Report the wall-clock time between two samples, in seconds.
    ///
    /// Sample order is not validated; a reversed pair reports a negative time.
    pub fn print_clock_diff(&mut self, t1: ClockSample, t2: ClockSample) -> Result<f64> {
        let elapsed_secs = ClockSample::elapsed_secs(t1, t2);
        match self.config.format {
            OutputFormat::Terminal => self.write_text(&terminal::format_clock_diff(elapsed_secs))?,
            OutputFormat::Json => self.write_record(&Record::Clock { elapsed_secs })?,
        }
        Ok(elapsed_secs)
    }

    /// Check a scalar invariant, reporting the failure if it does not hold.
    ///
    /// Nothing is written when the values are equal.
    pub fn check<T: Into<i64>>(&mut self, expected: T, actual: T) -> Result<Outcome> {
        let res = probe::check(expected, actual);
        if let Err(failure) = res {
            tracing::warn!(
                expected = failure.expected,
                actual = failure.actual,
                "check failed"
            );
            self.report_check_failure(&failure)?;
        }
        Ok(Outcome::from(&res))
    }

    /// Report an error code returned by the code under test.
    pub fn report_error_code(&mut self, code: u32) -> Result<()> {
        tracing::debug!(code, "error code reported");
        match self.config.format {
            OutputFormat::Terminal => self.write_text(&terminal::format_error_code(code)),
            OutputFormat::Json => self.write_record(&Record::ErrorCode { code }),
        }
    }

    fn report_check_failure(&mut self, failure: &CheckFailure) -> Result<()> {
        match self.config.format {
            OutputFormat::Terminal => {
                let text = terminal::format_check_failure(failure, self.config.color);
                self.write_text(&text)
            }
            OutputFormat::Json => self.write_record(&Record::Check { failure: *failure }),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.sink.write_all(text.as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }

    fn write_record(&mut self, record: &Record<'_>) -> Result<()> {
        let line = json::to_json(record).map_err(Error::Json)?;
        writeln!(self.sink, "{}", line)?;
        self.sink.flush()?;
        Ok(())
    }
}
