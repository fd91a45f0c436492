use std::io::{self, Write};

/// Line-oriented training log.
///
/// The format is the contract with downstream analysis tooling:
///
/// ```text
/// Generation <n>
/// G: [<w0>, <w1>, ...]
/// T0: <score>
/// T1: <score>
/// ```
///
/// A `Generation` line starts a block, a `G:` line starts an individual and
/// each `T<j>:` line carries one raw playout score.
#[derive(Debug)]
pub struct TrainingLog<W: Write> {
    writer: W,
}

impl<W: Write> TrainingLog<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the generation marker line.
    pub fn begin_generation(&mut self, generation: usize) -> io::Result<()> {
        writeln!(self.writer, "Generation {generation}")
    }

    /// Writes one individual's genome and playout scores.
    pub fn record_individual(&mut self, genome: &[f64], scores: &[usize]) -> io::Result<()> {
        writeln!(self.writer, "G: {genome:?}")?;
        for (playout, score) in scores.iter().enumerate() {
            writeln!(self.writer, "T{playout}: {score}")?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
